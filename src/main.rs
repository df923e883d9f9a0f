// Entrypoint for the CLI application.
// - With `--text` or `--file`, run a single submission and exit.
// - With `--health`, print the service health report and exit.
// - Otherwise hand an API client to the interactive menu.

use anyhow::{Context, Result};
use clap::Parser;
use mailclass_cli::api::ApiClient;
use mailclass_cli::config::Config;
use mailclass_cli::submission::{DisplayState, Handler};
use mailclass_cli::ui::{main_menu, run_once, TerminalDisplay};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mailclass",
    version,
    about = "Submit e-mail text or a PDF to the classification service"
)]
struct Cli {
    /// E-mail text to classify.
    #[arg(short, long)]
    text: Option<String>,

    /// PDF document to classify.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the service health report and exit.
    #[arg(long)]
    health: bool,

    /// Base URL of the classification service [env: CLASSIFIER_API_URL].
    #[arg(long)]
    api_url: Option<String>,

    /// Path of the text classification endpoint [env: CLASSIFIER_TEXT_PATH].
    #[arg(long)]
    text_path: Option<String>,

    /// Path of the document classification endpoint [env: CLASSIFIER_PDF_PATH].
    #[arg(long)]
    pdf_path: Option<String>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.api_url, cli.text_path, cli.pdf_path);
    let api = ApiClient::new(config)?;

    if cli.health {
        let status = api.health().context("Health check failed")?;
        println!("{}", DisplayState::success(&status).render());
        return Ok(ExitCode::SUCCESS);
    }

    if cli.text.is_none() && cli.file.is_none() {
        main_menu(api)?;
        return Ok(ExitCode::SUCCESS);
    }

    let handler = Handler::new(api);
    let mut display = TerminalDisplay::default();
    let code = run_once(&handler, cli.text, cli.file.as_deref(), &mut display);
    Ok(ExitCode::from(code))
}
