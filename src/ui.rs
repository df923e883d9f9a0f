// UI layer: a simple interactive menu using `dialoguer`. The menu edits
// the form (text field and file picker), triggers submissions and owns
// the terminal, which is the only place Display State gets written to.

use crate::api::{ApiClient, Classifier};
use crate::error::SubmitError;
use crate::submission::{DisplayState, DisplayWriter, Document, Form, Handler};
use anyhow::Result;
use crossterm::style::{style, Stylize};
use dialoguer::{Editor, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::error;

/// Writes Display State to the terminal. `Pending` is shown as a spinner
/// that the next state replaces.
#[derive(Default)]
pub struct TerminalDisplay {
    spinner: Option<ProgressBar>,
}

impl DisplayWriter for TerminalDisplay {
    fn write(&mut self, state: DisplayState) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        match &state {
            DisplayState::Pending => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::with_template("{spinner} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                spinner.set_message(state.render().to_string());
                spinner.enable_steady_tick(Duration::from_millis(80));
                self.spinner = Some(spinner);
            }
            DisplayState::Idle => println!("{}", style(state.render()).dim()),
            DisplayState::Success(text) => println!("{}", style(text).green()),
            DisplayState::Failed(text) => println!("{}", style(text).red()),
        }
    }
}

/// Main interactive menu. Runs a select loop until the user chooses
/// "Exit".
pub fn main_menu(api: ApiClient) -> Result<()> {
    let handler = Handler::new(api);
    let mut form = Form::default();
    let mut display = TerminalDisplay::default();
    display.write(DisplayState::Idle);

    loop {
        print_form(&form);
        let items = vec![
            "Enter e-mail text",
            "Load text from .txt file",
            "Select PDF file",
            "Clear inputs",
            "Submit",
            "Check service health",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => form.text = edit_text(&form.text)?,
            1 => {
                let path = prompt_path("Text file path")?;
                if let Some(path) = path {
                    if let Err(e) = form.load_text_file(&path) {
                        println!("Could not read {}: {}", path.display(), e);
                    }
                }
            }
            2 => {
                // No native picker (or a cancelled one) falls back to a typed path.
                let picked = rfd::FileDialog::new()
                    .set_title("Select a PDF")
                    .add_filter("PDF", &["pdf"])
                    .pick_file();
                let path = match picked {
                    Some(path) => Some(path),
                    None => prompt_path("PDF file path (empty keeps the current one)")?,
                };
                if let Some(path) = path {
                    pick_document(&mut form, &path);
                }
            }
            3 => form.clear(),
            4 => match handler.submit(&form, &mut display) {
                Err(SubmitError::Busy) => println!("A submission is already in progress."),
                // Every other outcome has already been written to the display.
                _ => {}
            },
            5 => match handler.classifier().health() {
                Ok(status) => println!("{}", DisplayState::success(&status).render()),
                Err(e) => println!("{}", style(format!("Health check failed: {}", e)).red()),
            },
            6 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Run a single submission from command-line inputs and return the process
/// exit status: 0 on success, 1 on any failure.
///
/// A document that cannot be read is reported through `display` like any
/// other failed submission.
pub fn run_once<C, W>(
    handler: &Handler<C>,
    text: Option<String>,
    file: Option<&Path>,
    display: &mut W,
) -> u8
where
    C: Classifier,
    W: DisplayWriter + ?Sized,
{
    let document = match file.map(Document::load).transpose() {
        Ok(document) => document,
        Err(e) => {
            let path = file.map(|p| p.display().to_string()).unwrap_or_default();
            let err = SubmitError::unexpected(format!("Could not read {}: {}", path, e));
            error!(error = %err, "one-shot submission aborted");
            display.write(DisplayState::Pending);
            if let Some(state) = err.display_state() {
                display.write(state);
            }
            return 1;
        }
    };
    let form = Form {
        text: text.unwrap_or_default(),
        document,
    };
    match handler.submit(&form, display) {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Open the user's editor for multi-line text, falling back to a single
/// line prompt when no editor can be launched.
fn edit_text(current: &str) -> Result<String> {
    match Editor::new().edit(current) {
        Ok(Some(text)) => Ok(text),
        Ok(None) => Ok(current.to_string()),
        Err(_) => {
            let text: String = Input::new()
                .with_prompt("E-mail text")
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()?;
            Ok(text)
        }
    }
}

/// Prompt for a path; an empty answer means "none".
fn prompt_path(prompt: &str) -> Result<Option<PathBuf>> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let raw = raw.trim();
    Ok((!raw.is_empty()).then(|| PathBuf::from(raw)))
}

fn pick_document(form: &mut Form, path: &Path) {
    match Document::load(path) {
        Ok(doc) => form.document = Some(doc),
        Err(e) => println!("Could not read {}: {}", path.display(), e),
    }
}

fn print_form(form: &Form) {
    let text = form.text.trim();
    let preview: String = text.chars().take(60).collect();
    let text_line = if text.is_empty() {
        "(empty)".to_string()
    } else if preview.len() < text.len() {
        format!("{}…", preview.replace('\n', " "))
    } else {
        preview.replace('\n', " ")
    };
    let doc_line = form
        .document
        .as_ref()
        .map(|d| format!("{} ({} bytes)", d.file_name, d.bytes.len()))
        .unwrap_or_else(|| "(none)".to_string());
    println!("Text: {}", text_line);
    println!("PDF:  {}", doc_line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::cell::Cell;

    /// Counts requests and always answers with the same result.
    struct CountingClassifier {
        requests: Cell<usize>,
        reply: Result<Value, SubmitError>,
    }

    impl CountingClassifier {
        fn replying(reply: Result<Value, SubmitError>) -> Self {
            CountingClassifier { requests: Cell::new(0), reply }
        }
    }

    impl Classifier for CountingClassifier {
        fn classify_text(&self, _text: &str) -> Result<Value, SubmitError> {
            self.requests.set(self.requests.get() + 1);
            self.reply.clone()
        }

        fn classify_document(&self, _doc: &Document) -> Result<Value, SubmitError> {
            self.requests.set(self.requests.get() + 1);
            self.reply.clone()
        }
    }

    #[test]
    fn run_once_succeeds_with_text() {
        let handler = Handler::new(CountingClassifier::replying(Ok(json!({"label": "ok"}))));
        let mut display = Vec::new();

        let code = run_once(&handler, Some("Bom dia".into()), None, &mut display);

        assert_eq!(code, 0);
        assert_eq!(handler.classifier().requests.get(), 1);
        assert_eq!(display.last().unwrap(), &DisplayState::success(&json!({"label": "ok"})));
    }

    #[test]
    fn run_once_with_text_and_file_is_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mail.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        let handler = Handler::new(CountingClassifier::replying(Ok(json!({}))));
        let mut display = Vec::new();

        let code = run_once(&handler, Some("texto".into()), Some(&path), &mut display);

        assert_eq!(code, 1);
        assert_eq!(handler.classifier().requests.get(), 0);
        assert_eq!(
            display.last().unwrap().render(),
            "❌ Envie apenas TEXTO ou PDF, não os dois ao mesmo tempo."
        );
    }

    #[test]
    fn run_once_exits_with_failure_on_service_error() {
        let handler = Handler::new(CountingClassifier::replying(Err(SubmitError::service("boom"))));
        let mut display = Vec::new();

        let code = run_once(&handler, Some("x".into()), None, &mut display);

        assert_eq!(code, 1);
        assert_eq!(
            display.last().unwrap().render(),
            "❌ Erro ao processar a solicitação.\n\nboom"
        );
    }

    #[test]
    fn run_once_reports_unreadable_file_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdf");
        let handler = Handler::new(CountingClassifier::replying(Ok(json!({}))));
        let mut display = Vec::new();

        let code = run_once(&handler, None, Some(&missing), &mut display);

        assert_eq!(code, 1);
        assert_eq!(handler.classifier().requests.get(), 0);
        assert_eq!(display.len(), 2);
        assert_eq!(display[0], DisplayState::Pending);
        let rendered = display[1].render();
        assert!(rendered.starts_with("❌ Erro ao processar a solicitação.\n\nCould not read "));
        assert!(rendered.contains("missing.pdf"));
    }
}
