// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules for both one-shot and interactive mode.
//
// Module responsibilities:
// - `config`: where the classification endpoints live.
// - `error`: validation and submission error types.
// - `submission`: form model, validation, Display State and the handler
//   that dispatches the text or file strategy.
// - `api`: HTTP interactions with the classification service.
// - `ui`: terminal menu and the terminal Display State writer.
pub mod api;
pub mod config;
pub mod error;
pub mod submission;
pub mod ui;

pub use api::{ApiClient, Classifier};
pub use config::Config;
pub use error::{SubmitError, ValidationError};
pub use submission::{DisplayState, DisplayWriter, Document, Form, Handler};
