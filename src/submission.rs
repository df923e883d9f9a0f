// Submission handling: the form model, validation, Display State and the
// handler that dispatches one of the two request strategies.

use crate::api::Classifier;
use crate::error::{SubmitError, ValidationError};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, warn};

/// A document picked by the user, held in memory as a binary blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Build a document, guessing its MIME type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Document { file_name, mime, bytes }
    }

    /// Read a document from disk.
    pub fn load(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document.pdf");
        Ok(Document::new(file_name, bytes))
    }
}

/// The two raw input sources: a text field and a file picker.
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub text: String,
    pub document: Option<Document>,
}

/// Exactly one populated input, borrowed from a validated [`Form`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionInput<'a> {
    Text(&'a str),
    File(&'a Document),
}

impl Form {
    pub fn with_text(text: impl Into<String>) -> Self {
        Form { text: text.into(), document: None }
    }

    pub fn with_document(document: Document) -> Self {
        Form { text: String::new(), document: Some(document) }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.document = None;
    }

    /// Enforce exactly one of {text, file}. Text only counts when it is
    /// non-blank; the returned text is trimmed.
    pub fn validate(&self) -> Result<SubmissionInput<'_>, ValidationError> {
        let text = self.text.trim();
        match (text.is_empty(), &self.document) {
            (true, None) => Err(ValidationError::MissingInput),
            (false, Some(_)) => Err(ValidationError::AmbiguousInput),
            (false, None) => Ok(SubmissionInput::Text(text)),
            (true, Some(doc)) => Ok(SubmissionInput::File(doc)),
        }
    }

    /// Fill the text field from a plain-text file, decoding as UTF-8 and
    /// falling back to Latin-1.
    pub fn load_text_file(&mut self, path: &Path) -> io::Result<()> {
        let bytes = fs::read(path)?;
        self.text = decode_text(bytes);
        Ok(())
    }
}

fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        // Latin-1 maps every byte to the code point of the same value.
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}

pub const IDLE_PROMPT: &str = "Informe um texto ou selecione um PDF e envie.";
pub const PENDING_MESSAGE: &str = "⏳ Processando...";

/// The single user-visible status/result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Pending,
    /// Pretty-printed response JSON.
    Success(String),
    /// Fully formatted failure message.
    Failed(String),
}

impl DisplayState {
    /// Render a response with 2-space indentation.
    pub fn success(value: &Value) -> Self {
        let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        DisplayState::Success(pretty)
    }

    pub fn render(&self) -> &str {
        match self {
            DisplayState::Idle => IDLE_PROMPT,
            DisplayState::Pending => PENDING_MESSAGE,
            DisplayState::Success(s) | DisplayState::Failed(s) => s,
        }
    }
}

/// Presentation layer that receives Display State updates.
pub trait DisplayWriter {
    fn write(&mut self, state: DisplayState);
}

impl DisplayWriter for Vec<DisplayState> {
    fn write(&mut self, state: DisplayState) {
        self.push(state);
    }
}

/// Dispatches submissions to a [`Classifier`], allowing at most one
/// submission in flight at a time.
pub struct Handler<C> {
    classifier: C,
    in_flight: AtomicBool,
}

/// Holds the in-flight flag for the lifetime of one submission.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<C: Classifier> Handler<C> {
    pub fn new(classifier: C) -> Self {
        Handler { classifier, in_flight: AtomicBool::new(false) }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one submission: show the pending indicator, validate, send
    /// exactly one request and write the outcome to `display`.
    ///
    /// Returns [`SubmitError::Busy`] without touching `display` when
    /// another submission is still pending.
    pub fn submit<W>(&self, form: &Form, display: &mut W) -> Result<Value, SubmitError>
    where
        W: DisplayWriter + ?Sized,
    {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            warn!("submission rejected: another one is still pending");
            return Err(SubmitError::Busy);
        };

        display.write(DisplayState::Pending);

        let outcome = form
            .validate()
            .map_err(SubmitError::from)
            .and_then(|input| self.dispatch(input));

        match &outcome {
            Ok(value) => display.write(DisplayState::success(value)),
            Err(err) => {
                match err {
                    SubmitError::Validation(v) => warn!(?v, "invalid submission"),
                    _ => error!(error = %err, "classification request failed"),
                }
                if let Some(state) = err.display_state() {
                    display.write(state);
                }
            }
        }
        outcome
    }

    fn dispatch(&self, input: SubmissionInput<'_>) -> Result<Value, SubmitError> {
        match input {
            SubmissionInput::Text(text) => {
                debug!(chars = text.chars().count(), "dispatching text strategy");
                self.classifier.classify_text(text)
            }
            SubmissionInput::File(doc) => {
                debug!(file = %doc.file_name, bytes = doc.bytes.len(), "dispatching file strategy");
                self.classifier.classify_document(doc)
            }
        }
    }
}
