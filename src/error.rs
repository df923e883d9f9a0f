// Error types for a submission attempt.
//
// `ValidationError` is raised before any network activity. `SubmitError`
// covers everything a submission can end with; each variant knows how to
// render itself as the Display State the user sees.

use crate::submission::DisplayState;
use thiserror::Error;

/// Prefix shown in front of every service or unexpected failure.
pub const FAILURE_PREFIX: &str = "❌ Erro ao processar a solicitação.";

/// Message used when the service fails with an empty body.
pub const SERVICE_FALLBACK: &str = "Erro ao consumir API";

/// The local input contract was violated. The `Display` text is exactly
/// what the user sees.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("❌ Informe um texto OU envie um PDF.")]
    MissingInput,
    #[error("❌ Envie apenas TEXTO ou PDF, não os dois ao mesmo tempo.")]
    AmbiguousInput,
}

/// Everything a submission can fail with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service answered with a non-success status. Holds the response
    /// body, or [`SERVICE_FALLBACK`] when the body was empty.
    #[error("{0}")]
    Service(String),

    /// Transport failure or an undecodable response.
    #[error("{0}")]
    Unexpected(String),

    /// Another submission is still pending on the same handler.
    #[error("a submission is already in progress")]
    Busy,
}

impl SubmitError {
    /// Build a `Service` error from a (possibly empty) response body.
    pub fn service(body: impl Into<String>) -> Self {
        let body = body.into();
        if body.is_empty() {
            SubmitError::Service(SERVICE_FALLBACK.to_string())
        } else {
            SubmitError::Service(body)
        }
    }

    pub fn unexpected(cause: impl std::fmt::Display) -> Self {
        SubmitError::Unexpected(cause.to_string())
    }

    /// Display State for this failure. `Busy` has none because the
    /// rejected activation must not overwrite the pending one.
    pub fn display_state(&self) -> Option<DisplayState> {
        match self {
            SubmitError::Validation(v) => Some(DisplayState::Failed(v.to_string())),
            SubmitError::Service(msg) | SubmitError::Unexpected(msg) => {
                Some(DisplayState::Failed(format!("{}\n\n{}", FAILURE_PREFIX, msg)))
            }
            SubmitError::Busy => None,
        }
    }
}
