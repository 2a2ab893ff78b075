use std::fmt;

use crate::normalize::CandidateSource;

/// Everything that can stop a generation from producing a recipe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeError {
    /// The cleaned text is not a JSON object, or a field has the wrong JSON type.
    #[error("failed to parse recipe data: {detail}")]
    Parse { cleaned: String, detail: String },
    /// Required fields are absent or falsy, in canonical field order.
    #[error("missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },
    #[error("{0}")]
    Service(#[from] ServiceFailure),
    #[error("no candidate in the response held a valid recipe ({} tried)", .attempts.len())]
    ExtractionExhausted { attempts: Vec<CandidateFailure> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    pub candidate: CandidateSource,
    pub error: RecipeError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// An `error` string reported by the backend itself.
    pub(crate) fn backend(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Backend, message)
    }
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            // Backend messages are shown verbatim.
            FailureKind::Backend => write!(f, "{}", self.message),
            _ => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ServiceFailure {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend answered with an explicit `error` field.
    Backend,
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Backend => write!(f, "backend error"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Client(#[from] RecipeError),
}
