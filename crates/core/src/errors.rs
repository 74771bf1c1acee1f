use thiserror::Error;

#[derive(Error, Debug)]
pub enum KairoError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    #[error("Backend returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(#[from] eyre::Report),
}

impl KairoError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            KairoError::NotFound(_) => "not_found",
            KairoError::Validation(_) => "validation",
            KairoError::MalformedResponse(_) => "malformed_response",
            KairoError::Unreachable(_) => "unreachable",
            KairoError::Upstream { .. } => "upstream",
            KairoError::Internal(_) => "internal",
        }
    }
}

pub type KairoResult<T> = Result<T, KairoError>;
