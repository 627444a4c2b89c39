use thiserror::Error;

/// Errors raised while talking to the language model.
///
/// A failure here is fatal to the current turn: the orchestrator records it as
/// an assistant turn and stops.
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Auth error: {0}")]
    Auth(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The provider answered with an error of its own.
    #[error("Provider error: {0}")]
    Provider(String),
    /// The provider answered, but not in a shape we understand.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, raw: String },
    #[error("Timed out after {0}ms")]
    Timeout(u64),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetryExceeded { attempts: usize, last_error: String },
}

impl LLMError {
    /// Whether the same request might succeed if sent again.
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            LLMError::Auth(_) | LLMError::InvalidRequest(_) | LLMError::RetryExceeded { .. }
        )
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::Json(format!("{err} (line {}, column {})", err.line(), err.column()))
    }
}
