use thiserror::Error;

/// Errors raised by deck mutations. Every failing mutation leaves the deck
/// untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeckError {
    /// Malformed slide content, e.g. an empty agenda or zero columns.
    #[error("invalid slide content: {0}")]
    Validation(String),
    /// A position outside `[0, len - 1]`.
    #[error("slide index {index} is out of range for a deck of {len} slides")]
    IndexOutOfRange { index: i64, len: usize },
}
