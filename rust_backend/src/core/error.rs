//! Error types for timetable extraction.

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Error type for extraction operations
///
/// Degenerate weeks and cells without a day are not errors: they are
/// dropped by the pipeline with a log line. These variants describe inputs
/// the core cannot work with at all.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Content type error: {0}")]
    ContentTypeError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Week split error: {0}")]
    SplitBoundaryError(String),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ExtractError {
    /// Returns `true` if the error only concerns one week block, so the rest
    /// of the page can still be processed.
    pub fn is_block_local(&self) -> bool {
        matches!(
            self,
            ExtractError::SplitBoundaryError(_) | ExtractError::InvalidInput(_)
        )
    }
}
