//! Validation error types

/// Validation error for domain models and request bodies
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Field is missing, null or empty
    #[error("{field} is required")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} bytes")]
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., UUID)
    #[error("{field}: {reason}")]
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Body is not a JSON object of the expected shape
    #[error("invalid request body: {reason}")]
    InvalidBody { reason: String },
}
