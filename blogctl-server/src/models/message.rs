//! Comment message validation

use super::ValidationError;

/// Maximum length for a comment message (64KB)
const MAX_MESSAGE_LEN: usize = 65536;

/// Validated comment message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentMessage(String);

impl CommentMessage {
    /// Validate a message taken from a request body.
    ///
    /// # Rules
    /// - `null`/missing and `""` are rejected
    /// - Max 64KB (65536 bytes)
    ///
    /// # Example
    /// ```
    /// use blogctl_server::models::CommentMessage;
    ///
    /// assert!(CommentMessage::new(Some("Nice post")).is_ok());
    /// assert!(CommentMessage::new(Some("")).is_err());
    /// assert!(CommentMessage::new(None).is_err());
    /// ```
    pub fn new(s: Option<&str>) -> Result<Self, ValidationError> {
        let s = match s {
            Some(s) if !s.is_empty() => s,
            _ => return Err(ValidationError::Empty { field: "message" }),
        };

        if s.len() > MAX_MESSAGE_LEN {
            return Err(ValidationError::TooLong {
                field: "message",
                max: MAX_MESSAGE_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the message as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
