//! Domain models with validation at construction
//!
//! User input is validated when these types are built; an invalid value
//! returns a `ValidationError` before anything reaches the database.

pub mod message;
pub mod validation;

pub use message::CommentMessage;
pub use validation::ValidationError;
