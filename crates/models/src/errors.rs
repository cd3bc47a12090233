use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Carries the client-facing `Field is not valid ...` message.
    #[error("{0}")]
    Validation(String),
}
