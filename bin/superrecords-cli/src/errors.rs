use std::fmt;

use thiserror::Error;

/// Errors shown to the user when a command fails.
#[derive(Debug, Error)]
pub enum DisplayedError {
    /// The user can fix these by correcting input or configuration.
    #[error("{0}: {1:?}")]
    User(String, Box<dyn fmt::Debug>),

    /// Failures encountered while servicing the request, e.g. an RPC
    /// endpoint or the record service misbehaving.
    #[error("{0}: {1:?}")]
    Internal(String, Box<dyn fmt::Debug>),
}

/// Attaches a user-facing message to any error result.
pub trait DisplayableError {
    type Output;

    fn user_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError>;
    fn internal_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError>;
}

impl<T, E: fmt::Debug + 'static> DisplayableError for Result<T, E> {
    type Output = T;

    fn user_error(self, msg: impl Into<String>) -> Result<T, DisplayedError> {
        self.map_err(|e| DisplayedError::User(msg.into(), Box::new(e)))
    }

    fn internal_error(self, msg: impl Into<String>) -> Result<T, DisplayedError> {
        self.map_err(|e| DisplayedError::Internal(msg.into(), Box::new(e)))
    }
}
