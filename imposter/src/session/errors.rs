//! Session error types.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session is closed")]
    Closed,
}

pub type SessionResult<T> = Result<T, SessionError>;
