//! Deck import error types.

use thiserror::Error;

/// Deck import errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeckError {
    /// Nothing in the input could be turned into a card
    #[error("No valid cards found in CSV")]
    NoValidCards,

    /// No built-in deck with this name
    #[error("Unknown preset deck: {0}")]
    UnknownPreset(String),
}

/// Result type for deck operations
pub type DeckResult<T> = Result<T, DeckError>;
