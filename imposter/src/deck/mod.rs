//! Deck module supplying the card pool a session plays with.
//!
//! This module implements:
//! - CSV import in the `Card Name,Hint` layout
//! - A small library of built-in preset decks

pub mod csv;
pub mod errors;
pub mod presets;

pub use csv::{CsvImport, ImportWarning, import_csv, parse_csv};
pub use errors::{DeckError, DeckResult};
pub use presets::{Preset, find_preset, presets};
