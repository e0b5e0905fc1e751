//! Settings module persisting player-chosen game settings between sessions.
//!
//! This module implements:
//! - A repository trait so the session never cares where settings live
//! - A JSON file repository
//! - An in-memory repository for tests and throwaway sessions
//!
//! Stored settings are read leniently: any field that is missing or
//! unusable falls back to its default on its own.
//!
//! ## Example
//!
//! ```no_run
//! use imposter::settings::{JsonFileSettings, SettingsRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = JsonFileSettings::new("imposter-settings.json");
//!
//!     let mut settings = repo.load().await;
//!     settings.wild_mode = true;
//!     repo.save(&settings).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod repository;

pub use errors::{SettingsError, SettingsResult};
pub use repository::{InMemorySettings, JsonFileSettings, SETTINGS_KEY, SettingsRepository};
