//! Session module running one game as an async actor.
//!
//! The session actor owns the game state machine, the card pool and the
//! settings. Every mutation goes through its mpsc inbox, so the game has a
//! single writer. While a role is on screen the actor drives the countdown
//! from its own interval and broadcasts each change to subscribers.
//!
//! ## Example
//!
//! ```no_run
//! use imposter::deck::find_preset;
//! use imposter::session::{SessionActor, SessionConfig};
//! use imposter::settings::InMemorySettings;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let deck = find_preset("Places")?.cards;
//!     let repo = Arc::new(InMemorySettings::new());
//!     let (actor, handle) = SessionActor::load(SessionConfig::default(), deck, repo).await;
//!     tokio::spawn(actor.run());
//!
//!     handle.start_game(4).await?;
//!     handle.reveal_role().await?;
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod messages;

pub use actor::{SessionActor, SessionHandle};
pub use config::SessionConfig;
pub use errors::{SessionError, SessionResult};
pub use messages::{
    SessionMessage, SessionResponse, SessionSnapshot, StateChangeNotification, SubscriberId,
};
