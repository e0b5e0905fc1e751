//! # Imposter
//!
//! A pass-the-device party game. Every player but the imposters sees the
//! same secret card; imposters only get a hint, or nothing at all. Players
//! take turns looking at their role for a few seconds and then try to find
//! out who is bluffing.
//!
//! The core game is a type-safe finite state machine using `enum_dispatch`
//! for zero-cost trait dispatch over its phases:
//!
//! - **Idle**: Setting up the player count
//! - **Ready**: Waiting for the current player to look
//! - **Revealing**: A role is on screen while the countdown runs
//! - **Finished**: Everyone has seen their role
//!
//! ## Core Modules
//!
//! - [`game`]: State machine, entities, card selection and imposter assignment
//! - [`deck`]: CSV import and built-in decks
//! - [`settings`]: Settings persistence
//! - [`session`]: Async actor running a game and its countdown
//!
//! ## Example
//!
//! ```
//! use imposter::{GameSettings, ImposterState, RoleManagement, deck::find_preset};
//!
//! let deck = find_preset("Animals").unwrap().cards;
//! let mut game = ImposterState::with_seed(42);
//! assert_eq!(game.start_game(4, &deck, &GameSettings::default()), Ok(true));
//! assert!(game.reveal_role());
//! assert!(game.current_role().is_some());
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Game, GameData, GameError, GameEvent, GameSettings, GameStateManagement, ImposterState,
    RoleManagement,
    constants::{self, DEFAULT_PLAYER_COUNT, MAX_PLAYERS, MIN_PLAYERS},
    entities::{self, Card, GamePhase, GameState, PlayerRole, RoundSummary},
    functional,
};

/// Card pools for the game.
pub mod deck;

/// Persisted player settings.
pub mod settings;

/// Async session actor.
pub mod session;
pub use session::{SessionActor, SessionHandle};
