//! Imposter game engine - core FSM and round logic.
//!
//! This module provides:
//! - Type-safe finite state machine with 4 game states
//! - Card selection with repeat avoidance
//! - Classic and wild imposter assignment
//! - The reveal countdown

// Submodules
pub mod constants;
pub mod entities;
pub mod functional;
pub mod state_machine;
pub mod states;
pub mod timer;

mod implementation;

pub use state_machine::{
    Game, GameData, GameError, GameEvent, GameSettings, GameStateManagement, ImposterState,
    RoleManagement,
};
