//! Game state definitions for the imposter FSM.
//!
//! Each state is one step of the pass-the-device cycle.

use crate::game::{entities::GamePhase, timer::TimerToken};

/// Ties a state type to the phase reported to the view layer.
pub trait PhaseMarker {
    const PHASE: GamePhase;
}

/// Setting up: choosing the player count, nothing dealt yet
#[derive(Debug, Default)]
pub struct Idle {}

/// A round is dealt and the current player is about to look
#[derive(Debug)]
pub struct Ready {}

/// The current player's role is on screen while the countdown runs
#[derive(Debug)]
pub struct Revealing {
    pub(crate) token: TimerToken,
}

/// Everyone has seen their role; discussion time
#[derive(Debug)]
pub struct Finished {}

impl PhaseMarker for Idle {
    const PHASE: GamePhase = GamePhase::Idle;
}

impl PhaseMarker for Ready {
    const PHASE: GamePhase = GamePhase::Ready;
}

impl PhaseMarker for Revealing {
    const PHASE: GamePhase = GamePhase::Revealing;
}

impl PhaseMarker for Finished {
    const PHASE: GamePhase = GamePhase::Finished;
}
