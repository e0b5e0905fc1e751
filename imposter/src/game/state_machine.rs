//! Imposter game state machine.
//!
//! Holds the data shared by every phase, the traits that are the same in
//! every phase, and the [`ImposterState`] enum tying the phases together.

use enum_dispatch::enum_dispatch;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, VecDeque},
    fmt,
};
use thiserror::Error;

use super::constants::{
    DEFAULT_PLAYER_COUNT, DEFAULT_REVEAL_DURATION_SECONDS, MAX_PLAYERS, MIN_PLAYERS,
};
use super::entities::{Card, GamePhase, GameState, PlayerIndex, PlayerRole, RoundSummary};
use super::states::{Finished, Idle, PhaseMarker, Ready, Revealing};
use super::timer::RoundTimer;

/// Reasons a game can't be started.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("need {min}+ players, got {requested}")]
    NotEnoughPlayers { min: usize, requested: usize },
    #[error("at most {max} players, got {requested}")]
    TooManyPlayers { max: usize, requested: usize },
    #[error("no cards to play with")]
    EmptyDeck,
}

/// Events that occur during play
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    GameStarted { player_count: usize },
    RoundDealt(u32),
    RevealStarted(PlayerIndex),
    RevealEnded(PlayerIndex),
    AllRolesSeen,
    GameReset,
    PlayerCountChanged(usize),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::GameStarted { player_count } => {
                format!("game started with {player_count} players")
            }
            Self::RoundDealt(round) => format!("round {round} dealt"),
            Self::RevealStarted(idx) => format!("player {} is looking", idx + 1),
            Self::RevealEnded(idx) => {
                format!("time's up for player {}, pass the device", idx + 1)
            }
            Self::AllRolesSeen => "everyone has seen their role".to_string(),
            Self::GameReset => "back to setup".to_string(),
            Self::PlayerCountChanged(count) => format!("player count set to {count}"),
        };
        write!(f, "{repr}")
    }
}

/// Player-chosen settings. Persisted between sessions and read by the game
/// whenever a round is dealt.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    #[serde(rename = "revealDuration", alias = "revealDurationSeconds")]
    pub reveal_duration_seconds: f64,
    pub prevent_consecutive_card: bool,
    #[serde(rename = "noHintsForImposter", alias = "imposterHintsDisabled")]
    pub imposter_hints_disabled: bool,
    pub wild_mode: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_DURATION_SECONDS, true, false, false)
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(
        reveal_duration_seconds: f64,
        prevent_consecutive_card: bool,
        imposter_hints_disabled: bool,
        wild_mode: bool,
    ) -> Self {
        Self {
            reveal_duration_seconds,
            prevent_consecutive_card,
            imposter_hints_disabled,
            wild_mode,
        }
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), String> {
        if !self.reveal_duration_seconds.is_finite() || self.reveal_duration_seconds <= 0.0 {
            return Err(format!(
                "Reveal duration must be a positive number of seconds, got {}",
                self.reveal_duration_seconds
            ));
        }

        Ok(())
    }

    /// Reveal duration in whole milliseconds. Invalid durations fall back
    /// to the default.
    pub fn reveal_duration_ms(&self) -> u64 {
        let seconds = if self.validate().is_ok() {
            self.reveal_duration_seconds
        } else {
            DEFAULT_REVEAL_DURATION_SECONDS
        };
        (seconds * 1000.0).round() as u64
    }
}

/// Mutable game data shared across all states
#[derive(Debug)]
pub struct GameData {
    pub player_count: usize,
    pub current_player_index: PlayerIndex,
    pub imposter_indices: BTreeSet<PlayerIndex>,
    pub current_card: Option<Card>,
    /// Survives new rounds so the next deal can avoid repeating it.
    pub last_card_used: Option<Card>,
    /// Settings snapshot taken when the current round was dealt. Changes
    /// made mid-round only show up in the next round.
    pub(super) round_settings: GameSettings,
    /// Lives as long as the session so tokens from a cancelled countdown
    /// never match a later one.
    pub(super) timer: RoundTimer,
    pub(super) rounds_dealt: u32,
    pub(super) events: VecDeque<GameEvent>,
    pub(super) rng: StdRng,
}

impl Default for GameData {
    fn default() -> Self {
        Self::from_rng(StdRng::from_rng(&mut rand::rng()))
    }
}

impl GameData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Game data with a reproducible deal order.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Fixed-seed stand-in left behind while a transition owns the real data.
    pub(super) fn placeholder() -> Self {
        Self::from_rng(StdRng::seed_from_u64(0))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            player_count: DEFAULT_PLAYER_COUNT,
            current_player_index: 0,
            imposter_indices: BTreeSet::new(),
            current_card: None,
            last_card_used: None,
            round_settings: GameSettings::default(),
            timer: RoundTimer::default(),
            rounds_dealt: 0,
            events: VecDeque::new(),
            rng,
        }
    }

    pub fn round_settings(&self) -> &GameSettings {
        &self.round_settings
    }

    fn to_state(&self, phase: GamePhase) -> GameState {
        let remaining_ms = if phase == GamePhase::Revealing {
            self.timer.remaining_ms()
        } else {
            0
        };
        GameState {
            phase,
            player_count: self.player_count,
            current_player_index: self.current_player_index,
            imposter_indices: self.imposter_indices.clone(),
            current_card: self.current_card.clone(),
            last_card_used: self.last_card_used.clone(),
            remaining_ms,
        }
    }

    fn dealt_role_of(&self, player: PlayerIndex) -> Option<PlayerRole> {
        if player >= self.player_count {
            return None;
        }

        let role = if self.imposter_indices.contains(&player) {
            let hint = if self.round_settings.imposter_hints_disabled {
                None
            } else {
                self.current_card
                    .as_ref()
                    .filter(|card| card.has_hint())
                    .and_then(|card| card.hint.clone())
            };
            PlayerRole::Imposter { hint }
        } else {
            PlayerRole::Crew {
                card: self.current_card.clone(),
            }
        };
        Some(role)
    }
}

/// Trait for reading game state (snapshots, events)
#[enum_dispatch]
pub trait GameStateManagement {
    fn drain_events(&mut self) -> VecDeque<GameEvent>;

    /// Snapshot of the game for the view layer
    #[must_use]
    fn get_state(&self) -> GameState;

    fn phase(&self) -> GamePhase;
}

/// Trait for secret role lookups, which depend on the game phase
#[enum_dispatch]
pub trait RoleManagement {
    /// The role a player was dealt this round. `None` before a round is
    /// dealt or for an out of range player.
    fn role_of(&self, player: PlayerIndex) -> Option<PlayerRole>;

    /// Role of the player currently holding the device.
    fn current_role(&self) -> Option<PlayerRole>;

    /// Who the imposters were, once everyone has looked.
    fn round_summary(&self) -> Option<RoundSummary>;
}

/// An imposter game with data and logic for running it end-to-end.
#[derive(Debug)]
pub struct Game<T> {
    pub data: GameData,
    pub state: T,
}

impl<T: PhaseMarker> GameStateManagement for Game<T> {
    fn drain_events(&mut self) -> VecDeque<GameEvent> {
        self.data.events.drain(..).collect()
    }

    fn get_state(&self) -> GameState {
        self.data.to_state(T::PHASE)
    }

    fn phase(&self) -> GamePhase {
        T::PHASE
    }
}

impl RoleManagement for Game<Idle> {
    fn role_of(&self, _player: PlayerIndex) -> Option<PlayerRole> {
        None
    }

    fn current_role(&self) -> Option<PlayerRole> {
        None
    }

    fn round_summary(&self) -> Option<RoundSummary> {
        None
    }
}

impl RoleManagement for Game<Ready> {
    fn role_of(&self, player: PlayerIndex) -> Option<PlayerRole> {
        self.data.dealt_role_of(player)
    }

    fn current_role(&self) -> Option<PlayerRole> {
        self.data.dealt_role_of(self.data.current_player_index)
    }

    fn round_summary(&self) -> Option<RoundSummary> {
        None
    }
}

impl RoleManagement for Game<Revealing> {
    fn role_of(&self, player: PlayerIndex) -> Option<PlayerRole> {
        self.data.dealt_role_of(player)
    }

    fn current_role(&self) -> Option<PlayerRole> {
        self.data.dealt_role_of(self.data.current_player_index)
    }

    fn round_summary(&self) -> Option<RoundSummary> {
        None
    }
}

impl RoleManagement for Game<Finished> {
    fn role_of(&self, player: PlayerIndex) -> Option<PlayerRole> {
        self.data.dealt_role_of(player)
    }

    fn current_role(&self) -> Option<PlayerRole> {
        None
    }

    fn round_summary(&self) -> Option<RoundSummary> {
        Some(RoundSummary {
            imposters: self.data.imposter_indices.clone(),
            card: self.data.current_card.clone(),
        })
    }
}

/// The imposter game, in whichever phase it's currently in.
#[enum_dispatch(GameStateManagement, RoleManagement)]
#[derive(Debug)]
pub enum ImposterState {
    Idle(Game<Idle>),
    Ready(Game<Ready>),
    Revealing(Game<Revealing>),
    Finished(Game<Finished>),
}

/// Clamp a requested player count to the supported range.
pub fn clamp_player_count(requested: usize) -> usize {
    requested.clamp(MIN_PLAYERS, MAX_PLAYERS)
}
