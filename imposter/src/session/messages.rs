//! Session actor message types.

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::game::{
    GameError, GameSettings,
    entities::{Card, GameState, PlayerIndex, PlayerRole, RoundSummary},
    timer::TimerToken,
};

/// Subscriber identifier handed out on subscribe
pub type SubscriberId = u64;

/// Messages that can be sent to a SessionActor
#[derive(Debug)]
pub enum SessionMessage {
    /// Deal the first round
    StartGame {
        player_count: usize,
        response: oneshot::Sender<SessionResponse>,
    },

    /// Show the current player their role
    RevealRole {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Deal another round after everyone has looked
    NewRound {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Go back to setup
    NewGame {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Change the player count during setup
    UpdatePlayerCount {
        player_count: usize,
        response: oneshot::Sender<SessionResponse>,
    },

    /// Replace and persist settings; used from the next deal on
    UpdateSettings {
        settings: GameSettings,
        response: oneshot::Sender<SessionResponse>,
    },

    /// Replace the card pool; used from the next deal on
    ReplaceDeck {
        cards: Vec<Card>,
        response: oneshot::Sender<SessionResponse>,
    },

    /// Get current session state
    GetState {
        response: oneshot::Sender<SessionSnapshot>,
    },

    /// Get the settings the next deal will use
    GetSettings {
        response: oneshot::Sender<GameSettings>,
    },

    /// Get a player's secret role for this round
    GetRole {
        player: PlayerIndex,
        response: oneshot::Sender<Option<PlayerRole>>,
    },

    /// Reveal the imposters once everyone has looked
    GetRoundSummary {
        response: oneshot::Sender<Option<RoundSummary>>,
    },

    /// Internal: Advance the countdown (sent by the timer)
    Tick { token: TimerToken },

    /// Subscribe to state change notifications
    Subscribe {
        sender: mpsc::Sender<StateChangeNotification>,
        response: oneshot::Sender<SubscriberId>,
    },

    /// Unsubscribe from state change notifications
    Unsubscribe { subscriber_id: SubscriberId },

    /// Stop the actor
    Close {
        response: oneshot::Sender<SessionResponse>,
    },
}

/// Notification sent when session state changes
#[derive(Debug, Clone)]
pub enum StateChangeNotification {
    /// Anything in the game changed, including countdown ticks
    StateChanged {
        state: GameState,
        countdown: Option<String>,
    },
    /// The actor stopped; no more notifications follow
    Closed,
}

/// Response from session operations
#[derive(Debug, Clone, PartialEq)]
pub enum SessionResponse {
    /// Operation succeeded
    Success,

    /// Operation succeeded with message
    SuccessWithMessage(String),

    /// Not valid in the current phase, nothing changed
    Ignored,

    /// Game couldn't be started
    Rejected(GameError),

    /// Operation failed
    Error(String),
}

impl SessionResponse {
    /// Check if response is success
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SessionResponse::Success | SessionResponse::SuccessWithMessage(_)
        )
    }

    /// Get error message if response is error
    pub fn error_message(&self) -> Option<String> {
        match self {
            SessionResponse::Rejected(e) => Some(e.to_string()),
            SessionResponse::Error(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

impl From<bool> for SessionResponse {
    fn from(applied: bool) -> Self {
        if applied {
            SessionResponse::Success
        } else {
            SessionResponse::Ignored
        }
    }
}

/// Session state response
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Game state for the view layer
    pub state: GameState,

    /// Countdown text while a role is on screen
    pub countdown: Option<String>,

    /// Running countdown, if any
    pub active_timer: Option<TimerToken>,

    /// Cards in the pool
    pub deck_size: usize,
}
