use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

use super::constants::DEFAULT_PLAYER_COUNT;

/// Type alias for a player's position in the pass-the-device order.
/// Player 1 on screen is index 0.
pub type PlayerIndex = usize;

/// A role card. Crew members see the name, imposters see the hint.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Card {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Card {
    pub fn new(name: &str, hint: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            hint: hint.map(str::to_string),
        }
    }

    /// Whether the card has a non-empty hint to show imposters.
    pub fn has_hint(&self) -> bool {
        self.hint.as_deref().is_some_and(|hint| !hint.is_empty())
    }

    /// Identity used when avoiding back-to-back repeats. Cards are the
    /// same card if their names match, regardless of hints.
    pub fn key(&self) -> CardKey<'_> {
        CardKey(&self.name)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hint {
            Some(hint) if !hint.is_empty() => write!(f, "{} ({hint})", self.name),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Name-based card identity.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CardKey<'a>(&'a str);

impl CardKey<'_> {
    pub fn as_str(&self) -> &str {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Idle,
    Ready,
    Revealing,
    Finished,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Revealing => "revealing",
            Self::Finished => "finished",
        };
        write!(f, "{repr}")
    }
}

/// Snapshot of a session handed to the view layer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub phase: GamePhase,
    pub player_count: usize,
    pub current_player_index: PlayerIndex,
    pub imposter_indices: BTreeSet<PlayerIndex>,
    pub current_card: Option<Card>,
    pub last_card_used: Option<Card>,
    pub remaining_ms: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Idle,
            player_count: DEFAULT_PLAYER_COUNT,
            current_player_index: 0,
            imposter_indices: BTreeSet::new(),
            current_card: None,
            last_card_used: None,
            remaining_ms: 0,
        }
    }
}

impl GameState {
    pub fn is_imposter(&self, player: PlayerIndex) -> bool {
        self.imposter_indices.contains(&player)
    }

    /// Countdown text shown while a role is on screen, e.g. `"2.7s"`.
    pub fn countdown_label(&self) -> Option<String> {
        (self.phase == GamePhase::Revealing).then(|| format_countdown(self.remaining_ms))
    }
}

/// Formats milliseconds as seconds with one decimal place.
pub fn format_countdown(remaining_ms: u64) -> String {
    format!("{:.1}s", remaining_ms as f64 / 1000.0)
}

/// What a single player is told when it's their turn to look.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlayerRole {
    Crew { card: Option<Card> },
    /// The hint is absent when hints are disabled or the card has none.
    Imposter { hint: Option<String> },
}

impl PlayerRole {
    pub fn is_imposter(&self) -> bool {
        matches!(self, Self::Imposter { .. })
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crew { card: Some(card) } => write!(f, "your card is {}", card.name),
            Self::Crew { card: None } => write!(f, "there's no card this round"),
            Self::Imposter { hint: Some(hint) } => write!(f, "you are the imposter, hint: {hint}"),
            Self::Imposter { hint: None } => write!(f, "you are the imposter"),
        }
    }
}

/// Who the imposters were and which card was in play, revealed once every
/// player has seen their role.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoundSummary {
    pub imposters: BTreeSet<PlayerIndex>,
    pub card: Option<Card>,
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let imposters = if self.imposters.is_empty() {
            "nobody".to_string()
        } else {
            self.imposters
                .iter()
                .map(|idx| format!("player {}", idx + 1))
                .collect::<Vec<_>>()
                .join(", ")
        };
        match &self.card {
            Some(card) => write!(f, "imposters: {imposters}; card: {}", card.name),
            None => write!(f, "imposters: {imposters}; no card"),
        }
    }
}
