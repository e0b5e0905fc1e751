//! CLI configuration management.
//!
//! Merges command line arguments, environment variables and built-in
//! defaults into one validated configuration.

use imposter::{
    GameSettings, MAX_PLAYERS, MIN_PLAYERS, constants::DEFAULT_PLAYER_COUNT,
    settings::SETTINGS_KEY,
};
use std::path::PathBuf;

/// Where the card pool comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DeckSource {
    /// A built-in deck, by name
    Preset(String),
    /// A CSV file in the `Card Name,Hint` layout
    File(PathBuf),
}

impl Default for DeckSource {
    fn default() -> Self {
        Self::Preset("Places".to_string())
    }
}

/// Settings given on the command line. They replace the stored values
/// and are saved for the next session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub reveal_duration_seconds: Option<f64>,
    pub wild_mode: bool,
    pub no_hints: bool,
    pub allow_repeat: bool,
}

impl SettingsOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the overrides on top of stored settings
    pub fn apply(&self, mut settings: GameSettings) -> GameSettings {
        if let Some(seconds) = self.reveal_duration_seconds {
            settings.reveal_duration_seconds = seconds;
        }
        if self.wild_mode {
            settings.wild_mode = true;
        }
        if self.no_hints {
            settings.imposter_hints_disabled = true;
        }
        if self.allow_repeat {
            settings.prevent_consecutive_card = false;
        }
        settings
    }
}

/// Command line arguments before environment fallbacks
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub players: Option<usize>,
    pub deck: Option<PathBuf>,
    pub preset: Option<String>,
    pub settings: Option<PathBuf>,
    pub overrides: SettingsOverrides,
}

/// Complete CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Players in the first game
    pub player_count: usize,
    /// Card pool
    pub deck: DeckSource,
    /// Settings file
    pub settings_path: PathBuf,
    /// Settings forced from the command line
    pub overrides: SettingsOverrides,
}

impl CliConfig {
    /// Load configuration, preferring arguments over the environment
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration is invalid
    pub fn from_env(args: CliArgs) -> Result<Self, ConfigError> {
        let player_count = args
            .players
            .unwrap_or_else(|| parse_env_or("IMPOSTER_PLAYERS", DEFAULT_PLAYER_COUNT));

        // A preset on the command line beats a deck file from the environment
        let deck = match (args.deck, args.preset) {
            (Some(path), _) => DeckSource::File(path),
            (None, Some(name)) => DeckSource::Preset(name),
            (None, None) => std::env::var("IMPOSTER_DECK")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(|path| DeckSource::File(path.into()))
                .unwrap_or_default(),
        };

        let settings_path = args
            .settings
            .or_else(|| std::env::var("IMPOSTER_SETTINGS").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(format!("{SETTINGS_KEY}.json")));

        let config = CliConfig {
            player_count,
            deck,
            settings_path,
            overrides: args.overrides,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count < MIN_PLAYERS {
            return Err(ConfigError::Invalid {
                var: "IMPOSTER_PLAYERS".to_string(),
                reason: format!("Must be at least {MIN_PLAYERS}"),
            });
        }

        if self.player_count > MAX_PLAYERS {
            return Err(ConfigError::Invalid {
                var: "IMPOSTER_PLAYERS".to_string(),
                reason: format!("Must be at most {MAX_PLAYERS}"),
            });
        }

        if let Some(seconds) = self.overrides.reveal_duration_seconds
            && (!seconds.is_finite() || seconds <= 0.0)
        {
            return Err(ConfigError::Invalid {
                var: "--duration".to_string(),
                reason: "Must be a positive number of seconds".to_string(),
            });
        }

        if let DeckSource::Preset(name) = &self.deck
            && name.trim().is_empty()
        {
            return Err(ConfigError::Invalid {
                var: "--preset".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
