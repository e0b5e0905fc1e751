//! Session configuration.

use serde::{Deserialize, Serialize};

/// Session actor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Capacity of the actor's message inbox
    pub inbox_capacity: usize,

    /// Seed for the deal order. Random when unset.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: 64,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.inbox_capacity == 0 {
            return Err("Inbox capacity must be at least 1".to_string());
        }

        Ok(())
    }

    /// Config with a fixed deal order
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_zero_inbox_is_invalid() {
        let config = SessionConfig {
            inbox_capacity: 0,
            ..SessionConfig::seeded(1)
        };
        assert!(config.validate().is_err());
    }
}
