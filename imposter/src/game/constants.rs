/// Fewest players a game can be started with.
pub const MIN_PLAYERS: usize = 3;

/// Most players a game can have.
pub const MAX_PLAYERS: usize = 20;

/// Player count a fresh session starts with.
pub const DEFAULT_PLAYER_COUNT: usize = 4;

/// Countdown tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 100;

pub const DEFAULT_REVEAL_DURATION_SECONDS: f64 = 3.0;

// Wild mode imposter count cut points. A roll below the first cut point
// yields no imposters, below the second one imposter, below the third two
// imposters, and anything above makes every player an imposter.
pub const WILD_NO_IMPOSTERS_CUTOFF: f64 = 0.10;
pub const WILD_ONE_IMPOSTER_CUTOFF: f64 = 0.50;
pub const WILD_TWO_IMPOSTERS_CUTOFF: f64 = 0.90;
