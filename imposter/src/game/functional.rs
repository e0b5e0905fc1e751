//! Pure selection logic used when dealing a round.

use rand::{Rng, seq::IndexedRandom, seq::index};
use std::collections::BTreeSet;

use super::{
    constants::{WILD_NO_IMPOSTERS_CUTOFF, WILD_ONE_IMPOSTER_CUTOFF, WILD_TWO_IMPOSTERS_CUTOFF},
    entities::{Card, PlayerIndex},
};

/// Pick the card for a round.
///
/// Cards with a hint are preferred so imposters have something to go on;
/// the whole pool is used only when no card has a hint. With `avoid_repeat`
/// the previous round's card is excluded by name unless it's the only name
/// left to draw from.
pub fn select_card<'a, R: Rng + ?Sized>(
    pool: &'a [Card],
    last_used: Option<&Card>,
    avoid_repeat: bool,
    rng: &mut R,
) -> Option<&'a Card> {
    let hinted: Vec<&Card> = pool.iter().filter(|card| card.has_hint()).collect();
    let candidates = if hinted.is_empty() {
        pool.iter().collect()
    } else {
        hinted
    };

    if avoid_repeat
        && candidates.len() > 1
        && let Some(last) = last_used
    {
        let fresh: Vec<&Card> = candidates
            .iter()
            .copied()
            .filter(|card| card.key() != last.key())
            .collect();
        if !fresh.is_empty() {
            return fresh.choose(rng).copied();
        }
    }

    candidates.choose(rng).copied()
}

/// Map a wild mode roll in `[0, 1)` to a number of imposters.
pub fn imposter_count(roll: f64, player_count: usize) -> usize {
    if roll < WILD_NO_IMPOSTERS_CUTOFF {
        0
    } else if roll < WILD_ONE_IMPOSTER_CUTOFF {
        1
    } else if roll < WILD_TWO_IMPOSTERS_CUTOFF {
        2
    } else {
        player_count
    }
}

/// Choose the imposters for a round.
///
/// Classic mode always has exactly one imposter. Wild mode rolls for the
/// count first and then samples that many distinct players.
pub fn assign_imposters<R: Rng + ?Sized>(
    player_count: usize,
    wild_mode: bool,
    rng: &mut R,
) -> BTreeSet<PlayerIndex> {
    if player_count == 0 {
        return BTreeSet::new();
    }

    if !wild_mode {
        return BTreeSet::from([rng.random_range(0..player_count)]);
    }

    let roll: f64 = rng.random();
    let count = imposter_count(roll, player_count).min(player_count);
    if count == player_count {
        return (0..player_count).collect();
    }
    index::sample(rng, player_count, count).into_iter().collect()
}
