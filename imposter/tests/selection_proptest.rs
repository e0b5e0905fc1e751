/// Property-based tests for card selection and imposter assignment
///
/// These tests check the selection rules hold for arbitrary pools,
/// player counts and seeds.
use imposter::{
    Card,
    functional::{assign_imposters, imposter_count, select_card},
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

// Strategy to generate a card with an optional hint
fn card_strategy() -> impl Strategy<Value = Card> {
    ("[a-z]{1,6}", proptest::option::of("[a-z]{1,6}"))
        .prop_map(|(name, hint)| Card::new(&name, hint.as_deref()))
}

fn pool_strategy() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_strategy(), 0..12)
}

proptest! {
    #[test]
    fn test_selected_card_comes_from_pool(pool in pool_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        match select_card(&pool, None, false, &mut rng) {
            Some(card) => prop_assert!(pool.contains(card)),
            None => prop_assert!(pool.is_empty()),
        }
    }

    #[test]
    fn test_hinted_cards_win_when_present(pool in pool_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        if let Some(card) = select_card(&pool, None, false, &mut rng)
            && pool.iter().any(Card::has_hint)
        {
            prop_assert!(card.has_hint());
        }
    }

    #[test]
    fn test_avoid_repeat_never_repeats_name(pool in pool_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let hinted: Vec<&Card> = pool.iter().filter(|card| card.has_hint()).collect();
        let candidates: Vec<&Card> = if hinted.is_empty() { pool.iter().collect() } else { hinted };

        let mut names: Vec<&str> = candidates.iter().map(|card| card.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        prop_assume!(names.len() >= 2);

        let mut last = select_card(&pool, None, true, &mut rng).cloned();
        for _ in 0..50 {
            let next = select_card(&pool, last.as_ref(), true, &mut rng).cloned();
            prop_assert_ne!(next.as_ref().map(Card::key), last.as_ref().map(Card::key));
            last = next;
        }
    }

    #[test]
    fn test_classic_assignment_has_one_imposter(player_count in 3usize..=20, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let imposters = assign_imposters(player_count, false, &mut rng);
        prop_assert_eq!(imposters.len(), 1);
        prop_assert!(imposters.iter().all(|&i| i < player_count));
    }

    #[test]
    fn test_wild_assignment_is_distinct_and_in_range(player_count in 3usize..=20, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let imposters = assign_imposters(player_count, true, &mut rng);
        prop_assert!([0, 1, 2, player_count].contains(&imposters.len()));
        prop_assert!(imposters.iter().all(|&i| i < player_count));
    }

    #[test]
    fn test_imposter_count_matches_buckets(roll in 0.0f64..1.0, player_count in 3usize..=20) {
        let count = imposter_count(roll, player_count);
        let expected = if roll < 0.1 { 0 } else if roll < 0.5 { 1 } else if roll < 0.9 { 2 } else { player_count };
        prop_assert_eq!(count, expected);
    }
}
