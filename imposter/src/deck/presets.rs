//! Built-in decks.

use super::errors::{DeckError, DeckResult};
use crate::game::entities::Card;

/// A named deck that ships with the game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub cards: Vec<Card>,
}

const PLACES: &[(&str, &str)] = &[
    ("Airport", "departures"),
    ("Hospital", "waiting room"),
    ("Beach", "sunscreen"),
    ("Library", "quiet"),
    ("Casino", "chips"),
    ("Submarine", "periscope"),
    ("Movie Theater", "popcorn"),
    ("Space Station", "zero gravity"),
    ("Circus", "tent"),
    ("School", "homework"),
];

const FOOD: &[(&str, &str)] = &[
    ("Pizza", "slices"),
    ("Sushi", "chopsticks"),
    ("Tacos", "shell"),
    ("Pancakes", "syrup"),
    ("Ice Cream", "cone"),
    ("Curry", "spicy"),
    ("Popcorn", "kernels"),
    ("Burger", "bun"),
    ("Salad", "dressing"),
    ("Soup", "bowl"),
];

const ANIMALS: &[(&str, &str)] = &[
    ("Penguin", "tuxedo"),
    ("Giraffe", "tall"),
    ("Octopus", "ink"),
    ("Kangaroo", "pouch"),
    ("Owl", "night"),
    ("Elephant", "trunk"),
    ("Bee", "honey"),
    ("Snake", "scales"),
    ("Dolphin", "clicks"),
    ("Camel", "hump"),
];

fn preset(name: &'static str, entries: &[(&str, &str)]) -> Preset {
    Preset {
        name,
        cards: entries
            .iter()
            .map(|&(card, hint)| Card::new(card, Some(hint)))
            .collect(),
    }
}

/// Every built-in deck, the default one first.
pub fn presets() -> Vec<Preset> {
    vec![
        preset("Places", PLACES),
        preset("Food", FOOD),
        preset("Animals", ANIMALS),
    ]
}

/// Look up a built-in deck by name, ignoring case.
pub fn find_preset(name: &str) -> DeckResult<Preset> {
    presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| DeckError::UnknownPreset(name.to_string()))
}
