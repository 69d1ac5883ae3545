//! Static puzzle lists.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::model::{Puzzle, Token};

/// How the puzzles of a set are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PickOrder {
    /// In definition order.
    #[default]
    RoundRobin,
    /// Permuted once from the seed, then in that order.
    Shuffle { seed: u64 },
}

impl fmt::Display for PickOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickOrder::RoundRobin => write!(f, "round-robin"),
            PickOrder::Shuffle { seed } => write!(f, "shuffle({seed})"),
        }
    }
}

impl FromStr for PickOrder {
    type Err = String;

    /// Parses `round-robin`, `shuffle` (seed 0) or `shuffle:<seed>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.split_once(':') {
            None if s == "round-robin" || s == "roundrobin" => Ok(PickOrder::RoundRobin),
            None if s == "shuffle" => Ok(PickOrder::Shuffle { seed: 0 }),
            Some(("shuffle", seed)) => seed
                .parse()
                .map(|seed| PickOrder::Shuffle { seed })
                .map_err(|_| format!("invalid shuffle seed: {seed}")),
            _ => Err(format!("unknown puzzle order: {s}")),
        }
    }
}

/// A fixed, non-empty list of puzzles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSet {
    /// Identifier of the set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    puzzles: Vec<Puzzle>,
}

impl PuzzleSet {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        puzzles: Vec<Puzzle>,
    ) -> Result<Self, PuzzleError> {
        if puzzles.is_empty() {
            return Err(PuzzleError::EmptySet);
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            puzzles,
        })
    }

    /// The same puzzles, presented in the given order.
    pub fn ordered(mut self, order: PickOrder) -> Self {
        if let PickOrder::Shuffle { seed } = order {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            self.puzzles.shuffle(&mut rng);
        }
        self
    }

    pub fn get(&self, index: usize) -> Option<&Puzzle> {
        self.puzzles.get(index)
    }

    pub fn count(&self) -> usize {
        self.puzzles.len()
    }

    /// The index after `index`, wrapping around.
    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.puzzles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Puzzle> {
        self.puzzles.iter()
    }
}

/// The five-word spelling list.
pub fn spelling_words() -> PuzzleSet {
    const WORDS: [(&str, &str); 5] = [
        ("WAS", "SWA"),
        ("BED", "EDB"),
        ("TOP", "POT"),
        ("PIG", "GIP"),
        ("DAY", "ADY"),
    ];
    let puzzles = WORDS
        .iter()
        .filter_map(|(word, scrambled)| Puzzle::from_word(word, scrambled).ok())
        .collect();
    PuzzleSet {
        id: "spelling".into(),
        name: "Spelling Bee".into(),
        puzzles,
    }
}

/// Events of the knight-and-dragon story, in order.
pub const KNIGHT_EVENTS: [&str; 5] = [
    "The knight arrives at the village.",
    "The villagers are scared of a dragon.",
    "The knight confronts the dragon.",
    "The knight discovers the dragon is just lonely.",
    "The knight and dragon bake bread together.",
];

/// Summary of the knight-and-dragon story.
pub const KNIGHT_SUMMARY: &str = "A brave knight saved a village from a mischievous dragon by teaching it to bake bread instead of breathing fire.";

/// A one-puzzle set for the knight story, scrambled from `seed`.
pub fn knight_story(seed: u64) -> PuzzleSet {
    let target: Vec<Token> = KNIGHT_EVENTS.iter().map(|e| Token::from(*e)).collect();
    let mut scramble = target.clone();
    scramble.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    PuzzleSet {
        id: "knight".into(),
        name: "The Knight and the Dragon".into(),
        puzzles: vec![Puzzle {
            id: "knight".into(),
            target,
            initial_scramble: scramble,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::same_multiset;

    #[test]
    fn spelling_words_are_valid() {
        let set = spelling_words();
        assert_eq!(set.count(), 5);
        assert_eq!(set.get(0).unwrap().id, "was");
        assert!(set.get(5).is_none());
    }

    #[test]
    fn next_wraps_around() {
        let set = spelling_words();
        assert_eq!(set.next(0), 1);
        assert_eq!(set.next(4), 0);
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(
            PuzzleSet::new("x", "x", vec![]).unwrap_err(),
            PuzzleError::EmptySet
        );
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let a = spelling_words().ordered(PickOrder::Shuffle { seed: 7 });
        let b = spelling_words().ordered(PickOrder::Shuffle { seed: 7 });
        assert_eq!(a, b);
        assert_eq!(a.count(), 5);

        let round_robin = spelling_words().ordered(PickOrder::RoundRobin);
        assert_eq!(round_robin, spelling_words());
    }

    #[test]
    fn knight_story_scramble_is_a_permutation() {
        let set = knight_story(3);
        let puzzle = set.get(0).unwrap();
        assert!(same_multiset(&puzzle.target, &puzzle.initial_scramble));
        assert_eq!(knight_story(3), set);
    }

    #[test]
    fn pick_order_parse() {
        assert_eq!("round-robin".parse::<PickOrder>().unwrap(), PickOrder::RoundRobin);
        assert_eq!(
            "shuffle:42".parse::<PickOrder>().unwrap(),
            PickOrder::Shuffle { seed: 42 }
        );
        assert_eq!(
            "shuffle".parse::<PickOrder>().unwrap(),
            PickOrder::Shuffle { seed: 0 }
        );
        assert!("shuffle:x".parse::<PickOrder>().is_err());
        assert!("random".parse::<PickOrder>().is_err());
    }
}
