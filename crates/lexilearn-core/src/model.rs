//! Core data model types for lexilearn.
//!
//! These are the fundamental types the games are built from: tokens, board
//! locations, puzzles, and the story analysis payload.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// Number of events a story analysis must contain.
pub const STORY_EVENT_COUNT: usize = 5;

/// A single displayable unit: a letter, or a short phrase for an event.
///
/// Tokens are not unique. Two `A` tiles are interchangeable by content and
/// are only told apart by the slot they occupy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Where a token lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// The fixed-length answer slots.
    Board,
    /// The pool of tokens not yet placed.
    Tray,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Board => write!(f, "board"),
            Zone::Tray => write!(f, "tray"),
        }
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "board" | "b" => Ok(Zone::Board),
            "tray" | "t" => Ok(Zone::Tray),
            other => Err(format!("unknown zone: {other}")),
        }
    }
}

/// A slot address: a zone plus an index into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub zone: Zone,
    pub index: usize,
}

impl Location {
    pub fn board(index: usize) -> Self {
        Self {
            zone: Zone::Board,
            index,
        }
    }

    pub fn tray(index: usize) -> Self {
        Self {
            zone: Zone::Tray,
            index,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.zone, self.index)
    }
}

/// One round of a rearrangement game: the answer and how it is first shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Identifier, unique within a puzzle set.
    pub id: String,
    /// The ordered answer.
    pub target: Vec<Token>,
    /// Presentation order of the tray at the start of the round.
    pub initial_scramble: Vec<Token>,
}

impl Puzzle {
    /// Build a puzzle, checking that the scramble is a permutation of the target.
    pub fn new(
        id: impl Into<String>,
        target: Vec<Token>,
        initial_scramble: Vec<Token>,
    ) -> Result<Self, PuzzleError> {
        let id = id.into();
        if target.is_empty() {
            return Err(PuzzleError::EmptyTarget { id });
        }
        if !same_multiset(&target, &initial_scramble) {
            return Err(PuzzleError::NotAPermutation { id });
        }
        Ok(Self {
            id,
            target,
            initial_scramble,
        })
    }

    /// Build a spelling puzzle where every character is one token.
    pub fn from_word(word: &str, scrambled: &str) -> Result<Self, PuzzleError> {
        let split = |s: &str| s.chars().map(|c| Token::new(c.to_string())).collect();
        Self::new(word.to_lowercase(), split(word), split(scrambled))
    }

    /// Length of the answer, which is also the board length.
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}

/// Count occurrences of each token.
pub fn token_counts<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> HashMap<&'a Token, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// `true` if both slices hold the same tokens with the same multiplicities.
pub fn same_multiset(a: &[Token], b: &[Token]) -> bool {
    a.len() == b.len() && token_counts(a) == token_counts(b)
}

/// Result of analysing a story: a summary plus five events to sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryAnalysis {
    pub summary: String,
    pub scrambled_events: Vec<String>,
    pub correct_order: Vec<String>,
}

impl StoryAnalysis {
    /// Turn the analysis into a sequencing puzzle.
    pub fn to_puzzle(&self, id: impl Into<String>) -> Result<Puzzle, PuzzleError> {
        let id = id.into();
        for events in [&self.scrambled_events, &self.correct_order] {
            if events.len() != STORY_EVENT_COUNT {
                return Err(PuzzleError::WrongEventCount {
                    id,
                    expected: STORY_EVENT_COUNT,
                    actual: events.len(),
                });
            }
        }
        let tokens = |events: &[String]| events.iter().map(|e| Token::new(e.as_str())).collect();
        Puzzle::new(id, tokens(&self.correct_order), tokens(&self.scrambled_events))
    }
}

/// The mood signal sent along with an encouragement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    #[default]
    Sad,
    Frustrated,
    Tired,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Happy => write!(f, "happy"),
            Mood::Sad => write!(f, "sad"),
            Mood::Frustrated => write!(f, "frustrated"),
            Mood::Tired => write!(f, "tired"),
        }
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "sad" | "down" => Ok(Mood::Sad),
            "frustrated" => Ok(Mood::Frustrated),
            "tired" => Ok(Mood::Tired),
            other => Err(format!("unknown mood: {other}")),
        }
    }
}
