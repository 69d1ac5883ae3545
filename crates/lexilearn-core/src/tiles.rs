//! Tile rearrangement engine.
//!
//! A [`TileState`] pairs a fixed-length [`Board`] of answer slots with a
//! [`Tray`] of unplaced tokens. Every move relocates exactly one token and
//! never creates or destroys one, so the tokens on the board plus the tokens
//! in the tray always equal the puzzle's target as a multiset.
//!
//! The tray keeps a fixed-position representation: taking a token out leaves
//! a gap, and the remaining tiles stay where they were. Tokens that come back
//! (dropped or bumped off the board) fill the first gap, or are appended when
//! the tray has none.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MoveError;
use crate::model::{same_multiset, Location, Puzzle, Token, Zone};

/// Fixed-length answer slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    slots: Vec<Option<Token>>,
}

impl Board {
    /// An all-empty board with `len` slots.
    pub fn empty(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// A board filled from a sequence of tokens or gaps.
    pub fn from_slots(slots: Vec<Option<Token>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn slots(&self) -> &[Option<Token>] {
        &self.slots
    }

    /// `true` when every slot holds a token.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Tokens currently on the board, in slot order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.slots.iter().flatten()
    }
}

/// Pool of tokens not yet placed.
///
/// Order has no bearing on correctness but is kept stable so tiles do not
/// jump around between moves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tray {
    slots: Vec<Option<Token>>,
}

impl Tray {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            slots: tokens.into_iter().map(Some).collect(),
        }
    }

    /// Number of slots, gaps included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when there are no slots at all. A tray of gaps is not empty;
    /// see [`Tray::has_no_tokens`].
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `true` when no slot holds a token, gaps or not.
    pub fn has_no_tokens(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn slots(&self) -> &[Option<Token>] {
        &self.slots
    }

    /// Tokens in the tray, in visible order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.slots.iter().flatten()
    }

    /// Put a token back: into `preferred` if that slot is an existing gap,
    /// otherwise into the first gap, otherwise at the end. Returns the slot used.
    fn insert(&mut self, token: Token, preferred: Option<usize>) -> usize {
        let index = preferred
            .filter(|&i| matches!(self.slots.get(i), Some(None)))
            .or_else(|| self.slots.iter().position(Option::is_none));
        match index {
            Some(i) => {
                self.slots[i] = Some(token);
                i
            }
            None => {
                self.slots.push(Some(token));
                self.slots.len() - 1
            }
        }
    }
}

/// A single "move token from A to B" command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Location,
    pub to: Location,
}

impl Move {
    pub fn new(from: Location, to: Location) -> Self {
        Self { from, to }
    }
}

/// What a successful move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Source and destination were the same slot.
    Unchanged,
    /// The token landed at the given location.
    Placed(Location),
    /// The token took an occupied board slot; the previous occupant went to
    /// the tray at the given location.
    Displaced { token: Token, to: Location },
}

/// Board and tray for one round of a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    board: Board,
    tray: Tray,
}

impl TileState {
    /// Fresh state for a puzzle: empty board, tray in scramble order.
    pub fn new(puzzle: &Puzzle) -> Self {
        Self {
            board: Board::empty(puzzle.len()),
            tray: Tray::new(puzzle.initial_scramble.iter().cloned()),
        }
    }

    /// Reinitialize from the puzzle.
    pub fn reset(&mut self, puzzle: &Puzzle) {
        *self = Self::new(puzzle);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    fn slot(&self, location: Location) -> Option<&Token> {
        match location.zone {
            Zone::Board => self.board.get(location.index),
            Zone::Tray => self.tray.get(location.index),
        }
    }

    fn check_range(&self, location: Location, allow_end: bool) -> Result<(), MoveError> {
        let len = match location.zone {
            Zone::Board => self.board.len(),
            Zone::Tray if allow_end => self.tray.len() + 1,
            Zone::Tray => self.tray.len(),
        };
        if location.index < len {
            Ok(())
        } else {
            Err(MoveError::OutOfRange {
                zone: location.zone,
                index: location.index,
                len: match location.zone {
                    Zone::Board => self.board.len(),
                    Zone::Tray => self.tray.len(),
                },
            })
        }
    }

    /// Apply one move.
    ///
    /// Indices are validated before anything changes, so a failed move
    /// leaves the state exactly as it was. A tray destination may name the
    /// slot one past the end to mean "append".
    pub fn apply(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        self.check_range(mv.from, false)?;
        self.check_range(mv.to, true)?;
        if self.slot(mv.from).is_none() {
            return Err(MoveError::EmptySource(mv.from));
        }
        if mv.from == mv.to {
            return Ok(MoveOutcome::Unchanged);
        }

        let token = match mv.from.zone {
            Zone::Board => self.board.slots[mv.from.index].take(),
            Zone::Tray => self.tray.slots[mv.from.index].take(),
        }
        .ok_or(MoveError::EmptySource(mv.from))?;
        debug!(from = %mv.from, to = %mv.to, token = %token, "move");

        let outcome = match mv.to.zone {
            Zone::Board => match self.board.slots[mv.to.index].replace(token) {
                None => MoveOutcome::Placed(mv.to),
                Some(displaced) => {
                    let index = self.tray.insert(displaced.clone(), None);
                    MoveOutcome::Displaced {
                        token: displaced,
                        to: Location::tray(index),
                    }
                }
            },
            Zone::Tray => {
                let index = self.tray.insert(token, Some(mv.to.index));
                MoveOutcome::Placed(Location::tray(index))
            }
        };
        Ok(outcome)
    }

    /// `true` if the board and tray together hold exactly the puzzle's tokens.
    pub fn conserves(&self, puzzle: &Puzzle) -> bool {
        let held: Vec<Token> = self
            .board
            .tokens()
            .chain(self.tray.tokens())
            .cloned()
            .collect();
        self.board.len() == puzzle.len() && same_multiset(&held, &puzzle.target)
    }

    /// Evaluate the board against the puzzle's target.
    pub fn check(&self, puzzle: &Puzzle) -> bool {
        check(&self.board, &puzzle.target)
    }
}

/// `true` iff every slot is filled and the board matches `target` position by position.
pub fn check(board: &Board, target: &[Token]) -> bool {
    if !board.is_full() {
        return false;
    }
    board.len() == target.len() && board.tokens().eq(target.iter())
}
