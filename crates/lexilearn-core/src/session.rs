//! Session controller for the rearrangement games.
//!
//! A session loops over a puzzle set forever:
//!
//! ```text
//! Playing --move/reset--> Playing
//! Playing --check--> Checked(success) --resume--> Playing (next puzzle)
//! Playing --check--> Checked(failure) --resume--> Playing (same puzzle)
//! ```
//!
//! Every puzzle switch or reset starts a new *round*. Work done outside the
//! session (network calls, speech) captures a [`Ticket`] when it starts, and
//! its result is only applied if the ticket still names the current round.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::MoveError;
use crate::model::Puzzle;
use crate::puzzles::{PickOrder, PuzzleSet};
use crate::tiles::{Move, MoveOutcome, TileState};

/// Default pause between a correct answer and the next puzzle.
pub const DEFAULT_SUCCESS_DELAY: Duration = Duration::from_millis(1000);

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Presentation order of the puzzle set.
    pub order: PickOrder,
    /// Cosmetic pause after a correct answer before moving on.
    pub success_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            order: PickOrder::RoundRobin,
            success_delay: DEFAULT_SUCCESS_DELAY,
        }
    }
}

/// Result of checking the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// Where the session is in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Checked(Outcome),
}

/// Correlation token captured when external work is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub session: Uuid,
    pub round: u64,
}

/// A result delivered against a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery<T> {
    /// The round is still current; the value may be applied.
    Fresh(T),
    /// The session moved on; the value was dropped.
    Stale,
}

impl<T> Delivery<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Delivery::Stale)
    }
}

/// One player's game over a puzzle set.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    puzzles: PuzzleSet,
    config: SessionConfig,
    index: usize,
    round: u64,
    tiles: TileState,
    state: SessionState,
    solved: u32,
}

impl Session {
    pub fn new(puzzles: PuzzleSet, config: SessionConfig) -> Self {
        let puzzles = puzzles.ordered(config.order);
        let tiles = match puzzles.get(0) {
            Some(puzzle) => TileState::new(puzzle),
            None => unreachable!("puzzle sets are never empty"),
        };
        Self {
            id: Uuid::new_v4(),
            puzzles,
            config,
            index: 0,
            round: 0,
            tiles,
            state: SessionState::Playing,
            solved: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tiles(&self) -> &TileState {
        &self.tiles
    }

    pub fn puzzles(&self) -> &PuzzleSet {
        &self.puzzles
    }

    /// Position of the current puzzle in the set.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of correct checks so far.
    pub fn solved(&self) -> u32 {
        self.solved
    }

    pub fn success_delay(&self) -> Duration {
        self.config.success_delay
    }

    pub fn puzzle(&self) -> &Puzzle {
        match self.puzzles.get(self.index) {
            Some(puzzle) => puzzle,
            None => unreachable!("index is always kept within the set"),
        }
    }

    /// Move one token. A move made while a result is on display dismisses it.
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        if let SessionState::Checked(Outcome::Success) = self.state {
            // The puzzle is solved; the next one is about to load.
            debug!(session = %self.id, "move ignored after success");
            return Ok(MoveOutcome::Unchanged);
        }
        self.state = SessionState::Playing;
        self.tiles.apply(mv)
    }

    /// Evaluate the board. Never changes the tiles; checking an already
    /// solved board again does not count it twice.
    pub fn check(&mut self) -> Outcome {
        if self.state == SessionState::Checked(Outcome::Success) {
            return Outcome::Success;
        }
        let outcome = if self.tiles.check(self.puzzle()) {
            self.solved += 1;
            Outcome::Success
        } else {
            Outcome::Failure
        };
        info!(session = %self.id, puzzle = %self.puzzle().id, ?outcome, "checked");
        self.state = SessionState::Checked(outcome);
        outcome
    }

    /// Leave the checked state: next puzzle after a success, same puzzle otherwise.
    pub fn resume(&mut self) {
        match self.state {
            SessionState::Checked(Outcome::Success) => self.advance(),
            SessionState::Checked(Outcome::Failure) | SessionState::Playing => {
                self.state = SessionState::Playing;
            }
        }
    }

    /// Put every token back in the tray, on the same puzzle.
    pub fn reset(&mut self) {
        self.tiles = TileState::new(self.puzzle());
        self.start_round();
    }

    /// Move to the next puzzle of the set.
    pub fn advance(&mut self) {
        self.index = self.puzzles.next(self.index);
        self.tiles = TileState::new(self.puzzle());
        self.start_round();
    }

    /// Replace the whole puzzle set with a single puzzle.
    pub fn load_puzzle(&mut self, puzzle: Puzzle) {
        let id = puzzle.id.clone();
        self.tiles = TileState::new(&puzzle);
        self.puzzles = match PuzzleSet::new(id.clone(), id, vec![puzzle]) {
            Ok(set) => set,
            Err(_) => unreachable!("a single puzzle is a non-empty set"),
        };
        self.index = 0;
        self.start_round();
    }

    fn start_round(&mut self) {
        self.round += 1;
        self.state = SessionState::Playing;
        info!(session = %self.id, round = self.round, puzzle = %self.puzzle().id, "new round");
    }

    /// Capture a correlation token for the current round.
    pub fn ticket(&self) -> Ticket {
        Ticket {
            session: self.id,
            round: self.round,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.session == self.id && ticket.round == self.round
    }

    /// Gate a late result on its ticket.
    pub fn deliver<T>(&self, ticket: Ticket, value: T) -> Delivery<T> {
        if self.is_current(&ticket) {
            Delivery::Fresh(value)
        } else {
            warn!(
                session = %self.id,
                ticket_round = ticket.round,
                round = self.round,
                "discarding stale result"
            );
            Delivery::Stale
        }
    }
}
