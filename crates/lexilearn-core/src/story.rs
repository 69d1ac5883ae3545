//! Story sequencing game.
//!
//! The child pastes a story, a [`StoryAnalyzer`] returns a summary and five
//! scrambled events, and the events become a rearrangement puzzle. Analysis
//! runs outside the session, so its result carries the ticket captured when
//! it was requested and is dropped if the session has moved on.

use tracing::{info, instrument};

use crate::error::FeatureError;
use crate::model::StoryAnalysis;
use crate::puzzles::{knight_story, KNIGHT_EVENTS, KNIGHT_SUMMARY};
use crate::session::{Delivery, Session, SessionConfig, Ticket};
use crate::traits::StoryAnalyzer;

const SERVICE: &str = "story helper";

/// An analysis that has finished but not yet been applied.
#[derive(Debug)]
pub struct PendingAnalysis {
    pub ticket: Ticket,
    pub result: anyhow::Result<StoryAnalysis>,
}

/// Story game state: the sequencing session plus the current summary.
#[derive(Debug)]
pub struct StoryGame {
    session: Session,
    summary: Option<String>,
    stories: u32,
}

impl StoryGame {
    /// A game preloaded with the knight story until a real one is analysed.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            session: Session::new(knight_story(0), config),
            summary: None,
            stories: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Summary of the story being played, for read-aloud.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Ask the analyzer about `story`, remembering which round asked.
    #[instrument(skip_all, fields(analyzer = analyzer.name()))]
    pub async fn request(&self, analyzer: &dyn StoryAnalyzer, story: &str) -> PendingAnalysis {
        let ticket = self.session.ticket();
        let result = analyzer.analyze(story).await;
        PendingAnalysis { ticket, result }
    }

    /// Install a finished analysis if its round is still current.
    pub fn apply(&mut self, pending: PendingAnalysis) -> Result<Delivery<()>, FeatureError> {
        let analysis = match self.session.deliver(pending.ticket, pending.result) {
            Delivery::Stale => return Ok(Delivery::Stale),
            Delivery::Fresh(result) => result.map_err(|e| FeatureError::external(SERVICE, e))?,
        };
        let puzzle = analysis
            .to_puzzle(format!("story-{}", self.stories + 1))
            .map_err(|e| FeatureError::external(SERVICE, e.into()))?;
        self.stories += 1;
        info!(puzzle = %puzzle.id, "story loaded");
        self.session.load_puzzle(puzzle);
        self.summary = Some(analysis.summary);
        Ok(Delivery::Fresh(()))
    }

    /// Request and apply in one step.
    pub async fn load(
        &mut self,
        analyzer: &dyn StoryAnalyzer,
        story: &str,
    ) -> Result<Delivery<()>, FeatureError> {
        let pending = self.request(analyzer, story).await;
        self.apply(pending)
    }
}

/// The analysis the knight story would produce, in order.
pub fn knight_analysis() -> StoryAnalysis {
    let events: Vec<String> = KNIGHT_EVENTS.iter().map(|e| e.to_string()).collect();
    StoryAnalysis {
        summary: KNIGHT_SUMMARY.to_string(),
        scrambled_events: events.clone(),
        correct_order: events,
    }
}
