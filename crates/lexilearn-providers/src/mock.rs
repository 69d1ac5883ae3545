//! Mock providers for offline play and testing.
//!
//! These stand in for the AI endpoints: a small fixed set of cheering
//! messages, and a fixed knight-and-dragon story analysis.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lexilearn_core::error::ProviderError;
use lexilearn_core::model::StoryAnalysis;
use lexilearn_core::story::knight_analysis;
use lexilearn_core::traits::{EncouragementProvider, EncouragementRequest, StoryAnalyzer};

/// The fixed cheering messages.
pub const CHEERING_MESSAGES: [&str; 5] = [
    "It's okay to feel down sometimes. Every challenge is a chance to grow stronger!",
    "Remember how far you've come! You're doing an amazing job.",
    "A small step forward is still a step! Keep going!",
    "Believe in yourself! You have the power to overcome anything.",
    "Even on cloudy days, the sun is still shining above. You've got this!",
];

/// Encouragement provider that picks one of [`CHEERING_MESSAGES`].
pub struct MockEncouragement {
    rng: Mutex<ChaCha8Rng>,
    fail: bool,
    call_count: AtomicU32,
    last_request: Mutex<Option<EncouragementRequest>>,
}

impl MockEncouragement {
    /// Messages are picked with a seeded generator, so a seed replays the same sequence.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            fail: false,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A provider whose every call fails like a 500 from the endpoint.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0)
        }
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this provider.
    pub fn last_request(&self) -> Option<EncouragementRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl EncouragementProvider for MockEncouragement {
    fn name(&self) -> &str {
        "mock"
    }

    async fn encourage(&self, request: &EncouragementRequest) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.clone());

        if self.fail {
            return Err(ProviderError::ApiError {
                status: 500,
                message: "Internal Server Error".into(),
            }
            .into());
        }

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let message = CHEERING_MESSAGES
            .choose(&mut *rng)
            .copied()
            .unwrap_or(CHEERING_MESSAGES[0]);
        Ok(message.to_string())
    }
}

/// Story analyzer that ignores the story and returns the knight analysis,
/// with the events scrambled.
pub struct MockStoryAnalyzer {
    rng: Mutex<ChaCha8Rng>,
    fail: bool,
    call_count: AtomicU32,
}

impl MockStoryAnalyzer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            fail: false,
            call_count: AtomicU32::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0)
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl StoryAnalyzer for MockStoryAnalyzer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(&self, story: &str) -> anyhow::Result<StoryAnalysis> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(chars = story.len(), "mock story analysis");

        if self.fail {
            return Err(ProviderError::ApiError {
                status: 500,
                message: "Internal Server Error".into(),
            }
            .into());
        }

        let mut analysis = knight_analysis();
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        analysis.scrambled_events.shuffle(&mut *rng);
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexilearn_core::model::{same_multiset, Mood, Token};

    fn request() -> EncouragementRequest {
        EncouragementRequest {
            mood: Mood::Sad,
            user_name: "Sam".into(),
        }
    }

    #[tokio::test]
    async fn encouragement_comes_from_fixed_set() {
        let provider = MockEncouragement::new(1);
        for _ in 0..10 {
            let message = provider.encourage(&request()).await.unwrap();
            assert!(CHEERING_MESSAGES.contains(&message.as_str()));
        }
        assert_eq!(provider.call_count(), 10);
        assert_eq!(provider.last_request().unwrap().user_name, "Sam");
    }

    #[tokio::test]
    async fn same_seed_same_messages() {
        let a = MockEncouragement::new(9);
        let b = MockEncouragement::new(9);
        for _ in 0..5 {
            assert_eq!(
                a.encourage(&request()).await.unwrap(),
                b.encourage(&request()).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn failing_encouragement_is_an_api_error() {
        let provider = MockEncouragement::failing();
        let err = provider.encourage(&request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::ApiError { status: 500, .. })
        ));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn story_analysis_is_a_valid_puzzle() {
        let analyzer = MockStoryAnalyzer::new(4);
        let analysis = analyzer.analyze("Once upon a time").await.unwrap();
        assert_eq!(analysis.scrambled_events.len(), 5);

        let tokens = |v: &[String]| v.iter().map(|s| Token::from(s.as_str())).collect::<Vec<_>>();
        assert!(same_multiset(
            &tokens(&analysis.scrambled_events),
            &tokens(&analysis.correct_order)
        ));
        assert!(analysis.to_puzzle("story").is_ok());
    }

    #[tokio::test]
    async fn failing_story_analyzer() {
        let analyzer = MockStoryAnalyzer::failing();
        assert!(analyzer.analyze("x").await.is_err());
        assert_eq!(analyzer.call_count(), 1);
    }
}
