//! Traits for the external collaborators.
//!
//! These async traits are implemented by the `lexilearn-providers` crate.
//! Failures are returned as `anyhow::Error`; implementations wrap
//! [`ProviderError`](crate::error::ProviderError) so callers can downcast.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Mood, StoryAnalysis};

// ---------------------------------------------------------------------------
// Score store
// ---------------------------------------------------------------------------

/// A single integer counter per user.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Human-readable store name (e.g. "memory").
    fn name(&self) -> &str;

    /// Add `delta` to the user's score, creating it at zero if absent.
    async fn increment(&self, user_id: &str, delta: u64) -> anyhow::Result<()>;

    /// Current score, or 0 if the user has none yet.
    async fn read(&self, user_id: &str) -> anyhow::Result<u64>;
}

// ---------------------------------------------------------------------------
// Encouragement provider
// ---------------------------------------------------------------------------

/// Request for a cheering message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncouragementRequest {
    /// How the child is feeling.
    #[serde(rename = "emotion")]
    pub mood: Mood,
    /// Name to address the child by.
    pub user_name: String,
}

/// Source of short encouraging messages.
#[async_trait]
pub trait EncouragementProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn encourage(&self, request: &EncouragementRequest) -> anyhow::Result<String>;
}

// ---------------------------------------------------------------------------
// Story analysis
// ---------------------------------------------------------------------------

/// Turns raw story text into a summary and five events to sequence.
#[async_trait]
pub trait StoryAnalyzer: Send + Sync {
    fn name(&self) -> &str;

    async fn analyze(&self, story: &str) -> anyhow::Result<StoryAnalysis>;
}

// ---------------------------------------------------------------------------
// Speech recognition
// ---------------------------------------------------------------------------

/// A runtime speech recognizer producing one transcript per call.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// `false` when the runtime has no recognizer at all.
    fn is_supported(&self) -> bool;

    async fn listen(&self) -> anyhow::Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encouragement_request_wire_format() {
        let request = EncouragementRequest {
            mood: Mood::Sad,
            user_name: "Sam".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["emotion"], "sad");
        assert_eq!(json["userName"], "Sam");
    }
}
