//! The cheering buddy: gems for good moods, encouragement for bad ones.

use tracing::info;

use crate::error::FeatureError;
use crate::model::Mood;
use crate::traits::{EncouragementProvider, EncouragementRequest, ScoreStore};

/// Gems awarded when the child reports feeling happy.
pub const HAPPY_GEMS: u64 = 5;

/// What the buddy did in response to a mood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuddyResponse {
    /// Gems were awarded; `total` is the score read back afterwards.
    Gems { earned: u64, total: u64 },
    /// An encouraging message.
    Message(String),
}

/// Buddy wired to a score store and an encouragement provider.
pub struct Buddy<'a> {
    store: &'a dyn ScoreStore,
    provider: &'a dyn EncouragementProvider,
}

impl<'a> Buddy<'a> {
    pub fn new(store: &'a dyn ScoreStore, provider: &'a dyn EncouragementProvider) -> Self {
        Self { store, provider }
    }

    /// Current gem total.
    pub async fn score(&self, user_id: &str) -> Result<u64, FeatureError> {
        self.store
            .read(user_id)
            .await
            .map_err(|e| FeatureError::external("score store", e))
    }

    /// React to a mood report.
    pub async fn respond(
        &self,
        user_id: &str,
        user_name: &str,
        mood: Mood,
    ) -> Result<BuddyResponse, FeatureError> {
        match mood {
            Mood::Happy => {
                self.store
                    .increment(user_id, HAPPY_GEMS)
                    .await
                    .map_err(|e| FeatureError::external("score store", e))?;
                let total = self.score(user_id).await?;
                info!(user_id, earned = HAPPY_GEMS, total, "gems awarded");
                Ok(BuddyResponse::Gems {
                    earned: HAPPY_GEMS,
                    total,
                })
            }
            _ => {
                let request = EncouragementRequest {
                    mood,
                    user_name: user_name.to_string(),
                };
                let message = self
                    .provider
                    .encourage(&request)
                    .await
                    .map_err(|e| FeatureError::external("AI buddy", e))?;
                Ok(BuddyResponse::Message(message))
            }
        }
    }
}
