//! Letter discrimination by speech.
//!
//! The child is shown two easily confused letters or words and says the
//! target one aloud. The transcript is matched against both options.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FeatureError, UnsupportedCapability};
use crate::traits::SpeechRecognizer;

/// Two confusable options and the one the child should say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscriminationPair {
    pub options: [String; 2],
    pub answer: String,
}

impl DiscriminationPair {
    pub fn new(a: &str, b: &str, answer: &str) -> Self {
        Self {
            options: [a.to_string(), b.to_string()],
            answer: answer.to_string(),
        }
    }

    /// The option that is not the answer.
    pub fn distractor(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| **o != self.answer)
            .map(String::as_str)
    }
}

/// The built-in pairs: b/d, p/q and was/saw.
pub fn builtin_pairs() -> Vec<DiscriminationPair> {
    vec![
        DiscriminationPair::new("b", "d", "b"),
        DiscriminationPair::new("p", "q", "p"),
        DiscriminationPair::new("was", "saw", "was"),
    ]
}

/// What the transcript was judged to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Judgement {
    Correct,
    /// The child said the other option.
    HeardOther(String),
    Unrecognized,
}

/// Lowercase and keep only `a-z`.
pub fn clean_transcript(transcript: &str) -> String {
    transcript
        .chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            c.is_ascii_lowercase().then_some(c)
        })
        .collect()
}

/// Match a transcript against a pair.
pub fn judge(pair: &DiscriminationPair, transcript: &str) -> Judgement {
    let cleaned = clean_transcript(transcript);
    if cleaned.contains(&pair.answer.to_lowercase()) {
        return Judgement::Correct;
    }
    match pair.distractor() {
        Some(other) if cleaned.contains(&other.to_lowercase()) => {
            Judgement::HeardOther(other.to_string())
        }
        _ => Judgement::Unrecognized,
    }
}

/// Round-robin game over a list of pairs.
#[derive(Debug, Clone)]
pub struct DiscriminationGame {
    pairs: Vec<DiscriminationPair>,
    index: usize,
    correct: u32,
}

impl DiscriminationGame {
    /// `None` when `pairs` is empty.
    pub fn new(pairs: Vec<DiscriminationPair>) -> Option<Self> {
        (!pairs.is_empty()).then_some(Self {
            pairs,
            index: 0,
            correct: 0,
        })
    }

    pub fn current(&self) -> &DiscriminationPair {
        &self.pairs[self.index]
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Judge a transcript; a correct answer moves on to the next pair.
    pub fn submit(&mut self, transcript: &str) -> Judgement {
        let judgement = judge(self.current(), transcript);
        debug!(transcript, ?judgement, "judged");
        if judgement == Judgement::Correct {
            self.correct += 1;
            self.index = (self.index + 1) % self.pairs.len();
        }
        judgement
    }

    /// Listen once and judge what was heard.
    pub async fn listen(
        &mut self,
        recognizer: &dyn SpeechRecognizer,
    ) -> Result<Judgement, FeatureError> {
        if !recognizer.is_supported() {
            return Err(UnsupportedCapability::new("speech recognition").into());
        }
        let transcript = recognizer
            .listen()
            .await
            .map_err(|e| FeatureError::external("speech recognizer", e))?;
        Ok(self.submit(&transcript))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Notice;
    use async_trait::async_trait;

    struct Unsupported;

    #[async_trait]
    impl SpeechRecognizer for Unsupported {
        fn is_supported(&self) -> bool {
            false
        }

        async fn listen(&self) -> anyhow::Result<String> {
            anyhow::bail!("unreachable")
        }
    }

    struct Scripted(&'static str);

    #[async_trait]
    impl SpeechRecognizer for Scripted {
        fn is_supported(&self) -> bool {
            true
        }

        async fn listen(&self) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn cleaning_keeps_letters_only() {
        assert_eq!(clean_transcript("B!"), "b");
        assert_eq!(clean_transcript("It was, I think."), "itwasithink");
        assert_eq!(clean_transcript("123"), "");
    }

    #[test]
    fn judge_matches_answer_then_distractor() {
        let pair = DiscriminationPair::new("was", "saw", "was");
        assert_eq!(judge(&pair, "WAS"), Judgement::Correct);
        assert_eq!(judge(&pair, "saw"), Judgement::HeardOther("saw".into()));
        assert_eq!(judge(&pair, "hello"), Judgement::Unrecognized);
    }

    #[test]
    fn correct_answer_advances_round_robin() {
        let mut game = DiscriminationGame::new(builtin_pairs()).unwrap();
        assert_eq!(game.current().answer, "b");
        assert_eq!(game.submit("dee"), Judgement::HeardOther("d".into()));
        assert_eq!(game.current().answer, "b");

        assert_eq!(game.submit("bee"), Judgement::Correct);
        assert_eq!(game.current().answer, "p");
        game.submit("p");
        game.submit("was");
        assert_eq!(game.current().answer, "b");
        assert_eq!(game.correct(), 3);
    }

    #[test]
    fn empty_pair_list_is_rejected() {
        assert!(DiscriminationGame::new(vec![]).is_none());
    }

    #[tokio::test]
    async fn missing_recognizer_disables_feature() {
        let mut game = DiscriminationGame::new(builtin_pairs()).unwrap();
        let err = game.listen(&Unsupported).await.unwrap_err();
        assert!(matches!(err.notice(), Notice::Persistent(_)));
    }

    #[tokio::test]
    async fn listen_judges_transcript() {
        let mut game = DiscriminationGame::new(builtin_pairs()).unwrap();
        assert_eq!(
            game.listen(&Scripted("b")).await.unwrap(),
            Judgement::Correct
        );
    }
}
