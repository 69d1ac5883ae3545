//! Speech recognizers available outside a browser.
//!
//! A terminal has no microphone pipeline, so the CLI either has no
//! recognizer at all or replays transcripts typed on the command line.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use lexilearn_core::error::ProviderError;
use lexilearn_core::traits::SpeechRecognizer;

/// Recognizer for runtimes without speech support.
pub struct NoRecognizer;

#[async_trait]
impl SpeechRecognizer for NoRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    async fn listen(&self) -> anyhow::Result<String> {
        anyhow::bail!("speech recognition is not available")
    }
}

/// Recognizer that hands out pre-recorded transcripts in order.
pub struct ScriptedRecognizer {
    transcripts: Mutex<VecDeque<String>>,
}

impl ScriptedRecognizer {
    pub fn new<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transcripts: Mutex::new(transcripts.into_iter().map(Into::into).collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.transcripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    fn is_supported(&self) -> bool {
        true
    }

    async fn listen(&self) -> anyhow::Result<String> {
        let next = self
            .transcripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.ok_or_else(|| ProviderError::MalformedResponse("no speech detected".into()).into())
    }
}
