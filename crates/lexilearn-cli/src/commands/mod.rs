pub mod buddy;
pub mod init;
pub mod listen;
pub mod screen;
pub mod sequence;
pub mod similarity;
pub mod spell;
pub mod validate;

use lexilearn_core::error::{FeatureError, Notice};

/// Turn a feature failure into the message shown to the child.
pub(crate) fn into_notice(err: FeatureError) -> anyhow::Error {
    tracing::warn!("{err}");
    match err.notice() {
        Notice::Dismissible(message) | Notice::Persistent(message) => anyhow::anyhow!(message),
        Notice::Ignored => anyhow::Error::new(err),
    }
}
