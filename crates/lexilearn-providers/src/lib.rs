//! Collaborator implementations for lexilearn.
//!
//! Mock providers for offline play, an HTTP client for the buddy and story
//! endpoints, score stores, and the configuration that picks between them.

pub mod api;
pub mod config;
pub mod error;
pub mod mock;
pub mod speech;
pub mod store;

pub use config::{
    create_encouragement, create_score_store, create_story_analyzer, load_config,
    load_config_from, LexiConfig, ProviderConfig, StoreConfig,
};
pub use error::ProviderError;
