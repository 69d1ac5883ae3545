//! Error types for the games and their external collaborators.
//!
//! Nothing here is fatal. Each kind degrades a single feature:
//! invalid moves are ignored, provider failures become a dismissible
//! notice, and missing runtime capabilities disable the feature.

use thiserror::Error;

use crate::model::{Location, Zone};

/// A move that could not be applied. The tile state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The source slot holds no token.
    #[error("no token at {0}")]
    EmptySource(Location),

    /// An index points outside its zone.
    #[error("{zone} index {index} out of range (len {len})")]
    OutOfRange { zone: Zone, index: usize, len: usize },
}

/// A puzzle definition that breaks the puzzle invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("puzzle '{id}' has an empty target")]
    EmptyTarget { id: String },

    #[error("puzzle '{id}': scramble is not a permutation of the target")]
    NotAPermutation { id: String },

    #[error("puzzle '{id}': expected {expected} events, got {actual}")]
    WrongEventCount {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("puzzle set is empty")]
    EmptySet,
}

/// Errors that can occur when talking to an external provider.
///
/// Providers return these boxed in `anyhow::Error`; callers downcast to
/// classify failures instead of matching on message text.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The service returned a non-success response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response could not be decoded or broke the payload contract.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A runtime capability the current environment does not provide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{capability} is not supported in this environment")]
pub struct UnsupportedCapability {
    pub capability: String,
}

impl UnsupportedCapability {
    pub fn new(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
        }
    }
}

/// Any failure a single feature can run into.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    #[error("{service} unavailable: {source}")]
    ExternalService {
        service: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Unsupported(#[from] UnsupportedCapability),
}

/// How a failure should be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Recovered locally, nothing to show.
    Ignored,
    /// Shown once; the user may re-trigger the action.
    Dismissible(String),
    /// The feature stays disabled.
    Persistent(String),
}

impl FeatureError {
    pub fn external(service: &'static str, source: anyhow::Error) -> Self {
        FeatureError::ExternalService { service, source }
    }

    /// Map the failure to its presentation.
    pub fn notice(&self) -> Notice {
        match self {
            FeatureError::InvalidMove(_) => Notice::Ignored,
            FeatureError::ExternalService { service, .. } => {
                Notice::Dismissible(format!("Could not reach the {service}. Please try again."))
            }
            FeatureError::Unsupported(e) => Notice::Persistent(e.to_string()),
        }
    }

    /// The provider error behind an external failure, if there is one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            FeatureError::ExternalService { source, .. } => source.downcast_ref(),
            _ => None,
        }
    }
}
