//! Failure taxonomy for calls to the analysis backend.
//!
//! Only [`FetchError::Resolution`] ever reaches the user. Comment and
//! sentiment failures are wrapped in [`FetchError::PartialData`], logged and
//! replaced by an empty or absent result.

use crate::models::CommentSource;
use std::fmt;
use thiserror::Error;

/// Best-effort stage whose failure degrades to an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialStage {
    Comments(CommentSource),
    SentimentSummary(CommentSource),
}

impl fmt::Display for PartialStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialStage::Comments(source) => write!(f, "{} comments", source.label()),
            PartialStage::SentimentSummary(source) => {
                write!(f, "{} sentiment summary", source.label())
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The backend answered 404: the analysis is still being computed.
    #[error("Analysis for this video is not ready yet")]
    NotReadyYet,

    #[error("Failed to connect to backend: {0}")]
    Transport(String),

    #[error("Request failed: HTTP {status} - {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Video analysis unavailable after {attempts} attempt(s): {reason}")]
    Resolution { attempts: u32, reason: String },

    #[error("Could not load {stage}: {reason}")]
    PartialData { stage: PartialStage, reason: String },
}

impl FetchError {
    /// Whether record resolution may try again within its attempt budget.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::NotReadyYet | FetchError::Transport(_))
    }

    pub fn resolution(attempts: u32, cause: &FetchError) -> Self {
        Self::Resolution {
            attempts,
            reason: cause.to_string(),
        }
    }

    pub fn partial(stage: PartialStage, cause: FetchError) -> Self {
        Self::PartialData {
            stage,
            reason: cause.to_string(),
        }
    }
}
