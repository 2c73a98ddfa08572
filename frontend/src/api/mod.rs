//! Client side of the analysis backend.
//!
//! [`AnalysisBackend`] is the seam between the fetch orchestrator and the
//! network. The browser build talks to the real service through
//! [`http::HttpBackend`]; tests drive the orchestrator with in-memory fakes.

pub mod http;

use crate::error::FetchError;
use crate::models::{CommentItem, CommentSource, VideoRecord};
use std::time::Duration;

pub const RESULTS_PATH: &str = "/results";
pub const SENTI_COMMENTS_PATH: &str = "/senti_comments";
pub const SENTI_VISUALIZATION_PATH: &str = "/senti_visualization";

/// Calls consumed from the analysis service. Every method classifies its
/// own failure; none of them panic.
#[allow(async_fn_in_trait)]
pub trait AnalysisBackend {
    /// `GET /results?v={id}`. A 404 maps to [`FetchError::NotReadyYet`].
    async fn get_results(&self, video_id: &str) -> Result<VideoRecord, FetchError>;

    /// `GET /senti_comments?v={id}&type={rel|time}&limit={n}`.
    async fn get_senti_comments(
        &self,
        video_id: &str,
        source: CommentSource,
        limit: usize,
    ) -> Result<Vec<CommentItem>, FetchError>;

    /// `POST /senti_visualization`. `Ok(None)` when the backend has no image.
    async fn post_senti_visualization(
        &self,
        sentiment_labels: &[String],
    ) -> Result<Option<String>, FetchError>;

    /// Suspends between record resolution attempts.
    async fn pause(&self, delay: Duration);
}

pub fn results_url(backend_url: &str, video_id: &str) -> String {
    format!(
        "{backend_url}{RESULTS_PATH}?v={}",
        urlencoding::encode(video_id)
    )
}

pub fn senti_comments_url(
    backend_url: &str,
    video_id: &str,
    source: CommentSource,
    limit: usize,
) -> String {
    format!(
        "{backend_url}{SENTI_COMMENTS_PATH}?v={}&type={}&limit={}",
        urlencoding::encode(video_id),
        source.query_type(),
        limit
    )
}

pub fn senti_visualization_url(backend_url: &str) -> String {
    format!("{backend_url}{SENTI_VISUALIZATION_PATH}")
}
