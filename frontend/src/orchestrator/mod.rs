//! Fetch orchestration for one video's results page.
//!
//! ## Stages
//! 1. **Record**: poll `/results` until the backend has finished the analysis
//!    or the retry budget runs out. This is the only stage that can fail the
//!    page.
//! 2. **Comments**: once the record is ready, fetch the Top and Latest comment
//!    sets concurrently and merge them, Top first.
//! 3. **Sentiment summaries**: for each source, render a chart from that
//!    source's sentiment labels. Re-run whenever those labels change.
//!
//! Stages 2 and 3 are best-effort: failures are classified as
//! [`FetchError::PartialData`], logged and replaced by empty results.
//!
//! ## Submodules
//! - **`state`**: the page state machine and its actions.
//! - **`pipeline`**: drives each stage and reports completion as actions.

pub mod pipeline;
pub mod state;

use crate::api::AnalysisBackend;
use crate::error::{FetchError, PartialStage};
use crate::models::{Comment, CommentSource, SentimentSummary, VideoRecord};
use futures_util::future::join;
use log::{debug, error, info, warn};
use std::time::Duration;

/// Attempt budget for record resolution. Not-ready answers and network
/// failures draw from the same budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

pub struct Orchestrator<B> {
    backend: B,
    retry: RetryPolicy,
}

impl<B: AnalysisBackend> Orchestrator<B> {
    pub fn new(backend: B, retry: RetryPolicy) -> Self {
        Self { backend, retry }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn resolve_video_record(&self, video_id: &str) -> Result<VideoRecord, FetchError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_error = FetchError::NotReadyYet;

        for attempt in 1..=max_attempts {
            match self.backend.get_results(video_id).await {
                Ok(record) => {
                    info!("Resolved results for {video_id} on attempt {attempt}");
                    return Ok(record);
                }
                Err(e) if e.is_retryable() => {
                    debug!("Results for {video_id} unavailable (attempt {attempt}/{max_attempts}): {e}");
                    last_error = e;
                    if attempt < max_attempts {
                        self.backend.pause(self.retry.delay).await;
                    }
                }
                Err(e) => {
                    let err = FetchError::resolution(attempt, &e);
                    error!("{err}");
                    return Err(err);
                }
            }
        }

        let err = FetchError::resolution(max_attempts, &last_error);
        error!("{err}");
        Err(err)
    }

    pub async fn fetch_comments(
        &self,
        video_id: &str,
        source: CommentSource,
        limit: usize,
    ) -> Vec<Comment> {
        match self
            .backend
            .get_senti_comments(video_id, source, limit)
            .await
        {
            Ok(items) => items.into_iter().map(|item| item.tag(source)).collect(),
            Err(e) => {
                let err = FetchError::partial(PartialStage::Comments(source), e);
                warn!("{err}");
                Vec::new()
            }
        }
    }

    /// Both sources are requested at once; the result lists every Top
    /// comment before any Latest one, each in backend order.
    pub async fn fetch_combined_comments(
        &self,
        video_id: &str,
        top_limit: usize,
        latest_limit: usize,
    ) -> Vec<Comment> {
        let (mut combined, latest) = join(
            self.fetch_comments(video_id, CommentSource::Top, top_limit),
            self.fetch_comments(video_id, CommentSource::Latest, latest_limit),
        )
        .await;

        combined.extend(latest);
        debug!("Fetched {} comments for {video_id}", combined.len());
        combined
    }

    pub async fn fetch_sentiment_summary(
        &self,
        source: CommentSource,
        sentiment_labels: &[String],
    ) -> Option<SentimentSummary> {
        if sentiment_labels.is_empty() {
            debug!("No {} labels, skipping sentiment summary", source.label());
            return None;
        }

        match self.backend.post_senti_visualization(sentiment_labels).await {
            Ok(image) => image.map(|image_base64| SentimentSummary { image_base64 }),
            Err(e) => {
                let err = FetchError::partial(PartialStage::SentimentSummary(source), e);
                warn!("{err}");
                None
            }
        }
    }
}

/// Labels of `source`'s comments, in collection order.
pub fn sentiment_labels(comments: &[Comment], source: CommentSource) -> Vec<String> {
    comments
        .iter()
        .filter(|comment| comment.source == source)
        .map(|comment| comment.sentiment.label().to_string())
        .collect()
}

#[cfg(test)]
mod tests;
