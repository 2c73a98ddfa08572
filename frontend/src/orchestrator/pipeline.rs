use super::state::{CommentRequest, PageAction, SummaryRequest};
use super::Orchestrator;
use crate::api::AnalysisBackend;

pub async fn run_record_stage<B: AnalysisBackend>(
    orchestrator: &Orchestrator<B>,
    video_id: String,
    dispatch: impl Fn(PageAction),
) {
    dispatch(PageAction::Start {
        video_id: video_id.clone(),
    });

    match orchestrator.resolve_video_record(&video_id).await {
        Ok(record) => dispatch(PageAction::RecordResolved(record)),
        Err(e) => dispatch(PageAction::RecordFailed(e.to_string())),
    }
}

/// The result is tagged with the request's limits so the page can drop it
/// if the limits changed while it was in flight.
pub async fn run_comment_stage<B: AnalysisBackend>(
    orchestrator: &Orchestrator<B>,
    request: CommentRequest,
    dispatch: impl Fn(PageAction),
) {
    let limits = request.limits();
    let comments = orchestrator
        .fetch_combined_comments(request.video_id(), limits.top, limits.latest)
        .await;

    dispatch(PageAction::CommentsLoaded { limits, comments });
}

pub async fn run_summary_stage<B: AnalysisBackend>(
    orchestrator: &Orchestrator<B>,
    request: SummaryRequest,
    dispatch: impl Fn(PageAction),
) {
    let summary = orchestrator
        .fetch_sentiment_summary(request.source(), request.labels())
        .await;

    dispatch(PageAction::SummaryLoaded {
        source: request.source(),
        revision: request.revision(),
        summary,
    });
}
