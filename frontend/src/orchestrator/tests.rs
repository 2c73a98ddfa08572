//! Orchestrator Tests
//!
//! Drives the fetch pipeline against an in-memory backend.
//!
//! ## Test Scopes
//! - **Resolution**: retry budget, not-ready polling, fatal responses.
//! - **Comments**: best-effort fetch, merge order independent of completion order.
//! - **Sentiment**: best-effort summary fetch.
//! - **State machine**: gating, one-shot record transitions, stale result discarding.

use super::pipeline::{run_comment_stage, run_record_stage, run_summary_stage};
use super::state::{CommentLimits, PageAction, PageState, Phase, Stage};
use super::{sentiment_labels, Orchestrator, RetryPolicy};
use crate::api::AnalysisBackend;
use crate::error::FetchError;
use crate::models::{Comment, CommentItem, CommentSource, Sentiment, SentimentSummary, VideoRecord};
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

struct FakeBackend {
    results: RefCell<VecDeque<Result<VideoRecord, FetchError>>>,
    result_calls: RefCell<u32>,
    pauses: RefCell<Vec<Duration>>,
    top: Result<Vec<CommentItem>, FetchError>,
    latest: Result<Vec<CommentItem>, FetchError>,
    slow_source: Option<CommentSource>,
    comment_calls: RefCell<Vec<(CommentSource, usize)>>,
    completed: RefCell<Vec<CommentSource>>,
    visualization: Result<Option<String>, FetchError>,
    visualization_calls: RefCell<Vec<Vec<String>>>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            results: RefCell::new(VecDeque::new()),
            result_calls: RefCell::new(0),
            pauses: RefCell::new(Vec::new()),
            top: Ok(Vec::new()),
            latest: Ok(Vec::new()),
            slow_source: None,
            comment_calls: RefCell::new(Vec::new()),
            completed: RefCell::new(Vec::new()),
            visualization: Ok(Some("c2VudGk=".to_string())),
            visualization_calls: RefCell::new(Vec::new()),
        }
    }

    fn with_results(self, results: Vec<Result<VideoRecord, FetchError>>) -> Self {
        *self.results.borrow_mut() = results.into();
        self
    }

    fn not_ready_then_ready(self, not_ready: usize) -> Self {
        let mut results: Vec<_> = (0..not_ready).map(|_| Err(FetchError::NotReadyYet)).collect();
        results.push(Ok(record()));
        self.with_results(results)
    }
}

impl AnalysisBackend for FakeBackend {
    async fn get_results(&self, _video_id: &str) -> Result<VideoRecord, FetchError> {
        *self.result_calls.borrow_mut() += 1;
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(FetchError::NotReadyYet))
    }

    async fn get_senti_comments(
        &self,
        _video_id: &str,
        source: CommentSource,
        limit: usize,
    ) -> Result<Vec<CommentItem>, FetchError> {
        self.comment_calls.borrow_mut().push((source, limit));
        if self.slow_source == Some(source) {
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
        }
        self.completed.borrow_mut().push(source);
        match source {
            CommentSource::Top => self.top.clone(),
            CommentSource::Latest => self.latest.clone(),
        }
    }

    async fn post_senti_visualization(
        &self,
        sentiment_labels: &[String],
    ) -> Result<Option<String>, FetchError> {
        self.visualization_calls
            .borrow_mut()
            .push(sentiment_labels.to_vec());
        self.visualization.clone()
    }

    async fn pause(&self, delay: Duration) {
        self.pauses.borrow_mut().push(delay);
    }
}

fn record() -> VideoRecord {
    serde_json::from_value(json!({
        "title": "Great video",
        "channel": "Someone",
        "wordCloud_rel": "cmVs"
    }))
    .unwrap()
}

fn item(text: &str, sentiment: &str) -> CommentItem {
    CommentItem {
        text: text.to_string(),
        sentiment: Sentiment::from(sentiment.to_string()),
    }
}

fn comment(text: &str, sentiment: &str, source: CommentSource) -> Comment {
    item(text, sentiment).tag(source)
}

fn policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        delay: Duration::from_millis(10),
    }
}

// ============================================================
// RESOLUTION
// ============================================================

#[tokio::test]
async fn test_resolve_succeeds_after_not_ready_responses() {
    let orchestrator = Orchestrator::new(FakeBackend::new().not_ready_then_ready(3), policy(8));

    let resolved = orchestrator.resolve_video_record("abc").await;

    assert_eq!(resolved, Ok(record()));
    assert_eq!(*orchestrator.backend().result_calls.borrow(), 4);
    assert_eq!(
        *orchestrator.backend().pauses.borrow(),
        vec![Duration::from_millis(10); 3]
    );
}

#[tokio::test]
async fn test_resolve_succeeds_on_last_attempt() {
    let orchestrator = Orchestrator::new(FakeBackend::new().not_ready_then_ready(7), policy(8));

    assert!(orchestrator.resolve_video_record("abc").await.is_ok());
    assert_eq!(*orchestrator.backend().result_calls.borrow(), 8);
}

#[tokio::test]
async fn test_resolve_fails_when_never_ready() {
    let orchestrator = Orchestrator::new(FakeBackend::new(), policy(8));

    let err = orchestrator.resolve_video_record("abc").await.unwrap_err();

    assert!(matches!(err, FetchError::Resolution { attempts: 8, .. }));
    assert_eq!(*orchestrator.backend().result_calls.borrow(), 8);
    // No wait after the final attempt
    assert_eq!(orchestrator.backend().pauses.borrow().len(), 7);
}

#[tokio::test]
async fn test_transport_errors_share_the_attempt_budget() {
    let backend = FakeBackend::new().with_results(vec![
        Err(FetchError::Transport("offline".into())),
        Err(FetchError::NotReadyYet),
        Ok(record()),
    ]);
    let orchestrator = Orchestrator::new(backend, policy(2));

    let err = orchestrator.resolve_video_record("abc").await.unwrap_err();

    assert_eq!(
        err,
        FetchError::Resolution {
            attempts: 2,
            reason: "Analysis for this video is not ready yet".into()
        }
    );
    assert_eq!(*orchestrator.backend().result_calls.borrow(), 2);
}

#[tokio::test]
async fn test_other_http_failures_are_fatal_immediately() {
    let backend = FakeBackend::new().with_results(vec![
        Err(FetchError::Http {
            status: 500,
            body: "boom".into(),
        }),
        Ok(record()),
    ]);
    let orchestrator = Orchestrator::new(backend, policy(8));

    let err = orchestrator.resolve_video_record("abc").await.unwrap_err();

    assert!(matches!(err, FetchError::Resolution { attempts: 1, .. }));
    assert_eq!(*orchestrator.backend().result_calls.borrow(), 1);
    assert!(orchestrator.backend().pauses.borrow().is_empty());
}

#[tokio::test]
async fn test_zero_attempt_budget_still_tries_once() {
    let orchestrator = Orchestrator::new(FakeBackend::new().not_ready_then_ready(0), policy(0));

    assert!(orchestrator.resolve_video_record("abc").await.is_ok());
}

// ============================================================
// COMMENTS
// ============================================================

#[tokio::test]
async fn test_fetch_comments_tags_source() {
    let mut backend = FakeBackend::new();
    backend.latest = Ok(vec![item("first!", "neutral")]);
    let orchestrator = Orchestrator::new(backend, policy(1));

    let comments = orchestrator
        .fetch_comments("abc", CommentSource::Latest, 10)
        .await;

    assert_eq!(comments, vec![comment("first!", "neutral", CommentSource::Latest)]);
    assert_eq!(
        *orchestrator.backend().comment_calls.borrow(),
        vec![(CommentSource::Latest, 10)]
    );
}

#[tokio::test]
async fn test_fetch_comments_failure_degrades_to_empty() {
    let mut backend = FakeBackend::new();
    backend.top = Err(FetchError::Http {
        status: 503,
        body: String::new(),
    });
    let orchestrator = Orchestrator::new(backend, policy(1));

    let comments = orchestrator.fetch_comments("abc", CommentSource::Top, 10).await;

    assert!(comments.is_empty());
}

#[tokio::test]
async fn test_combined_comments_list_top_first_regardless_of_completion() {
    let mut backend = FakeBackend::new();
    backend.top = Ok(vec![item("c1", "positive"), item("c2", "negative")]);
    backend.latest = Ok(vec![item("c3", "neutral")]);
    backend.slow_source = Some(CommentSource::Top);
    let orchestrator = Orchestrator::new(backend, policy(1));

    let combined = orchestrator.fetch_combined_comments("abc", 5, 7).await;

    // Latest finished first over the wire
    assert_eq!(
        *orchestrator.backend().completed.borrow(),
        vec![CommentSource::Latest, CommentSource::Top]
    );
    assert_eq!(
        combined,
        vec![
            comment("c1", "positive", CommentSource::Top),
            comment("c2", "negative", CommentSource::Top),
            comment("c3", "neutral", CommentSource::Latest),
        ]
    );
    let calls = orchestrator.backend().comment_calls.borrow();
    assert!(calls.contains(&(CommentSource::Top, 5)));
    assert!(calls.contains(&(CommentSource::Latest, 7)));
}

#[tokio::test]
async fn test_combined_comments_keep_working_source() {
    let mut backend = FakeBackend::new();
    backend.top = Err(FetchError::Transport("reset".into()));
    backend.latest = Ok(vec![item("still here", "positive")]);
    let orchestrator = Orchestrator::new(backend, policy(1));

    let combined = orchestrator.fetch_combined_comments("abc", 5, 5).await;

    assert_eq!(
        combined,
        vec![comment("still here", "positive", CommentSource::Latest)]
    );
}

// ============================================================
// SENTIMENT SUMMARY
// ============================================================

#[tokio::test]
async fn test_sentiment_summary_success() {
    let orchestrator = Orchestrator::new(FakeBackend::new(), policy(1));
    let labels = vec!["positive".to_string(), "negative".to_string()];

    let summary = orchestrator
        .fetch_sentiment_summary(CommentSource::Top, &labels)
        .await;

    assert_eq!(
        summary,
        Some(SentimentSummary {
            image_base64: "c2VudGk=".into()
        })
    );
    assert_eq!(*orchestrator.backend().visualization_calls.borrow(), vec![labels]);
}

#[tokio::test]
async fn test_sentiment_summary_failure_and_null_are_absent() {
    let labels = vec!["neutral".to_string()];

    let mut failing = FakeBackend::new();
    failing.visualization = Err(FetchError::Decode("not json".into()));
    let orchestrator = Orchestrator::new(failing, policy(1));
    assert_eq!(
        orchestrator
            .fetch_sentiment_summary(CommentSource::Latest, &labels)
            .await,
        None
    );

    let mut empty = FakeBackend::new();
    empty.visualization = Ok(None);
    let orchestrator = Orchestrator::new(empty, policy(1));
    assert_eq!(
        orchestrator
            .fetch_sentiment_summary(CommentSource::Latest, &labels)
            .await,
        None
    );
}

#[tokio::test]
async fn test_sentiment_summary_skips_request_without_labels() {
    let orchestrator = Orchestrator::new(FakeBackend::new(), policy(1));

    assert_eq!(
        orchestrator
            .fetch_sentiment_summary(CommentSource::Top, &[])
            .await,
        None
    );
    assert!(orchestrator.backend().visualization_calls.borrow().is_empty());
}

#[test]
fn test_sentiment_labels_by_source() {
    let comments = vec![
        comment("a", "positive", CommentSource::Top),
        comment("b", "neutral", CommentSource::Latest),
        comment("c", "negative", CommentSource::Top),
    ];

    assert_eq!(
        sentiment_labels(&comments, CommentSource::Top),
        vec!["positive", "negative"]
    );
    assert_eq!(
        sentiment_labels(&comments, CommentSource::Latest),
        vec!["neutral"]
    );
}

// ============================================================
// STATE MACHINE
// ============================================================

fn limits() -> CommentLimits {
    CommentLimits::uniform(50)
}

fn ready_state() -> PageState {
    let mut state = PageState::new(limits());
    assert!(state.apply(PageAction::Start {
        video_id: "abc".into()
    }));
    assert!(state.apply(PageAction::RecordResolved(record())));
    state
}

#[test]
fn test_comments_are_gated_on_record() {
    let mut state = PageState::new(limits());
    assert!(state.comment_request().is_none());
    assert_eq!(state.fetch_state().phase, Phase::Pending);

    state.apply(PageAction::Start {
        video_id: "abc".into(),
    });
    assert!(state.comment_request().is_none());
    assert!(state.summary_request(CommentSource::Top).is_none());

    // Comments arriving before the record are ignored
    assert!(!state.apply(PageAction::CommentsLoaded {
        limits: limits(),
        comments: vec![comment("early", "positive", CommentSource::Top)],
    }));

    state.apply(PageAction::RecordResolved(record()));
    let request = state.comment_request().unwrap();
    assert_eq!(request.video_id(), "abc");
    assert_eq!(request.limits(), limits());
    assert_eq!(state.fetch_state().phase, Phase::Ready);
}

#[test]
fn test_record_transitions_happen_once() {
    let mut state = ready_state();

    assert!(!state.apply(PageAction::RecordFailed("late failure".into())));
    assert!(!state.apply(PageAction::Start {
        video_id: "other".into()
    }));
    assert_eq!(state.fetch_state().phase, Phase::Ready);

    let mut failed = PageState::new(limits());
    failed.apply(PageAction::Start {
        video_id: "abc".into(),
    });
    assert!(failed.apply(PageAction::RecordFailed("gave up".into())));
    assert!(!failed.apply(PageAction::RecordResolved(record())));
    assert_eq!(failed.fetch_state().phase, Phase::Failed);
    assert_eq!(failed.fetch_state().error.as_deref(), Some("gave up"));
    assert!(failed.comment_request().is_none());
}

#[test]
fn test_stale_comment_results_are_discarded() {
    let mut state = ready_state();
    let new_limits = CommentLimits { top: 100, latest: 25 };

    assert!(state.apply(PageAction::SetLimits(new_limits)));
    assert!(state.ready().unwrap().comments_pending);

    // Response for the superseded limits arrives late
    assert!(!state.apply(PageAction::CommentsLoaded {
        limits: limits(),
        comments: vec![comment("old", "positive", CommentSource::Top)],
    }));
    assert!(state.ready().unwrap().comments.is_empty());

    assert!(state.apply(PageAction::CommentsLoaded {
        limits: new_limits,
        comments: vec![comment("new", "positive", CommentSource::Top)],
    }));
    let ready = state.ready().unwrap();
    assert!(!ready.comments_pending);
    assert_eq!(ready.comments[0].text, "new");
}

#[test]
fn test_changing_limits_keeps_record() {
    let mut state = ready_state();
    let before = state.ready().unwrap().record.clone();

    state.apply(PageAction::SetLimits(CommentLimits { top: 10, latest: 10 }));

    assert!(matches!(state.stage(), Stage::RecordReady(_)));
    assert_eq!(state.ready().unwrap().record, before);
    assert_eq!(state.comment_request().unwrap().limits().top, 10);
    // Same limits again is a no-op
    assert!(!state.apply(PageAction::SetLimits(CommentLimits { top: 10, latest: 10 })));
}

#[test]
fn test_summary_revision_follows_label_changes() {
    let mut state = ready_state();
    state.apply(PageAction::CommentsLoaded {
        limits: limits(),
        comments: vec![
            comment("a", "positive", CommentSource::Top),
            comment("b", "negative", CommentSource::Latest),
        ],
    });
    let top = state.summary_request(CommentSource::Top).unwrap();
    let latest = state.summary_request(CommentSource::Latest).unwrap();
    assert_eq!(top.labels().to_vec(), vec!["positive".to_string()]);

    assert!(state.apply(PageAction::SummaryLoaded {
        source: CommentSource::Top,
        revision: top.revision(),
        summary: Some(SentimentSummary {
            image_base64: "dG9w".into()
        }),
    }));

    // Only Latest changes on the next commit
    let new_limits = CommentLimits { top: 50, latest: 10 };
    state.apply(PageAction::SetLimits(new_limits));
    state.apply(PageAction::CommentsLoaded {
        limits: new_limits,
        comments: vec![
            comment("a", "positive", CommentSource::Top),
            comment("c", "neutral", CommentSource::Latest),
        ],
    });

    assert_eq!(state.summary_request(CommentSource::Top).unwrap(), top);
    assert!(state.ready().unwrap().summary(CommentSource::Top).is_some());
    assert_ne!(
        state.summary_request(CommentSource::Latest).unwrap().revision(),
        latest.revision()
    );

    // A summary computed from the old Latest labels is dropped
    assert!(!state.apply(PageAction::SummaryLoaded {
        source: CommentSource::Latest,
        revision: latest.revision(),
        summary: Some(SentimentSummary {
            image_base64: "b2xk".into()
        }),
    }));
    assert!(state.ready().unwrap().summary(CommentSource::Latest).is_none());
}

#[test]
fn test_source_without_comments_has_no_summary_request() {
    let mut state = ready_state();
    state.apply(PageAction::CommentsLoaded {
        limits: limits(),
        comments: vec![comment("a", "positive", CommentSource::Top)],
    });

    assert!(state.summary_request(CommentSource::Latest).is_none());
    assert!(state.ready().unwrap().summary_unavailable(CommentSource::Latest));
    assert!(!state.ready().unwrap().summary_unavailable(CommentSource::Top));
}

// ============================================================
// PIPELINE
// ============================================================

#[tokio::test]
async fn test_pipeline_runs_stages_in_order() {
    let mut backend = FakeBackend::new().not_ready_then_ready(2);
    backend.top = Ok(vec![item("c1", "positive"), item("c2", "negative")]);
    backend.latest = Ok(vec![item("c3", "neutral")]);
    let orchestrator = Orchestrator::new(backend, policy(8));
    let state = RefCell::new(PageState::new(limits()));
    let dispatch = |action: PageAction| {
        state.borrow_mut().apply(action);
    };

    run_record_stage(&orchestrator, "abc".to_string(), dispatch).await;
    assert_eq!(state.borrow().fetch_state().phase, Phase::Ready);
    assert!(orchestrator.backend().comment_calls.borrow().is_empty());

    let request = state.borrow().comment_request().unwrap();
    run_comment_stage(&orchestrator, request, dispatch).await;

    for source in CommentSource::ALL {
        let request = state.borrow().summary_request(source).unwrap();
        run_summary_stage(&orchestrator, request, dispatch).await;
    }

    let state = state.borrow();
    let ready = state.ready().unwrap();
    let texts: Vec<&str> = ready.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["c1", "c2", "c3"]);
    assert!(ready.summary(CommentSource::Top).is_some());
    assert!(ready.summary(CommentSource::Latest).is_some());
    assert_eq!(
        *orchestrator.backend().visualization_calls.borrow(),
        vec![
            vec!["positive".to_string(), "negative".to_string()],
            vec!["neutral".to_string()],
        ]
    );
}

#[tokio::test]
async fn test_pipeline_reports_resolution_failure() {
    let orchestrator = Orchestrator::new(FakeBackend::new(), policy(3));
    let state = RefCell::new(PageState::new(limits()));

    run_record_stage(&orchestrator, "abc".to_string(), |action| {
        state.borrow_mut().apply(action);
    })
    .await;

    let fetch_state = state.borrow().fetch_state();
    assert_eq!(fetch_state.phase, Phase::Failed);
    assert_eq!(
        fetch_state.error.as_deref(),
        Some("Video analysis unavailable after 3 attempt(s): Analysis for this video is not ready yet")
    );
    assert!(state.borrow().comment_request().is_none());
}
