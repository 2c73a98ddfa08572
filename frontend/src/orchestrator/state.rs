use super::sentiment_labels;
use crate::models::{Comment, CommentSource, SentimentSummary, VideoRecord};
use log::debug;
use std::rc::Rc;
use yew::functional::Reducible;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentLimits {
    pub top: usize,
    pub latest: usize,
}

impl CommentLimits {
    pub fn uniform(limit: usize) -> Self {
        Self {
            top: limit,
            latest: limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Ready,
    Failed,
}

/// What the page shows about the record fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState {
    pub phase: Phase,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Idle,
    ResolvingRecord,
    RecordFailed(String),
    RecordReady(ReadyStage),
}

/// Everything that only exists once the record resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyStage {
    pub record: Rc<VideoRecord>,
    /// Last committed comment collection. Kept on screen while a refetch
    /// for new limits is in flight.
    pub comments: Rc<Vec<Comment>>,
    pub comments_pending: bool,
    top: SummarySlot,
    latest: SummarySlot,
}

impl ReadyStage {
    fn new(record: VideoRecord) -> Self {
        Self {
            record: Rc::new(record),
            comments: Rc::new(Vec::new()),
            comments_pending: true,
            top: SummarySlot::default(),
            latest: SummarySlot::default(),
        }
    }

    pub fn summary(&self, source: CommentSource) -> Option<&SentimentSummary> {
        self.slot(source).summary.as_ref()
    }

    /// True once the source's comments arrived and there is nothing to chart.
    pub fn summary_unavailable(&self, source: CommentSource) -> bool {
        !self.comments_pending && self.slot(source).labels.is_empty()
    }

    fn slot(&self, source: CommentSource) -> &SummarySlot {
        match source {
            CommentSource::Top => &self.top,
            CommentSource::Latest => &self.latest,
        }
    }

    fn slot_mut(&mut self, source: CommentSource) -> &mut SummarySlot {
        match source {
            CommentSource::Top => &mut self.top,
            CommentSource::Latest => &mut self.latest,
        }
    }
}

/// Output slot of one source's sentiment summary stage. `revision` moves
/// every time the labels it was derived from change.
#[derive(Debug, Clone, Default, PartialEq)]
struct SummarySlot {
    revision: u64,
    labels: Rc<Vec<String>>,
    summary: Option<SentimentSummary>,
}

/// Parameters for a comment stage run. Only handed out by a page whose
/// record is ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRequest {
    video_id: String,
    limits: CommentLimits,
}

impl CommentRequest {
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn limits(&self) -> CommentLimits {
        self.limits
    }
}

/// Parameters for one source's sentiment summary run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    source: CommentSource,
    revision: u64,
    labels: Rc<Vec<String>>,
}

impl SummaryRequest {
    pub fn source(&self) -> CommentSource {
        self.source
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    Start {
        video_id: String,
    },
    RecordResolved(VideoRecord),
    RecordFailed(String),
    SetLimits(CommentLimits),
    CommentsLoaded {
        limits: CommentLimits,
        comments: Vec<Comment>,
    },
    SummaryLoaded {
        source: CommentSource,
        revision: u64,
        summary: Option<SentimentSummary>,
    },
}

/// Page-level state for one results page load.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    video_id: Option<String>,
    limits: CommentLimits,
    stage: Stage,
}

impl PageState {
    pub fn new(limits: CommentLimits) -> Self {
        Self {
            video_id: None,
            limits,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn limits(&self) -> CommentLimits {
        self.limits
    }

    pub fn ready(&self) -> Option<&ReadyStage> {
        match &self.stage {
            Stage::RecordReady(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn fetch_state(&self) -> FetchState {
        match &self.stage {
            Stage::Idle | Stage::ResolvingRecord => FetchState {
                phase: Phase::Pending,
                error: None,
            },
            Stage::RecordReady(_) => FetchState {
                phase: Phase::Ready,
                error: None,
            },
            Stage::RecordFailed(message) => FetchState {
                phase: Phase::Failed,
                error: Some(message.clone()),
            },
        }
    }

    /// `None` until the record resolved; comments are never requested
    /// before that.
    pub fn comment_request(&self) -> Option<CommentRequest> {
        self.ready()?;
        Some(CommentRequest {
            video_id: self.video_id.clone()?,
            limits: self.limits,
        })
    }

    /// `None` until the record resolved or while `source` has no labels.
    /// Stays equal across commits that leave the labels alone.
    pub fn summary_request(&self, source: CommentSource) -> Option<SummaryRequest> {
        let slot = self.ready()?.slot(source);
        if slot.labels.is_empty() {
            return None;
        }
        Some(SummaryRequest {
            source,
            revision: slot.revision,
            labels: slot.labels.clone(),
        })
    }

    /// Applies one transition. Returns `false` when the action does not
    /// apply to the current stage or carries a stale result.
    pub fn apply(&mut self, action: PageAction) -> bool {
        match action {
            PageAction::Start { video_id } => {
                if self.stage != Stage::Idle {
                    return false;
                }
                self.video_id = Some(video_id);
                self.stage = Stage::ResolvingRecord;
                true
            }
            PageAction::RecordResolved(record) => {
                if self.stage != Stage::ResolvingRecord {
                    return false;
                }
                self.stage = Stage::RecordReady(ReadyStage::new(record));
                true
            }
            PageAction::RecordFailed(message) => {
                if self.stage != Stage::ResolvingRecord {
                    return false;
                }
                self.stage = Stage::RecordFailed(message);
                true
            }
            PageAction::SetLimits(limits) => {
                if limits == self.limits {
                    return false;
                }
                self.limits = limits;
                if let Stage::RecordReady(ready) = &mut self.stage {
                    ready.comments_pending = true;
                }
                true
            }
            PageAction::CommentsLoaded { limits, comments } => {
                if limits != self.limits {
                    debug!("Discarding comments fetched for stale limits {limits:?}");
                    return false;
                }
                let Stage::RecordReady(ready) = &mut self.stage else {
                    return false;
                };

                for source in CommentSource::ALL {
                    let labels = sentiment_labels(&comments, source);
                    let slot = ready.slot_mut(source);
                    if *slot.labels != labels {
                        slot.revision += 1;
                        slot.labels = Rc::new(labels);
                        slot.summary = None;
                    }
                }
                ready.comments = Rc::new(comments);
                ready.comments_pending = false;
                true
            }
            PageAction::SummaryLoaded {
                source,
                revision,
                summary,
            } => {
                let Stage::RecordReady(ready) = &mut self.stage else {
                    return false;
                };
                let slot = ready.slot_mut(source);
                if slot.revision != revision {
                    debug!(
                        "Discarding {} sentiment summary for stale revision {revision}",
                        source.label()
                    );
                    return false;
                }
                slot.summary = summary;
                true
            }
        }
    }
}

impl Reducible for PageState {
    type Action = PageAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}
