use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record keys that carry embedded artifacts or raw per-source payloads.
/// They stay in the record but never show up in the info table.
pub const DISPLAY_EXCLUDED_KEYS: [&str; 6] = [
    "wordCloud_rel",
    "wordCloud_time",
    "comments_rel",
    "comments_time",
    "senti_rel",
    "senti_time",
];

pub fn is_display_excluded(key: &str) -> bool {
    DISPLAY_EXCLUDED_KEYS.contains(&key)
}

/// The flat JSON object returned by `/results` for one analyzed video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoRecord {
    fields: Map<String, Value>,
}

impl VideoRecord {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    pub fn word_cloud(&self, source: CommentSource) -> Option<&str> {
        self.get(source.word_cloud_key())
            .and_then(Value::as_str)
            .filter(|image| !image.is_empty())
    }

    /// Fields meant for the info table, in backend order.
    pub fn display_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter(|(key, _)| !is_display_excluded(key))
            .map(|(key, value)| (key.as_str(), value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentSource {
    Top,
    Latest,
}

impl CommentSource {
    pub const ALL: [CommentSource; 2] = [CommentSource::Top, CommentSource::Latest];

    /// Value of the `type` query parameter on `/senti_comments`.
    pub fn query_type(self) -> &'static str {
        match self {
            CommentSource::Top => "rel",
            CommentSource::Latest => "time",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CommentSource::Top => "Top",
            CommentSource::Latest => "Latest",
        }
    }

    fn word_cloud_key(self) -> &'static str {
        match self {
            CommentSource::Top => "wordCloud_rel",
            CommentSource::Latest => "wordCloud_time",
        }
    }
}

/// Sentiment label attached to a comment by the backend. Labels outside the
/// known three are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl Sentiment {
    pub fn label(&self) -> &str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Other(label) => label,
        }
    }
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        match label.as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            "neutral" => Sentiment::Neutral,
            _ => Sentiment::Other(label),
        }
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub sentiment: Sentiment,
    pub source: CommentSource,
}

/// One entry of the `/senti_comments` payload, before it is tagged with
/// the source it was requested for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentItem {
    #[serde(alias = "comment")]
    pub text: String,
    pub sentiment: Sentiment,
}

impl CommentItem {
    pub fn tag(self, source: CommentSource) -> Comment {
        Comment {
            text: self.text,
            sentiment: self.sentiment,
            source,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<CommentItem>,
}

#[derive(Debug, Serialize)]
pub struct VisualizationRequest {
    pub sentiment_labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VisualizationResponse {
    pub sentiment: Option<String>,
}

/// Sentiment chart rendered by the backend for one comment source.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSummary {
    pub image_base64: String,
}

impl SentimentSummary {
    pub fn data_url(&self) -> String {
        crate::utils::image_data_url(&self.image_base64)
    }
}
