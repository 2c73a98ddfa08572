use super::{results_url, senti_comments_url, senti_visualization_url, AnalysisBackend};
use crate::error::FetchError;
use crate::models::{
    CommentItem, CommentSource, CommentsResponse, VideoRecord, VisualizationRequest,
    VisualizationResponse,
};
use gloo_net::http::{Request, Response};
use js_sys::{Function, Promise};
use std::time::Duration;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

const NOT_FOUND: u16 = 404;

/// [`AnalysisBackend`] over `gloo-net` for the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpBackend {
    backend_url: String,
}

impl HttpBackend {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
        }
    }
}

impl AnalysisBackend for HttpBackend {
    async fn get_results(&self, video_id: &str) -> Result<VideoRecord, FetchError> {
        let url = results_url(&self.backend_url, video_id);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if response.status() == NOT_FOUND {
            return Err(FetchError::NotReadyYet);
        }
        if !response.ok() {
            return Err(http_error(response).await);
        }

        response
            .json::<VideoRecord>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn get_senti_comments(
        &self,
        video_id: &str,
        source: CommentSource,
        limit: usize,
    ) -> Result<Vec<CommentItem>, FetchError> {
        let url = senti_comments_url(&self.backend_url, video_id, source, limit);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response).await);
        }

        response
            .json::<CommentsResponse>()
            .await
            .map(|body| body.comments)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn post_senti_visualization(
        &self,
        sentiment_labels: &[String],
    ) -> Result<Option<String>, FetchError> {
        let url = senti_visualization_url(&self.backend_url);
        let request_body = VisualizationRequest {
            sentiment_labels: sentiment_labels.to_vec(),
        };

        let response = Request::post(&url)
            .json(&request_body)
            .map_err(|e| FetchError::Transport(format!("Request error: {e}")))?
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(response).await);
        }

        response
            .json::<VisualizationResponse>()
            .await
            .map(|body| body.sentiment.filter(|image| !image.is_empty()))
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn pause(&self, delay: Duration) {
        timeout(delay).await;
    }
}

async fn http_error(response: Response) -> FetchError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    FetchError::Http { status, body }
}

/// Resolves after `delay` on the browser event loop.
async fn timeout(delay: Duration) {
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
        let scheduled = web_sys::window()
            .map(|window| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .is_ok()
            })
            .unwrap_or(false);

        if !scheduled {
            // No timer available; resolve immediately rather than hang.
            let _ = resolve.call0(&JsValue::NULL);
        }
    });

    if let Err(e) = JsFuture::from(promise).await {
        log::warn!("Retry timer failed: {:?}", e);
    }
}
