use crate::components::comments_table::CommentsTable;
use crate::models::{Comment, CommentSource, SentimentSummary, VideoRecord};
use crate::utils::{format_field_value, image_data_url};
use js_sys::Reflect;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys::Event;
use yew::prelude::*;

pub const COMMENT_LIMIT_OPTIONS: [usize; 4] = [25, 50, 100, 200];

#[derive(Properties, PartialEq)]
pub struct VideoResultProps {
    pub record: Rc<VideoRecord>,
    pub top_summary: Option<SentimentSummary>,
    pub latest_summary: Option<SentimentSummary>,
    pub top_summary_unavailable: bool,
    pub latest_summary_unavailable: bool,
    pub comments: Rc<Vec<Comment>>,
    pub comments_pending: bool,
    pub comment_limit: usize,
    pub on_limit_change: Callback<usize>,
}

#[function_component(VideoResult)]
pub fn video_result(props: &VideoResultProps) -> Html {
    let record = &props.record;

    html! {
        <div class="space-y-8">
            <VideoInfoTable record={record.clone()} />

            <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
                <ImagePanel
                    title="Top Comments Word Cloud"
                    alt="Word Cloud Relevance"
                    image={record.word_cloud(CommentSource::Top).map(image_data_url)}
                />
                <ImagePanel
                    title="Latest Comments Word Cloud"
                    alt="Word Cloud Time"
                    image={record.word_cloud(CommentSource::Latest).map(image_data_url)}
                />
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
                <ImagePanel
                    title="Top Comments Sentiment"
                    alt="Sentiment Relevance"
                    image={props.top_summary.as_ref().map(SentimentSummary::data_url)}
                    unavailable={props.top_summary_unavailable}
                />
                <ImagePanel
                    title="Latest Comments Sentiment"
                    alt="Sentiment Time"
                    image={props.latest_summary.as_ref().map(SentimentSummary::data_url)}
                    unavailable={props.latest_summary_unavailable}
                />
            </div>

            <CommentLimitSelect
                limit={props.comment_limit}
                on_change={props.on_limit_change.clone()}
            />
            <CommentsTable
                comments={props.comments.clone()}
                loading={props.comments_pending}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoInfoTableProps {
    pub record: Rc<VideoRecord>,
}

#[function_component(VideoInfoTable)]
pub fn video_info_table(props: &VideoInfoTableProps) -> Html {
    html! {
        <div>
            <h2 class="text-2xl font-semibold mb-4">{"Video Information"}</h2>
            <div class="overflow-x-auto">
                <table class="min-w-full border border-gray-700">
                    <thead>
                        <tr class="bg-gray-800">
                            <th class="px-4 py-2 text-left">{"Field"}</th>
                            <th class="px-4 py-2 text-left">{"Value"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-700">
                        {
                            props.record.display_fields().map(|(key, value)| html! {
                                <tr key={key.to_string()}>
                                    <td class="px-4 py-2 border-r border-gray-700">{ key }</td>
                                    <td class="px-4 py-2">{ format_field_value(value) }</td>
                                </tr>
                            }).collect::<Html>()
                        }
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ImagePanelProps {
    pub title: AttrValue,
    pub alt: AttrValue,
    pub image: Option<String>,
    /// Nothing will arrive for this panel; show a note instead of a loader.
    #[prop_or_default]
    pub unavailable: bool,
}

#[function_component(ImagePanel)]
pub fn image_panel(props: &ImagePanelProps) -> Html {
    let content = match (&props.image, props.unavailable) {
        (Some(src), _) => html! {
            <img src={src.clone()} alt={props.alt.clone()} class="mx-auto rounded shadow-lg" />
        },
        (None, true) => html! {
            <p class="text-center text-gray-400">{"No comments to summarize."}</p>
        },
        (None, false) => html! {
            <div class="flex justify-center items-center h-40">
                <div class="loader" />
            </div>
        },
    };

    html! {
        <div>
            <h2 class="text-2xl font-semibold mb-4">{ props.title.clone() }</h2>
            { content }
        </div>
    }
}

// Helper to read "value" from any event target without HtmlSelectElement.
pub fn event_value(e: &Event) -> Option<String> {
    let target = e.target()?;
    let js_value = Reflect::get(target.as_ref(), &JsValue::from_str("value")).ok()?;
    js_value.as_string()
}

#[derive(Properties, PartialEq)]
pub struct CommentLimitSelectProps {
    pub limit: usize,
    pub on_change: Callback<usize>,
}

#[function_component(CommentLimitSelect)]
pub fn comment_limit_select(props: &CommentLimitSelectProps) -> Html {
    let on_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(limit) = event_value(&e).and_then(|v| v.parse::<usize>().ok()) {
                on_change.emit(limit);
            }
        })
    };

    let mut options = COMMENT_LIMIT_OPTIONS.to_vec();
    if !options.contains(&props.limit) {
        options.push(props.limit);
        options.sort_unstable();
    }

    html! {
        <div class="flex items-center justify-end">
            <label class="mr-2">{"Comments per source:"}</label>
            <select
                onchange={on_change}
                class="px-2 py-1 rounded bg-gray-800 text-white border border-gray-700"
            >
                {
                    for options.into_iter().map(|limit| html! {
                        <option value={limit.to_string()} selected={limit == props.limit}>
                            { limit.to_string() }
                        </option>
                    })
                }
            </select>
        </div>
    }
}
