use crate::api::http::HttpBackend;
use crate::components::layout::Layout;
use crate::components::video_result::VideoResult;
use crate::config::FETCH_CONFIG;
use crate::models::CommentSource;
use crate::orchestrator::pipeline::{run_comment_stage, run_record_stage, run_summary_stage};
use crate::orchestrator::state::{CommentLimits, PageAction, PageState, Phase, SummaryRequest};
use crate::orchestrator::Orchestrator;
use crate::utils::embed_url;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

type PageOrchestrator = Orchestrator<HttpBackend>;

#[derive(Properties, PartialEq)]
pub struct ResultsPageProps {
    pub video_id: String,
}

/// Owns the page state machine and starts each fetch stage when the state
/// hands out a request for it.
#[function_component(ResultsPage)]
pub fn results_page(props: &ResultsPageProps) -> Html {
    let config = &*FETCH_CONFIG;
    let orchestrator = use_memo((), |_| {
        Orchestrator::new(HttpBackend::new(config.backend_url.clone()), config.retry)
    });
    let page = use_reducer(|| PageState::new(CommentLimits::uniform(config.comment_limit)));

    // Record resolution, once per page load
    {
        let orchestrator = orchestrator.clone();
        let dispatcher = page.dispatcher();
        use_effect_with(props.video_id.clone(), move |video_id| {
            let video_id = video_id.clone();
            spawn_local(async move {
                run_record_stage(&*orchestrator, video_id, |action| dispatcher.dispatch(action))
                    .await;
            });
            || ()
        });
    }

    // Comments; re-runs when the limits change
    {
        let orchestrator = orchestrator.clone();
        let dispatcher = page.dispatcher();
        use_effect_with(page.comment_request(), move |request| {
            if let Some(request) = request.clone() {
                spawn_local(async move {
                    run_comment_stage(&*orchestrator, request, |action| {
                        dispatcher.dispatch(action)
                    })
                    .await;
                });
            }
            || ()
        });
    }

    use_summary_stage(
        orchestrator.clone(),
        page.summary_request(CommentSource::Top),
        page.dispatcher(),
    );
    use_summary_stage(
        orchestrator.clone(),
        page.summary_request(CommentSource::Latest),
        page.dispatcher(),
    );

    let on_limit_change = {
        let dispatcher = page.dispatcher();
        Callback::from(move |limit: usize| {
            dispatcher.dispatch(PageAction::SetLimits(CommentLimits::uniform(limit)));
        })
    };

    let fetch_state = page.fetch_state();
    let body = match (fetch_state.phase, page.ready()) {
        (Phase::Failed, _) => html! {
            <p class="text-red-500">{ fetch_state.error.unwrap_or_default() }</p>
        },
        (Phase::Ready, Some(ready)) => html! {
            <>
                <div class="w-full aspect-video mb-8">
                    <iframe
                        width="100%"
                        height="100%"
                        src={embed_url(&props.video_id)}
                        frameborder="0"
                        allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                        allowfullscreen={true}
                        title="YouTube Video Player"
                    ></iframe>
                </div>
                <VideoResult
                    record={ready.record.clone()}
                    top_summary={ready.summary(CommentSource::Top).cloned()}
                    latest_summary={ready.summary(CommentSource::Latest).cloned()}
                    top_summary_unavailable={ready.summary_unavailable(CommentSource::Top)}
                    latest_summary_unavailable={ready.summary_unavailable(CommentSource::Latest)}
                    comments={ready.comments.clone()}
                    comments_pending={ready.comments_pending}
                    comment_limit={page.limits().top}
                    on_limit_change={on_limit_change}
                />
            </>
        },
        _ => html! { <p>{"Loading video data..."}</p> },
    };

    html! {
        <Layout>
            { body }
        </Layout>
    }
}

#[hook]
fn use_summary_stage(
    orchestrator: Rc<PageOrchestrator>,
    request: Option<SummaryRequest>,
    dispatcher: UseReducerDispatcher<PageState>,
) {
    use_effect_with(request, move |request| {
        if let Some(request) = request.clone() {
            spawn_local(async move {
                run_summary_stage(&*orchestrator, request, |action| dispatcher.dispatch(action))
                    .await;
            });
        }
        || ()
    });
}
