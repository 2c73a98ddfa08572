use crate::components::home::HomePage;
use crate::components::layout::Layout;
use crate::components::results_page::ResultsPage;
use serde::{Deserialize, Serialize};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/results")]
    Results,
    // Same page under YouTube's own path, so swapping the domain works
    #[at("/watch")]
    Watch,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Query string of the results page: `?v={video_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<String>,
}

impl ResultsQuery {
    pub fn video_id(&self) -> Option<&str> {
        self.v.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <HomePage /> },
        Route::Results | Route::Watch => html! { <ResultsRoute /> },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-700">
                <div class="bg-white p-8 rounded-lg shadow-lg text-center">
                    <h1 class="text-2xl font-bold text-gray-800 mb-4">{"404 - Page Not Found"}</h1>
                    <Link<Route> to={Route::Home} classes="text-blue-600 hover:underline">
                        {"Go back to the start page"}
                    </Link<Route>>
                </div>
            </div>
        },
    }
}

#[function_component(ResultsRoute)]
fn results_route() -> Html {
    let query = use_location()
        .and_then(|location| location.query::<ResultsQuery>().ok())
        .unwrap_or_default();

    match query.video_id() {
        // Keyed so another video id starts a fresh page load
        Some(video_id) => html! {
            <ResultsPage key={video_id.to_string()} video_id={video_id.to_string()} />
        },
        None => html! {
            <Layout>
                <p class="mb-4">{"No video selected."}</p>
                <Link<Route> to={Route::Home} classes="text-blue-400 underline">
                    {"Analyze a video"}
                </Link<Route>>
            </Layout>
        },
    }
}
