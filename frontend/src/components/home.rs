use crate::router::{ResultsQuery, Route};
use crate::utils::extract_video_id;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let navigator = use_navigator();
    let current_input = use_state(String::new);
    let error_message = use_state(|| None::<String>);

    let on_input = {
        let current_input = current_input.clone();
        Callback::from(move |e: InputEvent| {
            let input_value = e.target_unchecked_into::<HtmlInputElement>().value();
            current_input.set(input_value);
        })
    };

    let on_submit = {
        let current_input = current_input.clone();
        let error_message = error_message.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();

            let Some(video_id) = extract_video_id(&*current_input) else {
                error_message.set(Some("Please enter a YouTube link or video id".to_string()));
                return;
            };
            error_message.set(None);

            if let Some(navigator) = &navigator {
                let query = ResultsQuery { v: Some(video_id) };
                if let Err(e) = navigator.push_with_query(&Route::Results, &query) {
                    log::error!("Failed to open results page: {e}");
                }
            }
        })
    };

    html! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gray-50">
            <h1 class="text-4xl font-bold mb-4">{"YouTube Video Analysis"}</h1>
            <p class="mb-8 text-center max-w-md">
                {"To analyze a YouTube video, paste its link below, or replace the YouTube domain in the video URL with ours, for example:"}
            </p>
            <div class="p-4 bg-white shadow rounded mb-8">
                <code>{"/watch?v=YOUR_VIDEO_ID"}</code>
            </div>
            <form onsubmit={on_submit} class="flex w-full max-w-md">
                <input
                    type="text"
                    class="flex-grow p-3 border border-gray-300 rounded-l-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                    placeholder="https://www.youtube.com/watch?v=..."
                    value={(*current_input).clone()}
                    oninput={on_input}
                />
                <button
                    type="submit"
                    class="bg-blue-600 text-white p-3 rounded-r-lg hover:bg-blue-700"
                >
                    {"Analyze"}
                </button>
            </form>
            {
                if let Some(msg) = &*error_message {
                    html! { <p class="text-red-600 text-center mt-4">{ msg }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
