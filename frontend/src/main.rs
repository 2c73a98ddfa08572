mod api;
mod components;
mod config;
mod env_variable_utils;
mod error;
mod logging;
mod models;
mod orchestrator;
mod router;
mod table;
mod utils;

use crate::config::FETCH_CONFIG;
use crate::env_variable_utils::{get_app_name, is_debug_mode};
use crate::router::{switch, Route};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    logging::init_logger(is_debug_mode());
    yew::Renderer::<App>::new().render();

    log::info!(
        "NAME: \"{}\", API: \"{}\" DEBUG: \"{}\"",
        get_app_name(),
        FETCH_CONFIG.backend_url,
        is_debug_mode()
    );
}
