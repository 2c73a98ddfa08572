use crate::env_variable_utils::get_app_name;
use chrono::Datelike;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Html,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let app_name = get_app_name();
    let year = chrono::Utc::now().year();

    html! {
        <div class="min-h-screen bg-gray-900 text-white">
            <header class="bg-gray-800 p-4">
                <h1 class="text-2xl font-bold">{ &app_name }</h1>
            </header>
            <main class="p-4">{ props.children.clone() }</main>
            <footer class="bg-gray-800 p-4 text-center text-sm">
                { format!("© {year} {app_name}") }
            </footer>
        </div>
    }
}
