use crate::components::video_result::event_value;
use crate::models::Comment;
use crate::table::config::{SortColumn, ViewConfig, PAGE_SIZE_OPTIONS};
use crate::table::view::compute_view;
use std::rc::Rc;
use web_sys::{Event, HtmlInputElement};
use yew::prelude::*;

const COLUMNS: [SortColumn; 3] = [SortColumn::Text, SortColumn::Sentiment, SortColumn::Source];

#[derive(Properties, PartialEq)]
pub struct CommentsTableProps {
    pub comments: Rc<Vec<Comment>>,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(CommentsTable)]
pub fn comments_table(props: &CommentsTableProps) -> Html {
    let config = use_state(ViewConfig::default);
    let view = use_memo(
        (props.comments.clone(), (*config).clone()),
        |(comments, config)| compute_view(comments, config),
    );

    // Keep the current page inside the filtered range
    {
        let config = config.clone();
        use_effect_with(view.filtered_count, move |filtered_count| {
            let mut next = (*config).clone();
            if next.clamp_page(*filtered_count) {
                config.set(next);
            }
            || ()
        });
    }

    let on_search = {
        let config = config.clone();
        Callback::from(move |e: InputEvent| {
            let input_value = e.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*config).clone();
            next.set_search_text(input_value);
            config.set(next);
        })
    };

    let on_page_size = {
        let config = config.clone();
        Callback::from(move |e: Event| {
            if let Some(page_size) = event_value(&e).and_then(|v| v.parse::<usize>().ok()) {
                let mut next = (*config).clone();
                next.set_page_size(page_size);
                config.set(next);
            }
        })
    };

    let on_sort = {
        let config = config.clone();
        Callback::from(move |column: SortColumn| {
            let mut next = (*config).clone();
            next.toggle_sort(column);
            config.set(next);
        })
    };

    let total_pages = view.total_pages;
    let current_page = config.effective_page().min(total_pages);

    let on_previous = {
        let config = config.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*config).clone();
            next.previous_page(total_pages);
            config.set(next);
        })
    };

    let on_next = {
        let config = config.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*config).clone();
            next.next_page(total_pages);
            config.set(next);
        })
    };

    let body = if view.is_empty() {
        let message = if props.loading {
            "Loading comments..."
        } else {
            "No data"
        };
        html! {
            <tr>
                <td colspan="3" class="px-4 py-2 text-center">{ message }</td>
            </tr>
        }
    } else {
        view.rows
            .iter()
            .enumerate()
            .map(|(index, comment)| {
                html! {
                    <tr key={index} class="border-t border-gray-700">
                        <td class="px-4 py-2">{ &comment.text }</td>
                        <td class="px-4 py-2">{ comment.sentiment.label() }</td>
                        <td class="px-4 py-2">{ comment.source.label() }</td>
                    </tr>
                }
            })
            .collect::<Html>()
    };

    html! {
        <div class="mt-8">
            <h2 class="text-2xl font-semibold mb-4">{"Comments"}</h2>
            <div class="flex items-center justify-between mb-4">
                <input
                    type="text"
                    placeholder="Search comments..."
                    value={config.search_text.clone()}
                    oninput={on_search}
                    class="px-3 py-2 rounded bg-gray-800 text-white border border-gray-700"
                />
                <div>
                    <label class="mr-2">{"Rows per page:"}</label>
                    <select
                        onchange={on_page_size}
                        class="px-2 py-1 rounded bg-gray-800 text-white border border-gray-700"
                    >
                        {
                            for PAGE_SIZE_OPTIONS.iter().map(|&size| html! {
                                <option value={size.to_string()} selected={size == config.page_size}>
                                    { size.to_string() }
                                </option>
                            })
                        }
                    </select>
                </div>
            </div>

            <div class="overflow-x-auto">
                <table class="w-full border border-gray-700">
                    <thead>
                        <tr class="bg-gray-800">
                            {
                                for COLUMNS.iter().map(|&column| {
                                    let on_sort = on_sort.clone();
                                    let indicator = config.sort_indicator(column).unwrap_or_default();
                                    html! {
                                        <th
                                            class="px-4 py-2 text-left cursor-pointer"
                                            onclick={Callback::from(move |_: MouseEvent| on_sort.emit(column))}
                                        >
                                            { format!("{} {}", column.display_name(), indicator) }
                                        </th>
                                    }
                                })
                            }
                        </tr>
                    </thead>
                    <tbody>
                        { body }
                    </tbody>
                </table>
            </div>

            <div class="flex items-center justify-between mt-4">
                <button
                    onclick={on_previous}
                    disabled={current_page <= 1}
                    class="px-3 py-1 rounded bg-gray-800 text-white border border-gray-700 disabled:opacity-50"
                >
                    {"Previous"}
                </button>
                <span>
                    { format!("Page {} of {}", current_page, total_pages) }
                </span>
                <button
                    onclick={on_next}
                    disabled={current_page >= total_pages}
                    class="px-3 py-1 rounded bg-gray-800 text-white border border-gray-700 disabled:opacity-50"
                >
                    {"Next"}
                </button>
            </div>
        </div>
    }
}
