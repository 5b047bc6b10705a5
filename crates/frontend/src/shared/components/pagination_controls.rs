use crate::shared::icons::icon;
use leptos::prelude::*;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// First / previous / "n / m (total)" / next / last plus a page-size select
#[component]
pub fn PaginationControls(
    /// Current page (0-indexed)
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)] total_pages: Signal<usize>,

    #[prop(into)] total_count: Signal<usize>,

    #[prop(into)] page_size: Signal<usize>,

    on_page_change: Callback<usize>,

    on_page_size_change: Callback<usize>,

    /// Defaults to [10, 25, 50, 100]
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| vec![10, 25, 50, 100]);
    let at_start = move || current_page.get() == 0;
    let at_end = move || current_page.get() + 1 >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=at_start
                title="Primera página"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1))
                disabled=at_start
                title="Página anterior"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!(
                    "{} / {} ({} registros)",
                    current_page.get() + 1,
                    total_pages.get().max(1),
                    total_count.get(),
                )}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if !at_end() {
                        on_page_change.run(current_page.get() + 1);
                    }
                }
                disabled=at_end
                title="Página siguiente"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().saturating_sub(1))
                disabled=at_end
                title="Última página"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let size = event_target_value(&ev).parse().unwrap_or(DEFAULT_PAGE_SIZE);
                    on_page_size_change.run(size);
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts
                    .into_iter()
                    .map(|size| view! {
                        <option value=size.to_string() selected=move || page_size.get() == size>
                            {format!("{} por página", size)}
                        </option>
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
