use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

/// Header cell that toggles the table sort on click and shows ▲/▼/⇅
#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,

    /// Column key passed to `Sortable::compare_by_field`
    #[prop(into)]
    sort_field: String,

    #[prop(into)] current_sort_field: Signal<String>,

    #[prop(into)] sort_ascending: Signal<bool>,

    on_sort: Callback<String>,

    #[prop(optional, default = 90.0)] min_width: f64,

    /// "left" or "right" (numeric columns)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let field_for_click = sort_field.clone();
    let field_for_indicator = sort_field.clone();
    let field_for_class = sort_field;

    let header_class = if align == "right" {
        "table__sortable-header table__sortable-header--right"
    } else {
        "table__sortable-header"
    };

    view! {
        <TableHeaderCell min_width=min_width>
            <div class=header_class on:click=move |_| on_sort.run(field_for_click.clone())>
                {label}
                <span class=move || get_sort_class(&current_sort_field.get(), &field_for_class)>
                    {move || get_sort_indicator(
                        &current_sort_field.get(),
                        &field_for_indicator,
                        sort_ascending.get(),
                    )}
                </span>
            </div>
        </TableHeaderCell>
    }
}
