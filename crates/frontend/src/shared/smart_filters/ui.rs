use contracts::shared::filters::{FilterKey, FilterSelection};
use leptos::prelude::*;
use thaw::*;

use super::hook::SmartFilters;
use super::state::FilterStatus;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::date_utils::format_time_precise;
use crate::shared::icons::icon;

/// Cascading year -> month -> zone -> {variety, top farms} selects.
#[component]
pub fn SmartFiltersPanel(filters: SmartFilters) -> impl IntoView {
    let is_expanded = RwSignal::new(true);
    let active_count = Signal::derive(move || filters.selection().len());

    view! {
        <FilterPanel
            is_expanded=is_expanded
            active_filters_count=active_count
            actions=move || view! {
                <ButtonGroup>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        disabled=Signal::derive(move || filters.history().is_empty())
                        on_click=move |_| filters.undo_last_change()
                    >
                        {icon("undo")}
                        " Deshacer"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| filters.clear_filters()
                    >
                        {icon("trash")}
                        " Limpiar"
                    </Button>
                </ButtonGroup>
            }
            filter_content=move || view! {
                <div class="smart-filters__grid">
                    {FilterKey::ALL
                        .into_iter()
                        .map(|key| view! { <FilterSelect filters=filters filter_key=key /> })
                        .collect_view()}
                </div>
                <Show when=move || filters.is_loading()>
                    <div class="smart-filters__loading">
                        <Spinner size=SpinnerSize::Tiny />
                        <span>"Actualizando opciones..."</span>
                    </div>
                </Show>
                {move || filters.tree_end_message().map(|msg| view! {
                    <div class="smart-filters__tree-end">{icon("leaf")}<span>{msg}</span></div>
                })}
                {move || {
                    let farms = filters.farm_count();
                    (farms > 0 && !filters.selection().is_empty()).then(|| view! {
                        <div class="smart-filters__hint">
                            {format!("{} fincas coinciden con la selección", farms)}
                        </div>
                    })
                }}
                <FilterHistory filters=filters />
            }
            filter_tags=move || view! {
                <div class="filter-tags">
                    {move || filters
                        .active_labels()
                        .into_iter()
                        .map(|(key, label)| {
                            let text = format!("{}: {}", key.label(), label);
                            view! {
                                <FilterTag
                                    label=text
                                    on_remove=Callback::new(move |_| filters.update_filter(key, String::new()))
                                />
                            }
                        })
                        .collect_view()}
                </div>
            }
        />
    }
}

#[component]
fn FilterSelect(filters: SmartFilters, filter_key: FilterKey) -> impl IntoView {
    let status = move || filters.status(filter_key);
    let current = move || {
        filters
            .selection()
            .get(filter_key)
            .map(|v| v.option_value())
            .unwrap_or_default()
    };

    view! {
        <div class=move || format!("smart-filter smart-filter--{}", status().css_modifier())>
            <label class="smart-filter__label">
                <span class="smart-filter__dot"></span>
                {filter_key.label()}
            </label>
            <select
                class="smart-filter__select"
                disabled=move || status() == FilterStatus::Blocked
                prop:value=current
                on:change=move |ev| filters.update_filter(filter_key, event_target_value(&ev))
            >
                <option value="">{placeholder(filter_key)}</option>
                {move || filters
                    .options(filter_key)
                    .into_iter()
                    .map(|opt| {
                        let text = if opt.count > 0 {
                            format!("{} ({})", opt.label, opt.count)
                        } else {
                            opt.label.clone()
                        };
                        view! { <option value=opt.value>{text}</option> }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn FilterHistory(filters: SmartFilters) -> impl IntoView {
    view! {
        {move || {
            let history = filters.history();
            (!history.is_empty()).then(|| view! {
                <div class="smart-filters__history">
                    <div class="smart-filters__history-title">{icon("history")}" Historial"</div>
                    {history
                        .into_iter()
                        .enumerate()
                        .rev()
                        .map(|(index, entry)| {
                            let time = format_time_precise(&entry.timestamp);
                            let summary = describe_selection(&entry.selection);
                            view! {
                                <button
                                    class="smart-filters__history-item"
                                    on:click=move |_| filters.restore_from_history(index)
                                >
                                    <span class="smart-filters__history-time">{time}</span>
                                    <span>{summary}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            })
        }}
    }
}

fn placeholder(key: FilterKey) -> &'static str {
    match key {
        FilterKey::Year => "Todos los años",
        FilterKey::Month => "Todos los meses",
        FilterKey::Zone => "Todas las zonas",
        FilterKey::Variety => "Todas las variedades",
        FilterKey::TopFarms => "Todas las fincas",
    }
}

/// "Año 2024 · Mes 3" summary of a snapshot.
fn describe_selection(selection: &FilterSelection) -> String {
    selection
        .values()
        .iter()
        .map(|v| format!("{} {}", v.key().label(), v.option_value()))
        .collect::<Vec<_>>()
        .join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_selection() {
        let selection = FilterSelection {
            year: Some(2024),
            month: Some(3),
            top_farms: Some(10),
            ..Default::default()
        };
        assert_eq!(describe_selection(&selection), "Año 2024 · Mes 3 · Top Fincas 10");
        assert_eq!(describe_selection(&FilterSelection::default()), "");
    }
}
