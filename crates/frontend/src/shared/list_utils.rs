/// List helpers shared by the tables: search, sort, paging and the search box
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;

/// Minimum query length before search kicks in
pub const MIN_SEARCH_LEN: usize = 2;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Rows that can be matched against a free-text query
pub trait Searchable {
    /// `filter` is already lowercased and trimmed
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Rows that can be ordered by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Normalised query, or None when it is too short to filter by
pub fn normalize_query(filter: &str) -> Option<String> {
    let trimmed = filter.trim();
    (trimmed.chars().count() >= MIN_SEARCH_LEN).then(|| trimmed.to_lowercase())
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    match normalize_query(filter) {
        Some(query) => items
            .into_iter()
            .filter(|item| item.matches_filter(&query))
            .collect(),
        None => items,
    }
}

/// Number of pages for `total` rows; at least one so "1 / 1" renders for empty tables
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Slice for a 0-indexed page, clamped to the last page
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page_size == 0 || items.is_empty() {
        return Vec::new();
    }
    let last_page = page_count(items.len(), page_size) - 1;
    let start = page.min(last_page) * page_size;
    let end = (start + page_size).min(items.len());
    items[start..end].to_vec()
}

/// f64 ordering where NaN sorts last
pub fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| b.is_nan().cmp(&a.is_nan()).reverse())
}

/// Indicator shown next to a header label
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "sort-indicator sort-indicator--active"
    } else {
        "sort-indicator"
    }
}

/// Next (field, ascending) after a click on `field`
pub fn toggle_sort(current_field: &str, ascending: bool, field: &str) -> (String, bool) {
    if current_field == field {
        (field.to_string(), !ascending)
    } else {
        (field.to_string(), true)
    }
}

/// Search box with a 300 ms debounce and a clear button
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let generation = StoredValue::new(0u64);

    let handle_input = move |new_value: String| {
        set_input_value.set(new_value.clone());
        generation.update_value(|g| *g += 1);
        let issued = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.try_get_value() == Some(issued) {
                on_change.run(new_value);
            }
        });
    };

    let clear = move |_| {
        generation.update_value(|g| *g += 1);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    let is_active = move || normalize_query(&value.get()).is_some();

    view! {
        <div class="search-input">
            <span class="search-input__icon">{crate::shared::icons::icon("search")}</span>
            <input
                type="text"
                class=move || if is_active() { "search-input__field search-input__field--active" } else { "search-input__field" }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" title="Limpiar búsqueda" on:click=clear>
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        name: &'static str,
        value: f64,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            self.name.to_lowercase().contains(filter)
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "value" => compare_f64(self.value, other.value),
                _ => self.name.cmp(other.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "La Esperanza", value: 3.0 },
            Row { name: "El Paraíso", value: 1.0 },
            Row { name: "San José", value: 2.0 },
        ]
    }

    #[test]
    fn test_filter_list_ignores_short_queries() {
        assert_eq!(filter_list(rows(), "e").len(), 3);
        assert_eq!(filter_list(rows(), "  ").len(), 3);
    }

    #[test]
    fn test_filter_list_case_insensitive() {
        let found = filter_list(rows(), "PARA");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "El Paraíso");
    }

    #[test]
    fn test_sort_list_both_directions() {
        let mut items = rows();
        sort_list(&mut items, "value", true);
        assert_eq!(items.iter().map(|r| r.value).collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
        sort_list(&mut items, "value", false);
        assert_eq!(items[0].name, "La Esperanza");
    }

    #[test]
    fn test_compare_f64_nan_last() {
        let mut values = vec![2.0, f64::NAN, 1.0];
        values.sort_by(|a, b| compare_f64(*a, *b));
        assert_eq!(values[0], 1.0);
        assert_eq!(values[1], 2.0);
        assert!(values[2].is_nan());
    }

    #[test]
    fn test_paginate_and_page_count() {
        let items: Vec<u32> = (0..60).collect();
        assert_eq!(page_count(60, 25), 3);
        assert_eq!(page_count(0, 25), 1);
        assert_eq!(paginate(&items, 0, 25).len(), 25);
        assert_eq!(paginate(&items, 2, 25), (50..60).collect::<Vec<_>>());
        // past the end clamps to the last page
        assert_eq!(paginate(&items, 9, 25), (50..60).collect::<Vec<_>>());
        assert!(paginate::<u32>(&[], 0, 25).is_empty());
    }

    #[test]
    fn test_toggle_sort() {
        assert_eq!(toggle_sort("tonnage", true, "tonnage"), ("tonnage".to_string(), false));
        assert_eq!(toggle_sort("tonnage", false, "tch"), ("tch".to_string(), true));
        assert_eq!(get_sort_indicator("tch", "tch", false), " ▼");
        assert_eq!(get_sort_indicator("tch", "brix", true), " ⇅");
    }
}
