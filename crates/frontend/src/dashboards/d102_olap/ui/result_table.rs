use contracts::shared::olap::{AggregationFunction, Measure, OlapResult};
use leptos::prelude::*;
use serde_json::Value;
use thaw::*;

use crate::shared::components::pagination_controls::{PaginationControls, DEFAULT_PAGE_SIZE};
use crate::shared::components::table::{format_number_int, format_number_with_decimals};
use crate::shared::list_utils::{page_count, paginate};

/// Header text for a result column: "toneladas_sum" -> "Toneladas (Suma)"
pub fn column_label(column: &str) -> String {
    if let Some((measure, function)) = column.rsplit_once('_') {
        let measure = Measure::ALL.into_iter().find(|m| m.as_str() == measure);
        let function = AggregationFunction::ALL
            .into_iter()
            .find(|f| f.as_str() == function);
        if let (Some(m), Some(f)) = (measure, function) {
            return format!("{} ({})", m.label(), f.label());
        }
    }
    let mut chars = column.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "—".to_string(),
        // years and month numbers stay unformatted
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) if i.abs() < 10_000 => i.to_string(),
            (Some(i), _) => format_number_int(i as f64),
            (None, Some(f)) => format_number_with_decimals(f, 2),
            _ => n.to_string(),
        },
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_numeric_column(result: &OlapResult, column: &str) -> bool {
    result
        .records
        .iter()
        .filter_map(|r| r.get(column))
        .any(Value::is_number)
}

/// Display text of one page of records, each cell paired with its numeric flag
fn page_cells(
    result: &OlapResult,
    columns: &[String],
    page: usize,
    page_size: usize,
) -> Vec<Vec<(String, bool)>> {
    let numeric: Vec<bool> = columns.iter().map(|c| is_numeric_column(result, c)).collect();
    paginate(&result.records, page, page_size)
        .iter()
        .map(|record| {
            columns
                .iter()
                .zip(numeric.iter())
                .map(|(c, &num)| (cell_text(record.get(c)), num))
                .collect()
        })
        .collect()
}

#[component]
pub fn OlapResultTable(#[prop(into)] result: Signal<OlapResult>) -> impl IntoView {
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(DEFAULT_PAGE_SIZE);

    Effect::new(move |_| {
        result.track();
        page.set(0);
    });

    let columns = Memo::new(move |_| result.with(|r| r.columns()));
    let total_count = Signal::derive(move || result.with(|r| r.records.len()));
    let total_pages = Signal::derive(move || page_count(total_count.get(), page_size.get()));

    view! {
        <div class="card olap-result-table">
            <h3 class="card__title">"Resultados detallados"</h3>
            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            {move || columns
                                .get()
                                .into_iter()
                                .map(|c| view! {
                                    <TableHeaderCell min_width=100.0>{column_label(&c)}</TableHeaderCell>
                                })
                                .collect_view()}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let cols = columns.get();
                            let rows = result.with(|r| page_cells(r, &cols, page.get(), page_size.get()));
                            rows.into_iter()
                                .map(|cells| {
                                    let cells = cells
                                        .into_iter()
                                        .map(|(text, numeric)| {
                                            let class = if numeric { "cell--number" } else { "" };
                                            view! { <TableCell class=class>{text}</TableCell> }
                                        })
                                        .collect_view();
                                    view! { <TableRow>{cells}</TableRow> }
                                })
                                .collect_view()
                        }}
                    </TableBody>
                </Table>
            </div>

            <PaginationControls
                current_page=page
                total_pages=total_pages
                total_count=total_count
                page_size=page_size
                on_page_change=Callback::new(move |p| page.set(p))
                on_page_size_change=Callback::new(move |size| {
                    page_size.set(size);
                    page.set(0);
                })
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_label() {
        assert_eq!(column_label("toneladas_sum"), "Toneladas (Suma)");
        assert_eq!(column_label("brix_median"), "Brix (Mediana)");
        assert_eq!(column_label("año"), "Año");
        assert_eq!(column_label("zona_id"), "Zona_id");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), "—");
        assert_eq!(cell_text(Some(&json!(null))), "—");
        assert_eq!(cell_text(Some(&json!(2024))), "2024");
        assert_eq!(cell_text(Some(&json!(12345.678))), "12.345,68");
        assert_eq!(cell_text(Some(&json!(150000))), "150.000");
        assert_eq!(cell_text(Some(&json!("Norte"))), "Norte");
    }

    #[test]
    fn test_page_cells() {
        let result: OlapResult = serde_json::from_value(json!({
            "records": [
                {"zona": "Norte", "toneladas_sum": 1500.5},
                {"zona": "Sur", "toneladas_sum": null},
                {"zona": "Centro", "toneladas_sum": 80}
            ]
        }))
        .unwrap();
        let columns = vec!["zona".to_string(), "toneladas_sum".to_string()];
        let page = page_cells(&result, &columns, 0, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0], vec![("Norte".to_string(), false), ("1.500,50".to_string(), true)]);
        assert_eq!(page[1][1], ("—".to_string(), true));
        let last = page_cells(&result, &columns, 1, 2);
        assert_eq!(last, vec![vec![("Centro".to_string(), false), ("80".to_string(), true)]]);
    }
}
