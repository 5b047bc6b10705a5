use contracts::domain::harvest::HarvestRecord;
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::*;

use crate::shared::components::pagination_controls::{PaginationControls, DEFAULT_PAGE_SIZE};
use crate::shared::components::table::{format_number_with_decimals, SortableHeaderCell};
use crate::shared::export::{export_rows, ExportFormat, Exportable};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    compare_f64, filter_list, page_count, paginate, sort_list, toggle_sort, SearchInput, Searchable,
    Sortable,
};

pub const EXPORT_PREFIX: &str = "cosecha_data";

impl Searchable for HarvestRecord {
    fn matches_filter(&self, filter: &str) -> bool {
        [&self.farm, &self.variety, &self.zone]
            .iter()
            .any(|field| field.to_lowercase().contains(filter))
            || self
                .month_name
                .as_ref()
                .is_some_and(|m| m.to_lowercase().contains(filter))
            || self.year.is_some_and(|y| y.to_string() == filter)
    }
}

impl Sortable for HarvestRecord {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "farm" => self.farm.to_lowercase().cmp(&other.farm.to_lowercase()),
            "variety" => self.variety.to_lowercase().cmp(&other.variety.to_lowercase()),
            "zone" => self.zone.to_lowercase().cmp(&other.zone.to_lowercase()),
            "period" => (self.year, self.month).cmp(&(other.year, other.month)),
            "tch" => compare_f64(self.tch, other.tch),
            "area" => compare_f64(self.harvested_area, other.harvested_area),
            "brix" => compare_f64(self.brix, other.brix),
            "sucrose" => compare_f64(self.sucrose, other.sucrose),
            "yield" => compare_f64(self.theoretical_yield, other.theoretical_yield),
            _ => compare_f64(self.tonnage, other.tonnage),
        }
    }
}

impl Exportable for HarvestRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "Finca",
            "Variedad",
            "Zona",
            "Año",
            "Mes",
            "Toneladas Caña Molida",
            "TCH (t/ha)",
            "Área Cosechada",
            "Brix (%)",
            "Sacarosa (%)",
            "Rendimiento Teórico",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.farm.clone(),
            self.variety.clone(),
            self.zone.clone(),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.month.map(|m| m.to_string()).unwrap_or_default(),
            self.tonnage.to_string(),
            self.tch.to_string(),
            self.harvested_area.to_string(),
            self.brix.to_string(),
            self.sucrose.to_string(),
            self.theoretical_yield.to_string(),
        ]
    }
}

/// Search then sort; paging happens on the result
pub fn visible_rows(records: Vec<HarvestRecord>, query: &str, field: &str, ascending: bool) -> Vec<HarvestRecord> {
    let mut rows = filter_list(records, query);
    sort_list(&mut rows, field, ascending);
    rows
}

fn period_label(record: &HarvestRecord) -> String {
    match (record.month_name.as_deref(), record.month, record.year) {
        (Some(name), _, Some(year)) if !name.is_empty() => format!("{} {}", name, year),
        (_, Some(month), Some(year)) => format!("{:02}/{}", month, year),
        (_, _, Some(year)) => year.to_string(),
        _ => "—".to_string(),
    }
}

#[component]
pub fn HarvestTable(
    #[prop(into)] records: Signal<Vec<HarvestRecord>>,
    #[prop(into)] title: String,
) -> impl IntoView {
    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new("tonnage".to_string());
    let sort_ascending = RwSignal::new(false);
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(DEFAULT_PAGE_SIZE);
    let export_error = RwSignal::new(None::<String>);
    let title = StoredValue::new(title);

    // new data or a new query starts from the first page
    Effect::new(move |_| {
        records.track();
        search.track();
        page.set(0);
    });

    let rows = Memo::new(move |_| {
        visible_rows(
            records.get(),
            &search.get(),
            &sort_field.get(),
            sort_ascending.get(),
        )
    });
    let total_pages = Signal::derive(move || rows.with(|r| page_count(r.len(), page_size.get())));
    let page_rows = move || rows.with(|r| paginate(r, page.get(), page_size.get()));

    let on_sort = Callback::new(move |field: String| {
        let (next_field, ascending) =
            toggle_sort(&sort_field.get_untracked(), sort_ascending.get_untracked(), &field);
        sort_field.set(next_field);
        sort_ascending.set(ascending);
    });

    let export = move |format: ExportFormat| {
        let data = rows.get_untracked();
        match export_rows(&data, &title.get_value(), EXPORT_PREFIX, format) {
            Ok(()) => export_error.set(None),
            Err(e) => {
                log::warn!("export {:?} failed: {}", format, e);
                export_error.set(Some(e));
            }
        }
    };

    let header = move |label: &'static str, field: &'static str, align: &'static str| {
        view! {
            <SortableHeaderCell
                label=label
                sort_field=field
                current_sort_field=sort_field
                sort_ascending=sort_ascending
                on_sort=on_sort
                align=align
            />
        }
    };

    view! {
        <div class="card harvest-table">
            <div class="harvest-table__toolbar">
                <h3 class="card__title">{title.get_value()}</h3>
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v: String| search.set(v))
                    placeholder="Buscar finca, variedad, zona..."
                />
                <ButtonGroup>
                    {ExportFormat::ALL
                        .into_iter()
                        .map(|format| view! {
                            <Button
                                size=ButtonSize::Small
                                disabled=Signal::derive(move || rows.with(|r| r.is_empty()))
                                on_click=move |_| export(format)
                            >
                                {icon("download")}
                                {format!(" {}", format.label())}
                            </Button>
                        })
                        .collect_view()}
                </ButtonGroup>
            </div>

            {move || export_error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            {header("Finca", "farm", "left")}
                            {header("Variedad", "variety", "left")}
                            {header("Zona", "zone", "left")}
                            {header("Período", "period", "left")}
                            {header("Toneladas", "tonnage", "right")}
                            {header("TCH", "tch", "right")}
                            {header("Área (ha)", "area", "right")}
                            {header("Brix", "brix", "right")}
                            {header("Sacarosa", "sucrose", "right")}
                            {header("Rend. teórico", "yield", "right")}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || page_rows()
                            .into_iter()
                            .map(|r| {
                                let period = period_label(&r);
                                let HarvestRecord { farm, variety, zone, .. } = r.clone();
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout truncate=true>{farm}</TableCellLayout></TableCell>
                                        <TableCell>{variety}</TableCell>
                                        <TableCell>{zone}</TableCell>
                                        <TableCell>{period}</TableCell>
                                        <TableCell class="cell--number">{format_number_with_decimals(r.tonnage, 1)}</TableCell>
                                        <TableCell class="cell--number">{format_number_with_decimals(r.tch, 1)}</TableCell>
                                        <TableCell class="cell--number">{format_number_with_decimals(r.harvested_area, 1)}</TableCell>
                                        <TableCell class="cell--number">{format_number_with_decimals(r.brix, 2)}</TableCell>
                                        <TableCell class="cell--number">{format_number_with_decimals(r.sucrose, 2)}</TableCell>
                                        <TableCell class="cell--number">{format_number_with_decimals(r.theoretical_yield, 2)}</TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()}
                    </TableBody>
                </Table>
            </div>

            <PaginationControls
                current_page=page
                total_pages=total_pages
                total_count=Signal::derive(move || rows.with(|r| r.len()))
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

    fn record(farm: &str, zone: &str, year: i32, month: u32, tonnage: f64) -> HarvestRecord {
        serde_json::from_value(serde_json::json!({
            "nombre_finca": farm,
            "nombre_zona": zone,
            "año": year,
            "mes": month,
            "toneladas_cana_molida": tonnage
        }))
        .unwrap()
    }

    #[test]
    fn test_visible_rows_search_and_sort() {
        let rows = vec![
            record("La Esperanza", "Norte", 2024, 2, 100.0),
            record("El Paraíso", "Sur", 2024, 1, 300.0),
            record("San José", "Norte", 2023, 5, 200.0),
        ];
        let found = visible_rows(rows.clone(), "norte", "tonnage", false);
        assert_eq!(found.iter().map(|r| r.farm.as_str()).collect::<Vec<_>>(), vec!["San José", "La Esperanza"]);

        let by_period = visible_rows(rows, "", "period", true);
        assert_eq!(by_period[0].farm, "San José");
        assert_eq!(by_period[2].farm, "La Esperanza");
    }

    #[test]
    fn test_search_by_year() {
        let rows = vec![record("A", "Z", 2023, 1, 1.0), record("B", "Z", 2024, 1, 1.0)];
        assert_eq!(visible_rows(rows, "2024", "farm", true).len(), 1);
    }

    #[test]
    fn test_export_row_matches_headers() {
        let r = record("La Esperanza", "Norte", 2024, 3, 120.5);
        let row = r.to_row();
        assert_eq!(row.len(), HarvestRecord::headers().len());
        assert_eq!(row[0], "La Esperanza");
        assert_eq!(row[3], "2024");
        assert_eq!(row[5], "120.5");
    }

    #[test]
    fn test_period_label() {
        assert_eq!(period_label(&record("A", "Z", 2024, 3, 0.0)), "03/2024");
    }
}
