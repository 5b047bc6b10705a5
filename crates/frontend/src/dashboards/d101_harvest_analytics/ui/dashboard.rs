use contracts::domain::harvest::HarvestRecord;
use contracts::shared::filters::FilterSelection;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::harvest_table::HarvestTable;
use crate::dashboards::d101_harvest_analytics::aggregates::{
    apply_top_farms, mean_brix_by_zone, mean_tch_by_variety, monthly_trend, tonnage_by_farm,
    QuickStats, FARM_CHART_LIMIT,
};
use crate::domain::harvest::api::get_filtered_harvest;
use crate::shared::components::chart::{BarChart, LineChart};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{CardTone, StatCard, ValueFormat};
use crate::shared::components::status_panel::{EmptyState, ErrorPanel, LoadingPanel};
use crate::shared::smart_filters::{use_smart_filters, SmartFiltersPanel};

/// Rows for a selection after the client-side top-farms cut
fn shape_rows(selection: &FilterSelection, records: Vec<HarvestRecord>) -> Vec<HarvestRecord> {
    match selection.top_farms {
        Some(n) => apply_top_farms(records, n),
        None => records,
    }
}

fn empty_message(selection: &FilterSelection) -> (&'static str, &'static str) {
    if selection.is_empty() {
        (
            "No hay datos de cosecha",
            "El servidor no devolvió registros. Intenta recargar más tarde.",
        )
    } else {
        (
            "Ningún registro coincide con los filtros",
            "Los filtros seleccionados son demasiado restrictivos. Prueba deshacer o limpiar algún filtro.",
        )
    }
}

#[component]
pub fn HarvestAnalyticsDashboard() -> impl IntoView {
    let filters = use_smart_filters();
    let selection = Memo::new(move |_| filters.selection());

    let (records, set_records) = signal(Vec::<HarvestRecord>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);
    let request_seq = StoredValue::new(0u64);

    let load = move |current: FilterSelection| {
        request_seq.update_value(|s| *s += 1);
        let ticket = request_seq.get_value();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = get_filtered_harvest(&current).await;
            // a newer selection already asked for data
            if request_seq.try_get_value() != Some(ticket) {
                return;
            }
            match result {
                Ok(rows) => set_records.set(shape_rows(&current, rows)),
                Err(e) => {
                    log::error!("harvest load failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load(selection.get()));

    let stats = Memo::new(move |_| records.with(|r| QuickStats::from_records(r)));
    let by_farm = Signal::derive(move || records.with(|r| tonnage_by_farm(r, FARM_CHART_LIMIT)));
    let by_variety = Signal::derive(move || records.with(|r| mean_tch_by_variety(r)));
    let by_zone = Signal::derive(move || records.with(|r| mean_brix_by_zone(r)));
    let trend = Signal::derive(move || records.with(|r| monthly_trend(r)));

    let table_title = move || {
        if selection.with(|s| s.is_empty()) {
            "Top cosechas por toneladas".to_string()
        } else {
            "Registros de cosecha".to_string()
        }
    };

    view! {
        <div class="page page--analytics">
            <PageHeader
                title="Analytics Avanzado"
                subtitle="Análisis detallado de datos de cosecha con visualizaciones interactivas".to_string()
                icon_name="analytics"
            />

            <SmartFiltersPanel filters=filters />

            <div class="stat-grid">
                <StatCard
                    label="Registros"
                    icon_name="analytics"
                    value=Signal::derive(move || Some(stats.get().count as f64))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Toneladas totales"
                    icon_name="scale"
                    value=Signal::derive(move || Some(stats.get().total_tonnage))
                    format=ValueFormat::Tonnes
                    tone=CardTone::Primary
                />
                <StatCard
                    label="TCH promedio"
                    icon_name="leaf"
                    value=Signal::derive(move || (stats.get().count > 0).then(|| stats.get().avg_tch))
                    format=ValueFormat::Decimal { decimals: 1 }
                    tone=CardTone::Success
                />
                <StatCard
                    label="Brix promedio"
                    icon_name="calendar"
                    value=Signal::derive(move || (stats.get().count > 0).then(|| stats.get().avg_brix))
                    format=ValueFormat::Percent { decimals: 1 }
                    tone=CardTone::Warning
                />
            </div>

            {move || {
                if let Some(message) = error.get() {
                    let retry = Callback::new(move |_| load(selection.get_untracked()));
                    return view! { <ErrorPanel message=message on_retry=retry /> }.into_any();
                }
                if loading.get() && records.with(|r| r.is_empty()) {
                    return view! { <LoadingPanel message="Cargando datos de análisis..." /> }.into_any();
                }
                if records.with(|r| r.is_empty()) {
                    let (title, message) = selection.with(empty_message);
                    return view! { <EmptyState title=title message=message /> }.into_any();
                }
                view! {
                    <div class="chart-grid">
                        <div class="card"><BarChart title="Producción por finca (Top 10)" series=by_farm /></div>
                        <div class="card"><BarChart title="TCH promedio por variedad" series=by_variety color_index=1 /></div>
                        <div class="card"><BarChart title="Brix promedio por zona" series=by_zone color_index=2 /></div>
                        <div class="card"><LineChart title="Tendencia mensual de producción" series=trend color_index=3 /></div>
                    </div>
                    <HarvestTable records=records title=table_title() />
                }
                .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(farm: &str, tonnage: f64) -> HarvestRecord {
        serde_json::from_value(serde_json::json!({
            "nombre_finca": farm,
            "toneladas_cana_molida": tonnage
        }))
        .unwrap()
    }

    #[test]
    fn test_shape_rows_applies_top_farms() {
        let rows = vec![record("A", 10.0), record("B", 30.0), record("C", 20.0)];
        let selection = FilterSelection {
            year: Some(2024),
            month: Some(1),
            zone: Some("Z1".into()),
            top_farms: Some(2),
            ..Default::default()
        };
        let shaped = shape_rows(&selection, rows.clone());
        assert_eq!(shaped.len(), 2);
        assert!(shaped.iter().all(|r| r.farm != "A"));
        assert_eq!(shape_rows(&FilterSelection::default(), rows).len(), 3);
    }

    #[test]
    fn test_empty_message_distinguishes_cases() {
        assert_eq!(empty_message(&FilterSelection::default()).0, "No hay datos de cosecha");
        let narrowed = FilterSelection {
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(empty_message(&narrowed).0, "Ningún registro coincide con los filtros");
    }
}
