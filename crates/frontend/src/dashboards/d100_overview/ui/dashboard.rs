use contracts::dashboards::d100_overview::dto::SystemStats;
use contracts::domain::harvest::HarvestRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::d100_overview::api::{self, OverviewData};
use crate::shared::components::chart::{BarChart, ChartSeries, DoughnutChart};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{CardTone, StatCard, ValueFormat};
use crate::shared::components::status_panel::{ErrorPanel, LoadingPanel};
use crate::shared::components::table::format_number_int;

/// Farm name -> tonnage, as returned (already ordered by tonnage)
fn top_farms_series(records: &[HarvestRecord]) -> ChartSeries {
    ChartSeries::new(
        records
            .iter()
            .map(|r| {
                let label = if r.farm.is_empty() { "Sin nombre".to_string() } else { r.farm.clone() };
                (label, r.tonnage)
            })
            .collect(),
    )
}

fn quality_series(stats: &SystemStats) -> ChartSeries {
    ChartSeries::new(vec![
        ("TCH".to_string(), stats.avg_tch),
        ("Brix".to_string(), stats.avg_brix),
        ("Sacarosa".to_string(), stats.avg_sucrose),
    ])
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let (data, set_data) = signal(None::<OverviewData>);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::load_overview().await {
                Ok(overview) => set_data.set(Some(overview)),
                Err(e) => {
                    log::error!("overview load failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let stat = move |f: fn(&SystemStats) -> f64| {
        Signal::derive(move || data.with(|d| d.as_ref().map(|d| f(&d.stats))))
    };
    let top_series = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| top_farms_series(&d.top_harvests)).unwrap_or_default())
    });
    let quality = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| quality_series(&d.stats)).unwrap_or_default())
    });

    view! {
        <div class="page page--dashboard">
            <PageHeader title="Dashboard" subtitle="Resumen general del sistema SugarBI".to_string() icon_name="dashboard" />

            {move || {
                if loading.get() && data.with(|d| d.is_none()) {
                    return view! { <LoadingPanel message="Cargando dashboard..." /> }.into_any();
                }
                if let Some(message) = error.get() {
                    return view! {
                        <ErrorPanel message=message on_retry=Callback::new(move |_| load()) />
                    }
                    .into_any();
                }
                view! {
                    <div class="stat-grid">
                        <StatCard label="Total Fincas" icon_name="map" value=stat(|s| s.total_farms as f64) format=ValueFormat::Integer tone=CardTone::Primary />
                        <StatCard label="Total Variedades" icon_name="leaf" value=stat(|s| s.total_varieties as f64) format=ValueFormat::Integer tone=CardTone::Success />
                        <StatCard label="Total Cosechas" icon_name="analytics" value=stat(|s| s.harvest_count() as f64) format=ValueFormat::Integer />
                        <StatCard label="Total Toneladas" icon_name="scale" value=stat(|s| s.total_tonnage) format=ValueFormat::Tonnes tone=CardTone::Warning />
                    </div>

                    <div class="chart-grid">
                        <div class="card">
                            <BarChart title="Top 5 Fincas por Producción" series=top_series />
                        </div>
                        <div class="card">
                            <DoughnutChart title="Promedios de Calidad" series=quality />
                        </div>
                    </div>

                    <div class="card system-info">
                        <h3 class="card__title">"Información del Sistema"</h3>
                        <div class="system-info__grid">
                            <div class="system-info__item">
                                <p class="system-info__value">
                                    {move || data.with(|d| d.as_ref().and_then(|d| d.stats.year_range()).unwrap_or_else(|| "—".to_string()))}
                                </p>
                                <p class="system-info__label">"Período de datos"</p>
                            </div>
                            <div class="system-info__item">
                                <p class="system-info__value">
                                    {move || data.with(|d| d.as_ref().map(|d| format_number_int(d.stats.total_zones as f64)).unwrap_or_default())}
                                </p>
                                <p class="system-info__label">"Zonas geográficas"</p>
                            </div>
                            <div class="system-info__item">
                                <p class="system-info__value">
                                    {move || data.with(|d| d.as_ref().map(|d| format_number_int(d.stats.total_periods as f64)).unwrap_or_default())}
                                </p>
                                <p class="system-info__label">"Períodos de tiempo"</p>
                            </div>
                        </div>
                    </div>
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
    fn test_top_farms_series_keeps_order() {
        let series = top_farms_series(&[record("La Esperanza", 900.0), record("", 400.0)]);
        assert_eq!(series.labels, vec!["La Esperanza", "Sin nombre"]);
        assert_eq!(series.values, vec![900.0, 400.0]);
    }

    #[test]
    fn test_quality_series() {
        let stats = SystemStats {
            avg_tch: 110.0,
            avg_brix: 18.5,
            avg_sucrose: 13.1,
            ..Default::default()
        };
        let series = quality_series(&stats);
        assert_eq!(series.labels, vec!["TCH", "Brix", "Sacarosa"]);
        assert_eq!(series.values, vec![110.0, 18.5, 13.1]);
    }
}
