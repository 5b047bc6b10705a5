use contracts::shared::olap::{
    AggregationFunction, Measure, OlapDimension, OlapMetadata, OlapQuery, OlapResult,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use thaw::*;

use super::result_table::OlapResultTable;
use crate::dashboards::d102_olap::api;
use crate::dashboards::d102_olap::state::{
    offered_dimensions, offered_functions, offered_measures, OlapWizard, WizardStep,
};
use crate::dashboards::d102_olap::summary::summarize;
use crate::shared::components::chart::BarChart;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::status_panel::ErrorPanel;
use crate::shared::components::table::{format_number_int, format_number_with_decimals};
use crate::shared::icons::icon;

const PREVIEW_LEN: usize = 3;

/// "2023, 2024, 2025 y 4 más" from a dimension-values payload
pub fn members_preview(values: &[Value]) -> String {
    let labels: Vec<String> = values
        .iter()
        .take(PREVIEW_LEN)
        .map(|v| match v {
            Value::Object(obj) => obj
                .get("label")
                .or_else(|| obj.get("value"))
                .map(|inner| match inner {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_default(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    let rest = values.len().saturating_sub(PREVIEW_LEN);
    if rest > 0 {
        format!("{} y {} más", labels.join(", "), rest)
    } else {
        labels.join(", ")
    }
}

fn execution_label(result: &OlapResult) -> String {
    let mut text = format!("{} registros", format_number_int(result.row_count() as f64));
    if let Some(secs) = result.execution_time {
        text.push_str(&format!(" en {} s", format_number_with_decimals(secs, 2)));
    }
    text
}

#[component]
fn OptionCard(
    #[prop(into)] title: String,
    #[prop(into)] description: String,
    #[prop(into)] selected: Signal<bool>,
    on_toggle: Callback<()>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div
            class="option-card"
            class:option-card--selected=move || selected.get()
            on:click=move |_| on_toggle.run(())
        >
            <div class="option-card__head">
                <span class="option-card__title">{title}</span>
                <Show when=move || selected.get()>
                    <span class="option-card__check">{icon("check")}</span>
                </Show>
            </div>
            <div class="option-card__description">{description}</div>
            {children.map(|c| c())}
        </div>
    }
}

/// Level picker plus a short preview of the level's members
#[component]
fn DimensionLevel(dimension: OlapDimension, wizard: RwSignal<OlapWizard>) -> impl IntoView {
    let level = Memo::new(move |_| wizard.with(|w| w.level_of(dimension).to_string()));
    let preview = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let current = level.get();
        spawn_local(async move {
            match api::get_dimension_values(dimension, &current).await {
                Ok(values) => preview.set(Some(format!(
                    "{} valores: {}",
                    values.len(),
                    members_preview(&values)
                ))),
                Err(e) => {
                    log::warn!("dimension values {}/{}: {}", dimension.as_str(), current, e);
                    preview.set(None);
                }
            }
        });
    });

    view! {
        <div class="option-card__extra" on:click=|ev| ev.stop_propagation()>
            <label>"Nivel: "</label>
            <select
                prop:value=move || level.get()
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    wizard.update(|w| w.set_level(dimension, &value));
                }
            >
                {dimension
                    .levels()
                    .iter()
                    .map(|l| view! { <option value=*l>{*l}</option> })
                    .collect_view()}
            </select>
            {move || preview.get().map(|p| view! { <div class="option-card__hint">{p}</div> })}
        </div>
    }
}

#[component]
pub fn OlapWizardPage() -> impl IntoView {
    let wizard = RwSignal::new(OlapWizard::new());
    let metadata = RwSignal::new(OlapMetadata::default());
    // result kept with the query that produced it
    let result = RwSignal::new(None::<(OlapQuery, OlapResult)>);
    let executing = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    spawn_local(async move {
        match api::load_metadata().await {
            Ok(meta) => metadata.set(meta),
            // the wizard still offers every known option
            Err(e) => log::warn!("olap metadata unavailable: {}", e),
        }
    });

    let execute = move || {
        let Some(query) = wizard.with_untracked(|w| w.build_query()) else {
            return;
        };
        executing.set(true);
        error.set(None);
        spawn_local(async move {
            match api::execute_query(&query).await {
                Ok(r) => result.set(Some((query, r))),
                Err(e) => {
                    log::error!("olap query failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
            executing.set(false);
        });
    };

    let new_analysis = move |_: leptos::ev::MouseEvent| {
        wizard.update(|w| w.reset());
        result.set(None);
        error.set(None);
    };

    let step_bar = move || {
        let current = wizard.with(|w| w.step);
        WizardStep::ALL
            .into_iter()
            .map(|step| {
                let done = wizard.with(|w| w.is_step_complete(step));
                view! {
                    <button
                        class="wizard-step"
                        class:wizard-step--active={step == current}
                        class:wizard-step--done=done
                        on:click=move |_| wizard.update(|w| w.go_to(step))
                    >
                        <span class="wizard-step__number">{step.number()}</span>
                        <span class="wizard-step__title">{step.title()}</span>
                    </button>
                }
            })
            .collect_view()
    };

    let measures_step = move || {
        metadata.with(offered_measures)
            .into_iter()
            .map(|m: Measure| view! {
                <OptionCard
                    title=m.label()
                    description=m.description()
                    selected=Signal::derive(move || wizard.with(|w| w.measures.contains(&m)))
                    on_toggle=Callback::new(move |_| wizard.update(|w| w.toggle_measure(m)))
                />
            })
            .collect_view()
    };

    let dimensions_step = move || {
        metadata.with(offered_dimensions)
            .into_iter()
            .map(|d: OlapDimension| {
                let selected = Signal::derive(move || wizard.with(|w| w.dimensions.contains(&d)));
                view! {
                    <OptionCard
                        title=d.label()
                        description=d.description()
                        selected=selected
                        on_toggle=Callback::new(move |_| wizard.update(|w| w.toggle_dimension(d)))
                    >
                        <Show when=move || selected.get()>
                            <DimensionLevel dimension=d wizard=wizard />
                        </Show>
                    </OptionCard>
                }
            })
            .collect_view()
    };

    let functions_step = move || {
        metadata.with(offered_functions)
            .into_iter()
            .map(|f: AggregationFunction| view! {
                <OptionCard
                    title=f.label()
                    description=f.formula()
                    selected=Signal::derive(move || wizard.with(|w| w.functions.contains(&f)))
                    on_toggle=Callback::new(move |_| wizard.update(|w| w.toggle_function(f)))
                />
            })
            .collect_view()
    };

    let execute_step = move || {
        let w = wizard.get();
        let join = |items: Vec<&'static str>| {
            if items.is_empty() {
                "Ninguna".to_string()
            } else {
                items.join(", ")
            }
        };
        let dimensions = join(w.dimensions.iter().map(|d| d.label()).collect());
        view! {
            <div class="wizard-review">
                <div><strong>"Métricas: "</strong>{join(w.measures.iter().map(|m| m.label()).collect())}</div>
                <div><strong>"Dimensiones: "</strong>{dimensions}</div>
                <div><strong>"Funciones: "</strong>{join(w.functions.iter().map(|f| f.label()).collect())}</div>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !wizard.with(|w| w.can_execute()) || executing.get())
                    on_click=move |_| execute()
                >
                    {icon("play")}
                    {move || if executing.get() { " Ejecutando..." } else { " Ejecutar análisis" }}
                </Button>
            </div>
        }
    };

    let step_panel = move || match wizard.with(|w| w.step) {
        WizardStep::Measures => measures_step().into_any(),
        WizardStep::Dimensions => dimensions_step().into_any(),
        WizardStep::Functions => functions_step().into_any(),
        WizardStep::Execute => execute_step().into_any(),
    };

    let results = move || {
        result.get().map(|(query, r)| {
            let summaries = summarize(
                &r,
                &query.dimensions,
                &query.measures,
                &query.aggregation_functions,
            );
            let info = execution_label(&r);
            let sql = r.sql_query.clone();
            view! {
                <div class="olap-results">
                    <div class="olap-results__info">{info}</div>
                    {sql.map(|q| view! {
                        <details class="olap-results__sql">
                            <summary>"Ver consulta SQL"</summary>
                            <pre>{q}</pre>
                        </details>
                    })}
                    <div class="chart-grid">
                        {summaries
                            .into_iter()
                            .enumerate()
                            .map(|(i, s)| {
                                let title = format!("Total por {}", s.dimension.label());
                                let series = s.series();
                                view! {
                                    <div class="card">
                                        <BarChart title=title series=Signal::derive(move || series.clone()) color_index=i />
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                    <OlapResultTable result=Signal::derive(move || r.clone()) />
                </div>
            }
        })
    };

    view! {
        <div class="page page--olap">
            <PageHeader
                title="Análisis OLAP"
                subtitle="Construye consultas multidimensionales paso a paso".to_string()
                icon_name="cube"
            >
                <Button size=ButtonSize::Small on_click=new_analysis>
                    {icon("refresh")}
                    " Nuevo análisis"
                </Button>
            </PageHeader>

            <div class="wizard-steps">{step_bar}</div>
            <div class="wizard-hint">{move || wizard.with(|w| w.step.hint())}</div>
            <div class="option-grid">{step_panel}</div>

            {move || executing.get().then(|| view! {
                <div class="olap-executing"><Spinner /><span>"Ejecutando consulta OLAP..."</span></div>
            })}
            {move || error.get().map(|message| view! {
                <ErrorPanel message=message on_retry=Callback::new(move |_| execute()) />
            })}
            {results}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_members_preview() {
        let values = vec![json!(2021), json!(2022), json!(2023), json!(2024), json!(2025)];
        assert_eq!(members_preview(&values), "2021, 2022, 2023 y 2 más");
        let objects = vec![json!({"value": "Z1", "label": "Norte"}), json!({"value": 7})];
        assert_eq!(members_preview(&objects), "Norte, 7");
        assert_eq!(members_preview(&[]), "");
    }

    #[test]
    fn test_execution_label() {
        let result: OlapResult = serde_json::from_value(json!({
            "records": [{"año": 2024}],
            "record_count": 1200,
            "execution_time": 0.5
        }))
        .unwrap();
        assert_eq!(execution_label(&result), "1.200 registros en 0,50 s");
    }
}
