use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn LoadingPanel(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    let message = message.unwrap_or_else(|| "Cargando datos...".to_string());
    view! {
        <div class="status-panel status-panel--loading">
            <Spinner />
            <span>{message}</span>
        </div>
    }
}

/// Inline error with an optional "Reintentar" button
#[component]
pub fn ErrorPanel(
    #[prop(into)] message: String,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="status-panel status-panel--error" role="alert">
            {icon("alert")}
            <span class="status-panel__message">{message}</span>
            {on_retry.map(|retry| view! {
                <Button appearance=ButtonAppearance::Primary on_click=move |_| retry.run(())>
                    {icon("refresh")}
                    " Reintentar"
                </Button>
            })}
        </div>
    }
}

#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] message: Option<String>,
) -> impl IntoView {
    view! {
        <div class="status-panel status-panel--empty">
            {icon("search")}
            <div class="status-panel__title">{title}</div>
            {message.map(|m| view! { <div class="status-panel__message">{m}</div> })}
        </div>
    }
}
