use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use super::api::{self, ChatEngine};
use super::model::{ChatMessage, Conversation};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::format_number_int;
use crate::shared::date_utils::format_time;
use crate::shared::icons::icon;

#[component]
fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let is_user = message.is_user();
    let time = format_time(&message.timestamp);
    let details = (!is_user).then(|| {
        let count = message
            .record_count
            .map(|n| view! { <span class="chat-bubble__count">{format!("{} registros", format_number_int(n as f64))}</span> });
        let sql = message.sql.clone().map(|q| view! {
            <details class="chat-bubble__sql">
                <summary>"Ver SQL generado"</summary>
                <pre>{q}</pre>
            </details>
        });
        let error = message
            .error
            .clone()
            .map(|e| view! { <div class="chat-bubble__error">{icon("alert")}" "{e}</div> });
        view! { {count}{sql}{error} }
    });

    view! {
        <div class="chat-row" class:chat-row--user=is_user>
            <div class="chat-avatar">{icon(if is_user { "user" } else { "bot" })}</div>
            <div class="chat-bubble" class:chat-bubble--user=is_user>
                <div class="chat-bubble__text">{message.content.clone()}</div>
                {details}
                <div class="chat-bubble__time">{time}</div>
            </div>
        </div>
    }
}

#[component]
pub fn ChatbotPage() -> impl IntoView {
    let conversation = RwSignal::new(Conversation::new());
    let input = RwSignal::new(String::new());
    let engine = RwSignal::new(ChatEngine::default());
    let examples = RwSignal::new(Vec::<String>::new());
    let bottom = NodeRef::<Div>::new();

    spawn_local(async move {
        match api::get_examples().await {
            Ok(list) => examples.set(list),
            Err(e) => log::warn!("chat examples unavailable: {}", e),
        }
    });

    // keep the latest message in view
    Effect::new(move |_| {
        conversation.with(|c| c.messages.len());
        if let Some(el) = bottom.get() {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&opts);
        }
    });

    let submit = move || {
        let text = input.get_untracked();
        let Some(query) = conversation.try_update(|c| c.ask(&text)).flatten() else {
            return;
        };
        input.set(String::new());
        let selected = engine.get_untracked();
        spawn_local(async move {
            let outcome = api::send_query(selected, query).await;
            if let Err(e) = &outcome {
                log::error!("chat query failed: {}", e);
            }
            conversation.try_update(|c| c.resolve(outcome));
        });
    };

    let pending = Signal::derive(move || conversation.with(|c| c.pending));

    view! {
        <div class="page page--chatbot">
            <PageHeader
                title="Chatbot Inteligente"
                subtitle="Haz consultas en lenguaje natural sobre los datos de cosecha".to_string()
                icon_name="chat"
            >
                <ButtonGroup>
                    {[ChatEngine::Classic, ChatEngine::LangChain]
                        .into_iter()
                        .map(|e| view! {
                            <Button
                                size=ButtonSize::Small
                                appearance=Signal::derive(move || {
                                    if engine.get() == e { ButtonAppearance::Primary } else { ButtonAppearance::Secondary }
                                })
                                on_click=move |_| engine.set(e)
                            >
                                {e.label()}
                            </Button>
                        })
                        .collect_view()}
                </ButtonGroup>
                <Button
                    size=ButtonSize::Small
                    disabled=pending
                    on_click=move |_| conversation.update(|c| c.clear())
                >
                    {icon("trash")}
                    " Limpiar"
                </Button>
            </PageHeader>

            <div class="chat-layout">
                <div class="card chat-panel">
                    <div class="chat-messages">
                        <For
                            each=move || conversation.get().messages
                            key=|m| m.id
                            children=|m| view! { <MessageBubble message=m /> }
                        />
                        <Show when=move || pending.get()>
                            <div class="chat-row">
                                <div class="chat-avatar">{icon("bot")}</div>
                                <div class="chat-bubble chat-bubble--typing">
                                    <Spinner size=SpinnerSize::Tiny />
                                    " Analizando tu consulta..."
                                </div>
                            </div>
                        </Show>
                        <div node_ref=bottom></div>
                    </div>

                    <form
                        class="chat-input"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            submit();
                        }
                    >
                        <input
                            type="text"
                            placeholder="Escribe tu pregunta, por ejemplo: top 5 fincas por producción"
                            prop:value=move || input.get()
                            on:input=move |ev| input.set(event_target_value(&ev))
                            disabled=move || pending.get()
                        />
                        <Button
                            appearance=ButtonAppearance::Primary
                            button_type=ButtonType::Submit
                            disabled=Signal::derive(move || pending.get() || input.with(|t| t.trim().is_empty()))
                        >
                            {icon("send")}
                        </Button>
                    </form>
                </div>

                <aside class="card chat-examples">
                    <h3 class="card__title">"Consultas de ejemplo"</h3>
                    <Show
                        when=move || examples.with(|e| !e.is_empty())
                        fallback=|| view! { <div class="chat-examples__empty">"Sin ejemplos disponibles"</div> }
                    >
                        <ul>
                            {move || examples
                                .get()
                                .into_iter()
                                .map(|example| {
                                    let text = example.clone();
                                    view! {
                                        <li>
                                            <button
                                                class="chat-example"
                                                on:click=move |_| input.set(text.clone())
                                            >
                                                {example}
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    </Show>
                </aside>
            </div>
        </div>
    }
}
