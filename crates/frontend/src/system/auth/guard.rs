use leptos::prelude::*;
use thaw::*;

use super::context::use_auth;
use crate::system::pages::login::LoginPage;

/// Renders children only for a signed-in session.
/// Spinner during the startup check, login page otherwise.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_auth();
    let children = StoredValue::new(children);

    view! {
        <Show
            when=move || session.is_checked()
            fallback=|| view! {
                <div class="app-loading">
                    <Spinner />
                    <span>"Verificando sesión..."</span>
                </div>
            }
        >
            <Show
                when=move || session.is_authenticated()
                fallback=|| view! { <LoginPage /> }
            >
                {children.with_value(|c| c())}
            </Show>
        </Show>
    }
}
