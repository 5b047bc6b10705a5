//! Sidebar navigation: brand, one entry per page, signed-in user footer

use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

/// First letter of the display name for the avatar bubble
fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let session = use_auth();

    let display_name = move || session.state().display_name().unwrap_or_else(|| "Usuario".to_string());
    let role = move || {
        session
            .user()
            .map(|u| u.role)
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "Administrador".to_string())
    };

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__brand">
                <div class="app-sidebar__logo">{icon("leaf")}</div>
                <span class="app-sidebar__brand-name">"SugarBI"</span>
            </div>

            <nav class="app-sidebar__nav">
                {Page::ALL
                    .into_iter()
                    .map(|page| view! {
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || ctx.active.get() == page
                            title=page.title()
                            on:click=move |_| ctx.navigate(page)
                        >
                            <span class="app-sidebar__icon">{icon(page.icon())}</span>
                            <span class="app-sidebar__label">{page.title()}</span>
                        </div>
                    })
                    .collect_view()}
            </nav>

            <div class="app-sidebar__footer">
                <div class="app-sidebar__avatar">{move || initial(&display_name())}</div>
                <div class="app-sidebar__user">
                    <p class="app-sidebar__user-name">{display_name}</p>
                    <p class="app-sidebar__user-role">{role}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::initial;

    #[test]
    fn test_initial() {
        assert_eq!(initial("ana"), "A");
        assert_eq!(initial("Ñusta"), "Ñ");
        assert_eq!(initial(""), "U");
    }
}
