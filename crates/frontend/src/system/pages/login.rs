use leptos::prelude::*;

use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let session = use_auth();
    let is_loading = move || session.is_loading();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        session.login(username.get_untracked(), password.get_untracked());
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <div class="login-logo">{icon("leaf")}</div>
                <h1>"SugarBI"</h1>
                <h2>"Inicia sesión en tu cuenta"</h2>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Usuario"</label>
                        <input
                            type="text"
                            id="username"
                            placeholder="Ingresa tu usuario"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=is_loading
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Contraseña"</label>
                        <input
                            type="password"
                            id="password"
                            placeholder="Ingresa tu contraseña"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=is_loading
                        />
                    </div>

                    {move || session.error().map(|message| view! {
                        <div class="error-message">{message}</div>
                    })}

                    <button type="submit" class="btn-primary" disabled=is_loading>
                        {move || if is_loading() { "Iniciando sesión..." } else { "Iniciar Sesión" }}
                    </button>
                </form>

                <div class="login-info">
                    <p>"Para desarrollo: usuario: " <strong>"admin"</strong> ", contraseña: " <strong>"admin"</strong></p>
                </div>
            </div>
        </div>
    }
}
