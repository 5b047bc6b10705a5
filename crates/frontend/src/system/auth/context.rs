use contracts::shared::error::ApiError;
use contracts::system::auth::User;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;

#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// True while the startup session check or a login is in flight
    pub is_loading: bool,
    pub error: Option<String>,
    /// False until the startup session check has answered
    pub checked: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::checking()
    }
}

impl AuthState {
    pub fn checking() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
            error: None,
            checked: false,
        }
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            is_loading: false,
            error: None,
            checked: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: false,
            error: None,
            checked: true,
        }
    }

    /// Failed login: session reset, message kept for the form
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::signed_out()
        }
    }

    pub fn display_name(&self) -> Option<String> {
        self.user.as_ref().map(User::display_name)
    }
}

/// Session handle shared through context
#[derive(Clone, Copy)]
pub struct Session {
    state: RwSignal<AuthState>,
}

impl Session {
    fn new() -> Self {
        Self {
            state: RwSignal::new(AuthState::checking()),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.is_loading)
    }

    pub fn is_checked(&self) -> bool {
        self.state.with(|s| s.checked)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    /// Startup `/me` check; any failure means "not signed in"
    pub fn init(&self) {
        let state = self.state;
        state.set(AuthState::checking());
        spawn_local(async move {
            let next = match api::get_current_user().await {
                Ok(Some(user)) => {
                    log::info!("session restored for {}", user.username);
                    AuthState::signed_in(user)
                }
                Ok(None) => AuthState::signed_out(),
                Err(e) => {
                    log::warn!("session check failed: {}", e);
                    AuthState::signed_out()
                }
            };
            state.set(next);
        });
    }

    pub fn login(&self, username: String, password: String) {
        let state = self.state;
        state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });
        spawn_local(async move {
            let next = match api::login(username, password).await {
                Ok(user) => {
                    log::info!("signed in as {}", user.username);
                    AuthState::signed_in(user)
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    AuthState::failed(login_error_text(&e))
                }
            };
            state.set(next);
        });
    }

    /// Server logout is best effort; local state always resets
    pub fn teardown(&self) {
        let state = self.state;
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                log::error!("logout failed: {}", e);
            }
            state.set(AuthState::signed_out());
        });
    }
}

fn login_error_text(error: &ApiError) -> String {
    match error {
        ApiError::Backend(msg) => msg.clone(),
        ApiError::Network(_) => "Error de conexión".to_string(),
        ApiError::Http(401) | ApiError::Http(403) => "Credenciales inválidas".to_string(),
        other => other.to_string(),
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let session = Session::new();
    session.init();
    provide_context(session);

    children()
}

/// Hook to access the session
pub fn use_auth() -> Session {
    use_context::<Session>().expect("AuthProvider not found in component tree")
}
