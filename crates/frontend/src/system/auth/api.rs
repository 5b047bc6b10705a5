use contracts::shared::error::ApiError;
use contracts::system::auth::{AuthResponse, LoginRequest, User};
use gloo_net::http::Response;

use crate::shared::api_utils::{get_raw, post_raw};

const LOGIN_FAILED: &str = "Error de autenticación";

/// Auth replies keep `success`/`error` but not the data envelope, so they are
/// decoded here rather than through `read_envelope`.
async fn read_auth_response(response: Response) -> Result<AuthResponse, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    match serde_json::from_str::<AuthResponse>(&body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !(200..300).contains(&status) => Err(ApiError::Http(status)),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

/// Login with username and password; the session cookie is set by the server
pub async fn login(username: String, password: String) -> Result<User, ApiError> {
    let request = LoginRequest {
        username,
        password,
        remember_me: None,
    };
    let response = post_raw("/auth/api/login", &request).await?;
    let reply = read_auth_response(response).await?;
    if !reply.success {
        return Err(ApiError::Backend(reply.failure_message(LOGIN_FAILED)));
    }
    reply.into_user().ok_or(ApiError::MissingData)
}

pub async fn logout() -> Result<(), ApiError> {
    let response = post_raw("/auth/api/logout", &serde_json::json!({})).await?;
    let reply = read_auth_response(response).await?;
    if reply.success {
        Ok(())
    } else {
        Err(ApiError::Backend(reply.failure_message("Error al cerrar sesión")))
    }
}

/// Current session user, `Ok(None)` when there is no active session
pub async fn get_current_user() -> Result<Option<User>, ApiError> {
    let response = get_raw("/auth/api/user/me").await?;
    match read_auth_response(response).await {
        Ok(reply) if reply.success => Ok(reply.into_user()),
        Ok(_) => Ok(None),
        Err(e) if e.is_unauthorized() => Ok(None),
        Err(e) => Err(e),
    }
}
