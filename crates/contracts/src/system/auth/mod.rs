use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember_me: Option<bool>,
}

/// Reply of the `/auth/api/*` endpoints. The user usually travels at the top
/// level; some deployments wrap it as `data` or `data.user`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl AuthResponse {
    /// The authenticated user, wherever the server put it.
    pub fn into_user(self) -> Option<User> {
        if self.user.is_some() {
            return self.user;
        }
        let data = self.data?;
        let candidate = data.get("user").cloned().unwrap_or(data);
        serde_json::from_value(candidate).ok()
    }

    /// Server-provided failure text, or `fallback`.
    pub fn failure_message(&self, fallback: &str) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    /// "First Last", or the username when both are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_with_user() {
        let resp: AuthResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "message": "Login exitoso",
            "user": {
                "id": 1,
                "username": "admin",
                "email": "admin@sugarbi.local",
                "first_name": "Ana",
                "last_name": "Gómez",
                "role": "admin",
                "is_active": true
            }
        }))
        .unwrap();
        let user = resp.user.unwrap();
        assert_eq!(user.display_name(), "Ana Gómez");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let resp: AuthResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "user": {"id": 2, "username": "operador"}
        }))
        .unwrap();
        let user = resp.user.unwrap();
        assert!(user.is_active);
        assert_eq!(user.display_name(), "operador");
    }

    #[test]
    fn test_into_user_reads_wrapped_shapes() {
        let nested: AuthResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "data": {"user": {"id": 3, "username": "ana"}}
        }))
        .unwrap();
        assert_eq!(nested.into_user().map(|u| u.id), Some(3));

        let flat: AuthResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "data": {"id": 4, "username": "luis"}
        }))
        .unwrap();
        assert_eq!(flat.into_user().map(|u| u.username), Some("luis".to_string()));

        let none: AuthResponse = serde_json::from_value(serde_json::json!({"success": false})).unwrap();
        assert!(none.into_user().is_none());
    }

    #[test]
    fn test_failure_message_prefers_error() {
        let resp = AuthResponse {
            error: Some("Credenciales inválidas".into()),
            message: Some("otro".into()),
            ..Default::default()
        };
        assert_eq!(resp.failure_message("x"), "Credenciales inválidas");
        assert_eq!(AuthResponse::default().failure_message("Error de autenticación"), "Error de autenticación");
    }

    #[test]
    fn test_login_request_omits_remember_me() {
        let req = LoginRequest {
            username: "admin".into(),
            password: "secret".into(),
            remember_me: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"username": "admin", "password": "secret"}));
    }
}
