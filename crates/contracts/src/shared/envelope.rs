use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// `{success, data, error?, message?}` wrapper used by every API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Unwraps the payload, turning `success: false` into [`ApiError::Backend`].
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(self.failure());
        }
        self.data.ok_or(ApiError::MissingData)
    }

    /// Same as [`into_result`](Self::into_result) for calls whose payload is irrelevant.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(self.failure())
        }
    }

    fn failure(self) -> ApiError {
        ApiError::Backend(
            self.error
                .or(self.message)
                .unwrap_or_else(|| "Error desconocido del servidor".to_string()),
        )
    }
}

/// Decodes a raw response body into the envelope payload.
///
/// An envelope in the body wins over the status code, so a 401 carrying
/// `{"success": false, "error": "..."}` surfaces the backend's message.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    decode_raw::<T>(status, body)?.into_result()
}

/// Like [`decode_envelope`] but keeps the envelope for callers that inspect it.
pub fn decode_raw<T: DeserializeOwned>(status: u16, body: &str) -> Result<ApiEnvelope<T>, ApiError> {
    let ok_status = (200..300).contains(&status);
    match serde_json::from_str::<ApiEnvelope<T>>(body) {
        Ok(envelope) => Ok(envelope),
        Err(e) => {
            if !ok_status {
                // Error bodies may not match T; read just the message if present.
                if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body) {
                    if envelope.error.is_some() || envelope.message.is_some() {
                        return Err(envelope.failure());
                    }
                }
                Err(ApiError::Http(status))
            } else {
                Err(ApiError::Decode(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_payload() {
        let body = r#"{"success": true, "data": [1, 2, 3]}"#;
        let data: Vec<i32> = decode_envelope(200, body).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn test_backend_error_wins_over_status() {
        let body = r#"{"success": false, "error": "Usuario o contraseña incorrectos"}"#;
        let err = decode_envelope::<Vec<i32>>(401, body).unwrap_err();
        assert_eq!(err, ApiError::Backend("Usuario o contraseña incorrectos".into()));
    }

    #[test]
    fn test_message_used_when_error_missing() {
        let body = r#"{"success": false, "message": "Sesión expirada"}"#;
        let err = decode_envelope::<serde_json::Value>(200, body).unwrap_err();
        assert_eq!(err, ApiError::Backend("Sesión expirada".into()));
    }

    #[test]
    fn test_non_json_error_body() {
        let err = decode_envelope::<Vec<i32>>(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, ApiError::Http(502));
    }

    #[test]
    fn test_shape_mismatch_on_success_is_decode_error() {
        let body = r#"{"success": true, "data": {"unexpected": true}}"#;
        let err = decode_envelope::<Vec<i32>>(200, body).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_missing_data() {
        let body = r#"{"success": true}"#;
        let err = decode_envelope::<Vec<i32>>(200, body).unwrap_err();
        assert_eq!(err, ApiError::MissingData);

        let envelope: ApiEnvelope<serde_json::Value> = decode_raw(200, body).unwrap();
        assert!(envelope.into_unit().is_ok());
    }
}
