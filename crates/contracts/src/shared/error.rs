use thiserror::Error;

/// Failure of a single gateway call.
///
/// Empty result sets are not errors; they arrive as `Ok(vec![])`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request never produced a response (offline, CORS, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status without a readable envelope.
    #[error("HTTP error: {0}")]
    Http(u16),

    /// Body was not the expected JSON shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Envelope came back with `success: false`.
    #[error("{0}")]
    Backend(String),

    /// Envelope reported success but carried no `data`.
    #[error("Response contained no data")]
    MissingData,
}

impl ApiError {
    /// Session is gone or was never established.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http(401) | ApiError::Http(403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(ApiError::Http(500).to_string(), "HTTP error: 500");
        assert_eq!(
            ApiError::Backend("Credenciales inválidas".into()).to_string(),
            "Credenciales inválidas"
        );
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::Http(401).is_unauthorized());
        assert!(!ApiError::Http(404).is_unauthorized());
        assert!(!ApiError::Network("offline".into()).is_unauthorized());
    }
}
