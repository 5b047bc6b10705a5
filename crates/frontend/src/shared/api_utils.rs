//! API utilities for frontend-backend communication
//!
//! Builds API URLs and runs single-attempt JSON requests. Every request
//! carries the session cookie and every response body is decoded through the
//! `{success, data, error}` envelope, so callers only ever see
//! `Result<T, ApiError>`.

use contracts::shared::envelope::decode_envelope;
use contracts::shared::error::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

/// Port of the analytics API when no override is configured
pub const BACKEND_PORT: u16 = 5001;

/// localStorage key that overrides the API origin (e.g. "https://bi.example.com")
pub const API_BASE_STORAGE_KEY: &str = "sugarbi_api_base";

/// Get the base URL for API requests
///
/// Uses the `sugarbi_api_base` localStorage entry when present, otherwise
/// the current window host on port 5001.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let override_base = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|storage| storage.get_item(API_BASE_STORAGE_KEY).ok().flatten());
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "localhost".to_string());
    resolve_base(&protocol, &hostname, override_base.as_deref())
}

fn resolve_base(protocol: &str, hostname: &str, override_base: Option<&str>) -> String {
    match override_base.map(str::trim) {
        Some(base) if !base.is_empty() => base.trim_end_matches('/').to_string(),
        _ => format!("{}//{}:{}", protocol, hostname, BACKEND_PORT),
    }
}

/// Build a full API URL from a path ("/api/...")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Append a serialised query string, skipping the `?` when it is empty.
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
    if qs.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, qs))
    }
}

fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.credentials(RequestCredentials::Include)
}

async fn send(request: Request) -> Result<Response, ApiError> {
    request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

/// Read the body text and decode it through the envelope.
pub async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode_envelope(status, &body)
}

/// GET `path` and unwrap the envelope payload
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let request = with_credentials(Request::get(&api_url(path)))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = send(request).await?;
    read_envelope(response).await
}

/// GET `path?query` and unwrap the envelope payload
pub async fn get_json_with_query<T, Q>(path: &str, query: &Q) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    Q: Serialize,
{
    get_json(&with_query(path, query)?).await
}

/// POST a JSON body and unwrap the envelope payload
pub async fn post_json<T, B>(path: &str, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let response = post_raw(path, body).await?;
    read_envelope(response).await
}

/// POST a JSON body and hand back the raw response for endpoints that
/// do not follow the envelope (auth).
pub async fn post_raw<B: Serialize>(path: &str, body: &B) -> Result<Response, ApiError> {
    let request = with_credentials(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?;
    send(request).await
}

/// GET returning the raw response, see [`post_raw`]
pub async fn get_raw(path: &str) -> Result<Response, ApiError> {
    let request = with_credentials(Request::get(&api_url(path)))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    send(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::filters::FilterSelection;

    #[test]
    fn test_resolve_base_default_port() {
        assert_eq!(
            resolve_base("http:", "localhost", None),
            "http://localhost:5001"
        );
    }

    #[test]
    fn test_resolve_base_override() {
        assert_eq!(
            resolve_base("http:", "localhost", Some("https://bi.example.com/")),
            "https://bi.example.com"
        );
        assert_eq!(
            resolve_base("https:", "bi.local", Some("  ")),
            "https://bi.local:5001"
        );
    }

    #[test]
    fn test_with_query_empty_selection() {
        let path = with_query("/api/cosecha", &FilterSelection::default()).unwrap();
        assert_eq!(path, "/api/cosecha");
    }

    #[test]
    fn test_with_query_keeps_order() {
        let selection = FilterSelection {
            month: Some(3),
            zone: Some("Z1".into()),
            ..Default::default()
        };
        let path = with_query("/api/cosecha", &selection).unwrap();
        assert!(path.starts_with("/api/cosecha?"));
        assert!(path.ends_with("mes=3&zona_id=Z1"));
    }
}
