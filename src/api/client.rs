//! HTTP client for the mail backend.
//!
//! A stateless wrapper over three remote calls: connectivity probe, send,
//! and paginated list. Each call is a single round trip — no retries, no
//! caching, no request deduplication. In particular `send_email` is NOT
//! idempotent (resubmitting sends a duplicate), so callers must never
//! auto-retry it.

use std::fmt;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::StatusCode;

use super::types::{Draft, EmailPage, SendResponse};

/// Errors from backend calls, normalized for the UI.
#[derive(Debug)]
pub enum ApiError {
    /// No response received (DNS, refused connection, timeout).
    Network(String),
    /// The server responded with a non-2xx status. `message` carries the
    /// body's `error`/`message` field when one was present.
    Api { status: u16, message: String },
    /// The response body could not be decoded.
    Parse(String),
}

impl ApiError {
    /// The user-facing text for a notification about this error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Network error".to_string(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Parse(_) => "Unexpected response from backend".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The three backend operations, behind a trait so tests (and any future
/// transport) can substitute their own implementation.
#[async_trait]
pub trait MailApi: Send + Sync {
    /// `GET /test` — backend health check. Any decodable JSON body counts
    /// as reachable; the shape is not interpreted.
    async fn test_connection(&self) -> Result<serde_json::Value, ApiError>;

    /// `POST /send-email` — submit a draft. Not idempotent.
    async fn send_email(&self, draft: &Draft) -> Result<SendResponse, ApiError>;

    /// `GET /get-emails?page={n}&limit={m}` — fetch one page of sent
    /// emails. `page` is 1-based, `limit` must be positive.
    async fn list_emails(&self, page: u32, limit: u32) -> Result<EmailPage, ApiError>;
}

/// Reqwest-backed [`MailApi`] over a base URL injected at construction.
/// Holds no session state between calls.
pub struct HttpMailApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMailApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pulls a human-readable message out of an error body. The backend is
/// inconsistent about the field name (`error` vs `message`), so both are
/// tried before falling back to the HTTP status line.
fn error_message_from_body(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    format!("request failed with status {}", status.as_u16())
}

#[async_trait]
impl MailApi for HttpMailApi {
    async fn test_connection(&self) -> Result<serde_json::Value, ApiError> {
        let response = self
            .http
            .get(self.url("/test"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message_from_body(status, &body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn send_email(&self, draft: &Draft) -> Result<SendResponse, ApiError> {
        debug!("POST /send-email from={} to={}", draft.from, draft.to);

        let response = self
            .http
            .post(self.url("/send-email"))
            .json(draft)
            .send()
            .await
            .map_err(|e| {
                warn!("send_email transport failure: {e}");
                ApiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(status, &body);
            warn!("send_email failed: HTTP {} ({message})", status.as_u16());
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn list_emails(&self, page: u32, limit: u32) -> Result<EmailPage, ApiError> {
        debug!("GET /get-emails page={page} limit={limit}");

        let response = self
            .http
            .get(self.url("/get-emails"))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await
            .map_err(|e| {
                warn!("list_emails transport failure: {e}");
                ApiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message_from_body(status, &body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = HttpMailApi::new("http://localhost:3000/api/");
        assert_eq!(client.url("/test"), "http://localhost:3000/api/test");
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        let msg = error_message_from_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "SMTP timeout", "message": "other"}"#,
        );
        assert_eq!(msg, "SMTP timeout");
    }

    #[test]
    fn test_error_message_falls_back_to_message_field() {
        let msg = error_message_from_body(
            StatusCode::BAD_REQUEST,
            r#"{"message": "missing recipient"}"#,
        );
        assert_eq!(msg, "missing recipient");
    }

    #[test]
    fn test_error_message_generic_when_body_unusable() {
        let msg = error_message_from_body(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(msg, "request failed with status 502");
    }

    #[test]
    fn test_user_message_for_network_error_is_generic() {
        let err = ApiError::Network("dns failure".to_string());
        assert_eq!(err.user_message(), "Network error");
    }
}
