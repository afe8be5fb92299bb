//! Wire types for the mail backend API.
//!
//! These structs mirror the backend's JSON exactly; everything else in the
//! app works with them as read-only projections. Unknown fields in server
//! responses are ignored so backend additions don't break deserialization.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An outgoing email draft, exactly as the send endpoint expects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Draft {
    /// All four fields are required before a draft may be submitted.
    pub fn is_complete(&self) -> bool {
        !self.from.trim().is_empty()
            && !self.to.trim().is_empty()
            && !self.subject.trim().is_empty()
            && !self.body.trim().is_empty()
    }
}

/// Response from `POST /send-email` on the normal path.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// A previously sent email as returned by the list endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EmailRecord {
    pub id: i64,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    #[serde(default)]
    pub body_preview: String,
    #[serde(default)]
    pub full_body: String,
    pub sent_at: String,
    pub status: String,
}

impl EmailRecord {
    /// Binary status classification: exactly `"sent"` is positive,
    /// any other value collapses to the single "not sent" display class.
    pub fn is_sent(&self) -> bool {
        self.status == "sent"
    }

    /// The sent timestamp in display form (see [`format_timestamp`]).
    pub fn formatted_sent_at(&self) -> String {
        format_timestamp(&self.sent_at)
    }
}

/// Pagination metadata echoed by the list endpoint.
/// Only `pages` matters to the UI; other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub pages: u32,
}

/// One page of sent emails from `GET /get-emails`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailPage {
    pub data: Vec<EmailRecord>,
    pub pagination: Pagination,
}

/// Renders a backend timestamp as `MMM dd, yyyy HH:mm` (e.g. "Mar 05, 2026 14:30").
///
/// The backend sends either RFC 3339 or a bare `YYYY-MM-DD HH:MM:SS` string
/// depending on its database driver. If neither parses, the raw value is
/// returned verbatim rather than erroring.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%b %d, %Y %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str) -> EmailRecord {
        EmailRecord {
            id: 1,
            from_email: "a@x.com".to_string(),
            to_email: "b@x.com".to_string(),
            subject: "Hi".to_string(),
            body_preview: "Hello".to_string(),
            full_body: "<p>Hello</p>".to_string(),
            sent_at: "2026-03-05 14:30:00".to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_draft_complete_requires_all_fields() {
        let mut draft = Draft {
            from: "a@x.com".to_string(),
            to: "b@x.com".to_string(),
            subject: "Hi".to_string(),
            body: "Hello".to_string(),
        };
        assert!(draft.is_complete());

        draft.subject = "   ".to_string();
        assert!(!draft.is_complete());

        assert!(!Draft::default().is_complete());
    }

    #[test]
    fn test_status_classification_is_binary() {
        assert!(record("sent").is_sent());
        assert!(!record("queued").is_sent());
        assert!(!record("failed").is_sent());
        assert!(!record("SENT").is_sent()); // exact match only
    }

    #[test]
    fn test_format_timestamp_sql_style() {
        assert_eq!(format_timestamp("2026-03-05 14:30:00"), "Mar 05, 2026 14:30");
    }

    #[test]
    fn test_format_timestamp_rfc3339() {
        assert_eq!(
            format_timestamp("2026-03-05T14:30:00+00:00"),
            "Mar 05, 2026 14:30"
        );
    }

    #[test]
    fn test_format_timestamp_unparseable_is_verbatim() {
        assert_eq!(format_timestamp("yesterday-ish"), "yesterday-ish");
    }

    #[test]
    fn test_email_page_ignores_extra_pagination_fields() {
        let json = r#"{
            "data": [],
            "pagination": { "page": 1, "limit": 10, "total": 23, "pages": 3 }
        }"#;
        let page: EmailPage = serde_json::from_str(json).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.pages, 3);
    }

    #[test]
    fn test_send_response_message_optional() {
        let resp: SendResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.message.is_none());
    }
}
