//! # Application State
//!
//! Core business state for maildeck. This module contains domain state only -
//! no TUI-specific types. Presentation state (text buffers, cursors, row
//! highlight) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── view: View                  // which view is active (the shell)
//! ├── sending: bool               // a send is in flight (submit disabled)
//! ├── emails: Vec<EmailRecord>    // current page of sent emails
//! ├── page / total_pages          // 1-based pagination cursor
//! ├── loading: bool               // a page fetch is in flight
//! ├── loaded_once: bool           // at least one fetch has succeeded
//! ├── fetch_seq: u64              // ticket for discarding stale fetches
//! ├── selected: Option<Record>    // detail-modal snapshot
//! ├── status_message: String      // title bar text
//! └── notice: Option<Notice>      // toast-style notification
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::api::EmailRecord;

/// Which of the two views the shell currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Compose,
    Sent,
}

/// Visual flavor of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A non-blocking, user-visible notification (rendered as a toast line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

pub struct App {
    pub view: View,
    /// True while a send is in flight. Submission is refused until the
    /// outcome arrives, so rapid repeated submits cannot duplicate a send.
    pub sending: bool,
    /// The currently displayed page of records, replaced wholesale on
    /// every successful fetch and never mutated locally.
    pub emails: Vec<EmailRecord>,
    pub page: u32,
    pub total_pages: u32,
    /// True while a page fetch is in flight (pagination controls disabled).
    pub loading: bool,
    /// True after the first successful fetch; until then `total_pages` is
    /// a placeholder and the bounds guard only rejects pages below 1.
    pub loaded_once: bool,
    /// Monotonic ticket. A completed fetch whose ticket is not the latest
    /// is stale and must be dropped, so a slow response can never
    /// overwrite a newer page.
    pub fetch_seq: u64,
    /// Snapshot of the record selected for the detail modal. Taken at
    /// selection time and not kept live if the list changes underneath.
    pub selected: Option<EmailRecord>,
    /// Records requested per page, from config.
    pub page_size: u32,
    pub status_message: String,
    pub notice: Option<Notice>,
}

impl App {
    pub fn new(page_size: u32) -> Self {
        Self {
            view: View::Compose,
            sending: false,
            emails: Vec::new(),
            page: 1,
            total_pages: 1,
            loading: false,
            loaded_once: false,
            fetch_seq: 0,
            selected: None,
            page_size,
            status_message: String::from("Welcome to maildeck"),
            notice: None,
        }
    }

    /// Whether the "previous page" control should be active.
    pub fn can_page_back(&self) -> bool {
        !self.loading && self.page > 1
    }

    /// Whether the "next page" control should be active.
    pub fn can_page_forward(&self) -> bool {
        !self.loading && self.loaded_once && self.page < self.total_pages
    }
}
