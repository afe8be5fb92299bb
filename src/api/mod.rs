//! # Backend API
//!
//! Everything that talks to the remote mail-sending service lives here:
//! the wire types ([`types`]) and the HTTP client ([`client`]). The rest
//! of the app depends on the [`MailApi`] trait, never on reqwest directly.

pub mod client;
pub mod types;

pub use client::{ApiError, HttpMailApi, MailApi};
pub use types::{Draft, EmailPage, EmailRecord, Pagination, SendResponse, format_timestamp};
