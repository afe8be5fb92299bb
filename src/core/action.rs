//! # Actions
//!
//! Everything that can happen in maildeck becomes an `Action`.
//! User submits the compose form? That's `Action::SubmitDraft`.
//! A page fetch completes? That's `Action::PageLoaded`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller must
//! perform. No side effects here — HTTP happens in the TUI event loop.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: apply an action, assert on the state
//! and the returned effect.

use log::{info, warn};

use crate::api::{ApiError, Draft, EmailPage, SendResponse};
use crate::core::state::{App, Notice, View};

#[derive(Debug)]
pub enum Action {
    /// Shell: make the given view active.
    SwitchView(View),
    /// Composer: submit the draft (all four fields already non-empty).
    SubmitDraft(Draft),
    /// Composer: the in-flight send resolved.
    SendFinished(Result<SendResponse, ApiError>),
    /// List: fetch the given 1-based page.
    RequestPage(u32),
    /// List: re-fetch whatever page is currently shown.
    Refresh,
    /// List: a fetch resolved. `seq` identifies which request this answers.
    PageLoaded {
        seq: u64,
        page: u32,
        result: Result<EmailPage, ApiError>,
    },
    /// List: open the detail modal for the record at this index.
    SelectEmail(usize),
    /// List: close the detail modal.
    CloseDetail,
    /// Startup connectivity probe resolved.
    ProbeFinished(Result<serde_json::Value, ApiError>),
    /// Clear the current toast.
    DismissNotice,
    Quit,
}

/// I/O the event loop must perform after an `update()` call.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Spawn a send task for this draft.
    SendDraft(Draft),
    /// Spawn a fetch task for this page, tagged with the fetch ticket.
    FetchPage { page: u32, seq: u64 },
    /// The send succeeded: the compose form should empty its fields.
    ClearDraft,
}

/// Begin a page fetch: bump the ticket, flag loading, return the effect.
fn start_fetch(app: &mut App, page: u32) -> Effect {
    app.fetch_seq += 1;
    app.loading = true;
    app.status_message = format!("Loading page {page}...");
    Effect::FetchPage {
        page,
        seq: app.fetch_seq,
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SwitchView(view) => {
            app.view = view;
            // First visit to the sent view triggers the initial load.
            // Returning later keeps whatever page was showing.
            if view == View::Sent && !app.loaded_once && !app.loading {
                return start_fetch(app, 1);
            }
            Effect::None
        }

        Action::SubmitDraft(draft) => {
            if app.sending {
                // A send is already in flight; never allow an overlap.
                return Effect::None;
            }
            if !draft.is_complete() {
                return Effect::None;
            }
            app.sending = true;
            app.status_message = String::from("Sending...");
            Effect::SendDraft(draft)
        }

        Action::SendFinished(result) => {
            // Whatever happened, the composer returns to Idle.
            app.sending = false;
            app.status_message.clear();
            match result {
                Ok(resp) if resp.success => {
                    let text = resp
                        .message
                        .unwrap_or_else(|| String::from("Email sent successfully!"));
                    info!("send succeeded: {text}");
                    app.notice = Some(Notice::success(text));
                    Effect::ClearDraft
                }
                Ok(resp) => {
                    let text = resp
                        .message
                        .unwrap_or_else(|| String::from("Failed to send email"));
                    warn!("send rejected by backend: {text}");
                    app.notice = Some(Notice::error(text));
                    Effect::None
                }
                Err(err) => {
                    warn!("send failed: {err}");
                    let text = match &err {
                        ApiError::Api { .. } => err.user_message(),
                        _ => String::from("An error occurred while sending email"),
                    };
                    app.notice = Some(Notice::error(text));
                    Effect::None
                }
            }
        }

        Action::RequestPage(page) => {
            // Bounds hold even before the first successful load: the
            // initial fetch arrives via SwitchView/Refresh, so a request
            // outside [1, total_pages] is always a disabled control.
            if app.loading || page < 1 || page > app.total_pages {
                return Effect::None;
            }
            start_fetch(app, page)
        }

        Action::Refresh => {
            if app.loading {
                return Effect::None;
            }
            start_fetch(app, app.page)
        }

        Action::PageLoaded { seq, page, result } => {
            if seq != app.fetch_seq {
                // Superseded by a newer request; a late response must not
                // clobber the state that request produced.
                info!("dropping stale page response (seq {seq} != {})", app.fetch_seq);
                return Effect::None;
            }
            app.loading = false;
            app.status_message.clear();
            match result {
                Ok(fetched) => {
                    app.emails = fetched.data;
                    app.total_pages = fetched.pagination.pages.max(1);
                    app.page = page.min(app.total_pages);
                    app.loaded_once = true;
                }
                Err(err) => {
                    // Keep the previously displayed page; stale but consistent.
                    warn!("failed to load page {page}: {err}");
                    app.status_message = String::from("Failed to load emails");
                }
            }
            Effect::None
        }

        Action::SelectEmail(index) => {
            if let Some(record) = app.emails.get(index) {
                app.selected = Some(record.clone());
            }
            Effect::None
        }

        Action::CloseDetail => {
            app.selected = None;
            Effect::None
        }

        Action::ProbeFinished(result) => {
            match result {
                Ok(body) => {
                    info!("backend reachable: {body}");
                    app.status_message = String::from("Backend connected");
                }
                Err(err) => {
                    warn!("backend unreachable: {err}");
                    app.notice = Some(Notice::error("Backend unreachable"));
                }
            }
            Effect::None
        }

        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{EmailRecord, Pagination};
    use crate::core::state::NoticeKind;

    fn valid_draft() -> Draft {
        Draft {
            from: "a@x.com".to_string(),
            to: "b@x.com".to_string(),
            subject: "Hi".to_string(),
            body: "Hello".to_string(),
        }
    }

    fn record(id: i64) -> EmailRecord {
        EmailRecord {
            id,
            from_email: "a@x.com".to_string(),
            to_email: "b@x.com".to_string(),
            subject: format!("subject {id}"),
            body_preview: String::new(),
            full_body: String::new(),
            sent_at: "2026-03-05 14:30:00".to_string(),
            status: "sent".to_string(),
        }
    }

    fn page_of(ids: &[i64], pages: u32) -> EmailPage {
        EmailPage {
            data: ids.iter().copied().map(record).collect(),
            pagination: Pagination { pages },
        }
    }

    #[test]
    fn test_submit_enters_sending_and_spawns_send() {
        let mut app = App::new(10);
        let effect = update(&mut app, Action::SubmitDraft(valid_draft()));
        assert_eq!(effect, Effect::SendDraft(valid_draft()));
        assert!(app.sending);
    }

    #[test]
    fn test_submit_refused_while_send_in_flight() {
        let mut app = App::new(10);
        update(&mut app, Action::SubmitDraft(valid_draft()));
        let effect = update(&mut app, Action::SubmitDraft(valid_draft()));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_submit_refused_for_incomplete_draft() {
        let mut app = App::new(10);
        let mut draft = valid_draft();
        draft.to.clear();
        let effect = update(&mut app, Action::SubmitDraft(draft));
        assert_eq!(effect, Effect::None);
        assert!(!app.sending);
    }

    #[test]
    fn test_send_success_clears_draft_and_notifies_with_server_message() {
        let mut app = App::new(10);
        update(&mut app, Action::SubmitDraft(valid_draft()));
        let effect = update(
            &mut app,
            Action::SendFinished(Ok(SendResponse {
                success: true,
                message: Some("Sent!".to_string()),
            })),
        );
        assert_eq!(effect, Effect::ClearDraft);
        assert!(!app.sending);
        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.text, "Sent!");
    }

    #[test]
    fn test_send_failure_default_message() {
        let mut app = App::new(10);
        update(&mut app, Action::SubmitDraft(valid_draft()));
        update(
            &mut app,
            Action::SendFinished(Ok(SendResponse {
                success: false,
                message: None,
            })),
        );
        assert_eq!(app.notice.unwrap().text, "Failed to send email");
    }

    #[test]
    fn test_send_rejected_keeps_draft() {
        let mut app = App::new(10);
        update(&mut app, Action::SubmitDraft(valid_draft()));
        let effect = update(
            &mut app,
            Action::SendFinished(Ok(SendResponse {
                success: false,
                message: Some("Mailbox full".to_string()),
            })),
        );
        // No ClearDraft effect: the form keeps what the user typed.
        assert_eq!(effect, Effect::None);
        assert!(!app.sending);
        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Mailbox full");
    }

    #[test]
    fn test_send_server_error_surfaces_server_message() {
        let mut app = App::new(10);
        update(&mut app, Action::SubmitDraft(valid_draft()));
        let effect = update(
            &mut app,
            Action::SendFinished(Err(ApiError::Api {
                status: 500,
                message: "SMTP timeout".to_string(),
            })),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.notice.unwrap().text, "SMTP timeout");
    }

    #[test]
    fn test_send_transport_error_is_generic() {
        let mut app = App::new(10);
        update(&mut app, Action::SubmitDraft(valid_draft()));
        update(
            &mut app,
            Action::SendFinished(Err(ApiError::Network("refused".to_string()))),
        );
        assert_eq!(
            app.notice.unwrap().text,
            "An error occurred while sending email"
        );
    }

    #[test]
    fn test_first_switch_to_sent_fetches_page_one() {
        let mut app = App::new(10);
        let effect = update(&mut app, Action::SwitchView(View::Sent));
        assert_eq!(effect, Effect::FetchPage { page: 1, seq: 1 });
        assert!(app.loading);
    }

    #[test]
    fn test_returning_to_sent_view_keeps_page() {
        let mut app = App::new(10);
        update(&mut app, Action::SwitchView(View::Sent));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 1,
                page: 1,
                result: Ok(page_of(&[1], 3)),
            },
        );
        update(&mut app, Action::RequestPage(3));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 2,
                page: 3,
                result: Ok(page_of(&[9], 3)),
            },
        );
        update(&mut app, Action::SwitchView(View::Compose));
        let effect = update(&mut app, Action::SwitchView(View::Sent));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.page, 3);
    }

    #[test]
    fn test_page_loaded_replaces_records_wholesale() {
        let mut app = App::new(10);
        update(&mut app, Action::SwitchView(View::Sent));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 1,
                page: 1,
                result: Ok(page_of(&[1, 2, 3], 2)),
            },
        );
        update(&mut app, Action::RequestPage(2));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 2,
                page: 2,
                result: Ok(page_of(&[4, 5], 2)),
            },
        );
        let ids: Vec<i64> = app.emails.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 5]);
        assert_eq!(app.page, 2);
    }

    #[test]
    fn test_out_of_range_page_requests_are_not_issued() {
        let mut app = App::new(10);
        update(&mut app, Action::SwitchView(View::Sent));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 1,
                page: 1,
                result: Ok(page_of(&[1], 3)),
            },
        );
        assert_eq!(update(&mut app, Action::RequestPage(0)), Effect::None);
        assert_eq!(update(&mut app, Action::RequestPage(4)), Effect::None);
        assert!(matches!(
            update(&mut app, Action::RequestPage(3)),
            Effect::FetchPage { page: 3, .. }
        ));
    }

    #[test]
    fn test_next_refused_after_failed_first_fetch() {
        let mut app = App::new(10);
        update(&mut app, Action::SwitchView(View::Sent));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 1,
                page: 1,
                result: Err(ApiError::Network("refused".to_string())),
            },
        );
        // Footer shows "Next" disabled; the reducer must agree.
        assert!(!app.can_page_forward());
        assert_eq!(update(&mut app, Action::RequestPage(2)), Effect::None);
    }

    #[test]
    fn test_no_fetch_while_one_in_flight() {
        let mut app = App::new(10);
        update(&mut app, Action::SwitchView(View::Sent));
        assert_eq!(update(&mut app, Action::RequestPage(1)), Effect::None);
        assert_eq!(update(&mut app, Action::Refresh), Effect::None);
    }

    #[test]
    fn test_stale_page_response_is_dropped() {
        let mut app = App::new(10);
        update(&mut app, Action::SwitchView(View::Sent)); // seq 1
        update(
            &mut app,
            Action::PageLoaded {
                seq: 1,
                page: 1,
                result: Ok(page_of(&[1], 3)),
            },
        );
        update(&mut app, Action::RequestPage(2)); // seq 2, never resolves here
        app.loading = false; // pretend the UI recovered somehow
        update(&mut app, Action::RequestPage(3)); // seq 3

        // The slow page-2 response arrives after page 3 was requested.
        update(
            &mut app,
            Action::PageLoaded {
                seq: 2,
                page: 2,
                result: Ok(page_of(&[99], 3)),
            },
        );
        assert!(app.emails.iter().all(|r| r.id != 99));
        assert!(app.loading); // still waiting on seq 3
    }

    #[test]
    fn test_failed_fetch_keeps_prior_page() {
        let mut app = App::new(10);
        update(&mut app, Action::SwitchView(View::Sent));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 1,
                page: 1,
                result: Ok(page_of(&[1, 2], 2)),
            },
        );
        update(&mut app, Action::RequestPage(2));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 2,
                page: 2,
                result: Err(ApiError::Network("timeout".to_string())),
            },
        );
        assert!(!app.loading);
        assert_eq!(app.emails.len(), 2);
        assert_eq!(app.page, 1); // cursor unchanged
    }

    #[test]
    fn test_refresh_refetches_current_page() {
        let mut app = App::new(10);
        update(&mut app, Action::SwitchView(View::Sent));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 1,
                page: 1,
                result: Ok(page_of(&[1], 1)),
            },
        );
        // page == total_pages, yet refresh still fires.
        assert!(matches!(
            update(&mut app, Action::Refresh),
            Effect::FetchPage { page: 1, .. }
        ));
    }

    #[test]
    fn test_selection_snapshot_and_replace() {
        let mut app = App::new(10);
        update(&mut app, Action::SwitchView(View::Sent));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 1,
                page: 1,
                result: Ok(page_of(&[1, 2], 1)),
            },
        );
        update(&mut app, Action::SelectEmail(0));
        assert_eq!(app.selected.as_ref().unwrap().id, 1);
        // Selecting another record replaces without an intermediate close.
        update(&mut app, Action::SelectEmail(1));
        assert_eq!(app.selected.as_ref().unwrap().id, 2);
        update(&mut app, Action::CloseDetail);
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_selection_survives_page_change() {
        let mut app = App::new(10);
        update(&mut app, Action::SwitchView(View::Sent));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 1,
                page: 1,
                result: Ok(page_of(&[1], 2)),
            },
        );
        update(&mut app, Action::SelectEmail(0));
        update(&mut app, Action::RequestPage(2));
        update(
            &mut app,
            Action::PageLoaded {
                seq: 2,
                page: 2,
                result: Ok(page_of(&[7], 2)),
            },
        );
        // Snapshot semantics: the old record is still what's shown.
        assert_eq!(app.selected.as_ref().unwrap().id, 1);
    }

    #[test]
    fn test_select_out_of_bounds_is_noop() {
        let mut app = App::new(10);
        update(&mut app, Action::SelectEmail(5));
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_probe_failure_raises_notice() {
        let mut app = App::new(10);
        update(
            &mut app,
            Action::ProbeFinished(Err(ApiError::Network("refused".to_string()))),
        );
        assert_eq!(app.notice.unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(10);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
