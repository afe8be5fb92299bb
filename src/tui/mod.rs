//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. HTTP
//! work never blocks the draw loop: `update()` returns an `Effect`, the
//! loop spawns a tokio task for it, and the task reports back by sending
//! an `Action` over an mpsc channel that the loop drains every tick.
//!
//! ## Redraw Strategy
//!
//! The loop uses conditional redraw: while a send or fetch is in flight it
//! draws every ~80ms so the spinner animates; when idle it sleeps up to
//! 500ms and only redraws on events.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{Draft, HttpMailApi, MailApi};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, View};
use crate::tui::component::EventHandler;
use crate::tui::components::{ComposeForm, DetailModal, EmailTable, FormEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub compose_form: ComposeForm,
    pub email_table: EmailTable,
    pub detail_modal: DetailModal,
    /// Shown in the title bar.
    pub backend_url: String,
}

impl TuiState {
    pub fn new(backend_url: String) -> Self {
        Self {
            compose_form: ComposeForm::new(),
            email_table: EmailTable::new(),
            detail_modal: DetailModal::new(),
            backend_url,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn MailApi> = Arc::new(HttpMailApi::new(config.backend_url.clone()));
    let mut app = App::new(config.page_size);
    let mut tui = TuiState::new(config.backend_url.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // One-shot connectivity probe at startup
    spawn_probe(api.clone(), tx.clone());

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        let animating = app.sending || app.loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of view or modal state
            if matches!(tui_event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // While the detail modal is open it captures everything
            if app.selected.is_some() {
                match tui_event {
                    TuiEvent::Escape | TuiEvent::InputChar('q') | TuiEvent::Submit => {
                        update(&mut app, Action::CloseDetail);
                        tui.detail_modal.scroll = 0;
                    }
                    TuiEvent::CursorUp => tui.detail_modal.scroll_up(),
                    TuiEvent::CursorDown => tui.detail_modal.scroll_down(),
                    TuiEvent::PageUp => tui.detail_modal.scroll_page_up(),
                    TuiEvent::PageDown => tui.detail_modal.scroll_page_down(),
                    _ => {}
                }
                continue;
            }

            // Ctrl+O toggles between the two views
            if matches!(tui_event, TuiEvent::SwitchView) {
                let target = match app.view {
                    View::Compose => View::Sent,
                    View::Sent => View::Compose,
                };
                let effect = update(&mut app, Action::SwitchView(target));
                dispatch_effect(effect, &mut app, &mut tui, &api, &tx, &mut should_quit);
                continue;
            }

            // View-specific dispatch
            match app.view {
                View::Compose => {
                    if matches!(tui_event, TuiEvent::Escape) {
                        update(&mut app, Action::DismissNotice);
                        continue;
                    }
                    if let Some(FormEvent::Submit(draft)) = tui.compose_form.handle_event(&tui_event)
                    {
                        let effect = update(&mut app, Action::SubmitDraft(draft));
                        dispatch_effect(effect, &mut app, &mut tui, &api, &tx, &mut should_quit);
                    }
                }
                View::Sent => {
                    let action = match tui_event {
                        TuiEvent::CursorUp => {
                            tui.email_table.move_up();
                            None
                        }
                        TuiEvent::CursorDown => {
                            tui.email_table.move_down(app.emails.len());
                            None
                        }
                        TuiEvent::CursorLeft | TuiEvent::PageUp | TuiEvent::InputChar('p') => {
                            Some(Action::RequestPage(app.page.saturating_sub(1)))
                        }
                        TuiEvent::CursorRight | TuiEvent::PageDown | TuiEvent::InputChar('n') => {
                            Some(Action::RequestPage(app.page + 1))
                        }
                        TuiEvent::InputChar('r') => Some(Action::Refresh),
                        TuiEvent::Submit => Some(Action::SelectEmail(tui.email_table.cursor)),
                        TuiEvent::Escape => Some(Action::DismissNotice),
                        _ => None,
                    };
                    if let Some(action) = action {
                        let effect = update(&mut app, action);
                        dispatch_effect(effect, &mut app, &mut tui, &api, &tx, &mut should_quit);
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task completions (send/fetch/probe results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            dispatch_effect(effect, &mut app, &mut tui, &api, &tx, &mut should_quit);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Interpret the effect an `update()` call returned. All I/O decisions
/// funnel through here so the reducer stays pure.
fn dispatch_effect(
    effect: Effect,
    app: &mut App,
    tui: &mut TuiState,
    api: &Arc<dyn MailApi>,
    tx: &mpsc::Sender<Action>,
    should_quit: &mut bool,
) {
    match effect {
        Effect::None => {}
        Effect::Quit => *should_quit = true,
        Effect::SendDraft(draft) => spawn_send(api.clone(), draft, tx.clone()),
        Effect::FetchPage { page, seq } => {
            spawn_fetch(api.clone(), page, seq, app.page_size, tx.clone());
        }
        Effect::ClearDraft => tui.compose_form.clear(),
    }
}

fn spawn_send(api: Arc<dyn MailApi>, draft: Draft, tx: mpsc::Sender<Action>) {
    info!("Spawning send task (to={})", draft.to);
    tokio::spawn(async move {
        let result = api.send_email(&draft).await;
        if tx.send(Action::SendFinished(result)).is_err() {
            debug!("Send result dropped: receiver gone");
        }
    });
}

fn spawn_fetch(api: Arc<dyn MailApi>, page: u32, seq: u64, limit: u32, tx: mpsc::Sender<Action>) {
    info!("Spawning fetch task (page={page}, seq={seq})");
    tokio::spawn(async move {
        let result = api.list_emails(page, limit).await;
        if tx.send(Action::PageLoaded { seq, page, result }).is_err() {
            debug!("Page result dropped: receiver gone");
        }
    });
}

fn spawn_probe(api: Arc<dyn MailApi>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let result = api.test_connection().await;
        if tx.send(Action::ProbeFinished(result)).is_err() {
            debug!("Probe result dropped: receiver gone");
        }
    });
}
