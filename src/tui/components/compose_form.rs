//! # ComposeForm Component
//!
//! The compose view: four labeled fields (from, to, subject, body) with Tab
//! focus order, plus a footer showing either key hints, a validation hint,
//! or the in-flight "Sending..." indicator.
//!
//! ## State Management
//!
//! The field buffers are internal state — they belong to the terminal form,
//! not to core `App` state. The form emits `FormEvent::Submit(Draft)` with a
//! read-only snapshot; the reducer decides whether a send actually starts.
//! `clear()` is invoked by the event loop on `Effect::ClearDraft`, so the
//! draft empties only on a confirmed success and survives every failure.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::api::Draft;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

use super::field_input::FieldInput;

/// Spinner frames for the in-flight send indicator.
const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// The four form fields, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    From,
    To,
    Subject,
    Body,
}

impl Field {
    const ALL: [Field; 4] = [Field::From, Field::To, Field::Subject, Field::Body];

    fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// High-level events emitted by the ComposeForm.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// User submitted a complete draft (Ctrl+S with all fields filled).
    Submit(Draft),
}

pub struct ComposeForm {
    from: FieldInput,
    to: FieldInput,
    subject: FieldInput,
    body: FieldInput,
    focus: Field,
    /// Inline validation hint shown after a rejected submit attempt.
    hint: Option<String>,
    /// Prop: true while a send is in flight (set from App state each frame).
    pub sending: bool,
}

impl ComposeForm {
    pub fn new() -> Self {
        Self {
            from: FieldInput::new(false),
            to: FieldInput::new(false),
            subject: FieldInput::new(false),
            body: FieldInput::new(true),
            focus: Field::From,
            hint: None,
            sending: false,
        }
    }

    /// Snapshot of the current field contents.
    pub fn draft(&self) -> Draft {
        Draft {
            from: self.from.text().to_string(),
            to: self.to.text().to_string(),
            subject: self.subject.text().to_string(),
            body: self.body.text().to_string(),
        }
    }

    /// Empty all fields and return focus to the first one.
    /// Called only after a confirmed successful send.
    pub fn clear(&mut self) {
        self.from.clear();
        self.to.clear();
        self.subject.clear();
        self.body.clear();
        self.focus = Field::From;
        self.hint = None;
    }

    fn focused_field(&mut self) -> &mut FieldInput {
        match self.focus {
            Field::From => &mut self.from,
            Field::To => &mut self.to,
            Field::Subject => &mut self.subject,
            Field::Body => &mut self.body,
        }
    }

    fn try_submit(&mut self) -> Option<FormEvent> {
        if self.sending {
            return None;
        }
        let draft = self.draft();
        if !draft.is_complete() {
            self.hint = Some(String::from("All four fields are required"));
            return None;
        }
        self.hint = None;
        Some(FormEvent::Submit(draft))
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, spinner_frame: usize) {
        let [header_row, to_row, subject_row, body_row, footer_row] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .areas(area);

        let focus = self.focus;
        self.from
            .render(frame, header_row, "From", focus == Field::From);
        self.to.render(frame, to_row, "To", focus == Field::To);
        self.subject
            .render(frame, subject_row, "Subject", focus == Field::Subject);
        self.body.render(
            frame,
            body_row,
            "Body (basic HTML allowed)",
            focus == Field::Body,
        );

        let footer: Line = if self.sending {
            let glyph = SPINNER[spinner_frame % SPINNER.len()];
            Line::from(Span::styled(
                format!("{glyph} Sending..."),
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(hint) = &self.hint {
            Line::from(Span::styled(
                hint.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                "Tab: next field | Ctrl+S: send | Ctrl+O: sent emails",
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(Paragraph::new(footer), footer_row);
    }
}

impl EventHandler for ComposeForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Send => self.try_submit(),
            TuiEvent::Tab => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::BackTab => {
                self.focus = self.focus.prev();
                None
            }
            // Enter advances through the header fields; in the body it's a newline.
            TuiEvent::Submit if self.focus != Field::Body => {
                self.focus = self.focus.next();
                None
            }
            // Up/Down jump between fields unless editing the body.
            TuiEvent::CursorUp if self.focus != Field::Body => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::CursorDown if self.focus != Field::Body => {
                self.focus = self.focus.next();
                None
            }
            other => {
                // Editing stays live during a send; only submission is
                // disabled while a send is in flight.
                self.focused_field().handle_event(other);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut ComposeForm, text: &str) {
        for c in text.chars() {
            form.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn complete_form() -> ComposeForm {
        let mut form = ComposeForm::new();
        fill(&mut form, "a@x.com");
        form.handle_event(&TuiEvent::Tab);
        fill(&mut form, "b@x.com");
        form.handle_event(&TuiEvent::Tab);
        fill(&mut form, "Hi");
        form.handle_event(&TuiEvent::Tab);
        fill(&mut form, "Hello");
        form
    }

    #[test]
    fn test_submit_emits_snapshot_of_typed_fields() {
        let mut form = complete_form();
        let event = form.handle_event(&TuiEvent::Send);
        assert_eq!(
            event,
            Some(FormEvent::Submit(Draft {
                from: "a@x.com".to_string(),
                to: "b@x.com".to_string(),
                subject: "Hi".to_string(),
                body: "Hello".to_string(),
            }))
        );
    }

    #[test]
    fn test_incomplete_form_blocks_submit_with_hint() {
        let mut form = ComposeForm::new();
        fill(&mut form, "a@x.com");
        let event = form.handle_event(&TuiEvent::Send);
        assert_eq!(event, None);
        assert!(form.hint.is_some());
    }

    #[test]
    fn test_submit_blocked_while_sending() {
        let mut form = complete_form();
        form.sending = true;
        assert_eq!(form.handle_event(&TuiEvent::Send), None);
    }

    #[test]
    fn test_editing_stays_live_while_sending() {
        // Only the submit action is disabled mid-send; typing still lands.
        let mut form = complete_form();
        form.sending = true;
        form.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(form.draft().body, "Hello!");
        form.handle_event(&TuiEvent::Backspace);
        assert_eq!(form.draft().body, "Hello");
    }

    #[test]
    fn test_clear_empties_all_fields() {
        let mut form = complete_form();
        form.clear();
        assert_eq!(form.draft(), Draft::default());
        assert_eq!(form.focus, Field::From);
    }

    #[test]
    fn test_failed_send_leaves_fields_intact() {
        // The form itself never clears on failure — only clear() empties it.
        let mut form = complete_form();
        let before = form.draft();
        form.handle_event(&TuiEvent::Send);
        assert_eq!(form.draft(), before);
    }

    #[test]
    fn test_tab_cycles_and_wraps() {
        let mut form = ComposeForm::new();
        assert_eq!(form.focus, Field::From);
        for _ in 0..4 {
            form.handle_event(&TuiEvent::Tab);
        }
        assert_eq!(form.focus, Field::From);
        form.handle_event(&TuiEvent::BackTab);
        assert_eq!(form.focus, Field::Body);
    }

    #[test]
    fn test_enter_advances_header_fields_but_not_body() {
        let mut form = ComposeForm::new();
        form.handle_event(&TuiEvent::Submit);
        assert_eq!(form.focus, Field::To);
        form.focus = Field::Body;
        fill(&mut form, "a");
        form.handle_event(&TuiEvent::Submit);
        assert_eq!(form.draft().body, "a\n");
    }
}
