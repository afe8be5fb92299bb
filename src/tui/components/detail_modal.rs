//! # DetailModal Component
//!
//! Centered overlay showing the full data of a selected email. The record
//! is a snapshot taken at selection time; the modal never reads back into
//! the live list.
//!
//! ## Sanitization Boundary
//!
//! `full_body` is server-supplied markup and is untrusted. It passes
//! through [`sanitize_body`] before rendering: ammonia with an empty tag
//! allow-list strips every element, then the remaining entities are decoded
//! for plain-text terminal display. Raw markup is never rendered.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::api::EmailRecord;

/// Strips all markup from a server-supplied HTML body and decodes entities,
/// leaving plain text safe for terminal display.
pub fn sanitize_body(html: &str) -> String {
    let stripped = ammonia::Builder::empty()
        .clean(html)
        .to_string();
    html_escape::decode_html_entities(&stripped).to_string()
}

pub struct DetailModal {
    /// Vertical scroll offset into the body text.
    pub scroll: u16,
}

impl DetailModal {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// PageUp/PageDown jump in larger steps through a long body.
    const PAGE_STEP: u16 = 10;

    pub fn scroll_page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(Self::PAGE_STEP);
    }

    pub fn scroll_page_down(&mut self) {
        self.scroll = self.scroll.saturating_add(Self::PAGE_STEP);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, email: &EmailRecord) {
        // Center the modal at roughly 70% x 80% of the screen.
        let [h_area] = Layout::horizontal([Constraint::Percentage(70)])
            .flex(Flex::Center)
            .areas(area);
        let [modal_area] = Layout::vertical([Constraint::Percentage(80)])
            .flex(Flex::Center)
            .areas(h_area);

        frame.render_widget(Clear, modal_area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!("Email Details (id {})", email.id))
            .title_bottom(Line::from("↑/↓: scroll  Esc: close").right_aligned());

        let label = Style::default().fg(Color::DarkGray);
        let status_style = if email.is_sent() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Yellow)
        };

        let mut lines = vec![
            Line::from(vec![Span::styled("From:    ", label), Span::raw(email.from_email.clone())]),
            Line::from(vec![Span::styled("To:      ", label), Span::raw(email.to_email.clone())]),
            Line::from(vec![
                Span::styled("Subject: ", label),
                Span::styled(
                    email.subject.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Sent at: ", label),
                Span::raw(email.formatted_sent_at()),
            ]),
            Line::from(vec![
                Span::styled("Status:  ", label),
                Span::styled(email.status.clone(), status_style),
            ]),
            Line::from(""),
        ];
        for body_line in sanitize_body(&email.full_body).lines() {
            lines.push(Line::from(body_line.to_string()));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, modal_area);
    }
}
