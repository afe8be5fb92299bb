//! # TitleBar Component
//!
//! Single-line header: app name, view tabs, backend host, and the current
//! status message. Purely presentational — every field is a prop copied
//! from `App` state each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::View;
use crate::tui::component::Component;

pub struct TitleBar {
    pub view: View,
    pub backend_url: String,
    pub status_message: String,
}

fn tab_span(label: &str, active: bool) -> Span<'static> {
    if active {
        Span::styled(
            format!(" {label} "),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "maildeck ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            tab_span("Compose", self.view == View::Compose),
            tab_span("Sent", self.view == View::Sent),
            Span::styled(
                format!("  {}", self.backend_url),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!("  | {}", self.status_message),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
