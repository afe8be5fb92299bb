//! # EmailTable Component
//!
//! The sent view: a table of the current page of sent emails with a row
//! cursor, a status badge per row, and a pagination footer.
//!
//! All email data comes from `App` as props; the only internal state is the
//! highlighted row index. The pagination footer mirrors the reducer's
//! guards — "Prev"/"Next" are dimmed exactly when the reducer would refuse
//! the request, so the controls never promise a page that won't be fetched.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Cell, Paragraph, Row, Table, TableState};

use crate::core::state::App;

/// Spinner frames for the first-load indicator.
const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct EmailTable {
    /// Highlighted row on the current page.
    pub cursor: usize,
}

impl EmailTable {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, row_count: usize) {
        if self.cursor + 1 < row_count {
            self.cursor += 1;
        }
    }

    /// Keep the cursor on a real row after the page contents change.
    pub fn clamp(&mut self, row_count: usize) {
        if row_count == 0 {
            self.cursor = 0;
        } else if self.cursor >= row_count {
            self.cursor = row_count - 1;
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, app: &App, spinner_frame: usize) {
        let [table_area, footer_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Sent Emails");

        if app.loading && !app.loaded_once {
            let glyph = SPINNER[spinner_frame % SPINNER.len()];
            let loading = Paragraph::new(format!("{glyph} Loading emails..."))
                .block(block)
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(loading, table_area);
            render_footer(frame, footer_area, app);
            return;
        }

        if app.emails.is_empty() {
            let empty = Paragraph::new("No emails sent yet")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, table_area);
            render_footer(frame, footer_area, app);
            return;
        }

        self.clamp(app.emails.len());

        let header = Row::new(vec!["From / To", "Subject", "Date", "Status"]).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = app
            .emails
            .iter()
            .map(|email| {
                Row::new(vec![
                    Cell::from(format!("{}\n→ {}", email.from_email, email.to_email)),
                    Cell::from(format!("{}\n{}", email.subject, email.body_preview)),
                    Cell::from(email.formatted_sent_at()),
                    status_cell(email.is_sent(), &email.status),
                ])
                .height(2)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Length(18),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

        let mut table_state = TableState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(table, table_area, &mut table_state);

        render_footer(frame, footer_area, app);
    }
}

/// Positive badge only for the exact status "sent"; everything else gets
/// the single alert class. This binary split is deliberate — the backend's
/// status vocabulary is unknown beyond "sent".
fn status_cell(is_sent: bool, status: &str) -> Cell<'static> {
    if is_sent {
        Cell::from(format!("✓ {status}")).style(Style::default().fg(Color::Green))
    } else {
        Cell::from(format!("! {status}")).style(Style::default().fg(Color::Yellow))
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);

    let spans = vec![
        Span::styled(
            format!("Showing page {} of {}", app.page, app.total_pages),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("   "),
        Span::styled(
            "← Prev",
            if app.can_page_back() { enabled } else { disabled },
        ),
        Span::raw("  "),
        Span::styled(
            "Next →",
            if app.can_page_forward() { enabled } else { disabled },
        ),
        Span::raw("  "),
        Span::styled("r: refresh", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled("Enter: details", Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_movement_stays_in_bounds() {
        let mut table = EmailTable::new();
        table.move_up();
        assert_eq!(table.cursor, 0);
        table.move_down(3);
        table.move_down(3);
        table.move_down(3);
        assert_eq!(table.cursor, 2);
    }

    #[test]
    fn test_clamp_after_shorter_page() {
        let mut table = EmailTable::new();
        table.cursor = 9;
        table.clamp(4);
        assert_eq!(table.cursor, 3);
        table.clamp(0);
        assert_eq!(table.cursor, 0);
    }
}
