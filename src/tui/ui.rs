//! Top-level frame layout: title bar, active view, notice line, and the
//! detail modal drawn last so it floats above everything.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::core::state::{App, NoticeKind, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::TitleBar;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area, notice_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    let mut title_bar = TitleBar {
        view: app.view,
        backend_url: tui.backend_url.clone(),
        status_message: app.status_message.clone(),
    };
    title_bar.render(frame, title_area);

    match app.view {
        View::Compose => {
            tui.compose_form.sending = app.sending;
            tui.compose_form.render(frame, main_area, spinner_frame);
        }
        View::Sent => {
            tui.email_table.render(frame, main_area, app, spinner_frame);
        }
    }

    draw_notice(frame, notice_area, app);

    // Modal floats over whichever view is active.
    if let Some(email) = &app.selected {
        tui.detail_modal.render(frame, frame.area(), email);
    }
}

fn draw_notice(frame: &mut Frame, area: Rect, app: &App) {
    let Some(notice) = &app.notice else {
        return;
    };
    let style = match notice.kind {
        NoticeKind::Success => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        NoticeKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };
    let prefix = match notice.kind {
        NoticeKind::Success => "✓ ",
        NoticeKind::Error => "✗ ",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!("{prefix}{}", notice.text), style)),
        area,
    );
}
