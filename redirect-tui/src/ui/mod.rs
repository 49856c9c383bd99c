use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Padding, Paragraph, Row, Table, TableState},
    Frame,
};

mod delete_dialog;
mod form_dialog;
mod redirects_table;
pub(super) mod utils;

const TITLE: &str = " Redirects";

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Status / key hints
        ])
        .split(frame.area());

    render_title_bar(frame, root[0], app);
    redirects_table::render_redirects_table(frame, app, root[1]);
    render_status_bar(frame, root[2], app);

    match app.current_view {
        View::List => {}
        View::Create | View::Edit => form_dialog::render_form_dialog(frame, app),
        View::ConfirmDelete => delete_dialog::render_delete_confirm_dialog(frame, app),
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &mut App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(TITLE.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(area);

    // Throbber spins while a request is in flight, full symbol when idle
    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        label_area,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{} ", app.api_url),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right),
        cols[1],
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(Color::White),
        )),
        None if app.is_busy() => Line::from(Span::styled(
            " Working...",
            Style::default().fg(Color::DarkGray),
        )),
        None => {
            let key = Style::default().fg(Color::Yellow);
            Line::from(vec![
                Span::styled(" c", key),
                Span::raw(": Create  "),
                Span::styled("e", key),
                Span::raw(": Edit  "),
                Span::styled("d", key),
                Span::raw(": Delete  "),
                Span::styled("r", key),
                Span::raw(": Reload  "),
                Span::styled("q", key),
                Span::raw(": Quit"),
            ])
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
