use super::utils::format_timestamp;
use super::*;

pub fn render_redirects_table(frame: &mut Frame, app: &App, body: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            format!(" Redirects ({}) ", app.redirects.len()),
            Style::default().fg(Color::White),
        ))
        .padding(Padding::horizontal(1));

    if app.redirects.is_empty() {
        let empty_msg = Paragraph::new(Line::from(Span::styled(
            "No redirects yet.",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty_msg, body);
        return;
    }

    let header = Row::new(["From", "To", "Starts On", "Ends On"].map(|title| {
        Cell::from(title).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .redirects
        .iter()
        .map(|redirect| {
            Row::new([
                Cell::from(redirect.from_path.clone()),
                Cell::from(redirect.to_url.clone()),
                Cell::from(format_timestamp(redirect.starts_on)),
                Cell::from(format_timestamp(redirect.stops_on)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(18),
            Constraint::Percentage(30),
            Constraint::Percentage(26),
            Constraint::Percentage(26),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow),
    );

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, body, &mut state);
}
