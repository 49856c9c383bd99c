use super::utils::centered_rect;
use super::*;
use crate::app::{DateInput, DialogField, FormMode, FormState, TextInput};

pub fn render_form_dialog(frame: &mut Frame, app: &App) {
    let Some(form) = &app.form else {
        return;
    };

    let area = centered_rect(66, 20, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    push_text_field(&mut lines, form, DialogField::FromPath, "From Path", &form.from_path);
    push_error(&mut lines, &form.errors.from_path);
    push_text_field(&mut lines, form, DialogField::ToUrl, "To URL", &form.to_url);
    push_error(&mut lines, &form.errors.to_url);
    push_date_field(&mut lines, form, DialogField::StartsOn, "Starts On", &form.starts_on);
    push_date_field(&mut lines, form, DialogField::StopsOn, "Stops On", &form.stops_on);
    lines.push(Line::from(""));

    if form.is_busy {
        let busy = match form.mode {
            FormMode::Edit { .. } if form.is_loading => "Loading...",
            _ => "Saving...",
        };
        lines.push(Line::from(Span::styled(
            busy,
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(hint_line());
        if form.focused_field.is_date() {
            lines.push(date_hint_line());
        }
    }

    let border = if form.is_busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(form.title(), border))
            .padding(Padding::horizontal(2)),
    );

    frame.render_widget(paragraph, area);
}

fn label_style(form: &FormState, field: DialogField) -> Style {
    if form.is_busy {
        Style::default().fg(Color::DarkGray)
    } else if form.focused_field == field {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn push_text_field(
    lines: &mut Vec<Line<'static>>,
    form: &FormState,
    field: DialogField,
    label: &'static str,
    input: &TextInput,
) {
    let focused = form.focused_field == field && !form.is_busy;
    let value = if focused {
        let (before, after) = input.split_at_cursor();
        format!("{}█{}", before, after)
    } else {
        input.value.clone()
    };

    lines.push(Line::from(Span::styled(label, label_style(form, field))));
    lines.push(Line::from(Span::styled(
        format!("  {}", value),
        Style::default().fg(Color::White),
    )));
}

fn push_date_field(
    lines: &mut Vec<Line<'static>>,
    form: &FormState,
    field: DialogField,
    label: &'static str,
    input: &DateInput,
) {
    let value = match input.form_value() {
        Some(date) => Span::styled(format!("  {}", date), Style::default().fg(Color::White)),
        None => Span::styled("  not set", Style::default().fg(Color::DarkGray)),
    };
    let value = if form.focused_field == field && !form.is_busy {
        value.patch_style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        value
    };

    lines.push(Line::from(Span::styled(label, label_style(form, field))));
    lines.push(Line::from(value));
}

fn push_error(lines: &mut Vec<Line<'static>>, message: &str) {
    if !message.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  ! {}", message),
            Style::default().fg(Color::Red),
        )));
    }
}

fn hint_line() -> Line<'static> {
    let key = Style::default().fg(Color::Yellow);
    Line::from(vec![
        Span::styled("Tab", key),
        Span::raw(": Next field  "),
        Span::styled("Enter", key),
        Span::raw(": Save  "),
        Span::styled("Esc", key),
        Span::raw(": Cancel"),
    ])
}

fn date_hint_line() -> Line<'static> {
    let key = Style::default().fg(Color::Yellow);
    Line::from(vec![
        Span::styled("←/→", key),
        Span::raw(": Day  "),
        Span::styled("↑/↓", key),
        Span::raw(": Month  "),
        Span::styled("PgUp/PgDn", key),
        Span::raw(": Year  "),
        Span::styled("t", key),
        Span::raw(": Today  "),
        Span::styled("⌫", key),
        Span::raw(": Clear"),
    ])
}
