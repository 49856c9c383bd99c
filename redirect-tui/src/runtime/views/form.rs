use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(form) = app.form.as_mut() else {
        app.close_form();
        return;
    };

    // Inputs are disabled while loading or saving.
    if form.is_busy {
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.close_form();
            return;
        }
        KeyCode::Enter => {
            submit(app, action_tx);
            return;
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            submit(app, action_tx);
            return;
        }
        KeyCode::Tab => {
            form.focused_field = form.focused_field.next();
            return;
        }
        KeyCode::BackTab => {
            form.focused_field = form.focused_field.prev();
            return;
        }
        _ => {}
    }

    if let Some(date) = form.focused_date() {
        match key.code {
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('l') => date.step_days(1),
            KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => date.step_days(-1),
            KeyCode::Up | KeyCode::Char('k') => date.step_months(1),
            KeyCode::Down | KeyCode::Char('j') => date.step_months(-1),
            KeyCode::PageUp => date.step_years(1),
            KeyCode::PageDown => date.step_years(-1),
            KeyCode::Char('t') => date.set_today(),
            KeyCode::Backspace | KeyCode::Delete => date.clear(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Down => form.focused_field = form.focused_field.next(),
        KeyCode::Up => form.focused_field = form.focused_field.prev(),
        _ => {}
    }

    if let Some(input) = form.focused_text() {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.home(),
            KeyCode::End => input.end(),
            _ => {}
        }
    }
}

/// Validate in place; only a clean form is queued for saving.
fn submit(app: &mut App, action_tx: &ActionTx) {
    let Some(form) = app.form.as_mut() else {
        return;
    };

    form.errors = form.to_form().validate();
    if form.errors.is_empty() {
        form.is_busy = true;
        enqueue_action(action_tx, Action::SubmitForm);
    }
}
