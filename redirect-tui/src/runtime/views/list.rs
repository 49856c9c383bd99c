use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('c') | KeyCode::Char('n') => app.open_create(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.open_edit() {
                enqueue_action(action_tx, Action::LoadRedirectForEdit { id });
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => app.open_delete(),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::ReloadRedirects),
        _ => {}
    }
}
