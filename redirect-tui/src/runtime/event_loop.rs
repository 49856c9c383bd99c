use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::CrosstermBackend, Terminal};
use redirect_client::{RedirectClient, TokenProvider};
use std::io;
use std::time::Duration;

use super::action_queue::{channel, Action};
use super::actions::run_action;
use super::views::handle_view_key;

pub async fn run_app<T: TokenProvider>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &RedirectClient<T>,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let _ = action_tx.send(Action::ReloadRedirects);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_view_key(key, app, &action_tx);
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            // Show the busy state before blocking on the request.
            app.is_loading = true;
            terminal.draw(|f| ui::render(f, app))?;
            run_action(action, app, client).await;
            app.is_loading = false;
            discard_pending_input()?;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}

/// Inputs are disabled while a request is in flight; drop anything typed meanwhile.
fn discard_pending_input() -> Result<()> {
    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }
    Ok(())
}
