mod app;
mod cli;
mod config;
mod login;
mod runtime;
mod session_store;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::RedirectConfig;
use crossterm::{
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use redirect_client::{RedirectClient, RedirectError};
use session_store::StoredSession;
use std::io;
use tracing_subscriber::EnvFilter;

const WINDOW_TITLE: &str = "Redirects | Redirect Management";
const LOGIN_HINT: &str = "Not logged in. Run `redirect-tui login` first.";
const SESSION_EXPIRED: &str = "Session expired. Run `redirect-tui login` to re-authenticate.";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let cfg = RedirectConfig::load()?;
    init_tracing()?;

    match cli.command {
        Commands::Run => run_tui(&cfg).await,
        Commands::List => print_redirects(&cfg).await,
        Commands::Login => login::run_login(&cfg.api_url).await,
        Commands::Logout => {
            session_store::clear_session()?;
            println!("Logged out.");
            Ok(())
        }
        Commands::ConfigPath => {
            let path = RedirectConfig::ensure_exists()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Log to a file in the config directory; the terminal belongs to the UI.
fn init_tracing() -> Result<()> {
    let path = RedirectConfig::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file at {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn session_client(cfg: &RedirectConfig) -> Result<RedirectClient<StoredSession>> {
    if session_store::load_session()?.is_none() {
        anyhow::bail!(LOGIN_HINT);
    }
    Ok(RedirectClient::new(&cfg.api_url, StoredSession)?)
}

async fn run_tui(cfg: &RedirectConfig) -> Result<()> {
    let client = session_client(cfg)?;
    let mut app = App::new(cfg);
    tracing::info!("Starting redirect manager against {}", cfg.api_url);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(WINDOW_TITLE))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = runtime::run_app(&mut terminal, &mut app, &client).await;

    // Restore the terminal before reporting anything.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    if app.session_expired {
        session_store::clear_session()?;
        anyhow::bail!(SESSION_EXPIRED);
    }
    Ok(())
}

async fn print_redirects(cfg: &RedirectConfig) -> Result<()> {
    let client = session_client(cfg)?;

    let redirects = match client.list().await {
        Ok(redirects) => redirects,
        Err(RedirectError::Unauthorized) => {
            session_store::clear_session()?;
            anyhow::bail!(SESSION_EXPIRED);
        }
        Err(e) => return Err(e).context("Failed to list redirects"),
    };

    if redirects.is_empty() {
        println!("No redirects yet.");
        return Ok(());
    }

    for redirect in redirects {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            redirect.id,
            redirect.from_path,
            redirect.to_url,
            ui::utils::format_timestamp(redirect.starts_on),
            ui::utils::format_timestamp(redirect.stops_on),
        );
    }
    Ok(())
}
