use anyhow::{Context, Result};
use redirect_client::{TokenError, TokenProvider};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use crate::config::config_dir;

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

pub fn session_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("session"))
}

pub fn load_session() -> Result<Option<String>> {
    read_session(&session_path()?)
}

fn read_session(path: &Path) -> Result<Option<String>> {
    let session = match std::fs::read_to_string(path) {
        Ok(session) => session,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context("Failed to read session file"),
    };
    let session = session.trim().to_string();
    if session.is_empty() {
        return Ok(None);
    }
    Ok(Some(session))
}

pub fn save_session(token: &str) -> Result<()> {
    let path = session_path()?;
    secure_write(path.as_path(), token.trim())
}

pub fn clear_session() -> Result<()> {
    let path = session_path()?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Token provider backed by the session file. The file is re-read on every
/// request, so a logout takes effect immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredSession;

impl TokenProvider for StoredSession {
    fn token(&self) -> Result<Option<String>, TokenError> {
        load_session().map_err(|e| {
            tracing::warn!("Could not read stored session: {e:#}");
            TokenError(format!("{e:#}"))
        })
    }
}
