use anyhow::{Context, Result};
use redirect_client::{RedirectClient, RedirectError, StaticToken};

use crate::session_store;

/// Run the interactive login flow:
/// 1. Read the API token from the terminal without echo
/// 2. Verify it with a list call against the configured API
/// 3. Save it as the session token
pub async fn run_login(api_url: &str) -> Result<()> {
    let token = rpassword::prompt_password("API token: ").context("Failed to read token")?;
    let token = token.trim().to_string();
    if token.is_empty() {
        anyhow::bail!("No token entered");
    }

    let client = RedirectClient::new(api_url, StaticToken::new(token.clone()))?;
    match client.list().await {
        Ok(redirects) => {
            tracing::info!("Token accepted, {} redirects visible", redirects.len());
        }
        Err(RedirectError::Unauthorized) => {
            anyhow::bail!("Token was rejected by {}", client.base_url());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Could not verify token against {}", api_url));
        }
    }

    session_store::save_session(&token)?;
    println!("Login successful. Token saved.");
    Ok(())
}
