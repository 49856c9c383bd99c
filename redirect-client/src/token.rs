use thiserror::Error;

/// The credential store exists but could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not read stored credential: {0}")]
pub struct TokenError(pub String);

/// Supplies the opaque credential attached as the `Authorization` header.
///
/// `Ok(None)` means there is no stored credential; the client then fails with
/// [`crate::RedirectError::Unauthorized`] without touching the network. A
/// [`TokenError`] is a local failure and never reads as an auth rejection.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Result<Option<String>, TokenError>;
}

/// A fixed token, for one-shot commands and tests.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Result<Option<String>, TokenError> {
        if self.0.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.0.clone()))
        }
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> Result<Option<String>, TokenError> + Send + Sync,
{
    fn token(&self) -> Result<Option<String>, TokenError> {
        self()
    }
}
