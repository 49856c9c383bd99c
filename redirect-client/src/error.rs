use thiserror::Error;

use crate::{DateError, FormErrors};

/// User-facing text for every failure that is not a recognised status.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Error, Debug)]
pub enum RedirectError {
    /// The credential was rejected or is missing. Callers should force a new login.
    #[error("Unauthorized")]
    Unauthorized,
    /// The redirect no longer exists.
    #[error("Not Found")]
    NotFound,
    /// Client-side validation failed; nothing was sent.
    #[error("Validation failed: {0}")]
    ValidationFailed(FormErrors),
    /// Transport failure, unexpected status or unparsable body. The payload is
    /// the internal detail, the display is always the generic message.
    #[error("An error occurred. Please try again.")]
    RequestFailed(String),
    #[error(transparent)]
    InvalidDate(#[from] DateError),
    #[error("Invalid API URL: {0}")]
    InvalidBaseUrl(String),
}

impl RedirectError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
