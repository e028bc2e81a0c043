//! Errors surfaced by backend calls.

use crate::api::credentials::CredentialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token available; nothing was sent
    #[error("Not signed in: no bearer token available")]
    MissingCredential,

    #[error("Credential store error: {0}")]
    Credential(#[from] CredentialError),

    /// Could not reach the backend or the connection dropped
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("Request failed with status {status}{}", detail_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// 2xx response whose body could not be understood
    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl ApiError {
    /// HTTP status if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message meant for the user.
    ///
    /// A message supplied by the backend wins; otherwise `fallback` is used
    /// for status failures and the error's own text for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status {
                status,
                message: None,
            } => format!("{} (status {})", fallback, status),
            ApiError::MissingCredential => "You are not signed in".to_string(),
            ApiError::Transport(_) => format!("{}: network error", fallback),
            other => format!("{}: {}", fallback, other),
        }
    }
}
