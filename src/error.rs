//! Error types for REST calls and session operations.
//!
//! ERROR HANDLING
//! ==============
//! `ApiError` classifies every failed request: transport, 401, 4xx with a
//! server message, anything else, and bodies that do not decode. Pages turn
//! these into notices with `user_message`; session operations wrap them in
//! `AuthError` so forms can show the server's own wording inline.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;
use thiserror::Error;

/// Failure of a request issued through `ApiClient`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered 401. The session has already been torn down.
    #[error("unauthorized")]
    Unauthorized { detail: Option<String> },
    /// A 4xx answer carrying a human-readable `detail`.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// Any other non-success status.
    #[error("unexpected response status {status}")]
    Unexpected { status: u16 },
    /// The request body could not be serialized.
    #[error("could not encode request: {0}")]
    Encode(String),
    /// The response body did not match the expected schema.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success response by status and body.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::Unauthorized { detail: server_detail(body) },
            400..=499 => match server_detail(body) {
                Some(message) => Self::Rejected { status, message },
                None => Self::Unexpected { status },
            },
            _ => Self::Unexpected { status },
        }
    }

    /// The message the server attached to this failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            Self::Unauthorized { detail } => detail.as_deref(),
            _ => None,
        }
    }

    /// Text suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the server. Check your connection.".to_owned(),
            Self::Unauthorized { .. } => "Your session has expired. Please sign in again.".to_owned(),
            Self::Rejected { message, .. } => message.clone(),
            Self::Unexpected { .. } | Self::Encode(_) | Self::Decode(_) => {
                "Something went wrong. Please try again.".to_owned()
            }
        }
    }
}

/// Normalized failure of a session operation (`login`, `register`).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    #[source]
    pub source: ApiError,
}

impl AuthError {
    /// Prefer the server's message; fall back to `fallback` otherwise.
    pub fn normalize(source: ApiError, fallback: &str) -> Self {
        let message = source.server_message().unwrap_or(fallback).to_owned();
        Self { message, source }
    }
}

/// Extract the `detail` message from an error body.
///
/// Accepts `{"detail": "..."}`, the validation shape
/// `{"detail": [{"msg": "..."}]}`, and `{"message": "..."}`.
pub fn server_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let text = match value.get("detail") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Array(items)) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_owned),
        _ => value.get("message").and_then(Value::as_str).map(str::to_owned),
    }?;
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_owned()) }
}
