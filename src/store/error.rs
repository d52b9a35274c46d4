//! Errors reported by configuration store clients.
//!
//! Store errors are not structured the same way across transports, so the
//! operator-visible text is derived with [`StoreError::resolve_message`].

use serde_json::Value;
use thiserror::Error;

/// Display text of an error that carries nothing more specific.
pub const GENERIC_ERROR_TEXT: &str = "unknown store error";

/// Fallback when no readable message can be extracted.
pub const UNPARSEABLE_ERROR_MESSAGE: &str = "Unable to parse error message.";

#[derive(Debug, Error)]
pub enum StoreError {
    /// Plain message reported by the store.
    #[error("{0}")]
    Message(String),

    /// Non-success HTTP response.
    #[error("HTTP {status}")]
    Http {
        status: u16,
        /// Status line reason phrase (e.g. "Not Found").
        status_text: Option<String>,
        /// Raw response body, untouched.
        body: Option<String>,
    },

    /// Connection, TLS or timeout failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("Malformed store response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Error without a message of its own; `details` is whatever was reported.
    #[error("unknown store error")]
    Opaque { details: Option<Value> },
}

impl StoreError {
    /// Raw response body, when the error carries one.
    pub fn response_text(&self) -> Option<&str> {
        match self {
            StoreError::Http { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Status line reason phrase, when the error carries one.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            StoreError::Http { status_text, .. } => status_text.as_deref(),
            _ => None,
        }
    }

    /// Resolve the single human-readable message shown to the operator.
    ///
    /// Precedence: plain message, raw response body, status line, the
    /// error's own text unless generic, the serialized details, and finally
    /// [`UNPARSEABLE_ERROR_MESSAGE`].
    pub fn resolve_message(&self) -> String {
        if let StoreError::Message(message) = self {
            return message.clone();
        }

        if let Some(body) = self.response_text().filter(|body| !body.is_empty()) {
            return body.to_string();
        }

        if let Some(status) = self.status_text().filter(|status| !status.is_empty()) {
            return status.to_string();
        }

        let text = self.to_string();
        if !text.trim().is_empty() && text != GENERIC_ERROR_TEXT {
            return text;
        }

        match self {
            StoreError::Opaque {
                details: Some(details),
            } => serde_json::to_string(details)
                .unwrap_or_else(|_| UNPARSEABLE_ERROR_MESSAGE.to_string()),
            _ => UNPARSEABLE_ERROR_MESSAGE.to_string(),
        }
    }
}
