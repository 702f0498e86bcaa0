//! Error handling module for the fleet admin console.
//!
//! Every failure of a remote call, whatever its cause, ends up as one `AppError`
//! and is reported through the same notification path.

use std::collections::BTreeMap;

use reqwest::StatusCode;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const REMOTE_ERROR: &str = "REMOTE_ERROR";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const REJECTED: &str = "REJECTED";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Non-2xx reply from the API, with the server message when it sent one
    Remote {
        status: StatusCode,
        message: Option<String>,
    },
    /// 2xx reply whose envelope carried `success: false`
    Rejected(Option<String>),
    /// Connection, timeout or TLS failure
    Transport(String),
    /// Reply body did not match the expected shape
    Decode(String),
    /// Session file could not be read or written
    Storage(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Remote { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                codes::UNAUTHORIZED
            }
            AppError::Remote { .. } => codes::REMOTE_ERROR,
            AppError::Rejected(_) => codes::REJECTED,
            AppError::Transport(_) => codes::TRANSPORT_ERROR,
            AppError::Decode(_) => codes::DECODE_ERROR,
            AppError::Storage(_) => codes::STORAGE_ERROR,
        }
    }

    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Remote { message, .. } | AppError::Rejected(message) => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Text shown to the user: the server message when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Remote { status, message } => match message {
                Some(msg) => format!("{status}: {msg}"),
                None => status.to_string(),
            },
            AppError::Rejected(msg) => msg.clone().unwrap_or_else(|| "request rejected".into()),
            AppError::Transport(msg) => msg.clone(),
            AppError::Decode(msg) => msg.clone(),
            AppError::Storage(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_decode() {
            AppError::Decode(format!("Response decode error: {}", err))
        } else {
            AppError::Transport(format!("HTTP error: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Session storage error: {:?}", err);
        AppError::Storage(format!("Session storage error: {}", err))
    }
}

/// Field-level validation errors of a form, keyed by field name.
///
/// An empty map means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first error recorded for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    /// Record `message` for `field` when `value` is blank.
    pub fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = AppError::Remote {
            status: StatusCode::BAD_REQUEST,
            message: Some("Email not found".to_string()),
        };
        assert_eq!(err.user_message("Login failed"), "Email not found");
    }

    #[test]
    fn test_user_message_falls_back() {
        let blank = AppError::Remote {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("   ".to_string()),
        };
        assert_eq!(blank.user_message("Login failed"), "Login failed");

        let transport = AppError::Transport("connection refused".to_string());
        assert_eq!(transport.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn test_error_codes() {
        let unauthorized = AppError::Remote {
            status: StatusCode::UNAUTHORIZED,
            message: None,
        };
        assert_eq!(unauthorized.error_code(), codes::UNAUTHORIZED);
        assert_eq!(AppError::Rejected(None).error_code(), codes::REJECTED);
        assert_eq!(
            AppError::Storage("x".to_string()).error_code(),
            codes::STORAGE_ERROR
        );
    }

    #[test]
    fn test_form_errors_first_message_wins() {
        let mut errors = FormErrors::new();
        errors.require("name", "  ", "Please enter name");
        errors.add("name", "something else");
        errors.require("phone", "+3557 000 447", "Please enter Phone Number");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Please enter name"));
        assert_eq!(errors.get("phone"), None);
    }
}
