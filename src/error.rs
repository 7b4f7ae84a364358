//! Unified application error model.
//! This module provides a common error enum used across the API client, the
//! session store and the console, along with a mapper from HTTP statuses.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    UserInput { code: String, message: String },
    NotFound { code: String, message: String },
    Auth { code: String, message: String },
    Access { code: String, message: String },
    Session { code: String, message: String },
    Api { code: String, message: String },
    Io { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::UserInput { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Auth { code, .. }
            | AppError::Access { code, .. }
            | AppError::Session { code, .. }
            | AppError::Api { code, .. }
            | AppError::Io { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Auth { message, .. }
            | AppError::Access { message, .. }
            | AppError::Session { message, .. }
            | AppError::Api { message, .. }
            | AppError::Io { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn user<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::UserInput { code: code.into(), message: msg.into() } }
    pub fn not_found<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::NotFound { code: code.into(), message: msg.into() } }
    pub fn auth<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn access<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::Access { code: code.into(), message: msg.into() } }
    pub fn session<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::Session { code: code.into(), message: msg.into() } }
    pub fn api<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::Api { code: code.into(), message: msg.into() } }
    pub fn io<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::Io { code: code.into(), message: msg.into() } }
    pub fn internal<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Map a non-success HTTP status from the remote API into the taxonomy.
    /// Bodies are passed through as the message; they are not assumed to be JSON.
    pub fn from_http_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => AppError::UserInput { code: format!("http_{}", status), message },
            401 => AppError::Auth { code: "http_401".into(), message },
            403 => AppError::Access { code: "http_403".into(), message },
            404 => AppError::NotFound { code: "http_404".into(), message },
            500..=599 => AppError::Api { code: format!("http_{}", status), message },
            _ => AppError::Api { code: format!("http_{}", status), message },
        }
    }

    /// True for credential rejections, which the console flattens to a single
    /// generic notice regardless of the underlying cause.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::Auth { .. })
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io { code: "io_error".into(), message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping() {
        assert!(matches!(AppError::from_http_status(400, "bad"), AppError::UserInput { .. }));
        assert!(matches!(AppError::from_http_status(401, "no"), AppError::Auth { .. }));
        assert!(matches!(AppError::from_http_status(403, "blocked"), AppError::Access { .. }));
        assert!(matches!(AppError::from_http_status(404, "missing"), AppError::NotFound { .. }));
        assert!(matches!(AppError::from_http_status(500, "boom"), AppError::Api { .. }));
    }

    #[test]
    fn display_includes_code_and_message() {
        let e = AppError::auth("invalid_credentials", "invalid email or password");
        assert_eq!(e.to_string(), "invalid_credentials: invalid email or password");
        assert!(e.is_auth_failure());
    }
}
