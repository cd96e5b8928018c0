// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{convert::Infallible, fmt, io, result};

use reqwest::StatusCode;
use thiserror::Error;

use crate::model::Role;

pub(crate) type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("network request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Request(#[from] RequestError),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("server did not redirect to a download location")]
    MissingLocation,
    #[error("password retrieval error: {0}")]
    Password(#[from] Password),
    #[error("you need to log in first")]
    NotLoggedIn,
    #[error("only {} accounts may {action}", .role.to_string().to_lowercase())]
    NotPermitted { role: Role, action: &'static str },
    #[error("the server did not tell us the id of the account {0}; it is needed to {1}")]
    UnknownAccountId(String, &'static str),
    #[error("command execution failed")]
    Command,
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Whether the error means stored data exists but could not be decoded.
    pub(crate) const fn is_malformed_data(&self) -> bool {
        matches!(*self, Self::Json(_))
    }
}

/// An HTTP error status, normalized to the message the backend meant for the
/// user.
#[derive(Debug)]
pub(crate) struct RequestError {
    status: StatusCode,
    message: String,
}

impl RequestError {
    pub(crate) fn new(status: StatusCode, message: Option<String>) -> Self {
        Self {
            status,
            message: message
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16())),
        }
    }

    pub(crate) const fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RequestError {}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<pinentry::Error> for Error {
    fn from(value: pinentry::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(
            clippy::wildcard_enum_match_arm,
            clippy::match_wildcard_for_single_variants
        )]
        match value {
            pinentry::Error::Cancelled | pinentry::Error::Timeout => Self::Cancelled,
            pinentry::Error::Io(e) => Self::Io(e),
            _ => Self::Password(Password::Pinentry(value)),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        unreachable!()
    }
}

#[derive(Error, Debug)]
pub(crate) enum Password {
    #[error("no password prompt available")]
    NoPrompt,
    #[error("the passwords entered did not match")]
    Mismatch,
    #[error("Pinentry implementation error: {0}")]
    Pinentry(pinentry::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_prefers_server_message() {
        let err = RequestError::new(StatusCode::CONFLICT, Some("Email already in use".to_owned()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Email already in use");
    }

    #[test]
    fn request_error_falls_back_to_status_code() {
        let err = RequestError::new(StatusCode::BAD_GATEWAY, None);
        assert_eq!(err.message(), "HTTP error! status: 502");
    }

    #[test]
    fn malformed_json_is_classified() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .map_err(Error::from)
            .unwrap_err();
        assert!(err.is_malformed_data());
        assert!(!Error::NotLoggedIn.is_malformed_data());
    }
}
