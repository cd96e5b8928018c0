// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use clap::ValueEnum;
use inflector::Inflector as _;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use super::Status;

/// Account role as the backend spells it.
#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum Role {
    #[default]
    Guest,
    Player,
    Developer,
    Designer,
    Admin,
}

impl Role {
    /// Developers and designers register with portfolio details and have to be
    /// approved by an admin before they can sign in.
    pub(crate) const fn is_professional(self) -> bool {
        matches!(self, Self::Developer | Self::Designer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_possible_value().ok_or(fmt::Error)?;
        write!(f, "{}", value.get_name().to_title_case())
    }
}

/// Bearer token issued by the backend.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub(crate) struct Credential(SecretString);

impl Credential {
    #[cfg(test)]
    pub(crate) fn new<S: Into<String>>(token: S) -> Self {
        Self(SecretString::new(token.into()))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Serialize for Credential {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

/// Whoever is using the client right now, as the session remembers them.
///
/// Serialized in the same shape as the backend's authentication response, so
/// a persisted session and a fresh login decode the same way.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Identity {
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    pub(crate) credential: Option<Credential>,
    pub(crate) role: Role,
    pub(crate) email: String,
    #[serde(alias = "userId", default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) portfolio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) experience_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) total_points: Option<i64>,
}

impl Identity {
    pub(crate) const fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Whether the backend still has to approve (or has refused) the account.
    pub(crate) fn is_gated(&self) -> bool {
        matches!(self.status, Some(Status::Pending | Status::Rejected))
    }

    /// The role that client-side checks should honor. Unauthenticated and
    /// unapproved accounts get no more than a guest.
    pub(crate) fn effective_role(&self) -> Role {
        if self.is_authenticated() && !self.is_gated() {
            self.role
        } else {
            Role::Guest
        }
    }
}
