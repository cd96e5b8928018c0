// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use secrecy::{ExposeSecret as _, SecretString};
use serde::{Serialize, Serializer};

use super::{Identity, Role, Status};

fn expose_password<S: Serializer>(
    password: &SecretString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    #[serde(serialize_with = "expose_password")]
    pub(crate) password: SecretString,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    pub(crate) email: String,
    #[serde(serialize_with = "expose_password")]
    pub(crate) password: SecretString,
    pub(crate) role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) portfolio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) experience_years: Option<u32>,
}

impl RegisterRequest {
    /// Portfolio details only mean something for professional accounts, so
    /// they are dropped for everyone else.
    pub(crate) fn normalized(mut self) -> Self {
        if !self.role.is_professional() {
            self.portfolio_url = None;
            self.experience_years = None;
        }
        self
    }
}

/// The backend answers both login and registration with an identity in the
/// same shape as the one the session persists.
pub(crate) type AuthResponse = Identity;

impl Identity {
    /// Fills in what the registration form knew but the backend did not echo
    /// back.
    pub(crate) fn registered_from(mut self, req: &RegisterRequest) -> Self {
        if self.email.is_empty() {
            self.email = req.email.clone();
        }
        if self.status.is_none() {
            self.status = Some(if req.role.is_professional() {
                Status::Pending
            } else {
                Status::Approved
            });
        }
        self.full_name = self.full_name.or_else(|| req.full_name.clone());
        self.portfolio_url = self.portfolio_url.or_else(|| req.portfolio_url.clone());
        self.experience_years = self.experience_years.or(req.experience_years);
        self
    }
}
