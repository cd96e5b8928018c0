// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Records exchanged with the marketplace backend.

mod auth;
mod game;
mod gift;
mod identity;
mod points;
mod review;
mod user;

use std::fmt;

use clap::ValueEnum;
use inflector::Inflector as _;
use serde::{Deserialize, Deserializer, Serialize};

pub(crate) use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub(crate) use game::{Game, GameForm};
pub(crate) use gift::{Gift, GiftTransaction};
pub(crate) use identity::{Credential, Identity, Role};
pub(crate) use points::{ActionType, LeaderboardEntry, PointTransaction};
pub(crate) use review::{Review, ReviewRequest};
pub(crate) use user::{ApprovalRequest, GameApprovalRequest, User};

/// Moderation state shared by accounts, games and reviews.
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum Status {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_possible_value().ok_or(fmt::Error)?;
        write!(f, "{}", value.get_name().to_title_case())
    }
}

/// Reads a JSON `null` as the type's default, for fields the backend leaves
/// unset on older records.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn display_option<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(String::new, ToString::to_string)
}
