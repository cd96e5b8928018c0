// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use super::{display_option, Role, Status};

/// An account as the admin screens see it.
#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    #[tabled(rename = "ID")]
    pub(crate) id: u64,
    #[tabled(rename = "Email")]
    pub(crate) email: String,
    #[tabled(rename = "Role")]
    pub(crate) role: Role,
    #[tabled(rename = "Status")]
    pub(crate) status: Status,
    #[tabled(rename = "Name", display_with = "display_option")]
    #[serde(default)]
    pub(crate) full_name: Option<String>,
    #[tabled(rename = "Portfolio", display_with = "display_option")]
    #[serde(default)]
    pub(crate) portfolio_url: Option<String>,
    #[tabled(rename = "Experience", display_with = "display_option")]
    #[serde(default)]
    pub(crate) experience_years: Option<u32>,
    #[tabled(rename = "Points", display_with = "display_option")]
    #[serde(default)]
    pub(crate) total_points: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApprovalRequest {
    pub(crate) user_id: u64,
    pub(crate) status: Status,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GameApprovalRequest {
    pub(crate) game_id: u64,
    pub(crate) status: Status,
}
