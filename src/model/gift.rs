// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use tabled::Tabled;

use super::display_option;

#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Gift {
    #[tabled(rename = "ID")]
    pub(crate) id: u64,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Description", display_with = "display_option")]
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[tabled(skip)]
    #[serde(default)]
    pub(crate) image_url: Option<String>,
    #[tabled(rename = "Cost")]
    pub(crate) point_cost: i64,
    #[tabled(rename = "Left")]
    pub(crate) quantity: i64,
    #[tabled(skip)]
    #[serde(default)]
    pub(crate) developer_id: Option<u64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GiftTransaction {
    #[tabled(rename = "ID")]
    pub(crate) id: u64,
    #[tabled(skip)]
    pub(crate) player_id: u64,
    #[tabled(rename = "Gift")]
    pub(crate) gift_id: u64,
    #[tabled(rename = "Points")]
    pub(crate) points_spent: i64,
    #[tabled(rename = "Date", display_with = "display_option")]
    #[serde(default)]
    pub(crate) created_at: Option<String>,
}
