// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::Deserialize;
use tabled::Tabled;

#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ActionType {
    DownloadGame,
    WriteReview,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::DownloadGame => "Download",
            Self::WriteReview => "Review",
        })
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PointTransaction {
    #[tabled(skip)]
    pub(crate) id: u64,
    #[tabled(skip)]
    pub(crate) player_id: u64,
    #[tabled(rename = "Game")]
    pub(crate) game_id: u64,
    #[tabled(rename = "Action")]
    pub(crate) action_type: ActionType,
    #[tabled(rename = "Points")]
    pub(crate) points: i64,
    #[tabled(rename = "Date")]
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub(crate) created_at: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeaderboardEntry {
    #[tabled(rename = "Rank")]
    pub(crate) rank: u32,
    #[tabled(skip)]
    pub(crate) player_id: u64,
    #[tabled(rename = "Player")]
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub(crate) player_name: String,
    #[tabled(rename = "Points")]
    pub(crate) total_points: i64,
}
