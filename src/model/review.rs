// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use super::Status;

#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Review {
    #[tabled(skip)]
    pub(crate) id: u64,
    #[tabled(skip)]
    pub(crate) player_id: u64,
    #[tabled(rename = "Player")]
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub(crate) player_name: String,
    #[tabled(skip)]
    pub(crate) game_id: u64,
    #[tabled(rename = "Rating", display_with = "Self::format_rating")]
    pub(crate) rating: u8,
    #[tabled(rename = "Comment")]
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub(crate) comment: String,
    #[tabled(skip)]
    pub(crate) status: Option<Status>,
    #[tabled(rename = "Date")]
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub(crate) created_at: String,
}

impl Review {
    fn format_rating(rating: &u8) -> String {
        "★".repeat(usize::from(*rating))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewRequest {
    pub(crate) game_id: u64,
    pub(crate) rating: u8,
    pub(crate) comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_without_comment() -> crate::error::Result<()> {
        let review: Review = serde_json::from_str(
            r#"{"id":3,"playerId":5,"playerName":null,"gameId":7,"rating":4,"comment":null,
                "createdAt":"2024-05-01T10:05:00"}"#,
        )?;

        assert_eq!(review.comment, "");
        assert_eq!(review.player_name, "");
        assert_eq!(review.status, None);
        assert_eq!(Review::format_rating(&review.rating), "★★★★");
        Ok(())
    }
}
