// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Subcommand;

use crate::{
    api::{self, Executor as _},
    error::Result,
    model::{ReviewRequest, Role},
};

use super::{print_table, Context};

/// Read and write game reviews.
#[derive(Debug, Subcommand)]
pub(crate) enum Reviews {
    /// List the reviews of a game.
    List {
        #[clap()]
        game_id: u64,
    },
    /// Review a game you have played (players).
    Submit {
        #[clap()]
        game_id: u64,

        /// From one to five stars.
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        #[arg(long, default_value = "")]
        comment: String,
    },
}

#[async_trait]
impl super::Command for Reviews {
    async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            Self::List { game_id } => {
                let reviews = api::GameReviews { game_id }.execute(&ctx.client).await?;
                print_table(reviews, "This game has no reviews yet.");
            }
            Self::Submit {
                game_id,
                rating,
                comment,
            } => {
                let _ = ctx.require(Role::Player, "review games").await?;
                let review = api::SubmitReview(ReviewRequest {
                    game_id,
                    rating,
                    comment,
                })
                .execute(&ctx.client)
                .await?;
                println!("Review #{} submitted.", review.id);
            }
        }
        Ok(())
    }
}
