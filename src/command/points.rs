// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{
    api::{self, Executor as _},
    error::Result,
};

use super::{print_table, Context};

/// Show how you earned your points.
#[derive(Debug, Parser)]
pub(crate) struct Points;

#[async_trait]
impl super::Command for Points {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let player_id = ctx.player_id("list their points").await?;
        let history = api::PlayerPoints { player_id }.execute(&ctx.client).await?;

        let total: i64 = history.iter().map(|tx| tx.points).sum();
        print_table(history, "You have not earned any points yet.");
        println!("Total: {total}");
        Ok(())
    }
}

/// Show the players with the most points.
#[derive(Debug, Parser)]
pub(crate) struct Leaderboard {
    /// Only show this many players.
    #[arg(long, short)]
    count: Option<usize>,
}

#[async_trait]
impl super::Command for Leaderboard {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let entries = api::Leaderboard.execute(&ctx.client).await?;
        print_table(
            entries.into_iter().take(self.count.unwrap_or(usize::MAX)),
            "Nobody has earned points yet.",
        );
        Ok(())
    }
}
