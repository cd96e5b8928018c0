// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Subcommand;

use crate::{
    api::{self, Executor as _},
    error::Result,
};

use super::{print_table, Context};

/// Spend points on gifts.
#[derive(Debug, Subcommand)]
pub(crate) enum Gifts {
    /// List the gifts on offer.
    List,
    /// Exchange points for a gift (players).
    Redeem {
        #[clap()]
        gift_id: u64,
    },
    /// List the gifts you have redeemed (players).
    Transactions,
}

#[async_trait]
impl super::Command for Gifts {
    async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            Self::List => {
                let gifts = api::Gifts.execute(&ctx.client).await?;
                print_table(gifts, "No gifts are on offer.");
            }
            Self::Redeem { gift_id } => {
                let player_id = ctx.player_id("redeem gifts").await?;
                let tx = api::RedeemGift { player_id, gift_id }
                    .execute(&ctx.client)
                    .await?;
                println!("Redeemed gift {} for {} points.", tx.gift_id, tx.points_spent);
            }
            Self::Transactions => {
                let player_id = ctx.player_id("list redeemed gifts").await?;
                let history = api::GiftTransactions { player_id }
                    .execute(&ctx.client)
                    .await?;
                print_table(history, "You have not redeemed any gifts.");
            }
        }
        Ok(())
    }
}
