// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Subcommand;

use crate::{
    api::{self, Executor as _},
    error::Result,
    model::{Role, Status},
};

use super::{print_ack, print_table, Context};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum Decision {
    Approve,
    Reject,
}

impl From<Decision> for Status {
    fn from(value: Decision) -> Self {
        match value {
            Decision::Approve => Self::Approved,
            Decision::Reject => Self::Rejected,
        }
    }
}

/// Moderate accounts and games (administrators).
#[derive(Debug, Subcommand)]
pub(crate) enum Admin {
    /// List accounts waiting for approval.
    PendingUsers,
    /// Approve or reject an account.
    ApproveUser {
        #[clap()]
        user_id: u64,
        #[arg(value_enum, default_value_t = Decision::Approve)]
        decision: Decision,
    },
    /// List games waiting for approval.
    PendingGames,
    /// Approve or reject a game.
    ApproveGame {
        #[clap()]
        game_id: u64,
        #[arg(value_enum, default_value_t = Decision::Approve)]
        decision: Decision,
    },
    /// List every account.
    Users,
    /// List every game, whatever its status.
    Games,
    /// Delete an account.
    DeleteUser {
        #[clap()]
        user_id: u64,
    },
}

#[async_trait]
impl super::Command for Admin {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let _ = ctx.require(Role::Admin, "moderate the marketplace").await?;

        match self {
            Self::PendingUsers => {
                let users = api::PendingUsers.execute(&ctx.client).await?;
                print_table(users, "No accounts are waiting for approval.");
            }
            Self::ApproveUser { user_id, decision } => {
                let ack = api::ApproveUser {
                    user_id,
                    status: decision.into(),
                }
                .execute(&ctx.client)
                .await?;
                print_ack(ack, "Account updated.");
            }
            Self::PendingGames => {
                let games = api::PendingGames.execute(&ctx.client).await?;
                print_table(games, "No games are waiting for approval.");
            }
            Self::ApproveGame { game_id, decision } => {
                let ack = api::ApproveGame {
                    game_id,
                    status: decision.into(),
                }
                .execute(&ctx.client)
                .await?;
                print_ack(ack, "Game updated.");
            }
            Self::Users => {
                let users = api::AllUsers.execute(&ctx.client).await?;
                print_table(users, "There are no accounts.");
            }
            Self::Games => {
                let games = api::AllGames.execute(&ctx.client).await?;
                print_table(games, "There are no games.");
            }
            Self::DeleteUser { user_id } => {
                let ack = api::DeleteUser { user_id }.execute(&ctx.client).await?;
                print_ack(ack, "Account deleted.");
            }
        }
        Ok(())
    }
}
