// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use async_trait::async_trait;
use clap::{Args, Subcommand};
use log::error;
use tabled::{builder::Builder, settings::Style};

use crate::{
    api::{self, Executor as _},
    error::{self, Result},
    model::{display_option, GameForm, Role},
};

use super::{print_ack, print_table, Context};

/// Browse, publish and download games.
#[derive(Debug, Subcommand)]
pub(crate) enum Games {
    /// List the approved games in the store.
    List,
    /// Show the details of a single game.
    Show {
        #[clap()]
        id: u64,
    },
    /// List the games you have uploaded (developers).
    Mine,
    /// Upload a new game for review (developers).
    Create(GameArgs),
    /// Change a game you have uploaded (developers).
    Update {
        #[clap()]
        id: u64,
        #[command(flatten)]
        game: GameArgs,
    },
    /// Remove a game you have uploaded (developers).
    Delete {
        #[clap()]
        id: u64,
    },
    /// Record a download and print the link to the game's package (players).
    Download {
        #[clap()]
        id: u64,
    },
}

#[derive(Debug, Args)]
pub(crate) struct GameArgs {
    /// The name shown in the store.
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// System requirements, free text.
    #[arg(long, default_value = "")]
    requirements: String,

    /// Where players download the package from.
    #[arg(long)]
    apk_file_url: String,

    #[arg(long)]
    support_leaderboard: bool,

    /// Award points to players who download or review the game.
    #[arg(long)]
    support_points: bool,

    /// An image file to show in the store.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    preview_image: Option<PathBuf>,
}

impl From<GameArgs> for GameForm {
    fn from(value: GameArgs) -> Self {
        Self {
            name: value.name,
            description: value.description,
            requirements: value.requirements,
            apk_file_url: value.apk_file_url,
            support_leaderboard: value.support_leaderboard,
            support_points: value.support_points,
            preview_image: value.preview_image,
        }
    }
}

#[async_trait]
impl super::Command for Games {
    async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            Self::List => {
                let games = api::PublicGames.execute(&ctx.client).await?;
                print_table(games, "No games are available yet.");
            }
            Self::Show { id } => {
                let game = api::GetGame { id }.execute(&ctx.client).await?;
                let mut builder = Builder::default();
                builder.push_record(["Name".to_owned(), game.name]);
                builder.push_record(["Status".to_owned(), game.status.to_string()]);
                builder.push_record(["Description".to_owned(), game.description]);
                builder.push_record(["Requirements".to_owned(), game.requirements]);
                builder.push_record([
                    "Preview".to_owned(),
                    display_option(&game.preview_image_url),
                ]);
                builder.push_record([
                    "Leaderboard".to_owned(),
                    game.support_leaderboard.to_string(),
                ]);
                builder.push_record(["Points".to_owned(), game.support_points.to_string()]);
                builder.push_record(["Developer".to_owned(), display_option(&game.developer_id)]);
                println!("{}", builder.build().with(Style::rounded()));
            }
            Self::Mine => {
                let _ = ctx.require(Role::Developer, "list their games").await?;
                let games = api::MyGames.execute(&ctx.client).await?;
                print_table(games, "You have not uploaded any games.");
            }
            Self::Create(game) => {
                let _ = ctx.require(Role::Developer, "upload games").await?;
                if game.preview_image.is_none() {
                    error!("A preview image is required when uploading a game");
                    return Err(error::Error::Command);
                }
                let game = api::CreateGame(game.into()).execute(&ctx.client).await?;
                println!(
                    "Uploaded {} (ID {}); it is {}.",
                    game.name,
                    game.id,
                    game.status.to_string().to_lowercase()
                );
                if let Some(message) = game.api_key_message {
                    println!("{message}");
                }
            }
            Self::Update { id, game } => {
                let _ = ctx.require(Role::Developer, "change games").await?;
                let game = api::UpdateGame {
                    id,
                    form: game.into(),
                }
                .execute(&ctx.client)
                .await?;
                println!("Updated {} (ID {}).", game.name, game.id);
            }
            Self::Delete { id } => {
                let _ = ctx.require(Role::Developer, "delete games").await?;
                let ack = api::DeleteGame { id }.execute(&ctx.client).await?;
                print_ack(ack, "Game deleted.");
            }
            Self::Download { id } => {
                let player_id = ctx.player_id("download games").await?;
                let game = api::GetGame { id }.execute(&ctx.client).await?;
                let url = api::TrackDownload {
                    player_id,
                    game_id: id,
                }
                .execute(&ctx.client)
                .await?;
                if game.support_points {
                    eprintln!("Download recorded; you earned points for {}.", game.name);
                }
                println!("{url}");
            }
        }
        Ok(())
    }
}
