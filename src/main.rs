// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod api;
mod command;
mod error;
mod http;
mod metadata;
mod model;
mod password;
mod session;
mod storage;

use std::{path::PathBuf, process, sync::Arc};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use log::{debug, error, warn};
use model::Identity;
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::account::Login),
    Register(command::account::Register),
    Logout(command::account::Logout),
    Whoami(command::account::Whoami),
    #[command(subcommand)]
    Games(command::games::Games),
    #[command(subcommand)]
    Reviews(command::reviews::Reviews),
    Points(command::points::Points),
    Leaderboard(command::points::Leaderboard),
    #[command(subcommand)]
    Gifts(command::gifts::Gifts),
    #[command(subcommand)]
    Admin(command::admin::Admin),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, ctx: &command::Context) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.execute(ctx).await,
            Self::Register(cmd) => cmd.execute(ctx).await,
            Self::Logout(cmd) => cmd.execute(ctx).await,
            Self::Whoami(cmd) => cmd.execute(ctx).await,
            Self::Games(cmd) => cmd.execute(ctx).await,
            Self::Reviews(cmd) => cmd.execute(ctx).await,
            Self::Points(cmd) => cmd.execute(ctx).await,
            Self::Leaderboard(cmd) => cmd.execute(ctx).await,
            Self::Gifts(cmd) => cmd.execute(ctx).await,
            Self::Admin(cmd) => cmd.execute(ctx).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The base URL of the GameHub API, including its version prefix.
    #[arg(
        long,
        env = "GAMEHUB_URL",
        default_value = metadata::DEFAULT_API_BASE_URL,
        value_parser = Url::parse
    )]
    url: Url,

    /// Keep the session in memory only, so it ends with this process.
    #[arg(long)]
    no_persist_session: bool,

    /// The path to the Pinentry program to use when asking for a password.
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pinentry_program: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

fn get_session_storage(args: &Args) -> Box<dyn storage::Storage<Identity>> {
    if !args.no_persist_session {
        if let Some(file_storage) = storage::File::new(metadata::SESSION_FILE_NAME) {
            debug!("Keeping the session in {}", file_storage.path().display());
            return Box::new(file_storage);
        }

        warn!("We could not find a data directory, so the session will not be saved");
    }

    Box::new(storage::Memory::<Identity>::new())
}

async fn run(args: Args) -> Result<()> {
    let prompt: Vec<Box<dyn password::Prompt>> = vec![
        Box::new(args.pinentry_program.clone().map_or_else(
            password::PinentryPrompt::new,
            password::PinentryPrompt::new_with_executable,
        )),
        Box::new(password::RpasswordPrompt),
    ];

    let session = Arc::new(session::Store::open(get_session_storage(&args)).await);
    let client = http::Client::new(
        args.url,
        Arc::clone(&session) as Arc<dyn http::Credentials>,
    )?;

    let ctx = command::Context {
        client,
        session,
        prompt: Box::new(prompt),
    };
    command::Command::execute(args.command, &ctx).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("GAMEHUB_LOG", "warn")
        .write_style("GAMEHUB_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
