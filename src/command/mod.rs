// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, sync::Arc};

use async_trait::async_trait;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    error::{Error, Result},
    http,
    model::{Identity, Role},
    password, session,
};

pub(crate) mod account;
pub(crate) mod admin;
pub(crate) mod games;
pub(crate) mod gifts;
pub(crate) mod points;
pub(crate) mod reviews;

/// Everything a command needs to talk to the backend on the user's behalf.
pub(crate) struct Context {
    pub(crate) client: http::Client,
    pub(crate) session: Arc<session::Store>,
    pub(crate) prompt: Box<dyn password::Prompt>,
}

impl Context {
    pub(crate) async fn identity(&self) -> Result<Identity> {
        self.session
            .current_identity()
            .await
            .filter(Identity::is_authenticated)
            .ok_or(Error::NotLoggedIn)
    }

    /// Client-side gate mirroring what the backend will enforce anyway.
    pub(crate) async fn require(&self, role: Role, action: &'static str) -> Result<Identity> {
        let identity = self.identity().await?;
        if identity.effective_role() == role {
            Ok(identity)
        } else {
            Err(Error::NotPermitted { role, action })
        }
    }

    /// The account id of the signed-in player, for player-scoped endpoints.
    pub(crate) async fn player_id(&self, action: &'static str) -> Result<u64> {
        let identity = self.require(Role::Player, action).await?;
        identity.id.ok_or(Error::UnknownAccountId(identity.email, action))
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: &Context) -> Result<()>;
}

pub(crate) fn print_table<T: Tabled>(rows: impl IntoIterator<Item = T>, empty: &str) {
    let mut rows = rows.into_iter().peekable();
    if rows.peek().is_none() {
        println!("{empty}");
    } else {
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
}

pub(crate) fn print_ack(ack: impl Display, fallback: &str) {
    let ack = ack.to_string();
    println!("{}", if ack.is_empty() { fallback } else { &ack });
}
