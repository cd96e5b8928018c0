// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::error;
use secrecy::SecretString;
use tabled::{builder::Builder, settings::Style};

use crate::{
    error::{self, Result},
    model::{display_option, RegisterRequest, Role},
    password::{self, Request},
    session::State,
};

use super::Context;

async fn password_for(
    ctx: &Context,
    given: Option<String>,
    req: Request,
) -> Result<SecretString> {
    match given {
        Some(password) => Ok(SecretString::new(password)),
        None => password::require(ctx.prompt.as_ref(), req).await,
    }
}

/// Sign in to the marketplace and remember the session.
#[derive(Debug, Parser)]
pub(crate) struct Login {
    /// The email address of the account.
    #[clap()]
    email: String,

    /// The password of the account. You are prompted for it when omitted.
    #[arg(long, env = "GAMEHUB_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[async_trait]
impl super::Command for Login {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let password = password_for(ctx, self.password, Request::existing(&self.email)).await?;
        let identity = ctx.session.login(&ctx.client, &self.email, password).await?;
        if !identity.is_authenticated() {
            error!("The server did not issue a session for {}", identity.email);
            return Err(error::Error::Command);
        }
        println!("Signed in as {} ({}).", identity.email, identity.role);
        Ok(())
    }
}

/// Create a new account.
///
/// Developer and designer accounts have to be approved by an administrator
/// before they can sign in.
#[derive(Debug, Parser)]
pub(crate) struct Register {
    /// The email address to register.
    #[clap()]
    email: String,

    /// The kind of account to create.
    #[arg(long, short, value_enum, default_value_t = Role::Player)]
    role: Role,

    /// Your full name.
    #[arg(long)]
    full_name: Option<String>,

    /// A link to your portfolio (developers and designers).
    #[arg(long)]
    portfolio_url: Option<String>,

    /// Years of professional experience (developers and designers).
    #[arg(long)]
    experience_years: Option<u32>,

    /// The password for the new account. You are prompted for it when omitted.
    #[arg(long, env = "GAMEHUB_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[async_trait]
impl super::Command for Register {
    async fn execute(self, ctx: &Context) -> Result<()> {
        if matches!(self.role, Role::Admin | Role::Guest) {
            error!("Accounts with the {} role cannot be registered", self.role);
            return Err(error::Error::Command);
        }
        if self.role.is_professional() && self.portfolio_url.is_none() {
            error!("A portfolio URL is required to register as a {}", self.role);
            return Err(error::Error::Command);
        }

        let password = password_for(ctx, self.password, Request::new_account(&self.email)).await?;
        let identity = ctx
            .session
            .register(
                &ctx.client,
                RegisterRequest {
                    email: self.email,
                    password,
                    role: self.role,
                    full_name: self.full_name,
                    portfolio_url: self.portfolio_url,
                    experience_years: self.experience_years,
                },
            )
            .await?;

        if identity.is_authenticated() && !identity.is_gated() {
            println!("Registered and signed in as {}.", identity.email);
        } else {
            println!(
                "Registered {}. An administrator has to approve the account \
                 before you can sign in.",
                identity.email
            );
        }
        Ok(())
    }
}

/// Forget the stored session.
#[derive(Debug, Parser)]
pub(crate) struct Logout;

#[async_trait]
impl super::Command for Logout {
    async fn execute(self, ctx: &Context) -> Result<()> {
        ctx.session.logout().await?;
        println!("Signed out.");
        Ok(())
    }
}

/// Show who the stored session belongs to.
#[derive(Debug, Parser)]
pub(crate) struct Whoami;

#[async_trait]
impl super::Command for Whoami {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let identity = match ctx.session.state().await {
            State::Authenticated(identity) => identity,
            State::Unknown | State::Anonymous => {
                println!("Not signed in.");
                return Ok(());
            }
        };

        let mut builder = Builder::default();
        builder.push_record(["Email".to_owned(), identity.email.clone()]);
        builder.push_record(["Role".to_owned(), identity.role.to_string()]);
        builder.push_record(["ID".to_owned(), display_option(&identity.id)]);
        builder.push_record(["Status".to_owned(), display_option(&identity.status)]);
        builder.push_record(["Name".to_owned(), display_option(&identity.full_name)]);
        builder.push_record(["Portfolio".to_owned(), display_option(&identity.portfolio_url)]);
        builder.push_record(["Experience".to_owned(), display_option(&identity.experience_years)]);
        builder.push_record(["Points".to_owned(), display_option(&identity.total_points)]);
        println!("{}", builder.build().with(Style::rounded()));
        Ok(())
    }
}
