// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{ffi::OsString, path::Path};

use async_trait::async_trait;
use secrecy::{ExposeSecret as _, SecretString};
use tokio::task;

use crate::{
    error::{self, Result},
    metadata,
};

#[derive(Debug, Clone)]
pub(crate) struct Request {
    account: String,
    confirm: bool,
}

impl Request {
    /// Asks for the password of an existing account.
    pub(crate) fn existing(account: &str) -> Self {
        Self {
            account: account.to_owned(),
            confirm: false,
        }
    }

    /// Asks for a new password, entered twice.
    pub(crate) fn new_account(account: &str) -> Self {
        Self {
            account: account.to_owned(),
            confirm: true,
        }
    }
}

#[async_trait]
pub(crate) trait Prompt: Send + Sync {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>>;
}

#[async_trait]
impl<T: Prompt + ?Sized> Prompt for Box<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        (**self).prompt(req).await
    }
}

#[async_trait]
impl<T: Prompt> Prompt for Vec<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        for candidate in self {
            if let r @ (Ok(Some(_)) | Err(_)) = candidate.prompt(req.clone()).await {
                return r;
            }
        }

        Ok(None)
    }
}

/// Asks the first prompt that can answer, failing when none can.
pub(crate) async fn require(prompt: &(dyn Prompt + '_), req: Request) -> Result<SecretString> {
    prompt
        .prompt(req)
        .await?
        .ok_or_else(|| error::Password::NoPrompt.into())
}

pub(crate) struct PinentryPrompt {
    executable: Option<OsString>,
}

impl PinentryPrompt {
    pub(crate) const fn new() -> Self {
        Self { executable: None }
    }

    pub(crate) fn new_with_executable<P: AsRef<Path>>(executable: P) -> Self {
        Self {
            executable: Some(executable.as_ref().as_os_str().into()),
        }
    }
}

#[async_trait]
impl Prompt for PinentryPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        fn interact<'input>(
            mut input: pinentry::PassphraseInput<'input>,
            title: &'input str,
            description: &'input str,
            confirm: bool,
        ) -> Result<SecretString> {
            _ = input.required("A password is required to continue.");
            _ = input.with_title(title);
            _ = input.with_description(description);
            _ = input.with_prompt("Password");
            if confirm {
                _ = input.with_confirmation("Confirm", "The passwords do not match.");
            }

            Ok(input.interact()?)
        }

        let title = format!("Password - {}", *metadata::CLIENT_DISPLAY_NAME);
        let description = format!("Enter the password for {}.", req.account);

        let input = self
            .executable
            .as_ref()
            .and_then(pinentry::PassphraseInput::with_binary)
            .or_else(pinentry::PassphraseInput::with_default_binary)
            .map(|input| {
                task::spawn_blocking(move || interact(input, &title, &description, req.confirm))
            });

        Ok(match input {
            Some(fut) => Some(fut.await??),
            None => None,
        })
    }
}

pub(crate) struct RpasswordPrompt;

#[async_trait]
impl Prompt for RpasswordPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        let password = task::spawn_blocking(move || -> Result<SecretString> {
            let first = rpassword::prompt_password(format!("Password for {}: ", req.account))?;
            if req.confirm {
                let second = rpassword::prompt_password("Confirm password: ")?;
                if first != second {
                    return Err(error::Password::Mismatch.into());
                }
            }
            Ok(SecretString::new(first))
        })
        .await??;

        if password.expose_secret().is_empty() {
            return Err(error::Error::Cancelled);
        }
        Ok(Some(password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    #[async_trait]
    impl Prompt for Unavailable {
        async fn prompt(&self, _: Request) -> Result<Option<SecretString>> {
            Ok(None)
        }
    }

    struct Answers(&'static str);

    #[async_trait]
    impl Prompt for Answers {
        async fn prompt(&self, _: Request) -> Result<Option<SecretString>> {
            Ok(Some(SecretString::new(self.0.to_owned())))
        }
    }

    #[tokio::test]
    async fn falls_through_to_next_prompt() -> Result<()> {
        let prompts: Vec<Box<dyn Prompt>> = vec![Box::new(Unavailable), Box::new(Answers("x"))];

        let password = require(&prompts, Request::existing("a@b.com")).await?;
        assert_eq!(password.expose_secret(), "x");
        Ok(())
    }

    #[tokio::test]
    async fn no_prompt_available() {
        let prompts: Vec<Box<dyn Prompt>> = vec![Box::new(Unavailable)];

        let result = require(&prompts, Request::new_account("a@b.com")).await;
        assert!(matches!(
            result,
            Err(error::Error::Password(error::Password::NoPrompt))
        ));
    }
}
