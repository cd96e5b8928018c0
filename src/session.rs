// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use futures_util::lock::Mutex;
use log::{info, warn};
use secrecy::SecretString;
use tokio::sync::RwLock;

use crate::{
    api::{self, Executor as _},
    error::Result,
    http,
    model::{Credential, Identity, LoginRequest, RegisterRequest},
    storage::{IsPersistent as _, Storage},
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum State {
    /// Storage has not been read yet.
    Unknown,
    Anonymous,
    Authenticated(Identity),
}

impl State {
    pub(crate) const fn identity(&self) -> Option<&Identity> {
        match *self {
            Self::Authenticated(ref identity) => Some(identity),
            Self::Unknown | Self::Anonymous => None,
        }
    }
}

/// Remembers who is using the client, across runs when the storage is
/// persistent.
///
/// Every transition holds the storage lock while it writes storage and then
/// swaps the in-memory state, so transitions apply in the order their
/// triggering calls complete and readers only ever see whole states.
pub(crate) struct Store {
    state: RwLock<State>,
    storage: Mutex<Box<dyn Storage<Identity>>>,
}

impl Store {
    pub(crate) fn new(storage: Box<dyn Storage<Identity>>) -> Self {
        Self {
            state: RwLock::new(State::Unknown),
            storage: Mutex::new(storage),
        }
    }

    /// Creates a store and loads whatever session the storage remembers.
    pub(crate) async fn open(storage: Box<dyn Storage<Identity>>) -> Self {
        let store = Self::new(storage);
        store.rehydrate().await;
        store
    }

    /// Loads the persisted identity. Never fails: anything unusable leaves the
    /// session anonymous, and undecodable or credential-less entries are
    /// removed from storage.
    pub(crate) async fn rehydrate(&self) {
        let mut storage = self.storage.lock().await;
        let next = match storage.get().await {
            Ok(Some(identity)) if identity.is_authenticated() => {
                info!("Resumed session for {}", identity.email);
                State::Authenticated(identity)
            }
            Ok(Some(identity)) => {
                warn!("Discarding stored session for {} without a credential", identity.email);
                purge(&mut **storage).await;
                State::Anonymous
            }
            Ok(None) => State::Anonymous,
            Err(e) if e.is_malformed_data() => {
                warn!("Discarding unreadable stored session: {}", e);
                purge(&mut **storage).await;
                State::Anonymous
            }
            Err(e) => {
                warn!("We could not read the stored session: {}", e);
                State::Anonymous
            }
        };
        *self.state.write().await = next;
    }

    pub(crate) async fn state(&self) -> State {
        self.state.read().await.clone()
    }

    pub(crate) async fn current_identity(&self) -> Option<Identity> {
        self.state.read().await.identity().cloned()
    }

    async fn authenticate(&self, identity: &Identity) -> Result<()> {
        let mut storage = self.storage.lock().await;
        storage.update(identity).await?;
        *self.state.write().await = State::Authenticated(identity.clone());
        info!("Signed in as {} ({})", identity.email, identity.role);
        if !storage.is_persistent() {
            warn!("The session will be forgotten when this process exits");
        }
        Ok(())
    }

    pub(crate) async fn login(
        &self,
        client: &http::Client,
        email: &str,
        password: SecretString,
    ) -> Result<Identity> {
        let identity = api::Login(LoginRequest {
            email: email.to_owned(),
            password,
        })
        .execute(client)
        .await?;

        if identity.is_authenticated() {
            self.authenticate(&identity).await?;
        } else {
            warn!("The server accepted {} but issued no credential", identity.email);
        }
        Ok(identity)
    }

    /// Creates an account. The session only switches over to it when the
    /// backend handed out a credential for an account it does not still have
    /// to approve.
    pub(crate) async fn register(
        &self,
        client: &http::Client,
        req: RegisterRequest,
    ) -> Result<Identity> {
        let req = req.normalized();
        let identity = api::Register(&req)
            .execute(client)
            .await?
            .registered_from(&req);

        if identity.is_authenticated() && !identity.is_gated() {
            self.authenticate(&identity).await?;
        } else {
            info!(
                "Registered {} as {}; the account awaits approval",
                identity.email, identity.role
            );
        }
        Ok(identity)
    }

    pub(crate) async fn logout(&self) -> Result<()> {
        let mut storage = self.storage.lock().await;
        storage.clear().await?;
        *self.state.write().await = State::Anonymous;
        info!("Signed out");
        Ok(())
    }
}

async fn purge(storage: &mut (dyn Storage<Identity> + 'static)) {
    if let Err(e) = storage.clear().await {
        warn!("We could not remove the stored session: {}", e);
    }
}

#[async_trait]
impl http::Credentials for Store {
    async fn credential(&self) -> Option<Credential> {
        self.state
            .read()
            .await
            .identity()
            .and_then(|identity| identity.credential.clone())
    }
}
