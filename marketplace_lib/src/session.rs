//! Auth token persistence on top of a [`KeyValueStore`].

use marketplace_api::{ApiError, Client};

use crate::store::{KeyValueStore, StoreError};

const TOKEN_KEY: &str = "auth_token";

/// The signed-in user's session, backed by a key-value store.
pub struct Session<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn save_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token.trim())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_KEY)
    }

    /// Builds an API client carrying the stored token, if any.
    pub fn client(&self, base_url: &str) -> Result<Client, ApiError> {
        Ok(Client::with_base_url(base_url)?.with_token(self.token()))
    }

    /// Drops the stored token when `err` says it is no longer valid.
    ///
    /// Returns `true` if the session was cleared.
    pub fn handle_error(&self, err: &ApiError) -> Result<bool, StoreError> {
        if !err.is_auth_error() {
            return Ok(false);
        }
        tracing::info!("session expired, clearing stored token");
        self.clear()?;
        Ok(true)
    }
}
