//! Credential persistence.
//!
//! Tokens live under two independent keys of a [`TokenStorage`] backend.
//! Backends offer no atomic multi-key write, so the "both present or both
//! absent" invariant is best effort: [`CredentialStore::load`] only reports a
//! pair when both keys are readable.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`TokenStorage`] | Key/value trait for token backends |
//! | [`MemoryTokenStorage`] | In-process backend (default, tests) |
//! | [`KeyringTokenStorage`] | OS keyring backend |
//! | [`CredentialStore`] | Typed access to the access/refresh token pair |

mod memory;
mod os_keyring;

pub use self::memory::MemoryTokenStorage;
pub use self::os_keyring::KeyringTokenStorage;

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Access/refresh token pair issued by login, signup and refresh.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    #[serde(rename = "access")]
    pub access_token: String,
    #[serde(rename = "refresh")]
    pub refresh_token: String,
}

impl CredentialPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Tokens stay out of logs and panic messages.
impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
pub trait TokenStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// Typed view over the two token keys of a [`TokenStorage`].
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn TokenStorage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// Store backed by a fresh [`MemoryTokenStorage`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStorage::new()))
    }

    pub fn backend_name(&self) -> &'static str {
        self.storage.name()
    }

    pub async fn access_token(&self) -> Result<Option<String>> {
        self.storage.get(ACCESS_TOKEN_KEY).await
    }

    pub async fn refresh_token(&self) -> Result<Option<String>> {
        self.storage.get(REFRESH_TOKEN_KEY).await
    }

    pub async fn load(&self) -> Result<Option<CredentialPair>> {
        let (access, refresh) = futures::try_join!(self.access_token(), self.refresh_token())?;
        match (access, refresh) {
            (Some(access_token), Some(refresh_token)) => Ok(Some(CredentialPair {
                access_token,
                refresh_token,
            })),
            (None, None) => Ok(None),
            (access, _) => {
                warn!(
                    backend = self.storage.name(),
                    has_access = access.is_some(),
                    "credential storage holds only one of the two tokens"
                );
                Ok(None)
            }
        }
    }

    pub async fn save(&self, pair: &CredentialPair) -> Result<()> {
        self.storage.set(ACCESS_TOKEN_KEY, &pair.access_token).await?;
        self.storage.set(REFRESH_TOKEN_KEY, &pair.refresh_token).await
    }

    pub async fn set_access_token(&self, token: &str) -> Result<()> {
        self.storage.set(ACCESS_TOKEN_KEY, token).await
    }

    pub async fn set_refresh_token(&self, token: &str) -> Result<()> {
        self.storage.set(REFRESH_TOKEN_KEY, token).await
    }

    /// Removes both tokens. Both removals are attempted; the first failure is returned.
    pub async fn clear(&self) -> Result<()> {
        let (access, refresh) = futures::join!(
            self.storage.remove(ACCESS_TOKEN_KEY),
            self.storage.remove(REFRESH_TOKEN_KEY)
        );
        access.and(refresh)
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.load().await?.is_some())
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("backend", &self.storage.name())
            .finish()
    }
}
