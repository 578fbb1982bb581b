use super::TokenStorage;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use keyring::Entry;

pub const DEFAULT_SERVICE: &str = "videoq";

/// Token storage in the operating system keyring.
///
/// Each key becomes one keyring entry under `service`. Tokens survive process
/// restarts, which makes this the closest match to browser local storage.
#[derive(Debug, Clone)]
pub struct KeyringTokenStorage {
    service: String,
}

impl KeyringTokenStorage {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Runs a blocking keyring call for `key` on the blocking thread pool.
    async fn with_entry<T, F>(&self, op: &'static str, key: &str, call: F) -> Result<T>
    where
        F: FnOnce(&Entry) -> std::result::Result<T, keyring::Error> + Send + 'static,
        T: Send + 'static,
    {
        let service = self.service.clone();
        let owned_key = key.to_string();
        tokio::task::spawn_blocking(move || call(&Entry::new(&service, &owned_key)?))
            .await
            .map_err(|e| {
                Error::storage_with_context(
                    format!("keyring {} task failed: {}", op, e),
                    ErrorContext::new()
                        .with_field_path(key)
                        .with_source("keyring"),
                )
            })?
            .map_err(|e| keyring_error(op, key, e))
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

fn keyring_error(op: &str, key: &str, err: keyring::Error) -> Error {
    Error::storage_with_context(
        format!("keyring {} failed: {}", op, err),
        ErrorContext::new()
            .with_field_path(key)
            .with_source("keyring"),
    )
}

#[async_trait]
impl TokenStorage for KeyringTokenStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_entry("read", key, |entry| match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let value = value.to_string();
        self.with_entry("write", key, move |entry| entry.set_password(&value)).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.with_entry("delete", key, |entry| match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        })
        .await
    }

    fn name(&self) -> &'static str {
        "keyring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_keyring() -> KeyringTokenStorage {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        KeyringTokenStorage::new("videoq-test")
    }

    #[tokio::test]
    async fn missing_entry_reads_as_none() {
        let storage = mock_keyring();
        assert_eq!(storage.get("access_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn removing_missing_entry_succeeds() {
        let storage = mock_keyring();
        storage.remove("refresh_token").await.unwrap();
    }

    #[test]
    fn default_service_name() {
        let storage = KeyringTokenStorage::default();
        assert_eq!(storage.service(), "videoq");
        assert_eq!(storage.name(), "keyring");
    }
}
