//! Session lifecycle notifications.
//!
//! When a 401 cannot be resolved by refreshing the access token, the client
//! clears the stored credentials and tells the [`SessionObserver`] where the
//! user should go next. Applications decide what "go to login" means for them.

use async_trait::async_trait;
use std::sync::Arc;

/// Login redirect issued after an unrecoverable authentication failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub login_path: String,
    pub reason: String,
}

#[async_trait]
pub trait SessionObserver: Send + Sync {
    async fn session_expired(&self, redirect: &LoginRedirect);
}

/// Ignores session events.
pub struct NoopSessionObserver;

#[async_trait]
impl SessionObserver for NoopSessionObserver {
    async fn session_expired(&self, _: &LoginRedirect) {}
}

/// Returns a no-op session observer.
pub fn noop_observer() -> Arc<dyn SessionObserver> {
    Arc::new(NoopSessionObserver)
}
