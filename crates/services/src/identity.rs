//! The signed-in learner, cached under `bounce_user` and broadcast to
//! subscribers whenever it changes.

use std::sync::Arc;

use bounce_core::model::UserProfile;
use storage::keys;
use storage::repository::KeyValueRepository;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::IdentityError;

#[derive(Clone)]
pub struct IdentityService {
    kv: Arc<dyn KeyValueRepository>,
    sender: Arc<watch::Sender<Option<UserProfile>>>,
}

impl IdentityService {
    /// Start signed out; call [`IdentityService::refresh`] to pick up a cached user.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueRepository>) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            kv,
            sender: Arc::new(sender),
        }
    }

    /// Build and immediately load the cached user.
    pub async fn load(kv: Arc<dyn KeyValueRepository>) -> Self {
        let service = Self::new(kv);
        service.refresh().await;
        service
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn current(&self) -> Option<UserProfile> {
        self.sender.borrow().clone()
    }

    /// Re-read the cached user. Unreadable or malformed entries read as signed out.
    pub async fn refresh(&self) -> Option<UserProfile> {
        let user = match self.kv.get(keys::USER).await {
            Ok(raw) => raw.as_deref().and_then(UserProfile::from_json),
            Err(err) => {
                warn!(error = %err, "could not read cached user");
                None
            }
        };
        self.publish(user.clone());
        user
    }

    /// Cache `user` and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the profile cannot be stored.
    pub async fn sign_in(&self, user: UserProfile) -> Result<(), IdentityError> {
        let raw = serde_json::to_string(&user)?;
        self.kv.set(keys::USER, &raw).await?;
        info!(user_id = user.id, "signed in");
        self.publish(Some(user));
        Ok(())
    }

    /// Drop the cached user and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the entry cannot be removed.
    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        self.kv.remove(keys::USER).await?;
        info!("signed out");
        self.publish(None);
        Ok(())
    }

    fn publish(&self, user: Option<UserProfile>) {
        self.sender.send_if_modified(|current| {
            if *current == user {
                return false;
            }
            *current = user;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn ada() -> UserProfile {
        UserProfile {
            id: 1,
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            avatar: None,
        }
    }

    #[tokio::test]
    async fn subscribers_see_sign_in_and_out() {
        let identity = IdentityService::new(Arc::new(InMemoryRepository::new()));
        let mut rx = identity.subscribe();
        assert_eq!(*rx.borrow(), None);

        identity.sign_in(ada()).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref(), Some(&ada()));

        identity.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[tokio::test]
    async fn load_reads_cached_user_and_ignores_garbage() {
        let repo = InMemoryRepository::new();
        repo.set(keys::USER, &serde_json::to_string(&ada()).unwrap())
            .await
            .unwrap();
        let identity = IdentityService::load(Arc::new(repo.clone())).await;
        assert_eq!(identity.current(), Some(ada()));

        repo.set(keys::USER, "not json").await.unwrap();
        assert_eq!(identity.refresh().await, None);
        assert_eq!(identity.current(), None);
    }

    #[tokio::test]
    async fn unchanged_refresh_does_not_notify() {
        let identity = IdentityService::new(Arc::new(InMemoryRepository::new()));
        let rx = identity.subscribe();
        identity.refresh().await;
        assert!(!rx.has_changed().unwrap());
    }
}
