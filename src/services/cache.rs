use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{User, UserId};
use crate::services::store::{StoreError, UserDirectory};

/// Read-through cache in front of a [`UserDirectory`]
///
/// Only successful lookups are cached. A user missing from the
/// directory is looked up again on the next call.
pub struct CachedUserDirectory {
    inner: Arc<dyn UserDirectory>,
    users: moka::future::Cache<UserId, User>,
}

impl CachedUserDirectory {
    pub fn new(inner: Arc<dyn UserDirectory>, capacity: u64, ttl_secs: u64) -> Self {
        let users = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, users }
    }
}

#[async_trait]
impl UserDirectory for CachedUserDirectory {
    async fn exists(&self, user_id: UserId) -> Result<bool, StoreError> {
        if self.users.contains_key(&user_id) {
            return Ok(true);
        }
        Ok(self.get(user_id).await?.is_some())
    }

    async fn get(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        if let Some(user) = self.users.get(&user_id).await {
            tracing::trace!("User cache hit: {}", user_id);
            return Ok(Some(user));
        }

        let user = self.inner.get(user_id).await?;
        if let Some(user) = &user {
            self.users.insert(user_id, user.clone()).await;
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDirectory {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl UserDirectory for CountingDirectory {
        async fn exists(&self, user_id: UserId) -> Result<bool, StoreError> {
            Ok(self.get(user_id).await?.is_some())
        }

        async fn get(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok((user_id == 1).then(|| User::new(1, "Alice", None)))
        }
    }

    #[tokio::test]
    async fn test_positive_lookups_are_cached() {
        let inner = Arc::new(CountingDirectory {
            lookups: AtomicUsize::new(0),
        });
        let cached = CachedUserDirectory::new(inner.clone(), 100, 60);

        assert_eq!(cached.get(1).await.unwrap().unwrap().name, "Alice");
        assert!(cached.exists(1).await.unwrap());
        assert_eq!(cached.get(1).await.unwrap().unwrap().id, 1);

        assert_eq!(inner.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_users_are_not_cached() {
        let inner = Arc::new(CountingDirectory {
            lookups: AtomicUsize::new(0),
        });
        let cached = CachedUserDirectory::new(inner.clone(), 100, 60);

        assert!(!cached.exists(9).await.unwrap());
        assert!(cached.get(9).await.unwrap().is_none());

        assert_eq!(inner.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resolve_or_fail_names_missing_user() {
        let inner = Arc::new(CountingDirectory {
            lookups: AtomicUsize::new(0),
        });
        let cached = CachedUserDirectory::new(inner, 100, 60);

        let err = cached.resolve_or_fail(42).await.unwrap_err();
        assert!(matches!(err, crate::core::MatchingError::UserNotFound(42)));
    }
}
