use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::models::{Match, Swipe, User, UserId};
use crate::services::store::{MatchStore, StoreError, SwipeStore, UserDirectory};

/// In-memory user directory, ordered by id
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: RwLock<BTreeMap<UserId, User>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    async fn all_except(&self, excluded: &HashSet<UserId>) -> Vec<User> {
        self.users
            .read()
            .await
            .values()
            .filter(|u| !excluded.contains(&u.id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn exists(&self, user_id: UserId) -> Result<bool, StoreError> {
        Ok(self.users.read().await.contains_key(&user_id))
    }

    async fn get(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }
}

/// In-memory swipe store
///
/// The ordered-pair map is guarded by a single mutex so the
/// check-and-insert in `record` is atomic.
#[derive(Debug)]
pub struct MemorySwipeStore {
    users: Arc<MemoryUserDirectory>,
    swipes: Mutex<HashMap<(UserId, UserId), Swipe>>,
    next_id: AtomicI64,
}

impl MemorySwipeStore {
    pub fn new(users: Arc<MemoryUserDirectory>) -> Self {
        Self {
            users,
            swipes: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored swipe records
    pub async fn len(&self) -> usize {
        self.swipes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SwipeStore for MemorySwipeStore {
    async fn exists(&self, swiper_id: UserId, target_id: UserId) -> Result<bool, StoreError> {
        Ok(self.swipes.lock().await.contains_key(&(swiper_id, target_id)))
    }

    async fn record(
        &self,
        swiper_id: UserId,
        target_id: UserId,
        liked: bool,
    ) -> Result<Swipe, StoreError> {
        let mut swipes = self.swipes.lock().await;
        if swipes.contains_key(&(swiper_id, target_id)) {
            return Err(StoreError::ConstraintViolation(
                "uk_swipe_swiper_target".to_string(),
            ));
        }

        let swipe = Swipe {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            swiper_id,
            target_id,
            liked,
            created_at: Utc::now(),
        };
        swipes.insert((swiper_id, target_id), swipe.clone());

        Ok(swipe)
    }

    async fn find_liked(
        &self,
        swiper_id: UserId,
        target_id: UserId,
    ) -> Result<Option<Swipe>, StoreError> {
        Ok(self
            .swipes
            .lock()
            .await
            .get(&(swiper_id, target_id))
            .filter(|s| s.liked)
            .cloned())
    }

    async fn find_candidates(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<User>, StoreError> {
        let mut excluded: HashSet<UserId> = self
            .swipes
            .lock()
            .await
            .keys()
            .filter(|(swiper, _)| *swiper == user_id)
            .map(|(_, target)| *target)
            .collect();
        excluded.insert(user_id);

        let mut candidates = self.users.all_except(&excluded).await;
        candidates.truncate(limit);

        Ok(candidates)
    }
}

/// In-memory match store enforcing one match per unordered pair
#[derive(Debug)]
pub struct MemoryMatchStore {
    matches: Mutex<Vec<Match>>,
    next_id: AtomicI64,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self {
            matches: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored match records
    pub async fn len(&self) -> usize {
        self.matches.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryMatchStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MatchStore for MemoryMatchStore {
    async fn are_matched(&self, user1_id: UserId, user2_id: UserId) -> Result<bool, StoreError> {
        Ok(self
            .matches
            .lock()
            .await
            .iter()
            .any(|m| m.is_pair(user1_id, user2_id)))
    }

    async fn create(&self, user1_id: UserId, user2_id: UserId) -> Result<Match, StoreError> {
        let mut matches = self.matches.lock().await;
        if matches.iter().any(|m| m.is_pair(user1_id, user2_id)) {
            return Err(StoreError::ConstraintViolation(
                "uk_match_user_pair".to_string(),
            ));
        }

        let created = Match {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user1_id,
            user2_id,
            created_at: Utc::now(),
        };
        matches.push(created.clone());

        Ok(created)
    }

    async fn find_for_user(&self, user_id: UserId) -> Result<Vec<Match>, StoreError> {
        let mut found: Vec<Match> = self
            .matches
            .lock()
            .await
            .iter()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect();

        // Ids are handed out under the lock, so id order is creation order
        found.sort_by(|a, b| b.id.cmp(&a.id));

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(ids: &[UserId]) -> Arc<MemoryUserDirectory> {
        Arc::new(MemoryUserDirectory::with_users(
            ids.iter().map(|id| User::new(*id, format!("User {}", id), None)),
        ))
    }

    #[tokio::test]
    async fn test_record_rejects_second_swipe_for_pair() {
        let store = MemorySwipeStore::new(directory(&[1, 2]));

        store.record(1, 2, true).await.unwrap();
        let second = store.record(1, 2, false).await;

        assert!(matches!(second, Err(StoreError::ConstraintViolation(_))));
        assert_eq!(store.len().await, 1);
        // The original decision is kept
        assert!(store.find_liked(1, 2).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_swipes_are_directional() {
        let store = MemorySwipeStore::new(directory(&[1, 2]));

        store.record(1, 2, true).await.unwrap();
        assert!(store.exists(1, 2).await.unwrap());
        assert!(!store.exists(2, 1).await.unwrap());

        store.record(2, 1, false).await.unwrap();
        assert!(store.find_liked(2, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_candidates_exclude_self_and_swiped_in_id_order() {
        let store = MemorySwipeStore::new(directory(&[4, 1, 3, 2]));

        store.record(1, 3, false).await.unwrap();
        // Incoming swipes do not exclude
        store.record(2, 1, true).await.unwrap();

        let ids: Vec<UserId> = store
            .find_candidates(1, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();

        assert_eq!(ids, vec![2, 4]);
        assert_eq!(store.find_candidates(1, 1).await.unwrap()[0].id, 2);
    }

    #[tokio::test]
    async fn test_match_pair_unique_in_either_order() {
        let store = MemoryMatchStore::new();

        store.create(1, 2).await.unwrap();
        let reversed = store.create(2, 1).await;

        assert!(matches!(reversed, Err(StoreError::ConstraintViolation(_))));
        assert!(store.are_matched(2, 1).await.unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_for_user_most_recent_first() {
        let store = MemoryMatchStore::new();

        let first = store.create(1, 2).await.unwrap();
        let second = store.create(3, 1).await.unwrap();
        store.create(2, 3).await.unwrap();

        let ids: Vec<i64> = store
            .find_for_user(1)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();

        assert_eq!(ids, vec![second.id, first.id]);
    }
}
