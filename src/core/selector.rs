use std::sync::Arc;

use crate::core::MatchingError;
use crate::models::{User, UserId};
use crate::services::{SwipeStore, UserDirectory};

/// Picks the next user to show: anyone but the requester that the
/// requester has not swiped on yet, lowest id first.
///
/// There is no scoring here. Results are stable for a fixed swipe
/// history and a candidate only drops out once it has been swiped.
#[derive(Clone)]
pub struct CandidateSelector {
    users: Arc<dyn UserDirectory>,
    swipes: Arc<dyn SwipeStore>,
}

impl CandidateSelector {
    pub fn new(users: Arc<dyn UserDirectory>, swipes: Arc<dyn SwipeStore>) -> Self {
        Self { users, swipes }
    }

    pub async fn next(&self, user_id: UserId) -> Result<Option<User>, MatchingError> {
        let mut batch = self.next_batch(user_id, 1).await?;
        Ok(batch.pop())
    }

    /// Up to `limit` candidates in selection order (`limit` of 0 is treated as 1)
    pub async fn next_batch(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<User>, MatchingError> {
        if !self.users.exists(user_id).await? {
            return Err(MatchingError::UserNotFound(user_id));
        }

        let candidates = self.swipes.find_candidates(user_id, limit.max(1)).await?;

        tracing::debug!(
            "Found {} candidate(s) for user {}",
            candidates.len(),
            user_id
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MemorySwipeStore, MemoryUserDirectory};

    fn selector(ids: &[UserId]) -> (CandidateSelector, Arc<MemorySwipeStore>) {
        let users = Arc::new(MemoryUserDirectory::with_users(
            ids.iter().map(|id| User::new(*id, format!("User {}", id), None)),
        ));
        let swipes = Arc::new(MemorySwipeStore::new(users.clone()));
        (CandidateSelector::new(users, swipes.clone()), swipes)
    }

    #[tokio::test]
    async fn test_next_is_stable_until_swiped() {
        let (selector, swipes) = selector(&[1, 2, 3]);

        assert_eq!(selector.next(1).await.unwrap().unwrap().id, 2);
        assert_eq!(selector.next(1).await.unwrap().unwrap().id, 2);

        swipes.record(1, 2, false).await.unwrap();
        assert_eq!(selector.next(1).await.unwrap().unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_next_unknown_user() {
        let (selector, _) = selector(&[1, 2]);

        let err = selector.next(99).await.unwrap_err();
        assert!(matches!(err, MatchingError::UserNotFound(99)));
    }

    #[tokio::test]
    async fn test_next_batch_zero_limit_returns_one() {
        let (selector, _) = selector(&[1, 2, 3]);

        let batch = selector.next_batch(1, 0).await.unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[tokio::test]
    async fn test_lonely_user_has_no_candidates() {
        let (selector, _) = selector(&[1]);
        assert!(selector.next(1).await.unwrap().is_none());
    }
}
