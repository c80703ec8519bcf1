use std::sync::Arc;

use crate::core::{CandidateSelector, MatchingError};
use crate::models::{Match, MatchView, SwipeOutcome, User, UserId};
use crate::services::{MatchStore, StoreError, SwipeStore, UserDirectory};

/// Swipe and match orchestrator
///
/// Every write follows the same shape: an application-level existence
/// check for the common case, then a constrained write whose uniqueness
/// violation is translated at this boundary. The stores, not this type,
/// decide which of several concurrent writers wins.
#[derive(Clone)]
pub struct MatchingEngine {
    users: Arc<dyn UserDirectory>,
    swipes: Arc<dyn SwipeStore>,
    matches: Arc<dyn MatchStore>,
    selector: CandidateSelector,
}

impl MatchingEngine {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        swipes: Arc<dyn SwipeStore>,
        matches: Arc<dyn MatchStore>,
    ) -> Self {
        let selector = CandidateSelector::new(users.clone(), swipes.clone());
        Self {
            users,
            swipes,
            matches,
            selector,
        }
    }

    /// Record a like or dislike from `swiper_id` on `target_id`
    ///
    /// # Errors
    /// * `InvalidOperation` when a user swipes on themselves
    /// * `UserNotFound` naming whichever id does not resolve
    /// * `DuplicateSwipe` when the ordered pair was already swiped, either
    ///   seen by the pre-check or raised by the store on a concurrent write
    pub async fn record_swipe(
        &self,
        swiper_id: UserId,
        target_id: UserId,
        liked: bool,
    ) -> Result<SwipeOutcome, MatchingError> {
        tracing::debug!(swiper_id, target_id, liked, "Recording swipe");

        if swiper_id == target_id {
            return Err(MatchingError::InvalidOperation(
                "User cannot swipe on themselves".to_string(),
            ));
        }
        self.ensure_user(swiper_id).await?;
        self.ensure_user(target_id).await?;

        if self.swipes.exists(swiper_id, target_id).await? {
            return Err(MatchingError::DuplicateSwipe {
                swiper_id,
                target_id,
            });
        }

        match self.swipes.record(swiper_id, target_id, liked).await {
            Ok(_) => {}
            Err(StoreError::ConstraintViolation(constraint)) => {
                tracing::debug!(
                    swiper_id,
                    target_id,
                    constraint = %constraint,
                    "Concurrent duplicate swipe rejected by store"
                );
                return Err(MatchingError::DuplicateSwipe {
                    swiper_id,
                    target_id,
                });
            }
            Err(e) => return Err(e.into()),
        }

        let match_created = if liked {
            self.create_match_if_mutual(swiper_id, target_id)
                .await?
                .is_some()
        } else {
            false
        };

        let next_candidate = self.selector.next(swiper_id).await?;

        tracing::info!(
            swiper_id,
            target_id,
            liked,
            match_created,
            "Swipe recorded"
        );

        Ok(SwipeOutcome::recorded(match_created, next_candidate))
    }

    /// Create a match when both users have liked each other
    ///
    /// Returns `None` when the pair is already matched, when either like
    /// is missing, or when a concurrent caller created the match first.
    pub async fn create_match_if_mutual(
        &self,
        user_a_id: UserId,
        user_b_id: UserId,
    ) -> Result<Option<Match>, MatchingError> {
        if self.matches.are_matched(user_a_id, user_b_id).await? {
            tracing::debug!("Users {} and {} are already matched", user_a_id, user_b_id);
            return Ok(None);
        }

        let a_likes_b = self.swipes.find_liked(user_a_id, user_b_id).await?;
        let b_likes_a = self.swipes.find_liked(user_b_id, user_a_id).await?;
        if a_likes_b.is_none() || b_likes_a.is_none() {
            tracing::debug!("No mutual like between users {} and {}", user_a_id, user_b_id);
            return Ok(None);
        }

        match self.matches.create(user_a_id, user_b_id).await {
            Ok(created) => {
                tracing::info!(
                    match_id = created.id,
                    user_a_id,
                    user_b_id,
                    "Mutual match created"
                );
                Ok(Some(created))
            }
            Err(StoreError::ConstraintViolation(_)) => {
                tracing::warn!(
                    user_a_id,
                    user_b_id,
                    "Match already created by a concurrent request"
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All matches of `user_id`, most recent first, each showing the other user
    pub async fn get_user_matches(&self, user_id: UserId) -> Result<Vec<MatchView>, MatchingError> {
        self.ensure_user(user_id).await?;

        let matches = self.matches.find_for_user(user_id).await?;
        let mut views = Vec::with_capacity(matches.len());

        for m in matches {
            let other_id = m.other_user(user_id);
            match self.users.get(other_id).await? {
                Some(matched_user) => views.push(MatchView {
                    match_id: m.id,
                    matched_user,
                    matched_at: m.created_at,
                }),
                None => {
                    tracing::warn!(
                        match_id = m.id,
                        other_id,
                        "Matched user missing from directory, skipping"
                    );
                }
            }
        }

        tracing::debug!("Found {} matches for user {}", views.len(), user_id);

        Ok(views)
    }

    pub async fn next_candidate(&self, user_id: UserId) -> Result<Option<User>, MatchingError> {
        self.selector.next(user_id).await
    }

    pub async fn next_candidates(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<User>, MatchingError> {
        self.selector.next_batch(user_id, limit).await
    }

    pub async fn has_swiped(
        &self,
        swiper_id: UserId,
        target_id: UserId,
    ) -> Result<bool, MatchingError> {
        Ok(self.swipes.exists(swiper_id, target_id).await?)
    }

    pub async fn are_matched(&self, user1_id: UserId, user2_id: UserId) -> Result<bool, MatchingError> {
        Ok(self.matches.are_matched(user1_id, user2_id).await?)
    }

    /// Storage liveness, for the health endpoint
    pub async fn health_check(&self) -> bool {
        match self.swipes.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Storage health check failed: {}", e);
                false
            }
        }
    }

    async fn ensure_user(&self, user_id: UserId) -> Result<(), MatchingError> {
        if self.users.exists(user_id).await? {
            Ok(())
        } else {
            Err(MatchingError::UserNotFound(user_id))
        }
    }
}
