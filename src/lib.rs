//! Swipe Match - swipe recording and mutual-match engine
//!
//! Users like or dislike other users; when two users like each other a
//! match is created. The engine keeps at most one swipe per ordered pair
//! and at most one match per unordered pair, relying on the storage layer
//! to arbitrate concurrent writers.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CandidateSelector, MatchingEngine, MatchingError};
pub use crate::models::{Match, MatchView, Swipe, SwipeOutcome, User, UserId};
pub use crate::services::{MatchStore, StoreError, SwipeStore, UserDirectory};
