// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Match, MatchView, Swipe, SwipeOutcome, User, UserId};
pub use requests::{CandidateBatchQuery, CheckMatchRequest, SwipeRequest};
pub use responses::{
    CandidatesResponse, ErrorResponse, HealthResponse, MatchCheckResponse, MatchedResponse,
    SwipedResponse,
};
