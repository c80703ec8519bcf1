// Core engine exports
pub mod engine;
pub mod error;
pub mod selector;

pub use engine::MatchingEngine;
pub use error::MatchingError;
pub use selector::CandidateSelector;
