// Unit tests for request and response models

use swipe_match::models::{CheckMatchRequest, SwipeRequest};
use swipe_match::{MatchingError, SwipeOutcome, User};
use validator::Validate;

#[test]
fn test_swipe_request_accepts_camel_and_snake_case() {
    let camel: SwipeRequest =
        serde_json::from_str(r#"{"swiperId": 1, "targetId": 2, "liked": true}"#).unwrap();
    let snake: SwipeRequest =
        serde_json::from_str(r#"{"swiper_id": 1, "target_id": 2, "liked": false}"#).unwrap();

    assert_eq!(camel.into_parts().unwrap(), (1, 2, true));
    assert_eq!(snake.into_parts().unwrap(), (1, 2, false));
}

#[test]
fn test_swipe_request_missing_ids_are_invalid_operations() {
    let req: SwipeRequest = serde_json::from_str(r#"{"targetId": 2, "liked": true}"#).unwrap();
    assert!(req.validate().is_ok());

    match req.into_parts() {
        Err(MatchingError::InvalidOperation(reason)) => {
            assert_eq!(reason, "Swiper ID cannot be null")
        }
        other => panic!("expected InvalidOperation, got {:?}", other),
    }

    let req: SwipeRequest = serde_json::from_str(r#"{"swiperId": 1, "liked": true}"#).unwrap();
    assert!(matches!(
        req.into_parts(),
        Err(MatchingError::InvalidOperation(_))
    ));
}

#[test]
fn test_swipe_request_validation() {
    let missing_liked: SwipeRequest =
        serde_json::from_str(r#"{"swiperId": 1, "targetId": 2}"#).unwrap();
    assert!(missing_liked.validate().is_err());

    let negative_id: SwipeRequest =
        serde_json::from_str(r#"{"swiperId": -4, "targetId": 2, "liked": true}"#).unwrap();
    assert!(negative_id.validate().is_err());
}

#[test]
fn test_check_match_request_validation() {
    let req: CheckMatchRequest = serde_json::from_str(r#"{"userAId": 1, "userBId": 2}"#).unwrap();
    assert!(req.validate().is_ok());

    let req: CheckMatchRequest = serde_json::from_str(r#"{"userAId": 0, "userBId": 2}"#).unwrap();
    assert!(req.validate().is_err());
}

#[test]
fn test_swipe_outcome_wire_format() {
    let outcome = SwipeOutcome::recorded(true, Some(User::new(3, "Cara", None)));
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["isMatch"], true);
    assert_eq!(json["nextPotentialMatch"]["id"], 3);
    assert_eq!(json["message"], "Swipe recorded successfully");
}

#[test]
fn test_outcome_without_candidate_serializes_null() {
    let outcome = SwipeOutcome::recorded(false, None);
    let json = serde_json::to_value(&outcome).unwrap();

    assert!(json["nextPotentialMatch"].is_null());
    assert_eq!(
        json["message"],
        "Swipe recorded successfully. No more potential matches available"
    );
}

#[test]
fn test_error_codes() {
    assert_eq!(MatchingError::UserNotFound(1).code(), "USER_NOT_FOUND");
    assert_eq!(
        MatchingError::InvalidOperation("x".into()).code(),
        "INVALID_OPERATION"
    );
    assert_eq!(
        MatchingError::DuplicateSwipe {
            swiper_id: 1,
            target_id: 2
        }
        .code(),
        "DUPLICATE_SWIPE"
    );
}
