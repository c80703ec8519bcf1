use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::MatchingError;
use crate::models::{CheckMatchRequest, MatchCheckResponse, MatchedResponse, UserId};
use crate::routes::{validation_failed, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches/user/{user_id}", web::get().to(get_user_matches))
        .route("/matches/check", web::post().to(check_match))
        .route("/matches/{user1_id}/{user2_id}", web::get().to(are_matched));
}

/// Get all matches for a user
///
/// GET /api/v1/matches/user/{userId}
///
/// Most recent first; each entry carries the other user of the pair.
async fn get_user_matches(
    state: web::Data<AppState>,
    path: web::Path<UserId>,
) -> Result<HttpResponse, MatchingError> {
    let user_id = path.into_inner();
    let matches = state.engine.get_user_matches(user_id).await?;

    tracing::debug!("Returning {} matches for user {}", matches.len(), user_id);

    Ok(HttpResponse::Ok().json(matches))
}

/// Run mutual-match detection for a pair
///
/// POST /api/v1/matches/check
///
/// Request body:
/// ```json
/// {
///   "userAId": 1,
///   "userBId": 2
/// }
/// ```
async fn check_match(
    state: web::Data<AppState>,
    req: web::Json<CheckMatchRequest>,
) -> Result<HttpResponse, MatchingError> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let created = state
        .engine
        .create_match_if_mutual(req.user_a_id, req.user_b_id)
        .await?;

    Ok(HttpResponse::Ok().json(MatchCheckResponse {
        match_created: created.is_some(),
        created,
    }))
}

/// GET /api/v1/matches/{user1Id}/{user2Id}
async fn are_matched(
    state: web::Data<AppState>,
    path: web::Path<(UserId, UserId)>,
) -> Result<HttpResponse, MatchingError> {
    let (user1_id, user2_id) = path.into_inner();
    let matched = state.engine.are_matched(user1_id, user2_id).await?;

    Ok(HttpResponse::Ok().json(MatchedResponse { matched }))
}
