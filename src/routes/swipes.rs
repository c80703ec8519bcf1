use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::MatchingError;
use crate::models::{CandidateBatchQuery, CandidatesResponse, ErrorResponse, SwipeRequest, SwipedResponse, UserId};
use crate::routes::{validation_failed, AppState};

/// Configure all swipe-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Literal segments first so "potential" is never parsed as a swiper id
    cfg.route("/swipes", web::post().to(record_swipe))
        .route("/swipes/potential/{user_id}", web::get().to(next_candidate))
        .route(
            "/swipes/potential/{user_id}/batch",
            web::get().to(next_candidates),
        )
        .route("/swipes/{swiper_id}/{target_id}", web::get().to(has_swiped));
}

/// Record swipe endpoint
///
/// POST /api/v1/swipes
///
/// Request body:
/// ```json
/// {
///   "swiperId": 1,
///   "targetId": 2,
///   "liked": true
/// }
/// ```
async fn record_swipe(
    state: web::Data<AppState>,
    req: web::Json<SwipeRequest>,
) -> Result<HttpResponse, MatchingError> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let (swiper_id, target_id, liked) = req.into_inner().into_parts()?;
    tracing::info!(swiper_id, target_id, liked, "Recording swipe");

    let outcome = state.engine.record_swipe(swiper_id, target_id, liked).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Next potential match endpoint
///
/// GET /api/v1/swipes/potential/{userId}
///
/// Responds 404 `NO_CANDIDATES` once the user has swiped on everyone.
async fn next_candidate(
    state: web::Data<AppState>,
    path: web::Path<UserId>,
) -> Result<HttpResponse, MatchingError> {
    let user_id = path.into_inner();

    match state.engine.next_candidate(user_id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => {
            tracing::info!("No potential matches available for user: {}", user_id);
            Ok(HttpResponse::NotFound().json(ErrorResponse::new(
                "NO_CANDIDATES",
                "No more potential matches available",
                404,
            )))
        }
    }
}

/// GET /api/v1/swipes/potential/{userId}/batch?limit=N
async fn next_candidates(
    state: web::Data<AppState>,
    path: web::Path<UserId>,
    query: web::Query<CandidateBatchQuery>,
) -> Result<HttpResponse, MatchingError> {
    if let Err(errors) = query.validate() {
        return Ok(validation_failed(errors));
    }

    let user_id = path.into_inner();
    let limit = query
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit) as usize;

    let candidates = state.engine.next_candidates(user_id, limit).await?;

    Ok(HttpResponse::Ok().json(CandidatesResponse {
        user_id,
        count: candidates.len(),
        candidates,
    }))
}

/// GET /api/v1/swipes/{swiperId}/{targetId}
async fn has_swiped(
    state: web::Data<AppState>,
    path: web::Path<(UserId, UserId)>,
) -> Result<HttpResponse, MatchingError> {
    let (swiper_id, target_id) = path.into_inner();
    let swiped = state.engine.has_swiped(swiper_id, target_id).await?;

    Ok(HttpResponse::Ok().json(SwipedResponse { swiped }))
}
