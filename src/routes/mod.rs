// Route exports
pub mod matches;
pub mod swipes;

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};

use crate::config::MatchingSettings;
use crate::core::{MatchingEngine, MatchingError};
use crate::models::{ErrorResponse, HealthResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: MatchingEngine,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(swipes::configure)
            .configure(matches::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = if state.engine.health_check().await {
        "healthy"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

impl ResponseError for MatchingError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchingError::UserNotFound(_) => StatusCode::NOT_FOUND,
            MatchingError::InvalidOperation(_) => StatusCode::BAD_REQUEST,
            MatchingError::DuplicateSwipe { .. } => StatusCode::CONFLICT,
            MatchingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            MatchingError::Storage(e) => {
                tracing::error!("Storage failure: {}", e);
                "An internal error occurred".to_string()
            }
            other => {
                tracing::info!("Request rejected: {}", other);
                other.to_string()
            }
        };

        HttpResponse::build(status).json(ErrorResponse::new(self.code(), message, status.as_u16()))
    }
}

/// 400 response for request bodies that fail validation
pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "VALIDATION_ERROR",
        format!("Invalid request data: {}", errors),
        400,
    ))
}
