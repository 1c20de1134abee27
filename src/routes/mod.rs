// Route exports
pub mod matches;
pub mod sessions;

use actix_web::{http::StatusCode, web, HttpResponse};
use std::sync::Arc;
use crate::config::MatchingSettings;
use crate::core::MatchingEngine;
use crate::dialogue::ProfileCollector;
use crate::models::ErrorResponse;
use crate::services::{SessionError, SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchingEngine>,
    pub collector: ProfileCollector,
    pub sessions: SessionStore,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(sessions::configure),
    );
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

impl From<SessionError> for HttpResponse {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "Session not found", err.to_string())
            }
            SessionError::IncompleteProfile(_) => {
                error_response(StatusCode::CONFLICT, "Profile incomplete", err.to_string())
            }
        }
    }
}
