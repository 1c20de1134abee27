use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::average_max_amount;
use crate::models::{
    FindMatchesRequest, FindMatchesResponse, HealthResponse, ProgramSearchQuery, ProgramSearchResponse,
};
use super::{error_response, validation_failed, AppState};

/// Configure catalog and stateless matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/programs", web::get().to(search_programs))
        .route("/programs/{id}", web::get().to(get_program));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        programs: state.engine.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches for a caller-supplied profile
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "profile": {
///     "stage": "initial",
///     "sector": "manufacturing",
///     "supportNeeds": "funding",
///     "description": "스포츠 용품 제조 창업",
///     "desiredSupportScale": 50
///   },
///   "topN": 5
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {}", errors);
        return validation_failed(errors);
    }

    let top_n = state.matching.effective_top_n(req.top_n);
    let matches = state.engine.find_matches(&req.profile, top_n);

    tracing::info!(
        "Returning {} matches (top_n {}, {} programs)",
        matches.len(),
        top_n,
        state.engine.len()
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches,
        total_programs: state.engine.len(),
    })
}

/// Browse the catalog by support area and per-applicant amount
///
/// GET /api/v1/programs?realm=창업&minAmount=10000000&maxAmount=100000000
async fn search_programs(
    state: web::Data<AppState>,
    query: web::Query<ProgramSearchQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }
    if query.has_inverted_range() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            "minAmount must not exceed maxAmount".to_string(),
        );
    }

    let programs = state
        .engine
        .filter_programs(query.realm(), query.min_amount, query.max_amount);
    let average = average_max_amount(&programs);

    tracing::debug!("Program search {:?} matched {}", query.realm(), programs.len());

    HttpResponse::Ok().json(ProgramSearchResponse {
        count: programs.len(),
        average_max_amount: average,
        programs: programs.into_iter().cloned().collect(),
    })
}

/// Catalog record behind a match
///
/// GET /api/v1/programs/{id}
async fn get_program(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.engine.program(&id) {
        Some(program) => HttpResponse::Ok().json(program),
        None => error_response(
            StatusCode::NOT_FOUND,
            "Program not found",
            format!("No program with id {}", id),
        ),
    }
}
