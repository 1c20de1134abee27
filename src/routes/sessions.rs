use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;
use crate::dialogue::{collect_turn, DialogueContext};
use crate::models::{FindMatchesResponse, MessageRequest, SessionMatchesRequest, TurnResponse};
use crate::services::SessionError;
use super::{validation_failed, AppState};

/// Configure conversation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/sessions", web::post().to(create_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}", web::delete().to(delete_session))
        .route("/sessions/{id}/messages", web::post().to(post_message))
        .route("/sessions/{id}/reset", web::post().to(reset_session))
        .route("/sessions/{id}/matches", web::post().to(session_matches));
}

/// Start a conversation
///
/// POST /api/v1/sessions
async fn create_session(state: web::Data<AppState>) -> impl Responder {
    let mut context = DialogueContext::new();
    let reply = state.collector.greet(&mut context);
    let profile = context.profile.clone();
    let conversation_state = context.state;

    let (session_id, _) = state.sessions.create(context).await;
    tracing::info!("Started conversation {}", session_id);

    HttpResponse::Created().json(TurnResponse {
        session_id,
        reply,
        state: conversation_state,
        profile,
        is_complete: false,
    })
}

/// Conversation summary
///
/// GET /api/v1/sessions/{id}
async fn get_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let shared = match state.sessions.get(path.into_inner()).await {
        Ok(shared) => shared,
        Err(e) => return e.into(),
    };

    let context = shared.lock().await;
    HttpResponse::Ok().json(state.collector.summary(&context))
}

/// Submit one user utterance
///
/// POST /api/v1/sessions/{id}/messages
///
/// Request body:
/// ```json
/// { "text": "스포츠 용품 제조 창업을 준비하고 있어요" }
/// ```
async fn post_message(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<MessageRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let session_id = path.into_inner();
    let shared = match state.sessions.get(session_id).await {
        Ok(shared) => shared,
        Err(e) => return e.into(),
    };

    let mut context = shared.lock().await;
    let outcome = collect_turn(&state.collector, &mut context, &req.text);

    tracing::debug!("Session {} now in state {}", session_id, outcome.state);

    HttpResponse::Ok().json(TurnResponse {
        session_id,
        reply: outcome.reply,
        state: outcome.state,
        profile: context.profile.clone(),
        is_complete: outcome.is_complete,
    })
}

/// Start the conversation over within the same session
///
/// POST /api/v1/sessions/{id}/reset
async fn reset_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let session_id = path.into_inner();
    let shared = match state.sessions.get(session_id).await {
        Ok(shared) => shared,
        Err(e) => return e.into(),
    };

    let mut context = shared.lock().await;
    let reply = state.collector.reset(&mut context);

    HttpResponse::Ok().json(TurnResponse {
        session_id,
        reply,
        state: context.state,
        profile: context.profile.clone(),
        is_complete: false,
    })
}

/// End a conversation
///
/// DELETE /api/v1/sessions/{id}
async fn delete_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.sessions.remove(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.into(),
    }
}

/// Match the profile collected so far
///
/// POST /api/v1/sessions/{id}/matches
///
/// Request body (both fields optional, send `{}` for defaults):
/// ```json
/// { "topN": 5, "desiredSupportScale": 50 }
/// ```
///
/// Responds 409 until every mandatory slot is filled.
async fn session_matches(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SessionMatchesRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let session_id = path.into_inner();
    let shared = match state.sessions.get(session_id).await {
        Ok(shared) => shared,
        Err(e) => return e.into(),
    };

    // Snapshot the profile so scoring runs without holding the session lock
    let mut profile = {
        let context = shared.lock().await;
        if !state.collector.is_complete(&context) {
            return SessionError::IncompleteProfile(state.collector.missing_fields(&context)).into();
        }
        context.profile.clone()
    };

    if req.desired_support_scale.is_some() {
        profile.desired_support_scale = req.desired_support_scale;
    }

    let top_n = state.matching.effective_top_n(req.top_n);
    let matches = state.engine.find_matches(&profile, top_n);

    tracing::info!("Returning {} matches for session {}", matches.len(), session_id);

    HttpResponse::Ok().json(FindMatchesResponse {
        matches,
        total_programs: state.engine.len(),
    })
}
