use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;
use crate::core::{Catalog, SyncError};
use crate::models::{
    CatalogResponse, ErrorResponse, FocusRequest, HealthResponse, LocateRequest, QueryRequest,
    RadiusRequest, RegionChip, RegionRequest, SessionResponse, SuggestionsQuery, SuggestionsResponse,
};
use crate::services::{IpGeolocationClient, ReportedLocation, Session, SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<SessionStore>,
    /// Fallback position source for browsers without geolocation
    pub ip_lookup: Option<Arc<IpGeolocationClient>>,
}

/// Configure all discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/catalog", web::get().to(get_catalog))
        .route("/catalog/suggestions", web::get().to(get_suggestions))
        .route("/hotels/{hotel_id}", web::get().to(get_hotel))
        .route("/sessions", web::post().to(create_session))
        .route("/sessions/{session_id}", web::get().to(get_session))
        .route("/sessions/{session_id}", web::delete().to(end_session))
        .route("/sessions/{session_id}/query", web::post().to(set_query))
        .route("/sessions/{session_id}/search", web::post().to(submit_search))
        .route("/sessions/{session_id}/focus", web::post().to(request_focus))
        .route("/sessions/{session_id}/region", web::post().to(toggle_region))
        .route("/sessions/{session_id}/radius", web::post().to(set_radius))
        .route("/sessions/{session_id}/locate", web::post().to(use_current_location))
        .route("/sessions/{session_id}/locate", web::delete().to(clear_location))
        .route("/sessions/{session_id}/hotels/{hotel_id}/select", web::post().to(select_hotel))
        .route("/sessions/{session_id}/detail/close", web::post().to(close_detail));
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

async fn find_session(state: &AppState, session_id: Uuid) -> Result<Session, HttpResponse> {
    state
        .sessions
        .get(session_id)
        .await
        .map_err(|e| error_response(StatusCode::NOT_FOUND, "Session not found", e.to_string()))
}

/// Current view plus every notice raised since the last response
async fn session_view(session: &Session, status: StatusCode) -> HttpResponse {
    let view = session.sync.snapshot().await;
    HttpResponse::build(status).json(SessionResponse {
        session_id: session.id,
        view,
        notices: session.notices.drain(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        hotels: state.catalog.len(),
        active_sessions: state.sessions.active_sessions(),
        timestamp: chrono::Utc::now(),
    })
}

/// Full catalog with region chips
///
/// GET /api/v1/catalog
async fn get_catalog(state: web::Data<AppState>) -> impl Responder {
    let index = state.catalog.index();
    let regions = index
        .unique_regions()
        .iter()
        .map(|region| RegionChip {
            region: region.clone(),
            count: index.region_count(region),
        })
        .collect();

    HttpResponse::Ok().json(CatalogResponse {
        hotels: state.catalog.hotels().to_vec(),
        regions,
        total_results: state.catalog.len(),
    })
}

/// GET /api/v1/catalog/suggestions?q=...
async fn get_suggestions(state: web::Data<AppState>, query: web::Query<SuggestionsQuery>) -> impl Responder {
    HttpResponse::Ok().json(SuggestionsResponse {
        suggestions: state.catalog.index().suggestions(&query.q),
    })
}

async fn get_hotel(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let hotel_id = path.into_inner();
    match state.catalog.hotel(&hotel_id) {
        Some(hotel) => HttpResponse::Ok().json(hotel),
        None => error_response(StatusCode::NOT_FOUND, "Hotel not found", hotel_id),
    }
}

/// Start a discovery session
///
/// POST /api/v1/sessions
async fn create_session(state: web::Data<AppState>) -> impl Responder {
    let session = state.sessions.create().await;
    session_view(&session, StatusCode::CREATED).await
}

async fn get_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match find_session(&state, path.into_inner()).await {
        Ok(session) => session_view(&session, StatusCode::OK).await,
        Err(resp) => resp,
    }
}

async fn end_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session_id = path.into_inner();
    match find_session(&state, session_id).await {
        Ok(_) => {
            state.sessions.remove(session_id).await;
            HttpResponse::NoContent().finish()
        }
        Err(resp) => resp,
    }
}

/// Query-text change
///
/// POST /api/v1/sessions/{session_id}/query
///
/// Request body:
/// ```json
/// { "query": "string" }
/// ```
async fn set_query(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<QueryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    let session = match find_session(&state, path.into_inner()).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    session.sync.set_query(&req.query).await;
    session_view(&session, StatusCode::OK).await
}

/// Suggestion pick or search submit: query change plus map focus
async fn submit_search(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<QueryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    let session = match find_session(&state, path.into_inner()).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    session.sync.submit_search(&req.query).await;
    session_view(&session, StatusCode::OK).await
}

/// POST /api/v1/sessions/{session_id}/focus
///
/// Request body:
/// ```json
/// { "location": "string" }
/// ```
async fn request_focus(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<FocusRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    let session = match find_session(&state, path.into_inner()).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    session.sync.request_focus(&req.location).await;
    session_view(&session, StatusCode::OK).await
}

/// Region chip click
async fn toggle_region(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<RegionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    let session = match find_session(&state, path.into_inner()).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    match session.sync.toggle_region(&req.region).await {
        Ok(()) => session_view(&session, StatusCode::OK).await,
        Err(e) => error_response(StatusCode::BAD_REQUEST, "Unknown region", e.to_string()),
    }
}

async fn set_radius(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<RadiusRequest>,
) -> impl Responder {
    let session = match find_session(&state, path.into_inner()).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    session.sync.set_radius(req.radius_km).await;
    session_view(&session, StatusCode::OK).await
}

/// "Near me" click
///
/// POST /api/v1/sessions/{session_id}/locate
///
/// Request body (all fields optional):
/// ```json
/// { "latitude": 19.07, "longitude": 72.87, "error": "string" }
/// ```
///
/// Outcomes are reported through the response notices.
async fn use_current_location(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<LocateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    let session = match find_session(&state, path.into_inner()).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let reported = ReportedLocation::from(&*req);
    let outcome = match (&reported, &state.ip_lookup) {
        (ReportedLocation::Unsupported, Some(ip_lookup)) => {
            session.sync.use_current_location(ip_lookup.as_ref()).await
        }
        _ => session.sync.use_current_location(&reported).await,
    };

    if let Err(e) = outcome {
        tracing::debug!("Location request for {} did not apply: {}", session.id, e);
    }
    session_view(&session, StatusCode::OK).await
}

async fn clear_location(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session = match find_session(&state, path.into_inner()).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    session.sync.clear_location().await;
    session_view(&session, StatusCode::OK).await
}

/// Marker or list item click
async fn select_hotel(state: web::Data<AppState>, path: web::Path<(Uuid, String)>) -> impl Responder {
    let (session_id, hotel_id) = path.into_inner();
    let session = match find_session(&state, session_id).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    match session.sync.select_hotel(&hotel_id).await {
        Ok(()) => session_view(&session, StatusCode::OK).await,
        Err(e @ SyncError::UnknownHotel(_)) => {
            error_response(StatusCode::NOT_FOUND, "Hotel not found", e.to_string())
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, "Invalid selection", e.to_string()),
    }
}

async fn close_detail(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session = match find_session(&state, path.into_inner()).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    session.sync.close_detail().await;
    session_view(&session, StatusCode::OK).await
}
