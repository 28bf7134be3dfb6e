//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::client::{ClientError, DirectoryClient};

use super::models::{
    ChapterRequest, IndexQuery, ProgressRequest, SelectRequest, SummarizeQuery, ToggleRequest,
    VideoQuery, VideosQuery,
};
use super::{handlers, AppSession};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<DirectoryClient>,
    pub session: Arc<AppSession>,
}

/// Configure and start the HTTP server
pub async fn start_http_server(state: AppState, port: u16) -> Result<()> {
    info!("🚀 Starting HTTP server on port {}", port);

    // Configure CORS to allow browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Proxy endpoints, mirroring the upstream video-index API
        .route("/api/getIndex", get(get_index_handler))
        .route("/api/getVideos", get(get_videos_handler))
        .route("/api/getVideo", get(get_video_handler))
        .route("/api/summarize", get(summarize_handler))
        // Session view endpoints
        .route("/api/curriculum", get(curriculum_handler))
        .route("/api/curriculum/more", post(load_more_handler))
        .route("/api/expansion/toggle", post(toggle_expansion_handler))
        .route("/api/player/select", post(select_player_handler))
        .route("/api/player/chapter", post(select_chapter_handler))
        .route("/api/player/progress", post(progress_handler))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("🌐 API server listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Map a client error to the proxy contract: 400 for a missing or
/// unrecognized required parameter, 500 for upstream or transport failure,
/// body `{"error": ...}`.
fn error_response(e: &ClientError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match e {
        ClientError::MissingParameter(_) | ClientError::InvalidParameter(..) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": e.to_string() })))
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::health_check()))
}

/// Index details handler
async fn get_index_handler(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> impl IntoResponse {
    match handlers::get_index(&state.client, &query.index_id).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

/// Video page handler
async fn get_videos_handler(
    State(state): State<AppState>,
    Query(query): Query<VideosQuery>,
) -> impl IntoResponse {
    match handlers::get_videos(&state.client, &query.index_id, query.page, query.page_limit).await
    {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

/// Video detail handler
async fn get_video_handler(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> impl IntoResponse {
    match handlers::get_video(&state.client, &query.video_id, &query.index_id).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

/// Summarize handler
async fn summarize_handler(
    State(state): State<AppState>,
    Query(query): Query<SummarizeQuery>,
) -> impl IntoResponse {
    match handlers::summarize(&state.client, &query.video_id, &query.kind).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

/// Curriculum view handler
async fn curriculum_handler(State(state): State<AppState>) -> impl IntoResponse {
    let view = handlers::curriculum_view(&state.session).await;
    (StatusCode::OK, Json(view))
}

/// Load-more handler, the server-side proximity signal
async fn load_more_handler(State(state): State<AppState>) -> impl IntoResponse {
    match handlers::load_more(&state.session).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

/// Expansion toggle handler
async fn toggle_expansion_handler(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> impl IntoResponse {
    let response = handlers::toggle_expansion(&state.session, request.key).await;
    (StatusCode::OK, Json(response))
}

/// Player selection handler
async fn select_player_handler(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> impl IntoResponse {
    let player = handlers::select_player(&state.session, request.video_id).await;
    (StatusCode::OK, Json(player))
}

/// Chapter selection handler
async fn select_chapter_handler(
    State(state): State<AppState>,
    Json(request): Json<ChapterRequest>,
) -> impl IntoResponse {
    let player =
        handlers::select_chapter(&state.session, request.video_id, request.start, request.end)
            .await;
    (StatusCode::OK, Json(player))
}

/// Playback progress handler
async fn progress_handler(
    State(state): State<AppState>,
    Json(request): Json<ProgressRequest>,
) -> impl IntoResponse {
    // null when playback is unbounded or the window end was not reached
    let command = handlers::report_progress(&state.session, request.played_seconds).await;
    (StatusCode::OK, Json(command))
}
