//! API request handlers
//!
//! Proxy handlers forward to the video directory client with the API key
//! attached upstream; session handlers operate on the library session.
//! Missing or unrecognized required parameters surface as
//! `ClientError::MissingParameter` / `ClientError::InvalidParameter`, which
//! the server maps to a 400.

use crate::client::{
    ClientError, DirectoryClient, IndexDetails, SummarizeResponse, SummaryKind, VideoDetails,
    VideosResponse,
};
use crate::pager::LoadOutcome;
use crate::player::{PlayerCommand, PlayerState};

use super::models::{CurriculumView, LoadMoreResponse, ToggleResponse};
use super::AppSession;

/// Handle health check requests
pub fn health_check() -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "service": "video-curriculum",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })
}

fn require<'a>(
    value: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, ClientError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ClientError::MissingParameter(name)),
    }
}

/// Handle `getIndex` requests: narrowed index metadata.
pub async fn get_index(
    client: &DirectoryClient,
    index_id: &Option<String>,
) -> Result<IndexDetails, ClientError> {
    let index_id = require(index_id, "indexId")?;
    client.index_details(index_id).await
}

/// Handle `getVideos` requests: one page of videos, page defaulting to 1.
pub async fn get_videos(
    client: &DirectoryClient,
    index_id: &Option<String>,
    page: Option<u32>,
    page_limit: Option<u32>,
) -> Result<VideosResponse, ClientError> {
    let index_id = require(index_id, "indexId")?;
    let page = page.unwrap_or(1);
    let page_limit = page_limit.unwrap_or(9);
    client.video_page(index_id, page, page_limit).await
}

/// Handle `getVideo` requests: narrowed detail for one video.
pub async fn get_video(
    client: &DirectoryClient,
    video_id: &Option<String>,
    index_id: &Option<String>,
) -> Result<VideoDetails, ClientError> {
    let index_id = require(index_id, "indexId")?;
    let video_id = require(video_id, "videoId")?;
    client.video_details(video_id, index_id).await
}

/// Handle `summarize` requests for a one-line summary or a chapter list.
pub async fn summarize(
    client: &DirectoryClient,
    video_id: &Option<String>,
    kind: &Option<String>,
) -> Result<SummarizeResponse, ClientError> {
    let video_id = require(video_id, "videoId")?;
    let kind = SummaryKind::parse(require(kind, "type")?)
        .ok_or(ClientError::InvalidParameter("type", "summary or chapter"))?;
    client.summarize(video_id, kind).await
}

/// Handle curriculum view requests: the resolved tree plus session status.
pub async fn curriculum_view(session: &AppSession) -> CurriculumView {
    CurriculumView {
        tree: session.resolved_tree().await,
        video_count: session.video_count().await,
        has_more: session.has_more().await,
        is_loading: session.is_loading(),
        player: session.player_state().await,
    }
}

/// Handle load-more requests, the server-side proximity signal.
pub async fn load_more(session: &AppSession) -> Result<LoadMoreResponse, ClientError> {
    let outcome = session.load_more().await?;
    let (label, appended) = match outcome {
        LoadOutcome::Appended(count) => ("appended", count),
        LoadOutcome::AlreadyLoading => ("already_loading", 0),
        LoadOutcome::Exhausted => ("exhausted", 0),
    };
    Ok(LoadMoreResponse {
        outcome: label,
        appended,
        video_count: session.video_count().await,
        has_more: session.has_more().await,
    })
}

/// Handle expansion toggles.
pub async fn toggle_expansion(
    session: &AppSession,
    key: crate::expansion::NodeKey,
) -> ToggleResponse {
    ToggleResponse {
        expanded: session.toggle_expanded(key).await,
    }
}

/// Handle player selection: unbounded playback of one video.
pub async fn select_player(session: &AppSession, video_id: String) -> PlayerState {
    session.select_player(video_id).await;
    session.player_state().await
}

/// Handle chapter selection: bounded playback of one video.
pub async fn select_chapter(
    session: &AppSession,
    video_id: String,
    start: f64,
    end: f64,
) -> PlayerState {
    session.select_chapter(video_id, start, end).await;
    session.player_state().await
}

/// Handle a playback progress report from the widget.
pub async fn report_progress(session: &AppSession, played_seconds: f64) -> Option<PlayerCommand> {
    session.report_progress(played_seconds).await
}
