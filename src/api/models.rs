//! Request and response bodies for the served API

use serde::{Deserialize, Serialize};

use crate::aggregate::ResolvedTree;
use crate::expansion::NodeKey;
use crate::player::PlayerState;

/// Query parameters of `GET /api/getIndex`.
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    #[serde(rename = "indexId")]
    pub index_id: Option<String>,
}

/// Query parameters of `GET /api/getVideos`.
#[derive(Debug, Deserialize)]
pub struct VideosQuery {
    #[serde(rename = "indexId")]
    pub index_id: Option<String>,

    pub page: Option<u32>,

    #[serde(rename = "pageLimit")]
    pub page_limit: Option<u32>,
}

/// Query parameters of `GET /api/getVideo`.
#[derive(Debug, Deserialize)]
pub struct VideoQuery {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,

    #[serde(rename = "indexId")]
    pub index_id: Option<String>,
}

/// Query parameters of `GET /api/summarize`.
#[derive(Debug, Deserialize)]
pub struct SummarizeQuery {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// The curriculum view: the resolved tree plus the session status a client
/// needs to drive further loading and rendering.
#[derive(Debug, Serialize)]
pub struct CurriculumView {
    pub tree: ResolvedTree,
    pub video_count: usize,
    pub has_more: bool,
    pub is_loading: bool,
    pub player: PlayerState,
}

/// Response of `POST /api/curriculum/more`.
#[derive(Debug, Serialize)]
pub struct LoadMoreResponse {
    /// "appended", "already_loading", or "exhausted"
    pub outcome: &'static str,
    pub appended: usize,
    pub video_count: usize,
    pub has_more: bool,
}

/// Body of `POST /api/expansion/toggle`.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub key: NodeKey,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub expanded: bool,
}

/// Body of `POST /api/player/select`.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// Body of `POST /api/player/chapter`.
#[derive(Debug, Deserialize)]
pub struct ChapterRequest {
    #[serde(rename = "videoId")]
    pub video_id: String,

    pub start: f64,

    pub end: f64,
}

/// Body of `POST /api/player/progress`.
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    #[serde(rename = "playedSeconds")]
    pub played_seconds: f64,
}
