use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::time::{timeout, Duration};
use tracing::info;

use crate::config::ApiConfig;
use crate::summaries::Chapter;

/// Errors surfaced by the video directory client.
///
/// `MissingParameter` and `InvalidParameter` map to a 400 at the served API
/// boundary; everything else is an upstream/transport failure and maps to
/// a 500.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0} is required")]
    MissingParameter(&'static str),

    #[error("{0} must be {1}")]
    InvalidParameter(&'static str, &'static str),

    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream request timed out after {0}s")]
    Timeout(u64),
}

/// A single video as reported by the video-index API.
///
/// The identity is the opaque `_id` string; everything under
/// `system_metadata` is pass-through and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<String>,

    #[serde(default)]
    pub system_metadata: SystemMetadata,
}

/// Technical metadata attached to a video by the index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemMetadata {
    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub fps: Option<f64>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    #[serde(default)]
    pub size: Option<u64>,

    #[serde(default)]
    pub video_title: Option<String>,
}

/// Page bookkeeping returned alongside each page of videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub limit_per_page: u32,

    /// 1-based page number of this page.
    pub page: u32,

    #[serde(default)]
    pub total_duration: Option<f64>,

    pub total_page: u32,

    pub total_results: u32,
}

/// One fetched page: an ordered run of videos plus its page info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideosResponse {
    pub data: Vec<Video>,
    pub page_info: PageInfo,
}

/// Narrowed projection of an index, as served by `getIndex`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDetails {
    pub index_name: String,
    pub video_count: u64,
    pub total_duration: f64,
}

/// HLS playback info for a single video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HlsInfo {
    #[serde(default)]
    pub video_url: Option<String>,

    #[serde(default)]
    pub thumbnail_urls: Vec<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Narrowed projection of a single video's detail, as served by `getVideo`.
/// `source` and `embedding` are opaque pass-through payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDetails {
    #[serde(default)]
    pub hls: Option<HlsInfo>,

    #[serde(default)]
    pub system_metadata: Option<SystemMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<serde_json::Value>,
}

/// Kind of AI-generated text requested from the summarize endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Summary,
    Chapter,
}

impl SummaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKind::Summary => "summary",
            SummaryKind::Chapter => "chapter",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "summary" => Some(SummaryKind::Summary),
            "chapter" => Some(SummaryKind::Chapter),
            _ => None,
        }
    }
}

/// Response from the summarize endpoint. The upstream fills `summary` for
/// the summary kind and `chapters` for the chapter kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chapters: Vec<Chapter>,
}

/// The page-fetch seam of the pagination accumulator. Implemented by
/// `DirectoryClient` for production and by mocks in tests.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn fetch_page(
        &self,
        index_id: &str,
        page: u32,
        page_limit: u32,
    ) -> Result<VideosResponse, ClientError>;
}

#[async_trait]
impl<T: VideoSource + ?Sized> VideoSource for Arc<T> {
    async fn fetch_page(
        &self,
        index_id: &str,
        page: u32,
        page_limit: u32,
    ) -> Result<VideosResponse, ClientError> {
        (**self).fetch_page(index_id, page, page_limit).await
    }
}

/// The per-video summary seam, mirroring `VideoSource` for the batch
/// summary-map builder.
#[async_trait]
pub trait SummarySource: Send + Sync {
    async fn fetch_summary(
        &self,
        video_id: &str,
        kind: SummaryKind,
    ) -> Result<SummarizeResponse, ClientError>;
}

#[async_trait]
impl<T: SummarySource + ?Sized> SummarySource for Arc<T> {
    async fn fetch_summary(
        &self,
        video_id: &str,
        kind: SummaryKind,
    ) -> Result<SummarizeResponse, ClientError> {
        (**self).fetch_summary(video_id, kind).await
    }
}

/// Stateless typed client for the hosted video-index API. Attaches the API
/// key on every request; owns no state beyond the connection pool.
pub struct DirectoryClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl DirectoryClient {
    pub fn new(config: ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { config, client }
    }

    /// Fetch index-level metadata (name, video count, total duration).
    pub async fn index_details(&self, index_id: &str) -> Result<IndexDetails, ClientError> {
        if index_id.is_empty() {
            return Err(ClientError::MissingParameter("indexId"));
        }

        let url = format!("{}/indexes/{}", self.config.base_url, index_id);
        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;

        let details = Self::check(response).await?.json().await?;
        Ok(details)
    }

    /// Fetch one page of videos from an index. Pages are 1-based.
    pub async fn video_page(
        &self,
        index_id: &str,
        page: u32,
        page_limit: u32,
    ) -> Result<VideosResponse, ClientError> {
        if index_id.is_empty() {
            return Err(ClientError::MissingParameter("indexId"));
        }

        let url = format!(
            "{}/indexes/{}/videos?page={}&page_limit={}",
            self.config.base_url, index_id, page, page_limit
        );
        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;

        let page = Self::check(response).await?.json().await?;
        Ok(page)
    }

    /// Fetch detail (HLS playback info, metadata) for a single video.
    pub async fn video_details(
        &self,
        video_id: &str,
        index_id: &str,
    ) -> Result<VideoDetails, ClientError> {
        if index_id.is_empty() {
            return Err(ClientError::MissingParameter("indexId"));
        }
        if video_id.is_empty() {
            return Err(ClientError::MissingParameter("videoId"));
        }

        let url = format!(
            "{}/indexes/{}/videos/{}",
            self.config.base_url, index_id, video_id
        );
        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;

        let details = Self::check(response).await?.json().await?;
        Ok(details)
    }

    /// Request a one-line summary or a chapter list for a video.
    ///
    /// Summarization is the slow call of the upstream API, so it gets its
    /// own budget separate from the client-wide request timeout.
    pub async fn summarize(
        &self,
        video_id: &str,
        kind: SummaryKind,
    ) -> Result<SummarizeResponse, ClientError> {
        if video_id.is_empty() {
            return Err(ClientError::MissingParameter("videoId"));
        }

        let url = format!("{}/summarize", self.config.base_url);
        let body = serde_json::json!({
            "type": kind.as_str(),
            "video_id": video_id,
            "prompt": "Provide one line summary.",
        });

        let budget = self.config.summarize_timeout_seconds;
        let response = timeout(
            Duration::from_secs(budget),
            self.client
                .post(&url)
                .header("x-api-key", &self.config.api_key)
                .json(&body)
                .send(),
        )
        .await
        .map_err(|_| ClientError::Timeout(budget))??;

        let summary: SummarizeResponse = Self::check(response).await?.json().await?;
        info!(
            "✅ Summarize ({}) completed for video {}",
            kind.as_str(),
            video_id
        );
        Ok(summary)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl VideoSource for DirectoryClient {
    async fn fetch_page(
        &self,
        index_id: &str,
        page: u32,
        page_limit: u32,
    ) -> Result<VideosResponse, ClientError> {
        self.video_page(index_id, page, page_limit).await
    }
}

#[async_trait]
impl SummarySource for DirectoryClient {
    async fn fetch_summary(
        &self,
        video_id: &str,
        kind: SummaryKind,
    ) -> Result<SummarizeResponse, ClientError> {
        self.summarize(video_id, kind).await
    }
}
