use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::client::{SummaryKind, SummarySource};

/// A named, timestamped sub-segment of a video with its own summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based, sequential
    pub chapter_number: u32,

    /// Start offset in seconds
    pub start: f64,

    /// End offset in seconds, greater than start
    pub end: f64,

    pub chapter_title: String,

    pub chapter_summary: String,
}

/// AI-generated text for one video: a one-line summary plus ordered chapters.
/// A video may have no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// Read-only mapping from video ID to its summary entry.
pub type SummaryMap = HashMap<String, SummaryEntry>;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("failed to read summary document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse summary document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load the static summary-map snapshot from a JSON document
/// `{[videoId]: {summary, chapters: [...]}}`.
pub async fn load_summary_map(path: &Path) -> Result<SummaryMap, SummaryError> {
    let content = tokio::fs::read_to_string(path).await?;
    let map: SummaryMap = serde_json::from_str(&content)?;
    debug!("📁 Loaded {} summary entries from {}", map.len(), path.display());
    Ok(map)
}

/// Build a summary map by fetching summary and chapters per video, in
/// sequence. Failures are isolated per item: a failed video is logged and
/// skipped, and the batch continues with the next one.
pub async fn build_summary_map<S: SummarySource>(source: &S, video_ids: &[String]) -> SummaryMap {
    let mut map = SummaryMap::new();

    for video_id in video_ids {
        let summary = match source.fetch_summary(video_id, SummaryKind::Summary).await {
            Ok(response) => response.summary.unwrap_or_default(),
            Err(e) => {
                warn!("Skipping summary for video {}: {}", video_id, e);
                continue;
            }
        };

        // A failed chapter fetch degrades to a summary-only entry.
        let chapters = match source.fetch_summary(video_id, SummaryKind::Chapter).await {
            Ok(response) => response.chapters,
            Err(e) => {
                warn!("No chapters for video {}: {}", video_id, e);
                Vec::new()
            }
        };

        map.insert(video_id.clone(), SummaryEntry { summary, chapters });
    }

    debug!("Built summary map with {} of {} videos", map.len(), video_ids.len());
    map
}
