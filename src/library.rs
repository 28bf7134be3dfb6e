use tokio::sync::RwLock;
use tracing::debug;

use crate::aggregate::{resolve, ResolvedTree};
use crate::client::{ClientError, VideoSource};
use crate::curriculum::CurriculumDoc;
use crate::expansion::{ExpansionSet, NodeKey};
use crate::pager::{LoadOutcome, VideoPager};
use crate::player::{PlayerCommand, PlayerCoordinator, PlayerState};
use crate::summaries::SummaryMap;

/// Session-scoped controller tying the core together: the pagination
/// accumulator, the immutable curriculum, the summary map, the expansion
/// set, and the single-player coordinator.
///
/// The coordinator and the expansion set are owned here and shared by
/// injection (the server holds this session behind an `Arc`); nothing in
/// the crate reaches them through module-level state. Everything is
/// recomputed per session; a full reload starts from scratch.
pub struct LibrarySession<S> {
    pager: VideoPager<S>,
    curriculum: CurriculumDoc,
    summaries: RwLock<SummaryMap>,
    expansion: RwLock<ExpansionSet>,
    player: RwLock<PlayerCoordinator>,
}

impl<S: VideoSource> LibrarySession<S> {
    pub fn new(pager: VideoPager<S>, curriculum: CurriculumDoc, summaries: SummaryMap) -> Self {
        Self {
            pager,
            curriculum,
            summaries: RwLock::new(summaries),
            expansion: RwLock::new(ExpansionSet::new()),
            player: RwLock::new(PlayerCoordinator::new()),
        }
    }

    pub fn curriculum(&self) -> &CurriculumDoc {
        &self.curriculum
    }

    /// Join the curriculum against whatever has been fetched so far.
    pub async fn resolved_tree(&self) -> ResolvedTree {
        let videos = self.pager.videos().await;
        let summaries = self.summaries.read().await;
        resolve(&self.curriculum, &videos, &summaries)
    }

    /// The one guarded entry point for proximity signals. Scroll and
    /// intersection events both land here; overlapping calls collapse into
    /// a single page fetch.
    pub async fn load_more(&self) -> Result<LoadOutcome, ClientError> {
        let outcome = self.pager.load_next_page().await?;
        if let LoadOutcome::Appended(count) = outcome {
            debug!("📺 Library grew by {} videos", count);
        }
        Ok(outcome)
    }

    pub async fn has_more(&self) -> bool {
        self.pager.has_more().await
    }

    pub fn is_loading(&self) -> bool {
        self.pager.is_loading()
    }

    pub async fn video_count(&self) -> usize {
        self.pager.video_count().await
    }

    pub async fn last_error(&self) -> Option<String> {
        self.pager.last_error().await
    }

    /// Merge incrementally fetched summary entries into the session map.
    /// Existing entries for the same video are replaced.
    pub async fn extend_summaries(&self, entries: SummaryMap) {
        self.summaries.write().await.extend(entries);
    }

    pub async fn toggle_expanded(&self, key: NodeKey) -> bool {
        self.expansion.write().await.toggle(key)
    }

    pub async fn is_expanded(&self, key: &NodeKey) -> bool {
        self.expansion.read().await.is_expanded(key)
    }

    pub async fn select_player(&self, video_id: String) {
        self.player.write().await.select(video_id);
    }

    pub async fn select_chapter(&self, video_id: String, start: f64, end: f64) {
        self.player.write().await.select_chapter(video_id, start, end);
    }

    pub async fn clear_player(&self) {
        self.player.write().await.clear();
    }

    pub async fn player_state(&self) -> PlayerState {
        self.player.read().await.state().clone()
    }

    pub async fn report_progress(&self, played_seconds: f64) -> Option<PlayerCommand> {
        self.player.read().await.on_progress(played_seconds)
    }
}
