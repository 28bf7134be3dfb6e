use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::client::{ClientError, Video, VideoSource};

/// Result of one `load_next_page` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and its videos appended.
    Appended(usize),

    /// Another load was already in flight; nothing was done.
    AlreadyLoading,

    /// The last page has already been fetched; nothing was done.
    Exhausted,
}

/// Accumulates sequential pages of videos into one growing ordered
/// collection.
///
/// Pages are requested strictly in increasing order starting at 1. The
/// loading flag is claimed before the fetch suspends, so every proximity
/// signal (scroll listener, intersection observer) can route through
/// `load_next_page` without firing duplicate requests. Cheap to clone; all
/// clones share the same accumulated state.
pub struct VideoPager<S> {
    inner: Arc<PagerInner<S>>,
}

impl<S> Clone for VideoPager<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct PagerInner<S> {
    source: S,
    index_id: String,
    page_limit: u32,
    loading: AtomicBool,
    state: RwLock<PagerState>,
}

#[derive(Debug)]
struct PagerState {
    videos: Vec<Video>,
    next_page: u32,
    total_pages: Option<u32>,
    last_error: Option<String>,
}

impl<S: VideoSource> VideoPager<S> {
    pub fn new(source: S, index_id: impl Into<String>, page_limit: u32) -> Self {
        Self {
            inner: Arc::new(PagerInner {
                source,
                index_id: index_id.into(),
                page_limit,
                loading: AtomicBool::new(false),
                state: RwLock::new(PagerState {
                    videos: Vec::new(),
                    next_page: 1,
                    total_pages: None,
                    last_error: None,
                }),
            }),
        }
    }

    /// Fetch the next sequential page and append its videos.
    ///
    /// No-op when a load is already in flight or when the reported total
    /// page count has been reached. On failure the accumulated collection is
    /// left unchanged, the error is recorded, and the loading flag resets so
    /// the same page can be retried.
    pub async fn load_next_page(&self) -> Result<LoadOutcome, ClientError> {
        if !self.has_more().await {
            return Ok(LoadOutcome::Exhausted);
        }

        if self
            .inner
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(LoadOutcome::AlreadyLoading);
        }

        let page = self.inner.state.read().await.next_page;
        let result = self
            .inner
            .source
            .fetch_page(&self.inner.index_id, page, self.inner.page_limit)
            .await;

        let outcome = match result {
            Ok(response) => {
                let mut state = self.inner.state.write().await;
                let appended = response.data.len();
                state.videos.extend(response.data);
                state.total_pages = Some(response.page_info.total_page);
                state.next_page = page + 1;
                state.last_error = None;
                debug!(
                    "📄 Appended page {} ({} videos, {} total)",
                    page,
                    appended,
                    state.videos.len()
                );
                Ok(LoadOutcome::Appended(appended))
            }
            Err(e) => {
                let mut state = self.inner.state.write().await;
                state.last_error = Some(e.to_string());
                warn!("Fetch of page {} failed: {}", page, e);
                Err(e)
            }
        };

        self.inner.loading.store(false, Ordering::Release);
        outcome
    }

    /// Whether pages remain to be fetched. Starts true; becomes false once
    /// the last fetched page number equals the reported total page count.
    pub async fn has_more(&self) -> bool {
        let state = self.inner.state.read().await;
        state
            .total_pages
            .map_or(true, |total| state.next_page <= total)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Acquire)
    }

    /// Snapshot of the accumulated videos, in arrival order.
    pub async fn videos(&self) -> Vec<Video> {
        self.inner.state.read().await.videos.clone()
    }

    pub async fn video_count(&self) -> usize {
        self.inner.state.read().await.videos.len()
    }

    /// Error recorded by the most recent failed fetch, cleared by the next
    /// successful one.
    pub async fn last_error(&self) -> Option<String> {
        self.inner.state.read().await.last_error.clone()
    }
}
