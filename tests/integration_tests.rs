//! End-to-end session flow over the public API, with a mock video source
//! standing in for the hosted index.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use video_curriculum::client::{
    ClientError, PageInfo, SystemMetadata, Video, VideoSource, VideosResponse,
};
use video_curriculum::curriculum::CurriculumDoc;
use video_curriculum::expansion::NodeKey;
use video_curriculum::library::LibrarySession;
use video_curriculum::pager::{LoadOutcome, VideoPager};
use video_curriculum::player::{PlayerCommand, PlayerState};
use video_curriculum::summaries::{SummaryEntry, SummaryMap};

fn video(id: &str, filename: &str) -> Video {
    Video {
        id: id.to_string(),
        created_at: None,
        indexed_at: None,
        system_metadata: SystemMetadata {
            filename: Some(filename.to_string()),
            duration: 60.0,
            ..SystemMetadata::default()
        },
    }
}

/// Three fixed pages of three videos each, with a fetch counter.
struct FixtureIndex {
    calls: AtomicUsize,
}

const PAGES: [[&str; 3]; 3] = [
    ["v1", "v2", "v3"],
    ["v4", "v5", "v6"],
    ["v7", "v8", "v9"],
];

#[async_trait]
impl VideoSource for FixtureIndex {
    async fn fetch_page(
        &self,
        _index_id: &str,
        page: u32,
        _page_limit: u32,
    ) -> Result<VideosResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let ids = PAGES[(page - 1) as usize];
        Ok(VideosResponse {
            data: ids
                .iter()
                .map(|id| video(id, &format!("{}.mp4", id)))
                .collect(),
            page_info: PageInfo {
                limit_per_page: 3,
                page,
                total_duration: None,
                total_page: 3,
                total_results: 9,
            },
        })
    }
}

fn curriculum() -> CurriculumDoc {
    CurriculumDoc::from_str(
        r#"{
            "title": "Editing 101",
            "sections": [
                {
                    "id": 1,
                    "title": "Basics",
                    "description": "Getting started",
                    "videos": ["v1", "v4", "v9"],
                    "sections": [
                        {"id": 2, "title": "Timeline", "videos": ["v5", "v7"]}
                    ]
                },
                {"id": 3, "title": "Color", "videos": ["v8", "missing"]}
            ]
        }"#,
    )
    .unwrap()
}

fn summaries() -> SummaryMap {
    let mut map = SummaryMap::new();
    map.insert(
        "v4".to_string(),
        SummaryEntry {
            summary: "Rough cuts and trims.".to_string(),
            chapters: Vec::new(),
        },
    );
    map
}

fn new_session() -> (Arc<LibrarySession<Arc<FixtureIndex>>>, Arc<FixtureIndex>) {
    let index = Arc::new(FixtureIndex {
        calls: AtomicUsize::new(0),
    });
    let pager = VideoPager::new(index.clone(), "idx", 3);
    let session = Arc::new(LibrarySession::new(pager, curriculum(), summaries()));
    (session, index)
}

#[tokio::test]
async fn curriculum_fills_in_monotonically_as_pages_load() {
    let (session, _) = new_session();

    // Nothing fetched yet: counts are already final, lists are empty.
    let tree = session.resolved_tree().await;
    assert_eq!(tree.sections[0].video_count, 3);
    assert!(tree.sections[0].videos.is_empty());

    session.load_more().await.unwrap();
    let tree = session.resolved_tree().await;
    let basics: Vec<&str> = tree.sections[0].videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(basics, vec!["v1"]);

    session.load_more().await.unwrap();
    let tree = session.resolved_tree().await;
    let basics: Vec<&str> = tree.sections[0].videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(basics, vec!["v1", "v4"]);
    assert_eq!(tree.sections[0].sections[0].videos[0].id, "v5");
    assert_eq!(
        tree.sections[0].videos[1].summary.as_deref(),
        Some("Rough cuts and trims.")
    );

    session.load_more().await.unwrap();
    let tree = session.resolved_tree().await;
    assert_eq!(tree.sections[0].videos.len(), 3);
    assert_eq!(tree.sections[0].sections[0].videos.len(), 2);

    // "missing" is referenced but never indexed: counted, never resolved.
    assert_eq!(tree.sections[1].video_count, 2);
    assert_eq!(tree.sections[1].videos.len(), 1);
    assert_eq!(tree.sections[1].videos[0].title, "v8");
}

#[tokio::test]
async fn load_more_terminates_and_stays_terminated() {
    let (session, index) = new_session();

    for _ in 0..3 {
        assert!(matches!(
            session.load_more().await.unwrap(),
            LoadOutcome::Appended(3)
        ));
    }
    assert!(!session.has_more().await);
    assert_eq!(session.load_more().await.unwrap(), LoadOutcome::Exhausted);
    assert_eq!(session.load_more().await.unwrap(), LoadOutcome::Exhausted);

    assert_eq!(index.calls.load(Ordering::SeqCst), 3);
    assert_eq!(session.video_count().await, 9);
}

#[tokio::test]
async fn expansion_state_is_independent_and_persistent() {
    let (session, _) = new_session();
    let section = NodeKey::Section(1);
    let nested = NodeKey::Section(2);
    let video_row = NodeKey::Video("v5".to_string());

    session.toggle_expanded(section.clone()).await;
    session.toggle_expanded(nested.clone()).await;
    session.toggle_expanded(video_row.clone()).await;

    // Collapse the top section; descendants keep their state.
    session.toggle_expanded(section.clone()).await;
    assert!(!session.is_expanded(&section).await);
    assert!(session.is_expanded(&nested).await);
    assert!(session.is_expanded(&video_row).await);

    session.toggle_expanded(section.clone()).await;
    assert!(session.is_expanded(&section).await);
    assert!(session.is_expanded(&video_row).await);
}

#[tokio::test]
async fn one_player_at_a_time_with_chapter_bounds() {
    let (session, _) = new_session();

    session.select_player("v1".to_string()).await;
    session.select_player("v2".to_string()).await;
    assert_eq!(
        session.player_state().await,
        PlayerState::Active {
            id: "v2".to_string(),
            window: None,
        }
    );

    session.select_chapter("v1".to_string(), 10.0, 20.0).await;
    assert_eq!(session.report_progress(12.0).await, None);
    assert_eq!(
        session.report_progress(20.0).await,
        Some(PlayerCommand::SeekAndPause { to: 10.0 })
    );

    session.clear_player().await;
    assert_eq!(session.player_state().await, PlayerState::Idle);
}
