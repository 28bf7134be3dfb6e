use serde::Serialize;
use std::collections::HashMap;

use crate::client::Video;
use crate::curriculum::{CurriculumDoc, CurriculumNode};
use crate::summaries::{Chapter, SummaryMap};

/// The curriculum outline joined against the currently accumulated videos.
/// Recomputed whenever the accumulated collection or the summary map
/// changes; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTree {
    pub title: String,
    pub sections: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedNode {
    pub id: u32,
    pub title: String,
    pub description: String,

    /// Count of referenced video IDs, resolved or not, so the displayed
    /// number stays stable while pagination is still in progress.
    pub video_count: usize,

    /// Only the references whose video has already been fetched.
    pub videos: Vec<ResolvedVideo>,

    pub sections: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedVideo {
    pub id: String,
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chapters: Vec<Chapter>,
}

/// Join the curriculum tree against the accumulated video collection and
/// the summary map.
///
/// Pure: identical inputs produce identical output. References whose video
/// has not arrived yet are dropped silently from the node's resolved list;
/// because the accumulated collection only grows, a reference that resolves
/// once resolves the same way on every later recomputation.
pub fn resolve(
    curriculum: &CurriculumDoc,
    videos: &[Video],
    summaries: &SummaryMap,
) -> ResolvedTree {
    let by_id: HashMap<&str, &Video> = videos.iter().map(|v| (v.id.as_str(), v)).collect();

    ResolvedTree {
        title: curriculum.title.clone(),
        sections: curriculum
            .sections
            .iter()
            .map(|section| resolve_node(section, &by_id, summaries))
            .collect(),
    }
}

fn resolve_node(
    node: &CurriculumNode,
    by_id: &HashMap<&str, &Video>,
    summaries: &SummaryMap,
) -> ResolvedNode {
    let videos = node
        .videos
        .iter()
        .filter_map(|reference| {
            let video = by_id.get(reference.id.as_str())?;
            let entry = summaries.get(&reference.id);

            let title = reference.title.clone().unwrap_or_else(|| {
                display_title(video.system_metadata.filename.as_deref(), &reference.id)
            });

            Some(ResolvedVideo {
                id: reference.id.clone(),
                title,
                summary: entry
                    .filter(|e| !e.summary.is_empty())
                    .map(|e| e.summary.clone()),
                chapters: entry.map(|e| e.chapters.clone()).unwrap_or_default(),
            })
        })
        .collect();

    ResolvedNode {
        id: node.id,
        title: node.title.clone(),
        description: node.description.clone(),
        video_count: node.videos.len(),
        videos,
        sections: node
            .sections
            .iter()
            .map(|child| resolve_node(child, by_id, summaries))
            .collect(),
    }
}

/// Display title for a video: the filename with one trailing ".mp4"
/// stripped (case-sensitive), falling back to the raw ID when the filename
/// is absent.
pub fn display_title(filename: Option<&str>, id: &str) -> String {
    match filename {
        Some(name) => name.strip_suffix(".mp4").unwrap_or(name).to_string(),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SystemMetadata;
    use crate::summaries::SummaryEntry;

    fn video(id: &str, filename: Option<&str>) -> Video {
        Video {
            id: id.to_string(),
            created_at: None,
            indexed_at: None,
            system_metadata: SystemMetadata {
                filename: filename.map(str::to_string),
                ..SystemMetadata::default()
            },
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
                        "videos": ["v1", "v2", "v3", "v4", "v5"],
                        "sections": [
                            {"id": 2, "title": "Timeline", "videos": ["v6"]}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_unfetched_references_dropped_silently() {
        let videos = vec![video("v1", Some("intro.mp4")), video("v3", None)];
        let tree = resolve(&curriculum(), &videos, &SummaryMap::new());

        let basics = &tree.sections[0];
        let ids: Vec<&str> = basics.videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v3"]);
    }

    #[test]
    fn test_video_count_stays_stable_during_pagination() {
        let videos = vec![video("v1", None), video("v2", None)];
        let tree = resolve(&curriculum(), &videos, &SummaryMap::new());

        let basics = &tree.sections[0];
        assert_eq!(basics.video_count, 5);
        assert_eq!(basics.videos.len(), 2);
    }

    #[test]
    fn test_resolution_is_monotonic_across_page_loads() {
        let doc = curriculum();
        let summaries = SummaryMap::new();

        let page_one = vec![video("v2", Some("cuts.mp4"))];
        let before = resolve(&doc, &page_one, &summaries);

        let mut accumulated = page_one;
        accumulated.push(video("v5", Some("color.mp4")));
        accumulated.push(video("v6", Some("markers.mp4")));
        let after = resolve(&doc, &accumulated, &summaries);

        // v2 resolved before and resolves identically after more pages land.
        let resolved_before = &before.sections[0].videos[0];
        let resolved_after = &after.sections[0].videos[0];
        assert_eq!(resolved_before, resolved_after);

        // Later arrivals join their nodes, including nested ones.
        assert_eq!(after.sections[0].videos.len(), 2);
        assert_eq!(after.sections[0].sections[0].videos[0].id, "v6");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let videos = vec![video("v1", Some("intro.mp4")), video("v6", None)];
        let mut summaries = SummaryMap::new();
        summaries.insert(
            "v1".to_string(),
            SummaryEntry {
                summary: "Course overview.".to_string(),
                chapters: vec![Chapter {
                    chapter_number: 1,
                    start: 0.0,
                    end: 15.0,
                    chapter_title: "Hello".to_string(),
                    chapter_summary: "Greeting.".to_string(),
                }],
            },
        );

        let doc = curriculum();
        assert_eq!(
            resolve(&doc, &videos, &summaries),
            resolve(&doc, &videos, &summaries)
        );
    }

    #[test]
    fn test_summary_and_chapters_attach_when_present() {
        let videos = vec![video("v1", Some("intro.mp4")), video("v2", None)];
        let mut summaries = SummaryMap::new();
        summaries.insert(
            "v1".to_string(),
            SummaryEntry {
                summary: "Course overview.".to_string(),
                chapters: Vec::new(),
            },
        );

        let tree = resolve(&curriculum(), &videos, &summaries);
        let resolved = &tree.sections[0].videos;

        assert_eq!(resolved[0].summary.as_deref(), Some("Course overview."));
        assert!(resolved[1].summary.is_none());
        assert!(resolved[1].chapters.is_empty());
    }

    #[test]
    fn test_display_title_derivation() {
        assert_eq!(display_title(Some("lecture01.mp4"), "v1"), "lecture01");
        assert_eq!(display_title(None, "v1"), "v1");
        // Only one suffix is stripped, and only the lowercase one.
        assert_eq!(display_title(Some("raw.mp4.mp4"), "v1"), "raw.mp4");
        assert_eq!(display_title(Some("CLIP.MP4"), "v1"), "CLIP.MP4");
        assert_eq!(display_title(Some("notes.txt"), "v1"), "notes.txt");
    }

    #[test]
    fn test_curriculum_supplied_title_takes_precedence() {
        let doc = CurriculumDoc::from_str(
            r#"{
                "title": "t",
                "sections": [
                    {"id": 1, "title": "a",
                     "videos": [{"id": "v1", "title": "Named in outline"}]}
                ]
            }"#,
        )
        .unwrap();
        let videos = vec![video("v1", Some("file.mp4"))];

        let tree = resolve(&doc, &videos, &SummaryMap::new());
        assert_eq!(tree.sections[0].videos[0].title, "Named in outline");
    }
}
