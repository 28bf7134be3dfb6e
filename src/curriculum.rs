use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CurriculumError {
    #[error("failed to read curriculum document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse curriculum document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The static curriculum outline, loaded once and immutable for the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumDoc {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub sections: Vec<CurriculumNode>,
}

/// One node of the outline. Genuinely recursive: nesting depth is a property
/// of the data, not of this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumNode {
    /// Small positive integer, unique within the tree per the source data
    pub id: u32,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Weak references into the video index, resolved at render time
    #[serde(default)]
    pub videos: Vec<VideoRef>,

    #[serde(default)]
    pub sections: Vec<CurriculumNode>,
}

/// Canonical video reference. Source documents carry either a plain ID
/// string or an object with id/title; both normalize to this shape at the
/// ingestion boundary so nothing downstream branches on representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawVideoRef")]
pub struct VideoRef {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVideoRef {
    Id(String),
    Entry {
        id: String,
        #[serde(default)]
        title: Option<String>,
    },
}

impl From<RawVideoRef> for VideoRef {
    fn from(raw: RawVideoRef) -> Self {
        match raw {
            RawVideoRef::Id(id) => VideoRef { id, title: None },
            RawVideoRef::Entry { id, title } => VideoRef { id, title },
        }
    }
}

impl CurriculumDoc {
    /// An empty curriculum, the degraded state when the document is
    /// missing or malformed.
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            sections: Vec::new(),
        }
    }

    pub fn from_str(content: &str) -> Result<Self, CurriculumError> {
        let doc: CurriculumDoc = serde_json::from_str(content)?;
        Ok(doc)
    }

    pub async fn from_path(path: &Path) -> Result<Self, CurriculumError> {
        let content = tokio::fs::read_to_string(path).await?;
        let doc = Self::from_str(&content)?;
        debug!(
            "📁 Loaded curriculum '{}' with {} top-level sections from {}",
            doc.title,
            doc.sections.len(),
            path.display()
        );
        Ok(doc)
    }

    /// Total number of video references across the whole tree, duplicates
    /// included.
    pub fn video_reference_count(&self) -> usize {
        fn count(node: &CurriculumNode) -> usize {
            node.videos.len() + node.sections.iter().map(count).sum::<usize>()
        }
        self.sections.iter().map(count).sum()
    }

    /// Video IDs referenced from more than one node, mapped to the IDs of
    /// the nodes referencing them. The source data is known to contain such
    /// duplicates; this is a read-only audit, not a dedup. Which occurrence
    /// should win is a data-cleaning decision for the document owner.
    pub fn duplicate_references(&self) -> BTreeMap<String, Vec<u32>> {
        let mut occurrences: BTreeMap<String, Vec<u32>> = BTreeMap::new();

        fn walk(node: &CurriculumNode, occurrences: &mut BTreeMap<String, Vec<u32>>) {
            for video in &node.videos {
                occurrences.entry(video.id.clone()).or_default().push(node.id);
            }
            for child in &node.sections {
                walk(child, occurrences);
            }
        }

        for section in &self.sections {
            walk(section, &mut occurrences);
        }

        occurrences.retain(|_, nodes| nodes.len() > 1);
        occurrences
    }
}
