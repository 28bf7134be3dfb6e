/// Video Curriculum Library
///
/// Backend for a video-library browser: accumulates pages of videos from a
/// hosted video-indexing API, joins them against a static curriculum outline
/// and an AI summary/chapter map, and serves the resolved view alongside the
/// raw proxy endpoints.

pub mod aggregate;
pub mod api;
pub mod client;
pub mod config;
pub mod curriculum;
pub mod expansion;
pub mod library;
pub mod pager;
pub mod player;
pub mod summaries;

// Re-export main types for easy access
pub use crate::aggregate::{resolve, ResolvedNode, ResolvedTree, ResolvedVideo};
pub use crate::client::{
    ClientError, DirectoryClient, IndexDetails, PageInfo, SummaryKind, Video, VideoSource,
    VideosResponse,
};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::curriculum::{CurriculumDoc, CurriculumNode, VideoRef};
pub use crate::expansion::{ExpansionSet, NodeKey};
pub use crate::library::LibrarySession;
pub use crate::pager::{LoadOutcome, VideoPager};
pub use crate::player::{PlayerCommand, PlayerCoordinator, PlayerState};
pub use crate::summaries::{Chapter, SummaryEntry, SummaryMap};
