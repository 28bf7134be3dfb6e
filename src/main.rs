use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use video_curriculum::api::{ApiServer, AppSession};
use video_curriculum::client::DirectoryClient;
use video_curriculum::config::Config;
use video_curriculum::curriculum::CurriculumDoc;
use video_curriculum::pager::VideoPager;
use video_curriculum::summaries::{load_summary_map, SummaryMap};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("video_curriculum=info,warn")
        .init();

    let matches = Command::new("Video Curriculum")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Video library browser backend with curriculum navigation and AI summaries")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port for the HTTP API"),
        )
        .arg(
            Arg::new("index-id")
                .short('i')
                .long("index-id")
                .value_name("ID")
                .help("Video index to browse"),
        )
        .arg(
            Arg::new("curriculum")
                .short('c')
                .long("curriculum")
                .value_name("FILE")
                .help("Curriculum document (JSON)"),
        )
        .arg(
            Arg::new("summaries")
                .short('s')
                .long("summaries")
                .value_name("FILE")
                .help("Summary-map document (JSON)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Load configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if let Some(port) = matches.get_one::<String>("port") {
        config.server.port = port.parse()?;
    }
    if let Some(index_id) = matches.get_one::<String>("index-id") {
        config.library.index_id = index_id.clone();
    }
    if let Some(curriculum) = matches.get_one::<String>("curriculum") {
        config.library.curriculum_file = PathBuf::from(curriculum);
    }
    if let Some(summaries) = matches.get_one::<String>("summaries") {
        config.library.summaries_file = PathBuf::from(summaries);
    }
    if matches.get_flag("verbose") {
        info!("Verbose logging enabled");
    }

    config.validate()?;

    info!("🚀 Video Curriculum starting...");
    info!("📇 Index: {}", config.library.index_id);
    info!("📁 Curriculum: {}", config.library.curriculum_file.display());
    info!("📁 Summaries: {}", config.library.summaries_file.display());

    // Malformed local documents degrade to an empty state instead of
    // aborting startup.
    let curriculum = match CurriculumDoc::from_path(&config.library.curriculum_file).await {
        Ok(doc) => {
            info!(
                "📚 Curriculum '{}': {} sections, {} video references",
                doc.title,
                doc.sections.len(),
                doc.video_reference_count()
            );
            let duplicates = doc.duplicate_references();
            if !duplicates.is_empty() {
                warn!(
                    "Curriculum references {} video IDs from more than one section",
                    duplicates.len()
                );
            }
            doc
        }
        Err(e) => {
            warn!("Failed to load curriculum, starting empty: {}", e);
            CurriculumDoc::empty()
        }
    };

    let summaries = match load_summary_map(&config.library.summaries_file).await {
        Ok(map) => {
            info!("📝 Loaded {} summary entries", map.len());
            map
        }
        Err(e) => {
            warn!("Failed to load summaries, starting empty: {}", e);
            SummaryMap::new()
        }
    };

    let client = Arc::new(DirectoryClient::new(config.api.clone()));
    let pager = VideoPager::new(
        client.clone(),
        config.library.index_id.clone(),
        config.library.page_limit,
    );
    let session = Arc::new(AppSession::new(pager, curriculum, summaries));

    let server = ApiServer::new(client, session, config.server.port);
    server.start().await
}
