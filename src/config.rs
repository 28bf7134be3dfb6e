use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the video curriculum service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream video-index API settings
    pub api: ApiConfig,

    /// Library and curriculum settings
    pub library: LibraryConfig,

    /// Served HTTP API settings
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the video-index API
    pub base_url: String,

    /// API key attached to every upstream request
    pub api_key: String,

    /// Timeout for ordinary upstream requests (seconds)
    pub request_timeout_seconds: u64,

    /// Budget for the slow summarize call (seconds)
    pub summarize_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Index to browse
    pub index_id: String,

    /// Videos requested per page
    pub page_limit: u32,

    /// Static curriculum document
    pub curriculum_file: PathBuf,

    /// Static summary-map document
    pub summaries_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the HTTP API listens on
    pub port: u16,
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        // Try to load from various locations
        let config_paths = [
            "video-curriculum.toml",
            "config/video-curriculum.toml",
            "~/.config/video-curriculum/config.toml",
            "/etc/video-curriculum/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        // Try environment variables
        if let Ok(config) = Self::from_env() {
            return Ok(config);
        }

        Err(anyhow!("No configuration file found"))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(api_key) = std::env::var("VIDEO_CURRICULUM_API_KEY") {
            config.api.api_key = api_key;
        } else {
            return Err(anyhow!("VIDEO_CURRICULUM_API_KEY is not set"));
        }

        if let Ok(base_url) = std::env::var("VIDEO_CURRICULUM_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(index_id) = std::env::var("VIDEO_CURRICULUM_INDEX_ID") {
            config.library.index_id = index_id;
        }

        if let Ok(page_limit) = std::env::var("VIDEO_CURRICULUM_PAGE_LIMIT") {
            config.library.page_limit = page_limit.parse().unwrap_or(9);
        }

        if let Ok(port) = std::env::var("VIDEO_CURRICULUM_PORT") {
            config.server.port = port.parse().unwrap_or(8080);
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(anyhow!("api.base_url must not be empty"));
        }

        if self.api.api_key.is_empty() {
            return Err(anyhow!("api.api_key must not be empty"));
        }

        if self.library.index_id.is_empty() {
            return Err(anyhow!("library.index_id must not be empty"));
        }

        if self.library.page_limit == 0 {
            return Err(anyhow!("library.page_limit must be greater than 0"));
        }

        if self.api.summarize_timeout_seconds == 0 {
            return Err(anyhow!(
                "api.summarize_timeout_seconds must be greater than 0"
            ));
        }

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            library: LibraryConfig {
                index_id: String::new(),
                page_limit: 9,
                curriculum_file: PathBuf::from("data/curriculum.json"),
                summaries_file: PathBuf::from("data/summaries.json"),
            },
            server: ServerConfig { port: 8080 },
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.twelvelabs.io/v1.3".to_string(),
            api_key: String::new(),
            request_timeout_seconds: 30,
            summarize_timeout_seconds: 60,
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.config.api.api_key = api_key;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.api.base_url = base_url;
        self
    }

    pub fn with_index_id(mut self, index_id: String) -> Self {
        self.config.library.index_id = index_id;
        self
    }

    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.config.library.page_limit = page_limit;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.library.page_limit, 9);
        assert_eq!(config.api.summarize_timeout_seconds, 60);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_api_key("tlk_test".to_string())
            .with_index_id("673e000000000000000000aa".to_string())
            .with_page_limit(12)
            .with_port(9000)
            .build();

        assert_eq!(config.api.api_key, "tlk_test");
        assert_eq!(config.library.page_limit, 12);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_config_validation() {
        let config = ConfigBuilder::new()
            .with_api_key("tlk_test".to_string())
            .with_index_id("673e000000000000000000aa".to_string())
            .build();
        assert!(config.validate().is_ok());

        let missing_key = ConfigBuilder::new()
            .with_index_id("673e000000000000000000aa".to_string())
            .build();
        assert!(missing_key.validate().is_err());

        let zero_pages = ConfigBuilder::new()
            .with_api_key("tlk_test".to_string())
            .with_index_id("673e000000000000000000aa".to_string())
            .with_page_limit(0)
            .build();
        assert!(zero_pages.validate().is_err());
    }
}
