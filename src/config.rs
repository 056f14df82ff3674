use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "baasync.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// API endpoint, including the version prefix (e.g. `https://cloud.example.com/v1`)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub pull: PullConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            pull: PullConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullConfig {
    /// Items requested per list call (default: 100)
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "https://cloud.appwrite.io/v1".to_string()
}

fn default_page_size() -> u64 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

pub const MAX_PAGE_SIZE: u64 = 5000;

impl Config {
    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            bail!(
                "endpoint must start with http:// or https://, got '{}'",
                self.endpoint
            );
        }
        if self.pull.page_size == 0 || self.pull.page_size > MAX_PAGE_SIZE {
            bail!(
                "pull.page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.pull.page_size
            );
        }
        if self.pull.timeout_secs == 0 {
            bail!("pull.timeout_secs must be greater than 0");
        }
        Ok(())
    }

    pub fn default_template() -> String {
        r#"# baasync configuration

endpoint = "https://cloud.appwrite.io/v1"   # API endpoint, including /v1

# Pull settings
# [pull]
# page_size = 100      # items per list request (1-5000)
# timeout_secs = 30    # per-request timeout
"#
        .to_string()
    }
}
