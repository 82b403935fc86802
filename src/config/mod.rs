use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "yt-ranker.toml";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Public Piped API instances, most preferred first.
pub const DEFAULT_MIRRORS: &[&str] = &[
    "https://pipedapi.kavin.rocks",
    "https://pipedapi.adminforge.de",
    "https://api.piped.private.coffee",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub user_agent: String,
    /// Transport timeout in seconds for every upstream request.
    pub timeout: u64,
    pub youtube_api_key: Option<String>,
    pub youtube_api_base: String,
    pub enable_mirror: bool,
    pub mirror_instances: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            user_agent: format!("yt-ranker/{}", env!("CARGO_PKG_VERSION")),
            timeout: 30,
            youtube_api_key: None,
            youtube_api_base: DEFAULT_API_BASE.to_string(),
            enable_mirror: true,
            mirror_instances: DEFAULT_MIRRORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load from `path` (or `yt-ranker.toml` when present), then apply environment overrides.
    ///
    /// An explicitly given path must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config file {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Parsing {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `YOUTUBE_API_KEY`, `YT_RANKER_LISTEN` and `YT_RANKER_MIRRORS`. Blank values are ignored.
    pub fn with_env_overrides(mut self, env_lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| {
            env_lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(key) = lookup("YOUTUBE_API_KEY") {
            self.youtube_api_key = Some(key);
        }
        if let Some(addr) = lookup("YT_RANKER_LISTEN") {
            self.listen_addr = addr;
        }
        if let Some(mirrors) = lookup("YT_RANKER_MIRRORS") {
            self.mirror_instances = mirrors
                .split(',')
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // a key of "" in the file means unset
        if self
            .youtube_api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.youtube_api_key = None;
        }
        self
    }
}
