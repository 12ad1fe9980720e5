//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub amplitude: AmplitudeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_state_db_path")]
    pub state_db_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_subreddit")]
    pub subreddit: String,

    #[serde(default = "default_limit")]
    pub limit: u32,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_reddit_base_url")]
    pub reddit_base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_true")]
    pub pullpush_enabled: bool,

    #[serde(default = "default_pullpush_base_url")]
    pub pullpush_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmplitudeConfig {
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_amplitude_endpoint")]
    pub endpoint: String,
}

// Default value functions
fn default_state_db_path() -> PathBuf {
    PathBuf::from("./state.sqlite")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_subreddit() -> String {
    "healthcare".to_string()
}

fn default_limit() -> u32 {
    10
}

fn default_poll_interval() -> u64 {
    300
}

fn default_reddit_base_url() -> String {
    reddit_relay_adapters::reddit::DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    reddit_relay_adapters::reddit::DEFAULT_USER_AGENT.to_string()
}

fn default_true() -> bool {
    true
}

fn default_pullpush_base_url() -> String {
    reddit_relay_adapters::pullpush::DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    "AMPLITUDE_API_KEY".to_string()
}

fn default_amplitude_endpoint() -> String {
    reddit_relay_adapters::amplitude::DEFAULT_ENDPOINT.to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            state_db_path: default_state_db_path(),
            log_level: default_log_level(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            subreddit: default_subreddit(),
            limit: default_limit(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            reddit_base_url: default_reddit_base_url(),
            user_agent: default_user_agent(),
            pullpush_enabled: default_true(),
            pullpush_base_url: default_pullpush_base_url(),
        }
    }
}

impl Default for AmplitudeConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            endpoint: default_amplitude_endpoint(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("REDDIT_RELAY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# reddit-relay configuration

[general]
state_db_path = "./state.sqlite"
log_level = "info"

[watch]
subreddit = "healthcare"
limit = 10
poll_interval_secs = 300

[sources]
reddit_base_url = "https://www.reddit.com"
user_agent = "reddit-relay/0.1 (by /u/reddit-relay)"
# Archival fallback tried when reddit.com fails
pullpush_enabled = true
pullpush_base_url = "https://api.pullpush.io"

[amplitude]
# Name of the environment variable holding the API key
api_key_env = "AMPLITUDE_API_KEY"
endpoint = "https://api2.amplitude.com/2/httpapi"
"#
        .to_string()
    }
}
