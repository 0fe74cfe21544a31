use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration file picked up from the working directory when no explicit
/// `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "bracket-sync.toml";

/// Historical commit message. It names a fixed year; use `{year}` in a
/// custom template to follow the processed year.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update 2025.json with latest NHL data";

/// Main configuration structure for bracket-sync
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BracketSyncConfig {
    /// Remote API settings
    pub api: ApiConfig,
    /// Working tree layout
    pub repository: RepositoryConfig,
    /// Commit and push behaviour
    pub publish: PublishConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host of the NHL web API
    pub base_url: String,
    /// Whole-request timeout
    pub timeout_seconds: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Any path inside the target working tree (defaults to the current directory)
    pub path: Option<String>,
    /// Artifact directory relative to the repository root
    pub data_dir: String,
    /// Upper bound on each git invocation
    pub command_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Commit and push when the working tree changed
    pub enabled: bool,
    /// Push after committing
    pub push: bool,
    /// Commit message template; `{year}` is substituted
    pub commit_message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log level when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json_logs: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-web.nhle.com".to_string(),
            timeout_seconds: 30,
            user_agent: concat!("bracket-sync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            data_dir: "playoffs/data".to_string(),
            command_timeout_seconds: 120,
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            push: true,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl PublishConfig {
    pub fn render_commit_message(&self, year: i32) -> String {
        self.commit_message.replace("{year}", &year.to_string())
    }
}

impl BracketSyncConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (`path`, or bracket-sync.toml if present)
    /// 3. Environment variables (BRACKET_SYNC_ prefix, `__` between sections)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE));
            }
            None => {}
        }

        builder = builder.add_source(
            Environment::with_prefix("BRACKET_SYNC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to read configuration")?;
        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load .env file if it exists. Returns whether one was loaded.
    pub fn load_env_file() -> Result<bool> {
        if !Path::new(".env").exists() {
            return Ok(false);
        }
        dotenvy::dotenv()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_nhl_layout() {
        let config = BracketSyncConfig::default();

        assert_eq!(config.api.base_url, "https://api-web.nhle.com");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.repository.data_dir, "playoffs/data");
        assert!(config.publish.enabled);
        assert!(config.publish.push);
        assert_eq!(config.publish.commit_message, DEFAULT_COMMIT_MESSAGE);
    }

    #[test]
    fn test_commit_message_template() {
        let mut publish = PublishConfig::default();
        assert_eq!(
            publish.render_commit_message(2031),
            "Update 2025.json with latest NHL data"
        );

        publish.commit_message = "Update {year}.json with latest NHL data".to_string();
        assert_eq!(
            publish.render_commit_message(2031),
            "Update 2031.json with latest NHL data"
        );
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bracket-sync.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://127.0.0.1:9000\"\n\n[publish]\npush = false\n",
        )
        .unwrap();

        let config = BracketSyncConfig::load(Some(&path)).unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.timeout_seconds, 30);
        assert!(!config.publish.push);
        assert!(config.publish.enabled);
        assert_eq!(config.repository.data_dir, "playoffs/data");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = BracketSyncConfig::load(Some(&dir.path().join("absent.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overrides_nested_keys() {
        std::env::set_var("BRACKET_SYNC_OBSERVABILITY__JSON_LOGS", "true");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();

        let config = BracketSyncConfig::load(Some(&path));
        std::env::remove_var("BRACKET_SYNC_OBSERVABILITY__JSON_LOGS");

        assert!(config.unwrap().observability.json_logs);
    }

    #[test]
    fn test_rendered_toml_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = BracketSyncConfig::default();
        config.repository.data_dir = "data/brackets".to_string();

        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
        let reloaded = BracketSyncConfig::load(Some(&path)).unwrap();

        assert_eq!(reloaded.repository.data_dir, "data/brackets");
    }
}
