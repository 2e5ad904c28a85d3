use github::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use orchestrator::DEFAULT_MAX_CONCURRENCY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, warn};

pub const CONFIG_DIR: &str = ".repoforge";
pub const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_PORT: u16 = 8080;

const ENV_GITHUB_API_URL: &str = "GITHUB_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// Base URL of the GitHub REST API
    pub api_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl GitHubSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Most repositories created at once by the bulk endpoint
    pub max_concurrency: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Settings stored in `.repoforge/config.toml`.
///
/// The GitHub token is never read from this file; it comes from `GITHUB_TOKEN`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub github: GitHubSettings,
    pub batch: BatchSettings,
}

impl Settings {
    pub fn path(project_path: &Path) -> PathBuf {
        project_path.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Read settings from a project directory, falling back to defaults.
    pub async fn read(project_path: &Path) -> Self {
        let config_path = Self::path(project_path);

        if !config_path.exists() {
            debug!(path = %config_path.display(), "Config file does not exist, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&config_path).await {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    debug!(path = %config_path.display(), "Config loaded successfully");
                    settings
                }
                Err(e) => {
                    warn!(path = %config_path.display(), error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %config_path.display(), error = %e, "Failed to read config file, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings into a project directory.
    pub async fn write(&self, project_path: &Path) -> std::io::Result<()> {
        let config_dir = project_path.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).await?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&config_path, content).await?;
        debug!(path = %config_path.display(), "Config saved successfully");

        Ok(())
    }

    /// Apply environment overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(api_url) = std::env::var(ENV_GITHUB_API_URL) {
            if !api_url.trim().is_empty() {
                self.github.api_url = api_url;
            }
        }
        self
    }
}
