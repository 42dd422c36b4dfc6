use crate::{Error, Result};
use proofroom_sync::PollIntervals;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolve the workspace data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. PROOFROOM_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.proofroom (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("PROOFROOM_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("proofroom"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".proofroom"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Refresh cadence of the polling backstop, per collection, in seconds
    pub project_refresh_secs: u64,
    pub media_refresh_secs: u64,
    pub comment_refresh_secs: u64,
    pub notification_refresh_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            project_refresh_secs: 5,
            media_refresh_secs: 5,
            comment_refresh_secs: 3,
            notification_refresh_secs: 5,
        }
    }
}

impl SyncConfig {
    pub fn poll_intervals(&self) -> PollIntervals {
        PollIntervals {
            projects: Duration::from_secs(self.project_refresh_secs),
            media: Duration::from_secs(self.media_refresh_secs),
            comments: Duration::from_secs(self.comment_refresh_secs),
            notifications: Duration::from_secs(self.notification_refresh_secs),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Notices kept per project; the oldest beyond this fall off
    pub retain: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            retain: proofroom_core::notifications::DEFAULT_RETAIN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RemoteConfig {
    /// When true the caller is expected to register a remote backend via
    /// `Proofroom::with_remote`; without one the workspace runs local-only
    /// and says so once at open.
    pub enabled: bool,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub sync: SyncConfig,
    pub notifications: NotificationConfig,
    pub remote: RemoteConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_the_observed_refresh_rates() {
        let config = Config::default();
        assert_eq!(config.sync.comment_refresh_secs, 3);
        assert_eq!(config.sync.media_refresh_secs, 5);
        assert_eq!(config.notifications.retain, 200);
        assert!(!config.remote.enabled);
    }

    #[test]
    fn save_and_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.sync.comment_refresh_secs = 10;
        config.remote.enabled = true;
        config.remote.endpoint = Some("https://example.invalid/proofroom".to_string());

        config.save_to(&path).unwrap();
        assert!(path.exists());

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.sync.comment_refresh_secs, 10);
        assert!(loaded.remote.enabled);
        assert_eq!(
            loaded.remote.endpoint.as_deref(),
            Some("https://example.invalid/proofroom")
        );
    }

    #[test]
    fn load_nonexistent_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.sync.comment_refresh_secs, 3);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sync]\ncomment_refresh_secs = 1\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.sync.comment_refresh_secs, 1);
        assert_eq!(config.sync.media_refresh_secs, 5);
        assert_eq!(config.notifications.retain, 200);
    }
}
