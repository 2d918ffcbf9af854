use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use roster_engine::{ClientSettings, DEFAULT_BASE_URL};
use roster_logging::{roster_info, roster_warn};
use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "roster.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
    pub event_poll_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_ms: client.connect_timeout.as_millis() as u64,
            request_timeout_ms: client.request_timeout.as_millis() as u64,
            max_response_bytes: client.max_bytes,
            event_poll_ms: 100,
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn event_poll(&self) -> Duration {
        Duration::from_millis(self.event_poll_ms)
    }
}

/// First command-line argument, or `roster.ron` in the working directory.
pub fn config_path(mut args: impl Iterator<Item = String>) -> PathBuf {
    args.nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// Loads the config, falling back to defaults when the file is missing or bad.
pub fn load_config(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            roster_info!("No config at {:?}; using defaults", path);
            return AppConfig::default();
        }
        Err(err) => {
            roster_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) => {
            roster_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            roster_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join(CONFIG_FILENAME));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "http://localhost:5050");
    }

    #[test]
    fn partial_file_overrides_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "(base_url: \"http://records.internal:8080\", event_poll_ms: 50)",
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.base_url, "http://records.internal:8080");
        assert_eq!(config.event_poll(), Duration::from_millis(50));
        assert_eq!(config.request_timeout_ms, AppConfig::default().request_timeout_ms);

        let settings = config.client_settings();
        assert_eq!(settings.base_url, "http://records.internal:8080");
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "base_url = oops").unwrap();
        assert_eq!(load_config(&path), AppConfig::default());
    }

    #[test]
    fn config_path_uses_first_argument() {
        let args = vec!["roster_app".to_string(), "/etc/roster.ron".to_string()];
        assert_eq!(config_path(args.into_iter()), PathBuf::from("/etc/roster.ron"));
        let args = vec!["roster_app".to_string()];
        assert_eq!(config_path(args.into_iter()), PathBuf::from(CONFIG_FILENAME));
    }
}
