use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the user config file, falling back to
    /// defaults when the file is missing or malformed. The `EXAMROOM_URL`
    /// environment variable overrides the configured server address.
    pub fn load() -> Self {
        let mut config = Self::read_file(&Self::config_path());
        if let Ok(url) = std::env::var("EXAMROOM_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("examroom")
            .join("config.toml")
    }

    fn read_file(path: &PathBuf) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
