use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Base address of the local wallet service.
pub const DEFAULT_API_URL: &str = "https://localhost:7192";

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    if let Ok(s) = std::env::var("PICPAY_TUI_DATA") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "picpay", "picpay-tui") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Accept self-signed certificates (the local service runs on a dev cert).
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                accept_invalid_certs: false,
            },
        }
    }
}

impl Config {
    /// Create config from CLI args.
    pub fn new(api_url: Option<&str>, accept_invalid_certs: bool) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }
        config.api.accept_invalid_certs = accept_invalid_certs;
        config
    }

    /// Join an endpoint path onto the base address.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api.base_url, path.trim_start_matches('/'))
    }
}
