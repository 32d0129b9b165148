use crate::error::{Result, SimmerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SESSION_ENV: &str = "SIMMER_SESSION";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API root, e.g. `http://127.0.0.1:5000/api/`
    pub base_url: String,
    /// Backend session cookie (`name=value`) saved after `simmer login`
    pub session_cookie: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            session_cookie: None,
            timeout_seconds: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SimmerError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("simmer-toads").join("config.json"))
    }

    /// Environment wins over the saved cookie.
    pub fn get_session_cookie(&self) -> Option<String> {
        if let Ok(cookie) = std::env::var(SESSION_ENV) {
            if !cookie.trim().is_empty() {
                return Some(cookie);
            }
        }

        self.session_cookie.clone()
    }

    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| SimmerError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SimmerError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                base_url
            )));
        }
        self.base_url = base_url.to_string();
        Ok(())
    }

    pub fn set_session_cookie(&mut self, cookie: Option<String>) {
        self.session_cookie = cookie.filter(|c| !c.trim().is_empty());
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
