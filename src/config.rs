use crate::model::route::DEFAULT_ROUTE_TARGET;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_API_BASE_URL: &str = "SURFACE_API_BASE_URL";
pub const ENV_DASHBOARD_URL: &str = "SURFACE_DASHBOARD_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the posture API; `/manual_scan/` is appended
    pub api_base_url: String,
    /// Base URL of the web dashboard, used for "see all" links
    pub dashboard_url: String,
    /// Detail report JSON
    pub report_path: PathBuf,
    /// Session JSON holding the access token and account record
    pub session_path: PathBuf,
    /// Identifier passed to parametrized "see all" routes
    pub route_target_id: String,
    /// Domains offered in the rescan target dialog
    pub suggested_domains: Vec<String>,
    pub request_timeout_secs: u64,
    /// Where config, history and logs live. Not persisted.
    #[serde(skip)]
    pub state_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let state_dir = Self::default_state_dir();
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            dashboard_url: "http://localhost:3000".to_string(),
            report_path: state_dir.join("report.json"),
            session_path: state_dir.join("session.json"),
            route_target_id: DEFAULT_ROUTE_TARGET.to_string(),
            suggested_domains: Vec::new(),
            request_timeout_secs: 30,
            state_dir,
        }
    }
}

impl Config {
    /// `$HOME/.surface-tui`, or the working directory when HOME is unset
    pub fn default_state_dir() -> PathBuf {
        env::var("HOME")
            .map(|home| PathBuf::from(home).join(".surface-tui"))
            .unwrap_or_else(|_| PathBuf::from(".surface-tui"))
    }

    pub fn config_path(state_dir: &Path) -> PathBuf {
        state_dir.join("config.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// Load `config.json` from a state directory.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load_from(state_dir: &Path) -> anyhow::Result<Config> {
        let config_path = Self::config_path(state_dir);
        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            serde_json::from_str::<Config>(&contents).map_err(|e| {
                anyhow::anyhow!("Invalid config at {}: {}", config_path.display(), e)
            })?
        } else {
            Config {
                report_path: state_dir.join("report.json"),
                session_path: state_dir.join("session.json"),
                ..Config::default()
            }
        };
        config.state_dir = state_dir.to_path_buf();
        Ok(config)
    }

    /// Apply environment overrides
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = env::var(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Ok(url) = env::var(ENV_DASHBOARD_URL) {
            self.dashboard_url = url;
        }
        self
    }

    /// Full URL of the manual scan endpoint
    pub fn scan_endpoint(&self) -> String {
        format!("{}/manual_scan/", self.api_base_url.trim_end_matches('/'))
    }

    pub fn save(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.state_dir)?;
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(Self::config_path(&self.state_dir), contents)?;
        Ok(())
    }
}
