//! Client settings: defaults, an optional RON file, then command-line/env overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use taskq_engine::{ApiSettings, EngineSettings, PollMode, PollSettings};

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "taskq.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PollModeSetting {
    #[default]
    Sequential,
    FixedRate,
}

impl From<PollModeSetting> for PollMode {
    fn from(setting: PollModeSetting) -> Self {
        match setting {
            PollModeSetting::Sequential => PollMode::Sequential,
            PollModeSetting::FixedRate => PollMode::FixedRate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub interval_ms: u64,
    pub poll_mode: PollModeSetting,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            interval_ms: 2000,
            poll_mode: PollModeSetting::Sequential,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub interval_ms: Option<u64>,
    pub poll_mode: Option<PollModeSetting>,
    pub request_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading settings: {}", path.display()))?;
        let settings: Settings = ron::from_str(&raw)
            .with_context(|| format!("parsing settings: {}", path.display()))?;
        Ok(settings)
    }

    /// File (explicit path, else `./taskq.ron` if present, else defaults) plus overrides.
    pub fn resolve(config: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let base = match resolve_config_path(config) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        let settings = base.with_overrides(overrides);
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(base_url) = &overrides.base_url {
            self.base_url.clone_from(base_url);
        }
        if let Some(interval_ms) = overrides.interval_ms {
            self.interval_ms = interval_ms;
        }
        if let Some(poll_mode) = overrides.poll_mode {
            self.poll_mode = poll_mode;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            bail!("poll interval must be greater than zero");
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            bail!("connect and request timeouts must be greater than zero");
        }
        if self.base_url.trim().is_empty() {
            bail!("base url must not be empty");
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            api: ApiSettings {
                base_url: self.base_url.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
            poll: PollSettings {
                interval: Duration::from_millis(self.interval_ms),
                mode: self.poll_mode.into(),
            },
        }
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = user {
        return Some(path.to_path_buf());
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.exists().then_some(default)
}
