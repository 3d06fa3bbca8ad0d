use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sw_alert::{AlertPolicy, AlertSettings};
use sw_core::PollConfig;
use sw_feed::payload::{FALLBACK_URL, PRIMARY_URL};
use sw_feed::{FailoverConfig, OrbitParams};

pub const DEFAULT_OUT_DIR: &str = "satwatch-data";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    #[default]
    Csv,
    Sqlite,
}

/// Everything `satwatch` can be told through a JSON config file.
///
/// ```json
/// {
///   "poll":  { "interval_secs": 5, "history_size": 10 },
///   "alert": { "home": { "lat": 33.749, "lon": -84.388 }, "radius_km": 50 },
///   "store": "csv",
///   "out_dir": "satwatch-data"
/// }
/// ```
///
/// Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub poll:           PollConfig,
    pub alert:          AlertSettings,
    pub policy:         AlertPolicy,
    pub alerts_enabled: bool,
    pub failover:       FailoverConfig,
    pub primary_url:    String,
    pub fallback_url:   String,
    pub orbit:          OrbitParams,
    pub store:          StoreKind,
    pub out_dir:        PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll:           PollConfig::default(),
            alert:          AlertSettings::default(),
            policy:         AlertPolicy::default(),
            alerts_enabled: true,
            failover:       FailoverConfig::default(),
            primary_url:    PRIMARY_URL.to_owned(),
            fallback_url:   FALLBACK_URL.to_owned(),
            orbit:          OrbitParams::default(),
            store:          StoreKind::default(),
            out_dir:        PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl AppConfig {
    /// Read `path`, or use the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
