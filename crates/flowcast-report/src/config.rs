use std::path::Path;

use anyhow::{bail, Context, Result};
use flowcast_derive::Interval;
use flowcast_forecast::SimulationOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys accepted in `.flowcast/config.json`.
pub const CONFIG_KEYS: &[&str] = &[
    "trials",
    "max_days_per_trial",
    "seed",
    "exclude_outliers",
    "include_max_percentile",
    "throughput_interval",
    "history_days",
];

/// Report settings. Every field has a default so a partial file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default = "default_trials")]
    pub trials: usize,
    #[serde(default = "default_max_days")]
    pub max_days_per_trial: u32,
    /// Fixed seed for reproducible forecasts.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub exclude_outliers: bool,
    /// Report the 100th percentile in forecast summaries.
    #[serde(default)]
    pub include_max_percentile: bool,
    #[serde(default)]
    pub throughput_interval: Interval,
    /// Look-back window used when no explicit history range is given.
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

fn default_trials() -> usize {
    10_000
}

fn default_max_days() -> u32 {
    36_500
}

fn default_history_days() -> u32 {
    90
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            max_days_per_trial: default_max_days(),
            seed: None,
            exclude_outliers: false,
            include_max_percentile: false,
            throughput_interval: Interval::default(),
            history_days: default_history_days(),
        }
    }
}

impl ReportConfig {
    /// Read config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Replace the file at `path` in one step: stage beside it, then rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut staged, self)?;
        staged
            .persist(path)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }

    pub fn simulation_options(&self) -> SimulationOptions {
        SimulationOptions {
            trials: self.trials,
            max_days_per_trial: self.max_days_per_trial,
        }
    }

    /// Current value of `key` rendered as JSON.
    pub fn get(&self, key: &str) -> Result<String> {
        check_key(key)?;
        let map = serde_json::to_value(self)?;
        Ok(map
            .get(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "null".to_string()))
    }

    /// Return a copy with `key` set from its command-line text form.
    pub fn with_value(&self, key: &str, raw: &str) -> Result<Self> {
        check_key(key)?;
        let mut map = serde_json::to_value(self)?;
        if let Some(obj) = map.as_object_mut() {
            obj.insert(key.to_string(), raw_to_json(raw));
        }
        serde_json::from_value(map).with_context(|| format!("invalid value for {key}: {raw}"))
    }

    /// All `(key, value)` pairs in declaration order.
    pub fn entries(&self) -> Result<Vec<(&'static str, String)>> {
        CONFIG_KEYS
            .iter()
            .map(|&key| Ok((key, self.get(key)?)))
            .collect()
    }
}

fn check_key(key: &str) -> Result<()> {
    if !CONFIG_KEYS.contains(&key) {
        bail!(
            "unknown config key {key:?} (expected one of: {})",
            CONFIG_KEYS.join(", ")
        );
    }
    Ok(())
}

/// Command-line text as JSON. Bare words such as `monthly` become strings;
/// `none` clears an optional setting.
fn raw_to_json(raw: &str) -> Value {
    match raw.trim() {
        "none" => Value::Null,
        text => serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())),
    }
}
