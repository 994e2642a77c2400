use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use flowcast_report::ReportConfig;

use crate::input::config_path;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Set a config value
    Set {
        /// Config key (e.g. trials, seed, throughput_interval)
        key: String,
        /// Config value (true/false/none/number/string)
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values, defaults included
    List,
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, cwd: &Path) -> Result<()> {
    match cmd {
        ConfigCmd::Set { key, value } => set(cwd, &key, &value),
        ConfigCmd::Get { key } => get(cwd, &key),
        ConfigCmd::List => list(cwd),
    }
}

// ── Command Implementations ──

/// `flowcast config set <key> <value>`
pub fn set(cwd: &Path, key: &str, value: &str) -> Result<()> {
    let path = config_path(cwd);
    let config = ReportConfig::load(&path)?.with_value(key, value)?;
    config.save(&path)?;
    tracing::debug!(key, path = %path.display(), "config updated");
    println!("{key} = {}", config.get(key)?);
    Ok(())
}

/// `flowcast config get <key>`
pub fn get(cwd: &Path, key: &str) -> Result<()> {
    let config = ReportConfig::load(&config_path(cwd))?;
    println!("{}", config.get(key)?);
    Ok(())
}

/// `flowcast config list`
pub fn list(cwd: &Path) -> Result<()> {
    let config = ReportConfig::load(&config_path(cwd))?;
    for (key, value) in config.entries()? {
        println!("{key} = {value}");
    }
    Ok(())
}
