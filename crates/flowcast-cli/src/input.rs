use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flowcast_core::{parse_day, DateRange, IssueSnapshot};
use serde::Serialize;

/// Where `flowcast config` keeps its settings, relative to the working dir.
pub fn config_path(cwd: &Path) -> PathBuf {
    cwd.join(".flowcast").join("config.json")
}

/// Read an issue export. Snapshots that start after they complete are dropped.
pub fn load_issues(path: &Path) -> Result<Vec<IssueSnapshot>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading issues from {}", path.display()))?;
    let issues: Vec<IssueSnapshot> = serde_json::from_str(&content)
        .with_context(|| format!("parsing issues from {}", path.display()))?;

    let total = issues.len();
    let (kept, skipped): (Vec<_>, Vec<_>) =
        issues.into_iter().partition(IssueSnapshot::is_consistent);
    for issue in &skipped {
        tracing::warn!(key = %issue.key, "skipping issue completed before it started");
    }
    tracing::debug!(total, kept = kept.len(), path = %path.display(), "loaded issues");
    Ok(kept)
}

/// `--from/--to` as a validated range. Both bounds are required.
pub fn date_range(from: Option<&str>, to: Option<&str>) -> Result<DateRange> {
    let from = from.map(parse_day).transpose()?;
    let to = to.map(parse_day).transpose()?;
    Ok(DateRange::require(from, to)?)
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
