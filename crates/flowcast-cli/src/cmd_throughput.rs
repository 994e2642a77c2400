use std::path::Path;

use anyhow::Result;
use flowcast_derive::Interval;
use flowcast_report::{throughput_table, ReportConfig};

use crate::input::{config_path, date_range, load_issues, print_json};
use crate::Source;

/// `flowcast throughput --from D --to D [--interval weekly]`
pub fn execute(
    cwd: &Path,
    source: &Source,
    from: Option<&str>,
    to: Option<&str>,
    interval: Option<Interval>,
) -> Result<()> {
    let range = date_range(from, to)?;
    let config = ReportConfig::load(&config_path(cwd))?;
    let interval = interval.unwrap_or(config.throughput_interval);
    let issues = load_issues(&source.issues)?;
    print_json(&throughput_table(&issues, &range, interval), source.pretty)
}
