use std::path::Path;

use anyhow::Result;
use flowcast_report::{scatterplot_table, ReportConfig};

use crate::input::{config_path, date_range, load_issues, print_json};
use crate::Source;

/// `flowcast scatter --from D --to D [--exclude-outliers]`
///
/// Outliers are also dropped when `exclude_outliers` is set in the config.
pub fn execute(
    cwd: &Path,
    source: &Source,
    from: Option<&str>,
    to: Option<&str>,
    exclude_outliers: bool,
) -> Result<()> {
    let range = date_range(from, to)?;
    let config = ReportConfig::load(&config_path(cwd))?;
    let issues = load_issues(&source.issues)?;
    let table = scatterplot_table(&issues, &range, exclude_outliers || config.exclude_outliers);
    print_json(&table, source.pretty)
}
