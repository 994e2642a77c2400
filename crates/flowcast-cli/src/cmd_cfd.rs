use anyhow::Result;
use flowcast_core::HierarchyLevel;
use flowcast_report::{cfd_table, CfdScope};

use crate::input::{date_range, load_issues, print_json};
use crate::Source;

/// `flowcast cfd --from D --to D [--epic KEY]`
pub fn execute(
    source: &Source,
    from: Option<&str>,
    to: Option<&str>,
    epic: Option<String>,
) -> Result<()> {
    let range = date_range(from, to)?;
    let issues = load_issues(&source.issues)?;
    let scope = match epic {
        Some(key) => CfdScope::Epic(key),
        None => CfdScope::Level(HierarchyLevel::Story),
    };
    print_json(&cfd_table(&issues, &range, &scope), source.pretty)
}
