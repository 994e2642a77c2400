use flowcast_core::{chart_day, iso_day, CfdRow, DateRange, HierarchyLevel, IssueSnapshot};
use flowcast_derive::build_cfd;
use flowcast_table::{Column, DataTable, Role, TableBuilder};
use serde_json::{json, Value};

use crate::hierarchy::{filter_by_level, Hierarchy};

/// Which issues feed a cumulative flow chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CfdScope {
    /// Every issue at one hierarchy level.
    Level(HierarchyLevel),
    /// The children of a single epic. Adds a To Do series.
    Epic(String),
}

/// Cumulative flow table for `scope`, clipped to `from < date < to`.
pub fn cfd_table(issues: &[IssueSnapshot], range: &DateRange, scope: &CfdScope) -> DataTable {
    let (selected, with_to_do) = match scope {
        CfdScope::Level(level) => (filter_by_level(issues, *level), false),
        CfdScope::Epic(key) => {
            let hierarchy = Hierarchy::build(issues);
            let children = hierarchy
                .child_issues(key, issues)
                .into_iter()
                .cloned()
                .collect();
            (children, true)
        }
    };

    let rows = build_cfd(&selected, Some((range.from, range.to)));
    tracing::debug!(
        issues = selected.len(),
        rows = rows.len(),
        ?scope,
        "built cumulative flow"
    );

    let mut columns = vec![
        Column::date("Date"),
        Column::number("Total"),
        Column::string("Tooltip").with_role(Role::Tooltip),
        Column::number("Done"),
        Column::number("In Progress"),
    ];
    if with_to_do {
        columns.push(Column::number("To Do"));
    }

    let mut builder = TableBuilder::new();
    builder
        .set_columns(columns)
        .add_rows(rows.iter().map(|row| cfd_values(row, with_to_do)));
    builder.build()
}

fn cfd_values(row: &CfdRow, with_to_do: bool) -> Vec<Value> {
    let mut values = vec![
        json!(chart_day(row.date)),
        json!(row.total),
        json!(tooltip(row, with_to_do)),
        json!(row.done),
        json!(row.in_progress),
    ];
    if with_to_do {
        values.push(json!(row.to_do));
    }
    values
}

fn tooltip(row: &CfdRow, with_to_do: bool) -> String {
    let mut text = format!(
        "{}\nTotal: {}\nDone: {}\nIn Progress: {}",
        iso_day(row.date),
        row.total,
        row.done,
        row.in_progress
    );
    if with_to_do {
        text.push_str(&format!("\nTo Do: {}", row.to_do));
    }
    text
}
