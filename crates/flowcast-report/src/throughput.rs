use flowcast_core::{chart_day, iso_day, DateRange, IssueSnapshot};
use flowcast_derive::{throughput, Interval};
use flowcast_table::{Column, DataTable, Role, TableBuilder};
use serde_json::json;

use crate::hierarchy::filter_completed_in;

/// Completed issues per `interval` bucket across `range`.
pub fn throughput_table(
    issues: &[IssueSnapshot],
    range: &DateRange,
    interval: Interval,
) -> DataTable {
    let completed = filter_completed_in(issues, range);
    let edges = interval.boundaries(range.from, range.to);
    let buckets = throughput(&completed, &edges);
    tracing::debug!(
        completed = completed.len(),
        buckets = buckets.len(),
        %interval,
        "built throughput"
    );

    let mut builder = TableBuilder::new();
    builder
        .set_columns(vec![
            Column::date("completed_time"),
            Column::number("Count"),
            Column::string("date").with_role(Role::AnnotationText),
        ])
        .add_rows(buckets.iter().map(|b| {
            vec![
                json!(chart_day(b.start)),
                json!(b.count),
                json!(iso_day(b.start)),
            ]
        }));
    builder.build()
}
