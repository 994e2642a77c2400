use flowcast_core::{chart_date, chart_day, utc_day, DateRange, IssueSnapshot};
use flowcast_table::{exclude_outliers, Column, DataTable, Role, TableBuilder};
use serde_json::json;
use time::OffsetDateTime;

/// Percentile bands drawn for `points` cycle-time samples.
pub fn scatter_percentiles(points: usize) -> &'static [u8] {
    match points {
        0..=2 => &[],
        3..=9 => &[50],
        _ => &[50, 70, 85, 95],
    }
}

/// Cycle-time scatterplot of issues completed inside `range`.
pub fn scatterplot_table(issues: &[IssueSnapshot], range: &DateRange, exclude: bool) -> DataTable {
    let mut points: Vec<(OffsetDateTime, f64, &str)> = issues
        .iter()
        .filter_map(|issue| {
            let completed = issue.completed_at?;
            if !range.contains(utc_day(completed)) {
                return None;
            }
            Some((completed, issue.cycle_time_days()?, issue.key.as_str()))
        })
        .collect();
    points.sort_by_key(|(completed, _, _)| *completed);

    if exclude {
        let before = points.len();
        points = exclude_outliers(points, |(_, cycle, _)| *cycle);
        if points.len() < before {
            tracing::warn!(
                removed = before - points.len(),
                kept = points.len(),
                "excluded cycle time outliers"
            );
        }
    }

    let mut builder = TableBuilder::new();
    builder
        .set_columns(vec![
            Column::date("completed_time"),
            Column::number("cycle_time"),
            Column::string("key").with_role(Role::AnnotationText),
        ])
        .add_rows(points.iter().map(|(completed, cycle, key)| {
            vec![json!(chart_date(*completed)), json!(cycle), json!(key)]
        }));

    let bands = scatter_percentiles(points.len());
    if !bands.is_empty() {
        builder.add_percentiles(
            1,
            bands,
            json!(chart_day(range.from)),
            json!(chart_day(range.to)),
        );
    }
    tracing::debug!(points = points.len(), bands = bands.len(), "built scatterplot");
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::finished;
    use serde_json::Value;
    use time::macros::date;
    use time::Duration;

    fn january() -> DateRange {
        DateRange::new(date!(2024 - 01 - 01), date!(2024 - 02 - 01)).unwrap()
    }

    fn issues(n: usize) -> Vec<IssueSnapshot> {
        (0..n)
            .map(|i| {
                let day = date!(2024 - 01 - 01) + Duration::days(i as i64);
                finished(&format!("A-{i}"), day, 1 + i as i64)
            })
            .collect()
    }

    #[test]
    fn band_count_follows_sample_size() {
        assert!(scatter_percentiles(2).is_empty());
        assert_eq!(scatter_percentiles(3), &[50]);
        assert_eq!(scatter_percentiles(9), &[50]);
        assert_eq!(scatter_percentiles(10), &[50, 70, 85, 95]);
    }

    #[test]
    fn two_points_get_no_bands() {
        let table = scatterplot_table(&issues(2), &january(), false);
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.columns[2].role, Some(Role::AnnotationText));
    }

    #[test]
    fn small_samples_get_median_only() {
        let table = scatterplot_table(&issues(5), &january(), false);
        assert_eq!(
            table.column_labels(),
            vec!["completed_time", "cycle_time", "key", "50th"]
        );
        assert_eq!(table.rows.len(), 7);
        assert_eq!(table.value(0, 0), Some(&json!("Date(2024, 0, 1, 0, 0)")));
        assert_eq!(table.value(1, 0), Some(&json!("Date(2024, 1, 1, 0, 0)")));
        assert_eq!(table.value(0, 3), Some(&json!(3.0)));
        assert_eq!(table.value(2, 2), Some(&json!("A-0")));
        assert_eq!(table.value(2, 3), Some(&Value::Null));
    }

    #[test]
    fn large_samples_get_four_bands_highest_first() {
        let table = scatterplot_table(&issues(12), &january(), false);
        assert_eq!(
            table.column_labels(),
            vec!["completed_time", "cycle_time", "key", "95th", "85th", "70th", "50th"]
        );
    }

    #[test]
    fn outliers_can_be_excluded() {
        let mut input = issues(9);
        input.push(finished("SLOW", date!(2024 - 01 - 20), 400));
        let kept = scatterplot_table(&input, &january(), false);
        let trimmed = scatterplot_table(&input, &january(), true);
        assert_eq!(kept.rows.len(), 10 + 2);
        // Nine points remain: median band only.
        assert_eq!(trimmed.rows.len(), 9 + 2);
        assert!(trimmed.rows.iter().all(|r| r.c[2].v != json!("SLOW")));
    }

    #[test]
    fn completions_outside_range_are_ignored() {
        let input = vec![finished("LATE", date!(2024 - 02 - 03), 2)];
        assert!(scatterplot_table(&input, &january(), false).rows.is_empty());
    }
}
