use flowcast_core::{utc_day, DateRange, IssueSnapshot};

use crate::interval::Interval;
use crate::throughput::bucket_days;

/// Cycle times (days) of issues completed inside `range`.
pub fn cycle_time_samples(issues: &[IssueSnapshot], range: &DateRange) -> Vec<f64> {
    issues
        .iter()
        .filter(|i| i.completed_at.is_some_and(|c| range.contains(utc_day(c))))
        .filter_map(IssueSnapshot::cycle_time_days)
        .collect()
}

/// One completion count per calendar day of `range`.
pub fn daily_throughput_samples(issues: &[IssueSnapshot], range: &DateRange) -> Vec<f64> {
    let completed = issues
        .iter()
        .filter_map(|i| i.completed_at.map(utc_day))
        .filter(|day| range.contains(*day))
        .collect();
    let edges = Interval::Daily.boundaries(range.from, range.to);
    bucket_days(completed, &edges)
        .into_iter()
        .map(|b| b.count as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::done;
    use time::macros::date;

    #[test]
    fn samples_only_cover_the_range() {
        let issues = vec![
            done(
                "A-1",
                date!(2023 - 12 - 20),
                Some(date!(2023 - 12 - 25)),
                date!(2023 - 12 - 30),
            ),
            done(
                "A-2",
                date!(2024 - 01 - 01),
                Some(date!(2024 - 01 - 01)),
                date!(2024 - 01 - 02),
            ),
            done("A-3", date!(2024 - 01 - 01), None, date!(2024 - 01 - 02)),
        ];
        let range = DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 04)).unwrap();

        let cycle = cycle_time_samples(&issues, &range);
        assert_eq!(cycle.len(), 1);
        assert!((cycle[0] - 30.0 / 24.0).abs() < 1e-9);

        assert_eq!(daily_throughput_samples(&issues, &range), vec![0.0, 2.0, 0.0]);
    }
}
