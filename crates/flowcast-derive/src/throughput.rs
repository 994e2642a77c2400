use flowcast_core::{utc_day, IssueSnapshot};
use serde::Serialize;
use time::Date;

/// Completed-issue count for one `[start, end)` bucket.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ThroughputBucket {
    pub start: Date,
    pub end: Date,
    pub count: usize,
}

/// Count completions per bucket.
///
/// `boundaries` holds consecutive bucket edges (see
/// [`Interval::boundaries`](crate::Interval::boundaries)); `n` edges give
/// `n - 1` buckets. Issues are consumed left to right: each bucket takes the
/// longest remaining prefix completed before its upper edge. Anything
/// completed on or after the final edge is not counted, and issues without a
/// completion are ignored.
pub fn throughput(issues: &[IssueSnapshot], boundaries: &[Date]) -> Vec<ThroughputBucket> {
    let completed = issues
        .iter()
        .filter_map(|i| i.completed_at.map(utc_day))
        .collect();
    bucket_days(completed, boundaries)
}

pub(crate) fn bucket_days(mut completed: Vec<Date>, boundaries: &[Date]) -> Vec<ThroughputBucket> {
    completed.sort_unstable();

    let mut remaining = completed.as_slice();
    boundaries
        .windows(2)
        .map(|edge| {
            let (start, end) = (edge[0], edge[1]);
            let count = remaining.partition_point(|&day| day < end);
            remaining = &remaining[count..];
            ThroughputBucket { start, end, count }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{done, todo};
    use crate::Interval;
    use time::macros::{date, datetime};

    #[test]
    fn daily_window_counts_each_day() {
        let issues = vec![
            done("A-1", date!(2024 - 01 - 01), None, date!(2024 - 01 - 01)),
            done("A-2", date!(2024 - 01 - 01), None, date!(2024 - 01 - 02)),
        ];
        let edges = Interval::Daily.boundaries(date!(2024 - 01 - 01), date!(2024 - 01 - 08));
        let counts: Vec<usize> = throughput(&issues, &edges).iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn unsorted_input_and_open_issues_are_handled() {
        let issues = vec![
            done("A-3", date!(2024 - 01 - 01), None, date!(2024 - 01 - 16)),
            todo("A-9", date!(2024 - 01 - 02)),
            done("A-1", date!(2024 - 01 - 01), None, date!(2024 - 01 - 08)),
            done("A-2", date!(2024 - 01 - 01), None, date!(2024 - 01 - 09)),
        ];
        let edges = Interval::Weekly.boundaries(date!(2024 - 01 - 07), date!(2024 - 01 - 17));
        let buckets = throughput(&issues, &edges);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start, date!(2024 - 01 - 07));
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].end, date!(2024 - 01 - 21));
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn completions_past_last_edge_are_dropped() {
        let issues = vec![done("A-1", date!(2024 - 01 - 01), None, date!(2024 - 03 - 01))];
        let edges = Interval::Daily.boundaries(date!(2024 - 01 - 01), date!(2024 - 01 - 03));
        assert!(throughput(&issues, &edges).iter().all(|b| b.count == 0));
    }

    #[test]
    fn completions_bucket_by_utc_day() {
        // 23:30 -02:00 on 01-01 is 01-02 in UTC.
        let late = todo("A-1", date!(2024 - 01 - 01))
            .completed(datetime!(2024-01-01 23:30 -02:00));
        let edges = Interval::Daily.boundaries(date!(2024 - 01 - 01), date!(2024 - 01 - 03));
        let counts: Vec<usize> = throughput(&[late], &edges).iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![0, 1]);
    }

    #[test]
    fn fewer_than_two_edges_means_no_buckets() {
        assert!(throughput(&[], &[date!(2024 - 01 - 01)]).is_empty());
    }
}
