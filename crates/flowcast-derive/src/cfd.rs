use flowcast_core::{utc_day, CfdRow, IssueSnapshot, StatusCategory, TransitionEvent};
use time::Date;

use crate::events::extract_events;

/// Apply one transition to a row, returning the updated row.
///
/// `total` only moves when an issue enters To Do: every issue enters the
/// system exactly once.
pub fn apply_event(row: CfdRow, event: &TransitionEvent<'_>) -> CfdRow {
    let mut next = row;
    if let Some(from) = event.from {
        let slot = counter(&mut next, from);
        *slot = slot.saturating_sub(1);
    }
    *counter(&mut next, event.to) += 1;
    if event.to == StatusCategory::ToDo {
        next.total += 1;
    }
    next
}

fn counter(row: &mut CfdRow, category: StatusCategory) -> &mut u32 {
    match category {
        StatusCategory::ToDo => &mut row.to_do,
        StatusCategory::InProgress => &mut row.in_progress,
        StatusCategory::Done => &mut row.done,
    }
}

/// Build the daily cumulative flow rows for a set of issues.
///
/// Rows start one day before the first transition (all zeros) and end one day
/// after the last, with one row per UTC calendar day in between. Transitions
/// are ordered by instant; equal instants keep input order.
///
/// When `bounds` is given only rows with `from < date < to` are kept. Both
/// ends are exclusive.
pub fn build_cfd(issues: &[IssueSnapshot], bounds: Option<(Date, Date)>) -> Vec<CfdRow> {
    let mut events: Vec<TransitionEvent<'_>> = issues.iter().flat_map(extract_events).collect();
    events.sort_by_key(|e| e.at);

    let Some(first) = events.first() else {
        return Vec::new();
    };
    let first_day = utc_day(first.at);
    let seed = CfdRow::empty(first_day.previous_day().unwrap_or(first_day));

    let mut rows = events.iter().fold(vec![seed], |mut rows, event| {
        let day = utc_day(event.at);
        let mut current = rows[rows.len() - 1];
        while current.date < day {
            let Some(next_day) = current.date.next_day() else {
                break;
            };
            current = current.carried_to(next_day);
            rows.push(current);
        }
        let last = rows.len() - 1;
        rows[last] = apply_event(rows[last], event);
        rows
    });

    let tail = rows[rows.len() - 1];
    if let Some(next_day) = tail.date.next_day() {
        rows.push(tail.carried_to(next_day));
    }

    match bounds {
        Some((from, to)) => rows
            .into_iter()
            .filter(|row| from < row.date && row.date < to)
            .collect(),
        None => rows,
    }
}
