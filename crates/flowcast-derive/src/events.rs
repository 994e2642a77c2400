use flowcast_core::{IssueSnapshot, StatusCategory, TransitionEvent};

/// Turn one snapshot into its ordered status transitions.
///
/// Always yields the entry into To Do at `created_at`, then To Do → In Progress
/// when `started_at` is set, then a move into Done from whichever category the
/// issue was in when `completed_at` is set.
///
/// Timestamps are clamped so the events of one issue never run backwards
/// (a start recorded before creation is treated as happening at creation).
pub fn extract_events(issue: &IssueSnapshot) -> Vec<TransitionEvent<'_>> {
    let mut events = Vec::with_capacity(3);
    let mut last_at = issue.created_at;

    events.push(TransitionEvent {
        issue_key: &issue.key,
        at: last_at,
        from: None,
        to: StatusCategory::ToDo,
    });

    let mut current = StatusCategory::ToDo;
    if let Some(started_at) = issue.started_at {
        last_at = last_at.max(started_at);
        events.push(TransitionEvent {
            issue_key: &issue.key,
            at: last_at,
            from: Some(current),
            to: StatusCategory::InProgress,
        });
        current = StatusCategory::InProgress;
    }

    if let Some(completed_at) = issue.completed_at {
        events.push(TransitionEvent {
            issue_key: &issue.key,
            at: last_at.max(completed_at),
            from: Some(current),
            to: StatusCategory::Done,
        });
    }

    events
}
