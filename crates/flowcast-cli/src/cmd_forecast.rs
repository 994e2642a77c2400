use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use flowcast_core::{parse_day, DateRange, FlowError};
use flowcast_report::{forecast, ForecastRequest, ReportConfig};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};

use crate::input::{config_path, load_issues, print_json};
use crate::Source;

/// Command-line values layered over the stored config for one run.
pub struct Overrides {
    pub backlog: usize,
    pub from: Option<String>,
    pub to: Option<String>,
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub table: bool,
}

/// `flowcast forecast --backlog N [--from D --to D] [--trials N] [--seed S] [--table]`
pub fn execute(cwd: &Path, source: &Source, overrides: Overrides) -> Result<()> {
    let mut config = ReportConfig::load(&config_path(cwd))?;
    if let Some(trials) = overrides.trials {
        config.trials = trials;
    }
    if overrides.seed.is_some() {
        config.seed = overrides.seed;
    }

    let today = OffsetDateTime::now_utc().date();
    let history = history_range(
        overrides.from.as_deref(),
        overrides.to.as_deref(),
        today,
        config.history_days,
    )?;
    let request = ForecastRequest {
        backlog: overrides.backlog,
        history,
        start: PrimitiveDateTime::new(today, Time::MIDNIGHT).assume_utc(),
    };
    let issues = load_issues(&source.issues)?;

    let cancel = Arc::new(AtomicBool::new(false));
    ctrlc_cancel(Arc::clone(&cancel));

    let report = forecast(&issues, &request, &config, Some(&*cancel))?;
    if overrides.table {
        print_json(&report.to_table(), source.pretty)
    } else {
        print_json(&report, source.pretty)
    }
}

/// Explicit `--from/--to`, or the `history_days` days before `today`.
fn history_range(
    from: Option<&str>,
    to: Option<&str>,
    today: Date,
    history_days: u32,
) -> Result<DateRange> {
    let range = match (from, to) {
        (Some(from), Some(to)) => DateRange::new(parse_day(from)?, parse_day(to)?)?,
        (None, None) => {
            let from = today
                .checked_sub(Duration::days(i64::from(history_days)))
                .ok_or_else(|| {
                    FlowError::validation(format!(
                        "history_days {history_days} reaches before the earliest date"
                    ))
                })?;
            DateRange::new(from, today)?
        }
        _ => {
            return Err(FlowError::validation(
                "--from and --to must be given together",
            )
            .into())
        }
    };
    Ok(range)
}

fn ctrlc_cancel(cancel: Arc<AtomicBool>) {
    let _ = ctrlc::set_handler(move || {
        tracing::warn!("interrupted, stopping after the current trial");
        cancel.store(true, Ordering::SeqCst);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn history_defaults_to_trailing_window() {
        let range = history_range(None, None, date!(2024 - 03 - 31), 30).unwrap();
        assert_eq!(range.from, date!(2024 - 03 - 01));
        assert_eq!(range.to, date!(2024 - 03 - 31));
    }

    #[test]
    fn explicit_history_wins() {
        let range = history_range(
            Some("2024-01-01"),
            Some("2024-01-15"),
            date!(2024 - 03 - 31),
            30,
        )
        .unwrap();
        assert_eq!(range.days(), 14);
    }

    #[test]
    fn half_given_history_is_rejected() {
        for (from, to) in [(Some("2024-01-01"), None), (None, Some("2024-01-15"))] {
            let err = history_range(from, to, date!(2024 - 03 - 31), 30).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<FlowError>(),
                Some(FlowError::Validation(_))
            ));
        }
    }

    #[test]
    fn oversized_history_days_is_rejected() {
        let err = history_range(None, None, date!(2024 - 03 - 31), u32::MAX).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FlowError>(),
            Some(FlowError::Validation(_))
        ));
    }

    #[test]
    fn zero_history_days_is_an_empty_range() {
        assert!(history_range(None, None, date!(2024 - 03 - 31), 0).is_err());
    }
}
