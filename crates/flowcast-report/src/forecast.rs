use std::sync::atomic::AtomicBool;

use anyhow::{bail, Context, Result};
use flowcast_core::{chart_date, DateRange, IssueSnapshot, Measurements};
use flowcast_derive::{cycle_time_samples, daily_throughput_samples};
use flowcast_forecast::{run_with, summarize, RandomSampler, UniformSampler};
use flowcast_table::{Column, DataTable, Role, TableBuilder};
use serde::Serialize;
use serde_json::json;
use time::{Duration, OffsetDateTime};

use crate::config::ReportConfig;

/// What to forecast and from which history.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    /// Items still to deliver.
    pub backlog: usize,
    /// Completed work used as the empirical sample.
    pub history: DateRange,
    /// Instant the simulated day offsets count from.
    pub start: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastPoint {
    pub percentile: u8,
    pub days: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub completion: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastReport {
    pub backlog: usize,
    pub trials: usize,
    pub cycle_time_samples: usize,
    pub throughput_samples: usize,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    pub points: Vec<ForecastPoint>,
}

impl ForecastReport {
    /// One row per percentile, earliest first.
    pub fn to_table(&self) -> DataTable {
        let mut builder = TableBuilder::new();
        builder
            .set_columns(vec![
                Column::number("percentile"),
                Column::number("days"),
                Column::date("completion_date"),
                Column::string("label").with_role(Role::AnnotationText),
            ])
            .add_rows(self.points.iter().map(|p| {
                vec![
                    json!(p.percentile),
                    json!(p.days),
                    json!(chart_date(p.completion)),
                    json!(format!("{}%: {}", p.percentile, p.completion.date())),
                ]
            }));
        builder.build()
    }
}

/// Forecast with a sampler picked from `config` (seeded when a seed is set).
pub fn forecast(
    issues: &[IssueSnapshot],
    request: &ForecastRequest,
    config: &ReportConfig,
    cancel: Option<&AtomicBool>,
) -> Result<ForecastReport> {
    match config.seed {
        Some(seed) => forecast_with(
            issues,
            request,
            config,
            &mut UniformSampler::seeded(seed),
            cancel,
        ),
        None => forecast_with(
            issues,
            request,
            config,
            &mut UniformSampler::from_entropy(),
            cancel,
        ),
    }
}

/// Forecast drawing indices from `sampler`.
pub fn forecast_with(
    issues: &[IssueSnapshot],
    request: &ForecastRequest,
    config: &ReportConfig,
    sampler: &mut dyn RandomSampler,
    cancel: Option<&AtomicBool>,
) -> Result<ForecastReport> {
    let measurements = Measurements::new(
        cycle_time_samples(issues, &request.history),
        daily_throughput_samples(issues, &request.history),
    );
    let options = config.simulation_options();
    tracing::debug!(
        backlog = request.backlog,
        trials = options.trials,
        cycle_times = measurements.cycle_times.len(),
        throughputs = measurements.throughputs.len(),
        "running forecast"
    );

    let runs = run_with(request.backlog, &measurements, &options, sampler, cancel)
        .context("forecast simulation failed")?;

    let points = summarize(&runs, config.include_max_percentile)
        .into_iter()
        .map(|p| {
            Ok(ForecastPoint {
                percentile: p.percentile,
                days: p.value,
                completion: offset_days(request.start, p.value)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ForecastReport {
        backlog: request.backlog,
        trials: runs.len(),
        cycle_time_samples: measurements.cycle_times.len(),
        throughput_samples: measurements.throughputs.len(),
        start: request.start,
        points,
    })
}

fn offset_days(start: OffsetDateTime, days: f64) -> Result<OffsetDateTime> {
    let minutes = (days * 24.0 * 60.0).round() as i64;
    match start.checked_add(Duration::minutes(minutes)) {
        Some(ts) => Ok(ts),
        None => bail!("forecast of {days} days from {start} is out of range"),
    }
}
