use std::sync::atomic::{AtomicBool, Ordering};

use flowcast_core::{FlowError, Measurements, Result};

use crate::sampler::RandomSampler;

/// Knobs for a batch of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    pub trials: usize,
    /// Upper bound on simulated days in a single trial.
    pub max_days_per_trial: u32,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            trials: 10_000,
            max_days_per_trial: 36_500,
        }
    }
}

/// Draw one sample.
pub fn select_value<S>(samples: &[f64], sampler: &mut S) -> Result<f64>
where
    S: RandomSampler + ?Sized,
{
    if samples.is_empty() {
        return Err(FlowError::insufficient("cannot sample from an empty set"));
    }
    let index = sampler.next_index(samples.len());
    samples.get(index).copied().ok_or_else(|| {
        FlowError::validation(format!(
            "sampler returned index {index} for {} samples",
            samples.len()
        ))
    })
}

/// One trial with the default step bound. See [`run_with`].
pub fn run_once<S>(backlog: usize, measurements: &Measurements, sampler: &mut S) -> Result<f64>
where
    S: RandomSampler + ?Sized,
{
    check_inputs(backlog, measurements)?;
    trial(
        backlog,
        measurements,
        SimulationOptions::default().max_days_per_trial,
        sampler,
    )
}

/// `trial_count` independent trials, sorted ascending.
pub fn run<S>(
    backlog: usize,
    measurements: &Measurements,
    trial_count: usize,
    sampler: &mut S,
) -> Result<Vec<f64>>
where
    S: RandomSampler + ?Sized,
{
    let options = SimulationOptions {
        trials: trial_count,
        ..SimulationOptions::default()
    };
    run_with(backlog, measurements, &options, sampler, None)
}

/// Run `options.trials` trials, sorted ascending.
///
/// Each trial starts from one drawn cycle time, then draws a daily throughput
/// per simulated day until the backlog is burnt down. The result is the
/// elapsed days. `cancel` is polled between trials.
pub fn run_with<S>(
    backlog: usize,
    measurements: &Measurements,
    options: &SimulationOptions,
    sampler: &mut S,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<f64>>
where
    S: RandomSampler + ?Sized,
{
    check_inputs(backlog, measurements)?;

    let mut runs = Vec::with_capacity(options.trials);
    for completed in 0..options.trials {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(FlowError::Cancelled {
                completed,
                requested: options.trials,
            });
        }
        runs.push(trial(
            backlog,
            measurements,
            options.max_days_per_trial,
            sampler,
        )?);
    }
    runs.sort_by(f64::total_cmp);
    Ok(runs)
}

fn check_inputs(backlog: usize, measurements: &Measurements) -> Result<()> {
    measurements.validate()?;
    if backlog > 0 && !measurements.throughputs.iter().any(|&t| t > 0.0) {
        return Err(FlowError::StalledSimulation {
            remaining: backlog as f64,
            days: 0,
        });
    }
    Ok(())
}

fn trial<S>(
    backlog: usize,
    measurements: &Measurements,
    max_days: u32,
    sampler: &mut S,
) -> Result<f64>
where
    S: RandomSampler + ?Sized,
{
    let mut elapsed = select_value(&measurements.cycle_times, sampler)?;
    let mut remaining = backlog as f64;
    let mut days = 0u32;
    while remaining > 0.0 {
        if days >= max_days {
            return Err(FlowError::StalledSimulation { remaining, days });
        }
        remaining -= select_value(&measurements.throughputs, sampler)?;
        elapsed += 1.0;
        days += 1;
    }
    Ok(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{SequenceSampler, UniformSampler};

    fn fixed(index: usize) -> impl FnMut(usize) -> usize {
        move |_| index
    }

    fn trace_measurements() -> Measurements {
        Measurements::new(vec![2.5, 3.5, 5.5], vec![1.0, 0.0, 2.0])
    }

    #[test]
    fn select_value_uses_sampler_index() {
        let values = [4.0, 5.0, 6.0];
        assert_eq!(select_value(&values, &mut fixed(0)).unwrap(), 4.0);
        assert_eq!(select_value(&values, &mut |k: usize| k - 1).unwrap(), 6.0);
    }

    #[test]
    fn select_value_rejects_empty_and_out_of_range() {
        assert!(matches!(
            select_value(&[], &mut fixed(0)),
            Err(FlowError::InsufficientData(_))
        ));
        assert!(matches!(
            select_value(&[1.0], &mut fixed(5)),
            Err(FlowError::Validation(_))
        ));
    }

    #[test]
    fn run_once_follows_the_drawn_sequence() {
        let mut sampler = SequenceSampler::new(vec![1, 0, 2, 1, 2]);
        let days = run_once(5, &trace_measurements(), &mut sampler).unwrap();
        assert_eq!(days, 7.5);
        assert_eq!(sampler.drawn(), 5);
    }

    #[test]
    fn empty_backlog_costs_only_the_cycle_time() {
        let mut sampler = SequenceSampler::new(vec![2]);
        assert_eq!(run_once(0, &trace_measurements(), &mut sampler).unwrap(), 5.5);
    }

    #[test]
    fn missing_samples_fail_fast() {
        let no_cycle = Measurements::new(vec![], vec![1.0]);
        assert!(matches!(
            run_once(3, &no_cycle, &mut fixed(0)),
            Err(FlowError::InsufficientData(_))
        ));
        let no_throughput = Measurements::new(vec![1.0], vec![]);
        assert!(matches!(
            run(3, &no_throughput, 10, &mut fixed(0)),
            Err(FlowError::InsufficientData(_))
        ));
    }

    #[test]
    fn all_zero_throughput_is_a_stall_not_a_hang() {
        let zeros = Measurements::new(vec![1.0], vec![0.0, 0.0]);
        assert!(matches!(
            run_once(3, &zeros, &mut fixed(0)),
            Err(FlowError::StalledSimulation { days: 0, .. })
        ));
    }

    #[test]
    fn step_bound_stops_unlucky_trials() {
        let measurements = trace_measurements();
        let options = SimulationOptions {
            trials: 1,
            max_days_per_trial: 10,
        };
        // Always draw the zero throughput after the first cycle time.
        let mut sampler = SequenceSampler::new(vec![1]);
        let err = run_with(5, &measurements, &options, &mut sampler, None).unwrap_err();
        assert_eq!(
            err,
            FlowError::StalledSimulation {
                remaining: 5.0,
                days: 10
            }
        );
    }

    #[test]
    fn run_returns_sorted_trials() {
        let measurements = Measurements::new(vec![1.0, 2.0, 4.0], vec![1.0, 2.0, 3.0]);
        let mut sampler = UniformSampler::seeded(7);
        let runs = run(10, &measurements, 500, &mut sampler).unwrap();
        assert_eq!(runs.len(), 500);
        assert!(runs.windows(2).all(|w| w[0] <= w[1]));
        assert!(runs[0] >= 1.0 + 4.0);
        assert!(runs[runs.len() - 1] <= 4.0 + 10.0);
    }

    #[test]
    fn zero_trials_is_empty() {
        let runs = run(3, &trace_measurements(), 0, &mut fixed(0)).unwrap();
        assert!(runs.is_empty());
    }

    #[test]
    fn raised_flag_cancels_between_trials() {
        let flag = AtomicBool::new(true);
        let err = run_with(
            3,
            &trace_measurements(),
            &SimulationOptions::default(),
            &mut UniformSampler::seeded(1),
            Some(&flag),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FlowError::Cancelled {
                completed: 0,
                requested: 10_000
            }
        );
    }
}
