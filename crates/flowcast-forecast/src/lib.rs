mod sampler;
mod simulate;
mod summary;

pub use sampler::{RandomSampler, SequenceSampler, UniformSampler};
pub use simulate::{run, run_once, run_with, select_value, SimulationOptions};
pub use summary::{summarize, PercentileValue};
