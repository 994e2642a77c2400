mod cfd;
mod events;
mod interval;
mod samples;
mod throughput;

pub use cfd::{apply_event, build_cfd};
pub use events::extract_events;
pub use interval::Interval;
pub use samples::{cycle_time_samples, daily_throughput_samples};
pub use throughput::{throughput, ThroughputBucket};
