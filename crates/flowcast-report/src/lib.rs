mod cfd;
mod config;
mod forecast;
mod hierarchy;
mod scatter;
mod throughput;

pub use cfd::{cfd_table, CfdScope};
pub use config::{ReportConfig, CONFIG_KEYS};
pub use forecast::{forecast, forecast_with, ForecastPoint, ForecastReport, ForecastRequest};
pub use hierarchy::{filter_by_level, filter_completed_in, Hierarchy};
pub use scatter::{scatter_percentiles, scatterplot_table};
pub use throughput::throughput_table;
