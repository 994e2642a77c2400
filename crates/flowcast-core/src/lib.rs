pub mod chart;
pub mod error;
pub mod types;

pub use chart::{chart_date, chart_day, iso_day, parse_day, utc_day};
pub use error::{FlowError, Result};
pub use types::*;
