mod builder;
mod stats;
mod table;

pub use builder::TableBuilder;
pub use stats::{exclude_outliers, quantile, sorted_values};
pub use table::{Cell, Column, DataTable, Role, Row, ValueType};
