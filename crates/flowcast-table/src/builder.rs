use serde_json::Value;

use crate::stats::{quantile, sorted_values};
use crate::table::{Cell, Column, DataTable, Row};

/// Accumulates columns and rows, then materializes a [`DataTable`].
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) -> &mut Self {
        self.columns = columns;
        self
    }

    pub fn add_row(&mut self, row: Vec<Value>) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn add_rows(&mut self, rows: impl IntoIterator<Item = Vec<Value>>) -> &mut Self {
        self.rows.extend(rows);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Append one column per percentile of `column`'s numeric values.
    ///
    /// Columns are added highest percentile first and existing rows are
    /// padded with nulls. Two reference rows are then placed at the head:
    /// the first tagged `from_boundary`, the second `to_boundary`, each
    /// holding only the percentile values, so the renderer can draw flat
    /// lines across the chart's domain. Does nothing with fewer than two rows.
    pub fn add_percentiles(
        &mut self,
        column: usize,
        percentiles: &[u8],
        from_boundary: Value,
        to_boundary: Value,
    ) -> &mut Self {
        if self.rows.len() < 2 {
            return self;
        }

        let sorted = sorted_values(
            self.rows
                .iter()
                .filter_map(|row| row.get(column).and_then(Value::as_f64)),
        );

        let mut order = percentiles.to_vec();
        order.sort_unstable_by(|a, b| b.cmp(a));
        order.dedup();

        let width = self.columns.len();
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, Value::Null);
            }
        }
        let mut from_row = vec![Value::Null; width];
        let mut to_row = vec![Value::Null; width];
        if let Some(first) = from_row.first_mut() {
            *first = from_boundary;
        }
        if let Some(first) = to_row.first_mut() {
            *first = to_boundary;
        }

        for p in order {
            let value = quantile(&sorted, f64::from(p) / 100.0)
                .map(Value::from)
                .unwrap_or(Value::Null);
            self.columns.push(Column::number(format!("{p}th")));
            for row in &mut self.rows {
                row.push(Value::Null);
            }
            from_row.push(value.clone());
            to_row.push(value);
        }

        self.rows.splice(0..0, [from_row, to_row]);
        self
    }

    /// Materialize the table, wrapping each value as `{"v": value}`.
    pub fn build(&self) -> DataTable {
        DataTable {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| Row {
                    c: row.iter().map(|v| Cell { v: v.clone() }).collect(),
                })
                .collect(),
        }
    }
}
