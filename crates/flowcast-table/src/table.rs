use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cell type understood by the chart renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Date,
    Number,
    String,
}

/// Special meaning of a column for the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Tooltip,
    Annotation,
    AnnotationText,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub label: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Column {
    pub fn new(label: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            label: label.into(),
            value_type,
            role: None,
        }
    }

    pub fn date(label: impl Into<String>) -> Self {
        Self::new(label, ValueType::Date)
    }

    pub fn number(label: impl Into<String>) -> Self {
        Self::new(label, ValueType::Number)
    }

    pub fn string(label: impl Into<String>) -> Self {
        Self::new(label, ValueType::String)
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// A single wrapped value, `{"v": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    pub v: Value,
}

/// One table row, `{"c": [cells]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub c: Vec<Cell>,
}

/// Finished table handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataTable {
    #[serde(rename = "cols")]
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl DataTable {
    pub fn column_labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Raw value at `(row, column)`, if present.
    pub fn value(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row)?.c.get(column).map(|cell| &cell.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_in_renderer_shape() {
        let table = DataTable {
            columns: vec![
                Column::date("completed_time"),
                Column::string("key").with_role(Role::AnnotationText),
            ],
            rows: vec![Row {
                c: vec![
                    Cell {
                        v: json!("Date(2024, 0, 1, 0, 0)"),
                    },
                    Cell { v: Value::Null },
                ],
            }],
        };
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!({
                "cols": [
                    {"label": "completed_time", "type": "date"},
                    {"label": "key", "type": "string", "role": "annotationText"}
                ],
                "rows": [{"c": [{"v": "Date(2024, 0, 1, 0, 0)"}, {"v": null}]}]
            })
        );
    }
}
