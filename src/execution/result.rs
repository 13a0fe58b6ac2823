//! Tabular query results

use crate::core::temporal::Timestamp;
use crate::query::builder::BUCKET_ALIAS;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::time::Duration;

/// One result row, column name to value, in column order
pub type Row = Map<String, Value>;

/// Rows returned by a query executor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub total_rows: usize,
    /// Wall time spent executing
    #[serde(rename = "execution_time_secs", serialize_with = "as_secs_f64")]
    pub elapsed: Duration,
}

fn as_secs_f64<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// A numeric series for charting bucketed results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<f64>,
}

/// Chart-ready view of a bucketed result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ResultSet {
    /// Result with `total_rows` taken from `rows`
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let total_rows = rows.len();
        Self {
            columns,
            rows,
            total_rows,
            elapsed: Duration::ZERO,
        }
    }

    /// Record how long execution took
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// True when no rows came back
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value rendered for display; missing cells are empty
    pub fn cell(&self, row: usize, column: &str) -> String {
        match self.rows.get(row).and_then(|r| r.get(column)) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Chart view of a bucketed result: one series per numeric column.
    ///
    /// Returns `None` unless the first column is the time bucket.
    pub fn chart(&self) -> Option<ChartData> {
        if self.columns.first().map(String::as_str) != Some(BUCKET_ALIAS) {
            return None;
        }

        let labels = self
            .rows
            .iter()
            .map(|row| bucket_label(row.get(BUCKET_ALIAS)))
            .collect();

        let series = self
            .columns
            .iter()
            .skip(1)
            .filter_map(|column| {
                let data: Option<Vec<f64>> = self
                    .rows
                    .iter()
                    .map(|row| row.get(column).and_then(Value::as_f64))
                    .collect();
                data.map(|data| ChartSeries {
                    label: title_case(column),
                    data,
                })
            })
            .collect();

        Some(ChartData { labels, series })
    }
}

fn bucket_label(value: Option<&Value>) -> String {
    let Some(Value::String(text)) = value else {
        return value.map(Value::to_string).unwrap_or_default();
    };
    match Timestamp::parse(text) {
        Ok(ts) => ts.naive().format("%b %-d").to_string(),
        Err(_) => text.clone(),
    }
}

/// `total_revenue` -> `Total Revenue`
fn title_case(column: &str) -> String {
    column
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
