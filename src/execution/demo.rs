//! Demonstration executor returning fixed sample data

use crate::error::{Error, Result};
use crate::execution::result::{ResultSet, Row};
use crate::execution::QueryExecutor;
use crate::query::builder::GeneratedQuery;
use crate::query::table::TargetTable;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::info;

/// Artificial latency applied before answering
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Executor that never touches a database.
///
/// After a fixed delay it answers with canned rows chosen by the query's
/// table and whether it is bucketed.
#[derive(Debug, Clone)]
pub struct DemoExecutor {
    delay: Duration,
}

impl DemoExecutor {
    /// Executor that waits `delay` before every answer
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Configured artificial latency
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for DemoExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl QueryExecutor for DemoExecutor {
    async fn execute(&self, query: &GeneratedQuery) -> Result<ResultSet> {
        if query.as_str().trim().is_empty() {
            return Err(Error::Query("no SQL query".to_string()));
        }

        let started = Instant::now();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = sample_result(query.table(), query.granularity().is_bucketed())
            .with_elapsed(started.elapsed());
        info!(
            table = %query.table(),
            rows = result.total_rows,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "demo query executed"
        );
        Ok(result)
    }
}

fn table_result(columns: &[&str], rows: Vec<Value>) -> ResultSet {
    let rows: Vec<Row> = rows
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();
    ResultSet::new(columns.iter().map(|c| c.to_string()).collect(), rows)
}

fn sample_result(table: TargetTable, bucketed: bool) -> ResultSet {
    match (table, bucketed) {
        (TargetTable::Orders, true) => table_result(
            &["time_bucket", "order_count", "total_revenue"],
            vec![
                json!({"time_bucket": "2023-05-01 00:00:00", "order_count": 125, "total_revenue": 12599.99}),
                json!({"time_bucket": "2023-05-02 00:00:00", "order_count": 142, "total_revenue": 15789.5}),
                json!({"time_bucket": "2023-05-03 00:00:00", "order_count": 98, "total_revenue": 9845.75}),
                json!({"time_bucket": "2023-05-04 00:00:00", "order_count": 110, "total_revenue": 11250.25}),
                json!({"time_bucket": "2023-05-05 00:00:00", "order_count": 135, "total_revenue": 13750.0}),
            ],
        ),
        (TargetTable::Orders, false) => table_result(
            &["timestamp", "order_id", "customer_id", "total_amount", "status"],
            vec![
                json!({"timestamp": "2023-05-15 14:30:00", "order_id": 1001, "customer_id": 5, "total_amount": 125.99, "status": "Delivered"}),
                json!({"timestamp": "2023-05-14 10:15:00", "order_id": 1002, "customer_id": 8, "total_amount": 79.5, "status": "Shipped"}),
                json!({"timestamp": "2023-05-12 16:45:00", "order_id": 1003, "customer_id": 12, "total_amount": 249.99, "status": "Processing"}),
                json!({"timestamp": "2023-05-10 09:20:00", "order_id": 1004, "customer_id": 3, "total_amount": 34.25, "status": "Delivered"}),
                json!({"timestamp": "2023-05-08 11:10:00", "order_id": 1005, "customer_id": 7, "total_amount": 189.0, "status": "Delivered"}),
            ],
        ),
        (TargetTable::Users, true) => table_result(
            &["time_bucket", "new_users"],
            vec![
                json!({"time_bucket": "2023-05-01 00:00:00", "new_users": 45}),
                json!({"time_bucket": "2023-05-02 00:00:00", "new_users": 52}),
                json!({"time_bucket": "2023-05-03 00:00:00", "new_users": 38}),
                json!({"time_bucket": "2023-05-04 00:00:00", "new_users": 41}),
                json!({"time_bucket": "2023-05-05 00:00:00", "new_users": 49}),
            ],
        ),
        (TargetTable::Users, false) => table_result(
            &["timestamp", "user_id", "username", "email"],
            vec![
                json!({"timestamp": "2023-05-15 08:30:00", "user_id": 101, "username": "johndoe", "email": "john@example.com"}),
                json!({"timestamp": "2023-05-12 14:45:00", "user_id": 102, "username": "janedoe", "email": "jane@example.com"}),
                json!({"timestamp": "2023-05-10 11:20:00", "user_id": 103, "username": "bobsmith", "email": "bob@example.com"}),
                json!({"timestamp": "2023-05-08 09:15:00", "user_id": 104, "username": "alicejones", "email": "alice@example.com"}),
                json!({"timestamp": "2023-05-05 16:30:00", "user_id": 105, "username": "mikebrown", "email": "mike@example.com"}),
            ],
        ),
        (TargetTable::Posts, true) => table_result(
            &["time_bucket", "post_count", "unique_authors"],
            vec![
                json!({"time_bucket": "2023-05-01 00:00:00", "post_count": 28, "unique_authors": 15}),
                json!({"time_bucket": "2023-05-02 00:00:00", "post_count": 32, "unique_authors": 18}),
                json!({"time_bucket": "2023-05-03 00:00:00", "post_count": 25, "unique_authors": 14}),
                json!({"time_bucket": "2023-05-04 00:00:00", "post_count": 30, "unique_authors": 17}),
                json!({"time_bucket": "2023-05-05 00:00:00", "post_count": 35, "unique_authors": 20}),
            ],
        ),
        (TargetTable::Posts, false) => table_result(
            &["timestamp", "post_id", "user_id", "title"],
            vec![
                json!({"timestamp": "2023-05-15 10:30:00", "post_id": 201, "user_id": 101, "title": "Getting Started with SQL"}),
                json!({"timestamp": "2023-05-14 15:45:00", "post_id": 202, "user_id": 102, "title": "Advanced SQL Techniques"}),
                json!({"timestamp": "2023-05-12 11:20:00", "post_id": 203, "user_id": 101, "title": "Data Analysis with SQL"}),
                json!({"timestamp": "2023-05-10 09:15:00", "post_id": 204, "user_id": 103, "title": "SQL Best Practices"}),
                json!({"timestamp": "2023-05-08 16:30:00", "post_id": 205, "user_id": 102, "title": "SQL vs NoSQL"}),
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::temporal::{DateRange, Timestamp};
    use crate::query::builder::SqlTemplateBuilder;
    use crate::query::granularity::Granularity;

    fn query(table: TargetTable, granularity: Granularity) -> GeneratedQuery {
        let range = DateRange::new(
            Timestamp::parse("2023-05-01").unwrap(),
            Timestamp::parse("2023-05-05").unwrap(),
        )
        .unwrap();
        SqlTemplateBuilder::new().build(table, range, granularity, false)
    }

    #[tokio::test]
    async fn test_bucketed_results_match_query_shape() {
        let executor = DemoExecutor::new(Duration::ZERO);

        for table in TargetTable::ALL {
            let result = executor.execute(&query(table, Granularity::Daily)).await.unwrap();
            assert_eq!(result.columns[0], "time_bucket");
            assert_eq!(result.total_rows, 5);
            assert!(result.chart().is_some());
        }
    }

    #[tokio::test]
    async fn test_raw_results_have_timestamp_column() {
        let executor = DemoExecutor::new(Duration::ZERO);
        let result = executor
            .execute(&query(TargetTable::Users, Granularity::None))
            .await
            .unwrap();

        assert_eq!(result.columns, vec!["timestamp", "user_id", "username", "email"]);
        assert_eq!(result.cell(0, "username"), "johndoe");
        assert!(result.chart().is_none());
    }

    #[tokio::test]
    async fn test_rows_keep_column_order() {
        let executor = DemoExecutor::new(Duration::ZERO);
        let result = executor
            .execute(&query(TargetTable::Orders, Granularity::None))
            .await
            .unwrap();
        let keys: Vec<&str> = result.rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, result.columns.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_empty_sql_is_rejected() {
        let executor = DemoExecutor::new(Duration::ZERO);
        let blank = query(TargetTable::Posts, Granularity::Weekly).edited("   ");
        let err = executor.execute(&blank).await.unwrap_err();
        assert!(matches!(err, Error::Query(_)));
    }

    #[tokio::test]
    async fn test_delay_is_applied() {
        assert_eq!(DemoExecutor::default().delay(), DEFAULT_DELAY);

        let executor = DemoExecutor::new(Duration::from_millis(20));
        let result = executor
            .execute(&query(TargetTable::Orders, Granularity::Hourly))
            .await
            .unwrap();
        assert!(result.elapsed >= Duration::from_millis(20));
    }
}
