//! Date filtering: resolve a range, render SQL, hand it to an executor

use crate::config::AssistantConfig;
use crate::core::resolver::TimeRangeResolver;
use crate::core::temporal::{DateRange, Timestamp};
use crate::error::{Error, Result};
use crate::execution::{DemoExecutor, QueryExecutor, ResultSet};
use crate::query::builder::{GeneratedQuery, SqlTemplateBuilder};
use crate::query::granularity::Granularity;
use crate::query::table::TargetTable;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Everything needed to render one date-filtered query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterRequest {
    pub table: TargetTable,
    pub range: DateRange,
    pub granularity: Granularity,
    pub timezone_aware: bool,
}

impl FilterRequest {
    /// Request with default granularity and no timezone conversion
    pub fn new(table: TargetTable, range: DateRange) -> Self {
        Self {
            table,
            range,
            granularity: Granularity::default(),
            timezone_aware: false,
        }
    }

    /// Build a request from possibly-unset calendar bounds
    pub fn from_parts(
        table: TargetTable,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        granularity: Granularity,
        timezone_aware: bool,
    ) -> Result<Self> {
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(Error::MissingRange(
                    "select both from and to dates".to_string(),
                ))
            }
        };
        Ok(Self {
            table,
            range: DateRange::new(from, to)?,
            granularity,
            timezone_aware,
        })
    }

    /// Replace the bucket width
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Toggle the UTC-to-session-timezone conversion
    pub fn with_timezone_aware(mut self, timezone_aware: bool) -> Self {
        self.timezone_aware = timezone_aware;
        self
    }

    /// Replace the date range
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }
}

/// Date filtering front door
pub struct DateFilter {
    resolver: TimeRangeResolver,
    builder: SqlTemplateBuilder,
    executor: Arc<dyn QueryExecutor>,
}

impl DateFilter {
    /// Filter over an explicit resolver and executor
    pub fn new(resolver: TimeRangeResolver, executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            resolver,
            builder: SqlTemplateBuilder::new(),
            executor,
        }
    }

    /// Filter wired to the demo executor as configured
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(
            TimeRangeResolver::new(config.calendar.week_start),
            Arc::new(DemoExecutor::new(config.execution.delay())),
        )
    }

    /// Resolver used for presets and shifts
    pub fn resolver(&self) -> &TimeRangeResolver {
        &self.resolver
    }

    /// Render the SQL for a request
    pub fn generate(&self, request: &FilterRequest) -> GeneratedQuery {
        self.builder.build(
            request.table,
            request.range,
            request.granularity,
            request.timezone_aware,
        )
    }

    /// Execute an already generated (possibly edited) query
    pub async fn execute(&self, query: &GeneratedQuery) -> Result<ResultSet> {
        let result = self.executor.execute(query).await?;
        info!(
            table = %query.table(),
            rows = result.total_rows,
            "found {} records in the date range",
            result.total_rows
        );
        Ok(result)
    }

    /// Generate and execute in one step
    pub async fn run(&self, request: &FilterRequest) -> Result<ResultSet> {
        let query = self.generate(request);
        self.execute(&query).await
    }
}
