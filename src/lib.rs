//! SQL Assistant: time-range resolution and date-filtered SQL generation
//!
//! # Core Concepts
//!
//! - **Presets**: symbolic windows such as `last-7days` or `mtd`
//! - **Date ranges**: concrete `[from, to)` windows resolved against a reference "now"
//! - **Templates**: fixed per-table SQL shapes, optionally bucketed by granularity
//! - **Executors**: external collaborators that turn SQL into rows
//!
//! # Example
//!
//! ```
//! use sql_assistant::prelude::*;
//!
//! # fn example() -> sql_assistant::error::Result<()> {
//! let now = Timestamp::parse("2023-05-15 14:30:00")?;
//! let range = TimeRangeResolver::default().resolve(TimeRangePreset::Last7Days, now);
//!
//! let query = SqlTemplateBuilder::new().build(TargetTable::Orders, range, Granularity::Daily, false);
//! assert!(query.as_str().contains("DATE_TRUNC('day', order_date)"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod execution;
pub mod filter;
pub mod query;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::core::*;
    pub use crate::error::{Error, Result};
    pub use crate::execution::{DemoExecutor, QueryExecutor, ResultSet};
    pub use crate::filter::{DateFilter, FilterRequest};
    pub use crate::query::*;
}
