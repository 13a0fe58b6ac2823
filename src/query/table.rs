//! Target tables and their fixed query shapes

use crate::error::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Table a date-filtered query can target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetTable {
    #[default]
    Orders,
    Users,
    Posts,
}

/// Fixed description of how a table is filtered and aggregated
#[derive(Debug)]
pub struct TableShape {
    pub table: TargetTable,
    /// SQL identifier of the table
    pub name: &'static str,
    /// Column compared against the date range
    pub time_column: &'static str,
    /// Aggregate projections, already aliased
    pub aggregates: &'static [&'static str],
}

/// One entry per `TargetTable`, indexed by discriminant.
/// Adding a table means adding a variant and a row here.
static TABLE_SHAPES: [TableShape; 3] = [
    TableShape {
        table: TargetTable::Orders,
        name: "orders",
        time_column: "order_date",
        aggregates: &["COUNT(*) AS order_count", "SUM(total_amount) AS total_revenue"],
    },
    TableShape {
        table: TargetTable::Users,
        name: "users",
        time_column: "created_at",
        aggregates: &["COUNT(*) AS new_users"],
    },
    TableShape {
        table: TargetTable::Posts,
        name: "posts",
        time_column: "published_at",
        aggregates: &["COUNT(*) AS post_count", "COUNT(DISTINCT user_id) AS unique_authors"],
    },
];

impl TargetTable {
    pub const ALL: [TargetTable; 3] = [Self::Orders, Self::Users, Self::Posts];

    /// Query shape for this table
    pub fn shape(&self) -> &'static TableShape {
        &TABLE_SHAPES[*self as usize]
    }

    /// Table name in the `FROM` clause
    pub fn name(&self) -> &'static str {
        self.shape().name
    }

    /// Column the date filter applies to
    pub fn time_column(&self) -> &'static str {
        self.shape().time_column
    }
}

impl fmt::Display for TargetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|table| table.name() == s)
            .ok_or_else(|| Error::Query(format!("unknown table '{s}'")))
    }
}
