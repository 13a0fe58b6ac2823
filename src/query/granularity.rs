//! Time-bucket granularity

use crate::error::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket width for aggregated queries; `None` returns raw rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    None,
    Hourly,
    #[default]
    Daily,
    Weekly,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [Self::None, Self::Hourly, Self::Daily, Self::Weekly];

    /// `DATE_TRUNC` unit, or `None` when rows are not bucketed
    pub fn trunc_unit(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Hourly => Some("hour"),
            Self::Daily => Some("day"),
            Self::Weekly => Some("week"),
        }
    }

    /// True for every granularity except `None`
    pub fn is_bucketed(&self) -> bool {
        self.trunc_unit().is_some()
    }

    /// Lowercase token, as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| Error::Query(format!("unknown granularity '{s}'")))
    }
}
