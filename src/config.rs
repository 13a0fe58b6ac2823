//! Configuration loaded from TOML.
//!
//! Every section and field is optional; a missing file means defaults.
//!
//! ```toml
//! [defaults]
//! table = "orders"
//! granularity = "daily"
//! timezone_aware = false
//!
//! [calendar]
//! week_start = "monday"
//! utc_offset_minutes = 120
//!
//! [execution]
//! delay_ms = 250
//! ```

use crate::core::temporal::{Timestamp, WeekStart};
use crate::error::{Error, Result};
use crate::execution::DEFAULT_DELAY;
use crate::query::granularity::Granularity;
use crate::query::table::TargetTable;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "SQL_ASSISTANT_CONFIG";

const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub defaults: QueryDefaults,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Values used when the command line leaves them unset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDefaults {
    #[serde(default)]
    pub table: TargetTable,
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default)]
    pub timezone_aware: bool,
}

/// Reference timezone and week convention for preset resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub week_start: WeekStart,
    /// Fixed offset east of UTC; the host's local offset when unset
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl CalendarConfig {
    /// Configured reference offset; `None` means the host local offset
    pub fn offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
    }

    /// "Now" in the reference timezone
    pub fn now(&self) -> Timestamp {
        match self.offset() {
            Some(offset) => Timestamp::now_in(offset),
            None => Timestamp::now_local(),
        }
    }
}

/// Demo executor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY.as_millis() as u64
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

impl ExecutionConfig {
    /// Demo executor latency
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl AssistantConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject UTC offsets of a full day or more
    pub fn validate(&self) -> Result<()> {
        if let Some(minutes) = self.calendar.utc_offset_minutes {
            if minutes.abs() > MAX_OFFSET_MINUTES {
                return Err(Error::Configuration(format!(
                    "utc_offset_minutes {minutes} is outside ±{MAX_OFFSET_MINUTES}"
                )));
            }
        }
        Ok(())
    }
}
