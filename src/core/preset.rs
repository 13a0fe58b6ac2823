//! Symbolic time-range presets

use crate::error::{Error, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Group a preset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetTier {
    /// Short sliding windows ending now
    RealTime,
    /// From the start of the current calendar unit until now
    Relative,
    /// Longer sliding windows ending now
    FixedLookback,
}

/// Symbolic shorthand for a time window relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRangePreset {
    #[serde(rename = "30sec")]
    Last30Seconds,
    #[serde(rename = "1min")]
    LastMinute,
    #[serde(rename = "5min")]
    Last5Minutes,
    #[serde(rename = "30min")]
    Last30Minutes,
    #[serde(rename = "1hr")]
    LastHour,
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "wtd")]
    WeekToDate,
    #[serde(rename = "mtd")]
    MonthToDate,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "last-15min")]
    Last15Minutes,
    #[serde(rename = "last-24hr")]
    Last24Hours,
    #[serde(rename = "last-7days")]
    Last7Days,
    #[serde(rename = "last-30days")]
    Last30Days,
}

impl TimeRangePreset {
    /// Every preset, in display order
    pub const ALL: [TimeRangePreset; 13] = [
        Self::Last30Seconds,
        Self::LastMinute,
        Self::Last5Minutes,
        Self::Last30Minutes,
        Self::LastHour,
        Self::Today,
        Self::WeekToDate,
        Self::MonthToDate,
        Self::YearToDate,
        Self::Last15Minutes,
        Self::Last24Hours,
        Self::Last7Days,
        Self::Last30Days,
    ];

    /// Wire token, e.g. `last-7days`
    pub fn token(&self) -> &'static str {
        match self {
            Self::Last30Seconds => "30sec",
            Self::LastMinute => "1min",
            Self::Last5Minutes => "5min",
            Self::Last30Minutes => "30min",
            Self::LastHour => "1hr",
            Self::Today => "today",
            Self::WeekToDate => "wtd",
            Self::MonthToDate => "mtd",
            Self::YearToDate => "ytd",
            Self::Last15Minutes => "last-15min",
            Self::Last24Hours => "last-24hr",
            Self::Last7Days => "last-7days",
            Self::Last30Days => "last-30days",
        }
    }

    /// Label shown next to the preset button
    pub fn label(&self) -> &'static str {
        match self {
            Self::Last30Seconds => "30s",
            Self::LastMinute => "1m",
            Self::Last5Minutes => "5m",
            Self::Last30Minutes => "30m",
            Self::LastHour => "1h",
            Self::Today => "Today",
            Self::WeekToDate => "Week to date",
            Self::MonthToDate => "Month to date",
            Self::YearToDate => "Year to date",
            Self::Last15Minutes => "Last 15 min",
            Self::Last24Hours => "Last 24 hours",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
        }
    }

    /// Resolution rule the preset belongs to
    pub fn tier(&self) -> PresetTier {
        match self {
            Self::Last30Seconds
            | Self::LastMinute
            | Self::Last5Minutes
            | Self::Last30Minutes
            | Self::LastHour => PresetTier::RealTime,
            Self::Today | Self::WeekToDate | Self::MonthToDate | Self::YearToDate => {
                PresetTier::Relative
            }
            Self::Last15Minutes | Self::Last24Hours | Self::Last7Days | Self::Last30Days => {
                PresetTier::FixedLookback
            }
        }
    }

    /// Fixed window length, or `None` for calendar-aligned presets
    pub fn lookback(&self) -> Option<Duration> {
        let duration = match self {
            Self::Last30Seconds => Duration::seconds(30),
            Self::LastMinute => Duration::minutes(1),
            Self::Last5Minutes => Duration::minutes(5),
            Self::Last30Minutes => Duration::minutes(30),
            Self::LastHour => Duration::hours(1),
            Self::Last15Minutes => Duration::minutes(15),
            Self::Last24Hours => Duration::hours(24),
            Self::Last7Days => Duration::days(7),
            Self::Last30Days => Duration::days(30),
            Self::Today | Self::WeekToDate | Self::MonthToDate | Self::YearToDate => return None,
        };
        Some(duration)
    }
}

impl fmt::Display for TimeRangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for TimeRangePreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.token() == s)
            .ok_or_else(|| Error::Temporal(format!("unknown time range preset '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_round_trip_through_from_str() {
        for preset in TimeRangePreset::ALL {
            assert_eq!(preset.token().parse::<TimeRangePreset>().unwrap(), preset);
        }
        assert!("last-90days".parse::<TimeRangePreset>().is_err());
        assert!("".parse::<TimeRangePreset>().is_err());
    }

    #[test]
    fn test_serde_uses_tokens() {
        let json = serde_json::to_string(&TimeRangePreset::Last7Days).unwrap();
        assert_eq!(json, "\"last-7days\"");
        let back: TimeRangePreset = serde_json::from_str("\"30sec\"").unwrap();
        assert_eq!(back, TimeRangePreset::Last30Seconds);
    }

    #[test]
    fn test_only_relative_presets_lack_lookback() {
        for preset in TimeRangePreset::ALL {
            let relative = preset.tier() == PresetTier::Relative;
            assert_eq!(preset.lookback().is_none(), relative, "{preset}");
        }
    }

    #[test]
    fn test_tier_sizes() {
        let count = |tier| TimeRangePreset::ALL.iter().filter(|p| p.tier() == tier).count();
        assert_eq!(count(PresetTier::RealTime), 5);
        assert_eq!(count(PresetTier::Relative), 4);
        assert_eq!(count(PresetTier::FixedLookback), 4);
    }
}
