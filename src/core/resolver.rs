//! Preset resolution: symbolic tokens to concrete date ranges

use crate::core::preset::TimeRangePreset;
use crate::core::temporal::{DateRange, Direction, Timestamp, WeekStart};
use tracing::{debug, warn};

/// Maps presets and a reference "now" to concrete `[from, to)` ranges.
///
/// Stateless apart from the week-start convention; safe to share across
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeRangeResolver {
    week_start: WeekStart,
}

impl TimeRangeResolver {
    /// Resolver whose week-to-date preset starts on `week_start`
    pub fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    /// First day of the week for week-to-date
    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Resolve a preset against `now`. The range always ends at `now`.
    pub fn resolve(&self, preset: TimeRangePreset, now: Timestamp) -> DateRange {
        let from = match preset {
            TimeRangePreset::Today => now.start_of_day(),
            TimeRangePreset::WeekToDate => now.start_of_week(self.week_start),
            TimeRangePreset::MonthToDate => now.start_of_month(),
            TimeRangePreset::YearToDate => now.start_of_year(),
            _ => preset.lookback().map_or(now, |duration| now.sub(duration)),
        };
        let range = DateRange::from_bounds(from, now);
        debug!(preset = %preset, from = %range.from(), to = %range.to(), "resolved time range preset");
        range
    }

    /// Resolve a raw preset token.
    ///
    /// Unrecognized tokens keep `current` unchanged, which is also what
    /// manual calendar selection looks like to the caller.
    pub fn resolve_token(
        &self,
        token: &str,
        now: Timestamp,
        current: Option<DateRange>,
    ) -> Option<DateRange> {
        match token.parse::<TimeRangePreset>() {
            Ok(preset) => Some(self.resolve(preset, now)),
            Err(_) => {
                warn!(token, "ignoring unknown time range preset");
                current
            }
        }
    }

    /// Previous/next period navigation
    pub fn shift(&self, range: DateRange, direction: Direction) -> DateRange {
        range.shift(direction)
    }
}
