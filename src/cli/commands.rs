//! CLI commands

use crate::config::{AssistantConfig, CONFIG_ENV};
use crate::core::resolver::TimeRangeResolver;
use crate::core::temporal::{DateRange, Direction, Timestamp};
use crate::error::{Error, Result};
use crate::filter::FilterRequest;
use crate::query::granularity::Granularity;
use crate::query::table::TargetTable;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// SQL Assistant CLI
#[derive(Parser)]
#[command(name = "sql-assistant")]
#[command(about = "Resolve time ranges and generate date-filtered SQL")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available time range presets
    Presets,
    /// Resolve a preset to a concrete range
    Resolve {
        /// Preset token (e.g. last-7days, mtd, 1hr)
        #[arg(short, long)]
        preset: String,
        /// Reference time instead of the current time
        #[arg(long)]
        now: Option<String>,
        /// Move the range by its own span (repeatable)
        #[arg(long, value_enum)]
        shift: Vec<Direction>,
    },
    /// Print date-filtered SQL
    Generate(FilterArgs),
    /// Generate SQL and run it against the demo executor
    Execute(FilterArgs),
}

/// Inputs shared by `generate` and `execute`
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Table to query
    #[arg(short, long, value_enum)]
    pub table: Option<TargetTable>,
    /// Preset token; applied on top of --from/--to
    #[arg(short, long)]
    pub preset: Option<String>,
    /// Range start
    #[arg(long)]
    pub from: Option<String>,
    /// Range end
    #[arg(long)]
    pub to: Option<String>,
    /// Reference time for presets
    #[arg(long)]
    pub now: Option<String>,
    /// Bucket width
    #[arg(short, long, value_enum)]
    pub granularity: Option<Granularity>,
    /// Convert the time column from UTC to the session timezone
    #[arg(long)]
    pub timezone_aware: bool,
    /// Move the range by its own span (repeatable)
    #[arg(long, value_enum)]
    pub shift: Vec<Direction>,
}

/// Parse `--now`, falling back to the configured reference clock
pub fn reference_time(now: Option<&str>, config: &AssistantConfig) -> Result<Timestamp> {
    match now {
        Some(text) => Timestamp::parse(text),
        None => Ok(config.calendar.now()),
    }
}

fn apply_shifts(resolver: &TimeRangeResolver, range: DateRange, shifts: &[Direction]) -> DateRange {
    shifts
        .iter()
        .fold(range, |range, direction| resolver.shift(range, *direction))
}

impl FilterArgs {
    /// Turn command-line input into a request.
    ///
    /// Manual bounds come first; a recognized preset replaces them and an
    /// unrecognized one leaves them as they are.
    pub fn to_request(
        &self,
        config: &AssistantConfig,
        resolver: &TimeRangeResolver,
    ) -> Result<FilterRequest> {
        let from = self.from.as_deref().map(Timestamp::parse).transpose()?;
        let to = self.to.as_deref().map(Timestamp::parse).transpose()?;
        let table = self.table.unwrap_or(config.defaults.table);
        let granularity = self.granularity.unwrap_or(config.defaults.granularity);
        let timezone_aware = self.timezone_aware || config.defaults.timezone_aware;

        let now = match &self.preset {
            Some(_) => Some(reference_time(self.now.as_deref(), config)?),
            None => None,
        };
        // Manual bounds are only validated when no known preset replaces them
        let manual = match (from, to) {
            (Some(from), Some(to)) => DateRange::new(from, to).ok(),
            _ => None,
        };
        let resolved = match (&self.preset, now) {
            (Some(token), Some(now)) => resolver.resolve_token(token, now, manual),
            _ => None,
        };

        let request = match resolved {
            Some(range) => FilterRequest::new(table, range)
                .with_granularity(granularity)
                .with_timezone_aware(timezone_aware),
            None => FilterRequest::from_parts(table, from, to, granularity, timezone_aware)?,
        };

        let range = apply_shifts(resolver, request.range, &self.shift);
        Ok(request.with_range(range))
    }
}

/// Resolve `resolve` subcommand input
pub fn resolve_preset(
    preset: &str,
    now: Option<&str>,
    shifts: &[Direction],
    config: &AssistantConfig,
    resolver: &TimeRangeResolver,
) -> Result<DateRange> {
    let now = reference_time(now, config)?;
    let range = resolver.resolve(preset.parse()?, now);
    Ok(apply_shifts(resolver, range, shifts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(text: &str) -> Timestamp {
        Timestamp::parse(text).unwrap()
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "sql-assistant",
            "generate",
            "--table",
            "posts",
            "--preset",
            "last-7days",
            "--granularity",
            "weekly",
            "--timezone-aware",
            "--shift",
            "backward",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.table, Some(TargetTable::Posts));
        assert_eq!(args.granularity, Some(Granularity::Weekly));
        assert!(args.timezone_aware);
        assert_eq!(args.shift, vec![Direction::Backward]);
    }

    #[test]
    fn test_manual_range_with_defaults() {
        let args = FilterArgs {
            from: Some("2023-05-01".into()),
            to: Some("2023-05-05".into()),
            ..Default::default()
        };
        let request = args
            .to_request(&AssistantConfig::default(), &TimeRangeResolver::default())
            .unwrap();

        assert_eq!(request.table, TargetTable::Orders);
        assert_eq!(request.granularity, Granularity::Daily);
        assert_eq!(request.range.from(), ts("2023-05-01"));
    }

    #[test]
    fn test_missing_bounds_without_preset() {
        let args = FilterArgs {
            from: Some("2023-05-01".into()),
            ..Default::default()
        };
        let err = args
            .to_request(&AssistantConfig::default(), &TimeRangeResolver::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingRange(_)));
    }

    #[test]
    fn test_preset_overrides_manual_bounds() {
        let args = FilterArgs {
            preset: Some("today".into()),
            now: Some("2023-05-15 14:30:00".into()),
            from: Some("2023-01-01".into()),
            to: Some("2023-02-01".into()),
            ..Default::default()
        };
        let request = args
            .to_request(&AssistantConfig::default(), &TimeRangeResolver::default())
            .unwrap();
        assert_eq!(request.range.from(), ts("2023-05-15"));
        assert_eq!(request.range.to(), ts("2023-05-15 14:30:00"));
    }

    #[test]
    fn test_unknown_preset_keeps_manual_bounds() {
        let args = FilterArgs {
            preset: Some("fortnight".into()),
            now: Some("2023-05-15 14:30:00".into()),
            from: Some("2023-01-01".into()),
            to: Some("2023-02-01".into()),
            ..Default::default()
        };
        let request = args
            .to_request(&AssistantConfig::default(), &TimeRangeResolver::default())
            .unwrap();
        assert_eq!(request.range.from(), ts("2023-01-01"));

        let args = FilterArgs {
            preset: Some("fortnight".into()),
            now: Some("2023-05-15 14:30:00".into()),
            ..Default::default()
        };
        assert!(args
            .to_request(&AssistantConfig::default(), &TimeRangeResolver::default())
            .is_err());
    }

    #[test]
    fn test_known_preset_ignores_inverted_manual_bounds() {
        let args = FilterArgs {
            preset: Some("today".into()),
            now: Some("2023-05-15 14:30:00".into()),
            from: Some("2023-05-05".into()),
            to: Some("2023-05-01".into()),
            ..Default::default()
        };
        let request = args
            .to_request(&AssistantConfig::default(), &TimeRangeResolver::default())
            .unwrap();
        assert_eq!(request.range.from(), ts("2023-05-15"));

        let args = FilterArgs {
            preset: Some("fortnight".into()),
            ..args
        };
        let err = args
            .to_request(&AssistantConfig::default(), &TimeRangeResolver::default())
            .unwrap_err();
        assert!(matches!(err, Error::Temporal(_)));
    }

    #[test]
    fn test_shifts_apply_in_order() {
        let args = FilterArgs {
            from: Some("2023-05-01".into()),
            to: Some("2023-05-05".into()),
            shift: vec![Direction::Backward, Direction::Backward, Direction::Forward],
            ..Default::default()
        };
        let request = args
            .to_request(&AssistantConfig::default(), &TimeRangeResolver::default())
            .unwrap();
        assert_eq!(request.range.from(), ts("2023-04-27"));
        assert_eq!(request.range.to(), ts("2023-05-01"));
    }

    #[test]
    fn test_resolve_preset_rejects_unknown_token() {
        let config = AssistantConfig::default();
        let resolver = TimeRangeResolver::default();
        assert!(resolve_preset("bogus", Some("2023-05-15"), &[], &config, &resolver).is_err());

        let range = resolve_preset("ytd", Some("2023-05-15 14:30:00"), &[], &config, &resolver).unwrap();
        assert_eq!(range.from(), ts("2023-01-01"));
    }
}
