//! Plain-text rendering for CLI output

use crate::core::preset::{PresetTier, TimeRangePreset};
use crate::core::temporal::{DateRange, RangeFormat};
use crate::execution::ResultSet;
use tabled::{builder::Builder, settings::Style};

/// One line per preset: token, tier, label
pub fn render_presets() -> String {
    TimeRangePreset::ALL
        .iter()
        .map(|preset| {
            let tier = match preset.tier() {
                PresetTier::RealTime => "real-time",
                PresetTier::Relative => "relative",
                PresetTier::FixedLookback => "fixed",
            };
            format!("{:<12} {:<10} {}", preset.token(), tier, preset.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Range bounds plus the human summary
pub fn render_range(range: &DateRange) -> String {
    format!(
        "from: {}\nto:   {}\n{}",
        range.from(),
        range.to(),
        range.summary(RangeFormat::Minutes)
    )
}

/// Result table followed by a row count footer
pub fn render_result(result: &ResultSet) -> String {
    let mut builder = Builder::default();
    builder.push_record(result.columns.clone());
    for row in 0..result.rows.len() {
        builder.push_record(
            result
                .columns
                .iter()
                .map(|column| result.cell(row, column))
                .collect::<Vec<_>>(),
        );
    }

    let mut table = builder.build();
    table.with(Style::psql());

    format!(
        "{table}\n({} rows, {:.3}s)",
        result.total_rows,
        result.elapsed.as_secs_f64()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::temporal::Timestamp;
    use serde_json::json;

    #[test]
    fn test_render_presets_lists_all_tokens() {
        let text = render_presets();
        assert_eq!(text.lines().count(), TimeRangePreset::ALL.len());
        assert!(text.contains("last-7days   fixed      Last 7 days"));
    }

    #[test]
    fn test_render_range() {
        let range = DateRange::new(
            Timestamp::parse("2023-05-15 13:30:00").unwrap(),
            Timestamp::parse("2023-05-15 14:30:00").unwrap(),
        )
        .unwrap();
        let text = render_range(&range);
        assert!(text.starts_with("from: 2023-05-15 13:30:00\nto:   2023-05-15 14:30:00\n"));
        assert!(text.ends_with("From May 15, 2023 13:30 to May 15, 2023 14:30"));
    }

    #[test]
    fn test_render_result_table_and_footer() {
        let row = match json!({"name": "johndoe", "n": 5}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let result = ResultSet::new(vec!["name".into(), "n".into()], vec![row]);
        let text = render_result(&result);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("name") && lines[0].contains('n'));
        assert!(lines[1].starts_with('-'));
        assert!(lines[2].contains("johndoe") && lines[2].contains('5'));
        assert_eq!(lines[3], "(1 rows, 0.000s)");
    }
}
