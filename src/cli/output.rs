//! Output formatting for CLI commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{IntentData, RunMetadata};
use crate::cli::args::{IntentifyArgs, OutputFormat};
use crate::error::Result;

/// Longest horizontal bar, in cells.
const BAR_WIDTH: usize = 40;
/// Tallest vertical column, in rows.
const COLUMN_HEIGHT: usize = 10;

const EMPTY_LABEL: &str = "(no label)";

/// Result structure for commands that change files.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResult {
    pub action: String,
    pub path: String,
}

fn display_label(label: &str) -> &str {
    if label.is_empty() { EMPTY_LABEL } else { label }
}

/// Cells of a bar for `count`, scaled so `max` fills `full`. Non-zero counts
/// always get at least one cell.
fn scaled(count: usize, max: usize, full: usize) -> usize {
    if count == 0 || max == 0 {
        0
    } else {
        (count * full).div_ceil(max).max(1)
    }
}

/// Metadata as a two-column table.
struct MetadataTable<'a>(&'a RunMetadata);

impl fmt::Display for MetadataTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metadata = self.0;
        let rows = [
            ("Intents", metadata.intents.to_string()),
            ("Calls", metadata.lines.to_string()),
            ("Unique sentences", metadata.sentences.to_string()),
            ("Granularity", metadata.granularity.to_string()),
        ];

        writeln!(f, "{:<18}{}", "Metadata", "Value")?;
        writeln!(f, "{:<18}{}", "─".repeat(16), "─".repeat(5))?;
        for (name, value) in rows {
            writeln!(f, "{name:<18}{value}")?;
        }
        Ok(())
    }
}

/// Text histogram of `(label, count)` pairs, drawn in the given order.
struct Histogram<'a> {
    counts: &'a [(&'a str, usize)],
    horizontal: bool,
}

impl Histogram<'_> {
    fn write_horizontal(&self, f: &mut fmt::Formatter<'_>, max: usize) -> fmt::Result {
        let width = self
            .counts
            .iter()
            .map(|(label, _)| display_label(label).chars().count())
            .max()
            .unwrap_or(0);

        for (label, count) in self.counts {
            let bar = "█".repeat(scaled(*count, max, BAR_WIDTH));
            writeln!(f, "{:<width$} │{bar} {count}", display_label(label))?;
        }
        Ok(())
    }

    fn write_vertical(&self, f: &mut fmt::Formatter<'_>, max: usize) -> fmt::Result {
        let heights: Vec<usize> = self
            .counts
            .iter()
            .map(|(_, count)| scaled(*count, max, COLUMN_HEIGHT))
            .collect();

        for level in (1..=COLUMN_HEIGHT).rev() {
            let row: String = heights
                .iter()
                .map(|&h| if h >= level { " ██" } else { "   " })
                .collect();
            writeln!(f, "{}", row.trim_end())?;
        }
        writeln!(f, "{}", "───".repeat(self.counts.len()))?;
        for i in 1..=self.counts.len() {
            write!(f, "{i:>3}")?;
        }
        writeln!(f)?;
        writeln!(f)?;
        for (i, (label, count)) in self.counts.iter().enumerate() {
            writeln!(f, "{:>3}. {} ({count})", i + 1, display_label(label))?;
        }
        Ok(())
    }
}

impl fmt::Display for Histogram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.counts.is_empty() {
            return writeln!(f, "No intents found.");
        }

        let max = self.counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
        if self.horizontal {
            self.write_horizontal(f, max)
        } else {
            self.write_vertical(f, max)
        }
    }
}

/// Every intent with its sentences, largest intent first.
struct IntentListing<'a>(&'a IntentData);

impl fmt::Display for IntentListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0;
        for (label, count) in data.intent_counts() {
            writeln!(f, "{} ({count} sentences)", display_label(label))?;
            for sentence in &data.intents[label] {
                writeln!(f, "  - {sentence}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Metadata as a two-column table.
pub fn format_metadata(metadata: &RunMetadata) -> String {
    MetadataTable(metadata).to_string()
}

/// Text histogram of `(label, count)` pairs, drawn in the given order.
pub fn format_histogram(counts: &[(&str, usize)], horizontal: bool) -> String {
    Histogram { counts, horizontal }.to_string()
}

/// Every intent with its sentences, largest intent first.
pub fn format_intents(data: &IntentData) -> String {
    IntentListing(data).to_string()
}

/// The full human-readable report: metadata, intent counts, intents.
pub fn format_report(data: &IntentData, horizontal: bool) -> String {
    let mut out = String::new();
    out.push_str(&format_metadata(&data.metadata));
    out.push('\n');
    out.push_str("Intent Counts:\n");
    out.push_str("══════════════\n");
    out.push_str(&format_histogram(&data.intent_counts(), horizontal));

    if !data.intents.is_empty() {
        out.push('\n');
        out.push_str("Intents:\n");
        out.push_str("════════\n");
        out.push_str(&format_intents(data));
    }
    out
}

fn output_json<T: Serialize>(result: &T, args: &IntentifyArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Output a classification run.
pub fn output_intent_data(data: &IntentData, args: &IntentifyArgs, horizontal: bool) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", format_report(data, horizontal));
            Ok(())
        }
        OutputFormat::Json => output_json(data, args),
    }
}

/// Output run metadata.
pub fn output_metadata(metadata: &RunMetadata, args: &IntentifyArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", format_metadata(metadata));
            Ok(())
        }
        OutputFormat::Json => output_json(metadata, args),
    }
}

/// Output the result of a file-changing command.
pub fn output_status(message: &str, result: &StatusResult, args: &IntentifyArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
            }
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Intents;
    use crate::cluster::Granularity;
    use crate::corpus::Corpus;

    fn sample() -> IntentData {
        let mut intents = Intents::new();
        intents.insert(
            "refund".to_string(),
            vec!["refund please".to_string(), "I want a refund".to_string()],
        );
        intents.insert("call back".to_string(), vec!["call me back".to_string()]);
        intents.insert(String::new(), vec!["!!!".to_string()]);
        IntentData::new(
            Granularity::new(16).unwrap(),
            &Corpus::from_lines(["refund please", "I want a refund", "call me back", "!!!", "!!!"]),
            intents,
        )
    }

    #[test]
    fn test_metadata_table() {
        let table = format_metadata(&sample().metadata);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[2], format!("{:<18}3", "Intents"));
        assert_eq!(lines[3], format!("{:<18}5", "Calls"));
        assert_eq!(lines[4], format!("{:<18}4", "Unique sentences"));
        assert_eq!(lines[5], format!("{:<18}16", "Granularity"));
    }

    #[test]
    fn test_horizontal_histogram() {
        let histogram = format_histogram(&[("refund", 4), ("call back", 1)], true);
        let lines: Vec<&str> = histogram.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("refund    │{} 4", "█".repeat(BAR_WIDTH)));
        assert_eq!(lines[1], format!("call back │{} 1", "█".repeat(BAR_WIDTH / 4)));
    }

    #[test]
    fn test_vertical_histogram() {
        let histogram = format_histogram(&[("refund", 2), ("call back", 1)], false);
        let lines: Vec<&str> = histogram.lines().collect();

        // Tallest column fills the top row; the half-height one starts halfway.
        assert_eq!(lines[0], " ██");
        assert_eq!(lines[COLUMN_HEIGHT / 2], " ██ ██");
        assert_eq!(lines[COLUMN_HEIGHT], "──────");
        assert_eq!(lines[COLUMN_HEIGHT + 1], "  1  2");
        assert!(histogram.contains("  1. refund (2)"));
        assert!(histogram.contains("  2. call back (1)"));
    }

    #[test]
    fn test_empty_histogram() {
        assert_eq!(format_histogram(&[], true), "No intents found.\n");
    }

    #[test]
    fn test_report_lists_largest_intent_first() {
        let report = format_report(&sample(), true);

        let refund = report.find("refund (2 sentences)").unwrap();
        let empty = report.find("(no label) (1 sentences)").unwrap();
        let call = report.find("call back (1 sentences)").unwrap();
        assert!(refund < empty && empty < call);
        assert!(report.contains("  - I want a refund"));
    }

    #[test]
    fn test_report_for_empty_run() {
        let report = format_report(&IntentData::empty(Granularity::new(16).unwrap()), false);

        let expected = format!(
            "{:<18}Value\n{:<18}{}\n{:<18}0\n{:<18}0\n{:<18}0\n{:<18}16\n\n\
             Intent Counts:\n══════════════\nNo intents found.\n",
            "Metadata",
            "─".repeat(16),
            "─".repeat(5),
            "Intents",
            "Calls",
            "Unique sentences",
            "Granularity",
        );
        assert_eq!(report, expected);
    }
}
