//! Report formatters: console, JSON, and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::scoring::AtsScore;
use colored::{Color, Colorize};
use std::fmt::Write as _;

/// Formats an `AtsScore` for one output medium.
pub trait OutputFormatter {
    fn format_report(&self, report: &AtsScore) -> Result<String>;
}

pub struct ConsoleFormatter {
    pub use_colors: bool,
    pub detailed: bool,
}

pub struct JsonFormatter {
    pub pretty: bool,
}

pub struct MarkdownFormatter {
    pub include_metadata: bool,
}

/// Dispatches to the formatter matching the requested output format.
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn format(
        report: &AtsScore,
        format: OutputFormat,
        detailed: bool,
        use_colors: bool,
    ) -> Result<String> {
        match format {
            OutputFormat::Console => ConsoleFormatter {
                use_colors,
                detailed,
            }
            .format_report(report),
            OutputFormat::Json => JsonFormatter { pretty: true }.format_report(report),
            OutputFormat::Markdown => MarkdownFormatter {
                include_metadata: true,
            }
            .format_report(report),
        }
    }
}

fn score_band(score: u8) -> (&'static str, Color) {
    match score {
        80..=100 => ("Excellent", Color::Green),
        60..=79 => ("Good", Color::Cyan),
        40..=59 => ("Fair", Color::Yellow),
        _ => ("Poor", Color::Red),
    }
}

impl ConsoleFormatter {
    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AtsScore) -> Result<String> {
        let mut out = String::new();
        let (band, color) = score_band(report.overall);

        writeln!(out, "ATS Compatibility Report").ok();
        writeln!(out, "========================").ok();
        writeln!(
            out,
            "Overall: {} ({})",
            self.paint(&format!("{}/100", report.overall), color),
            band
        )
        .ok();
        writeln!(out).ok();
        writeln!(out, "  Keyword match:     {:>3}", report.subscores.keyword_match).ok();
        writeln!(out, "  Title match:       {:>3}", report.subscores.title_match).ok();
        writeln!(out, "  Skills match:      {:>3}", report.subscores.skills_match).ok();
        writeln!(
            out,
            "  Format compliance: {:>3}",
            report.subscores.format_compliance
        )
        .ok();

        let matched_cap = if self.detailed {
            report.matched_keywords.len()
        } else {
            10
        };
        if !report.matched_keywords.is_empty() {
            writeln!(out).ok();
            writeln!(
                out,
                "Matched keywords: {}",
                report
                    .matched_keywords
                    .iter()
                    .take(matched_cap)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            )
            .ok();
        }
        if !report.missing_keywords.is_empty() {
            writeln!(
                out,
                "Missing keywords: {}",
                self.paint(&report.missing_keywords.join(", "), Color::Yellow)
            )
            .ok();
        }

        if !report.suggestions.is_empty() {
            writeln!(out).ok();
            writeln!(out, "Suggestions:").ok();
            for (i, suggestion) in report.suggestions.iter().enumerate() {
                writeln!(out, "  {}. {}", i + 1, suggestion).ok();
            }
        }

        Ok(out)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AtsScore) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AtsScore) -> Result<String> {
        let mut out = String::new();
        let (band, _) = score_band(report.overall);

        writeln!(out, "# ATS Compatibility Report").ok();
        if self.include_metadata {
            writeln!(
                out,
                "\n_Generated: {}_",
                chrono::Local::now().format("%Y-%m-%d %H:%M")
            )
            .ok();
        }
        writeln!(out, "\n**Overall: {}/100 ({band})**", report.overall).ok();
        writeln!(out, "\n| Sub-score | Value |").ok();
        writeln!(out, "|---|---|").ok();
        writeln!(out, "| Keyword match | {} |", report.subscores.keyword_match).ok();
        writeln!(out, "| Title match | {} |", report.subscores.title_match).ok();
        writeln!(out, "| Skills match | {} |", report.subscores.skills_match).ok();
        writeln!(
            out,
            "| Format compliance | {} |",
            report.subscores.format_compliance
        )
        .ok();

        if !report.matched_keywords.is_empty() {
            writeln!(out, "\n## Matched keywords\n").ok();
            for keyword in &report.matched_keywords {
                writeln!(out, "- {keyword}").ok();
            }
        }
        if !report.missing_keywords.is_empty() {
            writeln!(out, "\n## Missing keywords\n").ok();
            for keyword in &report.missing_keywords {
                writeln!(out, "- {keyword}").ok();
            }
        }
        if !report.suggestions.is_empty() {
            writeln!(out, "\n## Suggestions\n").ok();
            for suggestion in &report.suggestions {
                writeln!(out, "- {suggestion}").ok();
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::scorer::Subscores;

    fn sample_report() -> AtsScore {
        AtsScore {
            overall: 72,
            subscores: Subscores {
                keyword_match: 75,
                title_match: 100,
                skills_match: 67,
                format_compliance: 90,
            },
            matched_keywords: vec!["python".to_string(), "postgresql".to_string()],
            missing_keywords: vec!["kubernetes".to_string()],
            suggestions: vec![
                "Add a professional summary.".to_string(),
                "Consider adding experience with kubernetes.".to_string(),
            ],
        }
    }

    #[test]
    fn test_console_output_lists_scores_and_suggestions() {
        let formatter = ConsoleFormatter {
            use_colors: false,
            detailed: false,
        };
        let text = formatter.format_report(&sample_report()).unwrap();
        assert!(text.contains("Overall: 72/100 (Good)"));
        assert!(text.contains("Keyword match:      75"));
        assert!(text.contains("kubernetes"));
        assert!(text.contains("1. Add a professional summary."));
    }

    #[test]
    fn test_json_output_round_trips() {
        let formatter = JsonFormatter { pretty: false };
        let json = formatter.format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["overall"], 72);
        assert_eq!(value["subscores"]["keyword_match"], 75);
        assert_eq!(value["missing_keywords"][0], "kubernetes");
    }

    #[test]
    fn test_markdown_output_has_score_table() {
        let formatter = MarkdownFormatter {
            include_metadata: false,
        };
        let md = formatter.format_report(&sample_report()).unwrap();
        assert!(md.starts_with("# ATS Compatibility Report"));
        assert!(md.contains("| Keyword match | 75 |"));
        assert!(md.contains("- kubernetes"));
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(score_band(85).0, "Excellent");
        assert_eq!(score_band(60).0, "Good");
        assert_eq!(score_band(40).0, "Fair");
        assert_eq!(score_band(10).0, "Poor");
    }
}
