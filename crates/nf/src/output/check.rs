//! Check report formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::commands::check::CheckReport;

/// JSON output structure for the check command.
#[derive(Serialize)]
pub struct CheckOutput<'a> {
    pub valid: bool,
    pub query: &'a str,
    pub canonical: &'a str,
    pub attributes: Vec<AttributeOutput<'a>>,
    pub pattern_errors: &'a [String],
}

/// JSON output structure for a referenced attribute.
#[derive(Serialize)]
pub struct AttributeOutput<'a> {
    pub name: &'a str,
    pub known: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'a str>,
}

/// Formats a check report as JSON.
pub fn format_check_json(report: &CheckReport) -> Result<String, serde_json::Error> {
    let output = CheckOutput {
        valid: true,
        query: &report.query,
        canonical: &report.canonical,
        attributes: report
            .attributes
            .iter()
            .map(|a| AttributeOutput {
                name: &a.name,
                known: a.known,
                suggestion: a.suggestion,
            })
            .collect(),
        pattern_errors: &report.pattern_errors,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a check report for the terminal.
pub fn format_check_table(report: &CheckReport, use_colors: bool) -> String {
    let mut output = String::new();

    let status = "Valid filter";
    if use_colors {
        output.push_str(&format!("{}\n", status.green().bold()));
    } else {
        output.push_str(status);
        output.push('\n');
    }
    output.push_str(&format!("Parsed as: {}\n", report.canonical));

    output.push_str("Attributes:\n");
    for attr in &report.attributes {
        let line = match (attr.known, attr.suggestion) {
            (true, _) => format!("  {}", attr.name),
            (false, Some(suggestion)) => {
                format!("  {} (unknown, did you mean '{}'?)", attr.name, suggestion)
            }
            (false, None) => format!("  {} (unknown)", attr.name),
        };
        if use_colors && !attr.known {
            output.push_str(&format!("{}\n", line.yellow()));
        } else {
            output.push_str(&line);
            output.push('\n');
        }
    }

    for err in &report.pattern_errors {
        let line = format!("Warning: {err}; this comparison is always false");
        if use_colors {
            output.push_str(&format!("{}\n", line.yellow()));
        } else {
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}
