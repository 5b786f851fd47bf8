//! # Output Rendering
//!
//! Every subcommand builds a serializable report; the global `--format` flag
//! picks between the human text form and pretty-printed JSON.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Output format selected by `--format`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Line-oriented text.
    #[default]
    Text,
    /// Pretty-printed JSON. Non-finite numbers become `null`.
    Json,
}

/// A report that knows how to print itself as text.
pub trait Report: Serialize {
    /// Text lines for the `text` format.
    fn text_lines(&self) -> Vec<String>;
}

/// Render `report` in the requested format.
pub fn render<R: Report>(report: &R, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.text_lines().join("\n")),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("failed to serialize report")
        }
    }
}

/// Render and print to stdout.
pub fn emit<R: Report>(report: &R, format: OutputFormat) -> Result<()> {
    println!("{}", render(report, format)?);
    Ok(())
}

/// Format a vector as `(a, b, c)`.
pub fn format_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("({})", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        value: f64,
    }

    impl Report for Sample {
        fn text_lines(&self) -> Vec<String> {
            vec![format!("value: {}", self.value)]
        }
    }

    #[test]
    fn text_and_json_forms() {
        let sample = Sample { value: 1.5 };
        assert_eq!(render(&sample, OutputFormat::Text).unwrap(), "value: 1.5");
        let json: serde_json::Value =
            serde_json::from_str(&render(&sample, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["value"], 1.5);
    }

    #[test]
    fn nan_serializes_as_null() {
        let sample = Sample { value: f64::NAN };
        let json = render(&sample, OutputFormat::Json).unwrap();
        assert!(json.contains("null"));
    }

    #[test]
    fn vector_formatting() {
        assert_eq!(format_vector(&[1.0, -0.5, 3.0]), "(1, -0.5, 3)");
        assert_eq!(format_vector(&[]), "()");
    }
}
