//! Process-wide output format selector.
//!
//! The selector is set once from the top-level `-o/--output` flag and read
//! everywhere output is rendered. The capture bridge temporarily forces it
//! back to `Text` while a legacy operation runs, so the value is kept
//! behind a lock rather than a set-once cell.

use std::sync::RwLock;

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable text (colored on a TTY)
    #[default]
    Text,
    /// Compact JSON
    Json,
    /// Indented JSON
    JsonPretty,
    /// YAML
    Yaml,
}

impl OutputFormat {
    /// True for any machine-parsable format.
    pub fn is_structured(self) -> bool {
        !matches!(self, OutputFormat::Text)
    }
}

static OUTPUT_FORMAT: RwLock<OutputFormat> = RwLock::new(OutputFormat::Text);

/// Current process-wide output format.
pub fn output_format() -> OutputFormat {
    *OUTPUT_FORMAT.read().expect("output format lock poisoned")
}

/// Set the process-wide output format. Called once at startup from the
/// `-o` flag, and transiently by the capture bridge.
pub fn set_output_format(format: OutputFormat) {
    *OUTPUT_FORMAT.write().expect("output format lock poisoned") = format;
}

/// True if the current output format is structured (JSON/YAML).
pub fn is_structured_output() -> bool {
    output_format().is_structured()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn structured_classification() {
        assert!(!OutputFormat::Text.is_structured());
        assert!(OutputFormat::Json.is_structured());
        assert!(OutputFormat::JsonPretty.is_structured());
        assert!(OutputFormat::Yaml.is_structured());
    }

    #[test]
    #[serial]
    fn global_selector_roundtrip() {
        let prev = output_format();
        set_output_format(OutputFormat::Yaml);
        assert!(is_structured_output());
        assert_eq!(output_format(), OutputFormat::Yaml);
        set_output_format(prev);
    }

    #[test]
    fn flag_values_are_kebab_case() {
        // The CLI contract is `-o text|json|json-pretty|yaml`.
        let names: Vec<String> = OutputFormat::value_variants()
            .iter()
            .map(|v| v.to_possible_value().unwrap().get_name().to_string())
            .collect();
        assert_eq!(names, ["text", "json", "json-pretty", "yaml"]);
    }
}
