//! The Report envelope: the unified outcome of one command invocation.

use std::io::IsTerminal;

use serde::Serialize;
use serde_json::Value;

use super::code;
use super::OutputFormat;

// ANSI color codes for terminal output
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_GREEN: &str = "\x1b[32m";
const COLOR_YELLOW: &str = "\x1b[33m";
const COLOR_RED: &str = "\x1b[31m";

const SYMBOL_SUCCESS: &str = "✓";
const SYMBOL_FAILURE: &str = "✗";

/// Unified response structure for all CLI commands.
///
/// Provides consistent structured output for both human and machine
/// consumption. A failing Report always carries a non-zero status code
/// from the registry in [`super::code`].
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub success: bool,
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Report {
    /// Successful Report with the given message and no data.
    pub fn ok(message: impl Into<String>) -> Self {
        Report {
            success: true,
            code: 0,
            message: message.into(),
            detail: String::new(),
            data: None,
        }
    }

    /// Failed Report with the given status code and message.
    pub fn fail(code: i32, message: impl Into<String>) -> Self {
        Report {
            success: false,
            code,
            message: message.into(),
            detail: String::new(),
            data: None,
        }
    }

    /// Attach detail text (chaining).
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Attach a structured data payload (chaining).
    ///
    /// Serialization failures of the payload are a programming error and
    /// surface when rendering, not here.
    pub fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        self.data = serde_json::to_value(data).ok();
        self
    }

    /// Shell exit code for this Report: 0 on success, the registry
    /// mapping of `code` on failure.
    pub fn exit_code(&self) -> i32 {
        if self.success {
            return 0;
        }
        code::exit_code(self.code)
    }

    /// Human-readable text representation without color.
    pub fn text(&self) -> String {
        self.format_text("", "")
    }

    /// Colored text representation for terminal output.
    ///
    /// Respects `NO_COLOR`, `TERM=dumb` and non-TTY stdout by falling
    /// back to plain text.
    pub fn color_text(&self) -> String {
        if !color_enabled() {
            return self.text();
        }
        self.format_text(self.color(), COLOR_RESET)
    }

    fn color(&self) -> &'static str {
        if self.success {
            return COLOR_GREEN;
        }
        // State (6) and config (7) failures render as warnings.
        let category = (self.code % 10_000) / 100;
        if category == 6 || category == 7 {
            COLOR_YELLOW
        } else {
            COLOR_RED
        }
    }

    fn format_text(&self, color_start: &str, color_end: &str) -> String {
        let symbol = if self.success {
            SYMBOL_SUCCESS
        } else {
            SYMBOL_FAILURE
        };
        let mut out = format!("{color_start}{symbol}{color_end} {}", self.message);
        if !self.success && !self.detail.is_empty() {
            out.push_str(&format!("\n  {}", self.detail));
        }
        out
    }

    /// Serialize to the given format.
    ///
    /// `Text` renders color-aware text; structured formats serialize the
    /// whole envelope. Rendering is pure, so rendering the same Report
    /// twice yields byte-identical output.
    pub fn render(&self, format: OutputFormat) -> crate::Result<Vec<u8>> {
        match format {
            OutputFormat::Text => Ok(self.color_text().into_bytes()),
            OutputFormat::Json => Ok(serde_json::to_vec(self)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_vec_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?.into_bytes()),
        }
    }
}

fn color_enabled() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::code::{CODE_PB_RESTORE_FAILED, CODE_PG_NOT_RUNNING};

    #[test]
    fn ok_report_has_zero_exit() {
        let r = Report::ok("backup completed");
        assert!(r.success);
        assert_eq!(r.code, 0);
        assert_eq!(r.exit_code(), 0);
    }

    #[test]
    fn fail_report_maps_exit_by_category() {
        let r = Report::fail(CODE_PB_RESTORE_FAILED, "restore failed");
        assert_eq!(r.exit_code(), 1);
        let r = Report::fail(CODE_PG_NOT_RUNNING, "postgres is not running");
        assert_eq!(r.exit_code(), 9);
    }

    #[test]
    fn text_includes_detail_on_failure_only() {
        let ok = Report::ok("done").with_detail("ignored");
        assert!(!ok.text().contains("ignored"));

        let fail = Report::fail(CODE_PB_RESTORE_FAILED, "restore failed")
            .with_detail("pgbackrest exited with 38");
        let text = fail.text();
        assert!(text.contains("✗ restore failed"));
        assert!(text.contains("pgbackrest exited with 38"));
    }

    #[test]
    fn json_omits_empty_fields() {
        let r = Report::ok("done");
        let json = String::from_utf8(r.render(OutputFormat::Json).unwrap()).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""message":"done""#));
        assert!(!json.contains("detail"));
        assert!(!json.contains("data"));
    }

    #[test]
    fn json_includes_data_payload() {
        #[derive(Serialize)]
        struct Payload {
            captured_output: String,
        }
        let r = Report::ok("pg start completed").with_data(&Payload {
            captured_output: "server started".into(),
        });
        let json = String::from_utf8(r.render(OutputFormat::Json).unwrap()).unwrap();
        assert!(json.contains(r#""captured_output":"server started""#));
    }

    #[test]
    fn rendering_is_idempotent() {
        let r = Report::fail(CODE_PB_RESTORE_FAILED, "restore failed").with_detail("boom");
        for format in [
            OutputFormat::Json,
            OutputFormat::JsonPretty,
            OutputFormat::Yaml,
        ] {
            assert_eq!(r.render(format).unwrap(), r.render(format).unwrap());
        }
    }

    #[test]
    fn yaml_renders_envelope_fields() {
        let r = Report::fail(CODE_PB_RESTORE_FAILED, "restore failed").with_detail("boom");
        let yaml = String::from_utf8(r.render(OutputFormat::Yaml).unwrap()).unwrap();
        assert!(yaml.contains("success: false"));
        assert!(yaml.contains("code: 140803"));
        assert!(yaml.contains("detail: boom"));
    }
}
