//! The Plan envelope: a side-effect-free preview of a risky operation.
//!
//! Plans are built by the same option-resolution code that real execution
//! uses, so the preview cannot drift from what would actually run. A Plan
//! is rendered, never executed.

use serde::Serialize;

use super::OutputFormat;

/// A single step in a plan.
#[derive(Debug, Clone, Serialize)]
pub struct Action {
    pub step: usize,
    pub description: String,
}

/// A resource affected by a plan.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub r#type: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub impact: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

impl Resource {
    pub fn new(r#type: &str, name: &str, impact: &str, detail: &str) -> Self {
        Resource {
            r#type: r#type.into(),
            name: name.into(),
            impact: impact.into(),
            detail: detail.into(),
        }
    }
}

/// Execution plan for a dangerous operation.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub command: String,
    pub actions: Vec<Action>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affects: Vec<Resource>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expected: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<String>,
}

impl Plan {
    pub fn new(command: impl Into<String>) -> Self {
        Plan {
            command: command.into(),
            actions: Vec::new(),
            affects: Vec::new(),
            expected: String::new(),
            risks: Vec::new(),
        }
    }

    /// Append a step, numbering it after the existing ones.
    pub fn step(&mut self, description: impl Into<String>) {
        let step = self.actions.len() + 1;
        self.actions.push(Action {
            step,
            description: description.into(),
        });
    }

    /// Human-readable text representation: numbered actions, an affected
    /// resource table, the expected outcome, and known risks.
    pub fn text(&self) -> String {
        let mut out = String::from("Execution Plan\n");
        if !self.command.is_empty() {
            out.push_str(&format!("Command: {}\n", self.command));
        }

        if !self.actions.is_empty() {
            out.push_str("\nActions:\n");
            for action in &self.actions {
                out.push_str(&format!("  [{}] {}\n", action.step, action.description));
            }
        }

        if !self.affects.is_empty() {
            out.push_str("\nAffects:\n");
            let rows: Vec<[&str; 4]> = self
                .affects
                .iter()
                .map(|r| [r.r#type.as_str(), r.name.as_str(), r.impact.as_str(), r.detail.as_str()])
                .collect();
            out.push_str(&render_table(["Type", "Name", "Impact", "Detail"], &rows));
        }

        if !self.expected.is_empty() {
            out.push_str(&format!("\nExpected:\n  {}\n", self.expected));
        }

        if !self.risks.is_empty() {
            out.push_str("\nRisks:\n");
            for risk in &self.risks {
                out.push_str(&format!("  - {risk}\n"));
            }
        }

        out.trim_end().to_string()
    }

    /// Serialize to the given format. Pure, so repeat renders are
    /// byte-identical.
    pub fn render(&self, format: OutputFormat) -> crate::Result<Vec<u8>> {
        match format {
            OutputFormat::Text => Ok(self.text().into_bytes()),
            OutputFormat::Json => Ok(serde_json::to_vec(self)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_vec_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?.into_bytes()),
        }
    }
}

/// Render a fixed-width column table with a header row.
fn render_table<const N: usize>(headers: [&str; N], rows: &[[&str; N]]) -> String {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: &[&str; N], out: &mut String| {
        out.push_str("  ");
        for (i, cell) in cells.iter().enumerate() {
            if i + 1 == N {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{cell:<width$}  ", width = widths[i]));
            }
        }
        out.push('\n');
    };

    push_row(&headers, &mut out);
    for row in rows {
        push_row(row, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> Plan {
        let mut plan = Plan::new("pgadm backup restore --time '2025-01-01'");
        plan.step("Stop Patroni service");
        plan.step("Ensure PostgreSQL is stopped");
        plan.step("Execute pgBackRest restore");
        plan.affects
            .push(Resource::new("service", "patroni", "stop", "cluster management paused"));
        plan.expected = "PostgreSQL restored to 2025-01-01 00:00:00".into();
        plan.risks.push("data after the target time is discarded".into());
        plan
    }

    #[test]
    fn steps_are_numbered_in_order() {
        let plan = sample_plan();
        let steps: Vec<usize> = plan.actions.iter().map(|a| a.step).collect();
        assert_eq!(steps, vec![1, 2, 3]);
    }

    #[test]
    fn text_lists_actions_and_risks() {
        let text = sample_plan().text();
        assert!(text.starts_with("Execution Plan"));
        assert!(text.contains("[1] Stop Patroni service"));
        assert!(text.contains("[3] Execute pgBackRest restore"));
        assert!(text.contains("patroni"));
        assert!(text.contains("- data after the target time is discarded"));
    }

    #[test]
    fn structured_render_carries_all_fields() {
        let plan = sample_plan();
        let json: serde_json::Value =
            serde_json::from_slice(&plan.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["actions"].as_array().unwrap().len(), 3);
        assert_eq!(json["actions"][0]["step"], 1);
        assert_eq!(json["affects"][0]["name"], "patroni");
        assert!(json["expected"].as_str().unwrap().contains("restored"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let plan = sample_plan();
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Yaml] {
            assert_eq!(plan.render(format).unwrap(), plan.render(format).unwrap());
        }
    }
}
