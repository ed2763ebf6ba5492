//! Load a model and report what it contains

use serde::Serialize;

use super::CliError;
use crate::Model;
use crate::stats::KindCounts;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// JSON model source
    pub model: Option<String>,
    /// Report as JSON instead of text
    pub json: bool,
}

/// Summary of a loaded model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub items: usize,
    pub nodes: usize,
    pub kinds: KindCounts,
}

impl CheckReport {
    pub fn of_model(model: &Model) -> Self {
        let kinds = KindCounts::of_model(model);
        CheckReport {
            items: model.items.len(),
            nodes: kinds.total(),
            kinds,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("Model is valid: {} items, {} nodes\n", self.items, self.nodes);
        for (kind, count) in self.kinds.iter() {
            out.push_str(&format!("  {:<22}{}\n", kind.name(), count));
        }
        out
    }
}

/// Execute a check operation, returning the rendered report
pub fn execute_check(options: &CheckOptions) -> Result<String, CliError> {
    let source = options.model.as_ref().ok_or(CliError::NoInput)?;
    let model = Model::from_json(source)?;
    let report = CheckReport::of_model(&model);

    if options.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.to_text())
    }
}
