//! Per-check results.

use serde::{Deserialize, Serialize};

/// Verdict for one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Name of the check this outcome belongs to
    pub name: String,
    /// Whether the check passed
    pub ok: bool,
    /// Explanation, empty on a clean pass or a plain absence
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Remediation text, only carried by failed outcomes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl CheckOutcome {
    /// A passing outcome.
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ok: true,
            message: String::new(),
            remediation: None,
        }
    }

    /// A failing outcome with an explanation (possibly empty).
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ok: false,
            message: message.into(),
            remediation: None,
        }
    }

    /// Attach remediation text. Ignored for passing outcomes.
    pub fn with_remediation(mut self, remediation: Option<&str>) -> Self {
        if !self.ok {
            self.remediation = remediation.map(str::to_string);
        }
        self
    }
}

/// Whether every outcome passed.
pub fn all_ok(outcomes: &[CheckOutcome]) -> bool {
    outcomes.iter().all(|o| o.ok)
}
