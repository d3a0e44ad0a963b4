//! Rendering of check outcomes as text lines.

use super::theme::PreflightTheme;
use crate::checks::{CheckDefinition, CheckOutcome};

/// Line introducing a failed check's remediation.
pub const HOW_TO_FIX_BANNER: &str = "### how to fix ###";

/// Lines for one outcome.
///
/// A failed check lists its message lines prefixed with `->`, then the
/// remediation block when `show_fixes` is set and the check has one.
pub fn format_outcome(
    theme: &PreflightTheme,
    outcome: &CheckOutcome,
    show_fixes: bool,
) -> Vec<String> {
    if outcome.ok {
        return vec![theme.format_success(&outcome.name)];
    }

    let mut lines = vec![theme.format_error(&outcome.name)];
    for line in outcome.message.lines().filter(|l| !l.trim().is_empty()) {
        lines.push(format!("  {}", theme.dim.apply_to(format!("-> {}", line))));
    }

    if show_fixes {
        if let Some(fix) = outcome.remediation.as_deref() {
            lines.push(String::new());
            lines.push(format!("{}", theme.hint.apply_to(HOW_TO_FIX_BANNER)));
            lines.extend(fix.trim_end().lines().map(|l| l.to_string()));
            lines.push(String::new());
        }
    }

    lines
}

/// One indented line describing what `check` looks at, for verbose output.
pub fn format_target(check: &CheckDefinition) -> String {
    let mut line = format!("    {} {}", check.kind, check.resource_name);
    if let Some(image) = check.image_name.as_deref() {
        line.push_str(&format!(" image={}", image));
    }
    if check.has_version_gate() {
        line.push_str(&format!(" versions={}", check.version_ranges.join(" | ")));
    }
    line
}
