//! List command implementation.
//!
//! The `spin-preflight list` command shows the checks a run would perform.

use crate::checks::{CheckDefinition, CheckRegistry};
use crate::cli::args::ListArgs;
use crate::config::load_catalog;
use crate::error::Result;
use crate::ui::theme::PreflightTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = load_catalog(self.args.checks.as_deref())?;
        CheckRegistry::new().validate(catalog.checks())?;

        if self.args.json {
            let json = serde_json::to_string_pretty(catalog.checks())?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = PreflightTheme::new();
        ui.show_header(&format!("{} checks", catalog.len()));

        let width = catalog
            .checks()
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);
        for check in catalog.checks() {
            ui.message(&format!(
                "  {:<width$}  {}  {}",
                theme.highlight.apply_to(&check.name),
                theme.dim.apply_to(&check.kind),
                target(check),
                width = width
            ));
        }

        Ok(CommandResult::success())
    }
}

fn target(check: &CheckDefinition) -> String {
    let mut target = check.resource_name.clone();
    if let Some(image) = &check.image_name {
        target.push_str(&format!(" [{}]", image));
    }
    if check.has_version_gate() {
        target.push_str(&format!(" {}", check.version_ranges.join(" || ")));
    }
    target
}
