//! Check command implementation.
//!
//! The `spin-preflight check` command runs the catalog against a cluster and
//! reports one verdict per check.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::checks::{all_ok, CheckOutcome, CheckRegistry, CheckRunner};
use crate::cli::args::CheckArgs;
use crate::config::{load_catalog, CheckCatalog};
use crate::error::Result;
use crate::provider::{self, Provider, ProviderKind};
use crate::ui::{format_target, ProgressSpinner, SpinnerHandle, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Machine-readable result of a run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Provider flavor the checks ran with
    pub provider: String,
    /// When the run finished
    pub checked_at: DateTime<Utc>,
    /// Whether every check passed
    pub ok: bool,
    /// One outcome per check, in catalog order
    pub outcomes: Vec<CheckOutcome>,
}

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Run `catalog` through an already connected provider and report.
    pub fn run_against(
        &self,
        provider: &dyn Provider,
        registry: &CheckRegistry,
        catalog: &CheckCatalog,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        if !self.args.json {
            ui.show_header(&format!("Checking {} cluster", provider.name()));
        }

        let total = catalog.len();
        let mut spinner: Box<dyn SpinnerHandle> = if self.args.json {
            Box::new(ProgressSpinner::hidden())
        } else {
            ui.start_spinner("Running checks")
        };

        let runner = CheckRunner::new(registry, provider);
        let outcomes = match runner.run_with(catalog.checks(), |index, check| {
            spinner.set_message(&format!("[{}/{}] {}", index + 1, total, check.name));
        }) {
            Ok(outcomes) => {
                spinner.finish_success(&format!("Ran {} checks", total));
                outcomes
            }
            Err(e) => {
                spinner.finish_error("Check run aborted");
                return Err(e);
            }
        };

        let ok = all_ok(&outcomes);
        tracing::info!(
            "{} of {} checks passed",
            outcomes.iter().filter(|o| o.ok).count(),
            outcomes.len()
        );

        if self.args.json {
            let report = RunReport {
                provider: provider.name().to_string(),
                checked_at: Utc::now(),
                ok,
                outcomes,
            };
            ui.message(&serde_json::to_string_pretty(&report)?);
        } else {
            let show_targets = ui.output_mode().shows_targets();
            for (outcome, check) in outcomes.iter().zip(catalog.checks()) {
                ui.show_outcome(outcome, self.args.show_fixes);
                if show_targets {
                    ui.message(&format_target(check));
                }
            }
            ui.message("");
            if ok {
                ui.success("All looks good !!");
            } else {
                ui.error("Please fix above issues.");
            }
        }

        Ok(if ok {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let kind: ProviderKind = self.args.provider.parse()?;
        let catalog = load_catalog(self.args.checks.as_deref())?;
        let registry = CheckRegistry::new();
        registry.validate(catalog.checks())?;

        let provider = provider::connect(kind, &self.args.cluster_settings())?;
        self.run_against(provider.as_ref(), &registry, &catalog, ui)
    }
}
