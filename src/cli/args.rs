//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{ClusterSettings, DEFAULT_DEBUG_IMAGE};

/// spin-preflight - check that a cluster is ready to run Spin apps.
#[derive(Debug, Parser)]
#[command(name = "spin-preflight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Show what each check looks at under its verdict
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    // Arguments for the implicit `check` when no subcommand is given
    #[command(flatten)]
    pub check: CheckArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the checks against a cluster (default if no command specified)
    Check(CheckArgs),

    /// List the checks in the catalog
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Cluster flavor: k3d, minikube or k8s
    #[arg(default_value = "k3d")]
    pub provider: String,

    /// Check catalog to use instead of the built-in one (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    pub checks: Option<PathBuf>,

    /// Kubeconfig context (defaults to the current context)
    #[arg(long)]
    pub context: Option<String>,

    /// Image used for node debug pods
    #[arg(long, value_name = "IMAGE", default_value = DEFAULT_DEBUG_IMAGE)]
    pub debug_image: String,

    /// kubectl binary used to reach nodes
    #[arg(long, env = "KUBECTL", value_name = "PATH", default_value = "kubectl")]
    pub kubectl: PathBuf,

    /// Print remediation steps for failed checks (only "false" turns them off)
    #[arg(
        long,
        env = "SHOW_FIXES",
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = parse_show_fixes
    )]
    pub show_fixes: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    /// Cluster connection settings named by these arguments.
    pub fn cluster_settings(&self) -> ClusterSettings {
        ClusterSettings {
            context: self.context.clone(),
            kubectl: self.kubectl.clone(),
            debug_image: self.debug_image.clone(),
        }
    }
}

impl Default for CheckArgs {
    fn default() -> Self {
        let show_fixes = std::env::var("SHOW_FIXES")
            .map(|v| show_fixes_enabled(&v))
            .unwrap_or(true);
        let kubectl = std::env::var_os("KUBECTL")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("kubectl"));

        Self {
            provider: "k3d".to_string(),
            checks: None,
            context: None,
            debug_image: DEFAULT_DEBUG_IMAGE.to_string(),
            kubectl,
            show_fixes,
            json: false,
        }
    }
}

// Fixes are hidden only for the literal "false"; any other value keeps them.
fn show_fixes_enabled(value: &str) -> bool {
    value != "false"
}

fn parse_show_fixes(value: &str) -> Result<bool, String> {
    Ok(show_fixes_enabled(value))
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Check catalog to list instead of the built-in one (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    pub checks: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
