//! Check registry and execution engine.
//!
//! A run takes the ordered checks of a [`CheckCatalog`](crate::config::CheckCatalog),
//! resolves each to a probe (the registry default or a provider override),
//! and collects one [`CheckOutcome`] per check.
//!
//! # Modules
//!
//! - [`definition`] - Check definitions and kinds
//! - [`node_probe`] - Run a command on every node
//! - [`outcome`] - Per-check results
//! - [`probes`] - Built-in probes
//! - [`registry`] - Kind to probe mapping
//! - [`runner`] - Catalog evaluation

pub mod definition;
pub mod node_probe;
pub mod outcome;
pub mod probes;
pub mod registry;
pub mod runner;

pub use definition::{CheckDefinition, CheckKind};
pub use node_probe::{run_on_each_node, NodeProbeReport};
pub use outcome::{all_ok, CheckOutcome};
pub use registry::{CheckRegistry, ProbeFn};
pub use runner::CheckRunner;
