//! spin-preflight - check that a Kubernetes cluster can run Spin apps.
//!
//! A run evaluates an ordered catalog of declarative checks (CRDs, runtime
//! classes, operator deployments, the containerd version and the Spin shim
//! on every node) and reports one verdict per check.
//!
//! # Modules
//!
//! - [`checks`] - Check definitions, probes, registry and runner
//! - [`cli`] - Command-line interface and argument parsing
//! - [`cluster`] - Cluster access and node execution capabilities
//! - [`config`] - Check catalog and cluster settings
//! - [`error`] - Error types and result aliases
//! - [`matching`] - Version range matching and image reference parsing
//! - [`provider`] - Cluster flavors and their probe overrides
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use spin_preflight::checks::{CheckRegistry, CheckRunner};
//! use spin_preflight::cluster::{FakeCluster, FakeExecutor};
//! use spin_preflight::config::CheckCatalog;
//! use spin_preflight::provider::{ClusterHandles, K3dProvider};
//!
//! let provider = K3dProvider::new(ClusterHandles::new(
//!     FakeCluster::new().with_runtime_class("wasmtime-spin-v2"),
//!     FakeExecutor::new(),
//! ));
//! let catalog = CheckCatalog::from_yaml(
//!     "- {name: runtime class, checkType: runtimeclass, resourceName: wasmtime-spin-v2}",
//!     "inline",
//! )
//! .unwrap();
//!
//! let registry = CheckRegistry::new();
//! let outcomes = CheckRunner::new(&registry, &provider)
//!     .run(catalog.checks())
//!     .unwrap();
//! assert!(outcomes[0].ok);
//! ```

pub mod checks;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod matching;
pub mod provider;
pub mod ui;

pub use error::{PreflightError, Result};
