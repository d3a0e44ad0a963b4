//! Check catalog loading and run settings.
//!
//! # Modules
//!
//! - [`catalog`] - Declarative check catalog parsing and validation
//! - [`settings`] - Cluster connection settings

pub mod catalog;
pub mod settings;

pub use catalog::{load_catalog, CheckCatalog, BUILTIN_CATALOG};
pub use settings::{ClusterSettings, DEFAULT_DEBUG_IMAGE};
