//! Error types for preflight operations.
//!
//! This module defines [`PreflightError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Catalog and provider problems are configuration errors and abort a run
//! - Cluster transport failures abort a run (a half-reachable cluster
//!   yields results nobody should trust)
//! - [`PreflightError::NotFound`] is an expected absence, which probes turn
//!   into a failed outcome rather than an error
//! - Version and image reference parse errors are local to one item and are
//!   absorbed by the probe scanning that item
//! - Use `anyhow::Error` (via `PreflightError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for preflight operations.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// Check catalog file not found at the given location.
    #[error("Check catalog not found: {path}")]
    CatalogNotFound { path: PathBuf },

    /// Failed to parse a check catalog.
    #[error("Failed to parse check catalog {source_name}: {message}")]
    CatalogParseError {
        source_name: String,
        message: String,
    },

    /// Catalog parsed but its contents are inconsistent.
    #[error("Invalid check catalog: {message}")]
    InvalidCatalog { message: String },

    /// A check names a kind the registry does not know.
    #[error("Check type '{kind}' used by '{check}' is not supported")]
    UnknownCheckKind { check: String, kind: String },

    /// Requested cluster flavor does not exist.
    #[error("Unknown provider: {name}")]
    UnknownProvider { name: String },

    /// A cluster object the probe asked for does not exist.
    #[error("{resource} '{name}' not found")]
    NotFound { resource: String, name: String },

    /// The cluster could not be reached or refused a request.
    #[error("Cluster request '{operation}' failed: {message}")]
    Cluster { operation: String, message: String },

    /// A version string could not be parsed as a semantic version.
    #[error("Invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// A version range expression could not be parsed.
    #[error("Invalid version range '{range}': {message}")]
    InvalidVersionRange { range: String, message: String },

    /// A container image reference could not be parsed.
    #[error("Invalid image reference '{reference}': {message}")]
    InvalidImageReference { reference: String, message: String },

    /// A debug session could not be launched on a node.
    #[error("Failed to launch command on node '{node}': {message}")]
    ExecLaunchFailed { node: String, message: String },

    /// A probe could not reach any conclusion.
    #[error("Check '{check}' is inconclusive: {message}")]
    ProbeInconclusive { check: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PreflightError {
    /// Build a [`PreflightError::Cluster`] from any displayable cause.
    pub fn cluster(operation: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Cluster {
            operation: operation.into(),
            message: cause.to_string(),
        }
    }

    /// Whether this error signals an expected absence rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for preflight operations.
pub type Result<T> = std::result::Result<T, PreflightError>;
