//! Mapping from check kinds to probe functions.

use std::collections::HashMap;

use super::definition::{CheckDefinition, CheckKind};
use super::outcome::CheckOutcome;
use super::probes;
use crate::error::{PreflightError, Result};
use crate::provider::Provider;

/// A probe: inspect the cluster through the provider and judge one check.
pub type ProbeFn = fn(&dyn Provider, &CheckDefinition) -> Result<CheckOutcome>;

/// Default probe for every check kind.
///
/// Built once per run and never mutated afterwards.
pub struct CheckRegistry {
    probes: HashMap<CheckKind, ProbeFn>,
}

impl CheckRegistry {
    /// Create a registry with the built-in probes.
    pub fn new() -> Self {
        let mut defaults: HashMap<CheckKind, ProbeFn> = HashMap::new();
        defaults.insert(CheckKind::Crd, probes::crd_installed);
        defaults.insert(CheckKind::RuntimeClass, probes::runtime_class_present);
        defaults.insert(CheckKind::DeploymentRunning, probes::deployment_running);
        defaults.insert(CheckKind::ContainerdVersion, probes::containerd_version);
        defaults.insert(CheckKind::BinaryOnNodes, probes::binary_installed);
        Self { probes: defaults }
    }

    /// Replace the probe for `kind`.
    pub fn with_probe(mut self, kind: CheckKind, probe: ProbeFn) -> Self {
        self.probes.insert(kind, probe);
        self
    }

    /// Probe registered for `kind`.
    pub fn get(&self, kind: CheckKind) -> Option<ProbeFn> {
        self.probes.get(&kind).copied()
    }

    /// Default probe for a check.
    ///
    /// Fails when the check's kind is not supported.
    pub fn resolve(&self, check: &CheckDefinition) -> Result<ProbeFn> {
        let kind = check.kind()?;
        self.get(kind).ok_or_else(|| PreflightError::UnknownCheckKind {
            check: check.name.clone(),
            kind: check.kind.clone(),
        })
    }

    /// Check that every definition names a supported kind.
    pub fn validate(&self, checks: &[CheckDefinition]) -> Result<()> {
        checks.iter().try_for_each(|check| self.resolve(check).map(|_| ()))
    }

    /// Kinds with a registered probe.
    pub fn known_kinds(&self) -> Vec<CheckKind> {
        CheckKind::ALL
            .into_iter()
            .filter(|kind| self.probes.contains_key(kind))
            .collect()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}
