//! Evaluate a catalog against one provider.

use super::definition::CheckDefinition;
use super::outcome::CheckOutcome;
use super::registry::{CheckRegistry, ProbeFn};
use crate::error::Result;
use crate::provider::Provider;

/// Runs checks in catalog order and collects one outcome per check.
///
/// Every check kind is resolved before the first probe runs, so a catalog
/// naming an unsupported kind fails without touching the cluster. After
/// that, the first probe error aborts the run.
pub struct CheckRunner<'a> {
    registry: &'a CheckRegistry,
    provider: &'a dyn Provider,
}

impl<'a> CheckRunner<'a> {
    /// Create a runner.
    pub fn new(registry: &'a CheckRegistry, provider: &'a dyn Provider) -> Self {
        Self { registry, provider }
    }

    /// Run every check.
    pub fn run(&self, checks: &[CheckDefinition]) -> Result<Vec<CheckOutcome>> {
        self.run_with(checks, |_, _| {})
    }

    /// Run every check, calling `observer` with each check's index just
    /// before its probe runs.
    pub fn run_with<F>(&self, checks: &[CheckDefinition], mut observer: F) -> Result<Vec<CheckOutcome>>
    where
        F: FnMut(usize, &CheckDefinition),
    {
        let probes = checks
            .iter()
            .map(|check| self.resolve(check))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            "Running {} checks against provider {}",
            checks.len(),
            self.provider.name()
        );

        let mut outcomes = Vec::with_capacity(checks.len());
        for (index, (check, probe)) in checks.iter().zip(probes).enumerate() {
            observer(index, check);
            tracing::debug!("Running check '{}' ({})", check.name, check.kind);

            let outcome = probe(self.provider, check)?;
            let outcome = CheckOutcome {
                name: check.name.clone(),
                ..outcome
            }
            .with_remediation(check.remediation.as_deref());

            tracing::debug!("Check '{}' ok={}", outcome.name, outcome.ok);
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Probe that will run for `check`: the provider's override if it has
    /// one, else the registry default.
    ///
    /// The kind must be supported even when an override exists.
    pub fn resolve(&self, check: &CheckDefinition) -> Result<ProbeFn> {
        let default = self.registry.resolve(check)?;
        match self.provider.override_for(check) {
            Some(probe) => {
                tracing::debug!(
                    "Provider {} overrides check '{}'",
                    self.provider.name(),
                    check.name
                );
                Ok(probe)
            }
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckKind;
    use crate::cluster::{FakeCluster, FakeExecutor};
    use crate::error::PreflightError;
    use crate::provider::{ClusterHandles, K3dProvider};
    use std::rc::Rc;

    fn catalog() -> Vec<CheckDefinition> {
        vec![
            CheckDefinition::new("spinapps", CheckKind::Crd, "spinapps.core.spinkube.dev")
                .with_remediation("install the CRDs"),
            CheckDefinition::new("runtime class", CheckKind::RuntimeClass, "wasmtime-spin-v2")
                .with_remediation("apply the runtime class"),
        ]
    }

    #[test]
    fn outcomes_follow_catalog_order() {
        let provider = K3dProvider::new(ClusterHandles::new(
            FakeCluster::new().with_runtime_class("wasmtime-spin-v2"),
            FakeExecutor::new(),
        ));
        let registry = CheckRegistry::new();

        let outcomes = CheckRunner::new(&registry, &provider).run(&catalog()).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].name, "spinapps");
        assert!(!outcomes[0].ok);
        assert_eq!(outcomes[0].remediation.as_deref(), Some("install the CRDs"));
        assert_eq!(outcomes[1].name, "runtime class");
        assert!(outcomes[1].ok);
        assert!(outcomes[1].remediation.is_none());
    }

    #[test]
    fn unknown_kind_aborts_before_any_probe() {
        let cluster = Rc::new(FakeCluster::new());
        let provider = K3dProvider::new(ClusterHandles::new(cluster.clone(), FakeExecutor::new()));
        let registry = CheckRegistry::new();
        let mut checks = catalog();
        checks.push(CheckDefinition {
            kind: "frobnicate".to_string(),
            ..CheckDefinition::new("weird", CheckKind::Crd, "x")
        });

        let err = CheckRunner::new(&registry, &provider).run(&checks).unwrap_err();

        assert!(matches!(err, PreflightError::UnknownCheckKind { .. }));
        assert!(cluster.calls().is_empty());
    }

    #[test]
    fn probe_error_aborts_the_run() {
        let cluster = Rc::new(FakeCluster::new().unreachable());
        let provider = K3dProvider::new(ClusterHandles::new(cluster.clone(), FakeExecutor::new()));
        let registry = CheckRegistry::new();

        let result = CheckRunner::new(&registry, &provider).run(&catalog());

        assert!(matches!(result, Err(PreflightError::Cluster { .. })));
        assert_eq!(cluster.calls().len(), 1);
    }

    #[test]
    fn observer_sees_each_check_in_order() {
        let provider = K3dProvider::new(ClusterHandles::new(FakeCluster::new(), FakeExecutor::new()));
        let registry = CheckRegistry::new();
        let mut seen = Vec::new();

        CheckRunner::new(&registry, &provider)
            .run_with(&catalog(), |index, check| seen.push((index, check.name.clone())))
            .unwrap();

        assert_eq!(
            seen,
            vec![(0, "spinapps".to_string()), (1, "runtime class".to_string())]
        );
    }

    #[test]
    fn empty_catalog_yields_no_outcomes() {
        let provider = K3dProvider::new(ClusterHandles::new(FakeCluster::new(), FakeExecutor::new()));
        let registry = CheckRegistry::new();
        assert!(CheckRunner::new(&registry, &provider).run(&[]).unwrap().is_empty());
    }
}
