//! End-to-end engine scenarios against in-memory clusters.

use std::rc::Rc;

use spin_preflight::checks::{
    CheckDefinition, CheckKind, CheckOutcome, CheckRegistry, CheckRunner, ProbeFn,
};
use spin_preflight::cluster::{
    ClusterApi, DeploymentSummary, FakeCluster, FakeExecutor, FakeResponse, NodeExecutor,
};
use spin_preflight::config::CheckCatalog;
use spin_preflight::provider::{ClusterHandles, ProviderKind};
use spin_preflight::{PreflightError, Result};

fn spinkube_cluster() -> FakeCluster {
    FakeCluster::new()
        .with_crd("spinapps.core.spinkube.dev")
        .with_crd("spinappexecutors.core.spinkube.dev")
        .with_crd("certificates.cert-manager.io")
        .with_runtime_class("wasmtime-spin-v2")
        .with_node("server-0", "containerd://1.7.11-k3s2")
        .with_node("agent-0", "containerd://1.7.11-k3s2")
        .with_deployment(
            DeploymentSummary::new("cert-manager", "cert-manager")
                .with_container("cert-manager-controller", "quay.io/jetstack/cert-manager-controller:v1.14.3"),
        )
        .with_deployment(
            DeploymentSummary::new("spin-operator", "spin-operator-controller-manager")
                .with_container("manager", "ghcr.io/spinkube/spin-operator:v0.4.0"),
        )
}

#[test]
fn builtin_catalog_passes_on_provisioned_k3d_cluster() {
    let catalog = CheckCatalog::builtin().unwrap();
    let provider = ProviderKind::K3d.build(ClusterHandles::new(
        spinkube_cluster(),
        FakeExecutor::answering(FakeResponse::ok("containerd-shim-spin-v2 version 0.15.1")),
    ));

    let outcomes = CheckRunner::new(&CheckRegistry::new(), provider.as_ref())
        .run(catalog.checks())
        .unwrap();

    assert_eq!(outcomes.len(), catalog.len());
    for (outcome, check) in outcomes.iter().zip(catalog.checks()) {
        assert_eq!(outcome.name, check.name);
        assert!(outcome.ok, "{} failed: {}", outcome.name, outcome.message);
        assert!(outcome.remediation.is_none());
    }
}

#[test]
fn empty_cluster_fails_with_remediation() {
    let catalog = CheckCatalog::builtin().unwrap();
    let provider = ProviderKind::K3d.build(ClusterHandles::new(
        FakeCluster::new(),
        FakeExecutor::new(),
    ));

    let outcomes = CheckRunner::new(&CheckRegistry::new(), provider.as_ref())
        .run(catalog.checks())
        .unwrap();

    let crd = &outcomes[0];
    assert!(!crd.ok);
    assert!(crd.message.is_empty());
    assert!(crd.remediation.is_some());
}

#[test]
fn containerd_scenario_names_only_offending_node() {
    let check = CheckDefinition::new("containerd", CheckKind::ContainerdVersion, "containerd")
        .with_ranges(["~1.6.8-0", "~1.7.6-0"]);
    let provider = ProviderKind::K3d.build(ClusterHandles::new(
        FakeCluster::new()
            .with_node("node-a", "containerd://1.6.8")
            .with_node("node-b", "containerd://1.7.9")
            .with_node("node-c", "containerd://1.5.0"),
        FakeExecutor::new(),
    ));

    let outcomes = CheckRunner::new(&CheckRegistry::new(), provider.as_ref())
        .run(&[check])
        .unwrap();

    assert!(!outcomes[0].ok);
    assert!(outcomes[0].message.contains("node-c"));
    assert!(!outcomes[0].message.contains("node-a"));
    assert!(!outcomes[0].message.contains("node-b"));
}

#[test]
fn deployment_scenario_matches_image_tag() {
    let check = CheckDefinition::new("controller", CheckKind::DeploymentRunning, "controller")
        .with_image_name("controller")
        .with_ranges(["^2.0.0"]);
    let provider = ProviderKind::K3d.build(ClusterHandles::new(
        FakeCluster::new().with_deployment(
            DeploymentSummary::new("default", "controller")
                .with_container("controller", "registry/controller:2.3.1"),
        ),
        FakeExecutor::new(),
    ));

    let outcomes = CheckRunner::new(&CheckRegistry::new(), provider.as_ref())
        .run(&[check])
        .unwrap();

    assert_eq!(outcomes, vec![CheckOutcome::passed("controller")]);
}

#[test]
fn unknown_kind_yields_error_and_no_outcomes() {
    let catalog = CheckCatalog::from_yaml(
        r#"
- {name: spinapps, checkType: crd, resourceName: spinapps.core.spinkube.dev}
- {name: weird, checkType: frobnicate, resourceName: x}
"#,
        "inline",
    )
    .unwrap();
    let cluster = Rc::new(FakeCluster::new());
    let provider = ProviderKind::K3d.build(ClusterHandles::new(cluster.clone(), FakeExecutor::new()));

    let result = CheckRunner::new(&CheckRegistry::new(), provider.as_ref()).run(catalog.checks());

    assert!(matches!(result, Err(PreflightError::UnknownCheckKind { .. })));
    assert!(cluster.calls().is_empty());
}

#[test]
fn minikube_override_replaces_default_shim_probe() {
    let catalog = CheckCatalog::builtin().unwrap();
    let shim = catalog.get("containerd-shim-spin").unwrap().clone();
    let executor = Rc::new(FakeExecutor::new());
    let provider = ProviderKind::Minikube.build(ClusterHandles::new(
        FakeCluster::new().with_node("minikube", "containerd://1.7.9"),
        executor.clone(),
    ));

    let outcomes = CheckRunner::new(&CheckRegistry::new(), provider.as_ref())
        .run(&[shim])
        .unwrap();

    assert!(outcomes[0].ok);
    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1[0], "/host/opt/kwasm/bin/containerd-shim-spin-v2");
}

#[test]
fn generic_override_applies_to_every_binary_check() {
    let check = CheckDefinition::new("wasmtime", CheckKind::BinaryOnNodes, "wasmtime");
    let executor = Rc::new(FakeExecutor::new());
    let provider = ProviderKind::Kubernetes.build(ClusterHandles::new(
        FakeCluster::new().with_node("worker", "containerd://1.7.9"),
        executor.clone(),
    ));

    CheckRunner::new(&CheckRegistry::new(), provider.as_ref())
        .run(&[check])
        .unwrap();

    assert_eq!(executor.calls()[0].1[0], "/host/opt/kwasm/bin/wasmtime");
}

#[test]
fn override_means_default_never_runs() {
    fn exploding(_: &dyn spin_preflight::provider::Provider, _: &CheckDefinition) -> Result<CheckOutcome> {
        panic!("default probe must not run when overridden");
    }
    let registry = CheckRegistry::new().with_probe(CheckKind::BinaryOnNodes, exploding as ProbeFn);
    let check = CheckDefinition::new("containerd-shim-spin", CheckKind::BinaryOnNodes, "containerd-shim-spin-v2");
    let provider = ProviderKind::Minikube.build(ClusterHandles::new(
        FakeCluster::new().with_node("minikube", "containerd://1.7.9"),
        FakeExecutor::new(),
    ));

    let outcomes = CheckRunner::new(&registry, provider.as_ref()).run(&[check]).unwrap();
    assert!(outcomes[0].ok);
}

#[test]
fn fakes_implement_capabilities() {
    fn takes_capabilities(_: &dyn ClusterApi, _: &dyn NodeExecutor) {}
    takes_capabilities(&FakeCluster::new(), &FakeExecutor::new());
}
