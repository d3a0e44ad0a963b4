//! Cluster flavors.
//!
//! A provider bundles the cluster capabilities with the flavor's probe
//! overrides. Distributions install the Spin shim in different places, so
//! some flavors replace the default binary probe with one that looks where
//! their installer puts it.
//!
//! # Modules
//!
//! - [`generic`] - Any Kubernetes cluster provisioned with kwasm
//! - [`k3d`] - k3d clusters using the Spin-enabled node image
//! - [`minikube`] - minikube clusters provisioned with kwasm

pub mod generic;
pub mod k3d;
pub mod minikube;

pub use generic::KubernetesProvider;
pub use k3d::K3dProvider;
pub use minikube::MinikubeProvider;

use std::fmt;
use std::str::FromStr;

use crate::checks::probes::{exec_on_each_node, outcome_from_report};
use crate::checks::{CheckDefinition, CheckOutcome, ProbeFn};
use crate::cluster::{
    ClusterApi, KubeCluster, KubectlDebugExecutor, NodeExecutor, HOST_ROOT,
};
use crate::config::ClusterSettings;
use crate::error::{PreflightError, Result};

/// Where the kwasm node installer places its binaries on the host.
pub const KWASM_BIN_DIR: &str = "/opt/kwasm/bin";

/// Capabilities and overrides of one cluster flavor.
pub trait Provider {
    /// Flavor name, as accepted on the command line.
    fn name(&self) -> &str;

    /// Control plane access.
    fn cluster(&self) -> &dyn ClusterApi;

    /// Command execution on nodes.
    fn executor(&self) -> &dyn NodeExecutor;

    /// Probe replacing the registry default for `check`, if any.
    fn override_for(&self, _check: &CheckDefinition) -> Option<ProbeFn> {
        None
    }
}

/// Cluster capabilities shared by every flavor.
pub struct ClusterHandles {
    cluster: Box<dyn ClusterApi>,
    executor: Box<dyn NodeExecutor>,
}

impl ClusterHandles {
    /// Bundle a cluster and an executor.
    pub fn new(
        cluster: impl ClusterApi + 'static,
        executor: impl NodeExecutor + 'static,
    ) -> Self {
        Self {
            cluster: Box::new(cluster),
            executor: Box::new(executor),
        }
    }

    /// Connect to the live cluster named by `settings`.
    pub fn connect(settings: &ClusterSettings) -> Result<Self> {
        let cluster = KubeCluster::connect(settings.context.as_deref())?;
        Ok(Self::new(cluster, KubectlDebugExecutor::new(settings)))
    }

    pub fn cluster(&self) -> &dyn ClusterApi {
        self.cluster.as_ref()
    }

    pub fn executor(&self) -> &dyn NodeExecutor {
        self.executor.as_ref()
    }
}

/// The supported flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    K3d,
    Minikube,
    Kubernetes,
}

impl ProviderKind {
    /// Every flavor.
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::K3d,
        ProviderKind::Minikube,
        ProviderKind::Kubernetes,
    ];

    /// Command line name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::K3d => "k3d",
            ProviderKind::Minikube => "minikube",
            ProviderKind::Kubernetes => "k8s",
        }
    }

    /// Build this flavor on top of `handles`.
    pub fn build(self, handles: ClusterHandles) -> Box<dyn Provider> {
        match self {
            ProviderKind::K3d => Box::new(K3dProvider::new(handles)),
            ProviderKind::Minikube => Box::new(MinikubeProvider::new(handles)),
            ProviderKind::Kubernetes => Box::new(KubernetesProvider::new(handles)),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = PreflightError;

    fn from_str(s: &str) -> Result<Self> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PreflightError::UnknownProvider {
                name: s.to_string(),
            })
    }
}

/// Connect to the cluster and build the requested flavor.
pub fn connect(kind: ProviderKind, settings: &ClusterSettings) -> Result<Box<dyn Provider>> {
    tracing::info!("Connecting to cluster as {}", kind);
    Ok(kind.build(ClusterHandles::connect(settings)?))
}

/// Look for the check's binary in the kwasm install directory on every node.
pub fn kwasm_shim_probe(provider: &dyn Provider, check: &CheckDefinition) -> Result<CheckOutcome> {
    let path = format!("{}{}/{}", HOST_ROOT, KWASM_BIN_DIR, check.resource_name);
    let report = exec_on_each_node(provider, &[path.as_str(), "-v"])?;
    if !report.attempted() {
        return Err(PreflightError::ProbeInconclusive {
            check: check.name.clone(),
            message: format!(
                "not sure whether {} is installed: {}",
                check.resource_name,
                report.message()
            ),
        });
    }
    Ok(outcome_from_report(check, &report))
}
