//! Generic Kubernetes flavor.
//!
//! Assumes nodes were provisioned by kwasm, so every binary check looks in
//! the kwasm install directory.

use super::{kwasm_shim_probe, ClusterHandles, Provider};
use crate::checks::{CheckDefinition, CheckKind, ProbeFn};
use crate::cluster::{ClusterApi, NodeExecutor};

/// Any Kubernetes cluster.
pub struct KubernetesProvider {
    handles: ClusterHandles,
}

impl KubernetesProvider {
    pub fn new(handles: ClusterHandles) -> Self {
        Self { handles }
    }
}

impl Provider for KubernetesProvider {
    fn name(&self) -> &str {
        "k8s"
    }

    fn cluster(&self) -> &dyn ClusterApi {
        self.handles.cluster()
    }

    fn executor(&self) -> &dyn NodeExecutor {
        self.handles.executor()
    }

    fn override_for(&self, check: &CheckDefinition) -> Option<ProbeFn> {
        match check.kind() {
            Ok(CheckKind::BinaryOnNodes) => Some(kwasm_shim_probe as ProbeFn),
            _ => None,
        }
    }
}
