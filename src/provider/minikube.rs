//! minikube flavor.
//!
//! kwasm installs the shim under `/opt/kwasm/bin` on minikube nodes. Only
//! the catalog check named [`SHIM_CHECK_NAME`] is redirected there.

use super::{kwasm_shim_probe, ClusterHandles, Provider};
use crate::checks::{CheckDefinition, ProbeFn};
use crate::cluster::{ClusterApi, NodeExecutor};

/// Name of the check whose probe minikube replaces.
pub const SHIM_CHECK_NAME: &str = "containerd-shim-spin";

/// minikube cluster.
pub struct MinikubeProvider {
    handles: ClusterHandles,
}

impl MinikubeProvider {
    pub fn new(handles: ClusterHandles) -> Self {
        Self { handles }
    }
}

impl Provider for MinikubeProvider {
    fn name(&self) -> &str {
        "minikube"
    }

    fn cluster(&self) -> &dyn ClusterApi {
        self.handles.cluster()
    }

    fn executor(&self) -> &dyn NodeExecutor {
        self.handles.executor()
    }

    fn override_for(&self, check: &CheckDefinition) -> Option<ProbeFn> {
        (check.name == SHIM_CHECK_NAME).then_some(kwasm_shim_probe as ProbeFn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckKind;
    use crate::cluster::{FakeCluster, FakeExecutor};

    fn provider() -> MinikubeProvider {
        MinikubeProvider::new(ClusterHandles::new(FakeCluster::new(), FakeExecutor::new()))
    }

    #[test]
    fn overrides_shim_check_by_name() {
        let check = CheckDefinition::new(SHIM_CHECK_NAME, CheckKind::BinaryOnNodes, "containerd-shim-spin-v2");
        assert!(provider().override_for(&check).is_some());
    }

    #[test]
    fn other_binary_checks_keep_default() {
        let check = CheckDefinition::new("wasmtime", CheckKind::BinaryOnNodes, "wasmtime");
        assert!(provider().override_for(&check).is_none());
    }
}
