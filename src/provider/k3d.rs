//! k3d flavor.
//!
//! The Spin-enabled k3d node image ships the shim in a standard bin
//! directory, so the default probes apply unchanged.

use super::{ClusterHandles, Provider};
use crate::cluster::{ClusterApi, NodeExecutor};

/// k3d cluster.
pub struct K3dProvider {
    handles: ClusterHandles,
}

impl K3dProvider {
    pub fn new(handles: ClusterHandles) -> Self {
        Self { handles }
    }
}

impl Provider for K3dProvider {
    fn name(&self) -> &str {
        "k3d"
    }

    fn cluster(&self) -> &dyn ClusterApi {
        self.handles.cluster()
    }

    fn executor(&self) -> &dyn NodeExecutor {
        self.handles.executor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckDefinition, CheckKind};
    use crate::cluster::{FakeCluster, FakeExecutor};

    #[test]
    fn has_no_overrides() {
        let provider = K3dProvider::new(ClusterHandles::new(FakeCluster::new(), FakeExecutor::new()));
        for kind in CheckKind::ALL {
            let check = CheckDefinition::new("containerd-shim-spin", kind, "containerd-shim-spin-v2");
            assert!(provider.override_for(&check).is_none());
        }
    }
}
