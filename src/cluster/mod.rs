//! Cluster access capabilities.
//!
//! Probes never talk to the Kubernetes API or to nodes directly. They go
//! through two narrow traits so that every probe can run against the
//! in-memory fakes in [`fake`]:
//!
//! - [`ClusterApi`] - read-only control plane queries
//! - [`NodeExecutor`] - run a command on one node and capture its output
//!
//! # Modules
//!
//! - [`exec`] - `kubectl debug` based node execution
//! - [`fake`] - In-memory test doubles
//! - [`kubernetes`] - `kube` client backed cluster access

pub mod exec;
pub mod fake;
pub mod kubernetes;

pub use exec::{KubectlDebugExecutor, HOST_ROOT};
pub use fake::{FakeCluster, FakeExecutor, FakeResponse};
pub use kubernetes::KubeCluster;

use std::rc::Rc;

use crate::error::Result;

/// A node as seen by the probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    /// Node name
    pub name: String,
    /// Runtime banner reported by the kubelet (e.g. `containerd://1.7.11-k3s2`)
    pub container_runtime_version: String,
}

impl NodeSummary {
    /// Create a node summary.
    pub fn new(name: impl Into<String>, container_runtime_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            container_runtime_version: container_runtime_version.into(),
        }
    }
}

/// A container inside a deployment's pod template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    /// Container name
    pub name: String,
    /// Image reference as written in the pod spec
    pub image: String,
}

/// A deployment as seen by the probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSummary {
    /// Namespace the deployment lives in
    pub namespace: String,
    /// Deployment name
    pub name: String,
    /// Containers of the pod template, in spec order
    pub containers: Vec<ContainerSummary>,
}

impl DeploymentSummary {
    /// Create a deployment summary without containers.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            containers: Vec::new(),
        }
    }

    /// Add a container to the pod template.
    pub fn with_container(mut self, name: impl Into<String>, image: impl Into<String>) -> Self {
        self.containers.push(ContainerSummary {
            name: name.into(),
            image: image.into(),
        });
        self
    }
}

/// Read-only access to the cluster control plane.
///
/// Lookups by name return `Ok(())` when the object exists and
/// [`PreflightError::NotFound`](crate::error::PreflightError::NotFound) when
/// it does not. Every other error means the cluster could not answer.
pub trait ClusterApi {
    /// Look up a custom resource definition by its full name.
    fn custom_resource_definition(&self, name: &str) -> Result<()>;

    /// Look up a runtime class by name.
    fn runtime_class(&self, name: &str) -> Result<()>;

    /// List every node of the cluster.
    fn list_nodes(&self) -> Result<Vec<NodeSummary>>;

    /// List deployments across all namespaces.
    ///
    /// Not paginated; the whole list comes back in one response.
    fn list_deployments(&self) -> Result<Vec<DeploymentSummary>>;
}

/// Output of a command run on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Whether the command exited with code 0
    pub success: bool,
    /// Exit code (None if killed by signal)
    pub exit_code: Option<i32>,
    /// Combined stdout and stderr
    pub output: String,
}

impl ExecOutput {
    /// A successful run with the given output.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            output: output.into(),
        }
    }

    /// A failed run with the given exit code and output.
    pub fn failure(exit_code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            output: output.into(),
        }
    }
}

/// Runs commands on individual nodes.
pub trait NodeExecutor {
    /// Run `command` on `node`.
    ///
    /// Returns `Err` when the session itself could not be launched. A
    /// command that ran and failed is `Ok` with `success == false`.
    fn execute_on_node(&self, node: &str, command: &[String]) -> Result<ExecOutput>;
}

impl<T: ClusterApi + ?Sized> ClusterApi for Rc<T> {
    fn custom_resource_definition(&self, name: &str) -> Result<()> {
        (**self).custom_resource_definition(name)
    }

    fn runtime_class(&self, name: &str) -> Result<()> {
        (**self).runtime_class(name)
    }

    fn list_nodes(&self) -> Result<Vec<NodeSummary>> {
        (**self).list_nodes()
    }

    fn list_deployments(&self) -> Result<Vec<DeploymentSummary>> {
        (**self).list_deployments()
    }
}

impl<T: NodeExecutor + ?Sized> NodeExecutor for Rc<T> {
    fn execute_on_node(&self, node: &str, command: &[String]) -> Result<ExecOutput> {
        (**self).execute_on_node(node, command)
    }
}
