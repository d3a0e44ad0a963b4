//! In-memory cluster doubles for testing.
//!
//! `FakeCluster` and `FakeExecutor` implement the capability traits over
//! plain data and record every call, so tests can assert both on outcomes
//! and on which cluster operations a probe performed.
//!
//! # Example
//!
//! ```
//! use spin_preflight::cluster::{ClusterApi, FakeCluster};
//!
//! let cluster = FakeCluster::new()
//!     .with_crd("spinapps.core.spinkube.dev")
//!     .with_node("worker-1", "containerd://1.7.11");
//!
//! assert!(cluster.custom_resource_definition("spinapps.core.spinkube.dev").is_ok());
//! assert!(cluster.runtime_class("wasmtime-spin-v2").unwrap_err().is_not_found());
//! assert_eq!(cluster.calls().len(), 2);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::{ClusterApi, DeploymentSummary, ExecOutput, NodeExecutor, NodeSummary};
use crate::error::{PreflightError, Result};

/// Fake control plane.
#[derive(Debug, Default)]
pub struct FakeCluster {
    crds: HashSet<String>,
    runtime_classes: HashSet<String>,
    nodes: Vec<NodeSummary>,
    deployments: Vec<DeploymentSummary>,
    unreachable: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeCluster {
    /// Create an empty cluster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an installed custom resource definition.
    pub fn with_crd(mut self, name: &str) -> Self {
        self.crds.insert(name.to_string());
        self
    }

    /// Add a runtime class.
    pub fn with_runtime_class(mut self, name: &str) -> Self {
        self.runtime_classes.insert(name.to_string());
        self
    }

    /// Add a node with the given runtime banner.
    pub fn with_node(mut self, name: &str, container_runtime_version: &str) -> Self {
        self.nodes
            .push(NodeSummary::new(name, container_runtime_version));
        self
    }

    /// Add a deployment.
    pub fn with_deployment(mut self, deployment: DeploymentSummary) -> Self {
        self.deployments.push(deployment);
        self
    }

    /// Make every request fail as if the API server were down.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Operations performed so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, operation: String) -> Result<()> {
        self.calls.borrow_mut().push(operation.clone());
        if self.unreachable {
            return Err(PreflightError::cluster(operation, "connection refused"));
        }
        Ok(())
    }

    fn lookup(&self, set: &HashSet<String>, resource: &str, name: &str) -> Result<()> {
        self.record(format!("get {} {}", resource, name))?;
        if set.contains(name) {
            Ok(())
        } else {
            Err(PreflightError::NotFound {
                resource: resource.to_string(),
                name: name.to_string(),
            })
        }
    }
}

impl ClusterApi for FakeCluster {
    fn custom_resource_definition(&self, name: &str) -> Result<()> {
        self.lookup(&self.crds, "CustomResourceDefinition", name)
    }

    fn runtime_class(&self, name: &str) -> Result<()> {
        self.lookup(&self.runtime_classes, "RuntimeClass", name)
    }

    fn list_nodes(&self) -> Result<Vec<NodeSummary>> {
        self.record("list nodes".to_string())?;
        Ok(self.nodes.clone())
    }

    fn list_deployments(&self) -> Result<Vec<DeploymentSummary>> {
        self.record("list deployments".to_string())?;
        Ok(self.deployments.clone())
    }
}

/// Scripted result of one node execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeResponse {
    /// The command ran and produced this output.
    Output(ExecOutput),
    /// The debug session could not be launched.
    LaunchError(String),
}

impl FakeResponse {
    /// Command succeeded with the given output.
    pub fn ok(output: &str) -> Self {
        Self::Output(ExecOutput::success(output))
    }

    /// Command exited with `code` and the given output.
    pub fn exit(code: i32, output: &str) -> Self {
        Self::Output(ExecOutput::failure(Some(code), output))
    }
}

/// Fake node executor answering from per-node scripts.
#[derive(Debug)]
pub struct FakeExecutor {
    responses: HashMap<String, FakeResponse>,
    default: FakeResponse,
    calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl Default for FakeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeExecutor {
    /// Executor where every node prints a version banner.
    pub fn new() -> Self {
        Self::answering(FakeResponse::ok("v0.15.1"))
    }

    /// Executor where every node gives `response` unless scripted otherwise.
    pub fn answering(response: FakeResponse) -> Self {
        Self {
            responses: HashMap::new(),
            default: response,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Script the response for one node.
    pub fn on_node(mut self, node: &str, response: FakeResponse) -> Self {
        self.responses.insert(node.to_string(), response);
        self
    }

    /// `(node, command)` pairs executed so far, in call order.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.borrow().clone()
    }
}

impl NodeExecutor for FakeExecutor {
    fn execute_on_node(&self, node: &str, command: &[String]) -> Result<ExecOutput> {
        self.calls
            .borrow_mut()
            .push((node.to_string(), command.to_vec()));

        match self.responses.get(node).unwrap_or(&self.default) {
            FakeResponse::Output(output) => Ok(output.clone()),
            FakeResponse::LaunchError(message) => Err(PreflightError::ExecLaunchFailed {
                node: node.to_string(),
                message: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_distinguish_absence_from_outage() {
        let cluster = FakeCluster::new().with_runtime_class("wasmtime-spin-v2");
        assert!(cluster.runtime_class("wasmtime-spin-v2").is_ok());
        assert!(cluster.runtime_class("other").unwrap_err().is_not_found());

        let down = FakeCluster::new().unreachable();
        let err = down.runtime_class("wasmtime-spin-v2").unwrap_err();
        assert!(matches!(err, PreflightError::Cluster { .. }));
    }

    #[test]
    fn records_calls_in_order() {
        let cluster = FakeCluster::new();
        cluster.list_nodes().unwrap();
        cluster.list_deployments().unwrap();
        assert_eq!(cluster.calls(), vec!["list nodes", "list deployments"]);
    }

    #[test]
    fn executor_uses_scripted_then_default_response() {
        let executor = FakeExecutor::new().on_node("bad", FakeResponse::LaunchError("boom".into()));
        let cmd = vec!["/host/bin/x".to_string()];

        assert!(executor.execute_on_node("good", &cmd).unwrap().success);
        assert!(executor.execute_on_node("bad", &cmd).is_err());
        assert_eq!(executor.calls().len(), 2);
        assert_eq!(executor.calls()[1].0, "bad");
    }
}
