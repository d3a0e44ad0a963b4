//! Run one command on every node and fold the results.
//!
//! A node fails when its debug session cannot launch, when the command exits
//! non-zero, or when it prints nothing. Failures never stop the sweep; every
//! node listed is attempted.

use crate::cluster::{ClusterApi, NodeExecutor};
use crate::error::Result;

/// Aggregated result of running a command on every node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeProbeReport {
    /// True when every node ran the command successfully with output
    pub all_succeeded: bool,
    /// One annotation per failed node, in node order
    pub messages: Vec<String>,
    /// Number of nodes listed
    pub nodes: usize,
    /// Number of nodes where a session actually launched
    pub launched: usize,
}

impl NodeProbeReport {
    /// Whether the command could be run anywhere.
    ///
    /// A cluster without nodes counts as attempted.
    pub fn attempted(&self) -> bool {
        self.nodes == 0 || self.launched > 0
    }

    /// Failure annotations joined into one message.
    pub fn message(&self) -> String {
        self.messages.join("\n")
    }
}

/// Run `command` on every node of the cluster.
///
/// Only a failure to list nodes is an error.
pub fn run_on_each_node(
    cluster: &dyn ClusterApi,
    executor: &dyn NodeExecutor,
    command: &[String],
) -> Result<NodeProbeReport> {
    let nodes = cluster.list_nodes()?;
    let mut report = NodeProbeReport {
        all_succeeded: true,
        messages: Vec::new(),
        nodes: nodes.len(),
        launched: 0,
    };

    for node in &nodes {
        tracing::debug!("Running {:?} on node {}", command, node.name);

        let failure = match executor.execute_on_node(&node.name, command) {
            Err(e) => {
                tracing::warn!("{}", e);
                Some(format!("node {}: {}", node.name, e))
            }
            Ok(output) => {
                report.launched += 1;
                let text = output.output.trim();
                if !output.success {
                    let code = output
                        .exit_code
                        .map_or_else(|| "signal".to_string(), |c| c.to_string());
                    Some(if text.is_empty() {
                        format!("node {}: command exited with {}", node.name, code)
                    } else {
                        format!("node {}: command exited with {}: {}", node.name, code, text)
                    })
                } else if text.is_empty() {
                    Some(format!("node {}: command produced no output", node.name))
                } else {
                    tracing::debug!("node {}: {}", node.name, text);
                    None
                }
            }
        };

        if let Some(message) = failure {
            report.all_succeeded = false;
            report.messages.push(message);
        }
    }

    Ok(report)
}
