//! Node command execution through `kubectl debug`.
//!
//! Each call starts an ephemeral debug pod on the target node. The node's
//! root filesystem is mounted at [`HOST_ROOT`] inside that pod, so host
//! binaries are addressed as `/host/<path>`.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use super::{ExecOutput, NodeExecutor};
use crate::config::ClusterSettings;
use crate::error::{PreflightError, Result};

/// Mount point of the node's root filesystem inside a debug session.
pub const HOST_ROOT: &str = "/host";

/// [`NodeExecutor`] that shells out to `kubectl debug node/<name>`.
#[derive(Debug, Clone)]
pub struct KubectlDebugExecutor {
    kubectl: PathBuf,
    image: String,
    context: Option<String>,
}

impl KubectlDebugExecutor {
    /// Create an executor from cluster settings.
    pub fn new(settings: &ClusterSettings) -> Self {
        Self {
            kubectl: settings.kubectl.clone(),
            image: settings.debug_image.clone(),
            context: settings.context.clone(),
        }
    }

    /// Arguments passed to kubectl for running `command` on `node`.
    pub fn debug_args(&self, node: &str, command: &[String]) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(context) = &self.context {
            args.push("--context".to_string());
            args.push(context.clone());
        }
        args.extend([
            "debug".to_string(),
            "-q".to_string(),
            "-i".to_string(),
            format!("node/{}", node),
            "--image".to_string(),
            self.image.clone(),
            "--".to_string(),
        ]);
        args.extend(command.iter().cloned());
        args
    }
}

impl NodeExecutor for KubectlDebugExecutor {
    fn execute_on_node(&self, node: &str, command: &[String]) -> Result<ExecOutput> {
        let start = Instant::now();
        let args = self.debug_args(node, command);
        tracing::debug!("Running {} {}", self.kubectl.display(), args.join(" "));

        let output = Command::new(&self.kubectl)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| PreflightError::ExecLaunchFailed {
                node: node.to_string(),
                message: format!("{}: {}", self.kubectl.display(), e),
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        tracing::debug!(
            "node {}: exit {:?} after {:?}",
            node,
            output.status.code(),
            start.elapsed()
        );

        if output.status.success() {
            Ok(ExecOutput::success(combined))
        } else {
            Ok(ExecOutput::failure(output.status.code(), combined))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn debug_args_target_the_node() {
        let executor = KubectlDebugExecutor::new(&ClusterSettings::default());
        let args = executor.debug_args("worker-1", &command(&["/host/bin/containerd", "-v"]));
        assert_eq!(
            args,
            command(&[
                "debug",
                "-q",
                "-i",
                "node/worker-1",
                "--image",
                "ubuntu",
                "--",
                "/host/bin/containerd",
                "-v",
            ])
        );
    }

    #[test]
    fn debug_args_include_context() {
        let settings = ClusterSettings {
            context: Some("k3d-spin".to_string()),
            ..Default::default()
        };
        let executor = KubectlDebugExecutor::new(&settings);
        let args = executor.debug_args("n", &command(&["true"]));
        assert_eq!(&args[..2], &command(&["--context", "k3d-spin"])[..]);
    }

    #[test]
    fn missing_kubectl_is_a_launch_failure() {
        let settings = ClusterSettings {
            kubectl: PathBuf::from("/nonexistent/kubectl-xyz"),
            ..Default::default()
        };
        let executor = KubectlDebugExecutor::new(&settings);
        let err = executor
            .execute_on_node("worker-1", &command(&["true"]))
            .unwrap_err();
        assert!(matches!(err, PreflightError::ExecLaunchFailed { .. }));
    }
}
