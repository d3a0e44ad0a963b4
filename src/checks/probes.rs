//! The built-in probes, one per [`CheckKind`](super::CheckKind).
//!
//! Every probe follows the same error split:
//!
//! - an object that does not exist is a failed outcome with no message
//! - a version or image that cannot be parsed fails the outcome with an
//!   explanation, and scanning moves on to the next item
//! - anything that stops the cluster from answering is returned as an error
//!   and aborts the run

use super::definition::CheckDefinition;
use super::node_probe::{run_on_each_node, NodeProbeReport};
use super::outcome::CheckOutcome;
use crate::cluster::{DeploymentSummary, HOST_ROOT};
use crate::error::{PreflightError, Result};
use crate::matching::{matches, resolve};
use crate::provider::Provider;

/// Prefix of the runtime banner reported by containerd nodes.
pub const CONTAINERD_PREFIX: &str = "containerd://";

/// Host directories searched for node binaries, in order.
pub const KNOWN_BIN_DIRS: [&str; 3] = ["/bin", "/usr/local/bin", "/usr/bin"];

/// Passes when the named CustomResourceDefinition is installed.
pub fn crd_installed(provider: &dyn Provider, check: &CheckDefinition) -> Result<CheckOutcome> {
    presence(
        check,
        provider.cluster().custom_resource_definition(&check.resource_name),
    )
}

/// Passes when the named RuntimeClass exists.
pub fn runtime_class_present(
    provider: &dyn Provider,
    check: &CheckDefinition,
) -> Result<CheckOutcome> {
    presence(check, provider.cluster().runtime_class(&check.resource_name))
}

fn presence(check: &CheckDefinition, lookup: Result<()>) -> Result<CheckOutcome> {
    match lookup {
        Ok(()) => Ok(CheckOutcome::passed(&check.name)),
        Err(e) if e.is_not_found() => {
            tracing::debug!("{}", e);
            Ok(CheckOutcome::failed(&check.name, ""))
        }
        Err(e) => Err(e),
    }
}

/// Passes when a deployment named `resource_name` exists in any namespace
/// and, if the check has version ranges, its selected container's image tag
/// satisfies them.
pub fn deployment_running(
    provider: &dyn Provider,
    check: &CheckDefinition,
) -> Result<CheckOutcome> {
    let deployments = provider.cluster().list_deployments()?;
    let Some(deployment) = deployments.iter().find(|d| d.name == check.resource_name) else {
        tracing::debug!("Deployment {} not found", check.resource_name);
        return Ok(CheckOutcome::failed(&check.name, ""));
    };

    if !check.has_version_gate() {
        return Ok(CheckOutcome::passed(&check.name));
    }

    let Some(tag) = image_tag(deployment, check.image_name.as_deref()) else {
        let selector = check.image_name.as_deref().unwrap_or("any");
        return Ok(CheckOutcome::failed(
            &check.name,
            format!(
                "no container with image '{}' in deployment {}/{}",
                selector, deployment.namespace, deployment.name
            ),
        ));
    };

    match matches(&tag, &check.version_ranges) {
        Ok(true) => Ok(CheckOutcome::passed(&check.name)),
        Ok(false) => Ok(CheckOutcome::failed(
            &check.name,
            format!(
                "version {} of {}/{} does not satisfy {}",
                tag,
                deployment.namespace,
                deployment.name,
                check.version_ranges.join(", ")
            ),
        )),
        Err(e) => Ok(CheckOutcome::failed(&check.name, e.to_string())),
    }
}

/// Tag of the container picked by `selector`.
///
/// A container matches when its image short name or its own name equals the
/// selector. Without a selector the first container with a parsable image
/// is used. Containers whose image cannot be parsed are skipped.
pub fn image_tag(deployment: &DeploymentSummary, selector: Option<&str>) -> Option<String> {
    deployment.containers.iter().find_map(|container| {
        let image = match resolve(&container.image) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!("Skipping container {}: {}", container.name, e);
                return None;
            }
        };
        let selected = match selector {
            Some(wanted) => image.short_name == wanted || container.name == wanted,
            None => true,
        };
        selected.then_some(image.tag)
    })
}

/// Passes when every node runs containerd, inside the version ranges when
/// the check has any.
///
/// Each offending node gets one line in the message.
pub fn containerd_version(
    provider: &dyn Provider,
    check: &CheckDefinition,
) -> Result<CheckOutcome> {
    let nodes = provider.cluster().list_nodes()?;
    let mut problems = Vec::new();

    for node in &nodes {
        let banner = node.container_runtime_version.as_str();
        let Some(version) = banner.strip_prefix(CONTAINERD_PREFIX) else {
            let runtime = if banner.is_empty() { "an unknown runtime" } else { banner };
            problems.push(format!("node {} runs {}, not containerd", node.name, runtime));
            continue;
        };

        if !check.has_version_gate() {
            continue;
        }

        match matches(version, &check.version_ranges) {
            Ok(true) => tracing::debug!("node {}: containerd {} ok", node.name, version),
            Ok(false) => problems.push(format!(
                "node {}: containerd {} does not satisfy {}",
                node.name,
                version,
                check.version_ranges.join(", ")
            )),
            Err(e) => problems.push(format!("node {}: {}", node.name, e)),
        }
    }

    if problems.is_empty() {
        Ok(CheckOutcome::passed(&check.name))
    } else {
        Ok(CheckOutcome::failed(&check.name, problems.join("\n")))
    }
}

/// Passes when `<dir>/<resource_name> -v` runs on every node.
///
/// Directories from [`KNOWN_BIN_DIRS`] are tried in order and the first one
/// where the command could be attempted decides the outcome. When no
/// directory could be attempted the result is inconclusive. A failure to
/// list nodes is returned as is.
pub fn binary_installed(provider: &dyn Provider, check: &CheckDefinition) -> Result<CheckOutcome> {
    let mut last_problem = String::from("no binary directories to search");

    for dir in KNOWN_BIN_DIRS {
        let path = format!("{}{}/{}", HOST_ROOT, dir, check.resource_name);
        let report = exec_on_each_node(provider, &[path.as_str(), "-v"])?;
        if report.attempted() {
            return Ok(outcome_from_report(check, &report));
        }
        last_problem = report.message();
        tracing::debug!("Could not probe {}: {}", path, last_problem);
    }

    Err(PreflightError::ProbeInconclusive {
        check: check.name.clone(),
        message: format!(
            "not sure whether {} is installed: {}",
            check.resource_name, last_problem
        ),
    })
}

/// Run a command on every node through the provider's capabilities.
pub fn exec_on_each_node(provider: &dyn Provider, command: &[&str]) -> Result<NodeProbeReport> {
    let command: Vec<String> = command.iter().map(|part| part.to_string()).collect();
    run_on_each_node(provider.cluster(), provider.executor(), &command)
}

/// Turn a node sweep into an outcome for `check`.
pub fn outcome_from_report(check: &CheckDefinition, report: &NodeProbeReport) -> CheckOutcome {
    if report.all_succeeded {
        CheckOutcome::passed(&check.name)
    } else {
        CheckOutcome::failed(&check.name, report.message())
    }
}
