//! Cluster access backed by the `kube` client.
//!
//! The client is async; every call is driven to completion on a private
//! current-thread runtime so that probes stay plain blocking functions and
//! requests go out one at a time, in order.

use std::fmt::Debug;

use anyhow::Context;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Node;
use k8s_openapi::api::node::v1::RuntimeClass;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::{Api, ListParams};
use kube::config::KubeConfigOptions;
use kube::{Client, Config, Resource};
use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Runtime};

use super::{ClusterApi, ContainerSummary, DeploymentSummary, NodeSummary};
use crate::error::{PreflightError, Result};

/// [`ClusterApi`] implementation talking to a live API server.
pub struct KubeCluster {
    client: Client,
    runtime: Runtime,
}

impl KubeCluster {
    /// Connect using the local kubeconfig or in-cluster environment.
    ///
    /// `context` selects a kubeconfig context; `None` uses the current one.
    pub fn connect(context: Option<&str>) -> Result<Self> {
        let runtime = client_runtime()?;

        let client = runtime.block_on(async {
            let config = match context {
                Some(ctx) => {
                    let options = KubeConfigOptions {
                        context: Some(ctx.to_string()),
                        ..Default::default()
                    };
                    Config::from_kubeconfig(&options)
                        .await
                        .map_err(|e| PreflightError::cluster("load kubeconfig", e))?
                }
                None => Config::infer()
                    .await
                    .map_err(|e| PreflightError::cluster("infer kubeconfig", e))?,
            };
            Client::try_from(config).map_err(|e| PreflightError::cluster("create client", e))
        })?;

        tracing::debug!("Connected to cluster (context: {:?})", context);
        Ok(Self { client, runtime })
    }

    fn get_cluster_scoped<K>(&self, resource: &str, name: &str) -> Result<()>
    where
        K: Resource + Clone + DeserializeOwned + Debug,
        K::DynamicType: Default,
    {
        let api: Api<K> = Api::all(self.client.clone());
        match self.runtime.block_on(api.get_opt(name)) {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(PreflightError::NotFound {
                resource: resource.to_string(),
                name: name.to_string(),
            }),
            Err(e) => Err(PreflightError::cluster(
                format!("get {} {}", resource, name),
                e,
            )),
        }
    }

    fn list_all<K>(&self, resource: &str) -> Result<Vec<K>>
    where
        K: Resource + Clone + DeserializeOwned + Debug,
        K::DynamicType: Default,
    {
        let api: Api<K> = Api::all(self.client.clone());
        let list = self
            .runtime
            .block_on(api.list(&ListParams::default()))
            .map_err(|e| PreflightError::cluster(format!("list {}", resource), e))?;
        Ok(list.items)
    }
}

impl ClusterApi for KubeCluster {
    fn custom_resource_definition(&self, name: &str) -> Result<()> {
        self.get_cluster_scoped::<CustomResourceDefinition>("CustomResourceDefinition", name)
    }

    fn runtime_class(&self, name: &str) -> Result<()> {
        self.get_cluster_scoped::<RuntimeClass>("RuntimeClass", name)
    }

    fn list_nodes(&self) -> Result<Vec<NodeSummary>> {
        let nodes = self.list_all::<Node>("nodes")?;
        Ok(nodes.into_iter().map(node_summary).collect())
    }

    fn list_deployments(&self) -> Result<Vec<DeploymentSummary>> {
        let deployments = self.list_all::<Deployment>("deployments")?;
        Ok(deployments.into_iter().map(deployment_summary).collect())
    }
}

fn node_summary(node: Node) -> NodeSummary {
    let container_runtime_version = node
        .status
        .and_then(|status| status.node_info)
        .map(|info| info.container_runtime_version)
        .unwrap_or_default();

    NodeSummary {
        name: node.metadata.name.unwrap_or_default(),
        container_runtime_version,
    }
}

fn deployment_summary(deployment: Deployment) -> DeploymentSummary {
    let containers = deployment
        .spec
        .and_then(|spec| spec.template.spec)
        .map(|pod| pod.containers)
        .unwrap_or_default()
        .into_iter()
        .map(|container| ContainerSummary {
            name: container.name,
            image: container.image.unwrap_or_default(),
        })
        .collect();

    DeploymentSummary {
        namespace: deployment.metadata.namespace.unwrap_or_default(),
        name: deployment.metadata.name.unwrap_or_default(),
        containers,
    }
}

fn client_runtime() -> anyhow::Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the runtime for the Kubernetes client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::DeploymentSpec;
    use k8s_openapi::api::core::v1::{Container, NodeStatus, NodeSystemInfo, PodSpec, PodTemplateSpec};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    #[test]
    fn client_runtime_drives_futures() {
        let runtime = client_runtime().unwrap();
        assert_eq!(runtime.block_on(async { 7 }), 7);
    }

    #[test]
    fn node_summary_reads_runtime_banner() {
        let node = Node {
            metadata: ObjectMeta {
                name: Some("k3d-dev-server-0".to_string()),
                ..Default::default()
            },
            status: Some(NodeStatus {
                node_info: Some(NodeSystemInfo {
                    container_runtime_version: "containerd://1.7.11-k3s2".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let summary = node_summary(node);
        assert_eq!(summary.name, "k3d-dev-server-0");
        assert_eq!(summary.container_runtime_version, "containerd://1.7.11-k3s2");
    }

    #[test]
    fn node_without_status_has_empty_banner() {
        let summary = node_summary(Node::default());
        assert!(summary.container_runtime_version.is_empty());
    }

    #[test]
    fn deployment_summary_keeps_container_order() {
        let deployment = Deployment {
            metadata: ObjectMeta {
                name: Some("spin-operator-controller-manager".to_string()),
                namespace: Some("spin-operator".to_string()),
                ..Default::default()
            },
            spec: Some(DeploymentSpec {
                template: PodTemplateSpec {
                    spec: Some(PodSpec {
                        containers: vec![
                            Container {
                                name: "kube-rbac-proxy".to_string(),
                                image: Some("gcr.io/kubebuilder/kube-rbac-proxy:v0.15.0".to_string()),
                                ..Default::default()
                            },
                            Container {
                                name: "manager".to_string(),
                                image: Some("ghcr.io/spinkube/spin-operator:v0.4.0".to_string()),
                                ..Default::default()
                            },
                        ],
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        };

        let summary = deployment_summary(deployment);
        assert_eq!(summary.namespace, "spin-operator");
        assert_eq!(summary.containers.len(), 2);
        assert_eq!(summary.containers[1].name, "manager");
        assert_eq!(summary.containers[1].image, "ghcr.io/spinkube/spin-operator:v0.4.0");
    }
}
