//! Settings for reaching the cluster.

use std::path::PathBuf;

/// Default image for node debug sessions.
pub const DEFAULT_DEBUG_IMAGE: &str = "ubuntu";

/// How to reach the cluster and its nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSettings {
    /// Kubeconfig context (None = current context)
    pub context: Option<String>,
    /// kubectl binary used for node debug sessions
    pub kubectl: PathBuf,
    /// Image for node debug sessions
    pub debug_image: String,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            context: None,
            kubectl: PathBuf::from("kubectl"),
            debug_image: DEFAULT_DEBUG_IMAGE.to_string(),
        }
    }
}
