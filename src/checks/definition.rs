//! Check definitions and the closed set of check kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PreflightError, Result};

/// The kinds of check the registry knows how to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// A CustomResourceDefinition is installed.
    Crd,
    /// Every node runs a containerd inside the version ranges.
    ContainerdVersion,
    /// A RuntimeClass exists.
    RuntimeClass,
    /// A deployment exists and its image tag is inside the version ranges.
    DeploymentRunning,
    /// A binary is present on every node.
    BinaryOnNodes,
}

impl CheckKind {
    /// Every kind, in catalog documentation order.
    pub const ALL: [CheckKind; 5] = [
        CheckKind::Crd,
        CheckKind::ContainerdVersion,
        CheckKind::RuntimeClass,
        CheckKind::DeploymentRunning,
        CheckKind::BinaryOnNodes,
    ];

    /// Wire name used by the catalog's `checkType` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Crd => "crd",
            CheckKind::ContainerdVersion => "containerd-version-on-nodes",
            CheckKind::RuntimeClass => "runtimeclass",
            CheckKind::DeploymentRunning => "deployment-running",
            CheckKind::BinaryOnNodes => "binary-installed-on-nodes",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        CheckKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown check type '{}'", s))
    }
}

/// One entry of the check catalog.
///
/// The kind stays a plain string so that a catalog with an unsupported kind
/// still loads; the runner rejects it before any probe runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDefinition {
    /// Unique name, also used as an override key
    pub name: String,

    /// Kind of probe to run
    #[serde(rename = "checkType")]
    pub kind: String,

    /// Object the probe inspects (CRD name, deployment name, binary name...)
    #[serde(default)]
    pub resource_name: String,

    /// Acceptable versions; empty means any version passes
    #[serde(rename = "semver", default, skip_serializing_if = "Vec::is_empty")]
    pub version_ranges: Vec<String>,

    /// Container selector for deployment checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,

    /// Instructions shown when the check fails
    #[serde(rename = "howToFix", default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl CheckDefinition {
    /// Create a definition with no version gate and no remediation.
    pub fn new(
        name: impl Into<String>,
        kind: CheckKind,
        resource_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.as_str().to_string(),
            resource_name: resource_name.into(),
            version_ranges: Vec::new(),
            image_name: None,
            remediation: None,
        }
    }

    /// Set the version ranges.
    pub fn with_ranges<S: Into<String>>(mut self, ranges: impl IntoIterator<Item = S>) -> Self {
        self.version_ranges = ranges.into_iter().map(Into::into).collect();
        self
    }

    /// Set the container image selector.
    pub fn with_image_name(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = Some(image_name.into());
        self
    }

    /// Set the remediation text.
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    /// Resolve the kind string.
    pub fn kind(&self) -> Result<CheckKind> {
        self.kind
            .parse()
            .map_err(|_| PreflightError::UnknownCheckKind {
                check: self.name.clone(),
                kind: self.kind.clone(),
            })
    }

    /// Whether the check restricts acceptable versions.
    pub fn has_version_gate(&self) -> bool {
        !self.version_ranges.is_empty()
    }
}
