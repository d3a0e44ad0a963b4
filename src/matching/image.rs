//! Container image reference parsing.
//!
//! Deployment probes identify a container by the short name of its image
//! (the last path segment of the repository) and compare the image tag
//! against the check's version ranges.

use oci_distribution::Reference;

use crate::error::{PreflightError, Result};

/// Tag assumed when a reference names neither a tag nor a digest.
pub const DEFAULT_TAG: &str = "latest";

/// Short name and tag of a parsed image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Final path segment of the repository (`controller` for
    /// `ghcr.io/acme/controller:1.0`).
    pub short_name: String,
    /// Explicit tag, else the digest, else [`DEFAULT_TAG`].
    pub tag: String,
}

/// Parse an image reference into its short name and tag.
///
/// # Example
///
/// ```
/// use spin_preflight::matching::resolve;
///
/// let image = resolve("ghcr.io/spinkube/spin-operator:v0.4.0").unwrap();
/// assert_eq!(image.short_name, "spin-operator");
/// assert_eq!(image.tag, "v0.4.0");
/// ```
pub fn resolve(image_ref: &str) -> Result<ImageRef> {
    let reference: Reference =
        image_ref
            .parse()
            .map_err(|e| PreflightError::InvalidImageReference {
                reference: image_ref.to_string(),
                message: format!("{}", e),
            })?;

    let repository = reference.repository();
    let short_name = repository
        .rsplit_once('/')
        .map_or(repository, |(_, last)| last)
        .to_string();

    let tag = reference
        .tag()
        .or_else(|| reference.digest())
        .unwrap_or(DEFAULT_TAG)
        .to_string();

    Ok(ImageRef { short_name, tag })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_qualified_reference_uses_last_segment() {
        let image = resolve("registry/controller:2.3.1").unwrap();
        assert_eq!(image.short_name, "controller");
        assert_eq!(image.tag, "2.3.1");
    }

    #[test]
    fn registry_host_is_stripped() {
        let image = resolve("ghcr.io/spinkube/containerd-shim-spin/node-installer:v0.15.1").unwrap();
        assert_eq!(image.short_name, "node-installer");
        assert_eq!(image.tag, "v0.15.1");
    }

    #[test]
    fn registry_with_port() {
        let image = resolve("localhost:5000/controller:2.0.0").unwrap();
        assert_eq!(image.short_name, "controller");
        assert_eq!(image.tag, "2.0.0");
    }

    #[test]
    fn bare_name_keeps_its_name() {
        let image = resolve("controller:1.2.3").unwrap();
        assert_eq!(image.short_name, "controller");
        assert_eq!(image.tag, "1.2.3");
    }

    #[test]
    fn missing_tag_defaults_to_latest() {
        let image = resolve("quay.io/jetstack/cert-manager-controller").unwrap();
        assert_eq!(image.short_name, "cert-manager-controller");
        assert_eq!(image.tag, DEFAULT_TAG);
    }

    #[test]
    fn malformed_reference_is_an_error() {
        let err = resolve("nginx:bad tag").unwrap_err();
        assert!(matches!(err, PreflightError::InvalidImageReference { .. }));
        assert!(resolve("").is_err());
    }
}
