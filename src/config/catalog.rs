//! Check catalog discovery and loading.
//!
//! A catalog is an ordered YAML list of check definitions. The built-in
//! catalog is compiled into the binary; `--checks <file>` replaces it.
//! JSON catalogs load too, since JSON is valid YAML.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::checks::CheckDefinition;
use crate::error::{PreflightError, Result};

/// The catalog shipped with the binary.
pub const BUILTIN_CATALOG: &str = include_str!("default_checks.yaml");

/// Ordered list of checks evaluated in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckCatalog {
    checks: Vec<CheckDefinition>,
}

impl CheckCatalog {
    /// Build a catalog from definitions, validating them.
    pub fn new(checks: Vec<CheckDefinition>) -> Result<Self> {
        let checks = checks.into_iter().map(normalize).collect::<Vec<_>>();
        validate(&checks)?;
        Ok(Self { checks })
    }

    /// The built-in catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG, "built-in catalog")
    }

    /// Load a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PreflightError::CatalogNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content, &path.display().to_string())
    }

    /// Parse a catalog from YAML (or JSON) text.
    ///
    /// `source_name` only labels errors.
    pub fn from_yaml(content: &str, source_name: &str) -> Result<Self> {
        let checks: Vec<CheckDefinition> =
            serde_yaml::from_str(content).map_err(|e| PreflightError::CatalogParseError {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!("Loaded {} checks from {}", checks.len(), source_name);
        Self::new(checks)
    }

    /// Checks in catalog order.
    pub fn checks(&self) -> &[CheckDefinition] {
        &self.checks
    }

    /// Look up a check by name.
    pub fn get(&self, name: &str) -> Option<&CheckDefinition> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Number of checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether the catalog has no checks.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Load the catalog at `path`, or the built-in one when `path` is None.
pub fn load_catalog(path: Option<&Path>) -> Result<CheckCatalog> {
    match path {
        Some(p) => CheckCatalog::load(p),
        None => CheckCatalog::builtin(),
    }
}

// Blank optional fields mean "not set".
fn normalize(mut check: CheckDefinition) -> CheckDefinition {
    check.image_name = check
        .image_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    check.remediation = check.remediation.filter(|s| !s.trim().is_empty());
    check
}

fn validate(checks: &[CheckDefinition]) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, check) in checks.iter().enumerate() {
        if check.name.trim().is_empty() {
            return Err(PreflightError::InvalidCatalog {
                message: format!("check #{} has no name", index + 1),
            });
        }
        if !seen.insert(check.name.as_str()) {
            return Err(PreflightError::InvalidCatalog {
                message: format!("duplicate check name '{}'", check.name),
            });
        }
        if check.resource_name.trim().is_empty() {
            return Err(PreflightError::InvalidCatalog {
                message: format!("check '{}' has no resourceName", check.name),
            });
        }
    }
    Ok(())
}
