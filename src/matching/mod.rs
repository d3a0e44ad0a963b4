//! Comparison primitives shared by several probes.
//!
//! # Modules
//!
//! - [`version`] - Semantic version range matching
//! - [`image`] - Container image reference parsing

pub mod image;
pub mod version;

pub use image::{resolve, ImageRef};
pub use version::{matches, parse_version, VersionRange};
