//! Manifest resolution and packaging pipeline for PromptBucket
//!
//! This crate is the core of the PromptBucket CLI: it turns a declarative
//! prompt manifest into a rendered prompt document and a reproducible,
//! content-addressed distribution archive.
//!
//! # Key Concepts
//!
//! - **Manifest**: the declarative source record for a prompt package
//!   (metadata + template + persona + variables + optional parent)
//! - **Flattening**: resolving a manifest's inheritance chain into one
//!   self-contained manifest, bounded at [`MAX_INHERITANCE_DEPTH`] hops
//! - **Archive**: the distributable package file, a magic header followed
//!   by the gzipped tar of the raw manifest bytes, addressed by SHA-256
//!
//! # Example
//!
//! ```no_run
//! use promptbucket_core_manifest::{archive, persona, substitute, Manifest};
//! use std::collections::HashMap;
//!
//! let bytes = std::fs::read("promptbucket.yaml")?;
//! let manifest = Manifest::parse(&bytes)?;
//!
//! let vars = HashMap::from([("lang".to_string(), "Rust".to_string())]);
//! substitute::validate_variables(&manifest, &vars)?;
//! let rendered = substitute::substitute(&persona::compose(&manifest), &vars);
//!
//! let artifact = archive::build_archive(
//!     &bytes,
//!     &manifest.name,
//!     &manifest.version,
//!     std::path::Path::new("."),
//! )?;
//! # Ok::<(), promptbucket_core_manifest::Error>(())
//! ```

pub mod archive;
pub mod error;
pub mod manifest;
pub mod persona;
pub mod resolve;
pub mod substitute;
pub mod validate;

// Re-export main types for convenience
pub use archive::{build_archive, Artifact};
pub use error::{Error, Result};
pub use manifest::{Manifest, Persona, Variable};
pub use resolve::{resolve, resolve_from, ManifestSource};
pub use validate::{ensure_valid, validate};

/// Canonical manifest filename in a package directory
pub const MANIFEST_FILE: &str = "promptbucket.yaml";

/// Format fingerprint prefixed to every archive
pub const MAGIC_HEADER: &[u8] = b"PBT1";

/// Archive file extension
pub const ARCHIVE_EXT: &str = "promptbucket";

/// Maximum number of parent merges during inheritance resolution
pub const MAX_INHERITANCE_DEPTH: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(MANIFEST_FILE, "promptbucket.yaml");
        assert_eq!(MAGIC_HEADER, b"PBT1");
        assert_eq!(MAX_INHERITANCE_DEPTH, 2);
    }
}
