//! Inheritance resolution for manifests with a parent reference
//!
//! A manifest may name a parent via `from` (local path or URL). Resolution
//! repeatedly fetches and merges ancestors, child winning over parent, up to
//! a bounded depth. The fetch itself is delegated to a [`ManifestSource`] so
//! the pipeline stays independent of how bytes are obtained.

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::MAX_INHERITANCE_DEPTH;
use std::collections::HashSet;
use tracing::debug;

/// Supplies parent manifests during inheritance resolution.
///
/// Implementations fetch from disk, the network, or memory. A fetch is
/// attempted exactly once per hop; retries are the caller's concern.
pub trait ManifestSource {
    /// Fetch and parse the manifest named by `reference`.
    fn fetch(&self, reference: &str) -> Result<Manifest>;
}

/// Flatten a manifest's inheritance chain into a single self-contained
/// manifest.
///
/// Equivalent to [`resolve_from`] with no origin reference.
pub fn resolve(manifest: &Manifest, source: &dyn ManifestSource) -> Result<Manifest> {
    resolve_from(manifest, None, source)
}

/// Flatten a manifest's inheritance chain, seeding cycle detection with the
/// reference the manifest itself was loaded from.
///
/// The input is never mutated; the result is a new value with `from`
/// cleared. Chains longer than [`MAX_INHERITANCE_DEPTH`] hops fail with
/// [`Error::ChainTooDeep`]. A chain that revisits a reference it has already
/// fetched (or the origin itself) fails with [`Error::InheritanceCycle`],
/// even when the revisit would land inside the depth bound.
pub fn resolve_from(
    manifest: &Manifest,
    origin: Option<&str>,
    source: &dyn ManifestSource,
) -> Result<Manifest> {
    let mut current = manifest.clone();
    let mut visited: HashSet<String> = HashSet::new();
    if let Some(origin) = origin {
        visited.insert(origin.to_string());
    }
    let mut depth = 0;

    while !current.from.is_empty() && depth < MAX_INHERITANCE_DEPTH {
        let reference = current.from.clone();
        if !visited.insert(reference.clone()) {
            return Err(Error::InheritanceCycle { reference });
        }

        debug!(reference = %reference, depth, "fetching parent manifest");
        let parent = source.fetch(&reference)?;

        // Merge clears `from`; the chain continues from the parent's own
        // reference until the topmost ancestor is reached.
        let remaining = parent.from.clone();
        current = Manifest::merge(&parent, &current);
        current.from = remaining;
        depth += 1;
    }

    if !current.from.is_empty() {
        return Err(Error::ChainTooDeep {
            max: MAX_INHERITANCE_DEPTH,
        });
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory source backed by a reference → manifest map.
    struct MapSource(HashMap<String, Manifest>);

    impl ManifestSource for MapSource {
        fn fetch(&self, reference: &str) -> Result<Manifest> {
            self.0
                .get(reference)
                .cloned()
                .ok_or_else(|| Error::fetch(reference, "not found"))
        }
    }

    fn manifest(name: &str, from: &str) -> Manifest {
        Manifest {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            licence: "MIT".to_string(),
            prompt: format!("{} prompt", name),
            from: from.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_without_parent_is_identity() {
        let m = manifest("standalone", "");
        let resolved = resolve(&m, &MapSource(HashMap::new())).unwrap();
        assert_eq!(resolved, m);
    }

    #[test]
    fn test_resolve_single_hop() {
        let mut parent = manifest("base", "");
        parent.description = "base description".to_string();
        let child = manifest("child", "base.yaml");

        let source = MapSource(HashMap::from([("base.yaml".to_string(), parent)]));
        let resolved = resolve(&child, &source).unwrap();

        assert_eq!(resolved.name, "child");
        assert_eq!(resolved.description, "base description");
        assert!(resolved.from.is_empty());
    }

    #[test]
    fn test_resolve_two_hops_merges_grandparent() {
        let mut grandparent = manifest("grandparent", "");
        grandparent.tags = vec!["root".to_string()];
        let parent = manifest("parent", "grandparent.yaml");
        let child = manifest("child", "parent.yaml");

        let source = MapSource(HashMap::from([
            ("grandparent.yaml".to_string(), grandparent),
            ("parent.yaml".to_string(), parent),
        ]));

        let resolved = resolve(&child, &source).unwrap();
        assert_eq!(resolved.name, "child");
        assert_eq!(resolved.tags, vec!["root"]);
        assert!(resolved.from.is_empty());
    }

    #[test]
    fn test_resolve_three_hops_fails() {
        let a = manifest("a", "");
        let b = manifest("b", "a.yaml");
        let c = manifest("c", "b.yaml");
        let d = manifest("d", "c.yaml");

        let source = MapSource(HashMap::from([
            ("a.yaml".to_string(), a),
            ("b.yaml".to_string(), b),
            ("c.yaml".to_string(), c),
        ]));

        let err = resolve(&d, &source).unwrap_err();
        assert!(matches!(err, Error::ChainTooDeep { max: 2 }));
    }

    #[test]
    fn test_resolve_detects_self_reference() {
        // b.yaml names itself as parent
        let b = manifest("b", "b.yaml");
        let child = manifest("child", "b.yaml");

        let source = MapSource(HashMap::from([("b.yaml".to_string(), b)]));
        let err = resolve(&child, &source).unwrap_err();
        assert!(matches!(err, Error::InheritanceCycle { .. }));
    }

    #[test]
    fn test_resolve_detects_cycle_through_origin() {
        // a → b → a revisits the origin inside the depth bound
        let a = manifest("a", "b.yaml");
        let b = manifest("b", "a.yaml");

        let source = MapSource(HashMap::from([
            ("a.yaml".to_string(), a.clone()),
            ("b.yaml".to_string(), b),
        ]));

        let err = resolve_from(&a, Some("a.yaml"), &source).unwrap_err();
        assert!(matches!(err, Error::InheritanceCycle { reference } if reference == "a.yaml"));
    }

    #[test]
    fn test_resolve_propagates_fetch_failure() {
        let child = manifest("child", "missing.yaml");
        let err = resolve(&child, &MapSource(HashMap::new())).unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_resolve_does_not_mutate_input() {
        let parent = manifest("base", "");
        let child = manifest("child", "base.yaml");
        let before = child.clone();

        let source = MapSource(HashMap::from([("base.yaml".to_string(), parent)]));
        let _ = resolve(&child, &source).unwrap();
        assert_eq!(child, before);
    }
}
