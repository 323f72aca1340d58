/*!
 * `pbt validate` - schema validation report for a manifest
 */

use crate::loader::Loader;
use anyhow::{bail, Context, Result};
use promptbucket_core_manifest::{resolve, validate, Manifest, MANIFEST_FILE};
use std::fs;
use std::path::{Path, PathBuf};

/// Validate a manifest file, printing every violation found.
///
/// `target` may be a YAML file path or a package directory; when absent
/// the working directory's manifest is validated. When the manifest names
/// a parent, the inheritance chain is exercised as well.
pub fn run(target: Option<&str>) -> Result<()> {
    let path = manifest_path(target);
    if !path.exists() {
        bail!("manifest file not found: {}", path.display());
    }

    let raw = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let manifest = Manifest::parse(&raw)
        .with_context(|| format!("invalid YAML syntax in {}", path.display()))?;

    let violations = validate::validate(&manifest);
    if !violations.is_empty() {
        println!("Validation failed for {}:", path.display());
        for violation in &violations {
            println!("  - {}", violation);
        }
        bail!("validation failed");
    }

    println!("{} is valid", path.display());

    if !manifest.from.is_empty() {
        println!("Checking inheritance chain...");
        let loader = Loader::new();
        match resolve::resolve_from(&manifest, path.to_str(), &loader) {
            Ok(_) => println!("Inheritance chain is valid"),
            Err(e) => println!("Warning: inheritance validation failed: {}", e),
        }
    }

    Ok(())
}

/// Resolve the manifest path from the optional CLI argument.
fn manifest_path(target: Option<&str>) -> PathBuf {
    match target {
        None => PathBuf::from(MANIFEST_FILE),
        Some(name) => {
            let path = Path::new(name);
            match path.extension().and_then(|e| e.to_str()) {
                Some("yaml") | Some("yml") => path.to_path_buf(),
                _ => path.join(MANIFEST_FILE),
            }
        }
    }
}
