/*!
 * `pbt pull` - download a manifest from the registry
 */

use crate::commands::registry_client;
use crate::config::Config;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Pull `org/name:version` from the registry into a local YAML file.
pub fn run(config: &Config, package_spec: &str, output_dir: Option<&str>) -> Result<()> {
    let (org, name, version) = parse_package_spec(package_spec)?;

    let client = registry_client(config)?;
    println!("Pulling {}/{}:{}...", org, name, version);
    let bytes = client.fetch_manifest(&org, &name, &version)?;

    let filename = format!("{}-{}.yaml", name, version);
    let path = match output_dir {
        Some(dir) => Path::new(dir).join(&filename),
        None => Path::new(&filename).to_path_buf(),
    };
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;

    println!("Saved {}", path.display());
    Ok(())
}

/// Split `org/name:version` into its parts.
fn parse_package_spec(spec: &str) -> Result<(String, String, String)> {
    let Some((org, rest)) = spec.split_once('/') else {
        bail!("invalid package format: {} (expected org/name:version)", spec);
    };
    let Some((name, version)) = rest.rsplit_once(':') else {
        bail!("please specify version (e.g., {}:0.1.0)", spec);
    };
    if org.is_empty() || name.is_empty() || version.is_empty() {
        bail!("invalid package format: {} (expected org/name:version)", spec);
    }
    Ok((org.to_string(), name.to_string(), version.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_package_spec() {
        let (org, name, version) = parse_package_spec("acme/reviewer:1.0.0").unwrap();
        assert_eq!((org.as_str(), name.as_str(), version.as_str()), ("acme", "reviewer", "1.0.0"));
    }

    #[test]
    fn test_parse_package_spec_requires_version() {
        assert!(parse_package_spec("acme/reviewer").is_err());
    }

    #[test]
    fn test_parse_package_spec_requires_org() {
        assert!(parse_package_spec("reviewer:1.0.0").is_err());
        assert!(parse_package_spec("/reviewer:1.0.0").is_err());
    }
}
