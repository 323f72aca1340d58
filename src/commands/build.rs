/*!
 * `pbt build` - package the local manifest into a distribution archive
 */

use anyhow::{bail, Context, Result};
use promptbucket_core_manifest::{archive, Manifest, MANIFEST_FILE};
use std::fs;
use std::path::Path;

/// Build the archive from the working directory's manifest.
///
/// The archive packages the exact raw manifest bytes; inheritance is not
/// resolved here.
pub fn run() -> Result<()> {
    let raw = fs::read(MANIFEST_FILE)
        .with_context(|| format!("failed to read {}", MANIFEST_FILE))?;
    let manifest = Manifest::parse(&raw)?;

    let missing = manifest.missing_required();
    if !missing.is_empty() {
        bail!("manifest missing required fields: {}", missing.join(", "));
    }

    let artifact = archive::build_archive(&raw, &manifest.name, &manifest.version, Path::new("."))?;
    println!(
        "{}\t{} KB\t{}",
        artifact.path.display(),
        artifact.size / 1024,
        artifact.digest
    );
    Ok(())
}
