/*!
 * `pbt render` - flatten, compose, and substitute into a prompt document
 */

use crate::loader::Loader;
use anyhow::{Context, Result};
use promptbucket_core_manifest::{
    persona, resolve, substitute, validate, Manifest, MANIFEST_FILE,
};
use std::fs;

/// Render a prompt document from a manifest.
///
/// `manifest_ref` names a local path or URL; when absent the working
/// directory's manifest is used. Writes `<name>-<version>-prompt.md`.
pub fn run(manifest_ref: Option<&str>, var_flags: &[String]) -> Result<()> {
    let vars = substitute::parse_var_flags(var_flags)?;

    let loader = Loader::new();
    let reference = manifest_ref.unwrap_or(MANIFEST_FILE);
    let raw = loader.fetch_bytes(reference)?;
    let manifest = Manifest::parse(&raw)?;

    validate::ensure_valid(&manifest)?;

    let flattened = resolve::resolve_from(&manifest, Some(reference), &loader)?;
    substitute::validate_variables(&flattened, &vars)?;

    let composed = persona::compose(&flattened);
    let rendered = substitute::substitute(&composed, &vars);

    let filename = flattened.prompt_filename();
    fs::write(&filename, rendered).with_context(|| format!("failed to write {}", filename))?;

    println!("Generated {} with resolved variables", filename);
    Ok(())
}
