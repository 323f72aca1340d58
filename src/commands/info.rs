/*!
 * `pbt info` - human-readable summary of a manifest
 */

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use console::style;
use promptbucket_core_manifest::{Manifest, MANIFEST_FILE};
use std::fs;

/// Print a summary of a manifest file.
pub fn run(path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(MANIFEST_FILE);
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path))?;
    let manifest = Manifest::parse(&raw)?;

    println!(
        "{} {}",
        style(&manifest.name).cyan().bold(),
        style(&manifest.version).dim()
    );
    if !manifest.description.is_empty() {
        println!("{}", manifest.description);
    }
    println!("Licence: {}", manifest.licence);
    if !manifest.language.is_empty() {
        println!("Language: {}", manifest.language);
    }
    if !manifest.model_hint.is_empty() {
        println!("Model hint: {}", manifest.model_hint);
    }
    if !manifest.from.is_empty() {
        println!("Inherits from: {}", manifest.from);
    }
    if !manifest.authors.is_empty() {
        println!("Authors: {}", manifest.authors.join(", "));
    }
    if !manifest.tags.is_empty() {
        println!("Tags: {}", manifest.tags.join(", "));
    }

    if let Some(persona) = &manifest.persona {
        let mut parts = Vec::new();
        if !persona.name.is_empty() {
            parts.push(persona.name.clone());
        }
        if !persona.role.is_empty() {
            parts.push(persona.role.clone());
        }
        if !parts.is_empty() {
            println!("Persona: {}", parts.join(", "));
        }
    }

    if !manifest.variables.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Variable", "Description", "Example"]);
        for variable in &manifest.variables {
            table.add_row(vec![
                variable.name.clone(),
                variable.description.clone(),
                variable.example.clone(),
            ]);
        }
        println!("\n{table}");
    }

    Ok(())
}
