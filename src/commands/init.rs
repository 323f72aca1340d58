/*!
 * `pbt init` - interactive scaffold for a new prompt package
 */

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use promptbucket_core_manifest::MANIFEST_FILE;
use std::fs;
use std::path::Path;

/// Create a starter manifest in the working directory.
pub fn run() -> Result<()> {
    println!("{}", style("Creating a new prompt package").cyan().bold());

    if Path::new(MANIFEST_FILE).exists()
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} already exists. Overwrite?", MANIFEST_FILE))
            .default(false)
            .interact()?
    {
        println!("{}", style("Manifest unchanged.").cyan());
        return Ok(());
    }

    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Package name")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.is_empty() {
                Err("name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let version: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Version")
        .default("0.1.0".to_string())
        .interact_text()?;

    let licence: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Licence")
        .default("Apache-2.0".to_string())
        .interact_text()?;

    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;

    let content = scaffold(&name, &version, &licence, &description);
    fs::write(MANIFEST_FILE, content)?;

    println!(
        "\n{} Created {}. Edit the prompt, then run {} to package it.",
        style("✓").green().bold(),
        MANIFEST_FILE,
        style("pbt build").cyan()
    );
    Ok(())
}

fn scaffold(name: &str, version: &str, licence: &str, description: &str) -> String {
    let mut out = format!(
        "name: {}\nversion: {}\nlicence: {}\n",
        name, version, licence
    );
    if !description.is_empty() {
        out.push_str(&format!("description: {}\n", description));
    }
    out.push_str(
        "\n# Declared template variables, referenced as {{name}} in the prompt.\n\
         variables:\n\
         \x20 - name: topic\n\
         \x20   description: Subject the prompt should focus on\n\
         \x20   example: error handling\n\
         \n\
         # Optional persona, composed into a prose preamble at render time.\n\
         # persona:\n\
         #   role: Senior Engineer\n\
         #   tone: direct\n\
         \n\
         prompt: |\n\
         \x20 Write a short review of {{topic}}.\n",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptbucket_core_manifest::{validate, Manifest};

    #[test]
    fn test_scaffold_parses_and_validates() {
        let yaml = scaffold("my-prompt", "0.1.0", "MIT", "A test package");
        let manifest = Manifest::parse(yaml.as_bytes()).unwrap();
        assert_eq!(manifest.name, "my-prompt");
        assert_eq!(manifest.variables.len(), 1);
        assert!(validate::validate(&manifest).is_empty());
    }

    #[test]
    fn test_scaffold_omits_empty_description() {
        let yaml = scaffold("x", "0.1.0", "MIT", "");
        assert!(!yaml.contains("description:"));
    }
}
