//! Schema validation for prompt manifests
//!
//! Validation accumulates every violation found rather than stopping at the
//! first, so a single pass reports the complete picture. Length ceilings
//! count characters, not bytes.

use crate::error::{Error, Result};
use crate::manifest::{Manifest, Persona, Variable};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Package name: starts and ends with lowercase alnum, interior may contain
/// `-` and `_`, 1-40 characters overall.
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([a-z0-9_-]{0,38}[a-z0-9])?$").expect("valid regex"));

/// Semantic version: numeric major.minor.patch with an optional pre-release
/// suffix introduced by `-` after the patch segment.
static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+(-.+)?$").expect("valid regex"));

/// Variable name: letter first, then letters, digits, or underscores.
static VARIABLE_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid regex"));

/// Validate a manifest against the schema, returning every violation found.
///
/// An empty list means the manifest is valid. Runs on resolved and
/// unresolved manifests alike; inheritance is not followed here.
pub fn validate(manifest: &Manifest) -> Vec<String> {
    let mut violations = Vec::new();

    for field in manifest.missing_required() {
        violations.push(format!("missing required field: {}", field));
    }

    if !manifest.name.is_empty() && !NAME_PATTERN.is_match(&manifest.name) {
        violations.push(format!(
            "name '{}' must match pattern: ^[a-z0-9]([a-z0-9-_]{{0,38}}[a-z0-9])?$",
            manifest.name
        ));
    }

    if !manifest.version.is_empty() && !VERSION_PATTERN.is_match(&manifest.version) {
        violations.push(format!(
            "version '{}' must follow semantic versioning: major.minor.patch",
            manifest.version
        ));
    }

    validate_variables(&manifest.variables, &mut violations);

    if let Some(persona) = &manifest.persona {
        validate_persona(persona, &mut violations);
    }

    violations
}

/// Validate a manifest, failing with an aggregate [`Error::Validation`] if
/// any violation is found.
pub fn ensure_valid(manifest: &Manifest) -> Result<()> {
    let violations = validate(manifest);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::validation(violations))
    }
}

fn validate_variables(variables: &[Variable], violations: &mut Vec<String>) {
    let mut seen = HashSet::new();
    let mut duplicate_reported = false;

    for v in variables {
        if !seen.insert(v.name.clone()) && !duplicate_reported {
            violations.push(format!("duplicate variable name: {}", v.name));
            duplicate_reported = true;
        }

        if !VARIABLE_NAME_PATTERN.is_match(&v.name) {
            violations.push(format!(
                "variable name '{}' must match pattern: ^[a-zA-Z][a-zA-Z0-9_]*$",
                v.name
            ));
        }

        if v.description.chars().count() > 120 {
            violations.push(format!("variable '{}' description exceeds 120 characters", v.name));
        }

        if v.example.chars().count() > 120 {
            violations.push(format!("variable '{}' example exceeds 120 characters", v.name));
        }
    }
}

fn validate_persona(persona: &Persona, violations: &mut Vec<String>) {
    let scalar_ceilings = [
        ("name", &persona.name, 100),
        ("role", &persona.role, 100),
        ("experience", &persona.experience, 100),
        ("background", &persona.background, 500),
        ("tone", &persona.tone, 50),
        ("style", &persona.style, 50),
        ("languageLevel", &persona.language_level, 50),
        ("interactionStyle", &persona.interaction_style, 200),
        ("approach", &persona.approach, 50),
        ("outputFormat", &persona.output_format, 50),
    ];
    for (field, value, max) in scalar_ceilings {
        if value.chars().count() > max {
            violations.push(format!("persona {} exceeds {} characters", field, max));
        }
    }

    let array_ceilings = [
        ("personality", &persona.personality, 10, 50),
        ("expertise", &persona.expertise, 20, 50),
        ("focus", &persona.focus, 10, 50),
        ("constraints", &persona.constraints, 10, 200),
        ("preferences", &persona.preferences, 10, 200),
    ];
    for (field, items, max_items, max_len) in array_ceilings {
        if items.len() > max_items {
            violations.push(format!("persona {} array exceeds {} items", field, max_items));
        }
        for item in items.iter() {
            if item.chars().count() > max_len {
                violations.push(format!(
                    "persona {} item '{}' exceeds {} characters",
                    field, item, max_len
                ));
            }
        }
    }
}
