//! Manifest data structures and inheritance merging
//!
//! A Manifest is the declarative source record for a prompt package:
//! metadata, an optional persona, declared template variables, an optional
//! parent reference, and the raw prompt template.

use crate::error::Result;
use crate::ARCHIVE_EXT;
use serde::{Deserialize, Serialize};

/// A declared template variable, resolved at render time
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Variable {
    /// Placeholder name referenced as `{{name}}` in the prompt
    #[serde(default)]
    pub name: String,

    /// Human-readable description (max 120 characters)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Example value (max 120 characters)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,

    /// Advisory list of allowed values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub r#enum: Vec<String>,
}

/// Structured persona attributes, synthesized into a prose preamble
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    // Identity
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,

    // Traits
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub personality: Vec<String>,

    // Expertise
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expertise: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub experience: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub background: String,

    // Communication
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language_level: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub interaction_style: String,

    // Behavior
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub approach: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub focus: Vec<String>,

    // Guidelines
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferences: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output_format: String,
}

/// The unit of distribution: a prompt package manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Package name (lowercase alnum with interior `-`/`_`, max 40 chars)
    #[serde(default)]
    pub name: String,

    /// Semantic version (major.minor.patch, optional pre-release suffix)
    #[serde(default)]
    pub version: String,

    /// Licence identifier
    #[serde(default)]
    pub licence: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model_hint: String,

    /// Parent manifest reference: local path or HTTP(S) URL
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,

    /// Raw prompt template, may contain `{{variable}}` tokens
    #[serde(default)]
    pub prompt: String,

    /// Informational only; the authoritative digest is computed at archive time
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub digest: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
}

impl Manifest {
    /// Decode a manifest from raw YAML bytes
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_slice(bytes)?;
        Ok(manifest)
    }

    /// Names of required fields that are empty
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.version.is_empty() {
            missing.push("version");
        }
        if self.licence.is_empty() {
            missing.push("licence");
        }
        if self.prompt.is_empty() {
            missing.push("prompt");
        }
        missing
    }

    /// Whether all required fields are non-empty
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Deterministic rendered prompt filename: `<name>-<version>-prompt.md`
    pub fn prompt_filename(&self) -> String {
        format!("{}-{}-prompt.md", self.name, self.version)
    }

    /// Deterministic archive filename: `<name>-<version>.promptbucket`
    pub fn archive_filename(&self) -> String {
        format!("{}-{}.{}", self.name, self.version, ARCHIVE_EXT)
    }

    /// Merge a parent manifest against a child, child taking precedence.
    ///
    /// Scalars and whole sequences are child-wins-if-set; variables are
    /// key-merged by name with deterministic ordering: parent order first
    /// (child overrides retain the parent's position), then child-only
    /// variables in the child's declared order. The result's `from` is
    /// always cleared since it is the flattened view.
    pub fn merge(parent: &Manifest, child: &Manifest) -> Manifest {
        let mut result = parent.clone();

        if !child.name.is_empty() {
            result.name = child.name.clone();
        }
        if !child.version.is_empty() {
            result.version = child.version.clone();
        }
        if !child.licence.is_empty() {
            result.licence = child.licence.clone();
        }
        if !child.description.is_empty() {
            result.description = child.description.clone();
        }
        if !child.language.is_empty() {
            result.language = child.language.clone();
        }
        if !child.model_hint.is_empty() {
            result.model_hint = child.model_hint.clone();
        }
        if !child.prompt.is_empty() {
            result.prompt = child.prompt.clone();
        }
        if !child.authors.is_empty() {
            result.authors = child.authors.clone();
        }
        if !child.tags.is_empty() {
            result.tags = child.tags.clone();
        }
        if child.persona.is_some() {
            result.persona = child.persona.clone();
        }

        result.variables = merge_variables(&parent.variables, &child.variables);
        result.from = String::new();
        result
    }
}

/// Ordered key-merge of variable sequences: parent order, in-place child
/// overrides, then child-only additions in the child's declared order.
fn merge_variables(parent: &[Variable], child: &[Variable]) -> Vec<Variable> {
    let mut merged: Vec<Variable> = parent
        .iter()
        .map(|p| {
            child
                .iter()
                .find(|c| c.name == p.name)
                .unwrap_or(p)
                .clone()
        })
        .collect();

    for c in child {
        if !parent.iter().any(|p| p.name == c.name) {
            merged.push(c.clone());
        }
    }

    merged
}
