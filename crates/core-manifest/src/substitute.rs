//! Variable substitution in composed prompt text
//!
//! Flat name-substitution only: tokens of the exact shape `{{identifier}}`
//! are replaced from a caller-supplied mapping. Unresolved tokens pass
//! through verbatim so partial renders stay possible.

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid regex"));

/// Replace `{{identifier}}` tokens with values from the supplied mapping.
///
/// Tokens whose identifier is absent from the mapping are left unchanged;
/// no error is raised and no empty string is substituted.
pub fn substitute(text: &str, vars: &HashMap<String, String>) -> String {
    TOKEN_PATTERN
        .replace_all(text, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Check that every declared variable has a supplied value.
///
/// Fails with [`Error::MissingVariable`] naming the first absent variable
/// in declaration order, whether or not the variable is referenced in the
/// prompt text.
pub fn validate_variables(manifest: &Manifest, vars: &HashMap<String, String>) -> Result<()> {
    for variable in &manifest.variables {
        if !vars.contains_key(&variable.name) {
            return Err(Error::missing_variable(&variable.name));
        }
    }
    Ok(())
}

/// Convert repeatable `key=value` CLI flags into a substitution mapping.
pub fn parse_var_flags(flags: &[String]) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    for flag in flags {
        match flag.split_once('=') {
            Some((key, value)) => {
                vars.insert(key.to_string(), value.to_string());
            }
            None => {
                return Err(Error::InvalidVarFlag { flag: flag.clone() });
            }
        }
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Variable;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitute_replaces_known_tokens() {
        let out = substitute("Review this {{lang}} code.", &vars(&[("lang", "Go")]));
        assert_eq!(out, "Review this Go code.");
    }

    #[test]
    fn test_substitute_leaves_unknown_tokens_verbatim() {
        let out = substitute("{{known}} and {{unknown}}", &vars(&[("known", "yes")]));
        assert_eq!(out, "yes and {{unknown}}");
    }

    #[test]
    fn test_substitute_leaves_no_residual_braces() {
        let out = substitute("{{a}}{{a}}", &vars(&[("a", "x")]));
        assert_eq!(out, "xx");
    }

    #[test]
    fn test_substitute_ignores_malformed_tokens() {
        let mapping = vars(&[("a", "x")]);
        assert_eq!(substitute("{a} {{a} {{a b}}", &mapping), "{a} {{a} {{a b}}");
    }

    #[test]
    fn test_substitute_with_empty_value() {
        let out = substitute("[{{a}}]", &vars(&[("a", "")]));
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_validate_variables_reports_first_missing_in_order() {
        let manifest = Manifest {
            variables: vec![
                Variable { name: "first".to_string(), ..Default::default() },
                Variable { name: "second".to_string(), ..Default::default() },
            ],
            ..Default::default()
        };

        let err = validate_variables(&manifest, &vars(&[("second", "x")])).unwrap_err();
        assert!(matches!(err, Error::MissingVariable { name } if name == "first"));
    }

    #[test]
    fn test_validate_variables_independent_of_prompt_references() {
        // Declared but never referenced in the prompt: still required
        let manifest = Manifest {
            prompt: "no tokens here".to_string(),
            variables: vec![Variable { name: "unused".to_string(), ..Default::default() }],
            ..Default::default()
        };

        assert!(validate_variables(&manifest, &HashMap::new()).is_err());
        assert!(validate_variables(&manifest, &vars(&[("unused", "v")])).is_ok());
    }

    #[test]
    fn test_parse_var_flags() {
        let flags = vec!["lang=Go".to_string(), "level=senior=plus".to_string()];
        let parsed = parse_var_flags(&flags).unwrap();
        assert_eq!(parsed.get("lang").unwrap(), "Go");
        // Only the first '=' splits
        assert_eq!(parsed.get("level").unwrap(), "senior=plus");

        assert!(parse_var_flags(&["no-equals".to_string()]).is_err());
    }
}
