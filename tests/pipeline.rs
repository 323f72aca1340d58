//! End-to-end tests of the manifest pipeline: parse, validate, resolve,
//! compose, substitute, and archive.

use promptbucket::loader::Loader;
use promptbucket_core_manifest::{
    archive, persona, resolve, substitute, validate, Error, Manifest, MAGIC_HEADER,
};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use tempfile::tempdir;

const REVIEWER_YAML: &[u8] = b"\
name: reviewer
version: 1.0.0
licence: Apache-2.0
prompt: Review the code.
persona:
  role: Senior Engineer
  tone: direct
variables:
  - name: lang
";

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn rendered_output_matches_spec_scenario() {
    let manifest = Manifest::parse(REVIEWER_YAML).unwrap();
    assert!(validate::validate(&manifest).is_empty());

    let mapping = vars(&[("lang", "Go")]);
    substitute::validate_variables(&manifest, &mapping).unwrap();

    let rendered = substitute::substitute(&persona::compose(&manifest), &mapping);

    assert!(rendered.contains("# Identity\nYou are a Senior Engineer.\n"));
    assert!(rendered.contains("# Communication Style\nTone: direct\n"));
    assert!(rendered.contains("---\n\nReview the code."));
    assert!(!rendered.contains("# Background & Expertise"));
    assert!(!rendered.contains("# Guidelines"));
    assert_eq!(manifest.prompt_filename(), "reviewer-1.0.0-prompt.md");
}

#[test]
fn missing_declared_variable_fails_before_render() {
    let manifest = Manifest::parse(REVIEWER_YAML).unwrap();
    let err = substitute::validate_variables(&manifest, &HashMap::new()).unwrap_err();
    assert!(matches!(err, Error::MissingVariable { name } if name == "lang"));
}

#[test]
fn archive_build_is_deterministic_and_round_trips() {
    let dir = tempdir().unwrap();

    let first = archive::build_archive(REVIEWER_YAML, "reviewer", "1.0.0", dir.path()).unwrap();
    assert_eq!(
        first.path.file_name().unwrap().to_str().unwrap(),
        "reviewer-1.0.0.promptbucket"
    );

    // Building again from identical bytes yields an identical artifact
    let again = archive::build_archive(REVIEWER_YAML, "reviewer", "1.0.0", dir.path()).unwrap();
    assert_eq!(first.digest, again.digest);
    assert_eq!(first.size, again.size);

    // The digest covers MAGIC_HEADER || gzip payload exactly
    let payload = fs::read(&first.path).unwrap();
    assert!(payload.starts_with(MAGIC_HEADER));
    assert_eq!(archive::payload_digest(&payload), first.digest);

    // Stripping the header, gunzipping, and un-tarring recovers the bytes
    let mut tar_bytes = Vec::new();
    flate2::read::GzDecoder::new(&payload[MAGIC_HEADER.len()..])
        .read_to_end(&mut tar_bytes)
        .unwrap();
    let mut entries = tar::Archive::new(tar_bytes.as_slice());
    let mut entry = entries.entries().unwrap().next().unwrap().unwrap();
    let mut recovered = Vec::new();
    entry.read_to_end(&mut recovered).unwrap();
    assert_eq!(recovered, REVIEWER_YAML);
}

#[test]
fn inheritance_resolves_through_local_files() {
    let dir = tempdir().unwrap();
    let base_path = dir.path().join("base.yaml");
    fs::write(
        &base_path,
        "name: base\nversion: 0.1.0\nlicence: MIT\nprompt: base prompt\ndescription: shared description\nvariables:\n  - name: lang\n  - name: level\n",
    )
    .unwrap();

    let child_yaml = format!(
        "name: child\nversion: 1.0.0\nlicence: MIT\nprompt: child prompt\nfrom: {}\nvariables:\n  - name: level\n    description: overridden\n",
        base_path.display()
    );
    let child = Manifest::parse(child_yaml.as_bytes()).unwrap();

    let flattened = resolve::resolve(&child, &Loader::new()).unwrap();
    assert_eq!(flattened.name, "child");
    assert_eq!(flattened.prompt, "child prompt");
    assert_eq!(flattened.description, "shared description");
    assert!(flattened.from.is_empty());

    // Parent order first, override in place
    let names: Vec<&str> = flattened.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["lang", "level"]);
    assert_eq!(flattened.variables[1].description, "overridden");
}

#[test]
fn inheritance_chain_of_three_hops_fails() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.yaml");
    let b = dir.path().join("b.yaml");
    let c = dir.path().join("c.yaml");

    fs::write(&a, "name: a\nversion: 0.1.0\nlicence: MIT\nprompt: a\n").unwrap();
    fs::write(
        &b,
        format!("name: b\nversion: 0.1.0\nlicence: MIT\nprompt: b\nfrom: {}\n", a.display()),
    )
    .unwrap();
    fs::write(
        &c,
        format!("name: c\nversion: 0.1.0\nlicence: MIT\nprompt: c\nfrom: {}\n", b.display()),
    )
    .unwrap();

    let child_yaml = format!(
        "name: d\nversion: 1.0.0\nlicence: MIT\nprompt: d\nfrom: {}\n",
        c.display()
    );
    let child = Manifest::parse(child_yaml.as_bytes()).unwrap();

    let err = resolve::resolve(&child, &Loader::new()).unwrap_err();
    assert!(matches!(err, Error::ChainTooDeep { max: 2 }));
}

#[test]
fn unresolved_tokens_pass_through_partial_renders() {
    let manifest = Manifest::parse(
        b"name: partial\nversion: 1.0.0\nlicence: MIT\nprompt: '{{greeting}} from {{place}}'\n",
    )
    .unwrap();

    let rendered = substitute::substitute(
        &persona::compose(&manifest),
        &vars(&[("greeting", "Hello")]),
    );
    assert_eq!(rendered, "Hello from {{place}}");
}

#[test]
fn manifest_without_persona_renders_prompt_unchanged() {
    let manifest =
        Manifest::parse(b"name: bare\nversion: 1.0.0\nlicence: MIT\nprompt: Just the prompt.\n")
            .unwrap();
    assert_eq!(persona::compose(&manifest), "Just the prompt.");
}

#[test]
fn validation_aggregates_all_violations() {
    let manifest = Manifest::parse(
        b"name: Bad-Name-\nversion: '1.2'\nlicence: MIT\nprompt: p\nvariables:\n  - name: 1bad\n",
    )
    .unwrap();

    let violations = validate::validate(&manifest);
    assert_eq!(violations.len(), 3);
    let err = validate::ensure_valid(&manifest).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Bad-Name-"));
    assert!(message.contains("1.2"));
    assert!(message.contains("1bad"));
}
