//! Persona-to-prose composition
//!
//! Renders a flattened manifest's persona attributes into an ordered prose
//! preamble ahead of the raw prompt. Section order and omission rules live
//! in a fixed table of (predicate, renderer) pairs so they can be tested
//! exhaustively; a section whose fields are all unset is skipped entirely.

use crate::manifest::{Manifest, Persona};

type SectionPredicate = fn(&Persona) -> bool;
type SectionRenderer = fn(&Persona, &mut String);

/// The fixed section table, evaluated in order.
const SECTIONS: [(SectionPredicate, SectionRenderer); 6] = [
    (has_identity, render_identity),
    (has_background, render_background),
    (has_communication, render_communication),
    (has_approach, render_approach),
    (has_guidelines, render_guidelines),
    (has_output_format, render_output_format),
];

/// Compose the persona preamble and prompt into a single prose string.
///
/// With no persona present this is the identity function on the prompt
/// text. Otherwise each applicable section is rendered in fixed order,
/// followed by a horizontal separator and the raw prompt verbatim.
pub fn compose(manifest: &Manifest) -> String {
    let Some(persona) = &manifest.persona else {
        return manifest.prompt.clone();
    };

    let mut out = String::new();
    for (applies, render) in &SECTIONS {
        if applies(persona) {
            render(persona, &mut out);
        }
    }

    if !out.is_empty() {
        out.push_str("---\n\n");
    }
    out.push_str(&manifest.prompt);
    out
}

fn has_identity(p: &Persona) -> bool {
    !p.name.is_empty() || !p.role.is_empty()
}

fn render_identity(p: &Persona, out: &mut String) {
    out.push_str("# Identity\n");
    if !p.name.is_empty() && !p.role.is_empty() {
        out.push_str(&format!("You are {}, a {}.\n", p.name, p.role));
    } else if !p.name.is_empty() {
        out.push_str(&format!("You are {}.\n", p.name));
    } else {
        out.push_str(&format!("You are a {}.\n", p.role));
    }
    out.push('\n');
}

fn has_background(p: &Persona) -> bool {
    !p.background.is_empty() || !p.experience.is_empty() || !p.expertise.is_empty()
}

fn render_background(p: &Persona, out: &mut String) {
    out.push_str("# Background & Expertise\n");
    if !p.background.is_empty() {
        out.push_str(&format!("Background: {}\n", p.background));
    }
    if !p.experience.is_empty() {
        out.push_str(&format!("Experience: {}\n", p.experience));
    }
    if !p.expertise.is_empty() {
        out.push_str(&format!("Areas of expertise: {}\n", p.expertise.join(", ")));
    }
    out.push('\n');
}

fn has_communication(p: &Persona) -> bool {
    !p.personality.is_empty()
        || !p.tone.is_empty()
        || !p.style.is_empty()
        || !p.language_level.is_empty()
        || !p.interaction_style.is_empty()
}

fn render_communication(p: &Persona, out: &mut String) {
    out.push_str("# Communication Style\n");
    if !p.personality.is_empty() {
        out.push_str(&format!("Personality traits: {}\n", p.personality.join(", ")));
    }
    if !p.tone.is_empty() {
        out.push_str(&format!("Tone: {}\n", p.tone));
    }
    if !p.style.is_empty() {
        out.push_str(&format!("Communication style: {}\n", p.style));
    }
    if !p.language_level.is_empty() {
        out.push_str(&format!("Technical level: {}\n", p.language_level));
    }
    if !p.interaction_style.is_empty() {
        out.push_str(&format!("Interaction approach: {}\n", p.interaction_style));
    }
    out.push('\n');
}

fn has_approach(p: &Persona) -> bool {
    !p.approach.is_empty() || !p.focus.is_empty()
}

fn render_approach(p: &Persona, out: &mut String) {
    out.push_str("# Approach & Focus\n");
    if !p.approach.is_empty() {
        out.push_str(&format!("Problem-solving approach: {}\n", p.approach));
    }
    if !p.focus.is_empty() {
        out.push_str(&format!("Key focus areas: {}\n", p.focus.join(", ")));
    }
    out.push('\n');
}

fn has_guidelines(p: &Persona) -> bool {
    !p.constraints.is_empty() || !p.preferences.is_empty()
}

fn render_guidelines(p: &Persona, out: &mut String) {
    out.push_str("# Guidelines\n");
    if !p.constraints.is_empty() {
        out.push_str("Constraints:\n");
        for constraint in &p.constraints {
            out.push_str(&format!("- {}\n", constraint));
        }
    }
    if !p.preferences.is_empty() {
        out.push_str("Preferences:\n");
        for preference in &p.preferences {
            out.push_str(&format!("- {}\n", preference));
        }
    }
    out.push('\n');
}

fn has_output_format(p: &Persona) -> bool {
    !p.output_format.is_empty()
}

fn render_output_format(p: &Persona, out: &mut String) {
    out.push_str("# Output Format\n");
    out.push_str(&format!("Format responses in {} style.\n\n", p.output_format));
}
