//! Core-metadata and WHEEL descriptor rendering.
//!
//! Both files are line-oriented `Key: value` text. The same core-metadata
//! body serves the wheel (`METADATA`) and the sdist (`PKG-INFO`), with
//! license files referenced by their project-relative paths in both.

use wheelwright_core::ResolvedProject;

use crate::{GENERATOR, METADATA_VERSION, WHEEL_FORMAT_VERSION, WheelTag};

/// Render the core-metadata body shared by `METADATA` and `PKG-INFO`.
#[must_use]
pub fn core_metadata(project: &ResolvedProject) -> String {
    let mut out = String::new();
    push_field(&mut out, "Metadata-Version", METADATA_VERSION);
    push_field(&mut out, "Name", &project.name);
    push_field(&mut out, "Version", &project.version);
    if let Some(description) = &project.description {
        push_field(&mut out, "Summary", description);
    }
    for dependency in &project.dependencies {
        push_field(&mut out, "Requires-Dist", dependency);
    }
    for license_file in &project.license_files {
        push_field(&mut out, "License-File", &license_file.rel_path);
    }
    out
}

/// Render the `WHEEL` package descriptor for one tag triple.
#[must_use]
pub fn wheel_descriptor(tag: &WheelTag) -> String {
    let mut out = String::new();
    push_field(&mut out, "Wheel-Version", WHEEL_FORMAT_VERSION);
    push_field(&mut out, "Generator", GENERATOR);
    push_field(
        &mut out,
        "Root-Is-Purelib",
        if tag.is_universal() { "true" } else { "false" },
    );
    push_field(&mut out, "Tag", &tag.to_string());
    out
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}
