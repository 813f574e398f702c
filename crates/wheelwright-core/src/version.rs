//! Version resolution.
//!
//! A project either declares `version = "..."` statically in `[project]`
//! or marks the version dynamic and points `[tool.wheelwright]
//! version-file` at a source file carrying a single top-level
//! `__version__ = "..."` assignment.

use std::path::{Component, Path};

use crate::pyproject::PyProject;
use crate::{ConfigError, ConfigResult};

/// Default marker identifier scanned for in the version file.
pub const DEFAULT_VERSION_MARKER: &str = "__version__";

/// Resolve the distribution version from the descriptor.
///
/// Called exactly once per operation; the result is non-empty or the
/// operation fails.
pub fn resolve_version(pyproject: &PyProject, project_dir: &Path) -> ConfigResult<String> {
    if let Some(version) = &pyproject.project.version {
        if version.is_empty() {
            return Err(ConfigError::MalformedVersion(version.clone()));
        }
        return Ok(version.clone());
    }

    if !pyproject.version_is_dynamic() {
        return Err(ConfigError::InvalidMetadata(
            "project.version is missing and not declared dynamic".to_string(),
        ));
    }

    let Some(relative) = &pyproject.tool.wheelwright.version_file else {
        return Err(ConfigError::DynamicVersion(
            "dynamic = [\"version\"] requires [tool.wheelwright] version-file".to_string(),
        ));
    };

    if relative.is_absolute()
        || relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(ConfigError::VersionFile {
            path: relative.display().to_string(),
            reason: "must be a relative path inside the project root".to_string(),
        });
    }

    let path = project_dir.join(relative);
    if !path.is_file() {
        return Err(ConfigError::VersionFile {
            path: path.display().to_string(),
            reason: "does not exist".to_string(),
        });
    }

    let text = std::fs::read_to_string(&path)?;
    let marker = pyproject
        .tool
        .wheelwright
        .version_marker
        .as_deref()
        .unwrap_or(DEFAULT_VERSION_MARKER);
    extract_version(&text, marker)
}

/// Scan `text` for exactly one top-level `<marker> = "<literal>"` line.
///
/// This is a deliberate single-purpose scanner, not an expression
/// evaluator: only a quoted string literal assigned at column zero counts,
/// with an optional type annotation between marker and `=`. Zero matches
/// and multiple matches are both rejected rather than guessed at.
pub fn extract_version(text: &str, marker: &str) -> ConfigResult<String> {
    let mut matches = Vec::new();

    for line in text.lines() {
        let Some(rest) = line.strip_prefix(marker) else {
            continue;
        };
        // reject identifiers that merely start with the marker
        if rest
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            continue;
        }
        let rest = rest.trim_start();
        let value = match rest.strip_prefix(':') {
            // annotated assignment: skip the annotation up to `=`
            Some(annotated) => match annotated.find('=') {
                Some(i) => &annotated[i + 1..],
                None => continue,
            },
            None => match rest.strip_prefix('=') {
                Some(value) => value,
                None => continue,
            },
        };
        matches.push(parse_string_literal(value.trim()));
    }

    match matches.len() {
        0 => Err(ConfigError::DynamicVersion(format!(
            "no {marker} assignment found in version file"
        ))),
        1 => match matches.remove(0) {
            Some(version) if !version.is_empty() => Ok(version),
            Some(version) => Err(ConfigError::MalformedVersion(version)),
            None => Err(ConfigError::DynamicVersion(format!(
                "{marker} is not assigned a plain string literal"
            ))),
        },
        n => Err(ConfigError::DynamicVersion(format!(
            "{n} {marker} assignments found, expected exactly one"
        ))),
    }
}

/// Parse a quoted string literal, tolerating a trailing `#` comment.
fn parse_string_literal(value: &str) -> Option<String> {
    let quote = value.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &value[1..];
    let end = rest.find(quote)?;
    let trailing = rest[end + 1..].trim();
    if !trailing.is_empty() && !trailing.starts_with('#') {
        return None;
    }
    Some(rest[..end].to_string())
}
