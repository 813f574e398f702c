//! Minimal glob and exclusion matching for file selection.
//!
//! Two pattern classes are supported. The glob class (`*`, `?`, `**`)
//! is used for include and license-files patterns and matched against
//! `/`-separated project-relative paths. The exclusion class matches the
//! way ignore lists conventionally do: a `*suffix` pattern matches a file
//! name suffix, a bare name matches the file name or any path component.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Returns true when `pattern` contains glob metacharacters.
#[must_use]
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Match a `/`-separated relative path against a glob pattern.
///
/// `*` and `?` match within one component; `**` spans components.
#[must_use]
pub fn glob_match(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').collect();
    let parts: Vec<&str> = path.split('/').collect();
    match_components(&pattern, &parts)
}

fn match_components(pattern: &[&str], parts: &[&str]) -> bool {
    match pattern.split_first() {
        None => parts.is_empty(),
        Some((&"**", rest)) => (0..=parts.len()).any(|i| match_components(rest, &parts[i..])),
        Some((first, rest)) => match parts.split_first() {
            Some((part, tail)) if segment_match(first, part) => match_components(rest, tail),
            _ => false,
        },
    }
}

/// Match one path component against one pattern component.
///
/// Classic iterative wildcard matching with single-star backtracking.
fn segment_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((star_pi, star_ti)) = star {
            pi = star_pi + 1;
            ti = star_ti + 1;
            star = Some((star_pi, star_ti + 1));
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

/// Expand a glob pattern against `root`, returning matching files sorted
/// by path. Directories never match; only regular files do.
#[must_use]
pub fn expand_glob(root: &Path, pattern: &str) -> Vec<PathBuf> {
    let mut matches = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        if glob_match(pattern, &to_slash(rel)) {
            matches.push(entry.path().to_path_buf());
        }
    }
    matches
}

/// Exclusion check for a project-relative path.
///
/// `*suffix` patterns match the file name suffix; any other pattern
/// matches the file name exactly or appears as a path component.
#[must_use]
pub fn is_excluded(rel: &Path, patterns: &[String]) -> bool {
    let name = rel
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    for pattern in patterns {
        if let Some(suffix) = pattern.strip_prefix('*') {
            if name.ends_with(suffix) {
                return true;
            }
        } else if name == *pattern
            || rel.components().any(|c| c.as_os_str() == pattern.as_str())
        {
            return true;
        }
    }
    false
}

/// Render a relative path with forward slashes (the archive convention).
#[must_use]
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
