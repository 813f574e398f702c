//! License file resolution.
//!
//! `[project] license-files` holds glob patterns expanded against the
//! project root. Every match ships in both archive kinds and is listed
//! in the core metadata.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::{ConfigError, ConfigResult, patterns};

/// A license file to ship, with its project-relative archive path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseFile {
    /// Project-relative path, `/`-separated, as written to metadata.
    pub rel_path: String,

    /// Absolute source location.
    pub source: PathBuf,
}

/// Expand `license-files` patterns against the project root.
///
/// Matches are deduplicated by relative path and ordered pattern-first,
/// path-second. A pattern matching nothing logs a warning unless
/// `strict` is set, in which case it fails the operation. Explicit wheel
/// package paths, by contrast, always fail when missing; the asymmetry
/// is a deliberate policy choice, not an accident.
pub fn resolve_license_files(
    project_dir: &Path,
    license_patterns: &[String],
    strict: bool,
) -> ConfigResult<Vec<LicenseFile>> {
    let mut seen = BTreeSet::new();
    let mut files = Vec::new();

    for pattern in license_patterns {
        validate_pattern(pattern)?;

        let matched = if patterns::is_glob(pattern) {
            patterns::expand_glob(project_dir, pattern)
        } else {
            let path = project_dir.join(pattern);
            if path.is_file() { vec![path] } else { Vec::new() }
        };

        if matched.is_empty() {
            if strict {
                return Err(ConfigError::LicenseFiles {
                    pattern: pattern.clone(),
                    reason: "matched no files under the project root".to_string(),
                });
            }
            warn!(pattern = %pattern, "license-files pattern matched nothing");
            continue;
        }

        for path in matched {
            let Ok(rel) = path.strip_prefix(project_dir) else {
                continue;
            };
            let rel_path = patterns::to_slash(rel);
            if seen.insert(rel_path.clone()) {
                files.push(LicenseFile {
                    rel_path,
                    source: path,
                });
            }
        }
    }

    Ok(files)
}

fn validate_pattern(pattern: &str) -> ConfigResult<()> {
    if Path::new(pattern).is_absolute() || pattern.split('/').any(|c| c == "..") {
        return Err(ConfigError::LicenseFiles {
            pattern: pattern.to_string(),
            reason: "must be a relative path without ..".to_string(),
        });
    }
    Ok(())
}
