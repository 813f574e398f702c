//! Wheel package and sdist file-set specifications.

use std::path::{Component, Path, PathBuf};

use crate::name::normalize_name;
use crate::pyproject::PyProject;
use crate::{ConfigError, ConfigResult};

/// Default include patterns applied to every sdist before user additions.
pub const DEFAULT_SDIST_INCLUDE: &[&str] = &[
    "pyproject.toml",
    "CMakeLists.txt",
    "conanfile.py",
    "cmake",
    "src",
    "include",
    "README.md",
    "README.rst",
    "LICENSE",
];

/// Default exclude patterns applied to every sdist before user additions.
pub const DEFAULT_SDIST_EXCLUDE: &[&str] = &[
    "__pycache__",
    "*.pyc",
    "*.pyo",
    ".git",
    ".gitignore",
    "build",
    "dist",
    "*.egg-info",
    ".eggs",
];

/// One importable top-level package shipped in the wheel.
#[derive(Debug, Clone)]
pub struct WheelPackage {
    /// Directory name, which is also the import name (`my_package`).
    pub name: String,

    /// Absolute source directory.
    pub dir: PathBuf,
}

/// Ordered set of packages included in the wheel.
///
/// The first entry doubles as the staging target for compiled artifacts,
/// which is why the order is significant.
#[derive(Debug, Clone)]
pub struct WheelPackageSpec {
    packages: Vec<WheelPackage>,
}

impl WheelPackageSpec {
    /// Resolve from the descriptor: explicit `[tool.wheelwright.wheel]
    /// packages`, or the conventional `src/<normalized name>` default.
    ///
    /// Every entry must exist, be a directory strictly inside the project
    /// root, and contain `__init__.py`; any violation fails the whole
    /// operation before an external tool is started.
    pub fn resolve(pyproject: &PyProject, project_dir: &Path) -> ConfigResult<Self> {
        let entries = match &pyproject.tool.wheelwright.wheel.packages {
            Some(entries) if !entries.is_empty() => entries.clone(),
            _ => vec![format!("src/{}", normalize_name(&pyproject.project.name))],
        };

        let mut packages = Vec::with_capacity(entries.len());
        for entry in &entries {
            packages.push(check_package_path(project_dir, entry)?);
        }
        Ok(Self { packages })
    }

    /// All packages, in declaration order.
    #[must_use]
    pub fn packages(&self) -> &[WheelPackage] {
        &self.packages
    }

    /// The first package: the staging target for compiled artifacts.
    #[must_use]
    pub fn primary(&self) -> &WheelPackage {
        // resolve() never constructs an empty spec
        &self.packages[0]
    }
}

fn check_package_path(project_dir: &Path, entry: &str) -> ConfigResult<WheelPackage> {
    let invalid = |reason: &str| ConfigError::InvalidPackage {
        package: entry.to_string(),
        reason: reason.to_string(),
    };

    let raw = Path::new(entry);
    if raw.is_absolute()
        || raw
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(invalid("must be a relative path inside the project root"));
    }

    let dir = project_dir.join(raw);
    if !dir.is_dir() {
        return Err(invalid("does not exist or is not a directory"));
    }
    if !dir.join("__init__.py").is_file() {
        return Err(invalid("missing __init__.py"));
    }

    let name = dir
        .file_name()
        .ok_or_else(|| invalid("has no directory name"))?
        .to_string_lossy()
        .into_owned();
    Ok(WheelPackage { name, dir })
}

/// Resolved include/exclude pattern lists for the sdist.
///
/// The fixed defaults always come first; user-supplied lists from
/// `[tool.wheelwright.sdist]` are appended. Excludes are applied after
/// includes, so an exclude always removes a file an include added.
#[derive(Debug, Clone)]
pub struct SdistSpec {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl SdistSpec {
    /// Merge the default sets with the descriptor's additions.
    #[must_use]
    pub fn resolve(pyproject: &PyProject) -> Self {
        let sdist = &pyproject.tool.wheelwright.sdist;
        let merge = |defaults: &[&str], user: &[String]| {
            defaults
                .iter()
                .map(|s| (*s).to_string())
                .chain(user.iter().cloned())
                .collect()
        };
        Self {
            include: merge(DEFAULT_SDIST_INCLUDE, &sdist.include),
            exclude: merge(DEFAULT_SDIST_EXCLUDE, &sdist.exclude),
        }
    }
}
