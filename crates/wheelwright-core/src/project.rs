//! Fully resolved build configuration.

use std::path::Path;
use tracing::debug;

use crate::license::{LicenseFile, resolve_license_files};
use crate::name::normalize_name;
use crate::pyproject::PyProject;
use crate::spec::{SdistSpec, WheelPackageSpec};
use crate::version::resolve_version;
use crate::ConfigResult;

/// Everything the assemblers need, resolved once per operation and
/// discarded at operation end.
#[derive(Debug, Clone)]
pub struct ResolvedProject {
    /// Name exactly as declared in the descriptor.
    pub name: String,

    /// Normalized name used in filenames and the dist-info directory.
    pub normalized_name: String,

    /// Resolved, non-empty version.
    pub version: String,

    pub description: Option<String>,

    /// Requirement strings, verbatim from the descriptor.
    pub dependencies: Vec<String>,

    /// Resolved license files, deduplicated.
    pub license_files: Vec<LicenseFile>,

    /// Resolved sdist include/exclude sets.
    pub sdist: SdistSpec,

    descriptor: PyProject,
}

impl ResolvedProject {
    /// Run the configuration resolution pass against `project_dir`.
    ///
    /// The version is resolved here, exactly once; license globs are
    /// expanded and validated. Wheel package validation is separate
    /// (see [`Self::wheel_packages`]) because sdist and metadata-only
    /// operations never consult the package list.
    pub fn resolve(project_dir: &Path) -> ConfigResult<Self> {
        let descriptor = PyProject::load(project_dir)?;
        let version = resolve_version(&descriptor, project_dir)?;

        let license_patterns = descriptor
            .project
            .license_files
            .as_ref()
            .map(|field| field.patterns())
            .unwrap_or_default();
        let license_files = resolve_license_files(
            project_dir,
            &license_patterns,
            descriptor.tool.wheelwright.strict_license_files,
        )?;

        let sdist = SdistSpec::resolve(&descriptor);
        let name = descriptor.project.name.clone();
        let normalized_name = normalize_name(&name);
        debug!(name = %name, version = %version, "resolved project configuration");

        Ok(Self {
            normalized_name,
            version,
            description: descriptor.project.description.clone(),
            dependencies: descriptor.project.dependencies.clone(),
            license_files,
            sdist,
            name,
            descriptor,
        })
    }

    /// Validate and return the wheel package list.
    ///
    /// Fails before any external tool invocation when a configured
    /// package directory is missing or malformed.
    pub fn wheel_packages(&self, project_dir: &Path) -> ConfigResult<WheelPackageSpec> {
        WheelPackageSpec::resolve(&self.descriptor, project_dir)
    }
}
