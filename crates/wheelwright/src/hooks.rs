//! Hook operations invoked by the build-frontend.
//!
//! Four PEP 517-shaped operations: report static build requirements,
//! produce just the metadata directory, produce a wheel, produce an
//! sdist. Each is a single synchronous pass yielding exactly one
//! artifact, written atomically into the caller's output directory; any
//! internal failure surfaces as one summarized [`BuildError`](crate::BuildError).

use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use wheelwright_conan::{BuildContexts, BuildDir, BuildTool, ConanCli, stage_build};
use wheelwright_core::{ConfigSettings, ResolvedProject};
use wheelwright_dist::{
    HostPlatform, SdistWriter, WheelTag, WheelWriter, write_metadata_dir,
};

use crate::BuildResult;

/// Extra requirements for building a wheel. Static; the external tool is
/// never consulted.
#[must_use]
pub fn get_requires_for_build_wheel() -> Vec<String> {
    Vec::new()
}

/// Extra requirements for building an sdist.
#[must_use]
pub fn get_requires_for_build_sdist() -> Vec<String> {
    Vec::new()
}

/// Resolve configuration and write just the dist-info directory into
/// `output_dir`, without invoking the build orchestrator. Returns the
/// directory name.
///
/// Lets frontends cache metadata separately from the full build. With no
/// build there is no compiled module to derive tags from, so the tag is
/// the cross-compile environment triple or, failing that, universal.
pub fn prepare_metadata(project_dir: &Path, output_dir: &Path) -> BuildResult<String> {
    let project = ResolvedProject::resolve(project_dir)?;
    let tag = WheelTag::from_env().unwrap_or_else(WheelTag::universal);
    let dist_info = write_metadata_dir(&project, &tag, output_dir)?;
    info!(dist_info = %dist_info, "prepared metadata directory");
    Ok(dist_info)
}

/// Build a wheel with the default Conan driver. Returns the archive
/// filename.
pub fn build_wheel(
    project_dir: &Path,
    output_dir: &Path,
    config_settings: &HashMap<String, String>,
) -> BuildResult<String> {
    build_wheel_with(&ConanCli::new(), project_dir, output_dir, config_settings)
}

/// Build a wheel, driving `tool` for the native build.
///
/// The resolver validates everything it can — metadata, version, license
/// globs, package directories — before the tool is started. A tool
/// failure aborts the whole operation: nothing is staged, no archive
/// appears, and an ephemeral build directory is still cleaned up.
pub fn build_wheel_with(
    tool: &dyn BuildTool,
    project_dir: &Path,
    output_dir: &Path,
    config_settings: &HashMap<String, String>,
) -> BuildResult<String> {
    let settings = ConfigSettings::from_map(config_settings);
    let project = ResolvedProject::resolve(project_dir)?;
    let packages = project.wheel_packages(project_dir)?;

    let build_dir = BuildDir::resolve(settings.build_dir.as_deref())?;
    let contexts = BuildContexts::new(&settings.host_profile, &settings.build_profile);
    let staging = stage_build(tool, project_dir, &build_dir, &contexts, &packages)?;

    let tag = WheelTag::detect(&staging, &HostPlatform::current());
    let mut writer = WheelWriter::new(&project, tag);
    for package in packages.packages() {
        writer.add_package_tree(package)?;
    }
    writer.add_staged(&staging)?;
    let file_name = writer.write(output_dir)?;

    info!(wheel = %file_name, "built wheel");
    Ok(file_name)
    // build_dir drops here; an ephemeral tree is removed on every path
}

/// Build an sdist directly from the resolved configuration. Returns the
/// archive filename.
///
/// The external tool plays no part; `config_settings` is accepted for
/// interface symmetry but carries nothing an sdist consumes.
pub fn build_sdist(
    project_dir: &Path,
    output_dir: &Path,
    _config_settings: &HashMap<String, String>,
) -> BuildResult<String> {
    let project = ResolvedProject::resolve(project_dir)?;
    let file_name = SdistWriter::new(&project, project_dir).write(output_dir)?;
    info!(sdist = %file_name, "built sdist");
    Ok(file_name)
}
