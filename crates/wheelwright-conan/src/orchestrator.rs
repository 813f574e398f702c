//! Build orchestration: directory layout, tool lifecycle, staging.

use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

use wheelwright_core::{WheelPackageSpec, patterns};
use wheelwright_dist::StagingTree;

use crate::dir::BuildDir;
use crate::tool::{BuildContexts, BuildRequest, BuildTool};
use crate::ToolResult;

/// Compile-tree subdirectory inside the build directory.
const BUILD_SUBDIR: &str = "build";

/// Install-prefix subdirectory inside the build directory.
const PREFIX_SUBDIR: &str = "prefix";

/// Run the external tool's full lifecycle and stage its install output.
///
/// Every file under the install prefix is recorded under the first wheel
/// package's target directory, preserving relative sub-paths, so compiled
/// binary modules land alongside the importable package that declares
/// them. Any tool failure aborts the whole operation before anything is
/// staged; the caller's [`BuildDir`] handle still performs its scoped
/// cleanup.
pub fn stage_build(
    tool: &dyn BuildTool,
    project_dir: &Path,
    build_dir: &BuildDir,
    contexts: &BuildContexts,
    packages: &WheelPackageSpec,
) -> ToolResult<StagingTree> {
    let request = BuildRequest {
        project_dir,
        build_folder: build_dir.path().join(BUILD_SUBDIR),
        prefix: build_dir.path().join(PREFIX_SUBDIR),
        contexts,
    };

    info!(
        host = %contexts.host_profile,
        build = %contexts.build_profile,
        "running external build"
    );
    tool.configure(&request)?;
    tool.build(&request)?;
    let prefix = tool.install(&request)?;

    let target = &packages.primary().name;
    let mut staging = StagingTree::new();
    for entry in WalkDir::new(&prefix).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(&prefix) else {
            continue;
        };
        staging.insert(
            format!("{target}/{}", patterns::to_slash(rel)),
            entry.path().to_path_buf(),
        )?;
    }
    debug!(files = staging.len(), "staged install prefix");
    Ok(staging)
}
