//! The external build tool capability.

use std::path::{Path, PathBuf};

use crate::ToolResult;

/// Environment variable forwarded, unparsed, into every tool subprocess.
///
/// Templated profiles read it to select the target interpreter version;
/// the engine treats the value as an opaque string and never validates it.
pub const PYTHON_VERSION_ENV: &str = "WHEELWRIGHT_PYTHON_VERSION";

/// The two profile contexts of one build.
///
/// The host context carries the target compile settings (OS,
/// architecture, compiler, build type); the build context carries the
/// settings for tools that must run during the build itself.
/// Cross-compilation and build-time code generation need independently
/// specifiable toolchains, hence the split.
#[derive(Debug, Clone)]
pub struct BuildContexts {
    pub host_profile: String,
    pub build_profile: String,
}

impl BuildContexts {
    #[must_use]
    pub fn new(host_profile: &str, build_profile: &str) -> Self {
        Self {
            host_profile: host_profile.to_string(),
            build_profile: build_profile.to_string(),
        }
    }
}

/// Everything one tool step needs to run.
#[derive(Debug)]
pub struct BuildRequest<'a> {
    /// Project root containing the build descriptor (`conanfile.py`).
    pub project_dir: &'a Path,

    /// Compile tree inside the build directory.
    pub build_folder: PathBuf,

    /// Install prefix the built artifacts land in.
    pub prefix: PathBuf,

    /// Profile contexts.
    pub contexts: &'a BuildContexts,
}

/// Capability interface over the orchestrated external build tool.
///
/// Exactly one implementation exists today ([`crate::ConanCli`]); the
/// seam lets an alternate tool be substituted without touching the
/// assemblers. Every step is a single blocking call with no
/// engine-imposed timeout.
pub trait BuildTool {
    /// Resolve and install C/C++ dependencies and generate the
    /// toolchain for both contexts.
    fn configure(&self, request: &BuildRequest<'_>) -> ToolResult<()>;

    /// Compile the project against the generated toolchain.
    fn build(&self, request: &BuildRequest<'_>) -> ToolResult<()>;

    /// Finish the install-to-prefix step and return the prefix location.
    fn install(&self, request: &BuildRequest<'_>) -> ToolResult<PathBuf>;
}
