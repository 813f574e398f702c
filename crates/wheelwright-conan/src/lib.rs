//! Build orchestration for the wheelwright backend.
//!
//! This crate owns the build-directory lifecycle, the capability
//! interface over the external C/C++ build tool, and the mapping of the
//! tool's install-prefix output into a staging tree the wheel assembler
//! consumes.
//!
//! The tool itself is opaque: its recipe language, profile templating and
//! compiler invocation never leak into the engine. The only implementation
//! today drives the `conan` CLI, but the [`BuildTool`] trait is the seam
//! an alternate tool would plug into.

mod conan;
mod dir;
mod error;
mod orchestrator;
mod tool;

pub use conan::ConanCli;
pub use dir::BuildDir;
pub use error::ToolError;
pub use orchestrator::stage_build;
pub use tool::{BuildContexts, BuildRequest, BuildTool, PYTHON_VERSION_ENV};

/// Result type for build orchestration.
pub type ToolResult<T> = Result<T, ToolError>;
