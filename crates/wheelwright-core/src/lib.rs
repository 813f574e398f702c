//! Configuration resolution for the wheelwright build backend.
//!
//! This crate turns a project's `pyproject.toml` — the standard `[project]`
//! table plus the engine-specific `[tool.wheelwright]` tables — into a fully
//! resolved build configuration: distribution metadata with the version
//! pinned down (static or extracted from a version file), the ordered list
//! of wheel packages, the sdist include/exclude sets, and the resolved
//! license files.
//!
//! Everything that can fail is validated here, before any external build
//! tool is started.
//!
//! # Example
//!
//! ```no_run
//! use wheelwright_core::ResolvedProject;
//!
//! let project = ResolvedProject::resolve("path/to/project".as_ref())?;
//! println!("{} {}", project.name, project.version);
//! # Ok::<(), wheelwright_core::ConfigError>(())
//! ```

mod error;
mod license;
mod name;
mod project;
mod pyproject;
mod settings;
mod spec;
mod version;

pub mod patterns;

pub use error::ConfigError;
pub use license::{LicenseFile, resolve_license_files};
pub use name::normalize_name;
pub use project::ResolvedProject;
pub use pyproject::{
    EngineConfig, LicenseFilesField, ProjectTable, PyProject, SdistTable, ToolTable, WheelTable,
};
pub use settings::{ConfigSettings, DEFAULT_PROFILE};
pub use spec::{
    DEFAULT_SDIST_EXCLUDE, DEFAULT_SDIST_INCLUDE, SdistSpec, WheelPackage, WheelPackageSpec,
};
pub use version::{DEFAULT_VERSION_MARKER, extract_version, resolve_version};

/// Result type for configuration resolution.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Project descriptor file name.
pub const DESCRIPTOR_FILE: &str = "pyproject.toml";
