//! Error types for configuration resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving the build configuration.
///
/// Resolution is fail-fast: the first violation aborts the whole operation
/// before any external tool is invoked.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading descriptor inputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The project descriptor could not be parsed.
    #[error("invalid pyproject.toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// No project descriptor at the project root.
    #[error("pyproject.toml not found at {0}")]
    DescriptorNotFound(PathBuf),

    /// A required descriptor field is missing or malformed.
    #[error("invalid project metadata: {0}")]
    InvalidMetadata(String),

    /// The configured version file is missing or outside the project root.
    #[error("version file {path}: {reason}")]
    VersionFile { path: String, reason: String },

    /// The dynamic version could not be extracted.
    #[error("dynamic version: {0}")]
    DynamicVersion(String),

    /// A version literal was present but unusable.
    #[error("malformed version literal: {0:?}")]
    MalformedVersion(String),

    /// An explicit or defaulted wheel package directory failed validation.
    #[error("invalid wheel package {package:?}: {reason}")]
    InvalidPackage { package: String, reason: String },

    /// A license-files pattern was rejected.
    #[error("license-files pattern {pattern:?}: {reason}")]
    LicenseFiles { pattern: String, reason: String },
}
