//! Project descriptor parsing.
//!
//! Reads `pyproject.toml`: the standard `[project]` table plus the
//! engine-specific `[tool.wheelwright]` tables. Only the fields this
//! engine consumes are modeled; everything else passes through untouched.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{ConfigError, ConfigResult, DESCRIPTOR_FILE};

/// Top-level `pyproject.toml` structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PyProject {
    /// The standard `[project]` metadata table.
    pub project: ProjectTable,

    #[serde(default)]
    pub tool: ToolTable,
}

/// `[tool]` container; only our own sub-table is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolTable {
    #[serde(default)]
    pub wheelwright: EngineConfig,
}

/// `[project]` metadata table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectTable {
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    /// Fields resolved by the backend rather than declared statically.
    /// Only `"version"` is understood.
    #[serde(default)]
    pub dynamic: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub dependencies: Vec<String>,

    /// License file glob patterns; a single string or a list.
    #[serde(default)]
    pub license_files: Option<LicenseFilesField>,
}

/// `license-files` accepts a single pattern or a list of patterns.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LicenseFilesField {
    One(String),
    Many(Vec<String>),
}

impl LicenseFilesField {
    /// The patterns as a uniform list.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        match self {
            Self::One(pattern) => vec![pattern.clone()],
            Self::Many(patterns) => patterns.clone(),
        }
    }
}

/// `[tool.wheelwright]` — engine-specific configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Source file the dynamic version is extracted from.
    #[serde(default)]
    pub version_file: Option<PathBuf>,

    /// Identifier the version scanner looks for
    /// (default: `__version__`).
    #[serde(default)]
    pub version_marker: Option<String>,

    /// Fail instead of warning when a license-files pattern matches
    /// nothing.
    #[serde(default)]
    pub strict_license_files: bool,

    #[serde(default)]
    pub wheel: WheelTable,

    #[serde(default)]
    pub sdist: SdistTable,
}

/// `[tool.wheelwright.wheel]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WheelTable {
    /// Project-relative package directories shipped in the wheel.
    /// Defaults to `src/<normalized name>` when unset.
    #[serde(default)]
    pub packages: Option<Vec<String>>,
}

/// `[tool.wheelwright.sdist]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SdistTable {
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

impl PyProject {
    /// Load and validate the descriptor from a project root.
    pub fn load(project_dir: &Path) -> ConfigResult<Self> {
        let path = project_dir.join(DESCRIPTOR_FILE);
        if !path.is_file() {
            return Err(ConfigError::DescriptorNotFound(path));
        }
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate the descriptor from TOML text.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let parsed: Self = toml::from_str(content)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Whether the version is declared dynamic.
    #[must_use]
    pub fn version_is_dynamic(&self) -> bool {
        self.project.dynamic.iter().any(|field| field == "version")
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.project.name.is_empty() {
            return Err(ConfigError::InvalidMetadata(
                "project.name cannot be empty".to_string(),
            ));
        }

        if self.project.version.is_some() && self.version_is_dynamic() {
            return Err(ConfigError::InvalidMetadata(
                "project.version cannot be both static and dynamic".to_string(),
            ));
        }

        Ok(())
    }
}
