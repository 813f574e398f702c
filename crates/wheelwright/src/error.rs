//! Summarized hook-level error.

use thiserror::Error;

/// The one error surface the build-frontend sees.
///
/// Internal causes stay attached as sources and are never swallowed;
/// each hook operation fails as a whole and leaves no partial archive
/// behind.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Configuration resolution failed.
    #[error("configuration error: {0}")]
    Config(#[from] wheelwright_core::ConfigError),

    /// The external build tool failed.
    #[error("external build tool error: {0}")]
    Tool(#[from] wheelwright_conan::ToolError),

    /// Archive assembly failed.
    #[error("distribution assembly error: {0}")]
    Dist(#[from] wheelwright_dist::DistError),

    /// I/O error outside the components above.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hook operations.
pub type BuildResult<T> = Result<T, BuildError>;
