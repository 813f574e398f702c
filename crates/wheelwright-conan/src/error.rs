//! Error types for build orchestration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while driving the external build tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool binary could not be started at all.
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool exited with a nonzero status. The captured diagnostic
    /// output is attached for the frontend to display.
    #[error("`{command}` failed ({status})\n{output}")]
    Failed {
        command: String,
        status: String,
        output: String,
    },

    /// The install prefix was missing after the tool reported success.
    #[error("install prefix not found at {0}: the recipe installed nothing")]
    MissingPrefix(PathBuf),

    /// I/O error managing the build directory or staging outputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error over the install prefix.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Staging invariant violation (duplicate artifact path).
    #[error(transparent)]
    Staging(#[from] wheelwright_dist::DistError),
}
