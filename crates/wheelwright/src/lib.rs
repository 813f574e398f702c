//! # wheelwright
//!
//! A build-backend engine for Python projects whose native extensions
//! are built by Conan. Given a project's `pyproject.toml` and the
//! compiled artifacts an orchestrated `conan` invocation produces, the
//! engine assembles the two standardized distribution archives — a wheel
//! and an sdist — behind a small set of hook operations a build-frontend
//! calls.
//!
//! ## Hook Operations
//!
//! ```no_run
//! use std::collections::HashMap;
//!
//! let settings = HashMap::from([
//!     ("host-profile".to_string(), "linux-armv8".to_string()),
//! ]);
//! let wheel = wheelwright::build_wheel(
//!     "path/to/project".as_ref(),
//!     "dist".as_ref(),
//!     &settings,
//! )?;
//! println!("built {wheel}");
//! # Ok::<(), wheelwright::BuildError>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate over:
//! - [`wheelwright_core`] - configuration resolution (descriptor, version,
//!   packages, sdist filters, license files)
//! - [`wheelwright_conan`] - build-directory lifecycle and the external
//!   tool capability
//! - [`wheelwright_dist`] - deterministic wheel and sdist serialization

mod error;
pub mod hooks;

pub use error::{BuildError, BuildResult};
pub use hooks::{
    build_sdist, build_wheel, build_wheel_with, get_requires_for_build_sdist,
    get_requires_for_build_wheel, prepare_metadata,
};

// Re-export the seams embedders are expected to touch
pub use wheelwright_conan::{BuildTool, ConanCli, PYTHON_VERSION_ENV};
pub use wheelwright_core::{ConfigSettings, ResolvedProject};
pub use wheelwright_dist::WheelTag;
