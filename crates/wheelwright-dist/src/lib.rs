//! Deterministic wheel and sdist assembly.
//!
//! This crate serializes a resolved project configuration plus a staging
//! tree of compiled artifacts into the two standardized distribution
//! archives.
//!
//! # Wheel Structure
//!
//! ```text
//! my_package-1.2.3-cp312-cp312-linux_x86_64.whl
//! ├── my_package/
//! │   ├── __init__.py
//! │   └── _native.cpython-312-x86_64-linux-gnu.so
//! └── my_package-1.2.3.dist-info/
//!     ├── METADATA
//!     ├── WHEEL
//!     ├── licenses/
//!     │   └── LICENSE
//!     └── RECORD
//! ```
//!
//! Archive writing is fully deterministic: entries sorted by path, a fixed
//! modification timestamp, and permission bits restricted to regular vs
//! executable. Two builds from identical inputs produce byte-identical
//! output. Both writers go through a temporary sibling path and rename
//! into place, so a failure never leaves a partial archive behind.

mod error;
mod metadata;
mod record;
mod sdist;
mod staging;
mod tags;
mod wheel;

pub use error::DistError;
pub use metadata::{core_metadata, wheel_descriptor};
pub use record::{Record, digest};
pub use sdist::SdistWriter;
pub use staging::StagingTree;
pub use tags::{HostPlatform, WheelTag};
pub use wheel::{WheelWriter, write_metadata_dir};

/// Result type for archive assembly.
pub type DistResult<T> = Result<T, DistError>;

/// Wheel archive format version written to the WHEEL descriptor.
pub const WHEEL_FORMAT_VERSION: &str = "1.0";

/// Generator identifier stamped into the WHEEL descriptor.
pub const GENERATOR: &str = concat!("wheelwright ", env!("CARGO_PKG_VERSION"));

/// Core-metadata version written to METADATA / PKG-INFO.
pub const METADATA_VERSION: &str = "2.4";

/// Fixed modification time for every archive entry:
/// 1980-01-01 00:00:00 UTC, the zip epoch.
pub const FIXED_MTIME: u64 = 315_532_800;
