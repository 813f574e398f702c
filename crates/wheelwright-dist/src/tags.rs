//! Distribution tag computation.
//!
//! A wheel filename embeds an (interpreter, ABI, platform) triple. For a
//! native build the triple comes from the compiled extension module's
//! filename-embedded marker plus the host platform; cross-compile
//! profiles override it wholesale through the `WHEEL_*` environment
//! triple; a build with no compiled modules is interpreter-independent.

use std::fmt;

use crate::StagingTree;

/// Environment variable carrying the interpreter tag (e.g. `cp312`).
pub const ENV_PYVER: &str = "WHEEL_PYVER";
/// Environment variable carrying the ABI tag (e.g. `cp312`, `abi3`).
pub const ENV_ABI: &str = "WHEEL_ABI";
/// Environment variable carrying the platform tag
/// (e.g. `manylinux_2_28_x86_64`).
pub const ENV_ARCH: &str = "WHEEL_ARCH";

/// The (interpreter, ABI, platform) tag triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelTag {
    pub python: String,
    pub abi: String,
    pub platform: String,
}

impl WheelTag {
    /// Interpreter-independent tag used when no compiled module is
    /// present.
    #[must_use]
    pub fn universal() -> Self {
        Self {
            python: "py3".to_string(),
            abi: "none".to_string(),
            platform: "any".to_string(),
        }
    }

    /// Whether this is the interpreter-independent tag.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.abi == "none" && self.platform == "any"
    }

    /// Tags from the `WHEEL_*` environment triple, when set.
    ///
    /// `WHEEL_ARCH` alone is enough to opt in; interpreter and ABI then
    /// fall back to `py3` / `none`. Conan profiles set these through
    /// their `[buildenv]` section for cross builds.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        let platform = env(ENV_ARCH)?;
        Some(Self {
            python: env(ENV_PYVER).unwrap_or_else(|| "py3".to_string()),
            abi: env(ENV_ABI).unwrap_or_else(|| "none".to_string()),
            platform,
        })
    }

    /// Compute the tag triple for a staged build.
    ///
    /// Environment override first; otherwise the first staged extension
    /// module's filename marker plus the host platform; otherwise
    /// universal.
    #[must_use]
    pub fn detect(staging: &StagingTree, host: &HostPlatform) -> Self {
        if let Some(tag) = Self::from_env() {
            return tag;
        }
        for (path, _) in staging.iter() {
            let name = path.rsplit('/').next().unwrap_or(path);
            if let Some((python, abi)) = abi_marker(name) {
                return Self {
                    python,
                    abi,
                    platform: host.platform_tag(),
                };
            }
        }
        Self::universal()
    }
}

impl fmt::Display for WheelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.python, self.abi, self.platform)
    }
}

/// Host OS + architecture pair the platform tag is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub os: String,
    pub arch: String,
}

impl HostPlatform {
    /// Detect from the running process.
    #[must_use]
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Map the OS family and architecture onto a wheel platform tag.
    #[must_use]
    pub fn platform_tag(&self) -> String {
        match (self.os.as_str(), self.arch.as_str()) {
            ("windows", "x86_64") => "win_amd64".to_string(),
            ("windows", "x86") => "win32".to_string(),
            ("windows", "aarch64") => "win_arm64".to_string(),
            ("macos", "aarch64") => "macosx_11_0_arm64".to_string(),
            ("macos", arch) => format!("macosx_11_0_{arch}"),
            (os, arch) => format!("{os}_{arch}"),
        }
    }
}

/// Parse the interpreter/ABI marker embedded in an extension module
/// filename.
///
/// `mod.cpython-312-x86_64-linux-gnu.so` → `(cp312, cp312)`,
/// `mod.cp312-win_amd64.pyd` → `(cp312, cp312)`,
/// `mod.abi3.so` → `(cp3, abi3)`. Plain `.so`/`.pyd` files carry no
/// marker and contribute nothing.
fn abi_marker(file_name: &str) -> Option<(String, String)> {
    let stem = file_name
        .strip_suffix(".so")
        .or_else(|| file_name.strip_suffix(".pyd"))?;
    let (_, marker) = stem.rsplit_once('.')?;

    if marker == "abi3" {
        return Some(("cp3".to_string(), "abi3".to_string()));
    }

    let digits_after = |prefix: &str| -> Option<String> {
        let rest = marker.strip_prefix(prefix)?;
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        // the marker continues with a separator or ends here
        match rest[digits.len()..].chars().next() {
            None | Some('-') => Some(digits),
            Some(_) => None,
        }
    };

    let digits = digits_after("cpython-").or_else(|| digits_after("cp"))?;
    let tag = format!("cp{digits}");
    Some((tag.clone(), tag))
}
