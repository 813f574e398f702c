//! Frontend-supplied configuration settings.
//!
//! The build-frontend passes a flat string-to-string mapping
//! (`config-settings`); only three keys are recognized and everything
//! else is ignored.

use std::collections::HashMap;
use std::path::PathBuf;

/// Profile name that selects the external tool's auto-detected default.
pub const DEFAULT_PROFILE: &str = "default";

/// Settings recognized from the frontend's `config-settings` mapping.
#[derive(Debug, Clone)]
pub struct ConfigSettings {
    /// Profile for the host context (target compile settings).
    pub host_profile: String,

    /// Profile for the build context (build-machine tooling).
    pub build_profile: String,

    /// Persistent build directory; `None` selects an ephemeral one.
    pub build_dir: Option<PathBuf>,
}

impl Default for ConfigSettings {
    fn default() -> Self {
        Self {
            host_profile: DEFAULT_PROFILE.to_string(),
            build_profile: DEFAULT_PROFILE.to_string(),
            build_dir: None,
        }
    }
}

impl ConfigSettings {
    /// Parse the recognized keys; empty values fall back to defaults.
    #[must_use]
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).filter(|v| !v.is_empty()).cloned();
        Self {
            host_profile: get("host-profile").unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            build_profile: get("build-profile").unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            build_dir: get("build-dir").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn ConfigSettings___empty_map___uses_defaults() {
        let settings = ConfigSettings::from_map(&HashMap::new());

        assert_eq!(settings.host_profile, DEFAULT_PROFILE);
        assert_eq!(settings.build_profile, DEFAULT_PROFILE);
        assert!(settings.build_dir.is_none());
    }

    #[test]
    fn ConfigSettings___recognized_keys___are_picked_up() {
        let map = HashMap::from([
            ("host-profile".to_string(), "linux-armv8".to_string()),
            ("build-profile".to_string(), "ci".to_string()),
            ("build-dir".to_string(), "/tmp/bw".to_string()),
            ("unknown-key".to_string(), "ignored".to_string()),
        ]);

        let settings = ConfigSettings::from_map(&map);

        assert_eq!(settings.host_profile, "linux-armv8");
        assert_eq!(settings.build_profile, "ci");
        assert_eq!(settings.build_dir.as_deref(), Some("/tmp/bw".as_ref()));
    }

    #[test]
    fn ConfigSettings___empty_value___falls_back_to_default() {
        let map = HashMap::from([("host-profile".to_string(), String::new())]);

        let settings = ConfigSettings::from_map(&map);

        assert_eq!(settings.host_profile, DEFAULT_PROFILE);
    }
}
