//! Launcher settings
//!
//! Every process argument is forwarded to the entry point, so the launcher
//! takes its own configuration from the environment only.

use std::path::PathBuf;

/// Names the manifest to use instead of the one beside the launcher
pub const CONFIG_ENV_VAR: &str = "BOOTSTRAP_CONFIG";

/// Overrides the file name looked up beside the launcher
pub const MANIFEST_NAME_ENV_VAR: &str = "BOOTSTRAP_MANIFEST_NAME";

/// Enables or disables the cause chain in failure reports
pub const TRACE_ENV_VAR: &str = "BOOTSTRAP_TRACE";

/// File name looked up beside the launcher executable
pub const DEFAULT_MANIFEST_NAME: &str = "boot.cfg";

/// Launcher configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherSettings {
    /// Explicit manifest location, tried before the sibling file
    pub manifest_override: Option<PathBuf>,

    /// Name of the sibling manifest file
    pub manifest_name: String,

    /// Print the error's cause chain after the headline
    pub show_trace: bool,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            manifest_override: None,
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            show_trace: true,
        }
    }
}

impl LauncherSettings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            manifest_override: non_empty(CONFIG_ENV_VAR).map(PathBuf::from),
            manifest_name: non_empty(MANIFEST_NAME_ENV_VAR).unwrap_or(defaults.manifest_name),
            show_trace: non_empty(TRACE_ENV_VAR)
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.show_trace),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
