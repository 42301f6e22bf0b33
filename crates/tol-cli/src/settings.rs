//! Settings persistence - load settings from disk.
//!
//! Settings are read from `--config PATH` when given, otherwise from the
//! platform-specific config folder:
//! - macOS: ~/Library/Application Support/com.territory-lookup.Territory-Lookup/
//! - Windows: %APPDATA%/territory-lookup/Territory Lookup/config/
//! - Linux: ~/.config/territorylookup/

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tol_ingest::MAX_PAYLOAD_SIZE;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "territory-lookup";
const APP_NAME: &str = "Territory Lookup";
const CONFIG_FILENAME: &str = "settings.toml";

/// Result rendering format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Upload limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Files larger than this many bytes are rejected before reading.
    pub max_file_size: u64,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            max_file_size: MAX_PAYLOAD_SIZE,
        }
    }
}

/// Output preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// All user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ingest: IngestSettings,
    pub output: OutputSettings,
}

/// Get the path to the default settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `path`, or from the default location when `None`.
///
/// Returns default settings if:
/// - The settings file doesn't exist
/// - The settings file cannot be parsed
/// - The platform-specific directory cannot be determined
pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                return Settings::default();
            }
        },
    };

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}
