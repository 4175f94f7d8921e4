//! Client settings and their persistence
//!
//! Saves and loads [`ClientSettings`] to/from a JSON file in the user's
//! configuration directory, then layers environment overrides on top.
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings and are logged
//! - Save failures are returned to the caller
//! - Malformed environment overrides are errors, not silently ignored
//!
//! # Environment
//!
//! | Variable                      | Field                  |
//! |-------------------------------|------------------------|
//! | `MOVE_AUTHORITY_URL`          | `authority_url`        |
//! | `MOVE_AUTHORITY_TIMEOUT_SECS` | `request_timeout_secs` |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{CoreError, CoreResult};
use crate::input::BoardGeometry;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

pub const ENV_AUTHORITY_URL: &str = "MOVE_AUTHORITY_URL";
pub const ENV_TIMEOUT_SECS: &str = "MOVE_AUTHORITY_TIMEOUT_SECS";

/// User-tunable client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the move authority
    pub authority_url: String,
    /// Submit-move endpoint, resolved against `authority_url`
    pub submit_path: String,
    /// Request-reply endpoint, resolved against `authority_url`
    pub reply_path: String,
    /// Per-request timeout in seconds, 0 waits forever
    pub request_timeout_secs: u64,
    /// Canvas edge length in pixels
    pub canvas_size: f32,
    /// Border drawn around the playing area, in pixels
    pub border_size: f32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            authority_url: "http://127.0.0.1:3000".to_string(),
            submit_path: "/makemove".to_string(),
            reply_path: "/requestmove".to_string(),
            request_timeout_secs: 30,
            canvas_size: 410.0,
            border_size: 5.0,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.canvas_size, self.border_size)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> CoreResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CoreResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_AUTHORITY_URL) {
            info!("[SETTINGS] {} overrides authority URL", ENV_AUTHORITY_URL);
            self.authority_url = url;
        }

        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs =
                value.trim().parse().map_err(|_| CoreError::InvalidOverride {
                    key: ENV_TIMEOUT_SECS.to_string(),
                    value,
                })?;
        }

        Ok(())
    }
}

/// Helper to resolve the settings file path
///
/// Returns a path to `settings.json` in the user's configuration directory,
/// falling back to the current directory when none can be determined.
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "ChessboardClient") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Read and decode a settings file, failing on any error
pub fn read_settings(path: &Path) -> CoreResult<ClientSettings> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load settings from `path`, falling back to defaults on any failure
pub fn load_settings_from(path: &Path) -> ClientSettings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return ClientSettings::default();
    }

    match read_settings(path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                path, e
            );
            ClientSettings::default()
        }
    }
}

/// Load settings from the default location
pub fn load_settings() -> ClientSettings {
    load_settings_from(&settings_path())
}

/// Write settings as pretty JSON, creating the parent directory if needed
pub fn save_settings(settings: &ClientSettings, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
