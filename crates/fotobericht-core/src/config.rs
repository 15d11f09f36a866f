// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration and its on-disk location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// File name of the persisted configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Persistent application settings. Every field has a default so that
/// partially written files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Letterhead image placed at the top of every page.
    pub letterhead_path: Option<PathBuf>,
    /// Number given to the first photo when none is supplied.
    pub default_start_number: u32,
    /// Save processed copies of the originals next to the document.
    pub archive_images: bool,
    /// Save those copies as a zip archive instead of loose files.
    pub archive_as_zip: bool,
    /// Delete source images after they were archived.
    pub delete_originals: bool,
    /// Burn capture timestamps into the images in the document.
    pub timestamp_in_document: bool,
    /// Burn capture timestamps into archived copies as well.
    pub timestamp_in_archive: bool,
    /// Parent directory for per-run scratch folders (system temp if unset).
    pub temp_root: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            letterhead_path: None,
            default_start_number: 1,
            archive_images: true,
            archive_as_zip: true,
            delete_originals: false,
            timestamp_in_document: false,
            timestamp_in_archive: false,
            temp_root: None,
        }
    }
}

impl AppConfig {
    /// Load the configuration from `dir`, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(_) => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config file unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Write the configuration to `dir` as pretty-printed JSON.
    pub fn persist(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> PathBuf {
    let dir = dirs_fallback().join("fotobericht");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn dirs_fallback() -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    // Last resort
    PathBuf::from("/tmp")
}
