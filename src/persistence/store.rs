//! File-backed store for game data

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::SaveError;
use crate::consts::{DATA_DIR_ENV, SAVE_FILE_NAME};
use crate::game_data::GameData;

/// Directory under the platform data dir holding the save
const APP_DIR_NAME: &str = "tilt-tiles";

/// Default save location.
///
/// `$TILT_TILES_DATA_DIR/progress.gd`, else `progress.gd` in the per-user
/// local data directory (`dirs::data_local_dir`).
pub fn default_save_path() -> PathBuf {
    resolve_save_path(std::env::var_os(DATA_DIR_ENV))
}

/// Save path for an optional data directory override. Always absolute.
fn resolve_save_path(data_dir: Option<OsString>) -> PathBuf {
    let dir = match data_dir.filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR_NAME),
    };
    let path = dir.join(SAVE_FILE_NAME);
    std::path::absolute(&path).unwrap_or(path)
}

/// Reads and writes [`GameData`] at a fixed path.
///
/// Not safe for concurrent use from several processes or threads.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_save_path`]
    pub fn at_default_location() -> Self {
        Self::new(default_save_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write `data`, replacing any previous save
    pub fn save(&self, data: &GameData) -> Result<(), SaveError> {
        let json = serde_json::to_vec_pretty(data)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| self.io_error(source))?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, &json).map_err(|source| SaveError::Io {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(source));
        }

        log::info!("Game data saved to {}", self.path.display());
        Ok(())
    }

    /// Read the save. `Ok(None)` if there is no save yet.
    pub fn load(&self) -> Result<Option<GameData>, SaveError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };

        let data: GameData = serde_json::from_slice(&bytes).map_err(|e| SaveError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        if data.progress().level_count() == 0 {
            return Err(SaveError::Corrupt {
                path: self.path.clone(),
                reason: "no levels recorded".to_string(),
            });
        }

        log::info!(
            "Loaded game data ({} levels unlocked)",
            data.progress().unlocked_levels().count()
        );
        Ok(Some(data))
    }

    /// Load the save, falling back to `GameData::default()` when it is missing
    /// or unreadable.
    pub fn load_or_default(&self) -> GameData {
        match self.load() {
            Ok(Some(data)) => data,
            Ok(None) => {
                log::info!("No save found at {}, starting fresh", self.path.display());
                GameData::default()
            }
            Err(e) => {
                log::warn!("{e}; using default game data");
                GameData::default()
            }
        }
    }

    /// Delete the save if present
    pub fn clear(&self) -> Result<(), SaveError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Save cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| SAVE_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> SaveError {
        SaveError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
