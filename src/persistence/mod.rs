//! Save/load persistence for [`GameData`](crate::GameData)
//!
//! Features:
//! - Whole-object JSON file, overwritten on every save
//! - Write to a temporary sibling then rename over the save
//! - Missing file is a first run, corrupt file recovers to defaults

pub mod store;

pub use store::{SaveStore, default_save_path};

use std::path::PathBuf;

/// Errors from reading or writing the save file
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to access save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("save file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("failed to encode game data: {0}")]
    Encode(#[from] serde_json::Error),
}
