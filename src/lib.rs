//! Tilt Tiles - A tilt-controlled tile activation puzzle
//!
//! Core modules:
//! - `sim`: Frame-driven level simulation (tile countdowns, completion, falls)
//! - `progress`: Per-level unlock flags
//! - `settings`: Integer user preferences
//! - `game_data`: Persisted aggregate of progress and settings
//! - `persistence`: Save/load of game data to a single file
//! - `session`: Running game composed of data, store and current level

pub mod game_data;
pub mod persistence;
pub mod progress;
pub mod session;
pub mod settings;
pub mod sim;

pub use game_data::GameData;
pub use persistence::{SaveError, SaveStore};
pub use progress::Progress;
pub use session::{Session, SessionError, SessionPhase};
pub use settings::{PlayerSkin, Settings};

/// Game configuration constants
pub mod consts {
    /// Number of levels shipped with the game
    pub const DEFAULT_LEVEL_COUNT: usize = 10;

    /// Seconds a tile stays active after the player leaves it
    pub const DEFAULT_COUNTDOWN_SECS: u32 = 10;
    /// Countdown decrements once per this many seconds
    pub const COUNTDOWN_INTERVAL_SECS: f64 = 1.0;

    /// A player below this height has fallen off the level
    pub const FALL_THRESHOLD_Y: f32 = -2.0;

    /// Save file name inside the data directory
    pub const SAVE_FILE_NAME: &str = "progress.gd";
    /// Environment variable overriding the data directory
    pub const DATA_DIR_ENV: &str = "TILT_TILES_DATA_DIR";
}
