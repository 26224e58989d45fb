//! Persisted game data
//!
//! Progress and settings are saved and loaded together as one unit.

use serde::{Deserialize, Serialize};

use crate::progress::Progress;
use crate::settings::{PlayerSkin, Settings};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    progress: Progress,
    settings: Settings,
}

impl GameData {
    /// Fresh data for a game with `level_count` levels
    pub fn new(level_count: usize) -> Self {
        Self {
            progress: Progress::new(level_count),
            settings: Settings::default(),
        }
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_level_status(&mut self, level: usize, status: bool) {
        self.progress.set_status(level, status);
    }

    pub fn level_status(&self, level: usize) -> bool {
        self.progress.status(level)
    }

    pub fn reset_progress(&mut self) {
        self.progress.reset();
    }

    pub fn set_setting(&mut self, name: &str, value: i32) {
        self.settings.set(name, value);
    }

    pub fn setting(&self, name: &str) -> i32 {
        self.settings.get(name)
    }

    pub fn reset_settings(&mut self) {
        self.settings.reset();
    }

    pub fn player_skin(&self) -> PlayerSkin {
        self.settings.player_skin()
    }

    pub fn set_player_skin(&mut self, skin: PlayerSkin) {
        self.settings.set_player_skin(skin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PLAYER_TEXTURE;

    #[test]
    fn test_pass_through() {
        let mut data = GameData::new(10);
        assert!(data.level_status(1));
        assert!(!data.level_status(2));
        assert_eq!(data.setting("unknown"), -1);

        data.set_level_status(2, true);
        data.set_setting(PLAYER_TEXTURE, 2);
        assert!(data.level_status(2));
        assert_eq!(data.setting(PLAYER_TEXTURE), 2);
        assert_eq!(data.player_skin(), PlayerSkin::Beach);
    }

    #[test]
    fn test_resets_are_independent() {
        let mut data = GameData::new(10);
        data.set_level_status(4, true);
        data.set_player_skin(PlayerSkin::Marble);

        data.reset_progress();
        assert!(!data.level_status(4));
        assert_eq!(data.player_skin(), PlayerSkin::Marble);

        data.set_level_status(4, true);
        data.reset_settings();
        assert!(data.level_status(4));
        assert_eq!(data.player_skin(), PlayerSkin::Classic);
    }

    #[test]
    fn test_json_shape() {
        let data = GameData::new(2);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "progress": { "levels": [true, false] },
                "settings": { "values": { "playerTexture": 0 } }
            })
        );
    }
}
