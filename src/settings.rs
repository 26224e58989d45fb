//! User settings and preferences
//!
//! Named integer preferences, persisted alongside level progress.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Setting key for the selected player skin
pub const PLAYER_TEXTURE: &str = "playerTexture";

/// Returned for settings that have never been set
pub const MISSING_SETTING: i32 = -1;

/// Selectable player ball skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerSkin {
    #[default]
    Classic,
    Marble,
    Beach,
}

impl PlayerSkin {
    pub const ALL: [PlayerSkin; 3] = [PlayerSkin::Classic, PlayerSkin::Marble, PlayerSkin::Beach];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerSkin::Classic => "Classic",
            PlayerSkin::Marble => "Marble",
            PlayerSkin::Beach => "Beach",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(PlayerSkin::Classic),
            "marble" => Some(PlayerSkin::Marble),
            "beach" => Some(PlayerSkin::Beach),
            _ => None,
        }
    }

    /// Value stored under [`PLAYER_TEXTURE`]
    pub fn index(&self) -> i32 {
        match self {
            PlayerSkin::Classic => 0,
            PlayerSkin::Marble => 1,
            PlayerSkin::Beach => 2,
        }
    }

    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(PlayerSkin::Classic),
            1 => Some(PlayerSkin::Marble),
            2 => Some(PlayerSkin::Beach),
            _ => None,
        }
    }
}

/// Named integer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    values: BTreeMap<String, i32>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut values = BTreeMap::new();
        values.insert(PLAYER_TEXTURE.to_string(), PlayerSkin::default().index());
        Self { values }
    }
}

impl Settings {
    /// Value of `name`, or [`MISSING_SETTING`] if absent
    pub fn get(&self, name: &str) -> i32 {
        self.values.get(name).copied().unwrap_or(MISSING_SETTING)
    }

    pub fn set(&mut self, name: &str, value: i32) {
        self.values.insert(name.to_string(), value);
    }

    /// Drop every setting and restore defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Selected skin. Unknown stored values fall back to the default skin.
    pub fn player_skin(&self) -> PlayerSkin {
        PlayerSkin::from_index(self.get(PLAYER_TEXTURE)).unwrap_or_default()
    }

    pub fn set_player_skin(&mut self, skin: PlayerSkin) {
        self.set(PLAYER_TEXTURE, skin.index());
    }

    /// Iterate settings in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
