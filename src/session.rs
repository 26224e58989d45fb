//! A running game: saved data, its store and the level being played
//!
//! Replaces the engine's scene manager for everything except drawing menus.

use glam::Vec3;

use crate::game_data::GameData;
use crate::persistence::{SaveError, SaveStore};
use crate::settings::PlayerSkin;
use crate::sim::{ActorId, Level, LevelEvent, TileId};

/// Where the player is in the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No level loaded
    Menu,
    /// Playing the given level number
    Playing(usize),
    /// Just finished the given level number
    Complete(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("level {0} does not exist")]
    UnknownLevel(usize),
    #[error("level {0} is locked")]
    LevelLocked(usize),
}

pub struct Session {
    data: GameData,
    store: SaveStore,
    level: Option<Level>,
    phase: SessionPhase,
}

impl Session {
    /// Load saved data from `store`, or start fresh
    pub fn open(store: SaveStore) -> Self {
        let data = store.load_or_default();
        Self::with_data(store, data)
    }

    pub fn with_data(store: SaveStore, data: GameData) -> Self {
        Self {
            data,
            store,
            level: None,
            phase: SessionPhase::Menu,
        }
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Whether `number` exists and is unlocked
    pub fn can_play(&self, number: usize) -> bool {
        self.data.level_status(number)
    }

    /// Begin playing level `number` with the given tile setup
    pub fn start_level(&mut self, number: usize, level: Level) -> Result<(), SessionError> {
        if number == 0 || number > self.data.progress().level_count() {
            return Err(SessionError::UnknownLevel(number));
        }
        if !self.can_play(number) {
            return Err(SessionError::LevelLocked(number));
        }

        log::info!("Starting level {number}");
        self.level = Some(level);
        self.phase = SessionPhase::Playing(number);
        Ok(())
    }

    /// Leave the current level without recording progress
    pub fn exit_level(&mut self) {
        if let SessionPhase::Playing(number) = self.phase {
            log::info!("Left level {number}");
        }
        self.level = None;
        self.phase = SessionPhase::Menu;
    }

    /// Level to offer after a completion, if there is one
    pub fn next_level(&self) -> Option<usize> {
        match self.phase {
            SessionPhase::Complete(number) if number < self.data.progress().level_count() => {
                Some(number + 1)
            }
            _ => None,
        }
    }

    /// Advance the current level by one frame
    pub fn update(&mut self, dt: f64) -> Vec<LevelEvent> {
        let (Some(level), SessionPhase::Playing(number)) = (self.level.as_mut(), self.phase) else {
            return Vec::new();
        };

        let events = level.update(dt);
        if events.contains(&LevelEvent::LevelComplete) {
            self.complete_level(number);
        }
        events
    }

    pub fn on_contact_enter(&mut self, tile: TileId, actor: ActorId) {
        if let Some(level) = self.level.as_mut() {
            level.on_contact_enter(tile, actor);
        }
    }

    pub fn on_contact_stay(&mut self, tile: TileId, actor: ActorId) {
        if let Some(level) = self.level.as_mut() {
            level.on_contact_stay(tile, actor);
        }
    }

    pub fn set_player_position(&mut self, actor: ActorId, pos: Vec3) -> bool {
        self.level
            .as_mut()
            .is_some_and(|level| level.set_player_position(actor, pos))
    }

    pub fn is_active(&self, tile: TileId) -> bool {
        self.level.as_ref().is_some_and(|level| level.is_active(tile))
    }

    pub fn is_complete(&self) -> bool {
        self.level.as_ref().is_some_and(Level::is_complete)
    }

    /// Lock every level but the first and save
    pub fn reset_progress(&mut self) {
        self.data.reset_progress();
        self.persist();
    }

    /// Choose the player skin and save
    pub fn select_skin(&mut self, skin: PlayerSkin) {
        self.data.set_player_skin(skin);
        self.persist();
    }

    /// Write the current data to the store
    pub fn save(&self) -> Result<(), SaveError> {
        self.store.save(&self.data)
    }

    /// Re-read the save, replacing the in-memory data.
    ///
    /// Returns whether anything was loaded. A missing or unreadable save
    /// leaves the current data untouched.
    pub fn reload(&mut self) -> Result<bool, SaveError> {
        match self.store.load()? {
            Some(data) => {
                self.data = data;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn complete_level(&mut self, number: usize) {
        log::info!("Level {number} complete");
        self.data.set_level_status(number + 1, true);
        self.persist();
        self.level = None;
        self.phase = SessionPhase::Complete(number);
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("Failed to save game data: {e}");
        }
    }
}
