//! A running level
//!
//! Driven by the host loop: contact events as the physics reports them, then
//! one `update` per frame. Tile expiry, completion and falls are polled there.

use std::collections::{BTreeMap, HashSet};

use glam::{IVec2, Vec3};
use serde::{Deserialize, Serialize};

use super::layout::{Cell, Layout};
use super::player::{ActorId, Player};
use super::tile::{Tile, TileId, TileState};
use crate::consts::{DEFAULT_COUNTDOWN_SECS, FALL_THRESHOLD_Y};

/// Per-level tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Seconds a tile stays active after the last contact
    pub countdown_time: u32,
    /// Players below this height have fallen
    pub fall_threshold: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            countdown_time: DEFAULT_COUNTDOWN_SECS,
            fall_threshold: FALL_THRESHOLD_Y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("tile countdown time must be at least one second")]
    ZeroCountdown,
    #[error("tile {0:?} added twice")]
    DuplicateTile(TileId),
    #[error("player {0:?} added twice")]
    DuplicatePlayer(ActorId),
}

/// Things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    /// An idle tile was touched and started counting
    TileActivated(TileId),
    /// A tile's countdown ran out
    TileExpired(TileId),
    /// A player fell; every countdown was cancelled and players respawned
    PlayerFell(ActorId),
    /// Every tracked tile is active. Reported on each update while it holds.
    LevelComplete,
}

#[derive(Debug, Clone)]
pub struct Level {
    config: LevelConfig,
    /// Seconds since the level started
    clock: f64,
    tiles: BTreeMap<TileId, Tile>,
    /// Tiles that must be active for completion. May name removed tiles.
    tracked: Vec<TileId>,
    players: Vec<Player>,
    /// Solid cells the players cannot roll onto
    blocks: HashSet<IVec2>,
    holes: HashSet<IVec2>,
    /// Events raised by contacts since the last update
    pending: Vec<LevelEvent>,
}

impl Level {
    pub fn new(config: LevelConfig) -> Result<Self, LevelError> {
        if config.countdown_time == 0 {
            return Err(LevelError::ZeroCountdown);
        }
        Ok(Self {
            config,
            clock: 0.0,
            tiles: BTreeMap::new(),
            tracked: Vec::new(),
            players: Vec::new(),
            blocks: HashSet::new(),
            holes: HashSet::new(),
            pending: Vec::new(),
        })
    }

    /// Build a level from a parsed layout. Tiles are numbered in reading
    /// order, players in start order.
    pub fn from_layout(config: LevelConfig, layout: &Layout) -> Result<Self, LevelError> {
        let mut level = Self::new(config)?;
        for (i, cell) in layout.tiles().iter().enumerate() {
            level.add_tile(TileId(i as u32), *cell)?;
        }
        level.blocks.extend(layout.blocks().iter().copied());
        level.holes.extend(layout.holes().iter().copied());
        for (i, cell) in layout.player_starts().iter().enumerate() {
            level.add_player(ActorId(i as u32), Layout::spawn_point(*cell))?;
        }
        log::info!(
            "Level set up with {} tiles and {} players",
            level.tiles.len(),
            level.players.len()
        );
        Ok(level)
    }

    /// Track a new idle tile. A previously removed id may be added again.
    pub fn add_tile(&mut self, id: TileId, pos: IVec2) -> Result<(), LevelError> {
        if self.tiles.contains_key(&id) {
            return Err(LevelError::DuplicateTile(id));
        }
        self.tiles
            .insert(id, Tile::new(id, pos, self.config.countdown_time));
        if !self.tracked.contains(&id) {
            self.tracked.push(id);
        }
        Ok(())
    }

    pub fn add_player(&mut self, id: ActorId, start: Vec3) -> Result<(), LevelError> {
        if self.players.iter().any(|p| p.id == id) {
            return Err(LevelError::DuplicatePlayer(id));
        }
        self.players.push(Player::new(id, start));
        Ok(())
    }

    /// Destroy a tile. It stays tracked but is skipped by the completion check.
    pub fn remove_tile(&mut self, id: TileId) -> Option<Tile> {
        self.tiles.remove(&id)
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Live tiles in id order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Tile occupying a grid cell
    pub fn tile_at(&self, cell: IVec2) -> Option<&Tile> {
        self.tiles.values().find(|t| t.position() == cell)
    }

    /// What occupies a grid cell. Tiles win over blocks and holes.
    pub fn cell_kind(&self, cell: IVec2) -> Cell {
        if self.tile_at(cell).is_some() {
            Cell::Tile
        } else if self.blocks.contains(&cell) {
            Cell::Block
        } else if self.holes.contains(&cell) {
            Cell::Hole
        } else {
            Cell::Empty
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: ActorId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mirror a player's physics position. Returns false for unknown actors.
    pub fn set_player_position(&mut self, id: ActorId, pos: Vec3) -> bool {
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.pos = pos;
                true
            }
            None => false,
        }
    }

    /// An actor touched a tile
    pub fn on_contact_enter(&mut self, tile: TileId, actor: ActorId) {
        let now = self.clock;
        let Some(t) = self.tiles.get_mut(&tile) else {
            log::debug!("Contact from {actor:?} on unknown tile {tile:?} ignored");
            return;
        };

        if t.on_contact_enter(now) {
            log::debug!("Tile {tile:?} activated by {actor:?}");
            self.pending.push(LevelEvent::TileActivated(tile));
        }
    }

    /// An actor is resting on a tile
    pub fn on_contact_stay(&mut self, tile: TileId, actor: ActorId) {
        let now = self.clock;
        match self.tiles.get_mut(&tile) {
            Some(t) => t.on_contact_stay(now),
            None => log::debug!("Contact from {actor:?} on unknown tile {tile:?} ignored"),
        }
    }

    /// Whether a tile is counting down. Unknown tiles are inactive.
    pub fn is_active(&self, tile: TileId) -> bool {
        self.tiles.get(&tile).is_some_and(Tile::is_active)
    }

    pub fn tile_state(&self, tile: TileId) -> Option<TileState> {
        self.tiles.get(&tile).map(Tile::state)
    }

    /// Every tracked tile that still exists is active, and at least one does.
    pub fn is_complete(&self) -> bool {
        let mut live = 0;
        for id in &self.tracked {
            match self.tiles.get(id) {
                Some(tile) if !tile.is_active() => return false,
                Some(_) => live += 1,
                None => {}
            }
        }
        live > 0
    }

    /// Cancel every running countdown. Returns how many were cancelled.
    pub fn cancel_all_countdowns(&mut self) -> usize {
        self.tiles
            .values_mut()
            .map(Tile::remove_countdown)
            .filter(|cancelled| *cancelled)
            .count()
    }

    /// Advance the level clock by `dt` seconds and poll tiles and players
    pub fn update(&mut self, dt: f64) -> Vec<LevelEvent> {
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt;
        }
        let now = self.clock;
        let mut events = std::mem::take(&mut self.pending);

        for tile in self.tiles.values_mut() {
            if tile.update(now) {
                log::debug!("Tile {:?} expired", tile.id());
                events.push(LevelEvent::TileExpired(tile.id()));
            }
        }

        if self.is_complete() {
            events.push(LevelEvent::LevelComplete);
            return events;
        }

        let threshold = self.config.fall_threshold;
        let fallen = self
            .players
            .iter()
            .find(|p| p.has_fallen(threshold))
            .map(|p| p.id);
        if let Some(id) = fallen {
            let cancelled = self.cancel_all_countdowns();
            for player in &mut self.players {
                player.respawn();
            }
            log::info!("Player {id:?} fell; {cancelled} tiles reset");
            events.push(LevelEvent::PlayerFell(id));
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: ActorId = ActorId(0);

    fn level_with_tiles(count: u32, seconds: u32) -> Level {
        let mut level = Level::new(LevelConfig {
            countdown_time: seconds,
            ..Default::default()
        })
        .unwrap();
        for i in 0..count {
            level.add_tile(TileId(i), IVec2::new(i as i32, 0)).unwrap();
        }
        level.add_player(P, Vec3::new(0.0, 0.5, 0.0)).unwrap();
        level
    }

    #[test]
    fn test_rejects_zero_countdown() {
        let config = LevelConfig {
            countdown_time: 0,
            ..Default::default()
        };
        assert_eq!(Level::new(config).unwrap_err(), LevelError::ZeroCountdown);
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut level = level_with_tiles(1, 3);
        assert_eq!(
            level.add_tile(TileId(0), IVec2::ZERO),
            Err(LevelError::DuplicateTile(TileId(0)))
        );
        assert_eq!(
            level.add_player(P, Vec3::ZERO),
            Err(LevelError::DuplicatePlayer(P))
        );
    }

    #[test]
    fn test_empty_level_never_complete() {
        let mut level = Level::new(LevelConfig::default()).unwrap();
        assert!(!level.is_complete());
        assert!(!level.update(1.0).contains(&LevelEvent::LevelComplete));
    }

    #[test]
    fn test_complete_only_when_all_active() {
        let mut level = level_with_tiles(3, 10);
        assert!(!level.is_complete());

        level.on_contact_enter(TileId(0), P);
        level.on_contact_enter(TileId(1), P);
        assert!(!level.is_complete());

        level.on_contact_enter(TileId(2), P);
        assert!(level.is_complete());

        let events = level.update(0.1);
        assert_eq!(
            events,
            vec![
                LevelEvent::TileActivated(TileId(0)),
                LevelEvent::TileActivated(TileId(1)),
                LevelEvent::TileActivated(TileId(2)),
                LevelEvent::LevelComplete,
            ]
        );
    }

    #[test]
    fn test_removed_tiles_are_skipped() {
        let mut level = level_with_tiles(2, 10);
        level.on_contact_enter(TileId(0), P);
        assert!(!level.is_complete());

        assert!(level.remove_tile(TileId(1)).is_some());
        assert!(level.is_complete());

        level.remove_tile(TileId(0));
        assert!(!level.is_complete());
    }

    #[test]
    fn test_removed_tile_can_be_added_again() {
        let mut level = level_with_tiles(1, 10);
        assert!(level.remove_tile(TileId(0)).is_some());
        assert!(level.tile(TileId(0)).is_none());

        level.add_tile(TileId(0), IVec2::new(4, 4)).unwrap();
        assert_eq!(level.tile(TileId(0)).map(Tile::position), Some(IVec2::new(4, 4)));
        assert_eq!(
            level.add_tile(TileId(0), IVec2::ZERO),
            Err(LevelError::DuplicateTile(TileId(0)))
        );

        // Tracked once: activating it completes the level
        level.on_contact_enter(TileId(0), P);
        assert!(level.is_complete());
        level.remove_tile(TileId(0));
        assert!(!level.is_complete());
    }

    #[test]
    fn test_tile_expires_after_countdown() {
        let mut level = level_with_tiles(2, 3);
        level.on_contact_enter(TileId(0), P);
        assert_eq!(
            level.tile_state(TileId(0)),
            Some(TileState::Counting { remaining: 3 })
        );

        level.update(1.0);
        level.update(1.0);
        assert!(level.is_active(TileId(0)));

        let events = level.update(1.0);
        assert_eq!(events, vec![LevelEvent::TileExpired(TileId(0))]);
        assert!(!level.is_active(TileId(0)));
        assert_eq!(level.tile_state(TileId(0)), Some(TileState::Idle));
    }

    #[test]
    fn test_contact_stay_resets_timer() {
        let mut level = level_with_tiles(2, 2);
        level.on_contact_enter(TileId(0), P);
        for _ in 0..20 {
            level.update(0.5);
            level.on_contact_stay(TileId(0), P);
        }
        assert_eq!(
            level.tile_state(TileId(0)),
            Some(TileState::Counting { remaining: 2 })
        );
    }

    #[test]
    fn test_unknown_tiles_are_ignored() {
        let mut level = level_with_tiles(1, 3);
        level.on_contact_enter(TileId(99), P);
        level.on_contact_stay(TileId(99), P);
        assert!(!level.is_active(TileId(99)));
        assert_eq!(level.tile_state(TileId(99)), None);
        assert!(level.update(0.1).is_empty());
    }

    #[test]
    fn test_fall_resets_tiles_and_players() {
        let mut level = level_with_tiles(3, 10);
        level.on_contact_enter(TileId(0), P);
        level.on_contact_enter(TileId(1), P);
        level.update(0.1);

        assert!(level.set_player_position(P, Vec3::new(5.0, -3.0, 2.0)));
        let events = level.update(0.1);

        assert_eq!(events, vec![LevelEvent::PlayerFell(P)]);
        assert!(!level.is_active(TileId(0)));
        assert!(!level.is_active(TileId(1)));
        assert_eq!(level.player(P).unwrap().pos, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_cancel_all_countdowns_on_idle_level() {
        let mut level = level_with_tiles(2, 3);
        assert_eq!(level.cancel_all_countdowns(), 0);
        level.on_contact_enter(TileId(1), P);
        assert_eq!(level.cancel_all_countdowns(), 1);
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let mut level = level_with_tiles(1, 3);
        level.update(1.0);
        level.update(-5.0);
        level.update(f64::NAN);
        assert_eq!(level.clock(), 1.0);
    }

    #[test]
    fn test_from_layout() {
        let layout: Layout = "PG\n~G".parse().unwrap();
        let level = Level::from_layout(LevelConfig::default(), &layout).unwrap();

        assert_eq!(level.tiles().count(), 3);
        assert_eq!(level.players().len(), 1);
        assert_eq!(level.cell_kind(IVec2::new(0, 1)), Cell::Hole);
        assert_eq!(level.cell_kind(IVec2::new(1, 1)), Cell::Tile);
        assert_eq!(level.cell_kind(IVec2::new(5, 5)), Cell::Empty);
        assert_eq!(level.tile_at(IVec2::new(1, 1)).map(Tile::id), Some(TileId(2)));
        assert_eq!(
            level.player(ActorId(0)).unwrap().start,
            Vec3::new(0.0, 0.5, 0.0)
        );
    }

    #[test]
    fn test_blocks_from_layout() {
        let layout: Layout = "P#\nG~".parse().unwrap();
        let mut level = Level::from_layout(LevelConfig::default(), &layout).unwrap();
        assert_eq!(level.cell_kind(IVec2::new(1, 0)), Cell::Block);

        // A removed tile leaves an empty cell
        level.remove_tile(TileId(1));
        assert_eq!(level.cell_kind(IVec2::new(0, 1)), Cell::Empty);
    }

    #[test]
    fn test_unknown_player_position_rejected() {
        let mut level = level_with_tiles(1, 3);
        assert!(!level.set_player_position(ActorId(7), Vec3::ZERO));
    }
}
