//! Activatable floor tiles

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::countdown::{Countdown, CountdownTick};

/// Stable tile identifier within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// Observable tile state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    /// No countdown running
    Idle,
    /// Activated, `remaining` whole seconds left
    Counting { remaining: u32 },
}

/// A tile that activates on contact and deactivates when its countdown runs out.
///
/// Activity is never stored: a tile is active exactly while it owns a countdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    pos: IVec2,
    countdown_time: u32,
    countdown: Option<Countdown>,
}

impl Tile {
    pub fn new(id: TileId, pos: IVec2, countdown_time: u32) -> Self {
        Self {
            id,
            pos,
            countdown_time,
            countdown: None,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    /// Grid cell this tile occupies
    pub fn position(&self) -> IVec2 {
        self.pos
    }

    pub fn countdown_time(&self) -> u32 {
        self.countdown_time
    }

    pub fn is_active(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn state(&self) -> TileState {
        match &self.countdown {
            Some(countdown) => TileState::Counting {
                remaining: countdown.remaining(),
            },
            None => TileState::Idle,
        }
    }

    /// An actor touched the tile. Returns true if this activated an idle tile.
    pub fn on_contact_enter(&mut self, now: f64) -> bool {
        match &mut self.countdown {
            Some(countdown) => {
                countdown.restart(self.countdown_time, now);
                false
            }
            None => {
                self.countdown = Some(Countdown::start(self.countdown_time, now));
                true
            }
        }
    }

    /// An actor is still resting on the tile. Only refreshes a running countdown.
    pub fn on_contact_stay(&mut self, now: f64) {
        if let Some(countdown) = &mut self.countdown {
            countdown.restart(self.countdown_time, now);
        }
    }

    /// Advance the countdown to level time `now`. Returns true if the tile expired.
    pub fn update(&mut self, now: f64) -> bool {
        let Some(countdown) = &mut self.countdown else {
            return false;
        };

        match countdown.advance(now) {
            CountdownTick::Expired => {
                self.countdown = None;
                true
            }
            CountdownTick::Waiting | CountdownTick::Decremented { .. } => false,
        }
    }

    /// Cancel any running countdown. Returns true if one was running.
    pub fn remove_countdown(&mut self) -> bool {
        self.countdown.take().is_some()
    }
}
