//! Rolling player balls

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifier of an actor that can touch tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// A player ball. Position is owned by the host physics and mirrored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: ActorId,
    pub pos: Vec3,
    pub start: Vec3,
}

impl Player {
    pub fn new(id: ActorId, start: Vec3) -> Self {
        Self {
            id,
            pos: start,
            start,
        }
    }

    /// Dropped below the kill plane
    pub fn has_fallen(&self, threshold_y: f32) -> bool {
        self.pos.y < threshold_y
    }

    /// Move back to the start position
    pub fn respawn(&mut self) {
        self.pos = self.start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fall_and_respawn() {
        let mut player = Player::new(ActorId(0), Vec3::new(1.0, 0.5, 1.0));
        assert!(!player.has_fallen(-2.0));

        player.pos = Vec3::new(4.0, -2.5, 3.0);
        assert!(player.has_fallen(-2.0));

        player.respawn();
        assert_eq!(player.pos, Vec3::new(1.0, 0.5, 1.0));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut player = Player::new(ActorId(0), Vec3::ZERO);
        player.pos.y = -2.0;
        assert!(!player.has_fallen(-2.0));
    }
}
