//! Level unlock progress
//!
//! One flag per level. Level 1 is always unlocked after construction or reset.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_LEVEL_COUNT;

/// Unlock status for every level (1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    levels: Vec<bool>,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_COUNT)
    }
}

impl Progress {
    /// Create progress for `level_count` levels (at least one)
    pub fn new(level_count: usize) -> Self {
        let mut progress = Self {
            levels: vec![false; level_count.max(1)],
        };
        progress.reset();
        progress
    }

    /// Number of levels tracked
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Set a level's status. Out-of-range levels are ignored.
    pub fn set_status(&mut self, level: usize, status: bool) {
        if let Some(slot) = self.slot_mut(level) {
            *slot = status;
        }
    }

    /// Get a level's status. Out-of-range levels report `false`.
    pub fn status(&self, level: usize) -> bool {
        level
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Lock every level except the first
    pub fn reset(&mut self) {
        self.levels.fill(false);
        if let Some(first) = self.levels.first_mut() {
            *first = true;
        }
    }

    /// Iterate unlocked level numbers in order
    pub fn unlocked_levels(&self) -> impl Iterator<Item = usize> + '_ {
        self.levels
            .iter()
            .enumerate()
            .filter(|(_, unlocked)| **unlocked)
            .map(|(i, _)| i + 1)
    }

    fn slot_mut(&mut self, level: usize) -> Option<&mut bool> {
        level.checked_sub(1).and_then(|i| self.levels.get_mut(i))
    }
}
