//! Text level layouts
//!
//! One character per grid cell, rows top to bottom:
//!
//! | char | cell                                   |
//! |------|----------------------------------------|
//! | `G`  | activatable tile                       |
//! | `P`  | activatable tile with a player start   |
//! | `#`  | solid block, never activated           |
//! | `~`  | hole                                   |
//! | `.`  | empty                                  |
//! | ` `  | empty                                  |

use std::str::FromStr;

use glam::{IVec2, Vec3};

/// Height at which players are placed above a start tile
pub const PLAYER_SPAWN_HEIGHT: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("unexpected character {ch:?} at row {row}, column {column}")]
    UnknownCell { ch: char, row: usize, column: usize },
    #[error("layout has no player start")]
    NoPlayerStart,
}

/// Cell kinds recognized in a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Tile,
    Block,
    Hole,
    Empty,
}

/// Parsed level layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    tiles: Vec<IVec2>,
    blocks: Vec<IVec2>,
    holes: Vec<IVec2>,
    player_starts: Vec<IVec2>,
}

impl Layout {
    /// Activatable tile cells in reading order
    pub fn tiles(&self) -> &[IVec2] {
        &self.tiles
    }

    pub fn blocks(&self) -> &[IVec2] {
        &self.blocks
    }

    pub fn holes(&self) -> &[IVec2] {
        &self.holes
    }

    pub fn player_starts(&self) -> &[IVec2] {
        &self.player_starts
    }

    /// World-space spawn point above a grid cell
    pub fn spawn_point(cell: IVec2) -> Vec3 {
        Vec3::new(cell.x as f32, PLAYER_SPAWN_HEIGHT, cell.y as f32)
    }

    /// Grid cell under a world-space position
    pub fn cell_at(pos: Vec3) -> IVec2 {
        IVec2::new(pos.x.round() as i32, pos.z.round() as i32)
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut layout = Layout {
            tiles: Vec::new(),
            blocks: Vec::new(),
            holes: Vec::new(),
            player_starts: Vec::new(),
        };

        let rows = value.lines().map(str::trim_end).filter(|l| !l.trim().is_empty());
        for (row, line) in rows.enumerate() {
            for (column, ch) in line.chars().enumerate() {
                let cell = IVec2::new(column as i32, row as i32);
                match Cell::from_char(ch) {
                    Some(Cell::Tile) => {
                        layout.tiles.push(cell);
                        if ch == 'P' {
                            layout.player_starts.push(cell);
                        }
                    }
                    Some(Cell::Block) => layout.blocks.push(cell),
                    Some(Cell::Hole) => layout.holes.push(cell),
                    Some(Cell::Empty) => {}
                    None => return Err(LayoutError::UnknownCell { ch, row, column }),
                }
            }
        }

        if layout.player_starts.is_empty() {
            return Err(LayoutError::NoPlayerStart);
        }
        Ok(layout)
    }
}

impl Cell {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'G' | 'P' => Some(Cell::Tile),
            '#' => Some(Cell::Block),
            '~' => Some(Cell::Hole),
            '.' | ' ' => Some(Cell::Empty),
            _ => None,
        }
    }
}
