//! Frame-driven level simulation
//!
//! All gameplay rules live here. The host owns rendering, physics and input:
//! - Contact events are reported through `Level::on_contact_*`
//! - `Level::update` is called once per frame with the elapsed time
//! - Player positions are mirrored in with `Level::set_player_position`

pub mod countdown;
pub mod layout;
pub mod level;
pub mod player;
pub mod tile;

pub use countdown::{Countdown, CountdownTick};
pub use layout::{Cell, Layout, LayoutError};
pub use level::{Level, LevelConfig, LevelError, LevelEvent};
pub use player::{ActorId, Player};
pub use tile::{Tile, TileId, TileState};
