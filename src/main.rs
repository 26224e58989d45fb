//! Tilt Tiles entry point
//!
//! Headless demo: a seeded bot stands in for the tilting player and rolls
//! across the first unlocked levels, occasionally falling into a hole.
//!
//! Usage: `tilt-tiles [SEED]`. Set `TILT_TILES_DATA_DIR` to choose where
//! progress is saved.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use tilt_tiles::sim::{ActorId, Cell, Layout, Level, LevelConfig, LevelEvent, Tile};
use tilt_tiles::{SaveStore, Session, SessionPhase};

/// Frame time of the simulated host loop
const FRAME_DT: f64 = 1.0 / 60.0;
/// Frames between bot moves
const FRAMES_PER_MOVE: u32 = 15;
/// Chance per move that the bot rolls into a neighbouring hole
const FALL_CHANCE: f64 = 0.03;
/// Give up on a level after this many frames
const MAX_FRAMES: u32 = 60 * 120;

const DEMO_LEVELS: [&str; 3] = [
    "
    PGG
    G~G
    GGG
    ",
    "
    PG#GG
    GG~GG
    #GGG#
    ",
    "
    PGGGG
    ~~~~G
    GGGGG
    G~~~~
    GGGGG
    ",
];

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x7117);
    log::info!("Tilt Tiles (native demo) starting, seed {seed}");

    let store = SaveStore::at_default_location();
    log::info!("Using save file {}", store.path().display());
    let mut session = Session::open(store);
    let mut rng = Pcg32::seed_from_u64(seed);

    for (i, source) in DEMO_LEVELS.iter().enumerate() {
        let number = i + 1;
        if let Err(e) = play(&mut session, &mut rng, number, source) {
            log::warn!("Level {number}: {e}");
            break;
        }
        if session.phase() != SessionPhase::Complete(number) {
            log::info!("Bot gave up on level {number}");
            session.exit_level();
            break;
        }
    }

    let unlocked: Vec<_> = session.data().progress().unlocked_levels().collect();
    println!("Unlocked levels: {unlocked:?}");
    println!("Player skin: {}", session.data().player_skin().as_str());
}

/// Play one level with the bot until it completes or the frame budget runs out
fn play(
    session: &mut Session,
    rng: &mut Pcg32,
    number: usize,
    source: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout: Layout = source.parse()?;
    let level = Level::from_layout(LevelConfig::default(), &layout)?;
    session.start_level(number, level)?;

    let player = ActorId(0);
    let mut falls = 0;

    for frame in 0..MAX_FRAMES {
        if frame % FRAMES_PER_MOVE == 0 {
            bot_move(session, rng, player);
        }

        for event in session.update(FRAME_DT) {
            match event {
                LevelEvent::PlayerFell(_) => falls += 1,
                LevelEvent::LevelComplete => {
                    println!(
                        "Level {number} complete after {:.1}s ({falls} falls)",
                        f64::from(frame + 1) * FRAME_DT
                    );
                    return Ok(());
                }
                LevelEvent::TileActivated(_) | LevelEvent::TileExpired(_) => {}
            }
        }
    }
    Ok(())
}

/// Grid steps the bot can take in one move
const STEPS: [IVec2; 4] = [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y];

/// Roll one cell towards the nearest idle tile, or into an adjacent hole.
/// Blocks are never entered.
fn bot_move(session: &mut Session, rng: &mut Pcg32, player: ActorId) {
    let Some(level) = session.level() else {
        return;
    };
    let Some(here) = level.player(player).map(|p| Layout::cell_at(p.pos)) else {
        return;
    };

    if rng.random_bool(FALL_CHANCE) {
        if let Some(hole) = STEPS
            .iter()
            .map(|step| here + *step)
            .find(|cell| level.cell_kind(*cell) == Cell::Hole)
        {
            let mut pos = Layout::spawn_point(hole);
            pos.y = level.config().fall_threshold - 1.0;
            session.set_player_position(player, pos);
            return;
        }
    }

    let distance = |a: IVec2, b: IVec2| (a - b).abs().element_sum();
    let Some(target) = level
        .tiles()
        .filter(|t| !t.is_active())
        .map(Tile::position)
        .min_by_key(|cell| distance(here, *cell))
    else {
        return;
    };

    let candidates: Vec<_> = STEPS
        .iter()
        .map(|step| here + *step)
        .filter(|cell| level.cell_kind(*cell) == Cell::Tile)
        .collect();
    let Some(best) = candidates.iter().map(|cell| distance(*cell, target)).min() else {
        return;
    };
    let closest: Vec<_> = candidates
        .into_iter()
        .filter(|cell| distance(*cell, target) == best)
        .collect();
    let next = closest[rng.random_range(0..closest.len())];
    let Some(tile) = level.tile_at(next).map(Tile::id) else {
        return;
    };

    session.set_player_position(player, Layout::spawn_point(next));
    session.on_contact_enter(tile, player);
}
