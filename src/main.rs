//! Jenga Tower simulation entry point
//!
//! Builds a tower and plays it automatically until it falls, logging each
//! move. Usage: `jenga-sim [seed] [casual|standard|strict]`, with `RUST_LOG`
//! controlling verbosity.

use jenga_tower::consts::LAYER_BLOCKS;
use jenga_tower::{Difficulty, Pattern, Tower, TowerError, TowerSettings};

/// Blocks placed before the first pull
const STARTING_LAYERS: usize = 18;
/// Give up and knock the tower over after this many moves
const MAX_MOVES: u32 = 500;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2015);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or_default();

    log::info!(
        "Jenga Tower starting (seed {}, {} difficulty)",
        seed,
        difficulty.as_str()
    );

    let mut tower = Tower::with_settings(TowerSettings::from_preset(difficulty).with_seed(seed));
    let mut next_block = 0u32;
    for _ in 0..STARTING_LAYERS * LAYER_BLOCKS {
        if let Err(e) = tower.add(next_block, None) {
            log::error!("Failed to build tower: {}", e);
            return;
        }
        next_block += 1;
    }
    log::info!("Built a tower {} layers high", tower.height());

    let outcome = play(&mut tower);
    log::info!("Game over: {}", outcome);
}

/// Pull the easiest safe block and stack it on top, until something gives
fn play(tower: &mut Tower<u32>) -> TowerError {
    for moves in 0..MAX_MOVES {
        let Some((layer, slot)) = pick_block(tower) else {
            log::info!("No safe block left after {} moves", moves);
            break;
        };
        match tower.remove(layer, slot) {
            Ok(block) => {
                log::info!(
                    "Move {}: pulled block {} from layer {} slot {} (stability {})",
                    moves + 1,
                    block,
                    layer,
                    slot,
                    tower.stability()
                );
                if let Err(e) = tower.add(block, None) {
                    return e;
                }
            }
            Err(TowerError::CheatingAttempt { .. }) => continue,
            Err(e) => return e,
        }
    }
    match tower.destroy() {
        Err(e) => e,
        Ok(()) => TowerError::HandOfGod,
    }
}

/// Lowest-friction block whose removal keeps its layer standing
fn pick_block(tower: &Tower<u32>) -> Option<(usize, usize)> {
    let height = tower.height();
    let rule = tower.settings().cheat_rule;
    tower
        .layers()
        .enumerate()
        .filter(|(index, _)| *index + 1 < height && !rule.forbids(height, *index))
        .flat_map(|(index, layer)| {
            let pattern = layer.pattern();
            layer
                .iter()
                .enumerate()
                .filter_map(move |(slot, block)| {
                    let block = block?;
                    let mut after = pattern.slots();
                    after[slot] = false;
                    Pattern::new(after)
                        .is_stable()
                        .then_some(((index, slot), block.friction()))
                })
        })
        .min_by_key(|(_, friction)| *friction)
        .map(|(address, _)| address)
}
