//! The tower: layers, stability and the collapse state machine
//!
//! All randomness comes from the tower's own seeded RNG, so two towers built
//! from the same settings and driven by the same calls play out identically.
//!
//! A collapse (or `destroy`) wipes the tower in place. The same `Tower` can
//! be rebuilt afterwards; the first successful add puts it back in play.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::Block;
use super::layer::Layer;
use super::snapshot::TowerSnapshot;
use super::stability;
use crate::consts::STABILITY;
use crate::error::{CollapseCause, Result, TowerError};
use crate::settings::TowerSettings;

/// Current phase of the tower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TowerPhase {
    /// Standing (or not yet started)
    Active,
    /// Fell over or was knocked down; empty until the next add
    Collapsed,
}

/// A tower of `Layer`s, index 0 at the bottom
#[derive(Debug, Clone)]
pub struct Tower<T> {
    settings: TowerSettings,
    rng: Pcg32,
    layers: Vec<Layer<T>>,
    removed_blocks: u32,
    stability: u32,
    phase: TowerPhase,
    cheating_chances: u32,
}

impl<T> Default for Tower<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tower<T> {
    /// An empty tower with default settings
    pub fn new() -> Self {
        Self::with_settings(TowerSettings::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_settings(TowerSettings::default().with_seed(seed))
    }

    pub fn with_settings(settings: TowerSettings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            layers: Vec::new(),
            removed_blocks: 0,
            stability: STABILITY,
            phase: TowerPhase::Active,
            cheating_chances: settings.cheating_chances,
            settings,
        }
    }

    /// Add a block to the tower.
    ///
    /// With `Some(layer)` the block goes into the lowest free slot of that
    /// layer, returning `Ok(false)` if it is full. With `None` the tower is
    /// scanned from the top for the first layer with room; when every layer
    /// is full a new one is started on top.
    pub fn add(&mut self, payload: T, layer: Option<usize>) -> Result<bool> {
        let (index, slot) = match layer {
            Some(index) => {
                let target = self.layer_ref(index, 0)?;
                match target.first_free() {
                    Some(slot) => (index, slot),
                    None => return Ok(false),
                }
            }
            None => self.next_free().unwrap_or_else(|| self.grow()),
        };
        self.place(payload, index, slot)
    }

    /// Add a block at an explicit address. Returns `Ok(false)` if the slot is taken.
    pub fn add_at(&mut self, payload: T, layer: usize, slot: usize) -> Result<bool> {
        self.layer_ref(layer, slot)?;
        self.place(payload, layer, slot)
    }

    /// Pull a block out of the tower, returning its payload.
    ///
    /// The removal costs stability equal to the block's friction. Afterwards
    /// the layer must still be in a stable pattern (the top layer is exempt)
    /// and the tower has to survive a stability roll; otherwise it collapses
    /// and the payload is lost with everything else.
    pub fn remove(&mut self, layer: usize, slot: usize) -> Result<T> {
        let friction = self.friction(layer, slot)?;

        if self.settings.cheat_rule.forbids(self.height(), layer) {
            return Err(self.caught_cheating(layer, slot));
        }

        let payload = self.layers[layer]
            .remove(slot)
            .map_err(|e| e.at_layer(layer))?;
        self.removed_blocks += 1;
        self.stability = stability::decay(self.stability, friction);
        log::debug!(
            "Removed block at layer {} slot {} (friction {}, stability now {})",
            layer,
            slot,
            friction,
            self.stability
        );

        self.check_structure(layer)?;
        self.check_stability(friction)?;
        Ok(payload)
    }

    pub fn peek(&self, layer: usize, slot: usize) -> Result<&T> {
        self.block(layer, slot).map(Block::payload)
    }

    /// Friction of the block at the address, in 1..=10
    pub fn friction(&self, layer: usize, slot: usize) -> Result<u8> {
        self.block(layer, slot).map(Block::friction)
    }

    pub fn block(&self, layer: usize, slot: usize) -> Result<&Block<T>> {
        self.layer_ref(layer, slot)?
            .block(slot)
            .map_err(|e| e.at_layer(layer))
    }

    /// Knock the tower over. Always returns `Err(TowerError::HandOfGod)`.
    pub fn destroy(&mut self) -> Result<()> {
        log::info!(
            "Tower knocked over at height {} after {} removals",
            self.height(),
            self.removed_blocks
        );
        self.reset();
        Err(TowerError::HandOfGod)
    }

    pub fn height(&self) -> usize {
        self.layers.len()
    }

    pub fn removed_blocks(&self) -> u32 {
        self.removed_blocks
    }

    pub fn stability(&self) -> u32 {
        self.stability
    }

    pub fn phase(&self) -> TowerPhase {
        self.phase
    }

    pub fn cheating_chances(&self) -> u32 {
        self.cheating_chances
    }

    pub fn settings(&self) -> &TowerSettings {
        &self.settings
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, index: usize) -> Option<&Layer<T>> {
        self.layers.get(index)
    }

    /// Layers from the bottom up
    pub fn layers(&self) -> impl Iterator<Item = &Layer<T>> {
        self.layers.iter()
    }

    pub fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            height: self.height(),
            removed_blocks: self.removed_blocks,
            stability: self.stability,
            phase: self.phase,
            cheating_chances: self.cheating_chances,
            layers: self.layers.iter().map(Layer::pattern).collect(),
        }
    }

    fn layer_ref(&self, layer: usize, slot: usize) -> Result<&Layer<T>> {
        self.layers
            .get(layer)
            .ok_or(TowerError::NonExistentBlock { layer, slot })
    }

    /// Highest layer with room, and its lowest free slot
    fn next_free(&self) -> Option<(usize, usize)> {
        self.layers
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, layer)| layer.first_free().map(|slot| (i, slot)))
    }

    /// Start a new layer on top, returning the address of its first slot
    fn grow(&mut self) -> (usize, usize) {
        self.layers.push(Layer::new());
        log::debug!("Tower grew to height {}", self.layers.len());
        (self.layers.len() - 1, 0)
    }

    fn place(&mut self, payload: T, layer: usize, slot: usize) -> Result<bool> {
        let added = self.layers[layer]
            .add(payload, slot, &mut self.rng)
            .map_err(|e| e.at_layer(layer))?;
        if added {
            if self.phase == TowerPhase::Collapsed {
                log::info!("Rebuilding tower");
                self.phase = TowerPhase::Active;
            }
            log::debug!("Added block at layer {} slot {}", layer, slot);
        }
        Ok(added)
    }

    fn caught_cheating(&mut self, layer: usize, slot: usize) -> TowerError {
        if self.cheating_chances == 0 {
            return self.collapse(CollapseCause::Disqualified);
        }
        self.cheating_chances -= 1;
        log::warn!(
            "Cheating attempt at layer {} slot {}, {} chances remaining",
            layer,
            slot,
            self.cheating_chances
        );
        TowerError::CheatingAttempt {
            layer,
            slot,
            chances_remaining: self.cheating_chances,
        }
    }

    fn check_structure(&mut self, layer: usize) -> Result<()> {
        let pattern = self.layers[layer].pattern();
        let is_top = layer + 1 == self.layers.len();
        if is_top || pattern.is_stable() {
            return Ok(());
        }
        Err(self.collapse(CollapseCause::Structural { layer, pattern }))
    }

    fn check_stability(&mut self, friction: u8) -> Result<()> {
        if self.stability == 0 {
            return Err(self.collapse(CollapseCause::Exhausted));
        }
        if self.settings.random_collapse
            && stability::collapse_roll(&mut self.rng, self.stability, friction)
        {
            let cause = CollapseCause::Unstable {
                stability: self.stability,
                friction,
            };
            return Err(self.collapse(cause));
        }
        Ok(())
    }

    fn collapse(&mut self, cause: CollapseCause) -> TowerError {
        log::info!(
            "Tower collapsed at height {} after {} removals: {}",
            self.height(),
            self.removed_blocks,
            cause
        );
        self.reset();
        TowerError::TowerCollapse(cause)
    }

    fn reset(&mut self) {
        self.layers.clear();
        self.removed_blocks = 0;
        self.stability = STABILITY;
        self.cheating_chances = self.settings.cheating_chances;
        self.phase = TowerPhase::Collapsed;
    }
}
