//! Jenga Tower - a block-stacking tower game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (blocks, layers, stability, the tower itself)
//! - `settings`: Tower rules and difficulty presets
//! - `error`: Typed game events returned from tower operations

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{CollapseCause, Result, SlotError, TowerError};
pub use settings::{CheatRule, Difficulty, TowerSettings};
pub use sim::{Block, Layer, Pattern, Tower, TowerPhase, TowerSnapshot};

/// Game configuration constants
pub mod consts {
    /// Number of block slots in every layer
    pub const LAYER_BLOCKS: usize = 3;

    /// Stability of a freshly built tower
    pub const STABILITY: u32 = 100;

    /// Friction bounds (inclusive)
    pub const MIN_FRICTION: u8 = 1;
    pub const MAX_FRICTION: u8 = 10;

    /// Cheating chances granted by the strict preset
    pub const DEFAULT_CHEATING_CHANCES: u32 = 3;
    /// Number of top layers the strict preset protects from removal
    pub const PROTECTED_TOP_LAYERS: usize = 3;
}
