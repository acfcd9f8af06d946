//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (owned by the tower)
//! - No I/O, rendering or platform dependencies

pub mod block;
pub mod layer;
pub mod snapshot;
pub mod stability;
pub mod tower;

pub use block::Block;
pub use layer::{Layer, Pattern};
pub use snapshot::TowerSnapshot;
pub use stability::{STABLE_PATTERNS, collapse_roll, decay, is_stable};
pub use tower::{Tower, TowerPhase};
