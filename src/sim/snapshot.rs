//! Read-only view of a tower for integrators
//!
//! Carries counters and occupancy only; payloads and frictions stay hidden.

use serde::Serialize;

use super::layer::Pattern;
use super::tower::TowerPhase;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TowerSnapshot {
    pub height: usize,
    pub removed_blocks: u32,
    pub stability: u32,
    pub phase: TowerPhase,
    pub cheating_chances: u32,
    /// Occupancy bottom to top
    pub layers: Vec<Pattern>,
}

impl TowerSnapshot {
    /// Total blocks still standing
    pub fn block_count(&self) -> usize {
        self.layers.iter().map(Pattern::count).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
