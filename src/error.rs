//! Error types for tower operations.
//!
//! Every variant is a game event the caller has to branch on. Only
//! `NonExistentBlock` and `CheatingAttempt` leave the tower as it was;
//! the rest come back after the tower has already been reset.

use thiserror::Error;

use crate::sim::Pattern;

/// Result type for tower operations.
pub type Result<T> = std::result::Result<T, TowerError>;

/// Why a tower fell down.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseCause {
    /// A non-top layer was left in a pattern that cannot carry the layers above it
    #[error("layer {layer} was left as {pattern}, which cannot hold the tower up")]
    Structural { layer: usize, pattern: Pattern },

    /// The stability roll failed while pulling a block
    #[error("pulling a block with friction {friction} at stability {stability} toppled the tower")]
    Unstable { stability: u32, friction: u8 },

    /// Stability hit zero
    #[error("the tower has no stability left")]
    Exhausted,

    /// Caught cheating with no chances left
    #[error("you have no chances left with which to cheat, you are disqualified")]
    Disqualified,
}

/// The addressed slot is outside its layer or holds no block.
///
/// Layers do not know where they sit in the tower, so the tower attaches the
/// layer index with [`SlotError::at_layer`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("there is no block in slot {slot}")]
pub struct SlotError {
    pub slot: usize,
}

impl SlotError {
    pub fn at_layer(self, layer: usize) -> TowerError {
        TowerError::NonExistentBlock {
            layer,
            slot: self.slot,
        }
    }
}

/// Errors (game events) returned by tower operations.
#[derive(Error, Debug)]
pub enum TowerError {
    #[error("there is no block at layer {layer}, slot {slot}")]
    NonExistentBlock { layer: usize, slot: usize },

    #[error("the tower collapsed and all data was lost: {0}")]
    TowerCollapse(CollapseCause),

    #[error("you have knocked over the tower, all data is lost")]
    HandOfGod,

    #[error(
        "caught cheating at layer {layer}, slot {slot}: no removing from the top layers, \
         {chances_remaining} chances remaining"
    )]
    CheatingAttempt {
        layer: usize,
        slot: usize,
        chances_remaining: u32,
    },

    #[error("invalid tower settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl TowerError {
    /// True if the tower was reset as part of returning this error
    pub fn is_terminal(&self) -> bool {
        matches!(self, TowerError::TowerCollapse(_) | TowerError::HandOfGod)
    }

    /// The collapse cause, if this is a collapse
    pub fn collapse_cause(&self) -> Option<CollapseCause> {
        match self {
            TowerError::TowerCollapse(cause) => Some(*cause),
            _ => None,
        }
    }
}
