//! A single block of the tower

use rand::Rng;
use serde::Serialize;

use crate::consts::{MAX_FRICTION, MIN_FRICTION};

/// A block entity: caller data plus the friction it was cut with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block<T> {
    payload: T,
    /// 1 (slides out) to 10 (grips hard), fixed at creation
    friction: u8,
}

impl<T> Block<T> {
    /// Create a block, drawing its friction from `rng`
    pub fn new(payload: T, rng: &mut impl Rng) -> Self {
        Self {
            payload,
            friction: rng.random_range(MIN_FRICTION..=MAX_FRICTION),
        }
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn friction(&self) -> u8 {
        self.friction
    }

    /// Consume the block, handing the payload back
    pub fn into_payload(self) -> T {
        self.payload
    }
}
