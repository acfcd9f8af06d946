//! Structural and stability checks
//!
//! Pure functions: the tower decides when to call them and owns the RNG.

use rand::Rng;

use super::layer::Pattern;

/// Layer shapes that can still carry the layers above them
pub const STABLE_PATTERNS: [Pattern; 5] = [
    Pattern::new([true, true, true]),
    Pattern::new([true, true, false]),
    Pattern::new([true, false, true]),
    Pattern::new([false, true, true]),
    Pattern::new([false, true, false]),
];

pub fn is_stable(pattern: Pattern) -> bool {
    STABLE_PATTERNS.contains(&pattern)
}

/// Stability after pulling a block with the given friction (never below zero)
pub fn decay(stability: u32, friction: u8) -> u32 {
    stability.saturating_sub(u32::from(friction))
}

/// Roll for collapse after a removal
///
/// Draws uniformly in `1..=stability` and collapses when the draw is at or
/// below the block's friction, so grippy blocks on a shaky tower are the most
/// dangerous. Zero stability always collapses.
pub fn collapse_roll(rng: &mut impl Rng, stability: u32, friction: u8) -> bool {
    if stability == 0 {
        return true;
    }
    rng.random_range(1..=stability) <= u32::from(friction)
}
