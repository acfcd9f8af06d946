//! One row of the tower and its occupancy pattern

use std::fmt;

use rand::Rng;
use serde::{Serialize, Serializer};

use super::block::Block;
use super::stability;
use crate::consts::LAYER_BLOCKS;
use crate::error::SlotError;

/// Which slots of a layer hold a block
///
/// Displayed and serialized as a bit string with slot 0 first, so `"101"`
/// means slots 0 and 2 are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern([bool; LAYER_BLOCKS]);

impl Pattern {
    pub const FULL: Pattern = Pattern([true; LAYER_BLOCKS]);
    pub const EMPTY: Pattern = Pattern([false; LAYER_BLOCKS]);

    pub const fn new(slots: [bool; LAYER_BLOCKS]) -> Self {
        Self(slots)
    }

    /// Build from bits, most significant bit is slot 0 (`0b110` = slots 0 and 1)
    pub fn from_bits(bits: u8) -> Self {
        let mut slots = [false; LAYER_BLOCKS];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = bits & (1 << (LAYER_BLOCKS - 1 - i)) != 0;
        }
        Self(slots)
    }

    pub fn bits(&self) -> u8 {
        self.0
            .iter()
            .fold(0, |acc, &filled| (acc << 1) | filled as u8)
    }

    pub fn slots(&self) -> [bool; LAYER_BLOCKS] {
        self.0
    }

    pub fn is_occupied(&self, slot: usize) -> bool {
        self.0.get(slot).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|s| **s).count()
    }

    /// True if a layer in this shape can carry the layers above it
    pub fn is_stable(&self) -> bool {
        stability::is_stable(*self)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for filled in self.0 {
            f.write_str(if filled { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A fixed row of `LAYER_BLOCKS` slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer<T> {
    slots: [Option<Block<T>>; LAYER_BLOCKS],
}

impl<T> Default for Layer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Layer<T> {
    /// An empty layer
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Place a new block in `slot`. Returns `Ok(false)` if the slot is taken.
    pub fn add(&mut self, payload: T, slot: usize, rng: &mut impl Rng) -> Result<bool, SlotError> {
        let entry = self.slots.get_mut(slot).ok_or(SlotError { slot })?;
        if entry.is_some() {
            return Ok(false);
        }
        *entry = Some(Block::new(payload, rng));
        Ok(true)
    }

    /// Take the block out of `slot`, returning its payload
    pub fn remove(&mut self, slot: usize) -> Result<T, SlotError> {
        self.slots
            .get_mut(slot)
            .and_then(Option::take)
            .map(Block::into_payload)
            .ok_or(SlotError { slot })
    }

    pub fn block(&self, slot: usize) -> Result<&Block<T>, SlotError> {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .ok_or(SlotError { slot })
    }

    pub fn peek(&self, slot: usize) -> Result<&T, SlotError> {
        self.block(slot).map(Block::payload)
    }

    pub fn friction(&self, slot: usize) -> Result<u8, SlotError> {
        self.block(slot).map(Block::friction)
    }

    pub fn pattern(&self) -> Pattern {
        Pattern(std::array::from_fn(|i| self.slots[i].is_some()))
    }

    /// Lowest empty slot, if any
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of blocks in the layer
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Blocks in slot order, `None` for empty slots
    pub fn iter(&self) -> impl Iterator<Item = Option<&Block<T>>> {
        self.slots.iter().map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn full_layer(rng: &mut Pcg32) -> Layer<char> {
        let mut layer = Layer::new();
        for (slot, c) in ['a', 'b', 'c'].into_iter().enumerate() {
            assert_eq!(layer.add(c, slot, rng), Ok(true));
        }
        layer
    }

    #[test]
    fn test_pattern_bits_round_trip_display() {
        assert_eq!(Pattern::from_bits(0b101).to_string(), "101");
        assert_eq!(Pattern::from_bits(0b100).slots(), [true, false, false]);
        assert_eq!(Pattern::FULL.bits(), 0b111);
        assert_eq!(Pattern::EMPTY.to_string(), "000");
        assert_eq!(Pattern::from_bits(0b011).count(), 2);
    }

    #[test]
    fn test_pattern_serializes_as_string() {
        let json = serde_json::to_string(&Pattern::from_bits(0b010)).unwrap();
        assert_eq!(json, "\"010\"");
    }

    #[test]
    fn test_new_layer_is_empty() {
        let layer: Layer<u32> = Layer::new();
        assert!(layer.is_empty());
        assert!(!layer.is_full());
        assert_eq!(layer.len(), 0);
        assert_eq!(layer.pattern(), Pattern::EMPTY);
        assert_eq!(layer.first_free(), Some(0));
    }

    #[test]
    fn test_add_out_of_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut layer = Layer::new();
        assert_eq!(layer.add(1, LAYER_BLOCKS, &mut rng), Err(SlotError { slot: 3 }));
        assert_eq!(layer.add(1, 4, &mut rng), Err(SlotError { slot: 4 }));
        assert!(layer.is_empty());
    }

    #[test]
    fn test_add_occupied_slot_refused() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut layer = Layer::new();
        assert_eq!(layer.add("first", 1, &mut rng), Ok(true));
        let friction = layer.friction(1).unwrap();

        assert_eq!(layer.add("second", 1, &mut rng), Ok(false));
        assert_eq!(layer.peek(1), Ok(&"first"));
        assert_eq!(layer.friction(1), Ok(friction));
        assert_eq!(layer.pattern(), Pattern::from_bits(0b010));
    }

    #[test]
    fn test_remove_returns_payload_once() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut layer = full_layer(&mut rng);
        assert_eq!(layer.remove(1), Ok('b'));
        assert_eq!(layer.remove(1), Err(SlotError { slot: 1 }));
        assert_eq!(layer.peek(1), Err(SlotError { slot: 1 }));
        assert_eq!(layer.friction(1), Err(SlotError { slot: 1 }));
        assert_eq!(layer.pattern(), Pattern::from_bits(0b101));
        assert_eq!(layer.first_free(), Some(1));
    }

    #[test]
    fn test_out_of_range_reads() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut layer = full_layer(&mut rng);
        assert!(layer.peek(3).is_err());
        assert!(layer.friction(7).is_err());
        assert!(layer.remove(usize::MAX).is_err());
        assert!(layer.is_full());
        assert_eq!(layer.first_free(), None);
    }

    #[test]
    fn test_iter_reports_gaps() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut layer = full_layer(&mut rng);
        layer.remove(0).unwrap();
        let payloads: Vec<Option<char>> = layer.iter().map(|b| b.map(|b| *b.payload())).collect();
        assert_eq!(payloads, vec![None, Some('b'), Some('c')]);
    }
}
