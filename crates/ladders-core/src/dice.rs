//! Die roll providers.
//!
//! The engine never rolls on its own; callers hand it a [`Dice`]
//! implementation so games can be replayed from a seed or scripted in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Faces of the six-sided die
pub const DIE_FACES: RangeInclusive<u8> = 1..=6;

/// Source of die rolls
pub trait Dice {
    /// Roll one die, returning a value in [`DIE_FACES`]
    fn roll(&mut self) -> u8;
}

/// Uniformly random rolls backed by a seedable RNG
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic rolls for replays
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice for RandomDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(DIE_FACES)
    }
}

/// Scripted rolls, repeated from the beginning once exhausted
#[derive(Debug, Clone)]
pub struct FixedDice {
    rolls: Vec<u8>,
    next: usize,
}

impl FixedDice {
    /// Create from a non-empty roll sequence. Values are clamped to the die faces.
    ///
    /// # Panics
    ///
    /// Panics if `rolls` is empty.
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        let rolls: Vec<u8> = rolls
            .into_iter()
            .map(|r| r.clamp(*DIE_FACES.start(), *DIE_FACES.end()))
            .collect();
        assert!(!rolls.is_empty(), "FixedDice needs at least one roll");
        Self { rolls, next: 0 }
    }

    /// How many rolls have been handed out
    pub fn rolled(&self) -> usize {
        self.next
    }
}

impl Dice for FixedDice {
    fn roll(&mut self) -> u8 {
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}
