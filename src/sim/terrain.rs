//! Procedural ground generation
//!
//! The ground is a sliding window of height samples, one per tile column. Each
//! time a full tile scrolls past, the oldest sample drops off the left and a
//! new one is generated on the right from the previous rightmost sample.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Source of randomness for terrain generation
///
/// Any `rand::Rng` works; tests can plug in a scripted sequence instead.
pub trait GroundRng {
    /// True with probability 1/n
    fn one_in(&mut self, n: u32) -> bool;
    /// Uniform value in [0, 1)
    fn unit(&mut self) -> f32;
}

impl<R: Rng + ?Sized> GroundRng for R {
    fn one_in(&mut self, n: u32) -> bool {
        self.random_range(0..n.max(1)) == 0
    }

    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Which rule produced a new ground sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainChange {
    /// Fresh height anywhere in the playable range
    Major,
    /// Small step up or down from the previous sample
    Wobble,
    /// Same height as the previous sample
    Flat,
}

/// Fixed-length window of ground y-offsets, left to right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainWindow {
    heights: Vec<f32>,
}

impl TerrainWindow {
    /// A window of `len` samples all at height `y`
    pub fn flat(len: usize, y: f32) -> Self {
        Self {
            heights: vec![y; len],
        }
    }

    /// Level every sample to `y` (length unchanged)
    pub fn fill(&mut self, y: f32) {
        self.heights.fill(y);
    }

    #[inline]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Ground height at window slot `slot`
    #[inline]
    pub fn height(&self, slot: usize) -> f32 {
        self.heights[slot]
    }

    /// Rightmost (newest) sample
    #[inline]
    pub fn last(&self) -> f32 {
        self.heights.last().copied().unwrap_or_default()
    }

    /// Drop the leftmost sample and append `next` on the right
    pub fn push(&mut self, next: f32) {
        if self.heights.is_empty() {
            return;
        }
        self.heights.copy_within(1.., 0);
        let last = self.heights.len() - 1;
        self.heights[last] = next;
    }

    /// Generate the next sample and slide the window one tile left
    pub fn shift<R: GroundRng + ?Sized>(&mut self, rng: &mut R, tuning: &Tuning) -> TerrainChange {
        let (next, change) = next_ground_y(self.last(), rng, tuning);
        if change == TerrainChange::Major {
            log::debug!("Major ground change: {:.1} -> {:.1}", self.last(), next);
        }
        self.push(next);
        change
    }
}

/// Compute the sample following `prev`
///
/// Rules are tried in order, first match wins:
/// 1. 1-in-`ground_change_odds`: uniform in `[ground_min, ground_max]`
/// 2. 1-in-`ground_wobble_odds`: `prev` ± up to `climb_grace / 2`
/// 3. otherwise `prev`
pub fn next_ground_y<R: GroundRng + ?Sized>(
    prev: f32,
    rng: &mut R,
    tuning: &Tuning,
) -> (f32, TerrainChange) {
    if rng.one_in(tuning.ground_change_odds) {
        let y = (tuning.ground_max - tuning.ground_min) * rng.unit() + tuning.ground_min;
        return (y, TerrainChange::Major);
    }
    if rng.one_in(tuning.ground_wobble_odds) {
        let y = prev + (rng.unit() - 0.5) * tuning.climb_grace;
        return (y, TerrainChange::Wobble);
    }
    (prev, TerrainChange::Flat)
}
