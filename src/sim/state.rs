//! Game state and core simulation types
//!
//! Everything the tick loop mutates lives in [`GameState`]. Randomness and
//! tuning are held next to it by [`super::Game`].

use serde::{Deserialize, Serialize};

use super::terrain::TerrainWindow;
use crate::tuning::Tuning;

/// Alive/dead state machine for the gopher
///
/// `Alive -> Dead { since } -> (after the dead time) -> Alive` via a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Alive,
    /// Crashed; `since` is the last simulated tick at the moment of the crash
    Dead { since: u64 },
}

impl Lifecycle {
    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self, Lifecycle::Dead { .. })
    }

    /// Tick of death, if dead
    pub fn death_tick(&self) -> Option<u64> {
        match *self {
            Lifecycle::Dead { since } => Some(since),
            Lifecycle::Alive => None,
        }
    }

    /// True once `now` is more than `dead_time` ticks past the death tick
    pub fn reset_due(&self, now: u64, dead_time: u64) -> bool {
        match *self {
            Lifecycle::Dead { since } => now.saturating_sub(since) > dead_time,
            Lifecycle::Alive => false,
        }
    }
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gopher {
    /// Vertical offset of the gopher's top edge (down is positive)
    pub y: f32,
    /// Vertical velocity (negative is rising)
    pub v: f32,
    /// Standing on the ground
    pub at_rest: bool,
    /// Flapped since last leaving the ground
    pub flapped: bool,
    pub lifecycle: Lifecycle,
}

impl Gopher {
    /// Standing on flat starting ground
    pub fn resting(tuning: &Tuning) -> Self {
        Self {
            y: tuning.rest_y(),
            v: 0.0,
            at_rest: true,
            flapped: false,
            lifecycle: Lifecycle::Alive,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.lifecycle.is_dead()
    }

    /// Mark dead at `tick` and bounce off screen
    pub fn kill(&mut self, tick: u64, bounce_v: f32) {
        self.lifecycle = Lifecycle::Dead { since: tick };
        self.v = bounce_v;
        self.at_rest = false;
    }
}

/// Horizontal world scroll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    /// Offset into the leftmost tile, in `[0, tile_width]` between ticks
    pub x: f32,
    /// Pixels per tick
    pub v: f32,
}

impl Scroll {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: 0.0,
            v: tuning.init_scroll_v,
        }
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub gopher: Gopher,
    pub scroll: Scroll,
    /// Ground y-offsets, one per tile column
    pub ground: TerrainWindow,
    /// Last fully simulated tick
    pub last_tick: u64,
}

impl GameState {
    /// Starting configuration: flat ground, gopher at rest, clock at zero
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            gopher: Gopher::resting(tuning),
            scroll: Scroll::new(tuning),
            ground: TerrainWindow::flat(tuning.window_len(), tuning.init_ground_y),
            last_tick: 0,
        }
    }

    /// Return to the starting configuration, reusing the terrain allocation
    pub fn reset(&mut self, tuning: &Tuning) {
        self.gopher = Gopher::resting(tuning);
        self.scroll = Scroll::new(tuning);
        self.ground.fill(tuning.init_ground_y);
        self.last_tick = 0;
    }
}
