//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so a run can be re-balanced
//! from a JSON file. `Tuning::default()` reproduces the reference game.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning file is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    /// Tile width or height is zero or negative
    #[error("tile width and height must be positive")]
    NonPositiveTile,
    /// Terrain window too short to hold the tile under the gopher and the one ahead
    #[error("gopher tile {gopher_tile} has no ahead tile in a window of {window_len}")]
    NoAheadTile { gopher_tile: usize, window_len: usize },
    /// `ground_min` lies below `ground_max`
    #[error("ground_min {min} is greater than ground_max {max}")]
    InvertedGroundRange { min: f32, max: f32 },
    /// A 1-in-N odds value of zero
    #[error("ground change odds must be at least 1")]
    ZeroOdds,
}

/// Simulation balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Geometry ===
    pub tile_width: f32,
    pub tile_height: f32,
    /// Visible tile columns; the terrain window holds `tiles_x + 3` samples
    pub tiles_x: usize,
    pub tiles_y: usize,
    /// Column the gopher stands on
    pub gopher_tile: usize,

    // === Scroll ===
    pub init_scroll_v: f32,
    pub scroll_accel: f32,
    pub dead_scroll_decel: f32,

    // === Gopher ===
    pub gravity: f32,
    pub jump_v: f32,
    pub flap_v: f32,
    /// Upward velocity applied when the gopher crashes
    pub death_bounce_v: f32,

    // === Lifecycle ===
    /// Ticks the gopher stays dead before the game restarts
    pub dead_time_before_reset: u64,

    // === Terrain ===
    pub ground_change_odds: u32,
    pub ground_wobble_odds: u32,
    pub ground_min: f32,
    pub ground_max: f32,
    pub init_ground_y: f32,
    pub climb_grace: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            tiles_x: TILES_X,
            tiles_y: TILES_Y,
            gopher_tile: GOPHER_TILE,

            init_scroll_v: INIT_SCROLL_V,
            scroll_accel: SCROLL_A,
            dead_scroll_decel: DEAD_SCROLL_DECEL,

            gravity: GRAVITY,
            jump_v: JUMP_V,
            flap_v: FLAP_V,
            death_bounce_v: JUMP_V,

            dead_time_before_reset: DEAD_TIME_BEFORE_RESET,

            ground_change_odds: GROUND_CHANGE_ODDS,
            ground_wobble_odds: GROUND_WOBBLE_ODDS,
            ground_min: GROUND_MIN,
            ground_max: GROUND_MAX,
            init_ground_y: INIT_GROUND_Y,
            climb_grace: CLIMB_GRACE,
        }
    }
}

impl Tuning {
    /// Number of ground samples in the terrain window
    #[inline]
    pub fn window_len(&self) -> usize {
        self.tiles_x + 3
    }

    /// Window slot one tile ahead of the gopher
    #[inline]
    pub fn ahead_tile(&self) -> usize {
        self.gopher_tile + 1
    }

    /// Resting y-offset of the gopher on flat initial ground
    #[inline]
    pub fn rest_y(&self) -> f32 {
        self.init_ground_y - self.tile_height
    }

    /// Check that the simulation can run with these values
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.tile_width <= 0.0 || self.tile_height <= 0.0 {
            return Err(TuningError::NonPositiveTile);
        }
        if self.ahead_tile() >= self.window_len() {
            return Err(TuningError::NoAheadTile {
                gopher_tile: self.gopher_tile,
                window_len: self.window_len(),
            });
        }
        if self.ground_min > self.ground_max {
            return Err(TuningError::InvertedGroundRange {
                min: self.ground_min,
                max: self.ground_max,
            });
        }
        if self.ground_change_odds == 0 || self.ground_wobble_odds == 0 {
            return Err(TuningError::ZeroOdds);
        }
        Ok(())
    }

    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // Plain numeric fields always serialize
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("Invalid tuning in {}: {}; using defaults", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), err);
                Self::default()
            }
        }
    }
}
