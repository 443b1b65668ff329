//! Gopher Run - deterministic core of a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scroll, terrain, physics, lifecycle)
//! - `tuning`: Data-driven game balance
//! - `clock`: Wall-clock to simulation tick conversion
//!
//! Drawing, assets and raw input devices live outside this crate; they read
//! [`sim::Snapshot`] values and feed [`sim::Game::press`].

pub mod clock;
pub mod sim;
pub mod tuning;

pub use clock::TickClock;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Width and height of each tile
    pub const TILE_WIDTH: f32 = 16.0;
    pub const TILE_HEIGHT: f32 = 16.0;
    /// Number of tiles across and down the screen
    pub const TILES_X: usize = 16;
    pub const TILES_Y: usize = 16;

    /// Which tile column the gopher stands on (0-indexed)
    pub const GOPHER_TILE: usize = 1;

    /// Initial scroll velocity (pixels/tick)
    pub const INIT_SCROLL_V: f32 = 1.0;
    /// Scroll acceleration while alive (pixels/tick²)
    pub const SCROLL_A: f32 = 0.001;
    /// Scroll deceleration after the gopher dies (pixels/tick²)
    pub const DEAD_SCROLL_DECEL: f32 = 0.01;

    pub const GRAVITY: f32 = 0.1;
    /// Jump velocity from rest (negative is up)
    pub const JUMP_V: f32 = -5.0;
    /// Mid-air flap velocity
    pub const FLAP_V: f32 = -1.5;

    /// How long to wait before restarting the game (ticks)
    pub const DEAD_TIME_BEFORE_RESET: u64 = 240;

    /// 1/probability of a major ground height change
    pub const GROUND_CHANGE_ODDS: u32 = 5;
    /// 1/probability of a minor ground height change
    pub const GROUND_WOBBLE_ODDS: u32 = 3;

    /// Highest ground surface (smallest y)
    pub const GROUND_MIN: f32 = TILE_HEIGHT * (TILES_Y - 2 * TILES_Y / 5) as f32;
    /// Lowest ground surface (bottom of the screen)
    pub const GROUND_MAX: f32 = TILE_HEIGHT * TILES_Y as f32;
    pub const INIT_GROUND_Y: f32 = TILE_HEIGHT * (TILES_Y - 1) as f32;

    /// Gopher won't die if it hits a cliff this high.
    /// Integer division, 16 / 3 = 5.
    pub const CLIMB_GRACE: f32 = (16 / 3) as f32;

    /// Ground samples kept in the terrain window
    pub const TERRAIN_WINDOW_LEN: usize = TILES_X + 3;

    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;
}
