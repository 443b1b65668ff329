//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Whole ticks only
//! - Injected, seedable RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod game;
pub mod snapshot;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{clamp_to_ground, gopher_crashed, support_height};
pub use game::{Game, SharedGame};
pub use snapshot::{Pose, Snapshot, Sprite, SpriteKind};
pub use state::{GameState, Gopher, Lifecycle, Scroll};
pub use terrain::{GroundRng, TerrainChange, TerrainWindow, next_ground_y};
pub use tick::{TickReport, press, tick};
