//! Read-only view of the simulation for the renderer
//!
//! A snapshot is an owned copy; holding one never blocks the tick loop.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::tuning::Tuning;

/// Which gopher sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Dead,
    /// Moving upward
    Rising,
    Neutral,
}

/// Texture category for a laid-out sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Gopher,
    GopherFlap,
    GopherDead,
    /// Top surface of a ground column
    Ground,
    /// Fill beneath the ground surface
    Earth,
}

/// Axis-aligned placement of one sprite in screen pixels (y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

/// Everything a frame needs to draw the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub gopher_y: f32,
    pub pose: Pose,
    pub scroll_x: f32,
    pub ground: Vec<f32>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let pose = if state.gopher.is_dead() {
            Pose::Dead
        } else if state.gopher.v < 0.0 {
            Pose::Rising
        } else {
            Pose::Neutral
        };

        Self {
            tick: state.last_tick,
            gopher_y: state.gopher.y,
            pose,
            scroll_x: state.scroll.x,
            ground: state.ground.heights().to_vec(),
        }
    }

    /// Lay out the scene: ground and earth per column, then the gopher on top
    pub fn sprites(&self, tuning: &Tuning) -> Vec<Sprite> {
        let tw = tuning.tile_width;
        let th = tuning.tile_height;
        let mut sprites = Vec::with_capacity(self.ground.len() * 2 + 1);

        for (i, &ground_y) in self.ground.iter().enumerate() {
            let x = i as f32 * tw - self.scroll_x;
            sprites.push(Sprite {
                kind: SpriteKind::Ground,
                pos: Vec2::new(x, ground_y),
                size: Vec2::new(tw, th),
            });
            sprites.push(Sprite {
                kind: SpriteKind::Earth,
                pos: Vec2::new(x, ground_y + th),
                size: Vec2::new(tw, th * tuning.tiles_y as f32),
            });
        }

        let kind = match self.pose {
            Pose::Dead => SpriteKind::GopherDead,
            Pose::Rising => SpriteKind::GopherFlap,
            Pose::Neutral => SpriteKind::Gopher,
        };
        // Drawn two tiles wide, centred a little right of the column to its left
        sprites.push(Sprite {
            kind,
            pos: Vec2::new(
                tw * (tuning.gopher_tile as f32 - 1.0) + tw / 8.0,
                self.gopher_y - th + th / 4.0,
            ),
            size: Vec2::new(tw * 2.0, th * 2.0),
        });

        sprites
    }
}
