//! Gopher versus ground
//!
//! Two different tests run against the terrain window:
//! - crash detection, once per terrain shift, against the sample one tile ahead
//! - ground support, once per tick, against the lower of the tile under the
//!   gopher and the tile ahead

use super::state::Gopher;
use super::terrain::TerrainWindow;
use crate::tuning::Tuning;

/// Has the gopher run into the ground ahead?
///
/// The gopher's foot (top + tile height) may sink up to `climb_grace` below
/// the ahead sample before it counts as a crash.
pub fn gopher_crashed(gopher: &Gopher, ground: &TerrainWindow, tuning: &Tuning) -> bool {
    gopher.y + tuning.tile_height - tuning.climb_grace > ground.height(tuning.ahead_tile())
}

/// Highest surface under the gopher (smallest y of its tile and the next)
pub fn support_height(ground: &TerrainWindow, tuning: &Tuning) -> f32 {
    ground
        .height(tuning.gopher_tile)
        .min(ground.height(tuning.ahead_tile()))
}

/// Stop a live gopher from falling through the ground
///
/// Dead gophers fall through indefinitely.
pub fn clamp_to_ground(gopher: &mut Gopher, ground: &TerrainWindow, tuning: &Tuning) {
    if gopher.is_dead() {
        return;
    }

    let max_y = support_height(ground, tuning) - tuning.tile_height;
    gopher.at_rest = false;
    if gopher.y >= max_y {
        gopher.v = 0.0;
        gopher.y = max_y;
        gopher.at_rest = true;
        gopher.flapped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground_with(tuning: &Tuning, slots: &[(usize, f32)]) -> TerrainWindow {
        let mut ground = TerrainWindow::flat(tuning.window_len(), tuning.init_ground_y);
        let mut heights = ground.heights().to_vec();
        for &(slot, y) in slots {
            heights[slot] = y;
        }
        for y in heights {
            ground.push(y);
        }
        ground
    }

    #[test]
    fn test_resting_gopher_does_not_crash() {
        let tuning = Tuning::default();
        let ground = ground_with(&tuning, &[]);
        let gopher = Gopher::resting(&tuning);
        assert!(!gopher_crashed(&gopher, &ground, &tuning));
    }

    #[test]
    fn test_small_rise_is_forgiven() {
        let tuning = Tuning::default();
        // Foot at 240, grace 5: a ledge at 235 is survivable, 234 is not
        let gopher = Gopher::resting(&tuning);
        let ground = ground_with(&tuning, &[(2, 235.0)]);
        assert!(!gopher_crashed(&gopher, &ground, &tuning));
        let ground = ground_with(&tuning, &[(2, 234.0)]);
        assert!(gopher_crashed(&gopher, &ground, &tuning));
    }

    #[test]
    fn test_crash_only_looks_ahead() {
        let tuning = Tuning::default();
        let gopher = Gopher::resting(&tuning);
        // Cliff under the gopher itself is not a crash
        let ground = ground_with(&tuning, &[(1, 100.0)]);
        assert!(!gopher_crashed(&gopher, &ground, &tuning));
    }

    #[test]
    fn test_support_uses_higher_surface() {
        let tuning = Tuning::default();
        let ground = ground_with(&tuning, &[(1, 230.0), (2, 220.0)]);
        assert_eq!(support_height(&ground, &tuning), 220.0);
        let ground = ground_with(&tuning, &[(1, 210.0), (2, 220.0)]);
        assert_eq!(support_height(&ground, &tuning), 210.0);
    }

    #[test]
    fn test_clamp_lands_and_clears_flap() {
        let tuning = Tuning::default();
        let ground = ground_with(&tuning, &[]);
        let mut gopher = Gopher::resting(&tuning);
        gopher.y = 230.0;
        gopher.v = 3.0;
        gopher.at_rest = false;
        gopher.flapped = true;

        clamp_to_ground(&mut gopher, &ground, &tuning);
        assert_eq!(gopher.y, 224.0);
        assert_eq!(gopher.v, 0.0);
        assert!(gopher.at_rest);
        assert!(!gopher.flapped);
    }

    #[test]
    fn test_clamp_leaves_airborne_gopher() {
        let tuning = Tuning::default();
        let ground = ground_with(&tuning, &[]);
        let mut gopher = Gopher::resting(&tuning);
        gopher.y = 200.0;
        gopher.v = -1.0;

        clamp_to_ground(&mut gopher, &ground, &tuning);
        assert_eq!(gopher.y, 200.0);
        assert!(!gopher.at_rest);
    }

    #[test]
    fn test_dead_gopher_falls_through() {
        let tuning = Tuning::default();
        let ground = ground_with(&tuning, &[]);
        let mut gopher = Gopher::resting(&tuning);
        gopher.kill(0, tuning.death_bounce_v);
        gopher.y = 500.0;
        gopher.v = 4.0;
        gopher.at_rest = false;

        clamp_to_ground(&mut gopher, &ground, &tuning);
        assert_eq!(gopher.y, 500.0);
        assert_eq!(gopher.v, 4.0);
    }
}
