//! Fixed timestep simulation tick
//!
//! One tick runs the scroll phase (velocity, offset, terrain shifts and crash
//! checks) followed by the gopher phase (gravity, integration, ground clamp).

use serde::{Deserialize, Serialize};

use super::collision::{clamp_to_ground, gopher_crashed};
use super::state::{GameState, Gopher};
use super::terrain::{GroundRng, TerrainWindow};
use crate::tuning::Tuning;

/// What happened during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Terrain shifts (tiles scrolled past)
    pub shifts: u32,
    /// Crash checks performed; one per shift while alive
    pub collision_checks: u32,
    /// The gopher crashed this tick
    pub died: bool,
}

/// Advance the game state by one tick
pub fn tick<R: GroundRng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    tuning: &Tuning,
) -> TickReport {
    let mut report = TickReport::default();
    advance_scroll(state, rng, tuning, &mut report);
    advance_gopher(&mut state.gopher, &state.ground, tuning);
    state.last_tick += 1;
    report
}

fn advance_scroll<R: GroundRng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    tuning: &Tuning,
    report: &mut TickReport,
) {
    let scroll = &mut state.scroll;
    if state.gopher.is_dead() {
        // Coast to a stop once the gopher is gone
        scroll.v = (scroll.v - tuning.dead_scroll_decel).max(0.0);
    } else {
        scroll.v += tuning.scroll_accel;
    }
    scroll.x += scroll.v;

    // Check once per new tile, not once per tick, so a scroll faster than a
    // tile per tick can't carry the gopher past a cliff unchecked.
    while state.scroll.x > tuning.tile_width {
        state.ground.shift(rng, tuning);
        state.scroll.x -= tuning.tile_width;
        report.shifts += 1;

        if state.gopher.is_dead() {
            continue;
        }
        report.collision_checks += 1;
        if gopher_crashed(&state.gopher, &state.ground, tuning) {
            state.gopher.kill(state.last_tick, tuning.death_bounce_v);
            report.died = true;
            log::info!(
                "Gopher crashed at tick {} (y={:.1}, ahead={:.1})",
                state.last_tick,
                state.gopher.y,
                state.ground.height(tuning.ahead_tile())
            );
        }
    }
}

fn advance_gopher(gopher: &mut Gopher, ground: &TerrainWindow, tuning: &Tuning) {
    // Gravity applies even when dead so the body falls off screen
    gopher.v += tuning.gravity;
    gopher.y += gopher.v;
    clamp_to_ground(gopher, ground, tuning);
}

/// Apply a button edge to the gopher
///
/// Press: jump from rest, or one flap per airborne period.
/// Release: cut any remaining rise short.
pub fn press(gopher: &mut Gopher, down: bool, tuning: &Tuning) {
    if gopher.is_dead() {
        return;
    }

    if down {
        if gopher.at_rest {
            gopher.v = tuning.jump_v;
        } else if !gopher.flapped {
            gopher.flapped = true;
            gopher.v = tuning.flap_v;
        }
    } else if gopher.v < 0.0 {
        gopher.v = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::tests::ScriptedRng;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_jump_scenario() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = ScriptedRng::default();
        assert!(state.gopher.at_rest);
        let start_y = state.gopher.y;

        press(&mut state.gopher, true, &tuning);
        assert_eq!(state.gopher.v, -5.0);

        tick(&mut state, &mut rng, &tuning);
        assert!(approx(state.gopher.v, -4.9));
        assert!(approx(state.gopher.y, start_y - 4.9));
        assert!(!state.gopher.at_rest);

        // Early release halts the ascent
        press(&mut state.gopher, false, &tuning);
        assert_eq!(state.gopher.v, 0.0);
        let top = state.gopher.y;
        tick(&mut state, &mut rng, &tuning);
        assert!(state.gopher.y > top);
    }

    #[test]
    fn test_release_while_falling_is_ignored() {
        let tuning = Tuning::default();
        let mut gopher = Gopher::resting(&tuning);
        gopher.at_rest = false;
        gopher.v = 2.0;
        press(&mut gopher, false, &tuning);
        assert_eq!(gopher.v, 2.0);
    }

    #[test]
    fn test_one_flap_per_airborne_period() {
        let tuning = Tuning::default();
        let mut gopher = Gopher::resting(&tuning);
        gopher.at_rest = false;
        gopher.v = 1.0;

        press(&mut gopher, true, &tuning);
        assert_eq!(gopher.v, tuning.flap_v);
        assert!(gopher.flapped);

        gopher.v = 1.0;
        press(&mut gopher, true, &tuning);
        assert_eq!(gopher.v, 1.0);
    }

    #[test]
    fn test_flap_restored_on_landing() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = ScriptedRng::default();

        press(&mut state.gopher, true, &tuning);
        tick(&mut state, &mut rng, &tuning);
        press(&mut state.gopher, true, &tuning);
        assert!(state.gopher.flapped);

        for _ in 0..200 {
            tick(&mut state, &mut rng, &tuning);
            if state.gopher.at_rest {
                break;
            }
        }
        assert!(state.gopher.at_rest);
        assert!(!state.gopher.flapped);
        assert_eq!(state.gopher.v, 0.0);
    }

    #[test]
    fn test_dead_gopher_ignores_input() {
        let tuning = Tuning::default();
        let mut gopher = Gopher::resting(&tuning);
        gopher.kill(0, tuning.death_bounce_v);
        gopher.v = 3.0;
        gopher.at_rest = true;
        press(&mut gopher, true, &tuning);
        assert_eq!(gopher.v, 3.0);
    }

    #[test]
    fn test_first_shift_after_sixteen_ticks() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = ScriptedRng::default();

        for _ in 0..15 {
            assert_eq!(tick(&mut state, &mut rng, &tuning).shifts, 0);
        }
        let report = tick(&mut state, &mut rng, &tuning);
        assert_eq!(report.shifts, 1);
        assert_eq!(report.collision_checks, 1);
        assert!(!report.died);
        assert!(state.scroll.x < tuning.tile_width);
    }

    #[test]
    fn test_scroll_accelerates_while_alive() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = ScriptedRng::default();
        tick(&mut state, &mut rng, &tuning);
        assert!(approx(state.scroll.v, 1.001));
    }

    #[test]
    fn test_scroll_decays_to_zero_when_dead() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = ScriptedRng::default();
        state.gopher.kill(0, tuning.death_bounce_v);
        state.scroll.v = 0.015;

        tick(&mut state, &mut rng, &tuning);
        assert!(approx(state.scroll.v, 0.005));
        tick(&mut state, &mut rng, &tuning);
        assert_eq!(state.scroll.v, 0.0);
    }

    #[test]
    fn test_crash_into_cliff() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        // First shift brings in a major change; nothing else changes after it
        let mut rng = ScriptedRng {
            rolls: vec![true],
            units: vec![0.0],
        };
        // Put a wall two tiles ahead; the first shift brings it one tile ahead
        let mut heights = state.ground.heights().to_vec();
        heights[tuning.ahead_tile() + 1] = 160.0;
        for y in heights {
            state.ground.push(y);
        }

        let mut died_at = None;
        for _ in 0..20 {
            let before = state.last_tick;
            if tick(&mut state, &mut rng, &tuning).died {
                died_at = Some(before);
                break;
            }
        }
        let died_at = died_at.expect("gopher should crash");
        assert_eq!(state.gopher.lifecycle.death_tick(), Some(died_at));
        // Bounced, then one tick of gravity
        assert!(approx(state.gopher.v, tuning.death_bounce_v + tuning.gravity));
        assert!(!state.gopher.at_rest);
    }

    #[test]
    fn test_fast_scroll_catches_wall_between_shifts() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = ScriptedRng::default();
        // Wall two slots past the ahead slot reaches it on the second shift
        let mut heights = state.ground.heights().to_vec();
        heights[tuning.ahead_tile() + 2] = tuning.ground_min;
        for y in heights {
            state.ground.push(y);
        }
        state.scroll.v = 48.5;

        let report = tick(&mut state, &mut rng, &tuning);
        assert_eq!(report.shifts, 3);
        assert_eq!(report.collision_checks, 2);
        assert!(report.died);
        assert_eq!(state.gopher.lifecycle.death_tick(), Some(0));
    }

    #[test]
    fn test_no_checks_after_death() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = ScriptedRng::default();
        state.gopher.kill(0, tuning.death_bounce_v);
        state.scroll.v = tuning.tile_width * 3.0;

        let report = tick(&mut state, &mut rng, &tuning);
        assert!(report.shifts >= 2);
        assert_eq!(report.collision_checks, 0);
    }

    proptest! {
        #[test]
        fn prop_one_check_per_shift(speed in 0.0f32..200.0) {
            // Flat ground never kills, so every shift must be checked
            let tuning = Tuning::default();
            let mut state = GameState::new(&tuning);
            let mut rng = ScriptedRng::default();
            state.scroll.v = speed;

            let report = tick(&mut state, &mut rng, &tuning);
            prop_assert_eq!(report.collision_checks, report.shifts);
            prop_assert!(report.shifts as f32 >= ((speed + tuning.scroll_accel) / tuning.tile_width).floor() - 1.0);
            prop_assert!(state.scroll.x <= tuning.tile_width);
        }

        #[test]
        fn prop_rest_invariant(seed in any::<u64>(), presses in proptest::collection::vec(any::<Option<bool>>(), 1..400)) {
            let tuning = Tuning::default();
            let mut state = GameState::new(&tuning);
            let mut rng = Pcg32::seed_from_u64(seed);
            for p in presses {
                if let Some(down) = p {
                    press(&mut state.gopher, down, &tuning);
                }
                tick(&mut state, &mut rng, &tuning);
                if state.gopher.at_rest {
                    prop_assert!(!state.gopher.flapped);
                    prop_assert_eq!(state.gopher.v, 0.0);
                }
            }
        }
    }
}
