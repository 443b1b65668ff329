//! The game aggregate and its catch-up scheduler
//!
//! `Game` owns the state, the terrain RNG and the tuning. Collaborators only
//! talk to it through `reset`, `update` and `press`, and read it back through
//! `snapshot`.

use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::snapshot::Snapshot;
use super::state::GameState;
use super::terrain::GroundRng;
use super::tick::{TickReport, press, tick};
use crate::tuning::{Tuning, TuningError};

/// A game shared between the frame loop and an input thread
pub type SharedGame<R = Pcg32> = Arc<Mutex<Game<R>>>;

/// One independent simulation instance
#[derive(Debug, Clone)]
pub struct Game<R = Pcg32> {
    state: GameState,
    rng: R,
    tuning: Tuning,
    /// Automatic restarts after a death
    restarts: u64,
}

impl Game<Pcg32> {
    /// New game with reference tuning and a seeded terrain generator
    pub fn new(seed: u64) -> Self {
        Self::build(Pcg32::seed_from_u64(seed), Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        Self::with_rng(Pcg32::seed_from_u64(seed), tuning)
    }

    pub fn shared(self) -> SharedGame {
        Arc::new(Mutex::new(self))
    }
}

impl<R: GroundRng> Game<R> {
    /// New game drawing terrain from `rng`, rejecting unusable tuning
    pub fn with_rng(rng: R, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(rng, tuning))
    }

    fn build(rng: R, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(&tuning),
            rng,
            tuning,
            restarts: 0,
        }
    }

    /// Back to the starting configuration
    ///
    /// The clock is kept so the next `update` does not replay the run so far.
    pub fn reset(&mut self) {
        let last_tick = self.state.last_tick;
        self.state.reset(&self.tuning);
        self.state.last_tick = last_tick;
    }

    /// Simulate every tick after the last simulated one up to and including `now`
    ///
    /// Returns the number of ticks simulated. `now` must never go backwards.
    pub fn update(&mut self, now: u64) -> u64 {
        self.restart_if_due(now);

        let mut simulated = 0;
        while self.state.last_tick < now {
            self.advance_one_tick();
            simulated += 1;
        }
        // A crash early in a long catch-up can already be past the dead time
        self.restart_if_due(now);
        simulated
    }

    /// Like [`Game::update`], but simulate at most `max_ticks`
    ///
    /// Older ticks beyond the cap are dropped rather than replayed.
    pub fn update_capped(&mut self, now: u64, max_ticks: u64) -> u64 {
        let behind = now.saturating_sub(self.state.last_tick);
        if behind > max_ticks {
            log::warn!(
                "Simulation {} ticks behind, skipping {}",
                behind,
                behind - max_ticks
            );
            self.state.last_tick = now - max_ticks;
        }
        self.update(now)
    }

    /// Run exactly one tick
    pub fn advance_one_tick(&mut self) -> TickReport {
        tick(&mut self.state, &mut self.rng, &self.tuning)
    }

    /// Deliver a button edge (`true` = pressed)
    pub fn press(&mut self, down: bool) {
        press(&mut self.state.gopher, down, &self.tuning);
    }

    /// Owned view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Number of automatic restarts so far
    #[inline]
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Dead long enough: restart and take `now` as the new baseline
    fn restart_if_due(&mut self, now: u64) {
        let lifecycle = self.state.gopher.lifecycle;
        if !lifecycle.reset_due(now, self.tuning.dead_time_before_reset) {
            return;
        }

        log::info!(
            "Restarting at tick {} (died at tick {})",
            now,
            lifecycle.death_tick().unwrap_or_default()
        );
        self.reset();
        self.state.last_tick = now;
        self.restarts += 1;
    }
}
