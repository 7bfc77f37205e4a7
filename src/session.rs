//! Frame driver
//!
//! Owns the simulation between steps. Input handlers only set flags on the
//! session; the flags are consumed at the top of the next [`Session::frame`],
//! so a restart can never land in the middle of a step.

use crate::sim::{FrameClock, SimulationState, Snapshot, StepReport, TickInput, advance};
use crate::tuning::Tuning;

/// One running game
pub struct Session {
    state: SimulationState,
    clock: FrameClock,
    /// Held input, sampled every frame
    pub input: TickInput,
    /// Queued restart (seed for the next run, if it should change)
    pending_restart: Option<Option<u64>>,
    /// Completed runs since the session started
    runs: u32,
    best_score: u64,
}

impl Session {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        log::info!("Starting run with seed {}", seed);
        Self {
            clock: FrameClock::new(tuning.max_elapsed_ms),
            state: SimulationState::new(tuning, seed),
            input: TickInput::default(),
            pending_restart: None,
            runs: 0,
            best_score: 0,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Highest floored score across finished runs
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn set_jump(&mut self, held: bool) {
        self.input.jump = held;
    }

    pub fn toggle_idle_mode(&mut self) -> bool {
        self.input.idle_mode = !self.input.idle_mode;
        log::info!("Idle mode: {}", self.input.idle_mode);
        self.input.idle_mode
    }

    /// Restart with the same obstacle sequence at the next frame
    pub fn request_restart(&mut self) {
        self.pending_restart = Some(None);
    }

    /// Restart with a new seed at the next frame
    pub fn request_restart_with_seed(&mut self, seed: u64) {
        self.pending_restart = Some(Some(seed));
    }

    pub fn restart_pending(&self) -> bool {
        self.pending_restart.is_some()
    }

    /// Run one frame at `timestamp_ms` (monotonic)
    pub fn frame(&mut self, timestamp_ms: f64) -> StepReport {
        if let Some(seed) = self.pending_restart.take() {
            self.apply_restart(seed);
        }

        let elapsed_ms = self.clock.elapsed_ms(timestamp_ms);
        let report = advance(&mut self.state, elapsed_ms, &self.input);

        if report.jumped {
            log::debug!("Jump at speed {:.2}", self.state.speed);
        }
        if report.ended_run() {
            let score = self.state.display_score();
            self.runs += 1;
            self.best_score = self.best_score.max(score);
            log::info!(
                "Game over: score {} after {:.1}s (speed {:.2}, best {})",
                score,
                self.state.survived_ms / 1000.0,
                self.state.speed,
                self.best_score
            );
        }

        report
    }

    fn apply_restart(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => self.state.reset_with_seed(seed),
            None => self.state.reset(),
        }
        // First frame of the new run has no meaningful delta
        self.clock.reset();
        log::info!("Restarted run with seed {}", self.state.seed);
    }
}
