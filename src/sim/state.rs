//! Game state and core simulation types
//!
//! Everything a step reads or writes lives in [`SimulationState`]. The tuning
//! and seed are environment constants for the run; all other fields are run
//! state and are reinstated by [`SimulationState::reset`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// The player-controlled runner
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Top-left corner; x never changes during a run
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative is up), px per reference frame
    pub vy: f32,
    pub on_ground: bool,
}

impl Actor {
    /// Actor standing on the ground at its fixed x
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.actor_x, tuning.ground_y()),
            size: Vec2::new(tuning.actor_width, tuning.actor_height),
            vy: 0.0,
            on_ground: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A hazard scrolling in from the right
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    /// Drawn once at spawn
    pub size: Vec2,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Fully past the world's left edge
    pub fn is_retired(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance and world dimensions for this run
    pub tuning: Tuning,
    pub actor: Actor,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Actor's y when standing on the ground
    pub ground_y: f32,
    /// Current world speed, px per reference frame
    pub speed: f32,
    /// Milliseconds until the next spawn check fires
    pub spawn_timer_ms: f32,
    /// Amount trimmed off the next rolled spawn gap
    pub spawn_gap_cut_ms: f32,
    /// Score accumulator (displayed floored)
    pub score: f64,
    pub game_over: bool,
    /// Milliseconds survived this run
    pub survived_ms: f64,
    rng: Pcg32,
    next_id: u32,
}

impl SimulationState {
    /// Starting state for a run
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let actor = Actor::new(&tuning);
        Self {
            seed,
            ground_y: tuning.ground_y(),
            speed: tuning.initial_speed,
            actor,
            obstacles: Vec::new(),
            // Zero forces a spawn check on the very first step
            spawn_timer_ms: 0.0,
            spawn_gap_cut_ms: 0.0,
            score: 0.0,
            game_over: false,
            survived_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Reinstate every run field; tuning and seed are kept
    pub fn reset(&mut self) {
        self.reset_with_seed(self.seed);
    }

    /// Reset and switch to a new obstacle sequence
    pub fn reset_with_seed(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::new(tuning, seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one obstacle at the right edge with its baseline on the ground
    pub fn spawn_obstacle(&mut self) -> u32 {
        let width = self.tuning.obstacle_width.sample(&mut self.rng);
        let height = self.tuning.obstacle_height.sample(&mut self.rng);
        let baseline = self.ground_y + self.actor.size.y;
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(self.tuning.world_width + self.tuning.spawn_margin, baseline - height),
            size: Vec2::new(width, height),
        });
        id
    }

    /// Draw the delay until the next spawn, then tighten the following one.
    ///
    /// The cut never takes a gap below `spawn_gap_floor_ms`; a draw that is
    /// already under the floor is left as is.
    pub fn roll_spawn_gap(&mut self) -> f32 {
        let drawn = self.tuning.spawn_gap_ms.sample(&mut self.rng);
        let floor = self.tuning.spawn_gap_floor_ms.min(drawn);
        let gap = (drawn - self.spawn_gap_cut_ms).max(floor);
        self.spawn_gap_cut_ms =
            (self.spawn_gap_cut_ms + self.tuning.spawn_gap_ramp).min(self.tuning.spawn_gap_ms.max);
        gap
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// Read-only view for renderers and the HUD
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            world: Vec2::new(self.tuning.world_width, self.tuning.world_height),
            surface_y: self.tuning.surface_y(),
            actor: self.actor.rect(),
            actor_airborne: !self.actor.on_ground,
            obstacles: self.obstacles.iter().map(Obstacle::rect).collect(),
            score: self.display_score(),
            speed: self.speed,
            survived_ms: self.survived_ms,
            game_over: self.game_over,
        }
    }
}

/// Render-side copy of the state after a step. Nothing writes back through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// World width and height
    pub world: Vec2,
    /// Y of the running surface (actor baseline)
    pub surface_y: f32,
    pub actor: Rect,
    pub actor_airborne: bool,
    pub obstacles: Vec<Rect>,
    pub score: u64,
    pub speed: f32,
    pub survived_ms: f64,
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Span;

    #[test]
    fn test_initial_state() {
        let state = SimulationState::new(Tuning::default(), 42);
        assert_eq!(state.actor.pos, Vec2::new(80.0, 340.0));
        assert!(state.actor.on_ground);
        assert_eq!(state.actor.vy, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.speed, 6.0);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.spawn_timer_ms, 0.0);
        assert_eq!(state.spawn_gap_cut_ms, 0.0);
        assert!(!state.game_over);
    }

    #[test]
    fn test_spawn_obstacle_aligns_baseline() {
        let mut state = SimulationState::new(Tuning::default(), 1);
        let id = state.spawn_obstacle();
        let ob = &state.obstacles[0];
        assert_eq!(ob.id, id);
        assert_eq!(ob.pos.x, 820.0);
        assert_eq!(ob.pos.y + ob.size.y, state.actor.rect().bottom());
        assert!((20.0..40.0).contains(&ob.size.x));
        assert!((40.0..70.0).contains(&ob.size.y));
    }

    #[test]
    fn test_reset_matches_new() {
        let mut state = SimulationState::new(Tuning::default(), 9);
        state.spawn_obstacle();
        state.roll_spawn_gap();
        state.roll_spawn_gap();
        state.score = 55.5;
        state.speed = 9.0;
        state.game_over = true;
        state.actor.pos.y = 100.0;
        state.actor.on_ground = false;

        state.reset();
        assert_eq!(state, SimulationState::new(Tuning::default(), 9));
    }

    #[test]
    fn test_spawn_gap_shrinks_to_floor() {
        let tuning = Tuning {
            spawn_gap_ms: Span::new(1000.0, 1000.0),
            spawn_gap_ramp: 50.0,
            spawn_gap_floor_ms: 800.0,
            ..Tuning::default()
        };
        let mut state = SimulationState::new(tuning, 5);
        let gaps: Vec<f32> = (0..7).map(|_| state.roll_spawn_gap()).collect();
        assert_eq!(gaps, [1000.0, 950.0, 900.0, 850.0, 800.0, 800.0, 800.0]);

        state.reset();
        assert_eq!(state.spawn_gap_cut_ms, 0.0);
        assert_eq!(state.roll_spawn_gap(), 1000.0);
    }

    #[test]
    fn test_spawn_gap_under_floor_is_kept() {
        let tuning = Tuning {
            spawn_gap_ms: Span::new(500.0, 500.0),
            spawn_gap_ramp: 50.0,
            spawn_gap_floor_ms: 800.0,
            ..Tuning::default()
        };
        let mut state = SimulationState::new(tuning, 5);
        for _ in 0..5 {
            assert_eq!(state.roll_spawn_gap(), 500.0);
        }
    }

    #[test]
    fn test_spawn_gap_ramp_with_random_draws() {
        let mut state = SimulationState::new(Tuning::default(), 11);
        let floor = state.tuning.spawn_gap_floor_ms;
        let span = state.tuning.spawn_gap_ms;
        let gaps: Vec<f32> = (0..400).map(|_| state.roll_spawn_gap()).collect();
        assert!(gaps.iter().all(|&g| g >= floor && g < span.max));
        // Late in the run every gap sits on the floor
        assert!(gaps[300..].iter().all(|&g| g == floor));
        let early = gaps[..20].iter().sum::<f32>() / 20.0;
        assert!(early > floor);
    }

    #[test]
    fn test_reset_with_seed_keeps_tuning() {
        let tuning = Tuning {
            gravity: 0.9,
            ..Tuning::default()
        };
        let mut state = SimulationState::new(tuning.clone(), 1);
        state.reset_with_seed(2);
        assert_eq!(state.seed, 2);
        assert_eq!(state.tuning, tuning);
    }

    #[test]
    fn test_snapshot() {
        let mut state = SimulationState::new(Tuning::default(), 3);
        state.spawn_obstacle();
        state.score = 12.9;
        let snap = state.snapshot();
        assert_eq!(snap.score, 12);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.surface_y, 380.0);
        assert!(!snap.actor_airborne);
    }
}
