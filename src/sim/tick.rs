//! Variable-timestep simulation step
//!
//! One call per rendered frame. The rules run in a fixed order: jump before
//! gravity, and collision only once every position for the frame is final.

use super::autopilot;
use super::collision::first_overlap;
use super::state::SimulationState;
use crate::consts::REFERENCE_FRAME_MS;

/// Input snapshot for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump held (level-triggered)
    pub jump: bool,
    /// Idle/demo mode - autopilot decides the jump
    pub idle_mode: bool,
}

/// What happened during a step, for logging and effects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Actor left the ground this step
    pub jumped: bool,
    /// Actor touched down after being airborne
    pub landed: bool,
    /// Id of the obstacle spawned this step
    pub spawned: Option<u32>,
    /// Obstacles removed past the left edge
    pub retired: usize,
    /// Id of the obstacle that ended the run
    pub collided_with: Option<u32>,
}

impl StepReport {
    pub fn ended_run(&self) -> bool {
        self.collided_with.is_some()
    }
}

/// Advance the simulation by `elapsed_ms` of wall-clock time.
///
/// Physics and obstacle motion are defined per reference frame and scaled by
/// `elapsed_ms / REFERENCE_FRAME_MS`, so a zero-length step moves nothing.
/// Once the run is over the state is frozen until reset.
pub fn advance(state: &mut SimulationState, elapsed_ms: f32, input: &TickInput) -> StepReport {
    let mut report = StepReport::default();

    if state.game_over {
        return report;
    }

    let elapsed_ms = if elapsed_ms.is_finite() {
        elapsed_ms.max(0.0)
    } else {
        0.0
    };
    let frames = elapsed_ms / REFERENCE_FRAME_MS;

    // Jump
    let jump = if input.idle_mode {
        autopilot::wants_jump(state)
    } else {
        input.jump
    };
    let was_on_ground = state.actor.on_ground;
    let took_off = jump && state.actor.on_ground;
    if took_off {
        state.actor.vy = state.tuning.jump_force;
        state.actor.on_ground = false;
    }

    // Gravity
    state.actor.vy += state.tuning.gravity * frames;
    state.actor.pos.y += state.actor.vy * frames;

    // Ground clamp
    if state.actor.pos.y >= state.ground_y {
        state.actor.pos.y = state.ground_y;
        state.actor.vy = 0.0;
        state.actor.on_ground = true;
        report.landed = !was_on_ground;
    }
    // A jump with no elapsed time is grounded again by the clamp
    report.jumped = took_off && !state.actor.on_ground;

    // Difficulty ramp
    state.speed += elapsed_ms * state.tuning.speed_ramp;
    if let Some(max) = state.tuning.max_speed {
        state.speed = state.speed.min(max);
    }

    // Spawn countdown (at most one per step)
    state.spawn_timer_ms -= elapsed_ms;
    if state.spawn_timer_ms <= 0.0 {
        let id = state.spawn_obstacle();
        state.spawn_timer_ms = state.roll_spawn_gap();
        log::debug!(
            "Spawned obstacle {} (next in {:.0} ms, speed {:.2})",
            id,
            state.spawn_timer_ms,
            state.speed
        );
        report.spawned = Some(id);
    }

    // Obstacle advance
    let dx = state.speed * frames;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= dx;
    }

    // Retirement
    let before = state.obstacles.len();
    state.obstacles.retain(|ob| !ob.is_retired());
    report.retired = before - state.obstacles.len();

    // Collision
    let actor = state.actor.rect();
    if let Some(idx) = first_overlap(&actor, state.obstacles.iter().map(|ob| ob.rect())) {
        state.game_over = true;
        report.collided_with = Some(state.obstacles[idx].id);
    }

    // Score
    if !state.game_over || state.tuning.score_fatal_frame {
        state.score += f64::from(elapsed_ms) * f64::from(state.tuning.score_rate);
    }
    state.survived_ms += f64::from(elapsed_ms);

    report
}
