//! Idle/demo mode: decides when to jump without player input

use super::state::SimulationState;

/// Frames of lead before an obstacle reaches the actor at which to take off.
/// With the default jump the actor clears 70 px between frames 8 and 35 of
/// the arc, so leaving 14 frames early keeps the widest obstacle inside that
/// window at any speed.
pub const LEAD_FRAMES: f32 = 14.0;

/// Distance from the actor's leading edge to the nearest obstacle ahead
pub fn gap_to_next_obstacle(state: &SimulationState) -> Option<f32> {
    let actor = state.actor.rect();
    state
        .obstacles
        .iter()
        .map(|ob| ob.rect())
        .filter(|r| r.right() > actor.left())
        .map(|r| r.left() - actor.right())
        .filter(|gap| *gap >= 0.0)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// Whether the autopilot wants to jump this step
pub fn wants_jump(state: &SimulationState) -> bool {
    if !state.actor.on_ground {
        return false;
    }
    let lead = state.speed * LEAD_FRAMES;
    gap_to_next_obstacle(state).is_some_and(|gap| gap <= lead)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state_with_obstacle_at(x: f32) -> SimulationState {
        let mut state = SimulationState::new(Tuning::default(), 5);
        state.spawn_obstacle();
        state.obstacles[0].pos.x = x;
        state
    }

    #[test]
    fn test_no_obstacles_no_jump() {
        let state = SimulationState::new(Tuning::default(), 5);
        assert_eq!(gap_to_next_obstacle(&state), None);
        assert!(!wants_jump(&state));
    }

    #[test]
    fn test_jumps_inside_lead() {
        // Actor right edge is at 112; lead at speed 6 is 84 px
        let far = state_with_obstacle_at(112.0 + 200.0);
        assert_eq!(gap_to_next_obstacle(&far), Some(200.0));
        assert!(!wants_jump(&far));

        let near = state_with_obstacle_at(112.0 + 80.0);
        assert!(wants_jump(&near));
    }

    #[test]
    fn test_ignores_obstacles_behind() {
        let state = state_with_obstacle_at(-10.0);
        assert_eq!(gap_to_next_obstacle(&state), None);
    }

    #[test]
    fn test_no_jump_when_airborne() {
        let mut state = state_with_obstacle_at(150.0);
        state.actor.on_ground = false;
        state.actor.pos = Vec2::new(80.0, 250.0);
        assert!(!wants_jump(&state));
    }
}
