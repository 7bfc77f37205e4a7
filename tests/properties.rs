//! Property tests for the simulation step

use glam::Vec2;
use proptest::prelude::*;

use pixel_runner::Tuning;
use pixel_runner::sim::{Obstacle, SimulationState, TickInput, advance};

/// (elapsed ms, jump held) per frame
fn frames() -> impl Strategy<Value = Vec<(f32, bool)>> {
    prop::collection::vec((0.0f32..100.0, any::<bool>()), 1..400)
}

fn input(jump: bool) -> TickInput {
    TickInput {
        jump,
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ground_invariant_holds(seed in any::<u64>(), steps in frames()) {
        let mut state = SimulationState::new(Tuning::default(), seed);
        for (elapsed, jump) in steps {
            let was_airborne = !state.actor.on_ground;
            let report = advance(&mut state, elapsed, &input(jump));
            prop_assert!(state.actor.pos.y <= state.ground_y);
            prop_assert_eq!(state.actor.on_ground, state.actor.pos.y == state.ground_y);
            if report.landed {
                prop_assert!(was_airborne);
                prop_assert_eq!(state.actor.vy, 0.0);
            }
        }
    }

    #[test]
    fn surviving_obstacles_are_on_or_right_of_left_edge(seed in any::<u64>(), steps in frames()) {
        let mut state = SimulationState::new(Tuning::default(), seed);
        for (elapsed, jump) in steps {
            advance(&mut state, elapsed, &input(jump));
            for ob in &state.obstacles {
                prop_assert!(ob.pos.x + ob.size.x >= 0.0);
            }
        }
    }

    #[test]
    fn obstacles_keep_spawn_order(seed in any::<u64>(), steps in frames()) {
        let mut state = SimulationState::new(Tuning::default(), seed);
        for (elapsed, jump) in steps {
            advance(&mut state, elapsed, &input(jump));
            let ids: Vec<u32> = state.obstacles.iter().map(|ob| ob.id).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn score_and_speed_never_decrease(seed in any::<u64>(), steps in frames()) {
        let mut state = SimulationState::new(Tuning::default(), seed);
        for (elapsed, jump) in steps {
            let (score, speed, was_over) = (state.score, state.speed, state.game_over);
            advance(&mut state, elapsed, &input(jump));
            prop_assert!(state.score >= score);
            prop_assert!(state.speed >= speed);
            if !state.game_over && elapsed > 0.0 {
                prop_assert!(state.score > score);
            }
            if was_over {
                prop_assert_eq!(state.score, score);
                prop_assert_eq!(state.speed, speed);
            }
        }
    }

    #[test]
    fn spawn_gaps_stay_within_floor_and_span(seed in any::<u64>(), steps in frames()) {
        let mut state = SimulationState::new(Tuning::default(), seed);
        let floor = state.tuning.spawn_gap_floor_ms;
        let span = state.tuning.spawn_gap_ms;
        for (elapsed, jump) in steps {
            let report = advance(&mut state, elapsed, &input(jump));
            if report.spawned.is_some() {
                prop_assert!(state.spawn_timer_ms >= floor);
                prop_assert!(state.spawn_timer_ms < span.max);
            }
        }
    }

    #[test]
    fn game_over_is_idempotent(seed in any::<u64>(), steps in frames()) {
        let mut state = SimulationState::new(Tuning::default(), seed);
        state.game_over = true;
        let frozen = state.clone();
        for (elapsed, jump) in steps {
            advance(&mut state, elapsed, &input(jump));
            prop_assert_eq!(&state, &frozen);
        }
    }

    #[test]
    fn no_double_jump_midair(seed in any::<u64>(), elapsed in 0.0f32..100.0) {
        let mut state = SimulationState::new(Tuning::default(), seed);
        state.spawn_timer_ms = 1.0e9;
        state.actor.pos.y = state.ground_y - 150.0;
        state.actor.vy = -3.0;
        state.actor.on_ground = false;

        let mut held = state.clone();
        advance(&mut held, elapsed, &input(true));
        advance(&mut state, elapsed, &input(false));
        prop_assert_eq!(held.actor.vy, state.actor.vy);
        prop_assert_eq!(held.actor.pos, state.actor.pos);
    }

    #[test]
    fn zero_delta_leaves_midair_actor_alone(seed in any::<u64>(), height in 1.0f32..200.0, vy in -11.0f32..11.0) {
        let mut state = SimulationState::new(Tuning::default(), seed);
        state.spawn_timer_ms = 500.0;
        state.actor.pos.y = state.ground_y - height;
        state.actor.vy = vy;
        state.actor.on_ground = false;
        let before = state.clone();

        advance(&mut state, 0.0, &input(false));
        prop_assert_eq!(state.actor.pos.y, before.actor.pos.y);
        prop_assert_eq!(state.actor.vy, before.actor.vy);
        prop_assert_eq!(state.score, before.score);
        prop_assert_eq!(state.speed, before.speed);
        prop_assert_eq!(state.spawn_timer_ms, before.spawn_timer_ms);
    }

    #[test]
    fn reset_restores_initial(seed in any::<u64>(), steps in frames()) {
        let mut state = SimulationState::new(Tuning::default(), seed);
        for (elapsed, jump) in steps {
            advance(&mut state, elapsed, &input(jump));
        }
        state.reset();
        prop_assert_eq!(state, SimulationState::new(Tuning::default(), seed));
    }
}

#[test]
fn collision_exactness() {
    let mut state = SimulationState::new(Tuning::default(), 1);
    state.spawn_timer_ms = 1.0e9;
    state.actor.pos = Vec2::new(10.0, 10.0);
    state.actor.size = Vec2::new(20.0, 20.0);
    state.actor.on_ground = false;

    let mut adjacent = state.clone();

    state.obstacles.push(Obstacle {
        id: 1,
        pos: Vec2::new(20.0, 20.0),
        size: Vec2::new(20.0, 20.0),
    });
    advance(&mut state, 0.0, &TickInput::default());
    assert!(state.game_over);

    adjacent.obstacles.push(Obstacle {
        id: 1,
        pos: Vec2::new(31.0, 10.0),
        size: Vec2::new(20.0, 20.0),
    });
    advance(&mut adjacent, 0.0, &TickInput::default());
    assert!(!adjacent.game_over);
}

#[test]
fn run_to_game_over_then_reset() {
    let mut state = SimulationState::new(Tuning::default(), 4);
    // Never jump: the first obstacle that arrives ends the run
    let mut steps = 0;
    while !state.game_over {
        advance(&mut state, 1000.0 / 60.0, &TickInput::default());
        steps += 1;
        assert!(steps < 10_000, "run never ended");
    }
    assert!(state.score > 0.0);

    state.reset();
    assert_eq!(state, SimulationState::new(Tuning::default(), 4));
}
