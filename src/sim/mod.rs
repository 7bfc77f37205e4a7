//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Elapsed time comes in as an argument, never from a clock
//! - Seeded RNG only
//! - Obstacles keep spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{Rect, first_overlap};
pub use state::{Actor, Obstacle, SimulationState, Snapshot};
pub use tick::{StepReport, TickInput, advance};
