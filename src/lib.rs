//! Pixel Runner - a single-screen side-scrolling runner
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, spawning, collision, scoring)
//! - `session`: Frame driver that owns the state between steps
//! - `renderer`: WebGPU rendering of state snapshots
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use session::Session;
pub use tuning::{Difficulty, Tuning};

/// Game configuration constants
pub mod consts {
    /// Frame interval the per-frame physics constants are defined against (60 Hz)
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
}
