//! Data-driven game balance
//!
//! Every number the simulation uses lives here. Physics values are expressed
//! per reference frame (see [`REFERENCE_FRAME_MS`](crate::consts::REFERENCE_FRAME_MS)),
//! time-driven values per millisecond.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Starting world speed (px per reference frame)
    pub fn initial_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 5.0,
            Difficulty::Normal => 6.0,
            Difficulty::Hard => 7.0,
        }
    }

    /// Speed gained per elapsed millisecond
    pub fn speed_ramp(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.0003,
            Difficulty::Normal => 0.0005,
            Difficulty::Hard => 0.0008,
        }
    }

    /// Spawn gap range in milliseconds
    pub fn spawn_gap_ms(&self) -> Span {
        match self {
            Difficulty::Easy => Span::new(1100.0, 2000.0),
            Difficulty::Normal => Span::new(900.0, 1800.0),
            Difficulty::Hard => Span::new(800.0, 1500.0),
        }
    }

    /// Milliseconds trimmed off the spawn gap after each spawn
    pub fn spawn_gap_ramp(&self) -> f32 {
        match self {
            Difficulty::Easy => 4.0,
            Difficulty::Normal => 5.0,
            Difficulty::Hard => 6.0,
        }
    }

    /// Shortest gap the ramp can reach, in milliseconds
    pub fn spawn_gap_floor_ms(&self) -> f32 {
        match self {
            Difficulty::Easy => 900.0,
            Difficulty::Normal => 800.0,
            Difficulty::Hard => 700.0,
        }
    }
}

/// Closed-open numeric range `[min, max)` used for random draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform draw from the span. A degenerate span always yields `min`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Game balance and world dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Visible world width in pixels
    pub world_width: f32,
    /// Visible world height in pixels
    pub world_height: f32,
    /// Height of the ground strip below the running surface
    pub ground_height: f32,

    // === Actor ===
    /// Fixed horizontal position of the actor
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,

    // === Physics (per reference frame) ===
    /// Downward acceleration, px/frame²
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up), px/frame
    pub jump_force: f32,

    // === Difficulty ===
    /// World speed at run start, px/frame
    pub initial_speed: f32,
    /// Speed gained per elapsed millisecond
    pub speed_ramp: f32,
    /// Optional ceiling on world speed
    pub max_speed: Option<f32>,

    // === Obstacles ===
    /// Distance past the right edge at which obstacles appear
    pub spawn_margin: f32,
    /// Delay between spawns, in milliseconds
    pub spawn_gap_ms: Span,
    /// Milliseconds cut from the spawn gap after each spawn
    pub spawn_gap_ramp: f32,
    /// The ramp never shortens a gap below this
    pub spawn_gap_floor_ms: f32,
    pub obstacle_width: Span,
    pub obstacle_height: Span,

    // === Scoring ===
    /// Score gained per elapsed millisecond
    pub score_rate: f32,
    /// Whether the frame that ends the run still scores
    pub score_fatal_frame: bool,

    // === Clock ===
    /// Upper clamp on a single frame's elapsed time
    pub max_elapsed_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        let preset = Difficulty::default();
        Self {
            world_width: 800.0,
            world_height: 400.0,
            ground_height: 20.0,

            actor_x: 80.0,
            actor_width: 32.0,
            actor_height: 40.0,

            gravity: 0.5,
            jump_force: -11.0,

            initial_speed: preset.initial_speed(),
            speed_ramp: preset.speed_ramp(),
            max_speed: None,

            spawn_margin: 20.0,
            spawn_gap_ms: preset.spawn_gap_ms(),
            spawn_gap_ramp: preset.spawn_gap_ramp(),
            spawn_gap_floor_ms: preset.spawn_gap_floor_ms(),
            obstacle_width: Span::new(20.0, 40.0),
            obstacle_height: Span::new(40.0, 70.0),

            score_rate: 0.01,
            score_fatal_frame: false,

            max_elapsed_ms: 100.0,
        }
    }
}

impl Tuning {
    /// Create tuning from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut tuning = Self::default();
        tuning.apply_preset(preset);
        tuning
    }

    /// Apply a difficulty preset (updates difficulty-dependent values)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.initial_speed = preset.initial_speed();
        self.speed_ramp = preset.speed_ramp();
        self.spawn_gap_ms = preset.spawn_gap_ms();
        self.spawn_gap_ramp = preset.spawn_gap_ramp();
        self.spawn_gap_floor_ms = preset.spawn_gap_floor_ms();
    }

    /// Y coordinate of the actor's top edge when standing on the ground
    pub fn ground_y(&self) -> f32 {
        self.world_height - self.ground_height - self.actor_height
    }

    /// Y coordinate of the running surface
    pub fn surface_y(&self) -> f32 {
        self.world_height - self.ground_height
    }

    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would produce NaN positions or negative sizes
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("max_elapsed_ms", self.max_elapsed_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("ground_height", self.ground_height),
            ("actor_x", self.actor_x),
            ("gravity", self.gravity),
            ("initial_speed", self.initial_speed),
            ("speed_ramp", self.speed_ramp),
            ("spawn_margin", self.spawn_margin),
            ("spawn_gap_ramp", self.spawn_gap_ramp),
            ("spawn_gap_floor_ms", self.spawn_gap_floor_ms),
            ("score_rate", self.score_rate),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if !(self.jump_force.is_finite() && self.jump_force < 0.0) {
            return Err(TuningError::Invalid(format!(
                "jump_force must be negative (upward), got {}",
                self.jump_force
            )));
        }

        if let Some(max) = self.max_speed {
            if !(max.is_finite() && max >= self.initial_speed) {
                return Err(TuningError::Invalid(format!(
                    "max_speed {max} must be at least initial_speed {}",
                    self.initial_speed
                )));
            }
        }

        let spans = [
            ("spawn_gap_ms", self.spawn_gap_ms),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
        ];
        for (name, span) in spans {
            if !span.is_valid() || span.min <= 0.0 {
                return Err(TuningError::Invalid(format!(
                    "{name} must satisfy 0 < min <= max, got [{}, {})",
                    span.min, span.max
                )));
            }
        }

        if self.ground_y() < 0.0 {
            return Err(TuningError::Invalid(
                "actor and ground do not fit in the world height".into(),
            ));
        }

        Ok(())
    }
}
