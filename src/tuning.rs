//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`], defaulting to the values in
//! [`crate::consts`]. Tuning files are JSON; missing fields fall back to the
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::SizeClass;

/// Upper bound for any per-tick speed or spin in a tuning file
pub const MAX_TUNED_SPEED: f32 = 1.0e4;

/// Errors raised while loading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play area ===
    pub width: f32,
    pub height: f32,

    // === Ship ===
    pub ship_radius: f32,
    pub ship_max_speed: f32,
    /// Radians per tick
    pub ship_rotation_speed: f32,
    pub ship_thrust: f32,
    /// Velocity multiplier applied every tick (< 1)
    pub ship_friction: f32,
    pub invulnerable_ticks: u32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_life: u32,
    pub bullet_radius: f32,

    // === Asteroids ===
    pub asteroid_speed: f32,
    pub asteroid_spin: f32,
    pub large_radius: f32,
    pub medium_radius: f32,
    pub small_radius: f32,
    pub medium_fragment_speed: f32,
    pub small_fragment_speed: f32,
    pub fragments_per_split: u32,

    // === Scoring / progression ===
    pub large_score: u64,
    pub medium_score: u64,
    pub small_score: u64,
    pub starting_lives: u32,
    pub base_wave_size: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,

            ship_radius: SHIP_RADIUS,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            ship_thrust: SHIP_THRUST,
            ship_friction: SHIP_FRICTION,
            invulnerable_ticks: INVULNERABLE_TICKS,

            bullet_speed: BULLET_SPEED,
            bullet_life: BULLET_LIFE,
            bullet_radius: BULLET_RADIUS,

            asteroid_speed: ASTEROID_SPEED,
            asteroid_spin: ASTEROID_SPIN,
            large_radius: LARGE_RADIUS,
            medium_radius: MEDIUM_RADIUS,
            small_radius: SMALL_RADIUS,
            medium_fragment_speed: MEDIUM_FRAGMENT_SPEED,
            small_fragment_speed: SMALL_FRAGMENT_SPEED,
            fragments_per_split: FRAGMENTS_PER_SPLIT,

            large_score: LARGE_SCORE,
            medium_score: MEDIUM_SCORE,
            small_score: SMALL_SCORE,
            starting_lives: STARTING_LIVES,
            base_wave_size: BASE_WAVE_SIZE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and sanitize it
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Collision radius for an asteroid size class
    pub fn radius_for(&self, size: SizeClass) -> f32 {
        match size {
            SizeClass::Large => self.large_radius,
            SizeClass::Medium => self.medium_radius,
            SizeClass::Small => self.small_radius,
        }
    }

    /// Points awarded for destroying an asteroid of this class
    pub fn score_for(&self, size: SizeClass) -> u64 {
        match size {
            SizeClass::Large => self.large_score,
            SizeClass::Medium => self.medium_score,
            SizeClass::Small => self.small_score,
        }
    }

    /// Per-axis velocity spread for fragments of this class
    ///
    /// `None` for large rocks, which only come from waves.
    pub fn fragment_speed_for(&self, size: SizeClass) -> Option<f32> {
        match size {
            SizeClass::Large => None,
            SizeClass::Medium => Some(self.medium_fragment_speed),
            SizeClass::Small => Some(self.small_fragment_speed),
        }
    }

    /// Replace out-of-range values with defaults
    ///
    /// Dimensions and radii must be finite and positive, friction must lie in
    /// `(0, 1]`, and speeds and spin must lie in `[0, MAX_TUNED_SPEED]`.
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        fn positive(name: &str, value: &mut f32, fallback: f32) {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("tuning: {name}={value} is not positive, using {fallback}");
                *value = fallback;
            }
        }
        fn speed(name: &str, value: &mut f32, fallback: f32) {
            if !(*value >= 0.0 && *value <= MAX_TUNED_SPEED) {
                log::warn!(
                    "tuning: {name}={value} outside [0, {MAX_TUNED_SPEED}], using {fallback}"
                );
                *value = fallback;
            }
        }

        positive("width", &mut self.width, defaults.width);
        positive("height", &mut self.height, defaults.height);
        positive("ship_radius", &mut self.ship_radius, defaults.ship_radius);
        positive("bullet_radius", &mut self.bullet_radius, defaults.bullet_radius);
        positive("large_radius", &mut self.large_radius, defaults.large_radius);
        positive("medium_radius", &mut self.medium_radius, defaults.medium_radius);
        positive("small_radius", &mut self.small_radius, defaults.small_radius);

        speed("ship_max_speed", &mut self.ship_max_speed, defaults.ship_max_speed);
        speed("ship_thrust", &mut self.ship_thrust, defaults.ship_thrust);
        speed("bullet_speed", &mut self.bullet_speed, defaults.bullet_speed);
        speed("asteroid_speed", &mut self.asteroid_speed, defaults.asteroid_speed);
        speed("asteroid_spin", &mut self.asteroid_spin, defaults.asteroid_spin);
        speed(
            "medium_fragment_speed",
            &mut self.medium_fragment_speed,
            defaults.medium_fragment_speed,
        );
        speed(
            "small_fragment_speed",
            &mut self.small_fragment_speed,
            defaults.small_fragment_speed,
        );

        if !(self.ship_rotation_speed.abs() <= MAX_TUNED_SPEED) {
            log::warn!("tuning: ship_rotation_speed out of range, using default");
            self.ship_rotation_speed = defaults.ship_rotation_speed;
        }
        if !(self.ship_friction > 0.0 && self.ship_friction <= 1.0) {
            log::warn!(
                "tuning: ship_friction={} outside (0, 1], using {}",
                self.ship_friction,
                defaults.ship_friction
            );
            self.ship_friction = defaults.ship_friction;
        }
        if self.starting_lives == 0 {
            log::warn!("tuning: starting_lives=0, using {}", defaults.starting_lives);
            self.starting_lives = defaults.starting_lives;
        }

        self
    }
}
