//! Rock Drift - a wrapped-space asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `input`: Key state to tick intents
//! - `driver`: Frame loop tying input, simulation and rendering together

pub mod driver;
pub mod input;
pub mod sim;
pub mod tuning;

pub use driver::{FrameDriver, LogRenderer, Pacing, Renderer};
pub use input::{InputTranslator, Key};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Seconds per tick for fixed-step pacing (60 Hz, one tick per classic frame)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_MAX_SPEED: f32 = 5.0;
    pub const SHIP_ROTATION_SPEED: f32 = 0.2; // radians per tick
    pub const SHIP_THRUST: f32 = 0.5;
    pub const SHIP_FRICTION: f32 = 0.99;
    /// Invulnerability after spawn/respawn (ticks)
    pub const INVULNERABLE_TICKS: u32 = 120;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 7.0;
    pub const BULLET_LIFE: u32 = 60;
    pub const BULLET_RADIUS: f32 = 2.0;

    /// Asteroid defaults
    pub const ASTEROID_SPEED: f32 = 1.0;
    /// Max cosmetic spin (radians per tick, either direction)
    pub const ASTEROID_SPIN: f32 = 0.05;
    pub const LARGE_RADIUS: f32 = 40.0;
    pub const MEDIUM_RADIUS: f32 = 25.0;
    pub const SMALL_RADIUS: f32 = 12.0;
    /// Fragment velocity spread per axis (+/-)
    pub const MEDIUM_FRAGMENT_SPEED: f32 = 1.5;
    pub const SMALL_FRAGMENT_SPEED: f32 = 2.0;
    pub const FRAGMENTS_PER_SPLIT: u32 = 2;

    /// Score table
    pub const LARGE_SCORE: u64 = 20;
    pub const MEDIUM_SCORE: u64 = 50;
    pub const SMALL_SCORE: u64 = 100;

    /// Run defaults
    pub const STARTING_LIVES: u32 = 3;
    /// Wave size is `BASE_WAVE_SIZE + level`
    pub const BASE_WAVE_SIZE: u32 = 3;
}

/// Unit vector for a facing angle
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    heading(theta) * r
}
