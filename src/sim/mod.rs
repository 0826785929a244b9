//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use geometry::{circles_overlap, distance, wrap, wrap_edge};
pub use snapshot::Snapshot;
pub use state::{Asteroid, Bullet, EntityId, GamePhase, GameState, Ship, SizeClass};
pub use tick::{TickInput, fire, generate_wave, tick};
