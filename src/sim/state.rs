//! Game state and core simulation types
//!
//! All state needed to replay a run deterministically lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// Opaque entity identifier, unique within one [`GameState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

/// Asteroid size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Large,
    Medium,
    Small,
}

impl SizeClass {
    /// The class fragments of this asteroid belong to (None for small rocks)
    pub fn split(self) -> Option<SizeClass> {
        match self {
            SizeClass::Large => Some(SizeClass::Medium),
            SizeClass::Medium => Some(SizeClass::Small),
            SizeClass::Small => None,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Facing angle (radians, not normalized; only sin/cos are read)
    pub angle: f32,
    /// Thrust was applied this tick
    pub thrusting: bool,
    /// Ticks of invulnerability remaining (0 = vulnerable)
    pub invulnerable_ticks: u32,
}

impl Ship {
    /// Ship parked at the center of the play area, freshly invulnerable
    pub fn spawn(id: EntityId, tuning: &Tuning) -> Self {
        Self {
            id,
            pos: Self::center(tuning),
            vel: Vec2::ZERO,
            radius: tuning.ship_radius,
            angle: 0.0,
            thrusting: false,
            invulnerable_ticks: tuning.invulnerable_ticks,
        }
    }

    /// Respawn in place after losing a life (keeps id and facing)
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = Self::center(tuning);
        self.vel = Vec2::ZERO;
        self.invulnerable_ticks = tuning.invulnerable_ticks;
    }

    pub fn is_vulnerable(&self) -> bool {
        self.invulnerable_ticks == 0
    }

    /// Point at the tip of the ship, where bullets spawn
    pub fn nose(&self) -> Vec2 {
        self.pos + crate::polar_to_cartesian(self.radius, self.angle)
    }

    fn center(tuning: &Tuning) -> Vec2 {
        Vec2::new(tuning.width / 2.0, tuning.height / 2.0)
    }
}

/// An asteroid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Always `tuning.radius_for(size)`
    pub radius: f32,
    pub size: SizeClass,
    /// Cosmetic rotation (radians)
    pub rotation: f32,
    /// Cosmetic spin per tick
    pub rotation_speed: f32,
}

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks until expiry
    pub life: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay parameters
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Player lives
    pub lives: u32,
    /// Score
    pub score: u64,
    /// Difficulty level (starts at 1)
    pub level: u32,
    /// Wave counter (starts at 1, advances with level)
    pub wave: u32,
    /// Simulation tick counter (gameplay ticks only)
    pub time_ticks: u64,
    /// Player ship
    pub ship: Ship,
    /// Live asteroids, in insertion order
    pub asteroids: Vec<Asteroid>,
    /// Live bullets, in insertion order
    pub bullets: Vec<Bullet>,
    /// Spawn RNG
    rng: Pcg32,
    /// Next entity ID
    next_id: u64,
}

impl GameState {
    /// Start a new run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Start a new run with the given tuning (sanitized first)
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let ship = Ship::spawn(EntityId(0), &tuning);
        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            lives: tuning.starting_lives,
            score: 0,
            level: 1,
            wave: 1,
            time_ticks: 0,
            ship,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        };
        state.reset_run();
        state
    }

    /// Throw away the current run and start over
    ///
    /// The RNG stream continues, so a restart lays out a fresh field.
    pub fn restart(&mut self) {
        log::info!("Restarting run (final score {}, level {})", self.score, self.level);
        self.reset_run();
    }

    fn reset_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.lives = self.tuning.starting_lives;
        self.score = 0;
        self.level = 1;
        self.wave = 1;
        self.time_ticks = 0;
        self.bullets.clear();
        self.asteroids.clear();
        let id = self.next_entity_id();
        self.ship = Ship::spawn(id, &self.tuning);
        super::tick::generate_wave(self);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Uniform sample in `[-spread, spread]`; 0 for non-finite or non-positive spread
    pub(crate) fn random_spread(&mut self, spread: f32) -> f32 {
        if !(spread.is_finite() && spread > 0.0) {
            return 0.0;
        }
        // Scale a unit sample so `2 * spread` never has to be representable
        self.rng.random_range(-1.0f32..=1.0) * spread
    }

    /// Uniform sample in `[0, max)`; 0 for non-finite or non-positive `max`
    pub(crate) fn random_coord(&mut self, max: f32) -> f32 {
        if !(max.is_finite() && max > 0.0) {
            return 0.0;
        }
        self.rng.random::<f32>() * max
    }

    /// Build an asteroid of the given class; radius always follows the class
    pub fn make_asteroid(
        &mut self,
        size: SizeClass,
        pos: Vec2,
        vel: Vec2,
        rotation: f32,
        rotation_speed: f32,
    ) -> Asteroid {
        Asteroid {
            id: self.next_entity_id(),
            pos,
            vel,
            radius: self.tuning.radius_for(size),
            size,
            rotation,
            rotation_speed,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_layout() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.wave, 1);
        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());
        assert_eq!(state.asteroids.len(), 4);
        assert!(state.asteroids.iter().all(|a| a.size == SizeClass::Large && a.radius == 40.0));
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ship.invulnerable_ticks, 120);
    }

    #[test]
    fn test_ids_are_unique() {
        let state = GameState::new(11);
        let mut ids: Vec<EntityId> = state.asteroids.iter().map(|a| a.id).collect();
        ids.push(state.ship.id);
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(3);
        state.score = 990;
        state.lives = 0;
        state.level = 6;
        state.wave = 6;
        state.phase = GamePhase::GameOver;
        state.asteroids.clear();
        state.ship.pos = Vec2::new(1.0, 2.0);
        state.ship.vel = Vec2::new(3.0, 3.0);

        state.restart();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!((state.score, state.lives, state.level, state.wave), (0, 3, 1, 1));
        assert_eq!(state.asteroids.len(), 4);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ship.vel, Vec2::ZERO);
    }

    #[test]
    fn test_with_tuning_sanitizes() {
        let tuning = Tuning {
            asteroid_speed: f32::NAN,
            asteroid_spin: f32::INFINITY,
            ..Tuning::default()
        };
        let state = GameState::with_tuning(1, tuning);
        assert_eq!(state.tuning.asteroid_speed, crate::consts::ASTEROID_SPEED);
        assert_eq!(state.tuning.asteroid_spin, crate::consts::ASTEROID_SPIN);
        assert!(state.asteroids.iter().all(|a| a.vel.is_finite()));
    }

    #[test]
    fn test_random_spread_handles_extremes() {
        let mut state = GameState::new(13);
        assert_eq!(state.random_spread(f32::NAN), 0.0);
        assert_eq!(state.random_spread(f32::INFINITY), 0.0);
        assert_eq!(state.random_spread(-1.0), 0.0);
        for _ in 0..32 {
            let v = state.random_spread(3.0e38);
            assert!(v.is_finite() && v.abs() <= 3.0e38);
            let v = state.random_spread(f32::MAX);
            assert!(v.is_finite());
        }
        assert_eq!(state.random_coord(f32::NAN), 0.0);
        assert_eq!(state.random_coord(0.0), 0.0);
    }

    #[test]
    fn test_id_counter_wraps_instead_of_panicking() {
        let mut state = GameState::new(1);
        state.next_id = u64::MAX;
        assert_eq!(state.next_entity_id(), EntityId(u64::MAX));
        assert_eq!(state.next_entity_id(), EntityId(0));
    }

    #[test]
    fn test_size_class_split_chain() {
        assert_eq!(SizeClass::Large.split(), Some(SizeClass::Medium));
        assert_eq!(SizeClass::Medium.split(), Some(SizeClass::Small));
        assert_eq!(SizeClass::Small.split(), None);
    }

    #[test]
    fn test_nose_offset() {
        let mut ship = Ship::spawn(EntityId(0), &Tuning::default());
        ship.angle = std::f32::consts::FRAC_PI_2;
        let nose = ship.nose();
        assert!((nose.x - 400.0).abs() < 1e-4);
        assert!((nose.y - 315.0).abs() < 1e-4);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(5);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.asteroids.len(), state.asteroids.len());
        assert_eq!(back.ship.pos, state.ship.pos);
    }
}
