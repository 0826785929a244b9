//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call to
//! [`tick`] is one unit of simulated time; velocities are in pixels per tick.

use std::collections::HashSet;

use glam::Vec2;

use super::geometry::{circles_overlap, clamp_speed, in_bounds, wrap_edge, wrap_position};
use super::state::{Bullet, EntityId, GamePhase, GameState, SizeClass};

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Rotate counter-clockwise (held)
    pub rotate_left: bool,
    /// Rotate clockwise (held)
    pub rotate_right: bool,
    /// Main engine (held)
    pub thrust: bool,
    /// Fire one bullet (one-shot)
    pub fire: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Restart after game over (one-shot)
    pub restart: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Restart only from game over
    if input.restart && state.phase == GamePhase::GameOver {
        state.restart();
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                log::info!("Paused at tick {}", state.time_ticks);
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                log::info!("Resumed at tick {}", state.time_ticks);
                state.phase = GamePhase::Playing;
            }
            // A finished run cannot be paused; restart always resumes in Playing
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Fire arrives between frames, so it sees the ship before this tick moves it
    if input.fire {
        fire(state);
    }

    update_ship(state, input);
    advance_bullets(state);
    advance_asteroids(state);

    let destroyed = resolve_bullet_hits(state);
    split_asteroids(state, &destroyed);

    if state.asteroids.is_empty() {
        state.level += 1;
        state.wave += 1;
        generate_wave(state);
    }

    resolve_ship_hit(state);
}

/// Spawn one bullet from the ship's nose (no-op unless playing)
pub fn fire(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let facing = crate::heading(state.ship.angle);
    let bullet = Bullet {
        id: state.next_entity_id(),
        pos: state.ship.nose(),
        vel: state.ship.vel + facing * state.tuning.bullet_speed,
        radius: state.tuning.bullet_radius,
        life: state.tuning.bullet_life,
    };
    state.bullets.push(bullet);
}

/// Rotation, thrust, friction, speed cap, integration and edge wrap
fn update_ship(state: &mut GameState, input: &TickInput) {
    let t = &state.tuning;
    let ship = &mut state.ship;

    if input.rotate_left {
        ship.angle -= t.ship_rotation_speed;
    }
    if input.rotate_right {
        ship.angle += t.ship_rotation_speed;
    }

    ship.thrusting = input.thrust;
    if ship.thrusting {
        ship.vel += crate::heading(ship.angle) * t.ship_thrust;
    }

    ship.vel *= t.ship_friction;
    ship.vel = clamp_speed(ship.vel, t.ship_max_speed);

    ship.pos += ship.vel;
    ship.pos = Vec2::new(wrap_edge(ship.pos.x, t.width), wrap_edge(ship.pos.y, t.height));

    ship.invulnerable_ticks = ship.invulnerable_ticks.saturating_sub(1);
}

/// Move bullets; drop expired ones and ones that left the play area
fn advance_bullets(state: &mut GameState) {
    let (width, height) = (state.tuning.width, state.tuning.height);
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel;
        bullet.life = bullet.life.saturating_sub(1);
    }
    state
        .bullets
        .retain(|b| b.life > 0 && in_bounds(b.pos, width, height));
}

/// Move asteroids with continuous wrap and spin them
fn advance_asteroids(state: &mut GameState) {
    let (width, height) = (state.tuning.width, state.tuning.height);
    for asteroid in &mut state.asteroids {
        asteroid.pos = wrap_position(asteroid.pos + asteroid.vel, width, height);
        asteroid.rotation += asteroid.rotation_speed;
    }
}

/// Bullet/asteroid pass; removes both sides of every hit and awards score
///
/// Hits are marked first and filtered afterwards, so the pass does not depend
/// on iteration order. Returns the destroyed asteroids' ids.
fn resolve_bullet_hits(state: &mut GameState) -> HashSet<EntityId> {
    let mut spent_bullets = HashSet::new();
    let mut destroyed = HashSet::new();

    for bullet in &state.bullets {
        for asteroid in &state.asteroids {
            if !circles_overlap(bullet.pos, bullet.radius, asteroid.pos, asteroid.radius) {
                continue;
            }
            spent_bullets.insert(bullet.id);
            if destroyed.insert(asteroid.id) {
                state.score += state.tuning.score_for(asteroid.size);
                log::debug!(
                    "Bullet {:?} destroyed {:?} asteroid {:?}, score {}",
                    bullet.id,
                    asteroid.size,
                    asteroid.id,
                    state.score
                );
            }
        }
    }

    state.bullets.retain(|b| !spent_bullets.contains(&b.id));
    destroyed
}

/// Replace destroyed asteroids with their fragments
fn split_asteroids(state: &mut GameState, destroyed: &HashSet<EntityId>) {
    if destroyed.is_empty() {
        return;
    }

    let (removed, survivors): (Vec<_>, Vec<_>) = std::mem::take(&mut state.asteroids)
        .into_iter()
        .partition(|a| destroyed.contains(&a.id));
    state.asteroids = survivors;

    for parent in removed {
        let Some(child_size) = parent.size.split() else {
            continue;
        };
        let spread = state.tuning.fragment_speed_for(child_size).unwrap_or_default();
        for _ in 0..state.tuning.fragments_per_split {
            let vel = Vec2::new(state.random_spread(spread), state.random_spread(spread));
            let fragment = state.make_asteroid(
                child_size,
                parent.pos,
                vel,
                parent.rotation,
                parent.rotation_speed,
            );
            state.asteroids.push(fragment);
        }
    }
}

/// Ship/asteroid pass: at most one life lost per tick
///
/// Asteroids are checked in insertion order and the first overlap is blamed.
fn resolve_ship_hit(state: &mut GameState) {
    if !state.ship.is_vulnerable() {
        return;
    }

    let ship = &state.ship;
    let hit = state
        .asteroids
        .iter()
        .find(|a| circles_overlap(ship.pos, ship.radius, a.pos, a.radius))
        .map(|a| a.id);

    let Some(asteroid_id) = hit else {
        return;
    };

    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        log::info!(
            "Game over: ship hit by {:?}, final score {} at level {}",
            asteroid_id,
            state.score,
            state.level
        );
        state.phase = GamePhase::GameOver;
    } else {
        log::info!("Ship hit by {:?}, {} lives left", asteroid_id, state.lives);
        state.ship.respawn(&state.tuning);
    }
}

/// Fill the field with `base_wave_size + level` large asteroids
pub fn generate_wave(state: &mut GameState) {
    let count = state.tuning.base_wave_size + state.level;
    let (width, height) = (state.tuning.width, state.tuning.height);
    let speed = state.tuning.asteroid_speed;
    let spin = state.tuning.asteroid_spin;

    log::info!("Wave {} (level {}): spawning {} asteroids", state.wave, state.level, count);

    for _ in 0..count {
        let pos = Vec2::new(state.random_coord(width), state.random_coord(height));
        let vel = Vec2::new(state.random_spread(speed), state.random_spread(speed));
        let rotation_speed = state.random_spread(spin);
        let asteroid = state.make_asteroid(SizeClass::Large, pos, vel, 0.0, rotation_speed);
        state.asteroids.push(asteroid);
    }
}
