//! Read-only view of a completed tick, handed to renderers

use glam::Vec2;
use serde::Serialize;

use super::state::{Asteroid, Bullet, GamePhase, GameState, SizeClass};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub thrusting: bool,
    pub invulnerable_ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub radius: f32,
    pub size: SizeClass,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything a renderer may draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub bullets: Vec<BulletView>,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub wave: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let ship = &state.ship;
        Self {
            tick: state.time_ticks,
            width: state.tuning.width,
            height: state.tuning.height,
            ship: ShipView {
                pos: ship.pos,
                vel: ship.vel,
                radius: ship.radius,
                angle: ship.angle,
                thrusting: ship.thrusting,
                invulnerable_ticks: ship.invulnerable_ticks,
            },
            asteroids: state.asteroids.iter().map(AsteroidView::from).collect(),
            bullets: state.bullets.iter().map(BulletView::from).collect(),
            score: state.score,
            lives: state.lives,
            level: state.level,
            wave: state.wave,
            paused: state.phase == GamePhase::Paused,
            game_over: state.phase == GamePhase::GameOver,
        }
    }

    /// Whether the ship should be drawn this frame (blinks while invulnerable)
    pub fn ship_visible(&self) -> bool {
        let t = self.ship.invulnerable_ticks;
        t == 0 || (t / 10) % 2 == 0
    }

    /// One-line HUD: zero-padded score, level, lives and any overlay
    pub fn hud_line(&self) -> String {
        let overlay = if self.game_over {
            " | GAME OVER - press ENTER to restart"
        } else if self.paused {
            " | PAUSED"
        } else {
            ""
        };
        format!(
            "SCORE {:06} | LEVEL {} | LIVES {} | ROCKS {}{}",
            self.score,
            self.level,
            self.lives,
            self.asteroids.len(),
            overlay
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&Asteroid> for AsteroidView {
    fn from(a: &Asteroid) -> Self {
        Self {
            pos: a.pos,
            radius: a.radius,
            size: a.size,
            rotation: a.rotation,
        }
    }
}

impl From<&Bullet> for BulletView {
    fn from(b: &Bullet) -> Self {
        Self {
            pos: b.pos,
            radius: b.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(42);
        state.score = 70;
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.score, 70);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.asteroids.len(), state.asteroids.len());
        assert!(!snap.paused && !snap.game_over);
        assert_eq!(snap.ship.pos, state.ship.pos);
    }

    #[test]
    fn test_hud_line() {
        let mut state = GameState::new(42);
        state.score = 120;
        state.phase = GamePhase::Paused;
        let hud = Snapshot::capture(&state).hud_line();
        assert_eq!(hud, "SCORE 000120 | LEVEL 1 | LIVES 3 | ROCKS 4 | PAUSED");
    }

    #[test]
    fn test_ship_blinks_while_invulnerable() {
        let mut state = GameState::new(1);
        state.ship.invulnerable_ticks = 15;
        assert!(!Snapshot::capture(&state).ship_visible());
        state.ship.invulnerable_ticks = 25;
        assert!(Snapshot::capture(&state).ship_visible());
        state.ship.invulnerable_ticks = 0;
        assert!(Snapshot::capture(&state).ship_visible());
    }

    #[test]
    fn test_json_payload() {
        let snap = Snapshot::capture(&GameState::new(9));
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"game_over\":false"));
        assert!(json.contains("\"size\":\"Large\""));
    }
}
