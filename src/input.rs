//! Key state to tick intents
//!
//! Hosts forward raw key-down/key-up events here. Held keys map to the
//! level-sensitive intents (rotate, thrust). Fire, pause and restart are
//! latched on the press edge, so holding a key (or OS auto-repeat) yields
//! exactly one event per physical press.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Abstract keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    A,
    D,
    W,
    Space,
    P,
    Enter,
}

impl Key {
    /// Map a DOM-style key name (`KeyboardEvent.key`) to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "arrowleft" => Some(Key::Left),
            "arrowright" => Some(Key::Right),
            "arrowup" => Some(Key::Up),
            "a" => Some(Key::A),
            "d" => Some(Key::D),
            "w" => Some(Key::W),
            " " | "space" => Some(Key::Space),
            "p" => Some(Key::P),
            "enter" => Some(Key::Enter),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct InputTranslator {
    held: HashSet<Key>,
    fire: bool,
    pause: bool,
    restart: bool,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        // Repeat events for a key already down are not new presses
        if !self.held.insert(key) {
            return;
        }
        match key {
            Key::Space => self.fire = true,
            Key::P => self.pause = true,
            Key::Enter => self.restart = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Drop all held keys (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Current intents: held state plus any pending one-shots
    pub fn intents(&self) -> TickInput {
        TickInput {
            rotate_left: self.is_held(Key::Left) || self.is_held(Key::A),
            rotate_right: self.is_held(Key::Right) || self.is_held(Key::D),
            thrust: self.is_held(Key::Up) || self.is_held(Key::W),
            fire: self.fire,
            pause: self.pause,
            restart: self.restart,
        }
    }

    /// Clear one-shot inputs after a tick consumed them
    pub fn clear_one_shots(&mut self) {
        self.fire = false;
        self.pause = false;
        self.restart = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_and_aliases() {
        let mut input = InputTranslator::new();
        input.key_down(Key::A);
        input.key_down(Key::Up);
        let intents = input.intents();
        assert!(intents.rotate_left && intents.thrust);
        assert!(!intents.rotate_right);

        input.key_up(Key::A);
        input.key_down(Key::Right);
        input.key_down(Key::Left);
        let intents = input.intents();
        assert!(intents.rotate_left && intents.rotate_right);
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut input = InputTranslator::new();
        input.key_down(Key::Space);
        assert!(input.intents().fire);
        input.clear_one_shots();

        // Auto-repeat while held
        input.key_down(Key::Space);
        input.key_down(Key::Space);
        assert!(!input.intents().fire);

        input.key_up(Key::Space);
        input.key_down(Key::Space);
        assert!(input.intents().fire);
    }

    #[test]
    fn test_one_shots_survive_until_cleared() {
        let mut input = InputTranslator::new();
        input.key_down(Key::P);
        input.key_up(Key::P);
        input.key_down(Key::Enter);
        let intents = input.intents();
        assert!(intents.pause && intents.restart);
        input.clear_one_shots();
        assert_eq!(input.intents(), TickInput::default());
    }

    #[test]
    fn test_release_all() {
        let mut input = InputTranslator::new();
        input.key_down(Key::W);
        input.release_all();
        assert!(!input.intents().thrust);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name(" "), Some(Key::Space));
        assert_eq!(Key::from_name("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_name("P"), Some(Key::P));
        assert_eq!(Key::from_name("q"), None);
    }
}
