//! Keyboard mapping
//!
//! Key names follow `KeyboardEvent.key`. Unknown keys are ignored.

use crate::sim::MoveInput;

/// Movement direction bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// WASD (either case) or the arrow keys
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ if key.len() == 1 => match key.to_ascii_lowercase().as_str() {
                "w" => Some(Direction::Up),
                "s" => Some(Direction::Down),
                "a" => Some(Direction::Left),
                "d" => Some(Direction::Right),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Letters are stored lowercase so `W` down / `w` up pair up
fn normalize(key: &str) -> String {
    if key.len() == 1 {
        key.to_ascii_lowercase()
    } else {
        key.to_string()
    }
}

/// Keys currently held down.
///
/// Each direction counts its held keys so releasing `w` while `ArrowUp` is
/// still down keeps moving up.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: Vec<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns true if the key is a movement key.
    pub fn press(&mut self, key: &str) -> bool {
        if Direction::from_key(key).is_none() {
            return false;
        }
        let key = normalize(key);
        if !self.held.contains(&key) {
            self.held.push(key);
        }
        true
    }

    /// Record a key-up. Returns true if the key is a movement key.
    pub fn release(&mut self, key: &str) -> bool {
        if Direction::from_key(key).is_none() {
            return false;
        }
        let key = normalize(key);
        self.held.retain(|k| *k != key);
        true
    }

    /// Forget everything (focus lost)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held
            .iter()
            .any(|k| Direction::from_key(k) == Some(direction))
    }

    /// Sample the held set for one tick
    pub fn to_move_input(&self) -> MoveInput {
        MoveInput {
            up: self.is_held(Direction::Up),
            down: self.is_held(Direction::Down),
            left: self.is_held(Direction::Left),
            right: self.is_held(Direction::Right),
        }
    }
}
