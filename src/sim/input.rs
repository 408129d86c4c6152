//! Input intents queued between ticks
//!
//! Platform handlers only ever write here; the tick reads held keys and drains
//! fire requests at its start.

use std::collections::HashSet;

use glam::Vec2;

/// A movement direction and the keys bound to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [MoveKey::Up, MoveKey::Down, MoveKey::Left, MoveKey::Right];

    /// Lower-cased key names bound to this direction
    pub fn bindings(self) -> [&'static str; 2] {
        match self {
            MoveKey::Up => ["w", "arrowup"],
            MoveKey::Down => ["s", "arrowdown"],
            MoveKey::Left => ["a", "arrowleft"],
            MoveKey::Right => ["d", "arrowright"],
        }
    }

    /// Direction bound to a key name, if any
    pub fn from_key_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|dir| dir.bindings().contains(&name.as_str()))
    }
}

/// Pressed keys and pending shots for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Currently held keys, by lower-cased name
    pressed: HashSet<String>,
    /// Aim points of clicks not yet turned into projectiles
    fire_requests: Vec<Vec2>,
}

impl InputState {
    pub fn key_down(&mut self, key: &str) {
        self.pressed.insert(key.to_lowercase());
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed.remove(&key.to_lowercase());
    }

    /// Whether either key bound to `dir` is held
    pub fn is_held(&self, dir: MoveKey) -> bool {
        dir.bindings().iter().any(|k| self.pressed.contains(*k))
    }

    /// Queue a shot toward `target` (viewport coordinates)
    pub fn fire_at(&mut self, target: Vec2) {
        self.fire_requests.push(target);
    }

    pub fn pending_shots(&self) -> usize {
        self.fire_requests.len()
    }

    /// Take all queued shots, oldest first
    pub fn drain_fire_requests(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.fire_requests)
    }

    /// Forget everything held (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }
}
