// Input snapshot: the set of logical keys currently held.
//
// The set is mutated only by press/release events fed in from outside; the
// simulation itself only reads membership.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(String),
    Released(String),
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<String>,
}

impl InputState {
    pub fn press(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn held(&self, key: &str) -> bool {
        self.held.contains(key)
    }
}

/// Logical key assignment for one player: four movement keys plus shoot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapping {
    pub left: String,
    pub right: String,
    pub jump: String,
    pub crouch: String,
    pub shoot: String,
}
