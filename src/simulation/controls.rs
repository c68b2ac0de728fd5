use std::collections::HashSet;

use super::ThrustCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Descend,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlScheme {
    #[default]
    Normal,
    /// Arrow keys only, with the side thrusters swapped.
    Privileged,
}

impl ControlScheme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(ControlScheme::Normal),
            "privileged" | "admin" => Some(ControlScheme::Privileged),
            _ => None,
        }
    }
}

/// Keys held down during one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: HashSet<Key>,
}

impl InputSnapshot {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            held: keys.into_iter().collect(),
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    descend: Vec<Key>,
    left: Vec<Key>,
    right: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::for_scheme(ControlScheme::Normal)
    }
}

impl KeyBindings {
    pub fn for_scheme(scheme: ControlScheme) -> Self {
        match scheme {
            ControlScheme::Normal => Self {
                descend: vec![Key::Up, Key::W],
                left: vec![Key::Left, Key::A],
                right: vec![Key::Right, Key::D],
            },
            ControlScheme::Privileged => Self {
                descend: vec![Key::Down],
                left: vec![Key::Right],
                right: vec![Key::Left],
            },
        }
    }

    pub fn keys_for(&self, action: Action) -> &[Key] {
        match action {
            Action::Descend => &self.descend,
            Action::Left => &self.left,
            Action::Right => &self.right,
        }
    }

    pub fn is_active(&self, action: Action, snapshot: &InputSnapshot) -> bool {
        self.keys_for(action)
            .iter()
            .any(|&key| snapshot.is_held(key))
    }

    pub fn resolve(&self, snapshot: &InputSnapshot) -> ThrustCommand {
        ThrustCommand {
            descend: self.is_active(Action::Descend, snapshot),
            left: self.is_active(Action::Left, snapshot),
            right: self.is_active(Action::Right, snapshot),
        }
    }

    /// Snapshot holding the primary key of every requested action.
    pub fn snapshot_for(&self, actions: impl IntoIterator<Item = Action>) -> InputSnapshot {
        InputSnapshot::new(
            actions
                .into_iter()
                .filter_map(|action| self.keys_for(action).first().copied()),
        )
    }
}
