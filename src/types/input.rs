//! Keyboard and pointer input as seen by the engine.

use serde::{Deserialize, Serialize};

/// Modifier keys held during an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Platform multi-select modifier (ctrl, or command on macOS).
    pub fn multi_select(self) -> bool {
        self.ctrl || self.meta
    }

    /// Platform jump modifier; same keys as multi-select.
    pub fn jump(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Arrow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A key, named the way DOM `KeyboardEvent.key` names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    Arrow(Direction),
    Tab,
    Enter,
    Escape,
    Backspace,
    Delete,
    Character(char),
    Other(String),
}

impl Key {
    /// Arrow keys and Tab drive selection movement.
    pub fn is_navigation(&self) -> bool {
        matches!(self, Key::Arrow(_) | Key::Tab)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::Arrow(Direction::Up),
            "ArrowDown" => Key::Arrow(Direction::Down),
            "ArrowLeft" => Key::Arrow(Direction::Left),
            "ArrowRight" => Key::Arrow(Direction::Right),
            "Tab" => Key::Tab,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Delete" | "Del" => Key::Delete,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        }
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::from(name.as_str())
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::Arrow(Direction::Up) => "ArrowUp".into(),
            Key::Arrow(Direction::Down) => "ArrowDown".into(),
            Key::Arrow(Direction::Left) => "ArrowLeft".into(),
            Key::Arrow(Direction::Right) => "ArrowRight".into(),
            Key::Tab => "Tab".into(),
            Key::Enter => "Enter".into(),
            Key::Escape => "Escape".into(),
            Key::Backspace => "Backspace".into(),
            Key::Delete => "Delete".into(),
            Key::Character(c) => c.to_string(),
            Key::Other(name) => name,
        }
    }
}
