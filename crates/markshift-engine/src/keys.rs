//! Host-agnostic key events and the default key bindings.

use crate::native::NativeCommand;

/// A key, independent of any terminal or browser event type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Esc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
        alt: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Key pressed without modifiers
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::CTRL)
    }

    /// The space bar with no command modifiers held
    pub fn is_space(&self) -> bool {
        self.key == Key::Char(' ') && !self.modifiers.ctrl && !self.modifiers.alt
    }

    /// Character this event would type, if any
    pub fn printable_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt && !c.is_control() => {
                Some(c)
            }
            _ => None,
        }
    }
}

/// Resolve a key event to the engine's built-in command, if it has one
pub fn default_key_binding(event: &KeyEvent) -> Option<NativeCommand> {
    let Modifiers { ctrl, shift, alt } = event.modifiers;
    if alt {
        return None;
    }

    match event.key {
        Key::Enter if shift => Some(NativeCommand::SoftNewline),
        Key::Enter => Some(NativeCommand::SplitBlock),
        Key::Backspace => Some(NativeCommand::Backspace),
        Key::Delete => Some(NativeCommand::Delete),
        Key::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'b' => Some(NativeCommand::Bold),
            'i' => Some(NativeCommand::Italic),
            'u' => Some(NativeCommand::Underline),
            'j' => Some(NativeCommand::Code),
            'z' if shift => Some(NativeCommand::Redo),
            'z' => Some(NativeCommand::Undo),
            'y' => Some(NativeCommand::Redo),
            _ => None,
        },
        _ => None,
    }
}
