//! Platform-agnostic input handling.

use tracing::debug;

use super::physics::MoveDirection;

/// Keys the game reacts to. Anything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
    /// Letter or digit, stored lowercase.
    Character(char),
    Other,
}

impl Key {
    pub fn character(c: char) -> Self {
        Key::Character(c.to_ascii_lowercase())
    }

    pub fn label(self) -> String {
        match self {
            Key::ArrowUp => "Up".to_string(),
            Key::ArrowDown => "Down".to_string(),
            Key::ArrowLeft => "Left".to_string(),
            Key::ArrowRight => "Right".to_string(),
            Key::Space => "Space".to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Escape => "Esc".to_string(),
            Key::Character(c) => c.to_ascii_uppercase().to_string(),
            Key::Other => "?".to_string(),
        }
    }
}

/// Modifier keys held while a key event fired. Only Alt is bound (Alt+Enter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
}

/// Platform-independent input events, delivered in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Includes OS auto-repeat while the key is held.
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key, modifiers: Modifiers },
    CloseRequested,
}

impl InputEvent {
    pub fn key_down(key: Key) -> Self {
        InputEvent::KeyDown {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn key_up(key: Key) -> Self {
        InputEvent::KeyUp {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

/// What the player asked for, independent of which key produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move(MoveDirection),
    /// Whole rotation steps; negative turns left.
    Rotate(i32),
    Jump,
    Recolor,
    ToggleFullscreen,
    Quit,
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub turn_left: Key,
    pub turn_right: Key,
    pub jump: Key,
    pub recolor: Key,
    pub fullscreen: Key,
    pub quit: Key,
}

impl KeyBindings {
    /// One-line control summary shown at startup.
    pub fn help(&self) -> String {
        format!(
            "{}/{} move, {}/{} turn, {} jump, {} recolor, {} or Alt+Enter fullscreen, {} quit",
            self.forward.label(),
            self.backward.label(),
            self.turn_left.label(),
            self.turn_right.label(),
            self.jump.label(),
            self.recolor.label(),
            self.fullscreen.label(),
            self.quit.label(),
        )
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Key::ArrowUp,
            backward: Key::ArrowDown,
            turn_left: Key::ArrowLeft,
            turn_right: Key::ArrowRight,
            jump: Key::Space,
            recolor: Key::Character('c'),
            fullscreen: Key::Character('f'),
            quit: Key::Escape,
        }
    }
}

/// Translates raw events into intents.
///
/// Movement, turning and jumping act on key-down so holding a key keeps
/// going with the OS repeat rate. Recolor, fullscreen and quit act on
/// key-up so one press fires once.
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn translate(&self, event: &InputEvent) -> Option<Intent> {
        let b = &self.bindings;
        let intent = match *event {
            InputEvent::CloseRequested => Some(Intent::Quit),
            InputEvent::KeyDown { key, .. } => {
                if key == b.forward {
                    Some(Intent::Move(MoveDirection::Forward))
                } else if key == b.backward {
                    Some(Intent::Move(MoveDirection::Backward))
                } else if key == b.turn_left {
                    Some(Intent::Rotate(-1))
                } else if key == b.turn_right {
                    Some(Intent::Rotate(1))
                } else if key == b.jump {
                    Some(Intent::Jump)
                } else {
                    None
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                if key == b.quit {
                    Some(Intent::Quit)
                } else if key == b.recolor {
                    Some(Intent::Recolor)
                } else if key == b.fullscreen || (key == Key::Enter && modifiers.alt) {
                    Some(Intent::ToggleFullscreen)
                } else {
                    None
                }
            }
        };
        if let Some(intent) = intent {
            debug!("{:?} -> {:?}", event, intent);
        }
        intent
    }

    /// Translate a whole frame's events, keeping their order.
    pub fn translate_all<'a>(&'a self, events: &'a [InputEvent]) -> impl Iterator<Item = Intent> + 'a {
        events.iter().filter_map(move |e| self.translate(e))
    }
}
