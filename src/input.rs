use std::collections::HashSet;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Keyboard key the viewer reacts to: Escape or a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Escape,
    /// Upper-case ASCII letter.
    Character(char),
}

impl KeyCode {
    /// Parses `"Escape"`/`"Esc"` or a single letter in either case.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("escape") || name.eq_ignore_ascii_case("esc") {
            return Some(Self::Escape);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_alphabetic() => {
                Some(Self::Character(ch.to_ascii_uppercase()))
            }
            _ => None,
        }
    }
}

/// Identifier for a mouse button (left button is zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseButton(u8);

impl MouseButton {
    pub const LEFT: Self = Self(0);
    pub const RIGHT: Self = Self(1);

    pub fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Anything a binding can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    Key(KeyCode),
    Mouse(MouseButton),
}

impl Trigger {
    /// Parses `"G"`, `"Escape"`, `"Mouse"`/`"Mouse1"` (left),
    /// `"Mouse2"` (right) and so on.
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(button) = parse_mouse_button(name) {
            return Some(Self::Mouse(button));
        }
        KeyCode::from_name(name).map(Self::Key)
    }
}

fn parse_mouse_button(name: &str) -> Option<MouseButton> {
    let prefix = name.get(..5)?;
    if !prefix.eq_ignore_ascii_case("mouse") {
        return None;
    }
    let suffix = &name[5..];
    if suffix.is_empty() {
        return Some(MouseButton::LEFT);
    }
    let index = suffix.parse::<u8>().ok()?;
    Some(MouseButton::new(index.saturating_sub(1)))
}

/// Immutable view of every key and button held at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    keys: HashSet<KeyCode>,
    mouse_buttons: HashSet<MouseButton>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys.insert(key);
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.mouse_buttons.insert(button);
        self
    }

    pub fn with(self, trigger: Trigger) -> Self {
        match trigger {
            Trigger::Key(key) => self.with_key(key),
            Trigger::Mouse(button) => self.with_button(button),
        }
    }

    pub fn is_down(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Key(key) => self.keys.contains(&key),
            Trigger::Mouse(button) => self.mouse_buttons.contains(&button),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.mouse_buttons.is_empty()
    }
}

/// True only on the tick a trigger goes from released to held.
pub fn pressed(trigger: Trigger, previous: &InputSnapshot, current: &InputSnapshot) -> bool {
    current.is_down(trigger) && !previous.is_down(trigger)
}

/// Input board written by window events and sampled once per tick.
#[derive(Debug, Default)]
pub struct InputState {
    keys: RwLock<HashSet<KeyCode>>,
    mouse_buttons: RwLock<HashSet<MouseButton>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key_down(&self, key: KeyCode) {
        self.keys.write().insert(key);
    }

    pub fn set_key_up(&self, key: KeyCode) {
        self.keys.write().remove(&key);
    }

    pub fn set_mouse_button_down(&self, button: MouseButton) {
        self.mouse_buttons.write().insert(button);
    }

    pub fn set_mouse_button_up(&self, button: MouseButton) {
        self.mouse_buttons.write().remove(&button);
    }

    /// Forgets everything held, e.g. when the window loses focus.
    pub fn release_all(&self) {
        self.keys.write().clear();
        self.mouse_buttons.write().clear();
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            keys: self.keys.read().clone(),
            mouse_buttons: self.mouse_buttons.read().clone(),
        }
    }
}

/// Whether a binding reacts once per press or on every held tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerMode {
    Edge,
    Level,
}

/// Scene command a trigger is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Exit,
    Help,
    Reset,
    ToggleAxes,
    RandomBackground,
    ToggleGrid,
    ToggleMesh,
    PanForward,
    PanBackward,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ToggleDebugMarker,
    SpawnSolid,
    ClearSolids,
    ToggleGravity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub action: Action,
    pub trigger: Trigger,
    pub mode: TriggerMode,
    pub description: &'static str,
}

const fn key(
    action: Action,
    ch: char,
    mode: TriggerMode,
    description: &'static str,
) -> Binding {
    Binding {
        action,
        trigger: Trigger::Key(KeyCode::Character(ch)),
        mode,
        description,
    }
}

/// Default bindings, in evaluation order.
///
/// Order matters: a spawn and a gravity flip on the same tick spawn the
/// solid with the old gravity value.
pub const DEFAULT_BINDINGS: [Binding; 17] = [
    Binding {
        action: Action::Exit,
        trigger: Trigger::Key(KeyCode::Escape),
        mode: TriggerMode::Level,
        description: "quit the viewer",
    },
    key(Action::Help, 'H', TriggerMode::Edge, "show this menu"),
    key(Action::Reset, 'R', TriggerMode::Edge, "reset background, axes and grid"),
    key(Action::ToggleAxes, 'K', TriggerMode::Edge, "toggle the axes"),
    key(Action::RandomBackground, 'B', TriggerMode::Edge, "random background color"),
    key(Action::ToggleGrid, 'V', TriggerMode::Edge, "toggle the ground grid"),
    key(Action::ToggleMesh, 'O', TriggerMode::Edge, "toggle the loaded .obj mesh"),
    key(Action::PanForward, 'W', TriggerMode::Level, "pan camera forward"),
    key(Action::PanBackward, 'S', TriggerMode::Level, "pan camera backward"),
    key(Action::PanLeft, 'A', TriggerMode::Level, "pan camera left"),
    key(Action::PanRight, 'D', TriggerMode::Level, "pan camera right"),
    key(Action::PanUp, 'Q', TriggerMode::Level, "pan camera up"),
    key(Action::PanDown, 'E', TriggerMode::Level, "pan camera down"),
    key(Action::ToggleDebugMarker, 'L', TriggerMode::Edge, "toggle timestamp markers"),
    Binding {
        action: Action::SpawnSolid,
        trigger: Trigger::Mouse(MouseButton::LEFT),
        mode: TriggerMode::Edge,
        description: "spawn a solid at a random height",
    },
    Binding {
        action: Action::ClearSolids,
        trigger: Trigger::Mouse(MouseButton::RIGHT),
        mode: TriggerMode::Edge,
        description: "clear all solids",
    },
    key(Action::ToggleGravity, 'G', TriggerMode::Edge, "toggle gravity"),
];

impl Binding {
    /// Whether this binding fires given the previous and current snapshots.
    pub fn fires(&self, previous: &InputSnapshot, current: &InputSnapshot) -> bool {
        match self.mode {
            TriggerMode::Edge => pressed(self.trigger, previous, current),
            TriggerMode::Level => current.is_down(self.trigger),
        }
    }

    /// Human readable trigger label for the help menu.
    pub fn label(&self) -> String {
        match self.trigger {
            Trigger::Key(KeyCode::Escape) => "Escape".to_string(),
            Trigger::Key(KeyCode::Character(ch)) => ch.to_string(),
            Trigger::Mouse(button) => format!("Mouse{}", button.index() + 1),
        }
    }
}
