//! Keybindings for the panel toggles.
//!
//! Toggles fire on the press edge only: key repeats and releases are ignored.

use egui::Key;

/// Something a key press can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Show or hide the options panel
    ToggleOptions,
    /// Show or hide the size diagnostics overlay
    ToggleDebug,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    /// Hotkey for the options panel
    pub toggle_options: Key,
    /// Hotkey for the debug overlay
    pub toggle_debug: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_options: Key::Space,
            toggle_debug: Key::F1,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action bound to a key, if any.
    pub fn action_for_key(&self, key: Key) -> Option<Action> {
        if key == self.toggle_options {
            Some(Action::ToggleOptions)
        } else if key == self.toggle_debug {
            Some(Action::ToggleDebug)
        } else {
            None
        }
    }

    /// Get the key bound to an action.
    pub fn key_for_action(&self, action: Action) -> Key {
        match action {
            Action::ToggleOptions => self.toggle_options,
            Action::ToggleDebug => self.toggle_debug,
        }
    }

    /// Rebind an action.
    pub fn set_key(&mut self, action: Action, key: Key) {
        match action {
            Action::ToggleOptions => self.toggle_options = key,
            Action::ToggleDebug => self.toggle_debug = key,
        }
    }

    /// Actions triggered by fresh key presses in this frame's input events.
    pub fn pressed_actions(&self, events: &[egui::Event]) -> Vec<Action> {
        events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } => self.action_for_key(*key),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn key_event(key: Key, pressed: bool, repeat: bool) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: None,
        pressed,
        repeat,
        modifiers: egui::Modifiers::NONE,
    }
}
