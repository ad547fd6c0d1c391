//! Customizable keybindings for the seat plan editor.
//!
//! Only letter-style shortcuts are configurable. Enter and Escape keep their
//! fixed meaning: Enter commits a rename, Escape cancels it (or closes the
//! side panel when no rename input has focus).

use seatplan_ui::{KeyCode, Modifiers};

/// What a key press asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePanel,
    ClosePanel,
    CommitEdit,
    CancelEdit,
    DeleteSelected,
}

/// Keybinding configuration for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    /// Show/hide the side panel
    pub toggle_panel: KeyCode,
    /// Ask to delete the selected seat. `None` disables the shortcut.
    pub delete_selected: Option<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_panel: KeyCode::P,
            delete_selected: Some(KeyCode::Delete),
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a key press to an action.
    ///
    /// While a text input has focus only Enter and Escape are handled so that
    /// typing never triggers shortcuts.
    pub fn action_for_key(
        &self,
        key: KeyCode,
        modifiers: Modifiers,
        input_focused: bool,
    ) -> Option<KeyAction> {
        if input_focused {
            return match key {
                KeyCode::Enter => Some(KeyAction::CommitEdit),
                KeyCode::Escape => Some(KeyAction::CancelEdit),
                _ => None,
            };
        }

        if key == KeyCode::Escape {
            return Some(KeyAction::ClosePanel);
        }

        if modifiers.any_command() {
            return None;
        }

        if key == self.toggle_panel {
            Some(KeyAction::TogglePanel)
        } else if Some(key) == self.delete_selected {
            Some(KeyAction::DeleteSelected)
        } else {
            None
        }
    }

    /// What `key` already does besides `action`, if anything.
    pub fn key_conflict(&self, key: KeyCode, action: KeyAction) -> Option<&'static str> {
        match key {
            KeyCode::Enter => Some("Commit rename"),
            KeyCode::Escape => Some("Cancel rename / close panel"),
            _ if action != KeyAction::TogglePanel && key == self.toggle_panel => {
                Some("Toggle panel")
            }
            _ if action != KeyAction::DeleteSelected && Some(key) == self.delete_selected => {
                Some("Delete selected seat")
            }
            _ => None,
        }
    }

    /// Check that every configurable shortcut has a key of its own.
    pub fn validate(&self) -> Result<(), String> {
        let bound = [
            (Some(self.toggle_panel), KeyAction::TogglePanel),
            (self.delete_selected, KeyAction::DeleteSelected),
        ];
        for (key, action) in bound {
            let Some(key) = key else {
                continue;
            };
            if let Some(conflict) = self.key_conflict(key, action) {
                return Err(format!("{} is already bound to {}", key.name(), conflict));
            }
        }
        Ok(())
    }
}

/// Whether a focused element keeps key presses for itself, which turns
/// shortcuts off. `input_type` is the `type` of `<input>` elements.
pub fn captures_keys(tag_name: &str, input_type: Option<&str>) -> bool {
    match tag_name.to_ascii_uppercase().as_str() {
        "TEXTAREA" | "SELECT" => true,
        "INPUT" => !matches!(
            input_type.unwrap_or("text").to_ascii_lowercase().as_str(),
            "button" | "submit" | "reset" | "checkbox" | "radio"
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_mods() -> Modifiers {
        Modifiers::default()
    }

    #[test]
    fn test_toggle_panel_only_without_focus() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.action_for_key(KeyCode::P, no_mods(), false),
            Some(KeyAction::TogglePanel)
        );
        assert_eq!(bindings.action_for_key(KeyCode::P, no_mods(), true), None);
    }

    #[test]
    fn test_escape_depends_on_focus() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.action_for_key(KeyCode::Escape, no_mods(), false),
            Some(KeyAction::ClosePanel)
        );
        assert_eq!(
            bindings.action_for_key(KeyCode::Escape, no_mods(), true),
            Some(KeyAction::CancelEdit)
        );
        assert_eq!(
            bindings.action_for_key(KeyCode::Enter, no_mods(), true),
            Some(KeyAction::CommitEdit)
        );
    }

    #[test]
    fn test_command_modifiers_suppress_shortcuts() {
        let bindings = KeyBindings::new();
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert_eq!(bindings.action_for_key(KeyCode::P, ctrl, false), None);

        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        assert_eq!(
            bindings.action_for_key(KeyCode::P, shift, false),
            Some(KeyAction::TogglePanel)
        );
    }

    #[test]
    fn test_conflicts_ignore_the_binding_itself() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.key_conflict(KeyCode::P, KeyAction::TogglePanel), None);
        assert_eq!(
            bindings.key_conflict(KeyCode::P, KeyAction::DeleteSelected),
            Some("Toggle panel")
        );
        assert_eq!(
            bindings.key_conflict(KeyCode::Escape, KeyAction::TogglePanel),
            Some("Cancel rename / close panel")
        );
        assert!(bindings.validate().is_ok());

        let clash = KeyBindings {
            toggle_panel: KeyCode::Enter,
            delete_selected: None,
        };
        assert_eq!(
            clash.validate(),
            Err("Enter is already bound to Commit rename".to_string())
        );
    }

    #[test]
    fn test_form_controls_capture_keys() {
        assert!(captures_keys("INPUT", Some("text")));
        assert!(captures_keys("INPUT", None));
        assert!(captures_keys("INPUT", Some("range")));
        assert!(captures_keys("INPUT", Some("color")));
        assert!(captures_keys("SELECT", None));
        assert!(captures_keys("textarea", None));

        assert!(!captures_keys("INPUT", Some("checkbox")));
        assert!(!captures_keys("BUTTON", None));
        assert!(!captures_keys("CANVAS", None));
    }
}
