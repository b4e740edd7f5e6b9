//! Key event decoding into game actions

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "esc" | "escape" => KeyCode::Esc,
            "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
            "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
            "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("ignoring unknown key binding {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            rotate: Self::parse_keys(&settings.keys.rotate),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            pause: Self::parse_keys(&settings.keys.pause),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// The action bound to a key, if any
    pub fn action_for(&self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let code = normalize_key(key.code);
        let table = [
            (&self.move_left, Action::MoveLeft),
            (&self.move_right, Action::MoveRight),
            (&self.rotate, Action::Rotate),
            (&self.soft_drop, Action::SoftDrop),
            (&self.hard_drop, Action::HardDrop),
            (&self.pause, Action::TogglePause),
            (&self.quit, Action::Quit),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.contains(&code))
            .map(|(_, action)| action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Convert a KeyCode back to the string used in settings
pub fn key_to_string(code: KeyCode) -> String {
    match code {
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
            "Shift".to_string()
        }
        KeyCode::Modifier(ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl) => {
            "Ctrl".to_string()
        }
        KeyCode::Modifier(ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt) => {
            "Alt".to_string()
        }
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for(press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(keys.action_for(press(KeyCode::Char('d'))), Some(Action::MoveRight));
        assert_eq!(keys.action_for(press(KeyCode::Up)), Some(Action::Rotate));
        assert_eq!(keys.action_for(press(KeyCode::Char('s'))), Some(Action::SoftDrop));
        assert_eq!(keys.action_for(press(KeyCode::Char(' '))), Some(Action::HardDrop));
        assert_eq!(keys.action_for(press(KeyCode::Char('p'))), Some(Action::TogglePause));
        assert_eq!(keys.action_for(press(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_letters_ignore_case() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for(press(KeyCode::Char('A'))), Some(Action::MoveLeft));
        assert_eq!(keys.action_for(press(KeyCode::Char('Q'))), Some(Action::Quit));
    }

    #[test]
    fn test_unbound_keys_do_nothing() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for(press(KeyCode::Char('z'))), None);
        assert_eq!(keys.action_for(press(KeyCode::F(5))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let keys = KeyBindings::default();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.action_for(event), Some(Action::Quit));
    }

    #[test]
    fn test_custom_and_unknown_bindings() {
        let mut settings = Settings::default();
        settings.keys.hard_drop = vec!["Enter".to_string(), "nonsense".to_string()];
        let keys = KeyBindings::from_settings(&settings);
        assert_eq!(keys.hard_drop, vec![KeyCode::Enter]);
        assert_eq!(keys.action_for(press(KeyCode::Enter)), Some(Action::HardDrop));
        assert_eq!(keys.action_for(press(KeyCode::Char(' '))), None);
    }

    #[test]
    fn test_key_names_round_trip() {
        for code in [KeyCode::Left, KeyCode::Esc, KeyCode::Char(' '), KeyCode::Char('x')] {
            assert_eq!(KeyBindings::parse_key(&key_to_string(code)), Some(code));
        }
    }
}
