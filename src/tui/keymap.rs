// Turns the `[keybindings]` strings from the config into crossterm key codes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use tracing::warn;

use crate::config::KeyBindingsConfig;

pub type KeyBinding = (KeyCode, KeyModifiers);

#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: HashMap<&'static str, KeyBinding>,
}

impl KeyMap {
    pub fn from_config(cfg: &KeyBindingsConfig) -> Self {
        let defaults = KeyBindingsConfig::default();
        let fallback: HashMap<&'static str, &str> = defaults.entries().into_iter().collect();
        let mut bindings = HashMap::new();
        for (action, binding) in cfg.entries() {
            let parsed = parse_keybinding(binding).or_else(|| {
                warn!("Invalid key binding '{}' for '{}', using default", binding, action);
                fallback.get(action).and_then(|b| parse_keybinding(b))
            });
            if let Some(parsed) = parsed {
                bindings.insert(action, parsed);
            }
        }
        Self { bindings }
    }

    /// Shift is ignored for character keys since terminals report it for
    /// upper-case letters and most punctuation.
    pub fn matches(&self, action: &str, key_event: &KeyEvent) -> bool {
        let Some((code, mods)) = self.bindings.get(action) else {
            return false;
        };
        if key_event.code != *code {
            return false;
        }
        match code {
            KeyCode::Char(_) => {
                key_event.modifiers.difference(KeyModifiers::SHIFT) == mods.difference(KeyModifiers::SHIFT)
            }
            _ => key_event.modifiers == *mods,
        }
    }
}

pub fn parse_keybinding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();
    let mut mods = KeyModifiers::empty();
    let mut key = s;
    if let Some(stripped) = key.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        key = stripped;
    }
    if let Some(stripped) = key.strip_prefix("Alt+") {
        mods |= KeyModifiers::ALT;
        key = stripped;
    }
    if let Some(stripped) = key.strip_prefix("Shift+") {
        mods |= KeyModifiers::SHIFT;
        key = stripped;
    }
    let code = match key.to_lowercase().as_str() {
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        // Single characters keep their case: "L" and "l" are different keys.
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some((code, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modifiers_and_named_keys() {
        assert_eq!(parse_keybinding("Ctrl+l"), Some((KeyCode::Char('l'), KeyModifiers::CONTROL)));
        assert_eq!(parse_keybinding("BackTab"), Some((KeyCode::BackTab, KeyModifiers::NONE)));
        assert_eq!(parse_keybinding("L"), Some((KeyCode::Char('L'), KeyModifiers::NONE)));
        assert_eq!(parse_keybinding("Hyper+x"), None);
    }

    #[test]
    fn shift_is_ignored_for_characters() {
        let map = KeyMap::from_config(&KeyBindingsConfig::default());
        let shifted = KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT);
        assert!(map.matches("logout", &shifted));
        let ctrl = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert!(map.matches("logs", &ctrl));
        assert!(!map.matches("logout", &ctrl));
    }

    #[test]
    fn invalid_bindings_fall_back_to_defaults() {
        let cfg = KeyBindingsConfig { quit: "NotAKey".into(), ..KeyBindingsConfig::default() };
        let map = KeyMap::from_config(&cfg);
        assert!(map.matches("quit", &KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }
}
