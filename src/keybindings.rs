use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::apps::AppKind;

/// Desktop-level commands. Keys that map to none of these go to the focused
/// app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Launch(AppKind),
    CloseFocused,
    MinimizeFocused,
    ToggleMaximizeFocused,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Quit => write!(f, "Quit"),
            Action::Launch(app) => write!(f, "Open {app}"),
            Action::CloseFocused => write!(f, "Close window"),
            Action::MinimizeFocused => write!(f, "Minimize window"),
            Action::ToggleMaximizeFocused => write!(f, "Zoom window"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        if key.code == self.code && key.modifiers == self.mods {
            return true;
        }
        // terminals report Ctrl+<letter> with either case
        match (self.code, key.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => {
                a.eq_ignore_ascii_case(&b)
                    && key.modifiers - KeyModifiers::SHIFT == self.mods
                    && self.mods.contains(KeyModifiers::CONTROL)
            }
            _ => false,
        }
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        for app in AppKind::ALL {
            let key = KeyCode::F(app.launch_index() as u8 + 1);
            kb.add(Launch(app), KeyCombo::new(key, KeyModifiers::NONE));
        }
        kb.add(
            CloseFocused,
            KeyCombo::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        kb.add(
            MinimizeFocused,
            KeyCombo::new(KeyCode::F(7), KeyModifiers::NONE),
        );
        kb.add(
            ToggleMaximizeFocused,
            KeyCombo::new(KeyCode::F(8), KeyModifiers::NONE),
        );
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(action, _)| *action)
    }

    /// Display strings for every combo mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
        let shifted = KeyEvent::new(
            KeyCode::Char('Q'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert_eq!(kb.action_for_key(&shifted), Some(Action::Quit));
    }

    #[test]
    fn function_keys_launch_in_dock_order() {
        let kb = KeyBindings::default();
        let f1 = KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(
            kb.action_for_key(&f1),
            Some(Action::Launch(AppKind::ALL[0]))
        );
        assert_eq!(
            kb.combos_for(Action::Launch(AppKind::Music)),
            vec![format!("F{}", AppKind::Music.launch_index() + 1)]
        );
    }

    #[test]
    fn plain_letters_are_not_bound() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&ev), None);
        assert_eq!(
            KeyCombo::new(KeyCode::Char('w'), KeyModifiers::CONTROL).to_string(),
            "Ctrl+W"
        );
    }
}
