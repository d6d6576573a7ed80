use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Smooths over platform differences in key reporting: Shift+Tab arrives as
/// BackTab, releases are dropped and Windows auto-repeat of Esc is folded.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, event: Event) -> Option<Event> {
        let Event::Key(mut key) = event else {
            return Some(event);
        };
        if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
            key.code = KeyCode::BackTab;
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        match key.kind {
            KeyEventKind::Release => {
                if key.code == KeyCode::Esc {
                    self.esc_down = false;
                }
                return None;
            }
            KeyEventKind::Repeat if cfg!(windows) => return None,
            _ => {}
        }
        if cfg!(windows) && key.code == KeyCode::Esc {
            if self.esc_down {
                return None;
            }
            self.esc_down = true;
        } else {
            self.esc_down = false;
        }
        Some(Event::Key(key))
    }
}
