//! Menu system module.
//!
//! The [`Menu`] owns the menu state machine and turns key presses into a
//! [`GameConfig`] once the user has picked a game mode.
//!
//! # Example Flow
//!
//! ```text
//! Intro
//!   └─ any key → ModeSelection
//!                  ├─ 1 → GameConfig(Human/Human)
//!                  ├─ 2 → GameConfig(AI/Human)
//!                  ├─ 3 → GameConfig(Human/AI)
//!                  └─ 4 → GameConfig(AI/AI)
//! ```

pub mod config;
pub mod state;

use crate::input::Key;

pub use config::{GameConfig, GameMode, PlayerConfig};
pub use state::MenuState;

/// The main Menu component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Menu {
    state: MenuState,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    /// Status text for the current state.
    pub fn prompt(&self) -> String {
        self.state.prompt()
    }

    /// Handle a key press.
    ///
    /// Returns `Some(GameConfig)` when this key started a game.
    pub fn handle_key(&mut self, key: Key) -> Option<GameConfig> {
        match self.state {
            MenuState::Intro => {
                self.state = MenuState::ModeSelection;
                None
            }
            MenuState::ModeSelection => {
                let Key::Char(c) = key else {
                    return None;
                };
                let mode = GameMode::from_key(c)?;
                let config = GameConfig::new(mode);
                log::info!("game mode selected: {}", mode);
                self.state = MenuState::Playing(config);
                Some(config)
            }
            MenuState::Playing(_) => None,
        }
    }

    /// Whether key presses are currently consumed as menu choices.
    pub fn is_choosing(&self) -> bool {
        !self.state.is_playing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_new() {
        let menu = Menu::new();
        assert_eq!(menu.state(), &MenuState::Intro);
        assert!(menu.is_choosing());
    }

    #[test]
    fn test_any_key_leaves_intro() {
        let mut menu = Menu::new();
        assert_eq!(menu.handle_key(Key::Other), None);
        assert_eq!(menu.state(), &MenuState::ModeSelection);
    }

    #[test]
    fn test_mode_key_starts_game() {
        let mut menu = Menu::new();
        menu.handle_key(Key::Char('x'));
        assert_eq!(menu.handle_key(Key::Char('9')), None);
        assert_eq!(menu.state(), &MenuState::ModeSelection);

        let config = menu.handle_key(Key::Char('2'));
        assert_eq!(config.map(|c| c.mode), Some(GameMode::AiHuman));
        assert!(!menu.is_choosing());
        assert_eq!(menu.handle_key(Key::Char('1')), None);
    }
}
