//! Menu state machine types.

use super::config::GameConfig;

/// Menu state machine.
///
/// ```text
/// Intro --any key--> ModeSelection --1..4--> Playing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    /// Splash screen waiting for any key
    #[default]
    Intro,

    /// Waiting for a mode digit
    ModeSelection,

    /// A mode was chosen and the board is live
    Playing(GameConfig),
}

impl MenuState {
    /// Text shown in the status panel for this state.
    pub fn prompt(&self) -> String {
        match self {
            MenuState::Intro => {
                "Press any key to continue...\nThen choose game mode by pressing 1-4.".to_string()
            }
            MenuState::ModeSelection => {
                "Choose game mode:\n1: Human/Human\n2: AI/Human\n3: Human/AI\n4: AI/AI".to_string()
            }
            MenuState::Playing(config) => format!("Mode: {}\nGame starting...", config.mode),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, MenuState::Playing(_))
    }

    pub fn game_config(&self) -> Option<&GameConfig> {
        match self {
            MenuState::Playing(config) => Some(config),
            _ => None,
        }
    }
}
