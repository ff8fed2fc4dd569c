//! Game configuration types returned by the menu system.
//!
//! When the user picks a mode, a [`GameConfig`] is returned describing who
//! makes the code and who breaks it.

use std::fmt;

/// Who controls one side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerConfig {
    /// Human player at the keyboard
    Human,
    /// Computer player (no decision logic is attached yet)
    AI,
}

impl PlayerConfig {
    pub fn label(self) -> &'static str {
        match self {
            PlayerConfig::Human => "Human",
            PlayerConfig::AI => "AI",
        }
    }
}

/// Game mode selection.
///
/// Modes read `<code maker>/<code breaker>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    HumanHuman,
    AiHuman,
    HumanAi,
    AiAi,
}

impl GameMode {
    /// Modes in menu order; menu key `n` selects `ALL[n - 1]`.
    pub const ALL: [GameMode; 4] = [
        GameMode::HumanHuman,
        GameMode::AiHuman,
        GameMode::HumanAi,
        GameMode::AiAi,
    ];

    /// Mode bound to a menu digit key (`'1'`..=`'4'`).
    pub fn from_key(key: char) -> Option<Self> {
        let index = key.to_digit(10)? as usize;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    /// `(code maker, code breaker)`
    pub fn players(self) -> (PlayerConfig, PlayerConfig) {
        match self {
            GameMode::HumanHuman => (PlayerConfig::Human, PlayerConfig::Human),
            GameMode::AiHuman => (PlayerConfig::AI, PlayerConfig::Human),
            GameMode::HumanAi => (PlayerConfig::Human, PlayerConfig::AI),
            GameMode::AiAi => (PlayerConfig::AI, PlayerConfig::AI),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (maker, breaker) = self.players();
        write!(f, "{}/{}", maker.label(), breaker.label())
    }
}

/// Complete game configuration returned by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub mode: GameMode,
    pub codemaker: PlayerConfig,
    pub codebreaker: PlayerConfig,
}

impl GameConfig {
    pub fn new(mode: GameMode) -> Self {
        let (codemaker, codebreaker) = mode.players();
        Self {
            mode,
            codemaker,
            codebreaker,
        }
    }
}
