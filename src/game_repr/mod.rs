//! Mastermind board representation.
//!
//! Only the record of what is on the board lives here: guesses, the
//! judgements given for them, and the outcome those judgements imply.
//! Judgements are supplied from outside; nothing in this module scores a
//! guess against a secret code.

pub mod guess;
pub mod peg;

pub use guess::{Guess, Judgement};
pub use peg::{JudgementPeg, PegColor};

use thiserror::Error;

/// Pegs per guess.
pub const CODE_LENGTH: usize = 4;
/// Guess rows on the board.
pub const MAX_ROWS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board already holds {0} rows")]
    BoardFull(usize),
    #[error("judgement {black} black + {white} white exceeds 4 pegs")]
    TooManyJudgementPegs { black: u8, white: u8 },
    #[error("guess must have 4 pegs, got {0}")]
    GuessLength(usize),
    #[error("unknown peg color code {0:?}")]
    UnknownColor(char),
}

/// State of the game as implied by the judgements on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    /// A judgement with all black pegs was given on this row
    BreakerWins { row: usize },
    /// Every row was used without a solved judgement
    MakerWins,
}

/// Rows played so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    rows: Vec<(Guess, Judgement)>,
    capacity: usize,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(MAX_ROWS)
    }
}

impl BoardState {
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Board preloaded with the placeholder row shown before any game logic exists.
    pub fn with_demo_row() -> Self {
        let mut board = Self::default();
        board.push_demo_row();
        board
    }

    /// Append the fixed `R G B Y` guess judged as 2 black, 1 white.
    pub fn push_demo_row(&mut self) {
        let guess = Guess::new([
            PegColor::Red,
            PegColor::Green,
            PegColor::Blue,
            PegColor::Yellow,
        ]);
        if let Ok(judgement) = Judgement::new(2, 1) {
            if let Err(err) = self.push(guess, judgement) {
                log::warn!("demo row not added: {}", err);
            }
        }
    }

    pub fn push(&mut self, guess: Guess, judgement: Judgement) -> Result<(), BoardError> {
        if self.is_full() {
            return Err(BoardError::BoardFull(self.capacity));
        }
        log::debug!(
            "row {}: {} -> {} black, {} white",
            self.rows.len() + 1,
            guess,
            judgement.black(),
            judgement.white()
        );
        self.rows.push((guess, judgement));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.capacity
    }

    pub fn guess(&self, row: usize) -> Option<&Guess> {
        self.rows.get(row).map(|(g, _)| g)
    }

    /// Judgement for a row; unplayed rows read as an empty judgement.
    pub fn judgement(&self, row: usize) -> Judgement {
        self.rows.get(row).map(|(_, j)| *j).unwrap_or_default()
    }

    pub fn outcome(&self) -> Outcome {
        if let Some(row) = self.rows.iter().position(|(_, j)| j.is_solved()) {
            Outcome::BreakerWins { row }
        } else if self.is_full() {
            Outcome::MakerWins
        } else {
            Outcome::InProgress
        }
    }
}
