use super::peg::{JudgementPeg, PegColor};
use super::{BoardError, CODE_LENGTH};
use std::fmt;

/// A row of code pegs placed by the code breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guess(pub [PegColor; CODE_LENGTH]);

impl Guess {
    pub fn new(pegs: [PegColor; CODE_LENGTH]) -> Self {
        Self(pegs)
    }

    /// Parse a guess from color codes, ignoring whitespace (`"RGBY"`, `"R G B Y"`).
    pub fn parse(codes: &str) -> Result<Self, BoardError> {
        let mut pegs = [PegColor::Red; CODE_LENGTH];
        let mut count = 0;
        for ch in codes.chars().filter(|c| !c.is_whitespace()) {
            let color = PegColor::from_code(ch).ok_or(BoardError::UnknownColor(ch))?;
            if count == CODE_LENGTH {
                return Err(BoardError::GuessLength(count + 1));
            }
            pegs[count] = color;
            count += 1;
        }
        if count != CODE_LENGTH {
            return Err(BoardError::GuessLength(count));
        }
        Ok(Self(pegs))
    }

    pub fn pegs(&self) -> &[PegColor; CODE_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, peg) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", peg.code())?;
        }
        Ok(())
    }
}

/// Feedback for a guess: black and white peg counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Judgement {
    black: u8,
    white: u8,
}

impl Judgement {
    /// Build a judgement; the pegs must fit into the [`CODE_LENGTH`] slots.
    pub fn new(black: u8, white: u8) -> Result<Self, BoardError> {
        if black as usize + white as usize > CODE_LENGTH {
            return Err(BoardError::TooManyJudgementPegs { black, white });
        }
        Ok(Self { black, white })
    }

    pub fn black(&self) -> u8 {
        self.black
    }

    pub fn white(&self) -> u8 {
        self.white
    }

    /// All code pegs correct.
    pub fn is_solved(&self) -> bool {
        self.black as usize == CODE_LENGTH
    }

    /// Judgement peg shown in slot `index`: blacks first, then whites, then empty.
    pub fn peg_at(&self, index: usize) -> JudgementPeg {
        if index < self.black as usize {
            JudgementPeg::Black
        } else if index < (self.black + self.white) as usize {
            JudgementPeg::White
        } else {
            JudgementPeg::Empty
        }
    }

    pub fn pegs(&self) -> [JudgementPeg; CODE_LENGTH] {
        std::array::from_fn(|i| self.peg_at(i))
    }
}
