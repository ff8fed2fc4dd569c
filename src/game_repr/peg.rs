/// One of the six code peg colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PegColor {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
}

impl PegColor {
    pub const ALL: [PegColor; 6] = [
        PegColor::Red,
        PegColor::Green,
        PegColor::Blue,
        PegColor::Yellow,
        PegColor::Orange,
        PegColor::Purple,
    ];

    /// Parse the single-letter code used in notation (`R G B Y O P`).
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'R' => Some(PegColor::Red),
            'G' => Some(PegColor::Green),
            'B' => Some(PegColor::Blue),
            'Y' => Some(PegColor::Yellow),
            'O' => Some(PegColor::Orange),
            'P' => Some(PegColor::Purple),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            PegColor::Red => 'R',
            PegColor::Green => 'G',
            PegColor::Blue => 'B',
            PegColor::Yellow => 'Y',
            PegColor::Orange => 'O',
            PegColor::Purple => 'P',
        }
    }

    /// 8-bit sRGB color of the peg.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            PegColor::Red => [255, 0, 0],
            PegColor::Green => [0, 255, 0],
            PegColor::Blue => [0, 0, 255],
            PegColor::Yellow => [255, 255, 0],
            PegColor::Orange => [255, 165, 0],
            PegColor::Purple => [128, 0, 128],
        }
    }
}

/// A single judgement peg slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JudgementPeg {
    /// Right color in the right position
    Black,
    /// Right color in the wrong position
    White,
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip_for_every_color() {
        for color in PegColor::ALL {
            assert_eq!(PegColor::from_code(color.code()), Some(color));
        }
    }

    #[test]
    fn test_lowercase_and_unknown_codes() {
        assert_eq!(PegColor::from_code('o'), Some(PegColor::Orange));
        assert_eq!(PegColor::from_code('X'), None);
    }

    #[test]
    fn test_orange_rgb() {
        assert_eq!(PegColor::Orange.rgb(), [255, 165, 0]);
    }
}
