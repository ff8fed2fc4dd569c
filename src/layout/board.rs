//! Board geometry.
//!
//! One routine lays out the whole board for any row count, holes per row
//! and orientation. Coordinates are expressed along two axes:
//!
//! - *along*: the direction in which successive guesses advance
//! - *across*: the direction in which the pegs of one guess are stacked
//!
//! [`Orientation`] decides which screen axis is which. The proportions are
//! those of the classic board: a solution column, a separator column holding
//! a thin bar, then one column per guess, each with its code pegs and a
//! two-wide grid of judgement pegs beneath them.

use super::Rect;
use crate::game_repr::{CODE_LENGTH, MAX_ROWS};
use smallvec::SmallVec;

/// Inner padding along the board, as a fraction of the board length.
const PADDING: f32 = 0.05;
/// Peg spacing relative to peg size.
const PEG_PITCH: f32 = 1.2;
/// Separator bar thickness relative to the column width.
const BAR_FRACTION: f32 = 0.2;
/// Judgement pegs per grid row.
const JUDGEMENT_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Guesses advance left to right; pegs stack top to bottom
    #[default]
    Horizontal,
    /// Guesses advance top to bottom; pegs line up left to right
    Vertical,
}

/// Shape of the board to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    /// Number of guess rows
    pub rows: usize,
    /// Code pegs per guess
    pub holes: usize,
    pub orientation: Orientation,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            rows: MAX_ROWS,
            holes: CODE_LENGTH,
            orientation: Orientation::Horizontal,
        }
    }
}

impl BoardGeometry {
    /// Solution column + separator column + one column per guess.
    pub fn effective_columns(&self) -> usize {
        self.rows + 2
    }

    pub fn judgement_grid_rows(&self) -> usize {
        self.holes.div_ceil(JUDGEMENT_COLUMNS)
    }
}

/// One peg hole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PegSlot {
    pub center: [f32; 2],
    pub radius: f32,
}

/// Result of [`layout_board`], in the same coordinates as the input frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    pub frame: Rect,
    pub solution: SmallVec<[PegSlot; CODE_LENGTH]>,
    pub bar: Rect,
    /// `guesses[row][hole]`
    pub guesses: Vec<SmallVec<[PegSlot; CODE_LENGTH]>>,
    /// `judgements[row][peg]`, filled row by row in the two-wide grid
    pub judgements: Vec<SmallVec<[PegSlot; CODE_LENGTH]>>,
    pub peg_size: f32,
    pub judgement_size: f32,
    pub outline_width: f32,
}

/// Maps (along, across) onto the screen axes.
struct Axes {
    orientation: Orientation,
}

impl Axes {
    fn point(&self, along: f32, across: f32) -> [f32; 2] {
        match self.orientation {
            Orientation::Horizontal => [along, across],
            Orientation::Vertical => [across, along],
        }
    }

    fn rect(&self, along: f32, across: f32, along_len: f32, across_len: f32) -> Rect {
        match self.orientation {
            Orientation::Horizontal => Rect::new(along, across, along_len, across_len),
            Orientation::Vertical => Rect::new(across, along, across_len, along_len),
        }
    }

    /// (along start, across start, along length, across length) of a frame.
    fn split(&self, frame: Rect) -> (f32, f32, f32, f32) {
        match self.orientation {
            Orientation::Horizontal => (frame.x, frame.y, frame.w, frame.h),
            Orientation::Vertical => (frame.y, frame.x, frame.h, frame.w),
        }
    }
}

/// Lay out every hole of the board inside `frame`.
pub fn layout_board(frame: Rect, geometry: &BoardGeometry) -> BoardLayout {
    let axes = Axes {
        orientation: geometry.orientation,
    };
    let (along0, across0, along_len, across_len) = axes.split(frame);
    let holes = geometry.holes.max(1);

    let padding = PADDING * along_len;
    let content_along = along_len - 2.0 * padding;
    let column = content_along / geometry.effective_columns() as f32;
    let bar_width = BAR_FRACTION * column;
    let bar_gap = (column - bar_width) / 2.0;

    let peg_size = (column / 2.5).min(across_len / (holes + 1) as f32) * 0.8;
    let judgement_size = peg_size / 2.0;
    let outline_width = (peg_size / 20.0).floor().max(1.0);

    let pegs_span = (holes - 1) as f32 * peg_size * PEG_PITCH + peg_size;
    let grid_rows = geometry.judgement_grid_rows().max(1);
    let judgement_span = (grid_rows - 1) as f32 * judgement_size * PEG_PITCH + judgement_size;
    let space = 0.4 * peg_size;
    let total = pegs_span + space + judgement_span;

    let peg_start = across0 + (across_len - total) / 2.0;
    let judgement_start = peg_start + pegs_span + space;

    let code_column = |along: f32| -> SmallVec<[PegSlot; CODE_LENGTH]> {
        (0..holes)
            .map(|i| PegSlot {
                center: axes.point(
                    along + peg_size / 2.0,
                    peg_start + i as f32 * peg_size * PEG_PITCH + peg_size / 2.0,
                ),
                radius: peg_size / 2.0,
            })
            .collect()
    };

    let solution_along = along0 + padding;
    let solution = code_column(solution_along);

    let bar_along = solution_along + column + bar_gap;
    let bar_margin = 0.1 * pegs_span;
    let bar = axes.rect(
        bar_along,
        peg_start - bar_margin,
        bar_width,
        pegs_span + 2.0 * bar_margin,
    );

    let first_guess = bar_along + bar_width + bar_gap;
    let mut guesses = Vec::with_capacity(geometry.rows);
    let mut judgements = Vec::with_capacity(geometry.rows);
    for row in 0..geometry.rows {
        let along = first_guess + row as f32 * column;
        guesses.push(code_column(along));
        judgements.push(
            (0..holes)
                .map(|p| {
                    let grid_row = p / JUDGEMENT_COLUMNS;
                    let grid_col = p % JUDGEMENT_COLUMNS;
                    PegSlot {
                        center: axes.point(
                            along
                                + grid_col as f32 * judgement_size * PEG_PITCH
                                + judgement_size / 2.0,
                            judgement_start
                                + grid_row as f32 * judgement_size * PEG_PITCH
                                + judgement_size / 2.0,
                        ),
                        radius: judgement_size / 2.0,
                    }
                })
                .collect(),
        );
    }

    BoardLayout {
        frame,
        solution,
        bar,
        guesses,
        judgements,
        peg_size,
        judgement_size,
        outline_width,
    }
}
