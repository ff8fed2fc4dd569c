//! Scene description shared by the 2D and 3D paths.
//!
//! Layout code never talks to the GPU. It produces a [`Scene`]: an ordered
//! list of [`Primitive`]s in window pixels that any [`Renderer`] can draw.
//! The board is laid out once in design-canvas coordinates
//! ([`board::layout_board`], [`scene::design_elements`]) and then mapped to
//! the window by a [`Projection`], flat for 2D and perspective for 3D.
//!
//! [`Renderer`]: crate::renderer::Renderer

pub mod board;
pub mod projection;
pub mod scene;

pub use board::{BoardGeometry, BoardLayout, Orientation, PegSlot};
pub use projection::{Camera, Projection};
pub use scene::{build_scene, SceneInput};

/// 8-bit sRGB color.
pub type Rgb = [u8; 3];

/// Palette of the board.
pub mod colors {
    use super::Rgb;

    pub const BLACK: Rgb = [0, 0, 0];
    pub const WHITE: Rgb = [255, 255, 255];
    pub const GRAY: Rgb = [128, 128, 128];
    pub const LIGHT_GRAY: Rgb = [200, 200, 200];
    pub const DARK_GRAY: Rgb = [64, 64, 64];
    /// Unplayed peg holes
    pub const EMPTY_GRAY: Rgb = [132, 132, 132];
    pub const BROWN: Rgb = [128, 64, 0];
    /// Separator bar between solution and guesses
    pub const BAR: Rgb = DARK_GRAY;
    /// Panel shown when the background picture could not be loaded
    pub const PICTURE_PLACEHOLDER: Rgb = [40, 40, 48];
}

/// How the board is drawn: flat 2D or perspective 3D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Flat,
    Perspective,
}

/// Axis-aligned rectangle; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_array(r: [f32; 4]) -> Self {
        Self::new(r[0], r[1], r[2], r[3])
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn contains(&self, p: [f32; 2]) -> bool {
        p[0] >= self.x && p[0] <= self.right() && p[1] >= self.y && p[1] <= self.bottom()
    }

    /// Corners in order: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        [
            [self.x, self.y],
            [self.right(), self.y],
            [self.x, self.bottom()],
            [self.right(), self.bottom()],
        ]
    }

    /// Smallest rect enclosing the given points.
    pub fn bounding(points: &[[f32; 2]]) -> Self {
        let mut min = [f32::INFINITY; 2];
        let mut max = [f32::NEG_INFINITY; 2];
        for p in points {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        }
        if points.is_empty() {
            return Self::default();
        }
        Self::new(min[0], min[1], max[0] - min[0], max[1] - min[1])
    }
}

/// One drawable element in window pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Filled quadrilateral; corners ordered as [`Rect::corners`]
    Quad { corners: [[f32; 2]; 4], color: Rgb },
    /// Round peg with an outline ring
    Disc {
        center: [f32; 2],
        radius: f32,
        fill: Rgb,
        outline: Rgb,
        outline_width: f32,
        /// Lit like a sphere instead of flat-filled
        shaded: bool,
    },
    /// The background picture stretched over a quadrilateral
    Picture { corners: [[f32; 2]; 4] },
    /// Multi-line label clipped to `bounds`
    Text {
        origin: [f32; 2],
        font_size: f32,
        bounds: Rect,
        color: Rgb,
        text: String,
    },
}

impl Primitive {
    pub fn rect(rect: Rect, color: Rgb) -> Self {
        Primitive::Quad {
            corners: rect.corners(),
            color,
        }
    }
}

/// A full frame: clear color plus primitives in back-to-front order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub clear: Rgb,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(clear: Rgb) -> Self {
        Self {
            clear,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn discs(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Disc { .. }))
    }
}
