//! Responsive viewport scaling.
//!
//! The board is authored against a fixed design resolution. [`Viewport`]
//! maps that design canvas onto the real window with a single uniform scale,
//! clamped to a configured range. When the window is too small for the
//! minimum scale, the scaled ("virtual") canvas overflows the window and the
//! [`ScrollController`] takes over.
//!
//! ```text
//! fit   = min(window_w / design_w, window_h / design_h)
//! scale = clamp(fit, min_scale, max_scale)
//! virtual = design * scale
//! needs_scroll = scale > fit
//! ```

pub mod scroll;

pub use scroll::{Axis, ScrollController, ScrollTrack};

use crate::config::ShellConfig;

/// Derived viewport values for one window size.
///
/// Recomputed whenever the window size changes; holds no other state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub window_width: f32,
    pub window_height: f32,
    pub design_width: f32,
    pub design_height: f32,
    pub min_scale: f32,
    pub max_scale: f32,

    /// Unclamped scale that would fit the design exactly into the window
    pub fit_scale: f32,
    /// Render scale after clamping
    pub scale: f32,
    pub virtual_width: f32,
    pub virtual_height: f32,
    /// True only when the minimum scale forces the canvas past the window
    pub needs_scroll: bool,
}

impl Viewport {
    /// Compute the viewport for a window size.
    ///
    /// Zero-sized dimensions are treated as one pixel so the fit ratio never
    /// divides by zero.
    pub fn compute(
        window_size: (u32, u32),
        design_size: (f32, f32),
        min_scale: f32,
        max_scale: f32,
    ) -> Self {
        let window_width = window_size.0.max(1) as f32;
        let window_height = window_size.1.max(1) as f32;
        let (design_width, design_height) = design_size;

        let fit_scale = (window_width / design_width).min(window_height / design_height);
        let scale = fit_scale.max(min_scale).min(max_scale);

        Self {
            window_width,
            window_height,
            design_width,
            design_height,
            min_scale,
            max_scale,
            fit_scale,
            scale,
            virtual_width: design_width * scale,
            virtual_height: design_height * scale,
            needs_scroll: scale > fit_scale,
        }
    }

    /// Compute the viewport with the design size and scale range from `config`.
    pub fn from_config(window_size: (u32, u32), config: &ShellConfig) -> Self {
        Self::compute(
            window_size,
            config.design_size,
            config.min_scale,
            config.max_scale,
        )
    }

    /// Horizontal overflow of the virtual canvas, never negative.
    pub fn max_offset_x(&self) -> f32 {
        (self.virtual_width - self.window_width).max(0.0)
    }

    /// Vertical overflow of the virtual canvas, never negative.
    pub fn max_offset_y(&self) -> f32 {
        (self.virtual_height - self.window_height).max(0.0)
    }

    /// Window position of the virtual canvas' top-left corner.
    ///
    /// Centered when everything fits, otherwise shifted by the scroll offsets.
    pub fn canvas_origin(&self, scroll: &ScrollController) -> (f32, f32) {
        if self.needs_scroll {
            (-scroll.offset_x(), -scroll.offset_y())
        } else {
            (
                (self.window_width - self.virtual_width) / 2.0,
                (self.window_height - self.virtual_height) / 2.0,
            )
        }
    }
}
