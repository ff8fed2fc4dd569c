//! Scroll offsets and scrollbar interaction.
//!
//! Each axis is an independent [`ScrollTrack`]. A track only becomes active
//! while the virtual canvas overflows the window along its axis. Offsets are
//! re-clamped on every resize, drag step and wheel step, so
//! `0 <= offset <= max_offset` holds after every public call.
//!
//! The thumb geometry returned here is used both for drawing and for hit
//! detection, so what the user sees is exactly what they can grab.

use super::Viewport;

/// Overflow below half a pixel counts as none.
const MIN_OVERFLOW: f32 = 0.5;

/// Scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    pointer: f32,
    offset: f32,
}

/// One axis of scroll state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollTrack {
    offset: f32,
    max_offset: f32,
    window_len: f32,
    virtual_len: f32,
    drag: Option<DragAnchor>,
}

impl ScrollTrack {
    /// Update the window and canvas lengths and re-clamp the offset.
    pub fn resize(&mut self, window_len: f32, virtual_len: f32) {
        self.window_len = window_len.max(0.0);
        self.virtual_len = virtual_len.max(0.0);
        let overflow = self.virtual_len - self.window_len;
        self.max_offset = if overflow < MIN_OVERFLOW { 0.0 } else { overflow };
        self.clamp();
        if !self.is_active() {
            self.drag = None;
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    /// A track only scrolls while the canvas overflows the window.
    pub fn is_active(&self) -> bool {
        self.max_offset > 0.0
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Thumb length, proportional to the visible share of the canvas.
    pub fn thumb_len(&self) -> f32 {
        if self.virtual_len <= 0.0 {
            return self.window_len;
        }
        (self.window_len * (self.window_len / self.virtual_len)).min(self.window_len)
    }

    /// Distance the thumb can travel along the track.
    pub fn thumb_travel(&self) -> f32 {
        (self.window_len - self.thumb_len()).max(0.0)
    }

    /// Leading edge of the thumb along the track.
    pub fn thumb_start(&self) -> f32 {
        if self.max_offset > 0.0 {
            self.offset / self.max_offset * self.thumb_travel()
        } else {
            0.0
        }
    }

    pub fn thumb_contains(&self, pointer: f32) -> bool {
        let start = self.thumb_start();
        pointer >= start && pointer <= start + self.thumb_len()
    }

    /// Set the offset directly, clamped to the track bounds.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
        self.clamp();
    }

    /// Shift the offset by `delta` pixels. Returns true if it moved.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        let before = self.offset;
        self.set_offset(self.offset + delta);
        self.offset != before
    }

    /// Remember where a thumb drag started.
    pub fn begin_drag(&mut self, pointer: f32) {
        self.drag = Some(DragAnchor {
            pointer,
            offset: self.offset,
        });
    }

    /// Move the offset to follow the pointer. Returns true if it moved.
    ///
    /// Pointer travel is converted through `max_offset / thumb_travel`, so
    /// moving the thumb across its whole travel scrolls the whole overflow.
    pub fn drag_to(&mut self, pointer: f32) -> bool {
        let Some(anchor) = self.drag else {
            return false;
        };
        let travel = self.thumb_travel();
        let factor = if travel > 0.0 {
            self.max_offset / travel
        } else {
            0.0
        };
        let before = self.offset;
        self.set_offset(anchor.offset + (pointer - anchor.pointer) * factor);
        self.offset != before
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    fn clamp(&mut self) {
        if !self.offset.is_finite() {
            self.offset = 0.0;
        }
        self.offset = self.offset.max(0.0).min(self.max_offset);
    }
}

/// Axis-aligned rectangle in window pixels: `[x, y, width, height]`.
pub type PixelRect = [f32; 4];

/// Scroll state for both axes plus scrollbar hit testing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollController {
    horizontal: ScrollTrack,
    vertical: ScrollTrack,
    bar_width: f32,
    wheel_step: f32,
    window: (f32, f32),
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(20.0, 30.0)
    }
}

impl ScrollController {
    pub fn new(bar_width: f32, wheel_step: f32) -> Self {
        Self {
            horizontal: ScrollTrack::default(),
            vertical: ScrollTrack::default(),
            bar_width,
            wheel_step,
            window: (0.0, 0.0),
        }
    }

    /// Recompute both tracks from a fresh viewport.
    pub fn resize(&mut self, viewport: &Viewport) {
        self.window = (viewport.window_width, viewport.window_height);
        self.horizontal
            .resize(viewport.window_width, viewport.virtual_width);
        self.vertical
            .resize(viewport.window_height, viewport.virtual_height);
    }

    pub fn track(&self, axis: Axis) -> &ScrollTrack {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    pub fn track_mut(&mut self, axis: Axis) -> &mut ScrollTrack {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    pub fn offset_x(&self) -> f32 {
        self.horizontal.offset()
    }

    pub fn offset_y(&self) -> f32 {
        self.vertical.offset()
    }

    pub fn is_dragging(&self) -> bool {
        self.horizontal.is_dragging() || self.vertical.is_dragging()
    }

    /// Full scrollbar strip for an axis, if that axis is active.
    pub fn bar_rect(&self, axis: Axis) -> Option<PixelRect> {
        let (w, h) = self.window;
        let track = self.track(axis);
        if !track.is_active() {
            return None;
        }
        Some(match axis {
            Axis::Vertical => [w - self.bar_width, 0.0, self.bar_width, h],
            Axis::Horizontal => [0.0, h - self.bar_width, w, self.bar_width],
        })
    }

    /// Thumb rectangle for an axis, if that axis is active.
    pub fn thumb_rect(&self, axis: Axis) -> Option<PixelRect> {
        let bar = self.bar_rect(axis)?;
        let track = self.track(axis);
        Some(match axis {
            Axis::Vertical => [bar[0], track.thumb_start(), bar[2], track.thumb_len()],
            Axis::Horizontal => [track.thumb_start(), bar[1], track.thumb_len(), bar[3]],
        })
    }

    /// Start thumb drags for every thumb under the pointer.
    ///
    /// Returns true if at least one drag started.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        let (w, h) = self.window;
        let mut started = false;

        if self.vertical.is_active()
            && x >= w - self.bar_width
            && x <= w
            && self.vertical.thumb_contains(y)
        {
            self.vertical.begin_drag(y);
            started = true;
        }

        if self.horizontal.is_active()
            && y >= h - self.bar_width
            && y <= h
            && self.horizontal.thumb_contains(x)
        {
            self.horizontal.begin_drag(x);
            started = true;
        }

        if started {
            log::debug!("scrollbar drag started at ({:.0}, {:.0})", x, y);
        }
        started
    }

    /// Follow the pointer with any active drag. Returns true if an offset moved.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let moved_y = self.vertical.drag_to(y);
        let moved_x = self.horizontal.drag_to(x);
        moved_x || moved_y
    }

    pub fn pointer_up(&mut self) {
        self.horizontal.end_drag();
        self.vertical.end_drag();
    }

    /// Apply wheel notches to the vertical track (positive notches scroll up).
    pub fn wheel(&mut self, notches: f32) -> bool {
        self.vertical.scroll_by(-notches * self.wheel_step)
    }
}
