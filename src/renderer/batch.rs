//! CPU side of a frame: turns a [`Scene`] into vertex and index lists.
//!
//! Every primitive becomes one quad (four vertices, six indices). Runs of
//! primitives of the same kind are merged into a single [`DrawCall`] so the
//! GPU backend switches pipelines only where the paint order requires it.

use std::ops::Range;

use crate::layout::{Primitive, Rect, Rgb, Scene};

/// Two triangles per quad, corners ordered top-left, top-right, bottom-left,
/// bottom-right.
pub const QUAD_INDICES: [u32; 6] = [0, 2, 1, 1, 2, 3];

/// Extra pixels around each disc so its anti-aliased edge is not clipped.
const DISC_MARGIN: f32 = 1.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DiscVertex {
    pub position: [f32; 2],
    /// Offset from the disc center in radii; the rim is at length 1
    pub local: [f32; 2],
    pub fill: [f32; 4],
    pub outline: [f32; 4],
    /// radius px, outline px, shaded flag, unused
    pub params: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Quads,
    Discs,
    Picture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub kind: DrawKind,
    pub indices: Range<u32>,
}

/// A text label, still in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextItem<'a> {
    pub origin: [f32; 2],
    pub font_size: f32,
    pub bounds: Rect,
    pub color: Rgb,
    pub text: &'a str,
}

/// Geometry for one frame.
#[derive(Debug, Default)]
pub struct FrameBatch<'a> {
    /// Linear clear color
    pub clear: [f64; 4],
    pub quad_vertices: Vec<ColorVertex>,
    pub quad_indices: Vec<u32>,
    pub disc_vertices: Vec<DiscVertex>,
    pub disc_indices: Vec<u32>,
    pub picture_vertices: Vec<TexturedVertex>,
    pub picture_indices: Vec<u32>,
    pub draws: Vec<DrawCall>,
    pub texts: Vec<TextItem<'a>>,
}

/// Convert one 8-bit sRGB channel to linear light.
pub fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_rgba(color: Rgb) -> [f32; 4] {
    [
        srgb_to_linear(color[0]),
        srgb_to_linear(color[1]),
        srgb_to_linear(color[2]),
        1.0,
    ]
}

/// Window pixel to normalized device coordinates.
pub fn to_ndc(p: [f32; 2], window: (u32, u32)) -> [f32; 2] {
    let w = window.0.max(1) as f32;
    let h = window.1.max(1) as f32;
    [p[0] / w * 2.0 - 1.0, 1.0 - p[1] / h * 2.0]
}

fn push_indices(indices: &mut Vec<u32>, base: u32) -> Range<u32> {
    let start = indices.len() as u32;
    indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    start..indices.len() as u32
}

impl<'a> FrameBatch<'a> {
    pub fn build(scene: &'a Scene, window: (u32, u32)) -> Self {
        let clear = linear_rgba(scene.clear);
        let mut batch = FrameBatch {
            clear: clear.map(f64::from),
            ..Default::default()
        };

        for primitive in &scene.primitives {
            match primitive {
                Primitive::Quad { corners, color } => {
                    let base = batch.quad_vertices.len() as u32;
                    let color = linear_rgba(*color);
                    batch.quad_vertices.extend(corners.iter().map(|c| ColorVertex {
                        position: to_ndc(*c, window),
                        color,
                    }));
                    let range = push_indices(&mut batch.quad_indices, base);
                    batch.record(DrawKind::Quads, range);
                }
                Primitive::Picture { corners } => {
                    const UV: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
                    let base = batch.picture_vertices.len() as u32;
                    batch
                        .picture_vertices
                        .extend(corners.iter().zip(UV).map(|(c, uv)| TexturedVertex {
                            position: to_ndc(*c, window),
                            tex_coords: uv,
                        }));
                    let range = push_indices(&mut batch.picture_indices, base);
                    batch.record(DrawKind::Picture, range);
                }
                Primitive::Disc {
                    center,
                    radius,
                    fill,
                    outline,
                    outline_width,
                    shaded,
                } => {
                    if *radius <= 0.0 {
                        continue;
                    }
                    let extent = radius + DISC_MARGIN;
                    let k = extent / radius;
                    let base = batch.disc_vertices.len() as u32;
                    let params = [*radius, *outline_width, if *shaded { 1.0 } else { 0.0 }, 0.0];
                    let (fill, outline) = (linear_rgba(*fill), linear_rgba(*outline));
                    for (dx, dy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
                        batch.disc_vertices.push(DiscVertex {
                            position: to_ndc(
                                [center[0] + dx * extent, center[1] + dy * extent],
                                window,
                            ),
                            local: [dx * k, dy * k],
                            fill,
                            outline,
                            params,
                        });
                    }
                    let range = push_indices(&mut batch.disc_indices, base);
                    batch.record(DrawKind::Discs, range);
                }
                Primitive::Text {
                    origin,
                    font_size,
                    bounds,
                    color,
                    text,
                } => batch.texts.push(TextItem {
                    origin: *origin,
                    font_size: *font_size,
                    bounds: *bounds,
                    color: *color,
                    text,
                }),
            }
        }
        batch
    }

    fn record(&mut self, kind: DrawKind, indices: Range<u32>) {
        if let Some(last) = self.draws.last_mut() {
            if last.kind == kind && last.indices.end == indices.start {
                last.indices.end = indices.end;
                return;
            }
        }
        self.draws.push(DrawCall { kind, indices });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::colors;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_srgb_to_linear() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert!(approx(srgb_to_linear(255), 1.0));
        assert!(approx(srgb_to_linear(128), 0.21586));
    }

    #[test]
    fn test_to_ndc_corners() {
        assert_eq!(to_ndc([0.0, 0.0], (800, 600)), [-1.0, 1.0]);
        assert_eq!(to_ndc([800.0, 600.0], (800, 600)), [1.0, -1.0]);
        assert_eq!(to_ndc([400.0, 300.0], (800, 600)), [0.0, 0.0]);
    }

    #[test]
    fn test_runs_are_merged_in_paint_order() {
        let mut scene = Scene::new(colors::BLACK);
        scene.push(Primitive::Picture {
            corners: Rect::new(0.0, 0.0, 10.0, 10.0).corners(),
        });
        scene.push(Primitive::rect(Rect::new(0.0, 0.0, 5.0, 5.0), colors::GRAY));
        scene.push(Primitive::rect(Rect::new(5.0, 5.0, 5.0, 5.0), colors::BROWN));
        scene.push(Primitive::Disc {
            center: [50.0, 50.0],
            radius: 10.0,
            fill: colors::WHITE,
            outline: colors::BLACK,
            outline_width: 1.0,
            shaded: false,
        });
        scene.push(Primitive::rect(Rect::new(0.0, 0.0, 1.0, 1.0), colors::GRAY));

        let batch = FrameBatch::build(&scene, (100, 100));
        let kinds: Vec<_> = batch.draws.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DrawKind::Picture, DrawKind::Quads, DrawKind::Discs, DrawKind::Quads]
        );
        assert_eq!(batch.draws[1].indices, 0..12);
        assert_eq!(batch.draws[3].indices, 12..18);
        assert_eq!(batch.quad_vertices.len(), 12);
        assert_eq!(&batch.quad_indices[6..12], &[4, 6, 5, 5, 6, 7]);
    }

    #[test]
    fn test_disc_quad_covers_rim() {
        let mut scene = Scene::new(colors::BLACK);
        scene.push(Primitive::Disc {
            center: [50.0, 50.0],
            radius: 10.0,
            fill: colors::WHITE,
            outline: colors::BLACK,
            outline_width: 2.0,
            shaded: true,
        });
        let batch = FrameBatch::build(&scene, (100, 100));
        let v = batch.disc_vertices[0];
        assert!(approx(v.local[0], -1.1));
        assert_eq!(v.params, [10.0, 2.0, 1.0, 0.0]);
        // top-left corner at 39,39 px
        assert!(approx(v.position[0], -0.22));
        assert!(approx(v.position[1], 0.22));
    }

    #[test]
    fn test_text_and_empty_discs() {
        let mut scene = Scene::new(colors::GRAY);
        scene.push(Primitive::Disc {
            center: [0.0, 0.0],
            radius: 0.0,
            fill: colors::WHITE,
            outline: colors::BLACK,
            outline_width: 1.0,
            shaded: false,
        });
        scene.push(Primitive::Text {
            origin: [1.0, 2.0],
            font_size: 24.0,
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            color: colors::WHITE,
            text: "hi".to_string(),
        });
        let batch = FrameBatch::build(&scene, (100, 100));
        assert!(batch.draws.is_empty());
        assert_eq!(batch.texts.len(), 1);
        assert_eq!(batch.texts[0].text, "hi");
        assert!((batch.clear[0] - 0.21586).abs() < 1e-4);
    }
}
