//! Frame construction.
//!
//! The screen is split into a picture panel (upper left), a status text
//! panel (lower left) and the board (right), all proportional to the design
//! canvas:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐  10% top margin
//! │ 5% ┌────────┐ 5% ┌──────────────────────┐ 5% │
//! │    │picture │    │                      │    │
//! │    ├────────┤    │        board         │    │
//! │    │  text  │    │                      │    │
//! │    └────────┘    └──────────────────────┘    │
//! └──────────────────────────────────────────────┘  10% bottom margin
//!        1/4                    3/4
//! ```

use super::board::{layout_board, BoardGeometry, PegSlot};
use super::projection::{Camera, Projection};
use super::{colors, Primitive, Rect, RenderMode, Rgb, Scene};
use crate::game_repr::{BoardState, JudgementPeg};
use crate::viewport::{Axis, ScrollController, Viewport};

/// Status text size in design pixels.
const FONT_SIZE: f32 = 24.0;
/// Text inset inside the status panel, in design pixels.
const TEXT_INSET: f32 = 10.0;
/// Board frame thickness in design pixels.
const FRAME_WIDTH: f32 = 2.0;

/// Everything a frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub viewport: &'a Viewport,
    pub scroll: &'a ScrollController,
    pub board: &'a BoardState,
    pub prompt: &'a str,
    pub mode: RenderMode,
    pub geometry: BoardGeometry,
    /// Whether the renderer has a picture to put in the picture panel
    pub has_picture: bool,
}

/// Panel rectangles of the design canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panels {
    pub picture: Rect,
    pub text: Rect,
    pub board: Rect,
}

impl Panels {
    pub fn for_canvas(width: f32, height: f32) -> Self {
        let left_margin = 0.05 * width;
        let gap = 0.05 * width;
        let right_margin = 0.05 * width;
        let top_margin = 0.1 * height;
        let bottom_margin = 0.1 * height;

        let content_h = height - top_margin - bottom_margin;
        let available_w = width - left_margin - gap - right_margin;
        let left_w = available_w / 4.0;
        let board_w = available_w * 3.0 / 4.0;
        let left_h = content_h / 2.0;

        Self {
            picture: Rect::new(left_margin, top_margin, left_w, left_h),
            text: Rect::new(left_margin, top_margin + left_h, left_w, left_h),
            board: Rect::new(left_margin + left_w + gap, top_margin, board_w, content_h),
        }
    }
}

fn disc(slot: &PegSlot, fill: Rgb, outline_width: f32) -> Primitive {
    Primitive::Disc {
        center: slot.center,
        radius: slot.radius,
        fill,
        outline: colors::BLACK,
        outline_width,
        shaded: false,
    }
}

/// Four bars drawn just inside `rect`.
fn frame_quads(rect: Rect, width: f32, color: Rgb) -> [Primitive; 4] {
    [
        Primitive::rect(Rect::new(rect.x, rect.y, rect.w, width), color),
        Primitive::rect(Rect::new(rect.x, rect.bottom() - width, rect.w, width), color),
        Primitive::rect(Rect::new(rect.x, rect.y, width, rect.h), color),
        Primitive::rect(Rect::new(rect.right() - width, rect.y, width, rect.h), color),
    ]
}

/// The whole board and side panels in design-canvas coordinates.
pub fn design_elements(
    design: (f32, f32),
    board: &BoardState,
    prompt: &str,
    geometry: &BoardGeometry,
    has_picture: bool,
) -> Vec<Primitive> {
    let panels = Panels::for_canvas(design.0, design.1);
    let mut out = Vec::new();

    if has_picture {
        out.push(Primitive::Picture {
            corners: panels.picture.corners(),
        });
    } else {
        out.push(Primitive::rect(panels.picture, colors::PICTURE_PLACEHOLDER));
    }

    out.push(Primitive::rect(panels.text, colors::GRAY));

    out.push(Primitive::rect(panels.board, colors::BROWN));
    out.extend(frame_quads(panels.board, FRAME_WIDTH, colors::BLACK));

    let layout = layout_board(panels.board, geometry);
    out.push(Primitive::rect(layout.bar, colors::BAR));

    for slot in &layout.solution {
        out.push(disc(slot, colors::DARK_GRAY, layout.outline_width));
    }

    for (row, slots) in layout.guesses.iter().enumerate() {
        let guess = board.guess(row);
        for (hole, slot) in slots.iter().enumerate() {
            let fill = guess
                .and_then(|g| g.pegs().get(hole))
                .map(|peg| peg.rgb())
                .unwrap_or(colors::EMPTY_GRAY);
            out.push(disc(slot, fill, layout.outline_width));
        }
    }

    for (row, slots) in layout.judgements.iter().enumerate() {
        let judgement = board.judgement(row);
        for (p, slot) in slots.iter().enumerate() {
            let fill = match judgement.peg_at(p) {
                JudgementPeg::Black => colors::BLACK,
                JudgementPeg::White => colors::WHITE,
                JudgementPeg::Empty => colors::EMPTY_GRAY,
            };
            out.push(disc(slot, fill, layout.outline_width));
        }
    }

    out.push(Primitive::Text {
        origin: [panels.text.x + TEXT_INSET, panels.text.y + TEXT_INSET],
        font_size: FONT_SIZE,
        bounds: panels.text,
        color: colors::WHITE,
        text: prompt.to_string(),
    });

    out
}

/// Map one design-space primitive into window pixels.
fn project(primitive: Primitive, projection: &Projection) -> (f32, Primitive) {
    let map4 = |c: [[f32; 2]; 4]| c.map(|p| projection.point(p));
    match primitive {
        Primitive::Quad { corners, color } => (
            0.0,
            Primitive::Quad {
                corners: map4(corners),
                color,
            },
        ),
        Primitive::Picture { corners } => (
            0.0,
            Primitive::Picture {
                corners: map4(corners),
            },
        ),
        Primitive::Disc {
            center,
            radius,
            fill,
            outline,
            outline_width,
            ..
        } => {
            let width = (outline_width * projection.scale_at(center)).max(1.0);
            let (screen, screen_radius, depth) = match projection {
                Projection::Flat { scale, .. } => (projection.point(center), radius * scale, 0.0),
                Projection::Perspective(camera) => camera.sphere(center, radius),
            };
            (
                depth,
                Primitive::Disc {
                    center: screen,
                    radius: screen_radius,
                    fill,
                    outline,
                    outline_width: width,
                    shaded: projection.is_perspective(),
                },
            )
        }
        Primitive::Text {
            origin,
            font_size,
            bounds,
            color,
            text,
        } => (
            0.0,
            Primitive::Text {
                origin: projection.point(origin),
                font_size: font_size * projection.scale_at(origin),
                bounds: Rect::bounding(&map4(bounds.corners())),
                color,
                text,
            },
        ),
    }
}

fn scrollbars(scroll: &ScrollController) -> Vec<Primitive> {
    let mut out = Vec::new();
    for axis in [Axis::Vertical, Axis::Horizontal] {
        if let (Some(bar), Some(thumb)) = (scroll.bar_rect(axis), scroll.thumb_rect(axis)) {
            out.push(Primitive::rect(Rect::from_array(bar), colors::GRAY));
            out.push(Primitive::rect(Rect::from_array(thumb), colors::LIGHT_GRAY));
        }
    }
    out
}

/// Build the frame for the current state.
pub fn build_scene(input: &SceneInput<'_>) -> Scene {
    let viewport = input.viewport;
    let design = (viewport.design_width, viewport.design_height);

    let projection = match input.mode {
        RenderMode::Flat => {
            let (x, y) = viewport.canvas_origin(input.scroll);
            Projection::Flat {
                origin: [x, y],
                scale: viewport.scale,
            }
        }
        RenderMode::Perspective => Projection::Perspective(Camera::for_window(
            design,
            (viewport.window_width, viewport.window_height),
        )),
    };

    let elements = design_elements(
        design,
        input.board,
        input.prompt,
        &input.geometry,
        input.has_picture,
    );

    let mut flat = Vec::with_capacity(elements.len());
    let mut spheres = Vec::new();
    for element in elements {
        let (depth, primitive) = project(element, &projection);
        if projection.is_perspective() && matches!(primitive, Primitive::Disc { .. }) {
            spheres.push((depth, primitive));
        } else {
            flat.push(primitive);
        }
    }
    // painter's order: farthest spheres first
    spheres.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut scene = Scene::new(colors::BLACK);
    scene.primitives = flat;
    scene.primitives.extend(spheres.into_iter().map(|(_, p)| p));

    if input.mode == RenderMode::Flat && viewport.needs_scroll {
        scene.primitives.extend(scrollbars(input.scroll));
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::PegColor;

    fn input<'a>(
        viewport: &'a Viewport,
        scroll: &'a ScrollController,
        board: &'a BoardState,
        mode: RenderMode,
    ) -> SceneInput<'a> {
        SceneInput {
            viewport,
            scroll,
            board,
            prompt: "hello\nworld",
            mode,
            geometry: BoardGeometry::default(),
            has_picture: true,
        }
    }

    fn fills(scene: &Scene) -> Vec<Rgb> {
        scene
            .discs()
            .filter_map(|p| match p {
                Primitive::Disc { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_panels_for_design_canvas() {
        let panels = Panels::for_canvas(1920.0, 1080.0);
        assert_eq!(panels.picture, Rect::new(96.0, 108.0, 408.0, 432.0));
        assert_eq!(panels.text, Rect::new(96.0, 540.0, 408.0, 432.0));
        assert_eq!(panels.board, Rect::new(600.0, 108.0, 1224.0, 864.0));
    }

    #[test]
    fn test_disc_count() {
        let viewport = Viewport::compute((1920, 1080), (1920.0, 1080.0), 0.5, 2.0);
        let scroll = ScrollController::default();
        let board = BoardState::default();
        let scene = build_scene(&input(&viewport, &scroll, &board, RenderMode::Flat));
        // 4 solution + 12 * (4 code + 4 judgement)
        assert_eq!(scene.discs().count(), 4 + 12 * 8);
        assert!(fills(&scene)[4..].iter().all(|c| *c == colors::EMPTY_GRAY));
    }

    #[test]
    fn test_demo_row_colors() {
        let viewport = Viewport::compute((1920, 1080), (1920.0, 1080.0), 0.5, 2.0);
        let scroll = ScrollController::default();
        let board = BoardState::with_demo_row();
        let scene = build_scene(&input(&viewport, &scroll, &board, RenderMode::Flat));
        let fills = fills(&scene);
        assert_eq!(fills[4], PegColor::Red.rgb());
        assert_eq!(fills[7], PegColor::Yellow.rgb());
        assert_eq!(fills[8], colors::EMPTY_GRAY);
        // judgements start after all code pegs
        let j = 4 + 12 * 4;
        assert_eq!(&fills[j..j + 4], &[colors::BLACK, colors::BLACK, colors::WHITE, colors::EMPTY_GRAY]);
    }

    #[test]
    fn test_flat_scene_is_scaled_and_centered() {
        let viewport = Viewport::compute((960, 640), (1920.0, 1080.0), 0.5, 2.0);
        let scroll = ScrollController::default();
        let board = BoardState::default();
        let scene = build_scene(&input(&viewport, &scroll, &board, RenderMode::Flat));
        // scale 0.5, canvas 960x540 centered vertically with 50 px bars
        match &scene.primitives[0] {
            Primitive::Picture { corners } => assert_eq!(corners[0], [48.0, 104.0]),
            other => panic!("unexpected first primitive {:?}", other),
        }
        let text = scene.primitives.iter().find_map(|p| match p {
            Primitive::Text { font_size, .. } => Some(*font_size),
            _ => None,
        });
        assert_eq!(text, Some(12.0));
    }

    #[test]
    fn test_scrollbars_only_when_scrolling() {
        let board = BoardState::default();

        let viewport = Viewport::compute((800, 600), (1920.0, 1080.0), 0.5, 2.0);
        let mut scroll = ScrollController::default();
        scroll.resize(&viewport);
        let scene = build_scene(&input(&viewport, &scroll, &board, RenderMode::Flat));
        let last_two: Vec<_> = scene.primitives.iter().rev().take(2).collect();
        assert!(matches!(last_two[0], Primitive::Quad { color, .. } if *color == colors::LIGHT_GRAY));
        assert!(matches!(last_two[1], Primitive::Quad { color, .. } if *color == colors::GRAY));

        let perspective = build_scene(&input(&viewport, &scroll, &board, RenderMode::Perspective));
        assert!(!perspective
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Quad { color, .. } if *color == colors::LIGHT_GRAY)));
    }

    #[test]
    fn test_scrolled_canvas_shifts_left() {
        let board = BoardState::default();
        let viewport = Viewport::compute((800, 600), (1920.0, 1080.0), 0.5, 2.0);
        let mut scroll = ScrollController::default();
        scroll.resize(&viewport);
        scroll.track_mut(Axis::Horizontal).set_offset(100.0);
        let scene = build_scene(&input(&viewport, &scroll, &board, RenderMode::Flat));
        match &scene.primitives[0] {
            Primitive::Picture { corners } => assert_eq!(corners[0], [48.0 - 100.0, 54.0]),
            other => panic!("unexpected first primitive {:?}", other),
        }
    }

    #[test]
    fn test_perspective_spheres_sorted_back_to_front() {
        let viewport = Viewport::compute((1920, 1080), (1920.0, 1080.0), 0.5, 2.0);
        let scroll = ScrollController::default();
        let board = BoardState::with_demo_row();
        let scene = build_scene(&input(&viewport, &scroll, &board, RenderMode::Perspective));
        let discs: Vec<_> = scene
            .discs()
            .filter_map(|p| match p {
                Primitive::Disc { center, shaded, .. } => Some((*center, *shaded)),
                _ => None,
            })
            .collect();
        assert_eq!(discs.len(), 100);
        assert!(discs.iter().all(|(_, shaded)| *shaded));
        // farther (higher on screen) spheres come first
        assert!(discs.first().unwrap().0[1] <= discs.last().unwrap().0[1]);
    }
}
