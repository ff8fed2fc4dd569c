//! End-to-end tests of the shell without a window
//!
//! This test suite drives [`AppState`] with synthetic input events and feeds
//! the resulting scenes to a recording renderer:
//! - Menu flow from intro to a running game
//! - Viewport and scroll invariants across window sizes
//! - 2D/3D switching and fullscreen/quit commands

use image::RgbaImage;
use mastermind::app::{AppState, WindowCommand};
use mastermind::config::ShellConfig;
use mastermind::input::{InputEvent, Key};
use mastermind::layout::{colors, Primitive, RenderMode, Scene};
use mastermind::menu::{GameMode, MenuState};
use mastermind::renderer::Renderer;
use mastermind::viewport::{Axis, ScrollController, Viewport};

/// Mock renderer for testing (records frames instead of drawing)
#[derive(Default)]
struct MockRenderer {
    size: (u32, u32),
    frames: Vec<Scene>,
    picture: Option<(u32, u32)>,
}

impl Renderer for MockRenderer {
    fn draw_scene(&mut self, scene: &Scene) {
        self.frames.push(scene.clone());
    }
    fn resize(&mut self, new_size: (u32, u32)) {
        self.size = new_size;
    }
    fn window_size(&self) -> (u32, u32) {
        self.size
    }
    fn set_picture(&mut self, picture: &RgbaImage) {
        self.picture = Some(picture.dimensions());
    }
    fn has_picture(&self) -> bool {
        self.picture.is_some()
    }
}

/// Minimal event loop: update, then draw when a redraw was requested
fn run(
    mut state: AppState,
    renderer: &mut MockRenderer,
    events: &[InputEvent],
) -> (AppState, Vec<WindowCommand>) {
    let mut log = Vec::new();
    for event in events {
        if let InputEvent::Resized { width, height } = event {
            renderer.resize((*width, *height));
        }
        let (next, commands) = state.update(*event);
        state = next;
        if commands.contains(&WindowCommand::RequestRedraw) {
            let (next, _) = state.update(InputEvent::Frame);
            state = next;
            renderer.draw_scene(&state.scene(renderer.has_picture()));
        }
        log.extend(commands);
    }
    (state, log)
}

fn prompt(scene: &Scene) -> Option<&str> {
    scene.primitives.iter().find_map(|p| match p {
        Primitive::Text { text, .. } => Some(text.as_str()),
        _ => None,
    })
}

#[test]
fn test_full_menu_flow() {
    let mut renderer = MockRenderer {
        size: (1920, 1080),
        ..Default::default()
    };
    let state = AppState::new(ShellConfig::default(), renderer.size, false);

    let (state, _) = run(
        state,
        &mut renderer,
        &[
            InputEvent::KeyPressed(Key::Char('x')),
            InputEvent::KeyPressed(Key::Char('4')),
        ],
    );

    assert_eq!(renderer.frames.len(), 2);
    assert!(prompt(&renderer.frames[0])
        .unwrap()
        .starts_with("Choose game mode:"));
    assert_eq!(
        prompt(&renderer.frames[1]),
        Some("Mode: AI/AI\nGame starting...")
    );
    assert!(matches!(
        state.menu().state(),
        MenuState::Playing(config) if config.mode == GameMode::AiAi
    ));

    // the demo row shows up in the frame drawn right after the game started
    let code_fills: Vec<_> = renderer.frames[1]
        .discs()
        .skip(4)
        .take(4)
        .filter_map(|p| match p {
            Primitive::Disc { fill, .. } => Some(*fill),
            _ => None,
        })
        .collect();
    assert!(code_fills.iter().all(|c| *c != colors::EMPTY_GRAY));
    assert_eq!(state.board().len(), 1);
}

#[test]
fn test_placeholder_without_picture() {
    let mut renderer = MockRenderer {
        size: (1920, 1080),
        ..Default::default()
    };
    let state = AppState::new(ShellConfig::default(), renderer.size, false);
    let (_, _) = run(state, &mut renderer, &[InputEvent::KeyPressed(Key::Other)]);
    assert!(matches!(
        renderer.frames[0].primitives[0],
        Primitive::Quad { color, .. } if color == colors::PICTURE_PLACEHOLDER
    ));

    renderer.set_picture(&RgbaImage::new(2, 2));
    let state = AppState::new(ShellConfig::default(), renderer.size, false);
    let (_, _) = run(state, &mut renderer, &[InputEvent::KeyPressed(Key::Other)]);
    assert!(matches!(
        renderer.frames[1].primitives[0],
        Primitive::Picture { .. }
    ));
}

#[test]
fn test_scale_range_and_scroll_flag_grid() {
    let config = ShellConfig::default();
    for width in (0..=4000).step_by(97) {
        for height in (0..=2400).step_by(89) {
            let vp = Viewport::from_config((width, height), &config);
            assert!(vp.scale >= config.min_scale && vp.scale <= config.max_scale);
            assert_eq!(vp.needs_scroll, vp.fit_scale < config.min_scale);
            assert_eq!(vp, Viewport::from_config((width, height), &config));
        }
    }
}

#[test]
fn test_no_active_track_without_scroll_flag() {
    let config = ShellConfig::default();
    for width in 960..=3840 {
        for height in [540, 700, 1080, 2160] {
            let vp = Viewport::from_config((width, height), &config);
            let mut scroll = ScrollController::default();
            scroll.resize(&vp);
            if !vp.needs_scroll {
                assert!(
                    !scroll.track(Axis::Horizontal).is_active()
                        && !scroll.track(Axis::Vertical).is_active(),
                    "{}x{}",
                    width,
                    height
                );
            }
        }
    }
}

/// Window that applies requested sizes in place and reports no `Resized`
fn run_with_inline_resize(
    state: AppState,
    renderer: &mut MockRenderer,
    event: InputEvent,
) -> (AppState, Vec<WindowCommand>) {
    let (mut state, mut log) = run(state, renderer, &[event]);
    if let Some(WindowCommand::RequestInnerSize(width, height)) = log
        .iter()
        .find(|c| matches!(c, WindowCommand::RequestInnerSize(..)))
        .copied()
    {
        let (next, commands) = run(state, renderer, &[InputEvent::Resized { width, height }]);
        state = next;
        log.extend(commands);
    }
    (state, log)
}

#[test]
fn test_requested_size_reaches_renderer_and_state() {
    let mut renderer = MockRenderer {
        size: (1920, 1080),
        ..Default::default()
    };
    let state = AppState::new(ShellConfig::default(), renderer.size, false);

    let (state, commands) = run_with_inline_resize(
        state,
        &mut renderer,
        InputEvent::Resized {
            width: 40,
            height: 30,
        },
    );
    assert_eq!(renderer.size, (128, 64));
    assert_eq!(state.window_size(), renderer.size);
    let requests = commands
        .iter()
        .filter(|c| matches!(c, WindowCommand::RequestInnerSize(..)))
        .count();
    assert_eq!(requests, 1);

    // leaving fullscreen lands on the design size
    let state = AppState::new(ShellConfig::default(), renderer.size, true);
    let (state, _) = run_with_inline_resize(
        state,
        &mut renderer,
        InputEvent::KeyPressed(Key::Char('f')),
    );
    assert!(!state.is_fullscreen());
    assert_eq!(renderer.size, (1920, 1080));
    assert_eq!(state.window_size(), (1920, 1080));
    assert!(!state.viewport().needs_scroll);
}

#[test]
fn test_minimize_keeps_previous_size() {
    let mut renderer = MockRenderer {
        size: (800, 600),
        ..Default::default()
    };
    let state = AppState::new(ShellConfig::default(), renderer.size, false);
    let (state, commands) = run(
        state,
        &mut renderer,
        &[InputEvent::Resized {
            width: 0,
            height: 0,
        }],
    );
    assert!(commands.is_empty());
    assert_eq!(state.window_size(), (800, 600));
    assert!(renderer.frames.is_empty());
}

#[test]
fn test_offsets_stay_in_range_under_extreme_input() {
    let viewport = Viewport::from_config((640, 300), &ShellConfig::default());
    let mut scroll = ScrollController::default();
    scroll.resize(&viewport);

    for notches in [1e9, -1e9, f32::INFINITY, f32::NEG_INFINITY, f32::NAN, 3.0, -7.0] {
        scroll.wheel(notches);
        let offset = scroll.offset_y();
        assert!(offset >= 0.0 && offset <= viewport.max_offset_y(), "{}", offset);
    }

    let thumb = scroll.thumb_rect(Axis::Horizontal).unwrap();
    assert!(scroll.pointer_down(thumb[0] + 1.0, thumb[1] + 1.0));
    for x in [-1e12, 1e12, 0.0, 320.0] {
        scroll.pointer_move(x, thumb[1]);
        let offset = scroll.offset_x();
        assert!(offset >= 0.0 && offset <= viewport.max_offset_x(), "{}", offset);
    }
    scroll.pointer_up();
    assert!(!scroll.is_dragging());
}

#[test]
fn test_shrinking_window_keeps_offsets_clamped() {
    let mut renderer = MockRenderer {
        size: (800, 600),
        ..Default::default()
    };
    let state = AppState::new(ShellConfig::default(), renderer.size, false);
    let (state, _) = run(
        state,
        &mut renderer,
        &[
            InputEvent::PointerMoved { x: 5.0, y: 590.0 },
            InputEvent::PointerPressed,
            InputEvent::PointerMoved { x: 800.0, y: 590.0 },
            InputEvent::PointerReleased,
        ],
    );
    assert_eq!(state.scroll().offset_x(), 160.0);

    // 900 px wide: overflow drops to 60
    let (state, _) = run(
        state,
        &mut renderer,
        &[InputEvent::Resized {
            width: 900,
            height: 600,
        }],
    );
    assert_eq!(state.scroll().offset_x(), 60.0);

    // large enough to fit: scrolling switches off
    let (state, _) = run(
        state,
        &mut renderer,
        &[InputEvent::Resized {
            width: 1920,
            height: 1080,
        }],
    );
    assert!(!state.viewport().needs_scroll);
    assert_eq!(state.scroll().offset_x(), 0.0);
}

#[test]
fn test_mode_switch_and_window_commands() {
    let mut renderer = MockRenderer {
        size: (1280, 720),
        ..Default::default()
    };
    let state = AppState::new(ShellConfig::default(), renderer.size, false);
    let (state, commands) = run(
        state,
        &mut renderer,
        &[
            InputEvent::KeyPressed(Key::Other),
            InputEvent::KeyPressed(Key::Char('1')),
            InputEvent::KeyPressed(Key::Char('3')),
            InputEvent::KeyPressed(Key::Char('f')),
            InputEvent::Wheel { notches: -3.0 },
            InputEvent::CloseRequested,
        ],
    );

    assert_eq!(state.render_mode(), RenderMode::Perspective);
    assert!(state.is_fullscreen());
    assert!(!state.is_running());
    assert!(commands.contains(&WindowCommand::SetFullscreen(true)));
    assert_eq!(commands.last(), Some(&WindowCommand::Quit));

    let last = renderer.frames.last().unwrap();
    assert!(last.discs().all(|p| matches!(p, Primitive::Disc { shaded: true, .. })));
}
