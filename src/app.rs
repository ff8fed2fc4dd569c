//! Application state and its update function.
//!
//! [`AppState`] holds everything the shell knows: window size, viewport,
//! scroll position, render mode, menu progress and the board record.
//! [`AppState::update`] consumes the state together with one [`InputEvent`]
//! and returns the next state plus the [`WindowCommand`]s the event loop has
//! to carry out. Nothing here touches the window or the GPU.
//!
//! # Example Flow
//!
//! ```text
//! winit event ─► InputEvent ─► AppState::update ─► (AppState, commands)
//!                                                       │
//!                      Scene ◄─ AppState::scene ◄───────┘
//! ```

use crate::config::ShellConfig;
use crate::game_repr::BoardState;
use crate::input::{InputEvent, Key};
use crate::layout::{build_scene, BoardGeometry, RenderMode, Scene, SceneInput};
use crate::menu::Menu;
use crate::viewport::{ScrollController, Viewport};
use smallvec::SmallVec;

/// Side effects requested by [`AppState::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    SetFullscreen(bool),
    /// Ask the window to take this inner size (physical pixels)
    RequestInnerSize(u32, u32),
    RequestRedraw,
    Quit,
}

pub type Commands = SmallVec<[WindowCommand; 2]>;

/// Complete state of the shell.
#[derive(Debug, Clone)]
pub struct AppState {
    config: ShellConfig,
    window_size: (u32, u32),
    viewport: Viewport,
    scroll: ScrollController,
    pointer: (f32, f32),
    render_mode: RenderMode,
    fullscreen: bool,
    menu: Menu,
    board: BoardState,
    geometry: BoardGeometry,
    /// The demo row is added on the next frame
    demo_pending: bool,
    running: bool,
}

impl AppState {
    /// Create the state for a window of `window_size` physical pixels.
    pub fn new(config: ShellConfig, window_size: (u32, u32), fullscreen: bool) -> Self {
        let window_size = config.clamp_window_size(window_size);
        let viewport = Viewport::from_config(window_size, &config);
        let mut scroll = ScrollController::new(config.scrollbar_width, config.wheel_step);
        scroll.resize(&viewport);

        Self {
            config,
            window_size,
            viewport,
            scroll,
            pointer: (0.0, 0.0),
            render_mode: RenderMode::default(),
            fullscreen,
            menu: Menu::new(),
            board: BoardState::default(),
            geometry: BoardGeometry::default(),
            demo_pending: false,
            running: true,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance the state by one input event.
    pub fn update(mut self, event: InputEvent) -> (Self, Commands) {
        let mut commands = Commands::new();
        match event {
            InputEvent::Resized { width, height } if width == 0 || height == 0 => {
                // Minimized; the previous size stays in effect
                log::debug!("ignoring {}x{} resize", width, height);
            }

            InputEvent::Resized { width, height } => {
                let clamped = self.config.clamp_window_size((width, height));
                if clamped != (width, height) {
                    log::debug!(
                        "window {}x{} below minimum, requesting {}x{}",
                        width,
                        height,
                        clamped.0,
                        clamped.1
                    );
                    commands.push(WindowCommand::RequestInnerSize(clamped.0, clamped.1));
                }
                self.window_size = clamped;
                self.viewport = Viewport::from_config(clamped, &self.config);
                self.scroll.resize(&self.viewport);
                commands.push(WindowCommand::RequestRedraw);
            }

            InputEvent::KeyPressed(Key::Escape) | InputEvent::CloseRequested => {
                log::info!("quit requested");
                self.running = false;
                commands.push(WindowCommand::Quit);
            }

            InputEvent::KeyPressed(Key::Char('f')) => {
                self.fullscreen = !self.fullscreen;
                commands.push(WindowCommand::SetFullscreen(self.fullscreen));
                if !self.fullscreen {
                    let (width, height) = self.config.design_size;
                    commands.push(WindowCommand::RequestInnerSize(
                        width as u32,
                        height as u32,
                    ));
                }
            }

            InputEvent::KeyPressed(key) if self.menu.is_choosing() => {
                if let Some(config) = self.menu.handle_key(key) {
                    log::debug!(
                        "codemaker {}, codebreaker {}",
                        config.codemaker.label(),
                        config.codebreaker.label()
                    );
                    self.demo_pending = true;
                }
                commands.push(WindowCommand::RequestRedraw);
            }

            InputEvent::KeyPressed(key) => {
                let mode = match key {
                    Key::Char('2') => Some(RenderMode::Flat),
                    Key::Char('3') => Some(RenderMode::Perspective),
                    _ => None,
                };
                if let Some(mode) = mode {
                    if mode != self.render_mode {
                        log::info!("render mode: {:?}", mode);
                        self.render_mode = mode;
                        self.scroll.pointer_up();
                        commands.push(WindowCommand::RequestRedraw);
                    }
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer = (x, y);
                if self.scroll.pointer_move(x, y) {
                    commands.push(WindowCommand::RequestRedraw);
                }
            }

            InputEvent::PointerPressed => {
                if self.render_mode == RenderMode::Flat
                    && self.scroll.pointer_down(self.pointer.0, self.pointer.1)
                {
                    commands.push(WindowCommand::RequestRedraw);
                }
            }

            InputEvent::PointerReleased => self.scroll.pointer_up(),

            InputEvent::Wheel { notches } => {
                if self.render_mode == RenderMode::Flat && self.scroll.wheel(notches) {
                    commands.push(WindowCommand::RequestRedraw);
                }
            }

            InputEvent::Frame => {
                if self.demo_pending {
                    self.demo_pending = false;
                    self.board.push_demo_row();
                    commands.push(WindowCommand::RequestRedraw);
                }
            }
        }
        (self, commands)
    }

    /// Scene for the current state.
    pub fn scene(&self, has_picture: bool) -> Scene {
        let prompt = self.menu.prompt();
        build_scene(&SceneInput {
            viewport: &self.viewport,
            scroll: &self.scroll,
            board: &self.board,
            prompt: &prompt,
            mode: self.render_mode,
            geometry: self.geometry,
            has_picture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{GameMode, MenuState};
    use crate::viewport::Axis;

    fn state(window: (u32, u32)) -> AppState {
        AppState::new(ShellConfig::default(), window, false)
    }

    fn feed(state: AppState, events: &[InputEvent]) -> (AppState, Vec<WindowCommand>) {
        let mut all = Vec::new();
        let mut state = state;
        for event in events {
            let (next, commands) = state.update(*event);
            state = next;
            all.extend(commands);
        }
        (state, all)
    }

    #[test]
    fn test_new_state() {
        let s = state((1920, 1080));
        assert!(s.is_running());
        assert_eq!(s.render_mode(), RenderMode::Flat);
        assert_eq!(s.viewport().scale, 1.0);
        assert!(s.board().is_empty());
    }

    #[test]
    fn test_escape_quits() {
        let (s, commands) = state((1920, 1080)).update(InputEvent::KeyPressed(Key::Escape));
        assert!(!s.is_running());
        assert_eq!(commands.as_slice(), &[WindowCommand::Quit]);
    }

    #[test]
    fn test_fullscreen_toggle() {
        let (s, commands) = feed(
            state((1920, 1080)),
            &[
                InputEvent::KeyPressed(Key::Char('f')),
                InputEvent::KeyPressed(Key::Char('f')),
            ],
        );
        assert!(!s.is_fullscreen());
        assert_eq!(
            commands,
            vec![
                WindowCommand::SetFullscreen(true),
                WindowCommand::SetFullscreen(false),
                WindowCommand::RequestInnerSize(1920, 1080),
            ]
        );
        // toggling does not advance the menu
        assert_eq!(s.menu().state(), &MenuState::Intro);
    }

    #[test]
    fn test_leaving_initial_fullscreen_restores_design_size() {
        let s = AppState::new(ShellConfig::default(), (1366, 768), true);
        let (s, commands) = s.update(InputEvent::KeyPressed(Key::Char('f')));
        assert!(!s.is_fullscreen());
        assert_eq!(
            commands.as_slice(),
            &[
                WindowCommand::SetFullscreen(false),
                WindowCommand::RequestInnerSize(1920, 1080),
            ]
        );
    }

    #[test]
    fn test_resize_below_minimum_is_clamped() {
        let (s, commands) = state((1920, 1080)).update(InputEvent::Resized {
            width: 100,
            height: 10,
        });
        assert_eq!(s.window_size(), (128, 64));
        assert_eq!(commands[0], WindowCommand::RequestInnerSize(128, 64));
        assert!(s.viewport().needs_scroll);

        // the clamped size coming back settles without another request
        let (s, commands) = s.update(InputEvent::Resized {
            width: 128,
            height: 64,
        });
        assert_eq!(s.window_size(), (128, 64));
        assert_eq!(commands.as_slice(), &[WindowCommand::RequestRedraw]);
    }

    #[test]
    fn test_zero_size_resize_is_ignored() {
        let s = state((800, 600));
        let before = (s.window_size(), *s.viewport());
        for (width, height) in [(0, 0), (0, 600), (800, 0)] {
            let (next, commands) = s.clone().update(InputEvent::Resized { width, height });
            assert_eq!((next.window_size(), *next.viewport()), before);
            assert!(commands.is_empty());
        }
    }

    #[test]
    fn test_no_hidden_scrollbar_at_rounding_edge() {
        // 964x700: fit 0.502, the canvas fits up to f32 rounding
        let s = state((964, 700));
        assert!(!s.viewport().needs_scroll);
        assert!(!s.scroll().track(Axis::Horizontal).is_active());

        let (s, commands) = feed(
            s,
            &[
                InputEvent::PointerMoved { x: 10.0, y: 690.0 },
                InputEvent::PointerPressed,
                InputEvent::PointerMoved { x: 900.0, y: 690.0 },
            ],
        );
        assert!(!s.scroll().is_dragging());
        assert_eq!(s.scroll().offset_x(), 0.0);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_menu_flow_and_demo_row() {
        let (s, _) = feed(
            state((1920, 1080)),
            &[
                InputEvent::KeyPressed(Key::Other),
                InputEvent::KeyPressed(Key::Char('3')),
            ],
        );
        assert_eq!(
            s.menu().state().game_config().map(|c| c.mode),
            Some(GameMode::HumanAi)
        );
        // the mode key does not switch to 3D
        assert_eq!(s.render_mode(), RenderMode::Flat);
        assert!(s.board().is_empty());

        let (s, commands) = s.update(InputEvent::Frame);
        assert_eq!(s.board().len(), 1);
        assert_eq!(commands.as_slice(), &[WindowCommand::RequestRedraw]);

        let (s, commands) = s.update(InputEvent::Frame);
        assert_eq!(s.board().len(), 1);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_render_mode_keys_after_game_start() {
        let (s, _) = feed(
            state((1920, 1080)),
            &[
                InputEvent::KeyPressed(Key::Other),
                InputEvent::KeyPressed(Key::Char('1')),
                InputEvent::KeyPressed(Key::Char('3')),
            ],
        );
        assert_eq!(s.render_mode(), RenderMode::Perspective);
        let (s, _) = s.update(InputEvent::KeyPressed(Key::Char('2')));
        assert_eq!(s.render_mode(), RenderMode::Flat);
    }

    #[test]
    fn test_wheel_scrolls_only_when_overflowing() {
        let (s, commands) = state((1920, 1080)).update(InputEvent::Wheel { notches: -1.0 });
        assert!(commands.is_empty());
        assert_eq!(s.scroll().offset_y(), 0.0);

        // 1000x400: scale 0.5, canvas 960x540, 140 px vertical overflow
        let (s, commands) = state((1000, 400)).update(InputEvent::Wheel { notches: -1.0 });
        assert_eq!(commands.as_slice(), &[WindowCommand::RequestRedraw]);
        assert_eq!(s.scroll().offset_y(), 30.0);
    }

    #[test]
    fn test_thumb_drag_through_events() {
        // 800x600: horizontal overflow of 160 px
        let s = state((800, 600));
        let thumb_x = s.scroll().track(Axis::Horizontal).thumb_start() + 5.0;
        let (s, _) = feed(
            s,
            &[
                InputEvent::PointerMoved { x: thumb_x, y: 590.0 },
                InputEvent::PointerPressed,
                InputEvent::PointerMoved { x: thumb_x + 10_000.0, y: 590.0 },
            ],
        );
        assert_eq!(s.scroll().offset_x(), 160.0);

        let (s, _) = feed(
            s,
            &[
                InputEvent::PointerReleased,
                InputEvent::PointerMoved { x: 0.0, y: 590.0 },
            ],
        );
        assert_eq!(s.scroll().offset_x(), 160.0);
    }

    #[test]
    fn test_scene_shows_prompt() {
        let s = state((1920, 1080));
        let scene = s.scene(false);
        let text = scene.primitives.iter().find_map(|p| match p {
            crate::layout::Primitive::Text { text, .. } => Some(text.clone()),
            _ => None,
        });
        assert_eq!(text, Some(s.menu().prompt()));
    }
}
