//! Window event routing and side effects.
//!
//! This module contains the [`Orchestrator`] component, which sits between
//! the winit event loop and the pure [`AppState`]. It manages:
//! - Translation of window events into [`InputEvent`]s
//! - Feeding them through [`AppState::update`]
//! - Executing the returned [`WindowCommand`]s (fullscreen, resize, quit)
//! - Building a [`Scene`](crate::layout::Scene) and handing it to the [`Renderer`] on redraw
//!
//! # Architecture
//!
//! The Orchestrator owns the only mutable copies of the window, renderer and
//! state. All access happens on the event loop thread, one event at a time.
//!
//! # Example Flow
//!
//! ```text
//! [Resized]         -> renderer.resize -> update(Resized) -> [RequestInnerSize?, RequestRedraw]
//! [RequestInnerSize applied in place] -> renderer.resize -> update(Resized)
//! [KeyboardInput]   -> update(KeyPressed) -> [SetFullscreen | Quit | RequestRedraw]
//! [RedrawRequested] -> update(Frame) -> state.scene() -> renderer.draw_scene()
//! ```

use crate::app::{AppState, WindowCommand};
use crate::assets;
use crate::config::ShellConfig;
use crate::input::InputEvent;
use crate::renderer::Renderer;
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window};

/// Root component connecting the event loop, state and renderer.
pub struct Orchestrator {
    /// Handle to the application window
    window: Arc<Window>,

    /// Backend that draws the scenes
    renderer: Box<dyn Renderer>,

    /// Current state; only `None` while an update is in flight
    state: Option<AppState>,
}

impl Orchestrator {
    /// Create a new orchestrator for a freshly created window.
    ///
    /// Applies the minimum window size and tries to load the background
    /// picture. A picture that fails to load is logged and replaced by a
    /// placeholder panel.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let window = Arc::new(event_loop.create_window(attrs)?);
    /// let renderer = pollster::block_on(WgpuRenderer::new(window.clone()))?;
    /// let orchestrator = Orchestrator::new(window, Box::new(renderer), config, false);
    /// ```
    pub fn new(
        window: Arc<Window>,
        mut renderer: Box<dyn Renderer>,
        config: ShellConfig,
        fullscreen: bool,
    ) -> Self {
        let (min_w, min_h) = config.min_window_size;
        window.set_min_inner_size(Some(PhysicalSize::new(min_w, min_h)));

        match assets::load_picture(&config.image_path) {
            Ok(picture) => renderer.set_picture(&picture),
            Err(err) => log::warn!("no background picture: {}", err),
        }

        let state = AppState::new(config, renderer.window_size(), fullscreen);
        log::debug!(
            "orchestrator created, viewport scale {:.3}",
            state.viewport().scale
        );

        Self {
            window,
            renderer,
            state: Some(state),
        }
    }

    pub fn state(&self) -> Option<&AppState> {
        self.state.as_ref()
    }

    /// Handle one window event.
    pub fn handle_event(&mut self, event: WindowEvent, event_loop: &ActiveEventLoop) {
        match event {
            WindowEvent::RedrawRequested => {
                self.apply(InputEvent::Frame, event_loop);
                if let Some(state) = &self.state {
                    let scene = state.scene(self.renderer.has_picture());
                    self.renderer.draw_scene(&scene);
                }
            }

            WindowEvent::Resized(new_size) => {
                self.renderer.resize((new_size.width, new_size.height));
                self.apply(
                    InputEvent::Resized {
                        width: new_size.width,
                        height: new_size.height,
                    },
                    event_loop,
                );
            }

            other => {
                if let Some(input) = InputEvent::from_window_event(&other) {
                    self.apply(input, event_loop);
                }
            }
        }
    }

    fn apply(&mut self, input: InputEvent, event_loop: &ActiveEventLoop) {
        let mut next = Some(input);
        // At most one size applied in place is fed back per event
        let mut resized_in_place = false;

        while let Some(input) = next.take() {
            let Some(state) = self.state.take() else {
                return;
            };
            let (state, commands) = state.update(input);
            self.state = Some(state);

            for command in commands {
                match command {
                    WindowCommand::SetFullscreen(true) => {
                        self.window
                            .set_fullscreen(Some(Fullscreen::Borderless(None)));
                    }
                    WindowCommand::SetFullscreen(false) => self.window.set_fullscreen(None),
                    WindowCommand::RequestInnerSize(width, height) => {
                        // Some(size): the size was applied immediately and no
                        // Resized event is guaranteed to follow.
                        // None: the platform reports it later through Resized.
                        let applied = self
                            .window
                            .request_inner_size(PhysicalSize::new(width, height));
                        if let Some(size) = applied {
                            if !resized_in_place {
                                resized_in_place = true;
                                log::debug!("inner size applied in place: {:?}", size);
                                self.renderer.resize((size.width, size.height));
                                next = Some(InputEvent::Resized {
                                    width: size.width,
                                    height: size.height,
                                });
                            }
                        }
                    }
                    WindowCommand::RequestRedraw => self.window.request_redraw(),
                    WindowCommand::Quit => event_loop.exit(),
                }
            }
        }
    }
}
