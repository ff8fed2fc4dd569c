use cfg_if::cfg_if;

pub mod app;
pub mod assets;
pub mod config;
pub mod game_repr;
pub mod input;
pub mod layout;
pub mod menu;
pub mod orchestrator;
pub mod renderer;
pub mod viewport;

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use config::ShellConfig;
        use orchestrator::Orchestrator;
        use renderer::wgpu_renderer::WgpuRenderer;
        use std::sync::Arc;
        use wasm_bindgen::prelude::*;
        use winit::{
            application::ApplicationHandler,
            event::WindowEvent,
            event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
            window::{Window, WindowAttributes},
            platform::web::{EventLoopExtWebSys, WindowAttributesExtWebSys},
        };

        /// User event type for async initialization on WASM
        enum UserEvent {
            RendererReady(Box<WgpuRenderer>),
        }

        struct App {
            config: ShellConfig,
            orchestrator: Option<Orchestrator>,
            window: Option<Arc<Window>>,
            initializing: bool,
            event_loop_proxy: EventLoopProxy<UserEvent>,
        }

        impl App {
            fn new(event_loop_proxy: EventLoopProxy<UserEvent>) -> Self {
                Self {
                    config: ShellConfig::default(),
                    orchestrator: None,
                    window: None,
                    initializing: false,
                    event_loop_proxy,
                }
            }
        }

        impl ApplicationHandler<UserEvent> for App {
            fn resumed(&mut self, event_loop: &ActiveEventLoop) {
                // Only initialize once
                if self.window.is_some() || self.initializing {
                    return;
                }
                self.initializing = true;

                let (width, height) = self.config.design_size;
                #[allow(unused_mut)]
                let mut window_attrs = WindowAttributes::default()
                    .with_title(self.config.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(width, height));

                // Attach to canvas for WASM
                if let Some(canvas) = web_sys::window()
                    .and_then(|win| win.document())
                    .and_then(|doc| doc.get_element_by_id("mastermind-canvas"))
                    .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
                {
                    window_attrs = window_attrs.with_canvas(Some(canvas));
                }

                let window = match event_loop.create_window(window_attrs) {
                    Ok(window) => Arc::new(window),
                    Err(err) => {
                        log::error!("failed to create window: {}", err);
                        event_loop.exit();
                        return;
                    }
                };

                self.window = Some(window.clone());

                // Initialize renderer asynchronously
                let event_loop_proxy = self.event_loop_proxy.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match WgpuRenderer::new(window.clone()).await {
                        Ok(renderer) => {
                            let _ = event_loop_proxy.send_event(UserEvent::RendererReady(Box::new(renderer)));
                        }
                        Err(err) => log::error!("renderer initialization failed: {:#}", err),
                    }
                });
            }

            fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
                match event {
                    UserEvent::RendererReady(renderer) => {
                        if let Some(window) = &self.window {
                            self.orchestrator = Some(Orchestrator::new(
                                window.clone(),
                                renderer,
                                self.config.clone(),
                                false,
                            ));
                            self.initializing = false;
                            window.request_redraw();
                        }
                    }
                }
            }

            fn window_event(
                &mut self,
                event_loop: &ActiveEventLoop,
                _window_id: winit::window::WindowId,
                event: WindowEvent,
            ) {
                if let Some(orchestrator) = &mut self.orchestrator {
                    orchestrator.handle_event(event, event_loop);
                }
            }
        }

        /// WASM entry point
        #[wasm_bindgen(start)]
        pub fn run() {
            // Initialize panic hook and logging for better debugging
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            let _ = console_log::init_with_level(log::Level::Info);

            log::info!("Initializing Master Mind WASM...");

            let event_loop = match EventLoop::<UserEvent>::with_user_event().build() {
                Ok(event_loop) => event_loop,
                Err(err) => {
                    log::error!("failed to create event loop: {}", err);
                    return;
                }
            };

            event_loop.set_control_flow(ControlFlow::Wait);

            // Create proxy before spawning app
            let event_loop_proxy = event_loop.create_proxy();
            let app = App::new(event_loop_proxy);

            // Use spawn_app for WASM (non-blocking)
            event_loop.spawn_app(app);
        }
    } else {
        use anyhow::Context;
        use config::ShellConfig;
        use orchestrator::Orchestrator;
        use renderer::wgpu_renderer::WgpuRenderer;
        use std::sync::Arc;
        use winit::{
            application::ApplicationHandler,
            dpi::PhysicalSize,
            event::WindowEvent,
            event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
            window::{Fullscreen, WindowAttributes},
        };

        struct App {
            config: ShellConfig,
            orchestrator: Option<Orchestrator>,
            /// Initialization failure, reported once the loop has exited
            error: Option<anyhow::Error>,
        }

        impl App {
            fn new(config: ShellConfig) -> Self {
                Self {
                    config,
                    orchestrator: None,
                    error: None,
                }
            }

            fn init(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Orchestrator> {
                let monitor_size = event_loop
                    .primary_monitor()
                    .or_else(|| event_loop.available_monitors().next())
                    .map(|monitor| {
                        let size = monitor.size();
                        (size.width, size.height)
                    });
                let fullscreen = monitor_size
                    .map(|size| self.config.prefers_fullscreen(size))
                    .unwrap_or(false);
                log::info!("monitor {:?}, fullscreen {}", monitor_size, fullscreen);

                let (min_w, min_h) = self.config.min_window_size;
                let mut window_attrs = WindowAttributes::default()
                    .with_title(self.config.title.clone())
                    .with_resizable(true)
                    .with_min_inner_size(PhysicalSize::new(min_w, min_h));
                window_attrs = if fullscreen {
                    window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
                } else {
                    let (width, height) = self.config.design_size;
                    window_attrs.with_inner_size(PhysicalSize::new(width as u32, height as u32))
                };

                let window = Arc::new(
                    event_loop
                        .create_window(window_attrs)
                        .context("failed to create window")?,
                );
                let renderer = pollster::block_on(WgpuRenderer::new(window.clone()))
                    .context("failed to initialize renderer")?;
                window.request_redraw();

                Ok(Orchestrator::new(
                    window,
                    Box::new(renderer),
                    self.config.clone(),
                    fullscreen,
                ))
            }
        }

        impl ApplicationHandler for App {
            fn resumed(&mut self, event_loop: &ActiveEventLoop) {
                // Only initialize once
                if self.orchestrator.is_some() || self.error.is_some() {
                    return;
                }
                match self.init(event_loop) {
                    Ok(orchestrator) => self.orchestrator = Some(orchestrator),
                    Err(err) => {
                        log::error!("{:#}", err);
                        self.error = Some(err);
                        event_loop.exit();
                    }
                }
            }

            fn window_event(
                &mut self,
                event_loop: &ActiveEventLoop,
                _window_id: winit::window::WindowId,
                event: WindowEvent,
            ) {
                if let Some(orchestrator) = &mut self.orchestrator {
                    orchestrator.handle_event(event, event_loop);
                }
            }
        }

        /// Native entry point: open the window and run until the user quits.
        pub fn run() -> anyhow::Result<()> {
            let config = ShellConfig::from_env();
            log::info!("starting with picture {}", config.image_path.display());

            let event_loop = EventLoop::new().context("failed to create event loop")?;
            event_loop.set_control_flow(ControlFlow::Wait);

            let mut app = App::new(config);
            event_loop.run_app(&mut app).context("event loop failed")?;

            match app.error.take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }
}
