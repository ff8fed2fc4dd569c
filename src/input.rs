//! Platform-neutral input events.
//!
//! The orchestrator translates winit events into [`InputEvent`]s so that the
//! application state can be driven (and tested) without a window.

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key as WinitKey, NamedKey};

/// Pixels that count as one wheel notch for touchpads reporting pixel deltas.
const PIXELS_PER_NOTCH: f64 = 30.0;

/// A pressed key, reduced to what the shell reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// A printable key, lowercased
    Char(char),
    Other,
}

/// Something that happened since the last update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The window was resized (physical pixels)
    Resized { width: u32, height: u32 },
    KeyPressed(Key),
    PointerPressed,
    PointerReleased,
    PointerMoved { x: f32, y: f32 },
    /// Wheel notches; positive values scroll towards the top
    Wheel { notches: f32 },
    /// Once per redraw, before the scene is built
    Frame,
    CloseRequested,
}

impl InputEvent {
    /// Translate a winit window event. Returns `None` for events the shell ignores.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::Resized(size) => Some(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let key = match &event.logical_key {
                    WinitKey::Named(NamedKey::Escape) => Key::Escape,
                    WinitKey::Character(text) => text
                        .chars()
                        .next()
                        .map(|c| Key::Char(c.to_ascii_lowercase()))
                        .unwrap_or(Key::Other),
                    _ => Key::Other,
                };
                Some(InputEvent::KeyPressed(key))
            }
            WindowEvent::MouseInput { state, .. } => Some(match state {
                ElementState::Pressed => InputEvent::PointerPressed,
                ElementState::Released => InputEvent::PointerReleased,
            }),
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_NOTCH) as f32,
                };
                Some(InputEvent::Wheel { notches })
            }
            _ => None,
        }
    }
}
