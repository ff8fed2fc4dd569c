use crate::layout::Scene;
use image::RgbaImage;

pub mod batch;
pub mod wgpu_renderer;

/// Trait for drawing frames.
/// This abstraction allows for different rendering backends (wgpu for native/web, test doubles, etc.)
pub trait Renderer {
    /// Draw a complete frame
    ///
    /// # Arguments
    /// * `scene` - Primitives in window pixels, back to front
    fn draw_scene(&mut self, scene: &Scene);

    /// Handle window resize events
    ///
    /// # Arguments
    /// * `new_size` - New window dimensions in pixels
    fn resize(&mut self, new_size: (u32, u32));

    /// Get the current surface size
    fn window_size(&self) -> (u32, u32);

    /// Upload the background picture
    fn set_picture(&mut self, picture: &RgbaImage);

    /// Whether a picture has been uploaded; without one the scene uses a placeholder panel
    fn has_picture(&self) -> bool;
}
