//! Shell configuration.
//!
//! All tunable constants of the shell live in [`ShellConfig`]. The defaults
//! reproduce the classic layout: a 1920x1080 design canvas that may shrink to
//! half size or grow to double size before scrollbars or letterboxing kick in.

use std::path::PathBuf;

/// Environment variable that overrides [`ShellConfig::image_path`].
pub const IMAGE_PATH_ENV: &str = "MASTERMIND_IMAGE";

/// Static configuration of the window, viewport and scroll behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    /// Design resolution the layout is authored for
    pub design_size: (f32, f32),
    /// Smallest allowed canvas scale
    pub min_scale: f32,
    /// Largest allowed canvas scale
    pub max_scale: f32,
    /// Windows are never allowed to shrink below this size
    pub min_window_size: (u32, u32),
    /// Thickness of the scrollbar strips in pixels
    pub scrollbar_width: f32,
    /// Pixels scrolled per wheel notch
    pub wheel_step: f32,
    /// Background picture shown in the upper-left panel
    pub image_path: PathBuf,
    /// Window title
    pub title: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            design_size: (1920.0, 1080.0),
            min_scale: 0.5,
            max_scale: 2.0,
            min_window_size: (128, 64),
            scrollbar_width: 20.0,
            wheel_step: 30.0,
            image_path: PathBuf::from("resources/MasterMind.jpg"),
            title: "Master Mind".to_string(),
        }
    }
}

impl ShellConfig {
    /// Defaults with overrides taken from the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(IMAGE_PATH_ENV) {
            config.image_path = PathBuf::from(path);
        }
        config
    }

    /// Clamp a requested window size to [`min_window_size`](Self::min_window_size).
    pub fn clamp_window_size(&self, size: (u32, u32)) -> (u32, u32) {
        (
            size.0.max(self.min_window_size.0),
            size.1.max(self.min_window_size.1),
        )
    }

    /// Whether a monitor of this size should start the shell in fullscreen.
    ///
    /// Screens no larger than the design resolution get fullscreen; bigger
    /// ones get a window of exactly the design size.
    pub fn prefers_fullscreen(&self, monitor: (u32, u32)) -> bool {
        monitor.0 as f32 <= self.design_size.0 && monitor.1 as f32 <= self.design_size.1
    }
}
