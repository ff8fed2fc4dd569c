//! Background picture loading.
//!
//! The picture shown in the upper-left panel is read from disk at startup
//! (see [`ShellConfig::image_path`](crate::config::ShellConfig::image_path))
//! and decoded to RGBA8 for upload as a texture. A missing or broken file is
//! not fatal: the caller logs the [`AssetError`] and draws a placeholder.

use std::path::{Path, PathBuf};

use image::RgbaImage;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("invalid image dimensions")]
    EmptyImage,
}

/// Decode an encoded picture (PNG or JPEG) to RGBA8.
pub fn decode_picture(bytes: &[u8]) -> Result<RgbaImage, AssetError> {
    let picture = image::load_from_memory(bytes)?.to_rgba8();
    if picture.width() == 0 || picture.height() == 0 {
        return Err(AssetError::EmptyImage);
    }
    Ok(picture)
}

/// Read and decode the picture at `path`.
pub fn load_picture(path: &Path) -> Result<RgbaImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let picture = decode_picture(&bytes)?;
    log::info!(
        "loaded picture {} ({}x{})",
        path.display(),
        picture.width(),
        picture.height()
    );
    Ok(picture)
}
