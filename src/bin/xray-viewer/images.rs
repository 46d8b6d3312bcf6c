//! Background image loading.

use eframe::egui;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use thiserror::Error;

/// Errors that can occur when loading and decoding images.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("image '{0}' has no pixels")]
    Empty(PathBuf),
}

/// Decoded image data ready for texture creation.
#[derive(Debug)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// State of an image being loaded asynchronously.
pub enum ImageLoadState {
    /// Image is being decoded in a background thread.
    Loading(mpsc::Receiver<Result<DecodedImage, ImageLoadError>>),
    /// Image has been decoded and is ready for texture creation.
    Ready(DecodedImage),
    /// Loading failed; stores the error message (already displayed via toast).
    Error(String),
}

/// Reads and decodes an image file into RGBA8.
pub fn load_and_decode_image(path: &Path) -> Result<DecodedImage, ImageLoadError> {
    let bytes = std::fs::read(path).map_err(|source| ImageLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let img = image::load_from_memory(&bytes).map_err(|source| ImageLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    if width == 0 || height == 0 {
        return Err(ImageLoadError::Empty(path.to_path_buf()));
    }

    Ok(DecodedImage {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

/// Starts decoding `path` on a background thread and repaints when done.
pub fn spawn_load(ctx: &egui::Context, path: &Path) -> ImageLoadState {
    let (tx, rx) = mpsc::channel();
    let ctx = ctx.clone();
    let path = path.to_path_buf();

    thread::spawn(move || {
        let result = load_and_decode_image(&path);
        let _ = tx.send(result);
        ctx.request_repaint();
    });

    ImageLoadState::Loading(rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn decodes_png_dimensions() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([200, 200, 200, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        file.write_all(&bytes).unwrap();

        let decoded = load_and_decode_image(file.path()).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.pixels.len(), 3 * 2 * 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_and_decode_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, ImageLoadError::Io { .. }));
    }

    #[test]
    fn garbage_is_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not an image").unwrap();
        let err = load_and_decode_image(file.path()).unwrap_err();
        assert!(matches!(err, ImageLoadError::Decode { .. }));
    }
}
