//! Persisting rendered images

use crate::error::{Error, Result};
use image::{ImageError, ImageFormat, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Pick the raster format for `path` from its extension, PNG when it has none.
pub fn format_for_path(path: &Path) -> Result<ImageFormat> {
    let format = match path.extension() {
        None => ImageFormat::Png,
        Some(_) => ImageFormat::from_path(path).map_err(|_| {
            Error::Config(format!(
                "Unsupported image extension for '{}', use .png, .jpg, .bmp or similar",
                path.display()
            ))
        })?,
    };

    if !format.writing_enabled() {
        return Err(Error::Config(format!(
            "Cannot write {format:?} images ('{}'), use .png, .jpg, .bmp or similar",
            path.display()
        )));
    }
    Ok(format)
}

/// Encode `image` in the format chosen by `path`'s extension.
pub fn encode_image(image: &RgbImage, path: &Path) -> Result<(ImageFormat, Vec<u8>)> {
    let format = format_for_path(path)?;

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format)
        .map_err(|e| match e {
            ImageError::Unsupported(reason) => Error::Config(format!(
                "Cannot write '{}' as {format:?}: {reason}",
                path.display()
            )),
            other => Error::from(other),
        })?;

    Ok((format, buffer.into_inner()))
}

/// Write `image` to `path`, creating or truncating the file.
///
/// The image is fully encoded before the file is touched, so an unusable
/// format leaves any existing file intact.
pub fn save_image(image: &RgbImage, path: &Path) -> Result<ImageFormat> {
    let (format, bytes) = encode_image(image, path)?;
    fs::write(path, &bytes)?;

    tracing::info!(
        path = %path.display(),
        format = ?format,
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "Wrote QR image"
    );
    Ok(format)
}
