//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::QrPayload;
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// QR code decoder
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode the QR code stored in an image file
    pub fn decode_file(&self, path: &Path) -> Result<QrPayload> {
        let img = image::open(path)?;
        self.decode(&img)
    }

    /// Decode a QR code from an image
    pub fn decode(&self, img: &DynamicImage) -> Result<QrPayload> {
        let gray = img.to_luma8();

        self.decode_gray(&gray)
    }

    /// Decode a QR code from a grayscale image
    pub fn decode_gray(&self, img: &GrayImage) -> Result<QrPayload> {
        let mut prepared = rqrr::PreparedImage::prepare(img.clone());

        let grids = prepared.detect_grids();

        // Take the first detected QR code
        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );

                Ok(QrPayload::from_bytes(content.into_bytes()))
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }

    /// Decode `path` and check that it carries exactly `expected`.
    pub fn verify_file(&self, path: &Path, expected: &QrPayload) -> Result<()> {
        let decoded = self.decode_file(path)?;
        if decoded.as_bytes() == expected.as_bytes() {
            tracing::debug!(path = %path.display(), "Written QR code verified");
            Ok(())
        } else {
            Err(Error::VerificationMismatch {
                expected: String::from_utf8_lossy(expected.as_bytes()).into_owned(),
                found: String::from_utf8_lossy(decoded.as_bytes()).into_owned(),
            })
        }
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_blank_image_has_no_code() {
        let blank = GrayImage::from_pixel(200, 200, Luma([255]));
        let err = QrDecoder::new().decode_gray(&blank).unwrap_err();
        assert!(matches!(err, Error::NoQrCodeFound));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = QrDecoder::new()
            .decode_file(Path::new("/nonexistent/wakeqr/qr.png"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
