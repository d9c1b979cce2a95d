//! Error types for wakeqr operations

use crate::qr::ErrorCorrection;
use thiserror::Error;

/// Result type alias using wakeqr's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wakeqr operations
#[derive(Error, Debug)]
pub enum Error {
    /// Payload does not fit into the requested symbol
    #[error(
        "Payload of {payload_bytes} bytes does not fit in a version {version} QR code at error correction {ec_level}"
    )]
    Capacity {
        /// Largest version that was tried
        version: u8,
        /// Error correction level in use
        ec_level: ErrorCorrection,
        /// Payload length in bytes
        payload_bytes: usize,
    },

    /// QR code encoding failed for a reason other than capacity
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Written image decodes to something other than the payload
    #[error("Verification failed: expected {expected:?}, decoded {found:?}")]
    VerificationMismatch {
        /// Payload that was encoded
        expected: String,
        /// Payload read back from the image
        found: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => Error::Io(io),
            other => Error::Image(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}
