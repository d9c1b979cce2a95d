//! wakeqr - generate the shared-secret QR code for the wake-up alarm
//!
//! The companion alarm app only stops ringing once it scans a QR code that
//! carries its unlock secret. This crate produces that code: it encodes the
//! secret, rasterises the symbol and writes it to an image file.
//!
//! # Example
//!
//! ```no_run
//! use wakeqr::WakeQrConfig;
//!
//! fn main() -> wakeqr::Result<()> {
//!     let report = wakeqr::generate(&WakeQrConfig::default())?;
//!     println!("{}", wakeqr::output::success_message(&report));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod qr;
pub mod render;
pub mod writer;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LogRotation, LoggingOptions, RenderSettings, WakeQrConfig};
pub use output::GenerationReport;
pub use qr::{ErrorCorrection, QrDecoder, QrEncoder, QrPayload, QrSymbol, SymbolConfig};
pub use render::{Palette, RenderOptions};

/// Encode the configured secret, render it and write the image.
///
/// When `config.verify` is set the written file is decoded again and must
/// carry exactly the secret.
pub fn generate(config: &WakeQrConfig) -> Result<GenerationReport> {
    let payload = config.payload();
    let options = config.render_options()?;
    let encoder = QrEncoder::with_config(config.symbol);

    let symbol = encoder.encode(&payload)?;
    let image = options.render(&symbol)?;
    writer::save_image(&image, &config.output)?;

    if config.verify {
        QrDecoder::new().verify_file(&config.output, &payload)?;
    }

    Ok(GenerationReport {
        path: config.output.clone(),
        payload: payload.data,
        version: symbol.version(),
        ec_level: symbol.ec_level(),
        modules: symbol.width(),
        pixels: image.width(),
        verified: config.verify,
    })
}
