//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::{ErrorCorrection, MAX_VERSION, MIN_VERSION, QrPayload, QrSymbol};
use qrcode::types::QrError;
use qrcode::{QrCode, Version};
use serde::{Deserialize, Serialize};

/// Symbol parameters handed to the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolConfig {
    /// Version to use, or the smallest one to try when `fit` is set
    pub version: u8,
    /// Error correction level
    pub ec_level: ErrorCorrection,
    /// Grow the version until the payload fits instead of failing
    pub fit: bool,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            version: MIN_VERSION,
            ec_level: ErrorCorrection::High,
            fit: true,
        }
    }
}

impl SymbolConfig {
    /// Check that the version hint is a valid QR version.
    pub fn validate(&self) -> Result<()> {
        if (MIN_VERSION..=MAX_VERSION).contains(&self.version) {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "QR version {} out of range, expected {MIN_VERSION}..={MAX_VERSION}",
                self.version
            )))
        }
    }
}

/// QR code encoder
pub struct QrEncoder {
    config: SymbolConfig,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (version 1, High ECC, fit)
    pub fn new() -> Self {
        Self {
            config: SymbolConfig::default(),
        }
    }

    /// Create a new QR encoder with explicit symbol parameters
    pub fn with_config(config: SymbolConfig) -> Self {
        Self { config }
    }

    /// Symbol parameters in use
    pub fn config(&self) -> &SymbolConfig {
        &self.config
    }

    /// Encode a payload into a module matrix
    pub fn encode(&self, payload: &QrPayload) -> Result<QrSymbol> {
        self.config.validate()?;
        let ec_level = self.config.ec_level;

        let code = if self.config.fit {
            self.encode_fit(payload)?
        } else {
            encode_version(payload, self.config.version, ec_level)?
        };

        let symbol = QrSymbol::from_code(&code);
        tracing::debug!(
            version = symbol.version(),
            ec_level = %ec_level,
            modules = symbol.width(),
            payload_bytes = payload.len(),
            "Encoded QR symbol"
        );
        tracing::trace!("Module matrix:\n{}", symbol.to_text());
        Ok(symbol)
    }

    /// Encode a string into a module matrix
    pub fn encode_string(&self, data: &str) -> Result<QrSymbol> {
        let payload = QrPayload::from_string(data.to_string());
        self.encode(&payload)
    }

    /// Encode bytes into a module matrix
    pub fn encode_bytes(&self, data: &[u8]) -> Result<QrSymbol> {
        let payload = QrPayload::from_bytes(data.to_vec());
        self.encode(&payload)
    }

    fn encode_fit(&self, payload: &QrPayload) -> Result<QrCode> {
        let ec_level = self.config.ec_level;
        let smallest = QrCode::with_error_correction_level(payload.as_bytes(), ec_level.to_qrcode())
            .map_err(|e| map_qr_error(e, MAX_VERSION, ec_level, payload))?;

        match smallest.version() {
            Version::Normal(v) if v >= i16::from(self.config.version) => Ok(smallest),
            // The payload fits a smaller version than the hint; honour the hint.
            _ => encode_version(payload, self.config.version, ec_level),
        }
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_version(payload: &QrPayload, version: u8, ec_level: ErrorCorrection) -> Result<QrCode> {
    QrCode::with_version(
        payload.as_bytes(),
        Version::Normal(i16::from(version)),
        ec_level.to_qrcode(),
    )
    .map_err(|e| map_qr_error(e, version, ec_level, payload))
}

fn map_qr_error(e: QrError, version: u8, ec_level: ErrorCorrection, payload: &QrPayload) -> Error {
    match e {
        QrError::DataTooLong => Error::Capacity {
            version,
            ec_level,
            payload_bytes: payload.len(),
        },
        other => Error::QrEncode(other.to_string()),
    }
}
