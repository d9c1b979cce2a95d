//! QR code encoding and decoding
//!
//! Encoding turns a payload into a [`QrSymbol`] module matrix via the
//! `qrcode` crate. Decoding uses `rqrr` and is used to check that a written
//! image actually carries the payload.

mod decoder;
mod encoder;
mod symbol;

pub use decoder::QrDecoder;
pub use encoder::{QrEncoder, SymbolConfig};
pub use symbol::QrSymbol;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest QR version
pub const MIN_VERSION: u8 = 1;
/// Largest QR version
pub const MAX_VERSION: u8 = 40;

/// A QR code payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// The raw data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Create a new QR payload from a string
    pub fn from_string(s: String) -> Self {
        Self {
            data: s.as_bytes().to_vec(),
            text: Some(s),
        }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Error correction tier of a QR symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ErrorCorrection {
    /// Recovers about 7% of codewords
    Low,
    /// Recovers about 15% of codewords
    Medium,
    /// Recovers about 25% of codewords
    Quartile,
    /// Recovers about 30% of codewords
    High,
}

impl ErrorCorrection {
    /// Approximate share of damaged codewords the level can restore, in percent
    pub fn recovery_percent(self) -> u8 {
        match self {
            Self::Low => 7,
            Self::Medium => 15,
            Self::Quartile => 25,
            Self::High => 30,
        }
    }

    /// Single-letter name used by the QR standard
    pub fn letter(self) -> char {
        match self {
            Self::Low => 'L',
            Self::Medium => 'M',
            Self::Quartile => 'Q',
            Self::High => 'H',
        }
    }

    /// Parse a level from its letter or name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::Low),
            "m" | "medium" => Some(Self::Medium),
            "q" | "quartile" => Some(Self::Quartile),
            "h" | "high" => Some(Self::High),
            _ => None,
        }
    }

    pub(crate) fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            Self::Low => qrcode::EcLevel::L,
            Self::Medium => qrcode::EcLevel::M,
            Self::Quartile => qrcode::EcLevel::Q,
            Self::High => qrcode::EcLevel::H,
        }
    }

    pub(crate) fn from_qrcode(level: qrcode::EcLevel) -> Self {
        match level {
            qrcode::EcLevel::L => Self::Low,
            qrcode::EcLevel::M => Self::Medium,
            qrcode::EcLevel::Q => Self::Quartile,
            qrcode::EcLevel::H => Self::High,
        }
    }
}

impl Default for ErrorCorrection {
    fn default() -> Self {
        Self::High
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::Quartile => "Quartile",
            Self::High => "High",
        };
        write!(f, "{name} ({})", self.letter())
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unknown error correction level '{value}', expected L, M, Q or H")
        })
    }
}

impl TryFrom<String> for ErrorCorrection {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}
