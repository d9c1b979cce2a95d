//! Encoded QR module matrix

use crate::qr::ErrorCorrection;
use qrcode::{Color, QrCode};

/// An encoded QR symbol: a square grid of dark and light modules, without
/// the quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    version: u8,
    ec_level: ErrorCorrection,
    width: usize,
    modules: Vec<bool>,
}

impl QrSymbol {
    pub(crate) fn from_code(code: &QrCode) -> Self {
        let width = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect();

        Self {
            // Normal versions are 17 + 4v modules across.
            version: ((width - 17) / 4) as u8,
            ec_level: ErrorCorrection::from_qrcode(code.error_correction_level()),
            width,
            modules,
        }
    }

    /// QR version (1..=40)
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Error correction level the symbol was encoded with
    pub fn ec_level(&self) -> ErrorCorrection {
        self.ec_level
    }

    /// Number of modules along one side
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at column `x`, row `y` is dark.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the symbol.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[self.index(x, y)]
    }

    /// Flip a module between dark and light.
    pub fn toggle(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.modules[idx] = !self.modules[idx];
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }

    /// Row-major module flags, `true` for dark
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Text rendering, one line per row, `#` for dark modules.
    pub fn to_text(&self) -> String {
        self.modules
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|&dark| if dark { '#' } else { ' ' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.width,
            "module ({x}, {y}) outside {0}x{0} symbol",
            self.width
        );
        y * self.width + x
    }
}
