//! Rasterising QR symbols into two-colour bitmaps

use crate::error::{Error, Result};
use crate::qr::QrSymbol;
use image::{Rgb, RgbImage};

/// Foreground (dark module) and background colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Colour of dark modules
    pub foreground: Rgb<u8>,
    /// Colour of light modules and the border
    pub background: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
        }
    }
}

impl Palette {
    /// Build a palette from two CSS colour strings (`"black"`, `"#fff"`, `"rgb(0,0,0)"`).
    pub fn parse(foreground: &str, background: &str) -> Result<Self> {
        Ok(Self {
            foreground: parse_color(foreground)?,
            background: parse_color(background)?,
        })
    }
}

/// Parse a CSS colour string into an opaque RGB pixel; alpha is dropped.
pub fn parse_color(value: &str) -> Result<Rgb<u8>> {
    let color = value
        .parse::<csscolorparser::Color>()
        .map_err(|e| Error::Config(format!("Invalid colour '{value}': {e}")))?;
    let [r, g, b, _] = color.to_rgba8();
    Ok(Rgb([r, g, b]))
}

/// Largest accepted image side in pixels
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// How a symbol is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per module side
    pub box_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Module colours
    pub palette: Palette,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            box_size: 20,
            border: 4,
            palette: Palette::default(),
        }
    }
}

impl RenderOptions {
    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> Result<()> {
        if self.box_size == 0 {
            return Err(Error::Config("Box size must be at least 1 pixel".to_string()));
        }
        Ok(())
    }

    /// Side length in pixels of the image produced for `symbol`:
    /// `(modules + 2 * border) * box_size`, at most [`MAX_IMAGE_SIDE`].
    pub fn dimensions(&self, symbol: &QrSymbol) -> Result<u32> {
        let too_large = || {
            Error::Config(format!(
                "Image for {} modules with border {} and box size {} exceeds {MAX_IMAGE_SIDE} pixels per side",
                symbol.width(),
                self.border,
                self.box_size
            ))
        };

        let modules = u32::try_from(symbol.width()).map_err(|_| too_large())?;
        let side = self
            .border
            .checked_mul(2)
            .and_then(|border| border.checked_add(modules))
            .and_then(|across| across.checked_mul(self.box_size))
            .ok_or_else(too_large)?;

        if side > MAX_IMAGE_SIDE {
            return Err(too_large());
        }
        Ok(side)
    }

    /// Draw `symbol` with every module as a filled `box_size` square.
    pub fn render(&self, symbol: &QrSymbol) -> Result<RgbImage> {
        self.validate()?;
        let side = self.dimensions(symbol)?;
        let box_size = self.box_size;
        let width = symbol.width() as u32;
        let Palette {
            foreground,
            background,
        } = self.palette;

        Ok(RgbImage::from_fn(side, side, |px, py| {
            let mx = px / box_size;
            let my = py / box_size;
            let inside = (self.border..self.border + width).contains(&mx)
                && (self.border..self.border + width).contains(&my);

            if inside
                && symbol.is_dark((mx - self.border) as usize, (my - self.border) as usize)
            {
                foreground
            } else {
                background
            }
        }))
    }
}
