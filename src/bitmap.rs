use crate::error::ExportError;
use crate::types::{Mm, PageLayout};
use image::RgbaImage;

// A captured snapshot: RGBA pixels plus the capture scale in pixels per
// document millimeter. Produced once per export, never mutated.
#[derive(Debug)]
pub struct BitmapImage {
    pixels: RgbaImage,
    scale: f32,
}

impl BitmapImage {
    pub fn new(pixels: RgbaImage, scale: f32) -> Result<Self, ExportError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(ExportError::CaptureFailed(
                "captured bitmap is empty".to_string(),
            ));
        }
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(ExportError::InvalidLayout(format!(
                "capture scale must be positive, got {}",
                scale
            )));
        }
        Ok(Self { pixels, scale })
    }

    // Document-space millimeters are defined by mapping the full bitmap
    // width onto the layout's content width, so a 1mm band of bitmap
    // occupies exactly 1mm of page height once placed.
    pub fn for_layout(pixels: RgbaImage, layout: &PageLayout) -> Result<Self, ExportError> {
        let content_width = layout.content_width();
        if content_width <= Mm::ZERO {
            return Err(ExportError::InvalidLayout(
                "margins leave no content width".to_string(),
            ));
        }
        let scale = pixels.width() as f32 / content_width.to_f32();
        Self::new(pixels, scale)
    }

    pub fn width_px(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height_px(&self) -> u32 {
        self.pixels.height()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn content_width(&self) -> Mm {
        Mm::from_f32(self.pixels.width() as f32 / self.scale)
    }

    pub fn content_height(&self) -> Mm {
        Mm::from_f32(self.pixels.height() as f32 / self.scale)
    }

    // Clamped to the boundary range 0..=height_px.
    pub fn row_at(&self, offset: Mm) -> u32 {
        let row = (offset.to_f32() * self.scale).round();
        if row <= 0.0 {
            0
        } else if row >= self.pixels.height() as f32 {
            self.pixels.height()
        } else {
            row as u32
        }
    }

    pub fn offset_at(&self, row: u32) -> Mm {
        Mm::from_f32(row as f32 / self.scale)
    }

    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn crop_rows(&self, y: u32, height: u32) -> RgbaImage {
        let y = y.min(self.pixels.height().saturating_sub(1));
        let height = height.max(1).min(self.pixels.height() - y);
        image::imageops::crop_imm(&self.pixels, 0, y, self.pixels.width(), height).to_image()
    }
}
