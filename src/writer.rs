use crate::error::ExportError;
use crate::types::{Color, Mm, PageLayout};
use image::RgbaImage;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    A4,
    Letter,
}

impl PageFormat {
    pub fn layout(self) -> PageLayout {
        match self {
            PageFormat::A4 => PageLayout::a4(),
            PageFormat::Letter => PageLayout::letter(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size_pt: f32,
    pub color: Color,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size_pt: f32) -> Self {
        Self {
            size_pt,
            color: Color::BLACK,
            bold: false,
        }
    }

    pub fn bold(size_pt: f32) -> Self {
        Self {
            size_pt,
            color: Color::BLACK,
            bold: true,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

// One open multi-page document. Coordinates are millimeters from the
// page's top-left corner; text y is the baseline. A new document starts
// with page 1 already current.
pub trait DocumentWriter: Send {
    fn add_page(&mut self);

    // Makes an existing 1-based page current again, for stamping chrome
    // after all content pages exist.
    fn set_page(&mut self, page_number: usize);

    fn place_image(
        &mut self,
        pixels: &RgbaImage,
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
    ) -> Result<(), ExportError>;

    fn draw_text(&mut self, text: &str, x: Mm, baseline: Mm, style: &TextStyle, align: TextAlign);

    fn draw_line(&mut self, from: (Mm, Mm), to: (Mm, Mm), width_pt: f32, color: Color);

    fn page_count(&self) -> usize;

    fn save(&mut self, path: &Path) -> Result<(), ExportError>;
}

pub trait WriterFactory: Send + Sync {
    fn new_document(&self, format: PageFormat) -> Box<dyn DocumentWriter>;
}
