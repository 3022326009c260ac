use crate::error::ExportError;
use crate::types::{Color, Mm};
use crate::writer::{DocumentWriter, PageFormat, TextAlign, TextStyle, WriterFactory};
use image::RgbaImage;
use lopdf::{Document as LoDocument, Object as LoObject, Stream as LoStream, dictionary};
use std::fmt::Write as _;
use std::path::Path;

const MM_PER_PT: f32 = 25.4 / 72.0;

// Pages are buffered as content streams plus JPEG image slots and
// assembled into one document at save time, so nothing is written on
// failure.
pub struct PdfWriter {
    page_width: Mm,
    page_height: Mm,
    jpeg_quality: u8,
    pages: Vec<PageBuffer>,
    current: usize,
    image_counter: usize,
}

struct PageBuffer {
    content: String,
    images: Vec<ImageSlot>,
}

struct ImageSlot {
    name: String,
    width_px: u32,
    height_px: u32,
    jpeg: Vec<u8>,
}

impl PageBuffer {
    fn new() -> Self {
        Self {
            content: String::new(),
            images: Vec::new(),
        }
    }
}

impl PdfWriter {
    pub fn new(format: PageFormat) -> Self {
        let layout = format.layout();
        Self {
            page_width: layout.page_width,
            page_height: layout.page_height,
            jpeg_quality: 88,
            pages: vec![PageBuffer::new()],
            current: 0,
            image_counter: 0,
        }
    }

    fn baseline_pt(&self, y: Mm) -> f32 {
        self.page_height.to_pt() - y.to_pt()
    }
}

impl DocumentWriter for PdfWriter {
    fn add_page(&mut self) {
        self.pages.push(PageBuffer::new());
        self.current = self.pages.len() - 1;
    }

    fn set_page(&mut self, page_number: usize) {
        if page_number >= 1 && page_number <= self.pages.len() {
            self.current = page_number - 1;
        }
    }

    fn place_image(
        &mut self,
        pixels: &RgbaImage,
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
    ) -> Result<(), ExportError> {
        let rgb = image::DynamicImage::ImageRgba8(pixels.clone()).to_rgb8();
        let mut jpeg = Vec::new();
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, self.jpeg_quality);
        encoder
            .encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|err| ExportError::Save(err.to_string()))?;

        let name = format!("Im{}", self.image_counter);
        self.image_counter += 1;
        let bottom = self.page_height.to_pt() - (y + height).to_pt();
        let page = &mut self.pages[self.current];
        let _ = writeln!(
            page.content,
            "q {:.2} 0 0 {:.2} {:.2} {:.2} cm /{} Do Q",
            width.to_pt(),
            height.to_pt(),
            x.to_pt(),
            bottom,
            name
        );
        page.images.push(ImageSlot {
            name,
            width_px: pixels.width(),
            height_px: pixels.height(),
            jpeg,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: Mm, baseline: Mm, style: &TextStyle, align: TextAlign) {
        let x = match align {
            TextAlign::Left => x,
            TextAlign::Right => x - text_width(text, style.size_pt),
        };
        let font = if style.bold { "F2" } else { "F1" };
        let y_pt = self.baseline_pt(baseline);
        let page = &mut self.pages[self.current];
        let _ = writeln!(
            page.content,
            "BT {:.3} {:.3} {:.3} rg /{} {:.1} Tf {:.2} {:.2} Td ({}) Tj ET",
            style.color.r,
            style.color.g,
            style.color.b,
            font,
            style.size_pt,
            x.to_pt(),
            y_pt,
            escape_text(text)
        );
    }

    fn draw_line(&mut self, from: (Mm, Mm), to: (Mm, Mm), width_pt: f32, color: Color) {
        let y1 = self.baseline_pt(from.1);
        let y2 = self.baseline_pt(to.1);
        let page = &mut self.pages[self.current];
        let _ = writeln!(
            page.content,
            "q {:.2} w {:.3} {:.3} {:.3} RG {:.2} {:.2} m {:.2} {:.2} l S Q",
            width_pt,
            color.r,
            color.g,
            color.b,
            from.0.to_pt(),
            y1,
            to.0.to_pt(),
            y2
        );
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn save(&mut self, path: &Path) -> Result<(), ExportError> {
        let mut doc = LoDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });

        let mut kids: Vec<LoObject> = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let mut xobjects = lopdf::Dictionary::new();
            for image in &page.images {
                let stream_id = doc.add_object(LoStream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => image.width_px as i64,
                        "Height" => image.height_px as i64,
                        "ColorSpace" => "DeviceRGB",
                        "BitsPerComponent" => 8,
                        "Filter" => "DCTDecode",
                    },
                    image.jpeg.clone(),
                ));
                xobjects.set(image.name.as_bytes().to_vec(), LoObject::Reference(stream_id));
            }
            let content_id =
                doc.add_object(LoStream::new(dictionary! {}, page.content.clone().into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! {
                        "F1" => regular_id,
                        "F2" => bold_id,
                    },
                    "XObject" => LoObject::Dictionary(xobjects),
                },
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    self.page_width.to_pt().into(),
                    self.page_height.to_pt().into(),
                ],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            LoObject::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();
        doc.save(path)
            .map_err(|err| ExportError::Save(err.to_string()))?;
        Ok(())
    }
}

pub struct PdfWriterFactory;

impl WriterFactory for PdfWriterFactory {
    fn new_document(&self, format: PageFormat) -> Box<dyn DocumentWriter> {
        Box::new(PdfWriter::new(format))
    }
}

// Approximate Helvetica advance widths; chrome text does not need exact
// glyph metrics, and per-character class ratios keep right-aligned text
// within a glyph or two of true.
fn text_width(text: &str, size_pt: f32) -> Mm {
    let em: f32 = text.chars().map(char_width_ratio).sum();
    Mm::from_f32(em * size_pt * MM_PER_PT)
}

fn char_width_ratio(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '/' | '\\' | ' ' | '-' => 0.35,
        'm' | 'w' | 'M' | 'W' | '@' => 0.85,
        'A'..='Z' | '0'..='9' => 0.66,
        _ => 0.5,
    }
}

// Bytes above ASCII become octal escapes in WinAnsi space; characters
// outside Latin-1 degrade to '?' (output text is chrome, not report
// content).
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' => out.push(' '),
            c if (c as u32) < 0x20 => out.push(' '),
            c if c.is_ascii() => out.push(c),
            c if (c as u32) <= 0xFF => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}
