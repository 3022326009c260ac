use crate::error::ExportError;
use crate::types::Color;
use image::RgbaImage;
use std::time::Duration;

// Visual role of a prepared content block, as reported by the capture
// side. Roles drive keep-together discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    Card,
    MetricCard,
    ChartContainer,
    Table,
    ScoreCard,
    Screenshot,
    Section,
    Heading,
    Text,
}

impl BlockRole {
    // Blocks of these roles must not be split across a page boundary if
    // avoidable.
    pub fn is_atomic(self) -> bool {
        matches!(
            self,
            BlockRole::Card
                | BlockRole::MetricCard
                | BlockRole::ChartContainer
                | BlockRole::Table
                | BlockRole::ScoreCard
                | BlockRole::Screenshot
        )
    }
}

// Geometry is reported in capture-bitmap pixel space, measured from the
// capture root.
#[derive(Debug, Clone)]
pub struct ContentBlock {
    pub role: BlockRole,
    pub top_px: u32,
    pub bottom_px: u32,
    // Honored by the capture collaborator's pre-capture exclusion hook.
    pub no_export: bool,
    pub children: Vec<ContentBlock>,
}

impl ContentBlock {
    pub fn new(role: BlockRole, top_px: u32, bottom_px: u32) -> Self {
        Self {
            role,
            top_px,
            bottom_px,
            no_export: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<ContentBlock>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentTree {
    pub blocks: Vec<ContentBlock>,
}

impl ContentTree {
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }
}

#[derive(Debug, Clone)]
pub struct CaptureOptions {
    // Rasterization quality, in device pixels per layout pixel.
    pub scale: f32,
    // Logical capture width; may exceed the visible viewport.
    pub width_px: u32,
    pub background: Color,
    // Pause after content preparation so layout and animations settle.
    pub settle_delay: Duration,
    // Upper bound on waiting for pending image loads. Images still missing
    // when it elapses are captured as-is.
    pub image_wait: Duration,
    pub exclude_no_export: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            width_px: 1600,
            background: Color::WHITE,
            settle_delay: Duration::from_millis(300),
            image_wait: Duration::from_secs(5),
            exclude_no_export: true,
        }
    }
}

// Turns a prepared content tree into one pixel grid per export. The
// exporter derives the document-space scale from the page layout, so
// implementations only deliver raw pixels.
pub trait RasterCapture: Send + Sync {
    fn capture(
        &self,
        content: &ContentTree,
        options: &CaptureOptions,
    ) -> Result<RgbaImage, ExportError>;
}

// Consulted before any capture is attempted.
pub trait AccessGate: Send + Sync {
    fn has_export_access(&self, report_id: &str) -> bool;
}
