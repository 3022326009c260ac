use crate::capture::{ContentBlock, ContentTree};
use crate::types::Mm;
use log::debug;

// Vertical span of one atomic visual block, in document coordinates.
// Read-only facts computed once per export, before planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentRegion {
    pub top: Mm,
    pub bottom: Mm,
}

impl DocumentRegion {
    pub fn new(top: Mm, bottom: Mm) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> Mm {
        self.bottom - self.top
    }

    // Strict: a break exactly on either edge does not split the region.
    pub fn contains(&self, offset: Mm) -> bool {
        self.top < offset && offset < self.bottom
    }

    fn encloses(&self, other: &DocumentRegion) -> bool {
        self.top <= other.top && other.bottom <= self.bottom
    }
}

// Injected region source, so planning stays testable without any
// rendering environment.
pub trait RegionProvider {
    // scale is pixels per millimeter, matching the capture bitmap.
    fn keep_together_regions(&self, scale: f32) -> Vec<DocumentRegion>;
}

impl RegionProvider for ContentTree {
    fn keep_together_regions(&self, scale: f32) -> Vec<DocumentRegion> {
        locate_regions(self, scale)
    }
}

// A candidate nested under another candidate is never emitted: once a
// block matches the atomic catalogue its subtree is skipped, and any
// region fully contained in another is dropped afterwards. Zero regions
// is a valid result; planning then falls back to whitespace breaking.
pub fn locate_regions(content: &ContentTree, scale: f32) -> Vec<DocumentRegion> {
    if !(scale > 0.0) || !scale.is_finite() {
        return Vec::new();
    }
    let mut found = Vec::new();
    collect(&content.blocks, scale, &mut found);
    found.sort_by(|a, b| a.top.cmp(&b.top).then(b.bottom.cmp(&a.bottom)));

    let mut regions: Vec<DocumentRegion> = Vec::with_capacity(found.len());
    for candidate in found {
        if regions.iter().any(|kept| kept.encloses(&candidate)) {
            continue;
        }
        regions.push(candidate);
    }
    debug!("located {} keep-together regions", regions.len());
    regions
}

fn collect(blocks: &[ContentBlock], scale: f32, out: &mut Vec<DocumentRegion>) {
    for block in blocks {
        if block.role.is_atomic() {
            if block.bottom_px > block.top_px {
                out.push(DocumentRegion::new(
                    Mm::from_f32(block.top_px as f32 / scale),
                    Mm::from_f32(block.bottom_px as f32 / scale),
                ));
            }
            continue;
        }
        collect(&block.children, scale, out);
    }
}
