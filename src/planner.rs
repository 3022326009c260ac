use crate::bitmap::BitmapImage;
use crate::error::ExportError;
use crate::region::DocumentRegion;
use crate::types::{Mm, PageLayout};
use crate::whitespace::{BreakHeuristics, find_whitespace_break};
use log::debug;

// Ordered, strictly increasing cumulative offsets at which content is
// sliced into pages. The final element equals total content height; the
// implicit first page starts at 0. Computed once per export and never
// revised once page rendering begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakPlan {
    offsets: Vec<Mm>,
}

impl BreakPlan {
    pub fn from_offsets(offsets: Vec<Mm>) -> Self {
        Self { offsets }
    }

    pub fn offsets(&self) -> &[Mm] {
        &self.offsets
    }

    pub fn page_count(&self) -> usize {
        self.offsets.len()
    }

    // (start, end) span for every page, starting at the implicit 0.
    pub fn page_spans(&self) -> impl Iterator<Item = (Mm, Mm)> + '_ {
        std::iter::once(Mm::ZERO)
            .chain(self.offsets.iter().copied())
            .zip(self.offsets.iter().copied())
    }
}

// Regions take precedence: a tentative break crossing a region that fits
// within the current page's usable height is pulled back to the region's
// top, sacrificing trailing whitespace instead of splitting it. A region
// taller than a full usable page is left to split. Only when no regions
// exist at all is the bitmap consulted for a whitespace break inside a
// bounded window before the tentative line.
pub fn plan_breaks(
    total_height: Mm,
    regions: &[DocumentRegion],
    layout: &PageLayout,
    bitmap: Option<&BitmapImage>,
    heuristics: &BreakHeuristics,
) -> Result<BreakPlan, ExportError> {
    if total_height <= Mm::ZERO {
        return Err(ExportError::InvalidLayout(
            "content height must be positive".to_string(),
        ));
    }
    for page in [1, 2] {
        let usable = layout.usable_height(page);
        if usable < heuristics.min_slice_height {
            return Err(ExportError::InvalidLayout(format!(
                "page {} usable height {:.1}mm is below the minimum slice height",
                page,
                usable.to_f32()
            )));
        }
    }

    let mut offsets = Vec::new();
    let mut processed = Mm::ZERO;
    let mut page = 1usize;
    while processed < total_height {
        let usable = layout.usable_height(page);
        let tentative = processed + usable;
        if tentative >= total_height {
            offsets.push(total_height);
            break;
        }

        let mut chosen = tentative;
        if !regions.is_empty() {
            if let Some(region) = regions.iter().find(|region| region.contains(tentative)) {
                if region.height() <= usable {
                    debug!(
                        "page {}: pulling break {:.1}mm back to region top {:.1}mm",
                        page,
                        tentative.to_f32(),
                        region.top.to_f32()
                    );
                    chosen = region.top;
                } else {
                    debug!(
                        "page {}: region {:.1}..{:.1}mm exceeds usable height, splitting",
                        page,
                        region.top.to_f32(),
                        region.bottom.to_f32()
                    );
                }
            }
        } else if let Some(bitmap) = bitmap {
            let tolerance = heuristics
                .tolerance_cap
                .min(usable * heuristics.tolerance_fraction);
            if let Some(found) =
                find_whitespace_break(bitmap, tentative - tolerance, tentative, heuristics)
            {
                chosen = found;
            }
        }

        // Forward progress: a correction that leaves less than one minimum
        // slice since the previous break is discarded.
        if chosen - processed < heuristics.min_slice_height {
            chosen = tentative;
        }

        offsets.push(chosen);
        processed = chosen;
        page += 1;
    }

    debug!(
        "planned {} pages over {:.1}mm",
        offsets.len(),
        total_height.to_f32()
    );
    Ok(BreakPlan { offsets })
}
