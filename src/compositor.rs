use crate::bitmap::BitmapImage;
use crate::error::ExportError;
use crate::planner::BreakPlan;
use crate::types::{Mm, PageLayout};
use crate::writer::DocumentWriter;
use log::debug;

// One realized BreakPlan entry: the instruction to copy one bitmap
// rectangle onto one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice {
    pub src_y_px: u32,
    pub src_height_px: u32,
    pub dest_x: Mm,
    pub dest_y: Mm,
    pub dest_width: Mm,
    pub dest_height: Mm,
}

// The last slice always extends to the bottom bitmap row, so rounding
// never drops pixels.
pub fn plan_slices(bitmap: &BitmapImage, plan: &BreakPlan, layout: &PageLayout) -> Vec<PageSlice> {
    let page_count = plan.page_count();
    let mut slices = Vec::with_capacity(page_count);
    for (index, (start, end)) in plan.page_spans().enumerate() {
        let page_number = index + 1;
        let y0 = bitmap.row_at(start).min(bitmap.height_px() - 1);
        let y1 = if page_number == page_count {
            bitmap.height_px()
        } else {
            bitmap.row_at(end)
        };
        let src_height = y1.saturating_sub(y0).max(1);
        let dest_height = Mm::from_f32(src_height as f32 / bitmap.scale());
        slices.push(PageSlice {
            src_y_px: y0,
            src_height_px: src_height,
            dest_x: layout.margin,
            dest_y: layout.content_top(page_number),
            dest_width: layout.content_width(),
            dest_height,
        });
    }
    slices
}

// The writer's current page must be page 1; one page is added per further
// slice.
pub fn compose(
    bitmap: &BitmapImage,
    slices: &[PageSlice],
    writer: &mut dyn DocumentWriter,
) -> Result<(), ExportError> {
    for (index, slice) in slices.iter().enumerate() {
        if index > 0 {
            writer.add_page();
        }
        let band = bitmap.crop_rows(slice.src_y_px, slice.src_height_px);
        debug!(
            "page {}: placing rows {}..{} at {:.1}mm",
            index + 1,
            slice.src_y_px,
            slice.src_y_px + slice.src_height_px,
            slice.dest_y.to_f32()
        );
        writer.place_image(
            &band,
            slice.dest_x,
            slice.dest_y,
            slice.dest_width,
            slice.dest_height,
        )?;
    }
    Ok(())
}
