use crate::bitmap::BitmapImage;
use crate::types::Mm;
use log::debug;

// Named heuristic constants for break planning and whitespace scanning.
// Overridable so boundary behavior is testable.
#[derive(Debug, Clone)]
pub struct BreakHeuristics {
    // Row stride widens so at most this many rows are scored per window.
    pub max_sampled_rows: u32,
    // Every Nth column is sampled when scoring a row.
    pub column_stride: u32,
    // Max summed RGB distance between consecutive sampled pixels for the
    // pair to count as uniform.
    pub uniformity_distance: u32,
    // Channel floor for the near-white test, a proxy for blank margin on
    // the light capture background.
    pub near_white_min: u8,
    // Extra score per uniform pair landing on a near-white pixel.
    pub white_bonus: u32,
    // Minimum accepted row score as a fraction of the maximum attainable
    // score (a uniform near-white row), which grows with bitmap width.
    pub min_score_ratio: f32,
    // Whitespace search window: min(tolerance_cap, fraction * usable).
    pub tolerance_cap: Mm,
    pub tolerance_fraction: f32,
    // Forward-progress floor; a corrected break closer than this to the
    // previous one is discarded in favor of the tentative break.
    pub min_slice_height: Mm,
}

impl Default for BreakHeuristics {
    fn default() -> Self {
        Self {
            max_sampled_rows: 50,
            column_stride: 8,
            uniformity_distance: 30,
            near_white_min: 245,
            white_bonus: 2,
            min_score_ratio: 0.85,
            tolerance_cap: Mm::from_f32(30.0),
            tolerance_fraction: 0.15,
            min_slice_height: Mm::from_f32(12.0),
        }
    }
}

// Returns the document-space offset of the most uniform, lightest row in
// the window, or None when no row clears the minimum score. Rows are
// scanned from the window end backward, so ties keep the most content on
// the current page.
pub fn find_whitespace_break(
    bitmap: &BitmapImage,
    window_start: Mm,
    window_end: Mm,
    heuristics: &BreakHeuristics,
) -> Option<Mm> {
    let start_row = bitmap.row_at(window_start.max(Mm::ZERO));
    let end_row = bitmap
        .row_at(window_end)
        .min(bitmap.height_px().saturating_sub(1));
    if end_row <= start_row {
        return None;
    }

    let span = end_row - start_row;
    let stride = (span.div_ceil(heuristics.max_sampled_rows.max(1))).max(1);

    let mut best_row = None;
    let mut best_score = 0u32;
    let mut y = end_row;
    loop {
        let score = score_row(bitmap, y, heuristics);
        if score > best_score {
            best_score = score;
            best_row = Some(y);
        }
        if y <= start_row + stride {
            break;
        }
        y -= stride;
    }

    let sampled_columns = bitmap
        .width_px()
        .div_ceil(heuristics.column_stride.max(1))
        .max(2);
    let max_score = (sampled_columns - 1) * (1 + heuristics.white_bonus);
    let min_score = (max_score as f32 * heuristics.min_score_ratio).ceil() as u32;
    match best_row {
        Some(row) if best_score >= min_score => {
            debug!(
                "whitespace break at row {} (score {} >= {})",
                row, best_score, min_score
            );
            Some(bitmap.offset_at(row))
        }
        _ => {
            debug!(
                "no whitespace break in window (best {} < {})",
                best_score, min_score
            );
            None
        }
    }
}

fn score_row(bitmap: &BitmapImage, y: u32, heuristics: &BreakHeuristics) -> u32 {
    let stride = heuristics.column_stride.max(1);
    let mut score = 0u32;
    let mut prev: Option<[u8; 4]> = None;
    let mut x = 0u32;
    while x < bitmap.width_px() {
        let pixel = bitmap.pixel(x, y);
        if let Some(last) = prev {
            let distance = channel_distance(last, pixel);
            if distance <= heuristics.uniformity_distance {
                score += 1;
                if is_near_white(pixel, heuristics.near_white_min) {
                    score += heuristics.white_bonus;
                }
            }
        }
        prev = Some(pixel);
        x += stride;
    }
    score
}

fn channel_distance(a: [u8; 4], b: [u8; 4]) -> u32 {
    let dr = (a[0] as i32 - b[0] as i32).unsigned_abs();
    let dg = (a[1] as i32 - b[1] as i32).unsigned_abs();
    let db = (a[2] as i32 - b[2] as i32).unsigned_abs();
    dr + dg + db
}

fn is_near_white(pixel: [u8; 4], floor: u8) -> bool {
    pixel[0] >= floor && pixel[1] >= floor && pixel[2] >= floor
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn noisy_pixel(x: u32, y: u32) -> Rgba<u8> {
        // Deterministic dark noise; consecutive sampled columns always
        // differ by far more than the uniformity distance.
        let v = x.wrapping_mul(37).wrapping_add(y.wrapping_mul(101)) as u8;
        Rgba([v, 20, 120, 255])
    }

    fn bitmap_with_bands(height: u32, bands: &[(u32, u32)]) -> BitmapImage {
        let mut pixels = RgbaImage::new(320, height);
        for (x, y, pixel) in pixels.enumerate_pixels_mut() {
            let in_band = bands.iter().any(|&(top, bottom)| y >= top && y < bottom);
            *pixel = if in_band {
                Rgba([250, 250, 250, 255])
            } else {
                noisy_pixel(x, y)
            };
        }
        BitmapImage::new(pixels, 1.0).expect("bitmap")
    }

    fn mm(v: f32) -> Mm {
        Mm::from_f32(v)
    }

    #[test]
    fn finds_row_inside_uniform_light_band() {
        let bitmap = bitmap_with_bands(400, &[(200, 221)]);
        let found = find_whitespace_break(&bitmap, mm(50.0), mm(300.0), &Default::default())
            .expect("break");
        let row = found.to_f32();
        assert!((200.0..221.0).contains(&row), "row {} outside band", row);
    }

    #[test]
    fn noisy_window_returns_none() {
        let bitmap = bitmap_with_bands(400, &[]);
        assert_eq!(
            find_whitespace_break(&bitmap, mm(50.0), mm(300.0), &Default::default()),
            None
        );
    }

    #[test]
    fn ties_prefer_the_row_closest_to_the_window_end() {
        // Two identical bands; the lower one keeps more content on the
        // current page.
        let bitmap = bitmap_with_bands(400, &[(100, 121), (250, 271)]);
        let found = find_whitespace_break(&bitmap, mm(50.0), mm(320.0), &Default::default())
            .expect("break");
        let row = found.to_f32();
        assert!((250.0..271.0).contains(&row), "row {} not in lower band", row);
    }

    #[test]
    fn band_outside_window_is_not_considered() {
        let bitmap = bitmap_with_bands(400, &[(350, 380)]);
        assert_eq!(
            find_whitespace_break(&bitmap, mm(50.0), mm(300.0), &Default::default()),
            None
        );
    }

    #[test]
    fn empty_window_returns_none() {
        let bitmap = bitmap_with_bands(100, &[(0, 100)]);
        assert_eq!(
            find_whitespace_break(&bitmap, mm(80.0), mm(20.0), &Default::default()),
            None
        );
    }

    #[test]
    fn raising_min_score_ratio_rejects_partial_bands() {
        let mut pixels = RgbaImage::new(320, 100);
        for (x, y, pixel) in pixels.enumerate_pixels_mut() {
            // Left half blank, right half noise: roughly half the maximum
            // uniformity score.
            *pixel = if x < 160 {
                Rgba([250, 250, 250, 255])
            } else {
                noisy_pixel(x, y)
            };
        }
        let bitmap = BitmapImage::new(pixels, 1.0).expect("bitmap");
        let lenient = BreakHeuristics {
            min_score_ratio: 0.3,
            ..Default::default()
        };
        assert!(find_whitespace_break(&bitmap, mm(10.0), mm(90.0), &lenient).is_some());
        let strict = BreakHeuristics {
            min_score_ratio: 0.9,
            ..Default::default()
        };
        assert_eq!(find_whitespace_break(&bitmap, mm(10.0), mm(90.0), &strict), None);
    }
}
