//! Candidate extraction and dominant-area tile selection.

use callmap_common::config::DetectionConfig;
use callmap_model::ScreenRect;
use image::GrayImage;
use imageproc::contours::find_contours;

/// Bounding rectangles of every contour (outer borders and holes) in an
/// edge map.
pub fn candidate_rects(edges: &GrayImage) -> Vec<ScreenRect> {
    find_contours::<i32>(edges)
        .iter()
        .filter_map(|contour| ScreenRect::bounding(contour.points.iter().map(|p| (p.x, p.y))))
        .collect()
}

/// Thresholds for turning candidates into tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionParams {
    /// Candidates at least this wide are frame borders, not tiles.
    pub width_cap: u32,
    /// Accepted areas lie in `dominant - area_tolerance ..= dominant`.
    pub area_tolerance: u64,
    /// Max distance in both x and y at which a candidate duplicates the
    /// previously accepted one.
    pub dedup_distance: u32,
}

impl SelectionParams {
    pub fn new(config: &DetectionConfig, image_width: u32) -> Self {
        Self {
            width_cap: image_width.saturating_sub(config.width_margin),
            area_tolerance: config.area_tolerance,
            dedup_distance: config.dedup_distance,
        }
    }

    fn under_cap(&self, rect: &ScreenRect) -> bool {
        rect.width < self.width_cap
    }
}

/// Largest area among candidates narrower than the width cap, 0 when none
/// qualifies.
pub fn dominant_area(candidates: &[ScreenRect], params: &SelectionParams) -> u64 {
    candidates
        .iter()
        .filter(|r| params.under_cap(r))
        .map(ScreenRect::area)
        .max()
        .unwrap_or(0)
}

/// Pick tiles out of the candidates, in acceptance order.
///
/// Candidates are visited in descending `(x, y, width, height)` order. A
/// candidate is accepted when it is under the width cap, its area is within
/// tolerance of `dominant`, and it is not a near duplicate of the last
/// accepted one.
pub fn select_tiles(
    candidates: &[ScreenRect],
    dominant: u64,
    params: &SelectionParams,
) -> Vec<ScreenRect> {
    if dominant == 0 {
        return Vec::new();
    }

    let mut sorted = candidates.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let min_area = dominant.saturating_sub(params.area_tolerance);
    let mut accepted: Vec<ScreenRect> = Vec::new();
    for rect in sorted {
        let area = rect.area();
        if !params.under_cap(&rect) || area < min_area || area > dominant {
            continue;
        }
        if let Some(last) = accepted.last() {
            let near_x = rect.x.abs_diff(last.x) <= params.dedup_distance;
            let near_y = rect.y.abs_diff(last.y) <= params.dedup_distance;
            if near_x && near_y {
                tracing::trace!(%rect, previous = %last, "Dropping duplicate contour");
                continue;
            }
        }
        accepted.push(rect);
    }
    accepted
}
