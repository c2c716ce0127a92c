//! Point lookup against the current track set
//!
//! Resolves a click in display/canvas space to the track under it, scaling
//! the point into source-frame coordinates first.

use crate::track::Track;

/// Find the track whose rectangle contains the given canvas-space point.
///
/// The point is scaled by `video_w / canvas_w` and `video_h / canvas_h`
/// independently, then the tracks are scanned linearly; the first rectangle
/// containing the point (inclusive on all edges) wins, so scan order matters
/// when rectangles overlap. Returns `None` for an empty list, a miss, or a
/// non-positive canvas dimension.
pub fn find_person_at_point<'a>(
    tracks: &'a [Track],
    x: f32,
    y: f32,
    canvas_w: f32,
    canvas_h: f32,
    video_w: f32,
    video_h: f32,
) -> Option<&'a Track> {
    if canvas_w <= 0.0 || canvas_h <= 0.0 {
        return None;
    }

    let px = x * (video_w / canvas_w);
    let py = y * (video_h / canvas_h);

    tracks.iter().find(|track| track.bbox.contains(px, py))
}
