//! Bounding box operations, IoU and centroid affinity

use ndarray::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size floor for the proximity normalization denominator, so very small
/// boxes are not over-penalized for the same pixel displacement.
const PROXIMITY_SIZE_FLOOR: f32 = 100.0;

/// Axis-aligned rectangle in source-frame pixel coordinates.
///
/// Stored as top-left corner plus extent; `w` and `h` are non-negative for
/// any box that reaches the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bbox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn width(&self) -> f32 {
        self.w
    }

    pub fn height(&self) -> f32 {
        self.h
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Point containment, inclusive on all four edges.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Same box shifted by `(dx, dy)`, size unchanged.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            w: self.w,
            h: self.h,
        }
    }

    /// All four fields are finite and the extent is non-negative.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.w.is_finite()
            && self.h.is_finite()
            && self.w >= 0.0
            && self.h >= 0.0
    }
}

impl fmt::Display for Bbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bbox({}, {}, {}x{})", self.x, self.y, self.w, self.h)
    }
}

/// Calculate IoU between two bounding boxes.
///
/// Disjoint boxes score 0; a degenerate union (two zero-area boxes) is
/// defined as 0 rather than NaN.
pub fn iou(a: &Bbox, b: &Bbox) -> f32 {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = a.right().min(b.right());
    let y2 = a.bottom().min(b.bottom());

    if x2 <= x1 || y2 <= y1 {
        return 0.0;
    }

    let intersection = (x2 - x1) * (y2 - y1);
    let union = a.area() + b.area() - intersection;

    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}

/// Centroid proximity score between a predicted track box and a detection.
///
/// Euclidean center distance normalized by twice the larger side of the
/// predicted box (floored at `PROXIMITY_SIZE_FLOOR`), mapped to [0, 1]:
/// 1.0 for identical centers, 0.0 once the distance exceeds the
/// normalization span.
pub fn centroid_affinity(predicted: &Bbox, detection: &Bbox) -> f32 {
    let dx = predicted.center_x() - detection.center_x();
    let dy = predicted.center_y() - detection.center_y();
    let distance = (dx * dx + dy * dy).sqrt();

    let denom = predicted.w.max(predicted.h).max(PROXIMITY_SIZE_FLOOR) * 2.0;
    (1.0 - distance / denom).max(0.0)
}

/// Compute the combined affinity matrix between predicted track boxes and
/// detection boxes with parallel processing.
///
/// Returns a `(n_tracks, n_detections)` matrix where each entry is
/// `iou_weight * IoU + proximity_weight * centroid affinity`.
pub fn affinity_matrix(
    predicted: &[Bbox],
    detections: &[Bbox],
    iou_weight: f32,
    proximity_weight: f32,
) -> anyhow::Result<Array2<f32>> {
    let n_tracks = predicted.len();
    let n_dets = detections.len();

    if n_tracks == 0 || n_dets == 0 {
        return Ok(Array2::zeros((n_tracks, n_dets)));
    }

    let data: Vec<f32> = predicted
        .par_iter()
        .flat_map(|track_box| {
            detections
                .iter()
                .map(|det_box| {
                    iou_weight * iou(track_box, det_box)
                        + proximity_weight * centroid_affinity(track_box, det_box)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    Array2::from_shape_vec((n_tracks, n_dets), data)
        .map_err(|e| anyhow::anyhow!("affinity matrix shape error: {e}"))
}
