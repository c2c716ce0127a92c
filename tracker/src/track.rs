//! Persistent track state and per-frame detections

use crate::bbox::Bbox;
use serde::{Deserialize, Serialize};

/// One detected bounding box for the current frame, already filtered to the
/// class of interest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: Bbox,
    /// Detector confidence in [0, 1]
    pub score: f32,
}

impl Detection {
    pub fn new(bbox: Bbox, score: f32) -> Self {
        Self { bbox, score }
    }

    /// Well-formed geometry and a score inside [0, 1].
    pub fn is_valid(&self) -> bool {
        self.bbox.is_valid() && self.score.is_finite() && (0.0..=1.0).contains(&self.score)
    }
}

/// A persistent identity for one subject across frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique for the lifetime of the engine instance, never reused
    pub id: u32,
    /// Detector-confirmed this frame, or motion-predicted while unmatched
    pub bbox: Bbox,
    /// Last confirmed detection confidence (stale while unmatched)
    pub score: f32,
    /// Consecutive frames since the last confirmed match
    pub age: u32,
    /// Per-frame displacement (dx, dy), updated only on confirmed matches
    pub velocity: (f32, f32),
}

impl Track {
    /// New track born from an unmatched detection.
    pub fn spawn(id: u32, detection: &Detection) -> Self {
        Self {
            id,
            bbox: detection.bbox,
            score: detection.score,
            age: 0,
            velocity: (0.0, 0.0),
        }
    }

    /// Rectangle advanced one frame along the current velocity, size
    /// unchanged. Used for association instead of the stale position.
    pub fn predicted(&self) -> Bbox {
        self.bbox.translated(self.velocity.0, self.velocity.1)
    }

    /// Apply a confirmed match. Velocity is the displacement from the
    /// pre-update position, not from the prediction.
    pub fn confirm(&mut self, detection: &Detection) {
        self.velocity = (
            detection.bbox.x - self.bbox.x,
            detection.bbox.y - self.bbox.y,
        );
        self.bbox = detection.bbox;
        self.score = detection.score;
        self.age = 0;
    }

    /// Age one frame without a match, coasting on the last known motion.
    pub fn coast(&mut self) {
        self.age += 1;
        self.bbox = self.predicted();
    }
}
