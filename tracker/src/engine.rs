//! Frame-to-frame association and track lifecycle engine

use crate::assoc::GreedySolver;
use crate::bbox::affinity_matrix;
use crate::track::{Detection, Track};

/// Construction-time tracker parameters.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackerConfig {
    /// Minimum combined affinity for a candidate pair to be considered;
    /// pairs at or below are discarded entirely
    pub match_threshold: f32,
    /// Consecutive unmatched frames after which a track is evicted
    pub max_age: u32,
    /// Weight of IoU in the combined affinity
    pub iou_weight: f32,
    /// Weight of centroid proximity in the combined affinity
    pub proximity_weight: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.1,
            max_age: 15,
            iou_weight: 0.6,
            proximity_weight: 0.4,
        }
    }
}

/// Common interface for per-frame box trackers.
///
/// The greedy implementation below is the default; an optimal-assignment
/// tracker can be substituted behind this trait without changing the data
/// model.
pub trait ObjectTracker: Send {
    /// Consume one frame's detections, return a snapshot of the track set.
    fn update(&mut self, detections: &[Detection]) -> anyhow::Result<Vec<Track>>;

    /// Drop all tracks and restart the id counter.
    fn reset(&mut self);

    /// Read-only view of the current track set.
    fn tracked(&self) -> &[Track];

    /// Number of live tracks.
    fn num_tracks(&self) -> usize;
}

/// Multi-person tracker with greedy IoU + centroid association.
///
/// Owns the track set exclusively; `update` returns cloned snapshots, so
/// callers never observe in-place mutation between frames. Single-threaded
/// by contract: one `update` call is exactly one time-step.
#[derive(Debug, Clone)]
pub struct GreedyTracker {
    config: TrackerConfig,
    tracks: Vec<Track>,
    next_track_id: u32,
}

impl GreedyTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            tracks: Vec::new(),
            next_track_id: 1,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn spawn_track(&mut self, detection: &Detection) {
        self.tracks.push(Track::spawn(self.next_track_id, detection));
        self.next_track_id += 1;
    }

    fn snapshot(&self) -> Vec<Track> {
        self.tracks.clone()
    }

    /// Consume one frame's detections and return the updated track set.
    ///
    /// Detections with non-finite coordinates, negative extent or a score
    /// outside [0, 1] are skipped before scoring. An empty slice is a normal
    /// frame: every track ages by one and eviction proceeds as usual.
    pub fn update(&mut self, detections: &[Detection]) -> anyhow::Result<Vec<Track>> {
        let detections: Vec<Detection> = detections
            .iter()
            .filter(|d| d.is_valid())
            .copied()
            .collect();

        // First frame: no association work, one track per detection.
        if self.tracks.is_empty() {
            for det in &detections {
                self.spawn_track(det);
            }
            return Ok(self.snapshot());
        }

        let predicted: Vec<_> = self.tracks.iter().map(Track::predicted).collect();
        let det_boxes: Vec<_> = detections.iter().map(|d| d.bbox).collect();

        let affinities = affinity_matrix(
            &predicted,
            &det_boxes,
            self.config.iou_weight,
            self.config.proximity_weight,
        )?;
        let assignment = GreedySolver::solve(affinities.view(), self.config.match_threshold);

        for &(track_idx, det_idx) in &assignment.matches {
            self.tracks[track_idx].confirm(&detections[det_idx]);
        }
        for &track_idx in &assignment.unmatched_tracks {
            self.tracks[track_idx].coast();
        }

        let max_age = self.config.max_age;
        self.tracks.retain(|t| t.age < max_age);

        for &det_idx in &assignment.unmatched_detections {
            self.spawn_track(&detections[det_idx]);
        }

        Ok(self.snapshot())
    }

    /// Clear all tracks and reset the id counter. Used when the input source
    /// changes (camera stopped, new file loaded).
    pub fn reset(&mut self) {
        self.tracks.clear();
        self.next_track_id = 1;
    }

    /// Read-only accessor to the current track set.
    pub fn tracked(&self) -> &[Track] {
        &self.tracks
    }

    pub fn num_tracks(&self) -> usize {
        self.tracks.len()
    }
}

impl Default for GreedyTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl ObjectTracker for GreedyTracker {
    fn update(&mut self, detections: &[Detection]) -> anyhow::Result<Vec<Track>> {
        self.update(detections)
    }

    fn reset(&mut self) {
        self.reset()
    }

    fn tracked(&self) -> &[Track] {
        self.tracked()
    }

    fn num_tracks(&self) -> usize {
        self.num_tracks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::Bbox;
    use approx::assert_abs_diff_eq;

    fn det(x: f32, y: f32, w: f32, h: f32, score: f32) -> Detection {
        Detection::new(Bbox::new(x, y, w, h), score)
    }

    #[test]
    fn test_bootstrap_frame() {
        let mut tracker = GreedyTracker::default();
        let tracks = tracker
            .update(&[
                det(10.0, 10.0, 50.0, 50.0, 0.9),
                det(200.0, 200.0, 40.0, 40.0, 0.8),
                det(400.0, 50.0, 30.0, 60.0, 0.7),
            ])
            .unwrap();

        assert_eq!(tracks.len(), 3);
        for (i, track) in tracks.iter().enumerate() {
            assert_eq!(track.id, i as u32 + 1);
            assert_eq!(track.age, 0);
            assert_eq!(track.velocity, (0.0, 0.0));
        }
    }

    #[test]
    fn test_perfect_match_stability() {
        let mut tracker = GreedyTracker::default();
        let detection = det(10.0, 10.0, 50.0, 50.0, 0.9);

        for _ in 0..5 {
            let tracks = tracker.update(&[detection]).unwrap();
            assert_eq!(tracks.len(), 1);
            assert_eq!(tracks[0].id, 1);
            assert_eq!(tracks[0].age, 0);
        }
    }

    #[test]
    fn test_moving_target_keeps_identity() {
        let mut tracker = GreedyTracker::default();
        for frame in 0..10 {
            let x = 10.0 + frame as f32 * 8.0;
            let tracks = tracker.update(&[det(x, 10.0, 50.0, 50.0, 0.9)]).unwrap();
            assert_eq!(tracks.len(), 1);
            assert_eq!(tracks[0].id, 1);
        }
        // Steady rightward motion is reflected in the velocity estimate.
        let track = tracker.tracked()[0];
        assert_abs_diff_eq!(track.velocity.0, 8.0, epsilon = 1e-4);
        assert_abs_diff_eq!(track.velocity.1, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_occlusion_short_gap_preserves_id() {
        let mut tracker = GreedyTracker::default();
        let detection = det(100.0, 100.0, 60.0, 120.0, 0.85);
        tracker.update(&[detection]).unwrap();

        for gap_frame in 1..=5u32 {
            let tracks = tracker.update(&[]).unwrap();
            assert_eq!(tracks.len(), 1);
            assert_eq!(tracks[0].age, gap_frame);
        }

        let tracks = tracker.update(&[detection]).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, 1);
        assert_eq!(tracks[0].age, 0);
    }

    #[test]
    fn test_occlusion_long_gap_evicts_and_respawns() {
        let mut tracker = GreedyTracker::default();
        let detection = det(100.0, 100.0, 60.0, 120.0, 0.85);
        tracker.update(&[detection]).unwrap();

        // A stationary track hits age 15 on the 15th empty frame and is gone.
        for _ in 0..15 {
            tracker.update(&[]).unwrap();
        }
        assert_eq!(tracker.num_tracks(), 0);

        let tracks = tracker.update(&[detection]).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, 2);
    }

    #[test]
    fn test_coasting_follows_velocity_through_gap() {
        let mut tracker = GreedyTracker::default();
        tracker.update(&[det(10.0, 10.0, 50.0, 50.0, 0.9)]).unwrap();
        tracker.update(&[det(20.0, 10.0, 50.0, 50.0, 0.9)]).unwrap();

        // Two empty frames: position keeps advancing by (10, 0) per frame.
        tracker.update(&[]).unwrap();
        let tracks = tracker.update(&[]).unwrap();
        assert_abs_diff_eq!(tracks[0].bbox.x, 40.0, epsilon = 1e-4);
        assert_eq!(tracks[0].age, 2);

        // The detection reappears where coasting predicted it.
        let tracks = tracker.update(&[det(50.0, 10.0, 50.0, 50.0, 0.9)]).unwrap();
        assert_eq!(tracks[0].id, 1);
        assert_eq!(tracks[0].age, 0);
    }

    #[test]
    fn test_non_overlapping_detections_spawn_distinct_tracks() {
        let mut tracker = GreedyTracker::default();
        let tracks = tracker
            .update(&[
                det(0.0, 0.0, 40.0, 40.0, 0.9),
                det(2000.0, 2000.0, 40.0, 40.0, 0.9),
            ])
            .unwrap();

        assert_eq!(tracks.len(), 2);
        assert_ne!(tracks[0].id, tracks[1].id);
    }

    #[test]
    fn test_ids_monotonic_never_reused() {
        let mut tracker = GreedyTracker::new(TrackerConfig {
            max_age: 2,
            ..TrackerConfig::default()
        });

        let mut seen = Vec::new();
        for burst in 0..4 {
            // A fresh subject appears far from all previous ones, lives for
            // one frame, then disappears long enough to be evicted.
            let x = burst as f32 * 5000.0;
            let tracks = tracker.update(&[det(x, 0.0, 40.0, 40.0, 0.9)]).unwrap();
            for t in &tracks {
                if !seen.contains(&t.id) {
                    seen.push(t.id);
                }
            }
            tracker.update(&[]).unwrap();
            tracker.update(&[]).unwrap();
        }

        let mut sorted = seen.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(seen, sorted, "ids must be distinct and strictly increasing");
    }

    #[test]
    fn test_greedy_tie_is_deterministic() {
        // Two identical tracks and two identical detections: all candidate
        // scores are equal, so enumeration order decides.
        let expected = {
            let mut tracker = GreedyTracker::default();
            tracker
                .update(&[
                    det(10.0, 10.0, 50.0, 50.0, 0.9),
                    det(10.0, 10.0, 50.0, 50.0, 0.9),
                ])
                .unwrap();
            tracker
                .update(&[
                    det(10.0, 10.0, 50.0, 50.0, 0.9),
                    det(10.0, 10.0, 50.0, 50.0, 0.9),
                ])
                .unwrap()
        };

        for _ in 0..5 {
            let mut tracker = GreedyTracker::default();
            tracker
                .update(&[
                    det(10.0, 10.0, 50.0, 50.0, 0.9),
                    det(10.0, 10.0, 50.0, 50.0, 0.9),
                ])
                .unwrap();
            let tracks = tracker
                .update(&[
                    det(10.0, 10.0, 50.0, 50.0, 0.9),
                    det(10.0, 10.0, 50.0, 50.0, 0.9),
                ])
                .unwrap();
            assert_eq!(tracks, expected);
        }

        // Both tracks matched, nobody aged or respawned.
        assert_eq!(expected.len(), 2);
        assert!(expected.iter().all(|t| t.age == 0));
        assert_eq!(expected[0].id, 1);
        assert_eq!(expected[1].id, 2);
    }

    #[test]
    fn test_low_affinity_detection_spawns_instead_of_matching() {
        let mut tracker = GreedyTracker::default();
        tracker.update(&[det(0.0, 0.0, 40.0, 40.0, 0.9)]).unwrap();

        // Far outside both IoU range and the proximity cutoff.
        let tracks = tracker.update(&[det(3000.0, 3000.0, 40.0, 40.0, 0.9)]).unwrap();
        assert_eq!(tracks.len(), 2);

        let old = tracks.iter().find(|t| t.id == 1).unwrap();
        let new = tracks.iter().find(|t| t.id == 2).unwrap();
        assert_eq!(old.age, 1);
        assert_eq!(new.age, 0);
    }

    #[test]
    fn test_reset_restarts_id_counter() {
        let mut tracker = GreedyTracker::default();
        tracker
            .update(&[det(0.0, 0.0, 40.0, 40.0, 0.9), det(100.0, 300.0, 40.0, 40.0, 0.9)])
            .unwrap();
        tracker.update(&[det(500.0, 900.0, 40.0, 40.0, 0.9)]).unwrap();

        tracker.reset();
        assert_eq!(tracker.num_tracks(), 0);

        let tracks = tracker.update(&[det(0.0, 0.0, 40.0, 40.0, 0.9)]).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, 1);
    }

    #[test]
    fn test_degenerate_detections_are_skipped() {
        let mut tracker = GreedyTracker::default();
        let tracks = tracker
            .update(&[
                det(f32::NAN, 0.0, 40.0, 40.0, 0.9),
                det(0.0, 0.0, -5.0, 40.0, 0.9),
                det(0.0, 0.0, 40.0, 40.0, 1.5),
                det(10.0, 10.0, 50.0, 50.0, 0.9),
            ])
            .unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, 1);
        assert_abs_diff_eq!(tracks[0].bbox.x, 10.0);
    }

    #[test]
    fn test_stale_score_kept_while_unmatched() {
        let mut tracker = GreedyTracker::default();
        tracker.update(&[det(10.0, 10.0, 50.0, 50.0, 0.77)]).unwrap();
        let tracks = tracker.update(&[]).unwrap();
        assert_abs_diff_eq!(tracks[0].score, 0.77);
    }

    #[test]
    fn test_snapshot_is_detached_from_engine_state() {
        let mut tracker = GreedyTracker::default();
        let snapshot = tracker.update(&[det(10.0, 10.0, 50.0, 50.0, 0.9)]).unwrap();

        tracker.update(&[det(30.0, 30.0, 50.0, 50.0, 0.9)]).unwrap();
        // Earlier snapshot still holds the old rectangle.
        assert_abs_diff_eq!(snapshot[0].bbox.x, 10.0);
    }

    #[test]
    fn test_trait_object_usage() {
        let mut tracker: Box<dyn ObjectTracker> = Box::new(GreedyTracker::default());
        tracker.update(&[det(10.0, 10.0, 50.0, 50.0, 0.9)]).unwrap();
        assert_eq!(tracker.num_tracks(), 1);
        tracker.reset();
        assert_eq!(tracker.num_tracks(), 0);
    }

    #[test]
    fn test_two_subjects_crossing_keep_best_assignment() {
        let mut tracker = GreedyTracker::default();
        tracker
            .update(&[det(0.0, 100.0, 50.0, 100.0, 0.9), det(400.0, 100.0, 50.0, 100.0, 0.9)])
            .unwrap();

        // Both walk toward each other; each detection stays closest to its
        // own track's prediction, so identities are preserved.
        for frame in 1..=8 {
            let left_x = frame as f32 * 10.0;
            let right_x = 400.0 - frame as f32 * 10.0;
            let tracks = tracker
                .update(&[
                    det(left_x, 100.0, 50.0, 100.0, 0.9),
                    det(right_x, 100.0, 50.0, 100.0, 0.9),
                ])
                .unwrap();
            assert_eq!(tracks.len(), 2);
        }

        let ids: Vec<u32> = tracker.tracked().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
