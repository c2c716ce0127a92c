//! Greedy detection-to-track assignment
//!
//! Commits the highest-affinity available pair first and never backtracks.
//! This trades global optimality (Hungarian assignment) for simplicity; the
//! tie-breaking order below is part of the observable contract.

use ndarray::ArrayView2;

/// Result of an assignment pass.
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    /// Committed pairs as (track_idx, detection_idx)
    pub matches: Vec<(usize, usize)>,
    /// Indices of tracks left without a detection
    pub unmatched_tracks: Vec<usize>,
    /// Indices of detections left without a track
    pub unmatched_detections: Vec<usize>,
}

/// Greedy assignment solver.
pub struct GreedySolver;

impl GreedySolver {
    /// Solve the assignment over a `(n_tracks, n_detections)` affinity matrix.
    ///
    /// Only pairs whose affinity strictly exceeds `threshold` are candidates;
    /// pairs at or below it are never matched, even if nothing better exists.
    /// Candidates are sorted by affinity descending with a stable sort, so
    /// equal scores resolve in original enumeration order (track-major).
    /// Each track and each detection is committed at most once.
    pub fn solve(affinities: ArrayView2<f32>, threshold: f32) -> AssignmentResult {
        let n_tracks = affinities.nrows();
        let n_dets = affinities.ncols();

        let mut candidates: Vec<(usize, usize, f32)> = Vec::new();
        for track_idx in 0..n_tracks {
            for det_idx in 0..n_dets {
                let score = affinities[[track_idx, det_idx]];
                if score > threshold {
                    candidates.push((track_idx, det_idx, score));
                }
            }
        }

        // Stable: ties keep enumeration order.
        candidates.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

        let mut track_taken = vec![false; n_tracks];
        let mut det_taken = vec![false; n_dets];
        let mut matches = Vec::new();

        for (track_idx, det_idx, _score) in candidates {
            if !track_taken[track_idx] && !det_taken[det_idx] {
                track_taken[track_idx] = true;
                det_taken[det_idx] = true;
                matches.push((track_idx, det_idx));
            }
        }

        AssignmentResult {
            matches,
            unmatched_tracks: (0..n_tracks).filter(|&i| !track_taken[i]).collect(),
            unmatched_detections: (0..n_dets).filter(|&j| !det_taken[j]).collect(),
        }
    }
}
