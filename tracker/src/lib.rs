//! Greedy multi-person bounding box tracking
//!
//! This crate maintains stable identities for human detections across video
//! frames. Detections are associated to existing tracks with a combined
//! IoU + centroid-proximity affinity and a greedy assignment pass; tracks
//! coast on their last known velocity while temporarily undetected and are
//! evicted once they have been missing too long.
//!
//! ```rust,ignore
//! use greedytrack::{Bbox, Detection, GreedyTracker, TrackerConfig};
//!
//! let mut tracker = GreedyTracker::new(TrackerConfig::default());
//! let detections = vec![Detection::new(Bbox::new(10.0, 10.0, 50.0, 50.0), 0.9)];
//! let tracks = tracker.update(&detections)?;
//! ```

pub mod assoc;
pub mod bbox;
pub mod engine;
pub mod query;
pub mod track;

pub use assoc::{AssignmentResult, GreedySolver};
pub use bbox::Bbox;
pub use engine::{GreedyTracker, ObjectTracker, TrackerConfig};
pub use query::find_person_at_point;
pub use track::{Detection, Track};
