//! Person focus-lock pipeline
//!
//! Glues an external object detector to the `greedytrack` engine and keeps a
//! click-selected subject "locked on" across frames: per frame, detections
//! are filtered to persons, associated to persistent tracks, and the
//! selected track's rectangle is handed to a renderer that blurs everything
//! else. Detection inference and compositing stay outside this crate, behind
//! the `Detector` and `Renderer` traits.

pub mod config;
pub mod detector;
pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod types;

pub use config::PipelineConfig;
pub use detector::{Detector, StubDetector};
pub use error::{PipelineError, Result};
pub use pipeline::FocusPipeline;
pub use renderer::{NullRenderer, Renderer};
pub use types::{FrameData, PixelFormat, RawDetection, PERSON_LABEL};

// Re-export the core tracking types so callers only need one crate.
pub use greedytrack::{Bbox, Detection, Track, TrackerConfig};

/// Library version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
