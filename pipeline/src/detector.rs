//! Unified detector interface
//!
//! The pipeline works with any object detector as long as it implements
//! this trait; inference itself lives outside this crate.

use crate::error::Result;
use crate::types::{FrameData, RawDetection};
use std::collections::VecDeque;

/// Common interface for object detectors.
pub trait Detector: Send {
    /// Detect objects in a single frame.
    fn detect(&mut self, frame: &FrameData) -> Result<Vec<RawDetection>>;

    /// Detector name for logging.
    fn name(&self) -> &str;
}

/// Scripted detector for tests and demos: replays a fixed per-frame sequence
/// of detection lists (or injected failures), then returns empty frames.
#[derive(Debug, Default)]
pub struct StubDetector {
    script: VecDeque<std::result::Result<Vec<RawDetection>, String>>,
}

impl StubDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one frame's worth of detections.
    pub fn push_frame(&mut self, detections: Vec<RawDetection>) -> &mut Self {
        self.script.push_back(Ok(detections));
        self
    }

    /// Queue a detector failure for one frame.
    pub fn push_failure(&mut self, message: impl Into<String>) -> &mut Self {
        self.script.push_back(Err(message.into()));
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Detector for StubDetector {
    fn detect(&mut self, _frame: &FrameData) -> Result<Vec<RawDetection>> {
        match self.script.pop_front() {
            Some(Ok(detections)) => Ok(detections),
            Some(Err(message)) => Err(crate::error::PipelineError::Detector(message)),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelFormat;
    use greedytrack::Bbox;

    fn frame() -> FrameData {
        FrameData::new(vec![0u8; 4 * 4 * 3], 4, 4, PixelFormat::Rgb)
    }

    #[test]
    fn test_stub_replays_script_then_goes_quiet() {
        let mut stub = StubDetector::new();
        stub.push_frame(vec![RawDetection::person(
            Bbox::new(0.0, 0.0, 10.0, 10.0),
            0.9,
        )]);

        assert_eq!(stub.detect(&frame()).unwrap().len(), 1);
        assert!(stub.detect(&frame()).unwrap().is_empty());
        assert_eq!(stub.remaining(), 0);
    }

    #[test]
    fn test_stub_failure_injection() {
        let mut stub = StubDetector::new();
        stub.push_failure("inference backend unavailable");
        assert!(stub.detect(&frame()).is_err());
    }
}
