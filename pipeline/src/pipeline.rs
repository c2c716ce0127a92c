//! Per-frame driver: detect, filter, track, maintain the selection
//!
//! Drives one full step per input frame: ask the detector for boxes, keep
//! the person detections above the confidence floor, feed them to the
//! tracker, and keep the click-selected id consistent with the surviving
//! track set. Rendering consumes the returned snapshot plus `selected_id`.

use crate::config::PipelineConfig;
use crate::detector::Detector;
use crate::error::{PipelineError, Result};
use crate::types::FrameData;
use greedytrack::{find_person_at_point, Detection, GreedyTracker, Track};

/// Focus-lock pipeline state.
pub struct FocusPipeline {
    detector: Box<dyn Detector>,
    tracker: GreedyTracker,
    config: PipelineConfig,
    selected_id: Option<u32>,
    frame_index: u64,
}

impl FocusPipeline {
    pub fn new(config: PipelineConfig, detector: Box<dyn Detector>) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Focus pipeline created: detector={}, match_threshold={:.3}, max_age={}",
            detector.name(),
            config.tracker.match_threshold,
            config.tracker.max_age
        );
        Ok(Self {
            tracker: GreedyTracker::new(config.tracker),
            detector,
            config,
            selected_id: None,
            frame_index: 0,
        })
    }

    /// Run one tracking step on a frame and return the track snapshot.
    ///
    /// A detector failure is downgraded to "zero detections this frame":
    /// every track ages by one and eviction proceeds normally, which keeps
    /// the lock coasting through transient inference hiccups.
    pub fn process_frame(&mut self, frame: &FrameData) -> Result<Vec<Track>> {
        if !frame.validate() {
            return Err(PipelineError::invalid_frame(format!(
                "{}x{} buffer of {} bytes does not match format",
                frame.width,
                frame.height,
                frame.data.len()
            )));
        }
        self.frame_index += 1;

        let raw = match self.detector.detect(frame) {
            Ok(detections) => detections,
            Err(e) => {
                log::warn!(
                    "Detector {} failed on frame {}: {e}; treating as empty frame",
                    self.detector.name(),
                    self.frame_index
                );
                Vec::new()
            }
        };

        let total = raw.len();
        let persons: Vec<Detection> = raw
            .into_iter()
            .filter(|d| d.label == self.config.person_label && d.score >= self.config.min_confidence)
            .map(|d| d.into_detection())
            .collect();
        log::debug!(
            "Frame {}: {} detections, {} persons kept",
            self.frame_index,
            total,
            persons.len()
        );

        let tracks = self
            .tracker
            .update(&persons)
            .map_err(|e| PipelineError::Tracker(e.to_string()))?;

        if let Some(id) = self.selected_id {
            if !tracks.iter().any(|t| t.id == id) {
                log::info!("Selected track {id} was evicted; clearing selection");
                self.selected_id = None;
            }
        }

        Ok(tracks)
    }

    /// Handle a click at canvas coordinates: select the track under the
    /// point, or clear the selection when the click hits nothing.
    pub fn select_at(&mut self, x: f32, y: f32) -> Option<u32> {
        let hit = find_person_at_point(
            self.tracker.tracked(),
            x,
            y,
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.video_width,
            self.config.video_height,
        )
        .map(|t| t.id);

        match hit {
            Some(id) => log::debug!("Click at ({x:.1}, {y:.1}) selected track {id}"),
            None => log::debug!("Click at ({x:.1}, {y:.1}) hit no track"),
        }
        self.selected_id = hit;
        hit
    }

    /// Currently selected track id, if any.
    pub fn selected_id(&self) -> Option<u32> {
        self.selected_id
    }

    /// Snapshot of the selected track, if it is still live.
    pub fn selected_track(&self) -> Option<Track> {
        let id = self.selected_id?;
        self.tracker.tracked().iter().find(|t| t.id == id).copied()
    }

    /// Read-only view of the current track set.
    pub fn tracked(&self) -> &[Track] {
        self.tracker.tracked()
    }

    /// Clear tracker state and selection. Call when the input source
    /// changes (camera stopped, new file loaded).
    pub fn reset(&mut self) {
        log::info!("Pipeline reset after {} frames", self.frame_index);
        self.tracker.reset();
        self.selected_id = None;
        self.frame_index = 0;
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
