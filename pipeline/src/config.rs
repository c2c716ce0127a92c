//! Pipeline configuration

use crate::error::{PipelineError, Result};
use greedytrack::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the focus-lock pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Tracker engine parameters
    pub tracker: TrackerConfig,

    /// Minimum detector confidence for a detection to reach the tracker
    pub min_confidence: f32,

    /// Class label kept for tracking; everything else is dropped
    pub person_label: String,

    /// Display canvas size in pixels (click coordinates arrive in this space)
    pub canvas_width: f32,
    pub canvas_height: f32,

    /// Source video size in pixels (tracks live in this space)
    pub video_width: f32,
    pub video_height: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            min_confidence: 0.3,
            person_label: crate::types::PERSON_LABEL.to_string(),
            canvas_width: 640.0,
            canvas_height: 360.0,
            video_width: 1280.0,
            video_height: 720.0,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(PipelineError::config(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        if !(0.0..=1.0).contains(&self.tracker.match_threshold) {
            return Err(PipelineError::config(format!(
                "match_threshold must be in [0, 1], got {}",
                self.tracker.match_threshold
            )));
        }
        if self.tracker.max_age == 0 {
            return Err(PipelineError::config("max_age must be at least 1"));
        }
        if self.tracker.iou_weight < 0.0 || self.tracker.proximity_weight < 0.0 {
            return Err(PipelineError::config("affinity weights must be non-negative"));
        }
        for (name, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("video_width", self.video_width),
            ("video_height", self.video_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PipelineError::config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.person_label.is_empty() {
            return Err(PipelineError::config("person_label must not be empty"));
        }
        Ok(())
    }
}
