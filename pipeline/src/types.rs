//! Boundary type definitions for the focus-lock pipeline

use greedytrack::{Bbox, Detection};
use serde::{Deserialize, Serialize};

/// Class label the tracker cares about; everything else is filtered out
/// before reaching the engine.
pub const PERSON_LABEL: &str = "person";

/// One raw detector output: box, confidence and class label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Rectangle in source-frame pixel coordinates
    pub bbox: Bbox,
    /// Confidence score in [0, 1]
    pub score: f32,
    /// Classification tag, e.g. "person", "car"
    pub label: String,
}

impl RawDetection {
    pub fn new(bbox: Bbox, score: f32, label: impl Into<String>) -> Self {
        Self {
            bbox,
            score,
            label: label.into(),
        }
    }

    pub fn person(bbox: Bbox, score: f32) -> Self {
        Self::new(bbox, score, PERSON_LABEL)
    }

    pub fn is_person(&self) -> bool {
        self.label == PERSON_LABEL
    }

    /// Strip the label for the tracking engine.
    pub fn into_detection(self) -> Detection {
        Detection::new(self.bbox, self.score)
    }
}

/// Pixel format of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Rgb,
    Bgr,
    Rgba,
    Bgra,
    Grayscale,
}

/// One video frame handed through the pipeline. The pipeline itself never
/// inspects pixel content; only the detector and renderer do.
#[derive(Debug, Clone)]
pub struct FrameData {
    /// Raw pixel data
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel layout of `data`
    pub format: PixelFormat,
}

impl FrameData {
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
        }
    }

    /// Number of channels implied by the pixel format.
    pub fn channels(&self) -> u32 {
        match self.format {
            PixelFormat::Rgb | PixelFormat::Bgr => 3,
            PixelFormat::Rgba | PixelFormat::Bgra => 4,
            PixelFormat::Grayscale => 1,
        }
    }

    /// Buffer length matches the declared dimensions. Widened arithmetic so
    /// absurd declared dimensions fail the check instead of overflowing.
    pub fn validate(&self) -> bool {
        let expected =
            (self.width as usize) * (self.height as usize) * (self.channels() as usize);
        self.data.len() == expected
    }
}
