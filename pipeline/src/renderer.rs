//! Renderer contract
//!
//! The compositing step is an external collaborator; this crate only fixes
//! the interface it must satisfy.

use crate::error::Result;
use crate::types::FrameData;
use greedytrack::Track;

/// Contract for the output compositor.
///
/// Given the current frame, the full track list and an optional selected
/// id, an implementation must render the whole frame blurred and then, if
/// the selected id matches a track present in the list, composite that
/// track's rectangle region unblurred, using the tracker rectangle directly
/// (no smoothing or interpolation).
pub trait Renderer: Send {
    fn render(&mut self, frame: &FrameData, tracks: &[Track], selected: Option<u32>) -> Result<()>;
}

/// Renderer that discards everything; useful for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(
        &mut self,
        _frame: &FrameData,
        _tracks: &[Track],
        _selected: Option<u32>,
    ) -> Result<()> {
        Ok(())
    }
}
