use anyhow::Result;
use tracing::{debug, info};

use crate::track::PaddedTrack;

/// Rendering capability. Implementations own the actual presentation layer.
pub trait Renderer {
    /// Move the strip so the slot at `index` is in view.
    fn set_offset(&mut self, index: usize, animated: bool) -> Result<()>;
    fn set_active_slide(&mut self, index: usize) -> Result<()>;
    fn set_active_indicator(&mut self, real_index: usize) -> Result<()>;
    fn set_indicators_visible(&mut self, visible: bool) -> Result<()>;
}

/// Horizontal offset for a physical slot, in the same unit as `slide_width`.
pub fn offset_for(index: usize, slide_width: f32) -> f32 {
    -(index as f32) * slide_width
}

/// Headless renderer that reports every update through `tracing`.
#[derive(Debug)]
pub struct TracingRenderer {
    track: PaddedTrack,
    slide_width: f32,
}

impl TracingRenderer {
    pub fn new(track: PaddedTrack, slide_width: f32) -> Self {
        Self { track, slide_width }
    }
}

impl Renderer for TracingRenderer {
    fn set_offset(&mut self, index: usize, animated: bool) -> Result<()> {
        let offset = offset_for(index, self.slide_width);
        debug!(index, animated, offset, "translate track");
        Ok(())
    }

    fn set_active_slide(&mut self, index: usize) -> Result<()> {
        let title = self.track.get(index).map(|s| s.title.as_str()).unwrap_or("");
        let clone = self.track.is_clone(index);
        info!(index, clone, title, "active slide");
        Ok(())
    }

    fn set_active_indicator(&mut self, real_index: usize) -> Result<()> {
        let dots: String = (0..self.track.real_len())
            .map(|i| if i == real_index { '●' } else { '○' })
            .collect();
        debug!(real_index, %dots, "indicators");
        Ok(())
    }

    fn set_indicators_visible(&mut self, visible: bool) -> Result<()> {
        debug!(visible, "indicator strip visibility");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_negative_multiple_of_slide_width() {
        assert_eq!(offset_for(0, 100.0), 0.0);
        assert_eq!(offset_for(3, 100.0), -300.0);
        assert_eq!(offset_for(2, 412.5), -825.0);
    }
}
