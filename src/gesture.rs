use crate::events::CarouselEvent;

pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger travelled towards the left edge.
    Left,
    Right,
}

impl From<Swipe> for CarouselEvent {
    fn from(swipe: Swipe) -> Self {
        match swipe {
            Swipe::Left => CarouselEvent::SwipeLeft,
            Swipe::Right => CarouselEvent::SwipeRight,
        }
    }
}

/// Tracks one touch from start to end and classifies it as a horizontal swipe.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Returns true while the gesture is more horizontal than vertical, in
    /// which case native scrolling should be suppressed.
    pub fn moved(&self, x: f32, y: f32) -> bool {
        match self.start {
            Some((sx, sy)) => (x - sx).abs() > (y - sy).abs(),
            None => false,
        }
    }

    /// Delta is `start - end`, so a positive value means the finger moved left.
    /// Only a finite delta strictly past the threshold counts.
    pub fn end(&mut self, x: f32) -> Option<Swipe> {
        let (sx, _) = self.start.take()?;
        let delta = sx - x;
        if !delta.is_finite() || delta.abs() <= self.threshold {
            return None;
        }
        Some(if delta > 0.0 { Swipe::Left } else { Swipe::Right })
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftward_drag_past_threshold_is_swipe_left() {
        let mut t = SwipeTracker::default();
        t.begin(300.0, 100.0);
        assert_eq!(t.end(200.0), Some(Swipe::Left));
    }

    #[test]
    fn rightward_drag_is_swipe_right() {
        let mut t = SwipeTracker::default();
        t.begin(100.0, 0.0);
        assert_eq!(t.end(180.0), Some(Swipe::Right));
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut t = SwipeTracker::default();
        t.begin(300.0, 0.0);
        assert_eq!(t.end(250.0), None);
        t.begin(300.0, 0.0);
        assert_eq!(t.end(249.0), Some(Swipe::Left));
    }

    #[test]
    fn end_without_begin_is_ignored() {
        let mut t = SwipeTracker::default();
        assert_eq!(t.end(0.0), None);
        t.begin(0.0, 0.0);
        t.end(500.0);
        assert_eq!(t.end(0.0), None);
    }

    #[test]
    fn nan_delta_is_ignored() {
        let mut t = SwipeTracker::default();
        t.begin(f32::NAN, 0.0);
        assert_eq!(t.end(0.0), None);
        t.begin(300.0, 0.0);
        assert_eq!(t.end(f32::NAN), None);
        t.begin(f32::INFINITY, 0.0);
        assert_eq!(t.end(0.0), None);
    }

    #[test]
    fn horizontal_moves_suppress_scrolling() {
        let mut t = SwipeTracker::default();
        assert!(!t.moved(10.0, 0.0));
        t.begin(100.0, 100.0);
        assert!(t.moved(140.0, 110.0));
        assert!(!t.moved(105.0, 160.0));
    }
}
