use std::time::Duration;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::events::CarouselEvent;
use crate::render::Renderer;
use crate::timer::{Timer, TimerHandle};
use crate::track::PaddedTrack;

pub const DEFAULT_AUTOPLAY_DELAY: Duration = Duration::from_secs(10);

/// Infinite carousel over a [`PaddedTrack`].
///
/// Rules:
/// - `current` is a physical index in `[0, N + 1]`. It only rests on a clone
///   between an animated step and the following `TransitionFinished`.
/// - Landing on a clone is corrected by an unanimated jump to the real slide
///   it copies, which keeps the loop visually seamless.
/// - Every path that starts autoplay cancels the previous schedule first, so
///   at most one schedule is ever live.
/// - With fewer than two real slides navigation and autoplay are disabled and
///   the indicator strip is hidden.
pub struct CarouselController<R: Renderer, T: Timer> {
    track: PaddedTrack,
    current: usize,
    renderer: R,
    timer: T,
    autoplay_delay: Duration,
    autoplay: Option<TimerHandle>,
    transition_pending: bool,
    frame: u64,
}

impl<R: Renderer, T: Timer> CarouselController<R, T> {
    pub fn new(track: PaddedTrack, renderer: R, timer: T, autoplay_delay: Duration) -> Self {
        let current = if track.is_empty() { 0 } else { 1 };
        Self {
            track,
            current,
            renderer,
            timer,
            autoplay_delay,
            autoplay: None,
            transition_pending: false,
            frame: 0,
        }
    }

    /// Initial unanimated render plus autoplay start.
    pub fn start(&mut self) -> Result<()> {
        self.renderer
            .set_indicators_visible(self.navigable())
            .map_err(Error::Render)?;
        self.render(false)?;
        self.start_autoplay()
    }

    pub fn handle(&mut self, event: CarouselEvent) -> Result<()> {
        trace!(?event, current = self.current, "carousel event");
        match event {
            CarouselEvent::Next | CarouselEvent::SwipeLeft => self.go_to_next(),
            CarouselEvent::Previous | CarouselEvent::SwipeRight => self.go_to_previous(),
            CarouselEvent::GoToReal(index) => self.go_to_real(index),
            CarouselEvent::PauseRequested => {
                self.pause_autoplay();
                Ok(())
            }
            CarouselEvent::ResumeRequested => self.start_autoplay(),
            CarouselEvent::TransitionFinished => self.on_transition_finished(),
            CarouselEvent::AutoplayTick(handle) => {
                if self.autoplay == Some(handle) {
                    self.go_to_next()
                } else {
                    debug!(%handle, "ignoring tick from canceled schedule");
                    Ok(())
                }
            }
        }
    }

    pub fn go_to_next(&mut self) -> Result<()> {
        if !self.navigable() || self.current >= self.track.last_index() {
            return Ok(());
        }
        self.current += 1;
        self.render(true)
    }

    pub fn go_to_previous(&mut self) -> Result<()> {
        if !self.navigable() || self.current == 0 {
            return Ok(());
        }
        self.current -= 1;
        self.render(true)
    }

    pub fn go_to_real(&mut self, real_index: usize) -> Result<()> {
        let count = self.track.real_len();
        if real_index >= count {
            return Err(Error::InvalidSlide {
                index: real_index,
                count,
            });
        }
        self.current = real_index + 1;
        self.render(true)
    }

    /// Snap off a clone once the animated move onto it has completed.
    pub fn on_transition_finished(&mut self) -> Result<()> {
        self.transition_pending = false;
        if !self.navigable() {
            return Ok(());
        }
        let last = self.track.last_index();
        if self.current == 0 {
            self.current = self.track.real_len();
        } else if self.current == last {
            self.current = 1;
        } else {
            return Ok(());
        }
        debug!(current = self.current, "jumped off clone");
        self.render(false)
    }

    pub fn start_autoplay(&mut self) -> Result<()> {
        self.pause_autoplay();
        if !self.navigable() {
            return Ok(());
        }
        let handle = self
            .timer
            .schedule(self.autoplay_delay)
            .map_err(Error::Timer)?;
        debug!(%handle, delay = ?self.autoplay_delay, "autoplay started");
        self.autoplay = Some(handle);
        Ok(())
    }

    pub fn pause_autoplay(&mut self) {
        if let Some(handle) = self.autoplay.take() {
            self.timer.cancel(handle);
            debug!(%handle, "autoplay paused");
        }
    }

    fn render(&mut self, animated: bool) -> Result<()> {
        if self.track.is_empty() {
            return Ok(());
        }
        self.renderer
            .set_offset(self.current, animated)
            .map_err(Error::Render)?;
        self.renderer
            .set_active_slide(self.current)
            .map_err(Error::Render)?;
        self.renderer
            .set_active_indicator(self.active_indicator())
            .map_err(Error::Render)?;
        self.transition_pending = animated;
        self.frame += 1;
        Ok(())
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Real slide under `current`; clones report the slide they copy.
    pub fn active_indicator(&self) -> usize {
        self.track.real_index(self.current).unwrap_or(0)
    }

    pub fn navigable(&self) -> bool {
        self.track.real_len() > 1
    }

    pub fn autoplay_active(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn autoplay_handle(&self) -> Option<TimerHandle> {
        self.autoplay
    }

    /// An animated render has been issued and not yet acknowledged.
    pub fn transition_pending(&self) -> bool {
        self.transition_pending
    }

    /// Number of renders issued so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn track(&self) -> &PaddedTrack {
        &self.track
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

impl<R: Renderer, T: Timer> Drop for CarouselController<R, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.autoplay.take() {
            self.timer.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Slide;
    use std::collections::BTreeSet;

    #[derive(Debug, Default)]
    struct Frames {
        offsets: Vec<(usize, bool)>,
        indicator: Option<usize>,
        indicators_visible: Option<bool>,
    }

    impl Renderer for Frames {
        fn set_offset(&mut self, index: usize, animated: bool) -> anyhow::Result<()> {
            self.offsets.push((index, animated));
            Ok(())
        }
        fn set_active_slide(&mut self, _index: usize) -> anyhow::Result<()> {
            Ok(())
        }
        fn set_active_indicator(&mut self, real_index: usize) -> anyhow::Result<()> {
            self.indicator = Some(real_index);
            Ok(())
        }
        fn set_indicators_visible(&mut self, visible: bool) -> anyhow::Result<()> {
            self.indicators_visible = Some(visible);
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct FakeTimer {
        next: u64,
        live: BTreeSet<TimerHandle>,
    }

    impl Timer for FakeTimer {
        fn schedule(&mut self, _delay: Duration) -> anyhow::Result<TimerHandle> {
            self.next += 1;
            let handle = TimerHandle(self.next);
            self.live.insert(handle);
            Ok(handle)
        }
        fn cancel(&mut self, handle: TimerHandle) {
            self.live.remove(&handle);
        }
    }

    fn controller(n: usize) -> CarouselController<Frames, FakeTimer> {
        let slides = (0..n).map(|i| Slide::new(i, format!("s{i}"), None)).collect();
        let mut c = CarouselController::new(
            PaddedTrack::new(slides),
            Frames::default(),
            FakeTimer::default(),
            DEFAULT_AUTOPLAY_DELAY,
        );
        c.start().unwrap();
        c
    }

    #[test]
    fn five_slides_wrap_forward() {
        let mut c = controller(5);
        assert_eq!(c.current_index(), 1);
        for _ in 0..4 {
            c.go_to_next().unwrap();
        }
        assert_eq!(c.current_index(), 5);
        c.go_to_next().unwrap();
        assert_eq!(c.current_index(), 6);
        assert_eq!(c.active_indicator(), 0);
        c.on_transition_finished().unwrap();
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.renderer().offsets.last(), Some(&(1, false)));
        assert!(!c.transition_pending());
    }

    #[test]
    fn wraps_backward_from_first() {
        let mut c = controller(4);
        c.go_to_previous().unwrap();
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.active_indicator(), 3);
        c.on_transition_finished().unwrap();
        assert_eq!(c.current_index(), 4);
        assert_eq!(c.renderer().indicator, Some(3));
    }

    #[test]
    fn steps_stop_at_clones() {
        let mut c = controller(3);
        c.go_to_previous().unwrap();
        c.go_to_previous().unwrap();
        assert_eq!(c.current_index(), 0);
        c.on_transition_finished().unwrap();
        c.go_to_real(2).unwrap();
        c.go_to_next().unwrap();
        c.go_to_next().unwrap();
        assert_eq!(c.current_index(), 4);
    }

    #[test]
    fn index_stays_in_bounds_under_mixed_navigation() {
        for n in 2..7 {
            let mut c = controller(n);
            let mut seed = 0x2545_f491_u64 ^ n as u64;
            for _ in 0..500 {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                match seed % 3 {
                    0 => c.go_to_next().unwrap(),
                    1 => c.go_to_previous().unwrap(),
                    _ => {
                        c.on_transition_finished().unwrap();
                        assert!((1..=n).contains(&c.current_index()));
                    }
                }
                assert!(c.current_index() <= n + 1);
            }
        }
    }

    #[test]
    fn indicator_tracks_real_slide() {
        let mut c = controller(5);
        for real in 0..5 {
            c.go_to_real(real).unwrap();
            assert_eq!(c.current_index(), real + 1);
            assert_eq!(c.renderer().indicator, Some(real));
        }
    }

    #[test]
    fn out_of_range_real_index_is_rejected() {
        let mut c = controller(3);
        c.go_to_next().unwrap();
        let err = c.go_to_real(3).unwrap_err();
        assert!(matches!(err, Error::InvalidSlide { index: 3, count: 3 }));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn autoplay_start_and_pause_are_idempotent() {
        let mut c = controller(3);
        c.start_autoplay().unwrap();
        c.start_autoplay().unwrap();
        assert_eq!(c.timer().live.len(), 1);
        c.pause_autoplay();
        c.pause_autoplay();
        assert!(c.timer().live.is_empty());
        assert!(!c.autoplay_active());
    }

    #[test]
    fn stale_tick_does_not_navigate() {
        let mut c = controller(3);
        let first = c.autoplay_handle().unwrap();
        c.start_autoplay().unwrap();
        c.handle(CarouselEvent::AutoplayTick(first)).unwrap();
        assert_eq!(c.current_index(), 1);
        let live = c.autoplay_handle().unwrap();
        c.handle(CarouselEvent::AutoplayTick(live)).unwrap();
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn single_slide_disables_navigation() {
        let mut c = controller(1);
        assert_eq!(c.renderer().indicators_visible, Some(false));
        assert!(!c.autoplay_active());
        c.go_to_next().unwrap();
        c.go_to_previous().unwrap();
        c.start_autoplay().unwrap();
        assert_eq!(c.current_index(), 1);
        assert!(c.timer().live.is_empty());
    }

    #[test]
    fn empty_track_renders_nothing() {
        let mut c = controller(0);
        c.handle(CarouselEvent::Next).unwrap();
        c.handle(CarouselEvent::TransitionFinished).unwrap();
        assert!(c.renderer().offsets.is_empty());
        assert!(c.go_to_real(0).is_err());
    }
}
