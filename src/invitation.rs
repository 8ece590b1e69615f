use tracing::debug;

use crate::audio::{AudioOutput, AudioState, AudioToggle};
use crate::carousel::CarouselController;
use crate::error::Result;
use crate::events::{CarouselEvent, EventResponse, InputEvent, Key};
use crate::gesture::SwipeTracker;
use crate::render::Renderer;
use crate::timer::Timer;

/// Snapshot of the page state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub current_slide: usize,
    /// Physical slot count, clones included.
    pub total_slides: usize,
    pub audio: AudioState,
    pub autoplaying: bool,
}

/// The invitation page: carousel, swipe handling and background audio.
pub struct Invitation<R: Renderer, T: Timer, A> {
    carousel: CarouselController<R, T>,
    swipe: SwipeTracker,
    audio: AudioToggle<A>,
}

impl<R: Renderer, T: Timer, A: AudioOutput> Invitation<R, T, A> {
    pub fn new(carousel: CarouselController<R, T>, swipe: SwipeTracker, audio: A) -> Self {
        Self {
            carousel,
            swipe,
            audio: AudioToggle::new(audio),
        }
    }

    pub fn start(&mut self) -> Result<()> {
        self.carousel.start()
    }

    pub fn handle(&mut self, input: InputEvent) -> Result<EventResponse> {
        debug!(?input, "input");
        let response = match input {
            InputEvent::Key(Key::ArrowRight) => {
                self.carousel.handle(CarouselEvent::Next)?;
                EventResponse::CONSUMED
            }
            InputEvent::Key(Key::ArrowLeft) => {
                self.carousel.handle(CarouselEvent::Previous)?;
                EventResponse::CONSUMED
            }
            InputEvent::Key(Key::Space) => {
                self.audio.toggle()?;
                EventResponse::CONSUMED
            }
            InputEvent::Key(Key::Escape) => {
                self.carousel.handle(CarouselEvent::PauseRequested)?;
                EventResponse::PASS
            }
            InputEvent::Key(Key::Other) => EventResponse::PASS,
            InputEvent::NextButton => {
                self.carousel.handle(CarouselEvent::Next)?;
                EventResponse::PASS
            }
            InputEvent::PreviousButton => {
                self.carousel.handle(CarouselEvent::Previous)?;
                EventResponse::PASS
            }
            InputEvent::Indicator(index) => {
                self.carousel.handle(CarouselEvent::GoToReal(index))?;
                EventResponse::PASS
            }
            InputEvent::TouchStart { x, y } => {
                self.swipe.begin(x, y);
                self.carousel.handle(CarouselEvent::PauseRequested)?;
                EventResponse::PASS
            }
            InputEvent::TouchMove { x, y } => {
                if self.swipe.moved(x, y) {
                    EventResponse::CONSUMED
                } else {
                    EventResponse::PASS
                }
            }
            InputEvent::TouchEnd { x, .. } => {
                if let Some(swipe) = self.swipe.end(x) {
                    self.carousel.handle(swipe.into())?;
                }
                self.carousel.handle(CarouselEvent::ResumeRequested)?;
                EventResponse::PASS
            }
            InputEvent::PointerDown | InputEvent::PointerEnter => {
                self.carousel.handle(CarouselEvent::PauseRequested)?;
                EventResponse::PASS
            }
            InputEvent::PointerLeave => {
                self.carousel.handle(CarouselEvent::ResumeRequested)?;
                EventResponse::PASS
            }
            InputEvent::Click => {
                self.audio.unlock();
                EventResponse::PASS
            }
            InputEvent::AudioButton => {
                self.audio.toggle()?;
                EventResponse::PASS
            }
            InputEvent::AudioError => {
                self.audio.fail();
                EventResponse::PASS
            }
            InputEvent::TransitionFinished => {
                self.carousel.handle(CarouselEvent::TransitionFinished)?;
                EventResponse::PASS
            }
            InputEvent::AutoplayTick(handle) => {
                self.carousel.handle(CarouselEvent::AutoplayTick(handle))?;
                EventResponse::PASS
            }
        };
        Ok(response)
    }

    pub fn status(&self) -> Status {
        Status {
            current_slide: self.carousel.current_index(),
            total_slides: self.carousel.track().len(),
            audio: self.audio.state(),
            autoplaying: self.carousel.autoplay_active(),
        }
    }

    pub fn carousel(&self) -> &CarouselController<R, T> {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut CarouselController<R, T> {
        &mut self.carousel
    }

    pub fn audio(&self) -> &AudioToggle<A> {
        &self.audio
    }
}
