use crate::timer::TimerHandle;

/// Commands understood by the carousel controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    Next,
    Previous,
    GoToReal(usize),
    /// Finger moved left; advances.
    SwipeLeft,
    /// Finger moved right; goes back.
    SwipeRight,
    PauseRequested,
    ResumeRequested,
    TransitionFinished,
    AutoplayTick(TimerHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Space,
    Escape,
    Other,
}

/// Raw page input, before it is interpreted as carousel or audio commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    NextButton,
    PreviousButton,
    Indicator(usize),
    TouchStart { x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
    TouchEnd { x: f32, y: f32 },
    PointerDown,
    PointerEnter,
    PointerLeave,
    /// Any click on the page.
    Click,
    AudioButton,
    AudioError,
    TransitionFinished,
    AutoplayTick(TimerHandle),
}

/// What the input layer should do with the native event after it was handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    pub prevent_default: bool,
}

impl EventResponse {
    pub const PASS: Self = Self {
        prevent_default: false,
    };
    pub const CONSUMED: Self = Self {
        prevent_default: true,
    };
}
