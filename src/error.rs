use thiserror::Error;

/// Library error type for carousel operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An indicator or caller asked for a real slide that does not exist.
    #[error("slide {index} is out of range for {count} slides")]
    InvalidSlide { index: usize, count: usize },

    /// The rendering capability rejected an update.
    #[error("render error: {0}")]
    Render(anyhow::Error),

    /// The timer capability could not schedule autoplay.
    #[error("timer error: {0}")]
    Timer(anyhow::Error),

    /// The audio output failed in a way the toggle cannot absorb.
    #[error("audio error: {0}")]
    Audio(anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
