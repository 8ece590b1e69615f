pub mod audio;
pub mod carousel;
pub mod config;
pub mod error;
pub mod events;
pub mod gesture;
pub mod input;
pub mod invitation;
pub mod particles;
pub mod render;
pub mod timer;
pub mod track;
pub mod tasks {
    pub mod console;
    pub mod driver;
    pub mod preload;
    pub mod timer;
}

pub use error::{Error, Result};
