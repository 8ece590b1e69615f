use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::carousel::DEFAULT_AUTOPLAY_DELAY;
use crate::gesture::DEFAULT_SWIPE_THRESHOLD_PX;
use crate::particles::DEFAULT_PARTICLE_COUNT;
use crate::track::Slide;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SlideConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ParticleConfig {
    pub count: usize,
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_PARTICLE_COUNT,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AudioConfig {
    pub track: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    pub slides: Vec<SlideConfig>,
    /// Time between automatic advances.
    #[serde(
        default = "Configuration::default_autoplay_delay",
        with = "humantime_serde"
    )]
    pub autoplay_delay: Duration,
    /// How long an animated move takes before the track reports completion.
    #[serde(
        default = "Configuration::default_transition",
        with = "humantime_serde"
    )]
    pub transition: Duration,
    #[serde(default = "Configuration::default_swipe_threshold_px")]
    pub swipe_threshold_px: f32,
    /// Width of one slide in viewport-width units.
    #[serde(default = "Configuration::default_slide_width")]
    pub slide_width: f32,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub audio: Option<AudioConfig>,
}

impl Configuration {
    fn default_autoplay_delay() -> Duration {
        DEFAULT_AUTOPLAY_DELAY
    }

    fn default_transition() -> Duration {
        Duration::from_millis(500)
    }

    fn default_swipe_threshold_px() -> f32 {
        DEFAULT_SWIPE_THRESHOLD_PX
    }

    fn default_slide_width() -> f32 {
        100.0
    }

    /// Load YAML; relative asset paths are resolved against the file's directory.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let mut cfg: Configuration = serde_yaml::from_str(&s)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        if let Some(base) = path.parent() {
            cfg.resolve_paths(base);
        }
        Ok(cfg)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        for slide in &mut self.slides {
            if let Some(image) = slide.image.as_mut() {
                resolve(image);
            }
        }
        if let Some(audio) = self.audio.as_mut() {
            resolve(&mut audio.track);
        }
    }

    /// Applies a command-line delay override; call before [`Self::validated`].
    pub fn with_autoplay_delay(mut self, delay: Option<Duration>) -> Self {
        if let Some(delay) = delay {
            self.autoplay_delay = delay;
        }
        self
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.slides.is_empty(),
            "slides must list at least one slide"
        );
        ensure!(
            !self.autoplay_delay.is_zero(),
            "autoplay-delay must be greater than zero"
        );
        ensure!(
            self.swipe_threshold_px.is_finite() && self.swipe_threshold_px > 0.0,
            "swipe-threshold-px must be positive"
        );
        ensure!(
            self.slide_width.is_finite() && self.slide_width > 0.0,
            "slide-width must be positive"
        );
        Ok(self)
    }

    pub fn slides(&self) -> Vec<Slide> {
        self.slides
            .iter()
            .enumerate()
            .map(|(id, s)| {
                let title = if s.title.trim().is_empty() {
                    format!("slide {}", id + 1)
                } else {
                    s.title.clone()
                };
                Slide::new(id, title, s.image.clone())
            })
            .collect()
    }
}
