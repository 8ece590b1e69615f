use std::time::Duration;

use rand::Rng;

pub const DEFAULT_PARTICLE_COUNT: usize = 20;

const SIZE_PX: std::ops::Range<f32> = 2.0..6.0;
const DELAY_SECS: std::ops::Range<f32> = 0.0..6.0;
const DURATION_SECS: std::ops::Range<f32> = 3.0..6.0;

/// One floating decoration dot, positioned in percent of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub left_pct: f32,
    pub top_pct: f32,
    pub size_px: f32,
    pub delay: Duration,
    pub duration: Duration,
}

pub fn scatter<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            left_pct: rng.random_range(0.0..100.0),
            top_pct: rng.random_range(0.0..100.0),
            size_px: rng.random_range(SIZE_PX),
            delay: Duration::from_secs_f32(rng.random_range(DELAY_SECS)),
            duration: Duration::from_secs_f32(rng.random_range(DURATION_SECS)),
        })
        .collect()
}
