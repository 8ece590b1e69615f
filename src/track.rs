use std::path::PathBuf;
use std::sync::Arc;

/// A real slide. Clones on the padded track share the same `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: usize,
    pub title: String,
    pub image: Option<PathBuf>,
}

impl Slide {
    pub fn new(id: usize, title: impl Into<String>, image: Option<PathBuf>) -> Self {
        Self {
            id,
            title: title.into(),
            image,
        }
    }
}

/// Physical layout `[clone of last, real 0 .. real n-1, clone of first]`.
///
/// Built once from the real slide list; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PaddedTrack {
    slots: Vec<Arc<Slide>>,
    real: usize,
}

impl PaddedTrack {
    pub fn new(slides: Vec<Slide>) -> Self {
        let real = slides.len();
        let reals: Vec<Arc<Slide>> = slides.into_iter().map(Arc::new).collect();
        let mut slots = Vec::with_capacity(real + 2);
        if let (Some(first), Some(last)) = (reals.first(), reals.last()) {
            slots.push(Arc::clone(last));
            slots.extend(reals.iter().cloned());
            slots.push(Arc::clone(first));
        }
        Self { slots, real }
    }

    /// Number of real slides (`N`).
    pub fn real_len(&self) -> usize {
        self.real
    }

    /// Number of physical slots (`N + 2`, or zero for an empty track).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Physical index of the trailing clone (`N + 1`).
    pub fn last_index(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slots.get(index).map(Arc::as_ref)
    }

    pub fn is_clone(&self, index: usize) -> bool {
        !self.is_empty() && (index == 0 || index == self.last_index())
    }

    /// Real index shown at a physical slot; clone slots map to the slide they copy.
    pub fn real_index(&self, index: usize) -> Option<usize> {
        if self.real == 0 || index > self.last_index() {
            return None;
        }
        Some((index + self.real - 1) % self.real)
    }

    pub fn real_slides(&self) -> impl Iterator<Item = &Slide> {
        self.slots
            .iter()
            .skip(1)
            .take(self.real)
            .map(Arc::as_ref)
    }
}
