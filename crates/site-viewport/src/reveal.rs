//! Reveal-on-scroll and lazy image loading.
//!
//! Both observers take the current rectangles of the elements they watch and
//! report which ones just became visible. Each element is reported once; after
//! that it is no longer observed.

use std::time::Duration;

use crate::geometry::{Rect, Viewport};

/// Tracks which animated elements (cards, service cards, contact blocks) have
/// been revealed.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    bottom_margin: f64,
    stagger: Duration,
    revealed: Vec<bool>,
}

impl RevealObserver {
    /// Default visible fraction required to reveal an element.
    pub const DEFAULT_THRESHOLD: f64 = 0.1;
    /// Default root margin on the bottom edge (elements reveal 50px early).
    pub const DEFAULT_BOTTOM_MARGIN: f64 = -50.0;

    /// Observe `count` elements with the default threshold and margin.
    pub fn new(count: usize, stagger: Duration) -> Self {
        Self::with_options(count, Self::DEFAULT_THRESHOLD, Self::DEFAULT_BOTTOM_MARGIN, stagger)
    }

    pub fn with_options(count: usize, threshold: f64, bottom_margin: f64, stagger: Duration) -> Self {
        Self {
            threshold,
            bottom_margin,
            stagger,
            revealed: vec![false; count],
        }
    }

    /// Animation delay assigned to the element at `index`, so that a row of
    /// cards animates in sequence. Saturates at [`Duration::MAX`].
    pub fn animation_delay(&self, index: usize) -> Duration {
        u32::try_from(index)
            .ok()
            .and_then(|index| self.stagger.checked_mul(index))
            .unwrap_or(Duration::MAX)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Whether every element has been revealed.
    pub fn is_done(&self) -> bool {
        self.revealed.iter().all(|revealed| *revealed)
    }

    /// Feed the current rectangles (indexed like the observed elements).
    /// Returns the indices revealed by this update, in order.
    pub fn update(&mut self, rects: &[Rect], viewport: Viewport) -> Vec<usize> {
        let mut newly = Vec::new();
        for (index, rect) in rects.iter().enumerate().take(self.revealed.len()) {
            if self.revealed[index] {
                continue;
            }
            if rect.intersection_ratio(viewport, self.bottom_margin) >= self.threshold {
                self.revealed[index] = true;
                newly.push(index);
            }
        }
        newly
    }
}

/// An `img[data-src]` waiting to be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyImage {
    /// Deferred source URL.
    pub data_src: String,
    /// Whether `src` has been set.
    pub loaded: bool,
}

/// Swaps deferred sources in as images approach the viewport.
#[derive(Debug, Clone, Default)]
pub struct LazyImageLoader {
    images: Vec<LazyImage>,
}

impl LazyImageLoader {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            images: sources
                .into_iter()
                .map(|src| LazyImage {
                    data_src: src.into(),
                    loaded: false,
                })
                .collect(),
        }
    }

    pub fn images(&self) -> &[LazyImage] {
        &self.images
    }

    pub fn pending(&self) -> usize {
        self.images.iter().filter(|image| !image.loaded).count()
    }

    /// Load every intersecting image. Returns `(index, src)` for each image
    /// whose `src` must now be set (and whose `lazy` class removed).
    pub fn update(&mut self, rects: &[Rect], viewport: Viewport) -> Vec<(usize, String)> {
        let mut loads = Vec::new();
        for (index, (image, rect)) in self.images.iter_mut().zip(rects).enumerate() {
            if image.loaded {
                continue;
            }
            if rect.intersection_ratio(viewport, 0.0) > 0.0 {
                image.loaded = true;
                loads.push((index, image.data_src.clone()));
            }
        }
        loads
    }

    /// Load everything at once, for hosts without a visibility observer.
    pub fn load_all(&mut self) -> Vec<(usize, String)> {
        tracing::debug!(count = self.pending(), "no visibility observer; loading images eagerly");
        self.images
            .iter_mut()
            .enumerate()
            .filter(|(_, image)| !image.loaded)
            .map(|(index, image)| {
                image.loaded = true;
                (index, image.data_src.clone())
            })
            .collect()
    }
}

/// The `loading` attribute to add to an image, if it has none.
pub fn loading_attribute(existing: Option<&str>) -> Option<&'static str> {
    match existing {
        Some(_) => None,
        None => Some("lazy"),
    }
}
