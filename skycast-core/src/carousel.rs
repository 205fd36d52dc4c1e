//! Revolving page index and refresh tick for one surface.
//!
//! Page rotation and data refresh run on separate timers; this type only
//! holds the counters they advance.

use crate::weather::Surface;

/// Page rotation and refresh tick counter for one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    page: usize,
    page_count: usize,
    tick: u64,
}

impl Carousel {
    /// Create a new carousel on page 0 with `page_count` pages (at least one).
    pub fn new(page_count: usize) -> Self {
        Self {
            page: 0,
            page_count: page_count.max(1),
            tick: 0,
        }
    }

    /// Create a new carousel sized for `surface`.
    pub fn for_surface(surface: Surface) -> Self {
        Self::new(surface.page_count())
    }

    /// Zero-based page currently shown.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Refresh ticks seen so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Rotate to the next page, wrapping.
    pub fn advance(&mut self) {
        self.page = (self.page + 1) % self.page_count;
    }

    /// Jump to `page`. Out of range is ignored.
    pub fn select(&mut self, page: usize) -> bool {
        if page >= self.page_count {
            return false;
        }
        self.page = page;
        true
    }

    /// Count a refresh. The page is left alone.
    pub fn bump_tick(&mut self) -> u64 {
        self.tick = self.tick.wrapping_add(1);
        self.tick
    }
}
