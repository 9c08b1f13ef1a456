//! Hit-testable text geometry reconstructed from positioned tokens.
//!
//! A backend hands us raw text tokens with display-space transforms; this
//! module turns them into [`Fragment`]s, the selectable units everything
//! else operates on, and stores them per page in layout order.

pub mod geometry;
pub mod store;

pub use geometry::GeometryExpander;
pub use store::FragmentStore;

use std::fmt;

/// Deterministic fragment identity derived from page and position.
///
/// Coordinates are quantized to centesimal precision, so re-deriving the
/// same page at the same display scale reproduces the same ids. Selection
/// idempotence depends on this: a fragment toggled during one render can
/// be found again after the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId {
    page: usize,
    qx: i32,
    qy: i32,
}

impl FragmentId {
    /// Creates an id from a page index and display-scale coordinates.
    pub fn new(page: usize, x: f32, y: f32) -> Self {
        Self {
            page,
            qx: quantize(x),
            qy: quantize(y),
        }
    }

    /// The page this id belongs to.
    pub fn page(&self) -> usize {
        self.page
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "p{}_x{:.2}_y{:.2}",
            self.page,
            self.qx as f64 / 100.0,
            self.qy as f64 / 100.0
        )
    }
}

fn quantize(v: f32) -> i32 {
    (v as f64 * 100.0).round() as i32
}

/// A non-whitespace, position-addressable unit of page text.
///
/// Fragments are hit-test targets, not print geometry: their boxes are
/// deliberately expanded beyond the raw font box (see [`GeometryExpander`]).
/// Coordinates are in display-scale pixels with the origin at the top-left
/// of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub id: FragmentId,
    pub page: usize,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Fragment {
    /// Returns true if the display-space point falls inside this fragment.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}
