#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are document pixels (origin at the top-left of the page,
//! `y` grows downward). Pixels are `f64` because hosts report fractional
//! offsets for zoomed or transformed content.

/// An element rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge. Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge. Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge (`x + width`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Translate by a delta.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The visible window onto the document, as edge coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ViewportRect {
    /// Build a viewport from scroll offsets and the window's inner size.
    #[inline]
    pub fn from_scroll(scroll_left: f64, scroll_top: f64, inner: Size) -> Self {
        Self {
            top: scroll_top,
            left: scroll_left,
            right: scroll_left + inner.width,
            bottom: scroll_top + inner.height,
        }
    }

    /// Viewport height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Viewport width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Copy of this viewport with only the top edge moved down by `offset`.
    ///
    /// The bottom, left, and right edges are untouched. A top edge pushed
    /// past the bottom yields an inverted viewport that nothing overlaps.
    #[inline]
    pub fn with_top_offset(&self, offset: f64) -> Self {
        Self {
            top: self.top + offset,
            ..*self
        }
    }

    /// Inclusive overlap test: rectangles touching an edge count as overlapping.
    #[inline]
    pub fn overlaps(&self, rect: &Rect) -> bool {
        !(rect.left() > self.right
            || rect.right() < self.left
            || rect.top() > self.bottom
            || rect.bottom() < self.top)
    }
}
