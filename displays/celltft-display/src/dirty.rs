//! Dirty rectangle tracking
//!
//! Accumulates the smallest rectangle covering every cell written since the
//! last render, so the renderer only retransmits what changed.

/// Signed cell coordinate
///
/// Signed so callers can place text partially off the left or top edge.
pub type Coord = i16;

/// Half-open rectangle `[x0, x1) × [y0, y1)` in cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x0: Coord,
    pub y0: Coord,
    pub x1: Coord,
    pub y1: Coord,
}

impl Rect {
    pub const fn new(x0: Coord, y0: Coord, x1: Coord, y1: Coord) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub const fn width(&self) -> Coord {
        self.x1 - self.x0
    }

    pub const fn height(&self) -> Coord {
        self.y1 - self.y0
    }

    pub const fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }
}

/// Dirty rectangle of a `W`×`H` cell grid
///
/// When nothing is pending it holds the sentinel `(W, H, 0, 0)`, which any
/// `min`/`max` union overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyRect<const W: usize, const H: usize> {
    rect: Rect,
}

impl<const W: usize, const H: usize> Default for DirtyRect<W, H> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const W: usize, const H: usize> DirtyRect<W, H> {
    const MAX_X: Coord = W as Coord;
    const MAX_Y: Coord = H as Coord;

    /// Nothing pending
    pub const fn empty() -> Self {
        Self {
            rect: Rect::new(Self::MAX_X, Self::MAX_Y, 0, 0),
        }
    }

    /// The whole grid pending
    pub const fn full() -> Self {
        Self {
            rect: Rect::new(0, 0, Self::MAX_X, Self::MAX_Y),
        }
    }

    /// Forget everything pending; called once per completed render
    pub fn reset(&mut self) {
        *self = Self::empty();
    }

    /// Widen to cover `[x0, x1) × [y0, y1)` clamped to the grid
    ///
    /// Rectangles that are empty after clamping leave the tracker unchanged.
    pub fn grow(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord) {
        let x0 = x0.clamp(0, Self::MAX_X);
        let x1 = x1.clamp(0, Self::MAX_X);
        let y0 = y0.clamp(0, Self::MAX_Y);
        let y1 = y1.clamp(0, Self::MAX_Y);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        self.rect.x0 = self.rect.x0.min(x0);
        self.rect.y0 = self.rect.y0.min(y0);
        self.rect.x1 = self.rect.x1.max(x1);
        self.rect.y1 = self.rect.y1.max(y1);
    }

    /// Check whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    /// Pending rectangle, or `None` if nothing is pending
    pub fn bounds(&self) -> Option<Rect> {
        if self.is_empty() {
            None
        } else {
            Some(self.rect)
        }
    }

    /// Pending width in cells
    pub fn width(&self) -> Coord {
        self.bounds().map_or(0, |r| r.width())
    }

    /// Pending height in cells
    pub fn height(&self) -> Coord {
        self.bounds().map_or(0, |r| r.height())
    }
}
