//! Pixel rectangles.
//!
//! Rectangles are stored as `(x, y, width, height)`. The derived ordering is
//! the natural tuple ordering over those four fields, which the tile
//! selection pass relies on.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel coordinates.
///
/// Use [`ScreenRect::new`] to enforce `width > 0 && height > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Top-left / bottom-right form used by the crop relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerRect {
    pub x: i32,
    pub y: i32,
    pub x1: i32,
    pub y1: i32,
}

impl ScreenRect {
    /// Create a rectangle, rejecting zero-sized ones.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Smallest rectangle containing every point. Points are pixel centers,
    /// so a single point yields a 1x1 rectangle.
    pub fn bounding<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for (x, y) in iter {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Self::new(
            min_x,
            min_y,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        )
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn corners(&self) -> CornerRect {
        CornerRect {
            x: self.x,
            y: self.y,
            x1: self.right(),
            y1: self.bottom(),
        }
    }

    /// Shrink by `by` pixels on every side. `None` when nothing is left.
    pub fn inset(&self, by: u32) -> Option<Self> {
        let width = self.width.checked_sub(by.saturating_mul(2))?;
        let height = self.height.checked_sub(by.saturating_mul(2))?;
        Self::new(self.x + by as i32, self.y + by as i32, width, height)
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Overlapping region of two rectangles, if any.
    pub fn intersect(&self, other: &ScreenRect) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Self::new(x, y, (right - x) as u32, (bottom - y) as u32)
    }

    pub fn contains(&self, other: &ScreenRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

impl From<ScreenRect> for CornerRect {
    fn from(rect: ScreenRect) -> Self {
        rect.corners()
    }
}

impl std::fmt::Display for ScreenRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.x, self.y
        )
    }
}
