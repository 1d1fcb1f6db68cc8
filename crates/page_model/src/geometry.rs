//! Geometry primitives shared by the input and output trees.

use crate::LayoutUnit;

/// A point in some block's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: LayoutUnit,
    pub y: LayoutUnit,
}

impl Point {
    pub const fn new(x: LayoutUnit, y: LayoutUnit) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: LayoutUnit, dy: LayoutUnit) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: LayoutUnit,
    pub height: LayoutUnit,
}

impl Size {
    pub const fn new(width: LayoutUnit, height: LayoutUnit) -> Self {
        Self { width, height }
    }

    pub fn from_pt(width: f32, height: f32) -> Self {
        Self::new(LayoutUnit::from_pt(width), LayoutUnit::from_pt(height))
    }

    /// Negative dimensions become zero.
    #[must_use]
    pub const fn clamped(self) -> Self {
        Self::new(
            self.width.clamp_non_negative(),
            self.height.clamp_non_negative(),
        )
    }
}

/// Rectangle representing position and size.
///
/// `x`/`y` are always relative to the parent that owns the rectangle: a block
/// inside a column is relative to its parent block's content origin, a
/// positioned region is relative to the block that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: LayoutUnit,
    pub y: LayoutUnit,
    pub width: LayoutUnit,
    pub height: LayoutUnit,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: LayoutUnit, y: LayoutUnit, width: LayoutUnit, height: LayoutUnit) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convenience constructor from point values, used heavily by tests.
    pub fn from_pt(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(
            LayoutUnit::from_pt(x),
            LayoutUnit::from_pt(y),
            LayoutUnit::from_pt(width),
            LayoutUnit::from_pt(height),
        )
    }

    /// The empty rectangle at the origin.
    pub const fn zero() -> Self {
        Self::new(
            LayoutUnit::zero(),
            LayoutUnit::zero(),
            LayoutUnit::zero(),
            LayoutUnit::zero(),
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Get the bottom edge (y + height).
    pub const fn bottom(&self) -> LayoutUnit {
        self.y.saturating_add(self.height)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// Edge sizes (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: LayoutUnit,
    pub right: LayoutUnit,
    pub bottom: LayoutUnit,
    pub left: LayoutUnit,
}

impl Edges {
    /// Create edge sizes with all edges set to the same value.
    pub const fn uniform(size: LayoutUnit) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }

    /// Get the sum of horizontal edges (left + right).
    pub fn horizontal(&self) -> LayoutUnit {
        self.left.saturating_add(self.right)
    }

    /// Get the sum of vertical edges (top + bottom).
    pub fn vertical(&self) -> LayoutUnit {
        self.top.saturating_add(self.bottom)
    }
}
