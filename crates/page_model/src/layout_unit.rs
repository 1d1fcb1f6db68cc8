//! Fixed-point page coordinates.
//!
//! Heights are accumulated line by line and block by block across a whole
//! page, so all geometry is stored in 1/64pt integer units. Style inputs arrive
//! as `f32` points and are quantized once at the engine boundary.

use core::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// Fixed-point coordinate in 1/64pt units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct LayoutUnit(i32);

impl LayoutUnit {
    /// Number of fractional bits (6 bits = 1/64pt precision)
    pub const FRACTIONAL_BITS: u32 = 6;

    /// Scale factor (2^6 = 64)
    pub const SCALE: i32 = 1 << Self::FRACTIONAL_BITS;

    /// Create from points (f32). Callers validate finiteness first; values
    /// beyond the `i32` range saturate.
    #[inline]
    pub fn from_pt(points: f32) -> Self {
        Self((points * Self::SCALE as f32).round() as i32)
    }

    /// Convert to points (f32)
    #[inline]
    pub const fn to_pt(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }

    /// Zero value
    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Clamp negative values to zero.
    #[inline]
    #[must_use]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 { Self(0) } else { self }
    }

    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for LayoutUnit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % Self::SCALE == 0 {
            write!(formatter, "{}", self.0 / Self::SCALE)
        } else {
            write!(formatter, "{:.2}", self.to_pt())
        }
    }
}

// Arithmetic saturates at the `i32` range so oversized styles clamp instead
// of overflowing.

impl Add for LayoutUnit {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl AddAssign for LayoutUnit {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sub for LayoutUnit {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }
}

impl SubAssign for LayoutUnit {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.saturating_sub(rhs);
    }
}

impl Mul<i32> for LayoutUnit {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Div<i32> for LayoutUnit {
    type Output = Self;

    /// Division by zero yields zero.
    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self(self.0.checked_div(rhs).unwrap_or(0))
    }
}
