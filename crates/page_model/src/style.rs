//! Resolved per-box style values consumed by layout.
//!
//! Cascade and inheritance happen upstream; every component carries a fully
//! resolved snapshot. The only value layout still inherits is the overflow
//! action, which is `None` when the box does not set it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionMode {
    #[default]
    Static,
    Relative,
    Absolute,
}

impl PositionMode {
    #[inline]
    pub const fn is_positioned(self) -> bool {
        !matches!(self, Self::Static)
    }
}

/// What happens to content that extends past the available area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowAction {
    /// Overflowing positioned content is truncated or suppressed.
    #[default]
    Flow,
    /// Overflowing content is kept at full size; the renderer clips it.
    Clip,
}

/// Font metrics supplied by the text-measurement collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub size: f32,
    /// Leading: the height of one line set in this font.
    pub line_height: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            size: 12.0,
            line_height: 14.4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSnapshot {
    pub position: PositionMode,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub overflow: Option<OverflowAction>,
    pub font: FontMetrics,
    pub columns: u16,
    pub column_gap: f32,
    /// Whether an in-flow block may be split across pages and columns.
    pub breakable: bool,
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self {
            position: PositionMode::Static,
            x: None,
            y: None,
            width: None,
            height: None,
            overflow: None,
            font: FontMetrics::default(),
            columns: 1,
            column_gap: 0.0,
            breakable: true,
        }
    }
}

impl StyleSnapshot {
    #[must_use]
    pub fn positioned(mut self, position: PositionMode) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    #[must_use]
    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_overflow(mut self, overflow: OverflowAction) -> Self {
        self.overflow = Some(overflow);
        self
    }

    #[must_use]
    pub fn with_font(mut self, size: f32, line_height: f32) -> Self {
        self.font = FontMetrics { size, line_height };
        self
    }

    #[must_use]
    pub fn with_columns(mut self, count: u16, gap: f32) -> Self {
        self.columns = count;
        self.column_gap = gap;
        self
    }

    #[must_use]
    pub fn unbreakable(mut self) -> Self {
        self.breakable = false;
        self
    }
}
