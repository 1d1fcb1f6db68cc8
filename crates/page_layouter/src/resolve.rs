//! Conversion of style snapshot values into layout units.

use page_model::{DiagnosticKind, LayoutUnit, StyleSnapshot};

use crate::context::LayoutContext;

/// Explicit geometry of one box, validated and quantized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGeometry {
    pub x: LayoutUnit,
    pub y: LayoutUnit,
    pub width: Option<LayoutUnit>,
    pub height: Option<LayoutUnit>,
}

pub fn resolve_geometry(ctx: &mut LayoutContext<'_>, style: &StyleSnapshot) -> ResolvedGeometry {
    ResolvedGeometry {
        x: resolve_length(ctx, style.x, "x").unwrap_or_default(),
        y: resolve_length(ctx, style.y, "y").unwrap_or_default(),
        width: resolve_length(ctx, style.width, "width"),
        height: resolve_length(ctx, style.height, "height"),
    }
}

/// Largest explicit length or offset accepted, in points. Sums of a few such
/// values stay well inside the fixed-point range.
pub const MAX_LENGTH: f32 = 1_000_000.0;

/// Negative and non-finite values are clamped to zero, values above
/// [`MAX_LENGTH`] to the maximum. Both are reported.
pub fn resolve_length(
    ctx: &mut LayoutContext<'_>,
    value: Option<f32>,
    name: &str,
) -> Option<LayoutUnit> {
    let value = value?;
    if !value.is_finite() || value < 0.0 {
        ctx.warn(
            DiagnosticKind::Geometry,
            format!("{name} {value} is invalid; clamped to 0"),
        );
        return Some(LayoutUnit::zero());
    }
    if value > MAX_LENGTH {
        ctx.warn(
            DiagnosticKind::Geometry,
            format!("{name} {value} is too large; clamped to {MAX_LENGTH}"),
        );
        return Some(LayoutUnit::from_pt(MAX_LENGTH));
    }
    Some(LayoutUnit::from_pt(value))
}

/// Column count and gap for a block's content.
pub fn resolve_columns(ctx: &mut LayoutContext<'_>, style: &StyleSnapshot) -> (i32, LayoutUnit) {
    let count = if style.columns == 0 {
        ctx.warn(
            DiagnosticKind::Geometry,
            "column count 0 is invalid; using 1",
        );
        1
    } else {
        i32::from(style.columns)
    };
    let gap = if count > 1 {
        resolve_length(ctx, Some(style.column_gap), "column gap").unwrap_or_default()
    } else {
        LayoutUnit::zero()
    };
    (count, gap)
}

/// Line height of a font, clamped like any other explicit length.
pub fn line_height(style: &StyleSnapshot) -> LayoutUnit {
    let value = style.font.line_height;
    if value.is_finite() {
        LayoutUnit::from_pt(value).clamp_non_negative()
    } else {
        LayoutUnit::zero()
    }
}

/// Advance of a measured segment.
pub fn advance(value: f32) -> LayoutUnit {
    if value.is_finite() {
        LayoutUnit::from_pt(value).clamp_non_negative()
    } else {
        LayoutUnit::zero()
    }
}
