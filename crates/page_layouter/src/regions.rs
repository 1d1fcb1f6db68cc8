//! Positioned region manager.
//!
//! Each relatively or absolutely positioned child becomes exactly one
//! [`PositionedRegion`] owned by its parent block. The region is anchored
//! against its reference box, laid out against the space left between the
//! anchor and the reference's bottom edge, and then kept, truncated or
//! suppressed according to the owning block's overflow action.

use std::borrow::Cow;

use log::debug;
use page_model::{
    Component, ComponentKind, DiagnosticKind, LayoutUnit, OverflowAction, Point, PositionMode,
    PositionedRegion, Rect, ReferenceBox,
};

use crate::block_flow;
use crate::context::{AvailableHeight, LayoutContext, Space};
use crate::resolve;

pub struct PlacedRegion {
    pub region: PositionedRegion,
    /// Bottom of a retained relative region in the owner's coordinates.
    pub extent: Option<LayoutUnit>,
}

/// Create the region for `child`, encountered at `occurrence` in the owning
/// block's flow.
pub fn place(
    ctx: &mut LayoutContext<'_>,
    child: &Component,
    index: usize,
    occurrence: Point,
) -> PlacedRegion {
    ctx.enter(child.label(index));
    let placed = place_region(ctx, child, occurrence);
    ctx.leave();
    placed
}

/// The box laid out inside a region. A positioned text leaf gets an anonymous
/// block carrying its id and style, holding the leaf as static text.
fn region_box(child: &Component) -> Cow<'_, Component> {
    match &child.kind {
        ComponentKind::Block { .. } => Cow::Borrowed(child),
        ComponentKind::Text(_) => {
            let mut leaf = child.clone();
            leaf.style.position = PositionMode::Static;
            let mut wrapper = Component::block(child.style.clone(), vec![leaf]);
            wrapper.id = child.id;
            Cow::Owned(wrapper)
        }
    }
}

fn place_region(ctx: &mut LayoutContext<'_>, child: &Component, occurrence: Point) -> PlacedRegion {
    let geometry = resolve::resolve_geometry(ctx, &child.style);
    let owner = ctx.owner();
    let mode = child.style.position;

    let (reference, anchor, available_width, available_height) =
        if mode == PositionMode::Relative {
            let anchor = occurrence.offset(geometry.x, geometry.y);
            (
                ReferenceBox::Parent,
                anchor,
                owner.width.saturating_sub(anchor.x),
                owner.height.remaining_after(anchor.y),
            )
        } else {
            let (reference, frame) = ctx.absolute_reference();
            let anchor = Point::new(
                frame.origin.x - owner.origin.x + geometry.x,
                frame.origin.y - owner.origin.y + geometry.y,
            );
            (
                reference,
                anchor,
                frame.width.saturating_sub(geometry.x),
                frame.height.remaining_after(geometry.y),
            )
        };

    let suppressed = PlacedRegion {
        region: PositionedRegion {
            source: child.id,
            mode,
            reference,
            bounds: Rect::zero(),
            contents: None,
        },
        extent: None,
    };

    if owner.overflow == OverflowAction::Flow {
        if !available_width.is_positive() || available_height.is_exhausted() {
            ctx.warn(
                DiagnosticKind::Overflow,
                format!(
                    "anchor ({}, {}) lies outside the available area; region suppressed",
                    anchor.x, anchor.y
                ),
            );
            return suppressed;
        }
        if let Some(height) = geometry.height
            && !available_height.fits(height)
        {
            ctx.warn(
                DiagnosticKind::Overflow,
                format!("explicit height {height} exceeds the available area; region suppressed"),
            );
            return suppressed;
        }
    }

    let width = geometry
        .width
        .unwrap_or_else(|| available_width.clamp_non_negative());
    let space = Space {
        width,
        height: match owner.overflow {
            OverflowAction::Flow => available_height,
            OverflowAction::Clip => AvailableHeight::Unbounded,
        },
        fresh: false,
        origin: owner.origin.offset(anchor.x, anchor.y),
    };
    let outcome = block_flow::layout_box(ctx, &region_box(child), &space, None, &geometry);
    let mut block = outcome.block;

    if outcome.resume.is_some() {
        if !outcome.placed_any {
            ctx.warn(
                DiagnosticKind::Overflow,
                "no content fits below the anchor; region suppressed",
            );
            return suppressed;
        }
        ctx.warn(
            DiagnosticKind::Overflow,
            "content truncated at the bottom of the available area",
        );
    }

    if geometry.width.is_none() {
        let natural = block.content_width().min(width);
        block.bounds.width = natural;
        if let [column] = block.columns.as_mut_slice() {
            column.bounds.width = natural;
        }
    }

    let bounds = Rect::new(anchor.x, anchor.y, block.width(), block.height());
    block.bounds.x = LayoutUnit::zero();
    block.bounds.y = LayoutUnit::zero();
    debug!(
        "region {} {:?} placed at ({}, {}) size {}x{}",
        child.id, mode, bounds.x, bounds.y, bounds.width, bounds.height
    );

    PlacedRegion {
        extent: (mode == PositionMode::Relative).then(|| bounds.bottom()),
        region: PositionedRegion {
            source: child.id,
            mode,
            reference,
            bounds,
            contents: Some(block),
        },
    }
}
