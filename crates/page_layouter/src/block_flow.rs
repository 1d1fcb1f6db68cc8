//! Block flow engine.
//!
//! A block's children are flowed down one or more columns. Static blocks
//! are laid out recursively and stacked, text leaves are broken into lines,
//! and positioned children are handed to the region manager, leaving a
//! zero-size marker on the current line.
//!
//! When the available height runs out the flow stops and reports a
//! [`Resume`] point. Re-entering the same block with that point on a fresh
//! page continues exactly where the previous page stopped.

use core::mem;

use log::debug;
use page_model::{
    Block, Column, Component, ComponentKind, Content, DiagnosticKind, DiagnosticLevel, LayoutUnit,
    Line, MarkerRun, OverflowAction, Point, PositionedRegion, Rect, RegionRef, Run,
};
use smallvec::SmallVec;

use crate::context::{AvailableHeight, ContainerFrame, LayoutContext, Space};
use crate::lines::{FlowPosition, LineBuilder};
use crate::regions;
use crate::resolve::{self, ResolvedGeometry};

/// Where a split flow continues on the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resume {
    pub child: usize,
    /// First unplaced segment when `child` is a text leaf.
    pub segment: usize,
    /// Continuation inside `child` when it is a split block.
    pub inner: Option<Box<Self>>,
    /// Positioned children below this index were already placed.
    pub positioned_done: usize,
}

/// Result of laying out one block.
#[derive(Debug)]
pub struct FlowOutcome {
    pub block: Block,
    pub resume: Option<Resume>,
    /// Whether any line with text or any nested block was placed.
    pub placed_any: bool,
}

/// How a child takes part in its parent's flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowKind {
    StaticBlock,
    Positioned,
    Inline,
}

impl FlowKind {
    fn of(component: &Component) -> Self {
        match (&component.kind, component.style.position.is_positioned()) {
            (_, true) => Self::Positioned,
            (ComponentKind::Block { .. }, false) => Self::StaticBlock,
            (ComponentKind::Text(_), false) => Self::Inline,
        }
    }
}

/// Lay out the root's children into the content area of one page.
pub fn layout_page(
    ctx: &mut LayoutContext<'_>,
    root: &Component,
    content: Rect,
    resume: Option<&Resume>,
) -> FlowOutcome {
    let overflow = root.style.overflow.unwrap_or_default();
    let height = AvailableHeight::Definite(content.height);
    ctx.begin_page(ContainerFrame {
        source: root.id,
        origin: content.origin(),
        width: content.width,
        height,
        positioned: false,
        overflow,
    });
    let flow = flow_columns(ctx, root, content.width, height, true, resume);
    FlowOutcome {
        block: Block {
            source: root.id,
            bounds: Rect::new(content.x, content.y, content.width, flow.height),
            columns: flow.columns,
            regions: flow.regions,
            overflow,
        },
        resume: flow.resume,
        placed_any: flow.placed_any,
    }
}

/// Lay out a block child, tracking it in the diagnostics path.
fn layout_block(
    ctx: &mut LayoutContext<'_>,
    component: &Component,
    index: usize,
    space: &Space,
    resume: Option<&Resume>,
) -> FlowOutcome {
    ctx.enter(component.label(index));
    let geometry = resolve::resolve_geometry(ctx, &component.style);
    let outcome = layout_box(ctx, component, space, resume, &geometry);
    ctx.leave();
    outcome
}

/// Lay out a block within `space`. The caller places the returned block by
/// setting its offsets.
///
/// An explicit height is used verbatim. Under `Flow` content is laid out
/// against it and whatever does not fit is dropped; under `Clip` everything
/// is kept and the block overflows.
pub fn layout_box(
    ctx: &mut LayoutContext<'_>,
    component: &Component,
    space: &Space,
    resume: Option<&Resume>,
    geometry: &ResolvedGeometry,
) -> FlowOutcome {
    let overflow = component
        .style
        .overflow
        .unwrap_or_else(|| ctx.owner().overflow);
    let width = geometry.width.unwrap_or(space.width);
    let content_height = match (geometry.height, overflow) {
        (Some(height), OverflowAction::Flow) => AvailableHeight::Definite(height),
        (Some(_), OverflowAction::Clip) => AvailableHeight::Unbounded,
        (None, _) => space.height,
    };

    ctx.push_frame(ContainerFrame {
        source: component.id,
        origin: space.origin,
        width,
        height: geometry.height.map_or(space.height, AvailableHeight::Definite),
        positioned: component.style.position.is_positioned(),
        overflow,
    });
    let flow = flow_columns(ctx, component, width, content_height, space.fresh, resume);
    ctx.pop_frame();

    let mut resume = flow.resume;
    if geometry.height.is_some() && resume.is_some() {
        ctx.warn(
            DiagnosticKind::Overflow,
            "content truncated at the explicit height",
        );
        resume = None;
    }

    FlowOutcome {
        block: Block {
            source: component.id,
            bounds: Rect::new(
                LayoutUnit::zero(),
                LayoutUnit::zero(),
                width,
                geometry.height.unwrap_or(flow.height),
            ),
            columns: flow.columns,
            regions: flow.regions,
            overflow,
        },
        resume,
        placed_any: flow.placed_any,
    }
}

struct FlowResult {
    columns: Vec<Column>,
    regions: Vec<PositionedRegion>,
    height: LayoutUnit,
    resume: Option<Resume>,
    placed_any: bool,
}

/// Fill the columns of the block on top of the frame stack, one after
/// another. Only when the last column is full does the flow report a resume
/// point.
fn flow_columns(
    ctx: &mut LayoutContext<'_>,
    parent: &Component,
    width: LayoutUnit,
    height: AvailableHeight,
    fresh: bool,
    resume: Option<&Resume>,
) -> FlowResult {
    let children = parent.children();
    let (count, gap) = resolve::resolve_columns(ctx, &parent.style);
    let column_width = (width.saturating_sub(gap * (count - 1)) / count).clamp_non_negative();

    let mut regions = Vec::new();
    let mut columns = Vec::new();
    let mut placed_any = false;
    let mut pending = Some(resume.cloned().unwrap_or_default());
    for index in 0..count {
        let Some(start) = pending.take() else {
            break;
        };
        if index > 0 {
            ctx.record(
                DiagnosticLevel::Debug,
                DiagnosticKind::Pagination,
                format!("column break before child {}", start.child),
            );
        }
        let mut column = ColumnFlow::new((column_width + gap) * index, column_width, height, fresh);
        pending = column.run(ctx, children, &start, &mut regions);
        placed_any |= column.placed_any;
        columns.push(column.finish());
    }

    let used = columns
        .iter()
        .map(|column| column.bounds.height)
        .max()
        .unwrap_or_default();
    FlowResult {
        columns,
        regions,
        height: used,
        resume: pending,
        placed_any,
    }
}

/// Running state of one column.
struct ColumnFlow {
    x: LayoutUnit,
    width: LayoutUnit,
    height: AvailableHeight,
    fresh: bool,
    /// In-flow height used so far.
    cursor_y: LayoutUnit,
    /// Bottom of the lowest retained relative region.
    extent: LayoutUnit,
    contents: Vec<Content>,
    line: LineBuilder,
    placed_any: bool,
}

impl ColumnFlow {
    fn new(x: LayoutUnit, width: LayoutUnit, height: AvailableHeight, fresh: bool) -> Self {
        Self {
            x,
            width,
            height,
            fresh,
            cursor_y: LayoutUnit::zero(),
            extent: LayoutUnit::zero(),
            contents: Vec::new(),
            line: LineBuilder::default(),
            placed_any: false,
        }
    }

    /// Nothing with height precedes the cursor on a fresh page or column.
    fn at_top(&self) -> bool {
        self.fresh && self.cursor_y.is_zero()
    }

    fn run(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        children: &[Component],
        start: &Resume,
        regions: &mut Vec<PositionedRegion>,
    ) -> Option<Resume> {
        for (index, child) in children.iter().enumerate().skip(start.child) {
            if ctx.is_top_level() && ctx.poll_cancelled() {
                self.commit_line(ctx);
                return None;
            }
            let stop = match FlowKind::of(child) {
                FlowKind::Positioned => {
                    if index >= start.positioned_done {
                        self.place_positioned(ctx, child, index, regions);
                    }
                    None
                }
                FlowKind::Inline => self.flow_text(ctx, child, index, start),
                FlowKind::StaticBlock => self.flow_block(ctx, child, index, start),
            };
            if stop.is_some() {
                return stop;
            }
        }
        self.commit_line(ctx)
            .map(|position| resume_at(position, None, children.len(), start))
    }

    fn finish(self) -> Column {
        Column {
            bounds: Rect::new(
                self.x,
                LayoutUnit::zero(),
                self.width,
                self.cursor_y.max(self.extent),
            ),
            contents: self.contents,
        }
    }

    fn place_positioned(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        child: &Component,
        index: usize,
        regions: &mut Vec<PositionedRegion>,
    ) {
        let reference = RegionRef(regions.len());
        let occurrence = Point::new(self.x, self.cursor_y);
        let placed = regions::place(ctx, child, index, occurrence);
        if let Some(extent) = placed.extent {
            self.extent = self.extent.max(extent);
        }
        regions.push(placed.region);
        self.line.push_region(reference);
    }

    fn flow_text(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        child: &Component,
        index: usize,
        start: &Resume,
    ) -> Option<Resume> {
        let ComponentKind::Text(content) = &child.kind else {
            return None;
        };
        let first = if index == start.child { start.segment } else { 0 };
        let line_height = resolve::line_height(&child.style);
        // The begin marker travels with the first segment so it lands on the
        // same line.
        let mut begin = first == 0;
        for (segment_index, segment) in content.segments.iter().enumerate().skip(first) {
            let width = resolve::advance(segment.width);
            let trailing = resolve::advance(segment.trailing).min(width);
            if !self.line.fits(width, trailing, self.width)
                && let Some(position) = self.commit_line(ctx)
            {
                return Some(resume_at(position, None, index, start));
            }
            if begin {
                self.line.push_marker(MarkerRun::Begin);
                begin = false;
            }
            self.line.push_segment(
                FlowPosition {
                    child: index,
                    segment: segment_index,
                },
                &segment.text,
                width,
                trailing,
                line_height,
            );
        }
        if begin {
            self.line.push_marker(MarkerRun::Begin);
        }
        self.line.push_marker(MarkerRun::End);
        None
    }

    fn flow_block(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        child: &Component,
        index: usize,
        start: &Resume,
    ) -> Option<Resume> {
        if let Some(position) = self.commit_line(ctx) {
            return Some(resume_at(position, None, index, start));
        }
        let incoming = if index == start.child {
            start.inner.as_deref()
        } else {
            None
        };
        let available = self.height.remaining_after(self.cursor_y);
        let at_top = self.at_top();
        let mut space = Space {
            width: self.width,
            height: available,
            fresh: at_top,
            origin: ctx.owner().origin.offset(self.x, self.cursor_y),
        };
        let move_whole = |inner: Option<&Resume>| {
            resume_at(
                FlowPosition {
                    child: index,
                    segment: 0,
                },
                inner.cloned().map(Box::new),
                index,
                start,
            )
        };

        let mark = ctx.diagnostics.mark();
        if child.style.height.is_some() || !child.style.breakable {
            space.height = AvailableHeight::Unbounded;
            let mut outcome = layout_block(ctx, child, index, &space, None);
            if !available.fits(outcome.block.height()) {
                if !at_top {
                    debug!("{} moved to the next page", child.label(index));
                    ctx.diagnostics.rollback(mark);
                    return Some(move_whole(None));
                }
                place_oversized(ctx, child, index, &mut outcome.block);
            }
            self.push_block(outcome.block);
            return None;
        }

        let outcome = layout_block(ctx, child, index, &space, incoming);
        match outcome.resume {
            None => {
                self.push_block(outcome.block);
                None
            }
            Some(_) if !outcome.placed_any && !at_top => {
                debug!("{} moved to the next page", child.label(index));
                ctx.diagnostics.rollback(mark);
                Some(move_whole(incoming))
            }
            Some(inner) => {
                self.push_block(outcome.block);
                Some(resume_at(
                    FlowPosition {
                        child: index,
                        segment: 0,
                    },
                    Some(Box::new(inner)),
                    index,
                    start,
                ))
            }
        }
    }

    fn push_block(&mut self, mut block: Block) {
        block.bounds.x = self.x;
        block.bounds.y = self.cursor_y;
        self.cursor_y += block.height();
        self.placed_any = true;
        self.contents.push(Content::Block(block));
    }

    /// Close the open line and place it. Returns the line's start when it
    /// does not fit and has to continue on the next page or column.
    fn commit_line(&mut self, ctx: &mut LayoutContext<'_>) -> Option<FlowPosition> {
        if self.line.is_empty() {
            return None;
        }
        let builder = mem::take(&mut self.line);
        let has_text = builder.has_text();
        let (mut line, start) = builder.finish(self.cursor_y);

        let fits = line.height.is_zero()
            || self
                .height
                .remaining_after(self.cursor_y)
                .fits(line.height);
        if !fits {
            if !self.at_top()
                && let Some(position) = start
            {
                self.defer_line(ctx, &line);
                return Some(position);
            }
            match ctx.owner().overflow {
                OverflowAction::Flow => {
                    ctx.warn(
                        DiagnosticKind::Overflow,
                        "line taller than an empty page; rendered with zero height",
                    );
                    line.height = LayoutUnit::zero();
                }
                OverflowAction::Clip => ctx.warn(
                    DiagnosticKind::Overflow,
                    "line taller than an empty page; kept at full height",
                ),
            }
        }

        self.cursor_y += line.height;
        self.placed_any |= has_text;
        self.contents.push(Content::Line(line));
        None
    }

    /// Keep the region markers of a line that moves on; its text is laid out
    /// again from the line start.
    fn defer_line(&mut self, ctx: &mut LayoutContext<'_>, line: &Line) {
        ctx.record(
            DiagnosticLevel::Debug,
            DiagnosticKind::Pagination,
            format!("line at {} continues on the next page", self.cursor_y),
        );
        let runs: SmallVec<Run, 4> = line.region_refs().map(Run::Region).collect();
        if !runs.is_empty() {
            self.contents.push(Content::Line(Line {
                offset_y: self.cursor_y,
                width: LayoutUnit::zero(),
                height: LayoutUnit::zero(),
                runs,
            }));
        }
    }
}

/// A non-breakable block taller than an empty page. Under `Flow` it
/// collapses to zero height; under `Clip` it keeps its full size.
fn place_oversized(
    ctx: &mut LayoutContext<'_>,
    child: &Component,
    index: usize,
    block: &mut Block,
) {
    ctx.enter(child.label(index));
    match ctx.owner().overflow {
        OverflowAction::Flow => {
            ctx.warn(
                DiagnosticKind::Overflow,
                format!(
                    "height {} does not fit an empty page; rendered with zero height",
                    block.height()
                ),
            );
            block.bounds.height = LayoutUnit::zero();
            block.columns.clear();
            block.regions.clear();
        }
        OverflowAction::Clip => ctx.warn(
            DiagnosticKind::Overflow,
            format!(
                "height {} does not fit an empty page; kept at full size",
                block.height()
            ),
        ),
    }
    ctx.leave();
}

fn resume_at(
    position: FlowPosition,
    inner: Option<Box<Resume>>,
    index: usize,
    start: &Resume,
) -> Resume {
    Resume {
        child: position.child,
        segment: position.segment,
        inner,
        positioned_done: start.positioned_done.max(index),
    }
}
