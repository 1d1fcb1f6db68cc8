//! Per-pass state threaded through the flow engine.
//!
//! The context owns the stack of containing frames (used to find reference
//! boxes for positioned content), the diagnostics path and the collector.

use page_model::{
    ComponentId, DiagnosticKind, DiagnosticLevel, LayoutUnit, OverflowAction, Point, ReferenceBox,
};

use crate::diagnostics::Diagnostics;
use crate::{CancellationToken, LayoutOptions};

/// Vertical space a flow may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailableHeight {
    Definite(LayoutUnit),
    /// No bottom edge; nothing ever breaks.
    Unbounded,
}

impl AvailableHeight {
    /// Space left below `used`. May go negative.
    #[must_use]
    pub const fn remaining_after(self, used: LayoutUnit) -> Self {
        match self {
            Self::Definite(height) => Self::Definite(height.saturating_sub(used)),
            Self::Unbounded => Self::Unbounded,
        }
    }

    pub fn fits(self, height: LayoutUnit) -> bool {
        match self {
            Self::Definite(available) => height <= available,
            Self::Unbounded => true,
        }
    }

    /// True when the bottom edge is at or above the top.
    pub fn is_exhausted(self) -> bool {
        match self {
            Self::Definite(available) => !available.is_positive(),
            Self::Unbounded => false,
        }
    }
}

/// Input constraints handed from a parent flow to a child box.
#[derive(Debug, Clone, Copy)]
pub struct Space {
    pub width: LayoutUnit,
    pub height: AvailableHeight,
    /// The box starts at the top of an otherwise empty page or column.
    pub fresh: bool,
    /// Page-absolute position of the box's top-left corner.
    pub origin: Point,
}

/// A block whose children are currently being flowed.
#[derive(Debug, Clone, Copy)]
pub struct ContainerFrame {
    pub source: ComponentId,
    /// Page-absolute position of the block's content origin.
    pub origin: Point,
    pub width: LayoutUnit,
    pub height: AvailableHeight,
    /// Non-static boxes are reference boxes for absolute descendants.
    pub positioned: bool,
    pub overflow: OverflowAction,
}

pub struct LayoutContext<'run> {
    cancel: Option<&'run CancellationToken>,
    pub diagnostics: Diagnostics,
    page: ContainerFrame,
    frames: Vec<ContainerFrame>,
    path: Vec<String>,
    cancelled: bool,
}

impl<'run> LayoutContext<'run> {
    pub fn new(
        options: &LayoutOptions,
        cancel: Option<&'run CancellationToken>,
        page: ContainerFrame,
    ) -> Self {
        Self {
            cancel,
            diagnostics: Diagnostics::new(options.record_level, options.collect_diagnostics),
            page,
            frames: Vec::new(),
            path: Vec::new(),
            cancelled: false,
        }
    }

    /// Reset the frame stack for a new page.
    pub fn begin_page(&mut self, page: ContainerFrame) {
        self.page = page;
        self.frames.clear();
    }

    pub fn push_frame(&mut self, frame: ContainerFrame) {
        self.frames.push(frame);
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// The block that owns the content being flowed.
    pub fn owner(&self) -> ContainerFrame {
        self.frames.last().copied().unwrap_or(self.page)
    }

    /// True while flowing the page content block's own children.
    pub fn is_top_level(&self) -> bool {
        self.frames.is_empty()
    }

    /// Reference box for absolutely positioned content: the nearest positioned
    /// frame, else the page content block.
    pub fn absolute_reference(&self) -> (ReferenceBox, ContainerFrame) {
        let depth = self.frames.len();
        self.frames
            .iter()
            .enumerate()
            .rev()
            .find(|(_, frame)| frame.positioned)
            .map_or((ReferenceBox::Page, self.page), |(index, frame)| {
                if index + 1 == depth {
                    (ReferenceBox::Parent, *frame)
                } else {
                    (ReferenceBox::PositionedAncestor(frame.source), *frame)
                }
            })
    }

    pub fn enter(&mut self, label: String) {
        self.path.push(label);
    }

    pub fn leave(&mut self) {
        self.path.pop();
    }

    pub fn path(&self) -> String {
        self.path.join("/")
    }

    pub fn record(
        &mut self,
        level: DiagnosticLevel,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) {
        let path = self.path();
        self.diagnostics.record(level, kind, &path, message);
    }

    pub fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.record(DiagnosticLevel::Warning, kind, message);
    }

    /// Poll the token; once it has fired the pass stays cancelled.
    pub fn poll_cancelled(&mut self) -> bool {
        if !self.cancelled && self.cancel.is_some_and(CancellationToken::is_cancelled) {
            self.record(
                DiagnosticLevel::Info,
                DiagnosticKind::Pagination,
                "layout cancelled",
            );
            self.cancelled = true;
        }
        self.cancelled
    }

    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn finish(self) -> Diagnostics {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(source: u32, positioned: bool) -> ContainerFrame {
        ContainerFrame {
            source: ComponentId(source),
            origin: Point::new(
                LayoutUnit::from_pt(source as f32),
                LayoutUnit::zero(),
            ),
            width: LayoutUnit::from_pt(100.0),
            height: AvailableHeight::Unbounded,
            positioned,
            overflow: OverflowAction::Flow,
        }
    }

    /// The nearest positioned frame wins; without one the page is used.
    ///
    /// # Panics
    /// Panics if the wrong reference box is chosen.
    #[test]
    fn absolute_reference_lookup() {
        let options = LayoutOptions::default();
        let mut ctx = LayoutContext::new(&options, None, frame(1, false));
        assert_eq!(ctx.absolute_reference().0, ReferenceBox::Page);

        ctx.push_frame(frame(2, true));
        ctx.push_frame(frame(3, false));
        let (reference, found) = ctx.absolute_reference();
        assert_eq!(reference, ReferenceBox::PositionedAncestor(ComponentId(2)));
        assert_eq!(found.source, ComponentId(2));

        ctx.push_frame(frame(4, true));
        assert_eq!(ctx.absolute_reference().0, ReferenceBox::Parent);
        assert_eq!(ctx.owner().source, ComponentId(4));
        assert!(!ctx.is_top_level());
    }

    /// Remaining space shrinks and saturates; unbounded space never runs out.
    ///
    /// # Panics
    /// Panics if the arithmetic is wrong.
    #[test]
    fn available_height() {
        let height = AvailableHeight::Definite(LayoutUnit::from_pt(842.0));
        let rest = height.remaining_after(LayoutUnit::from_pt(800.0));
        assert_eq!(rest, AvailableHeight::Definite(LayoutUnit::from_pt(42.0)));
        assert!(rest.fits(LayoutUnit::from_pt(25.0)));
        assert!(!rest.fits(LayoutUnit::from_pt(50.0)));
        assert!(height.remaining_after(LayoutUnit::from_pt(900.0)).is_exhausted());
        assert!(AvailableHeight::Unbounded.fits(LayoutUnit::from_pt(1e12)));
    }
}
