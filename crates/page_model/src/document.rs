//! The paginated geometry tree produced by a layout pass.
//!
//! Every entity is built once, bottom-up, and linked into its parent only
//! when complete. In-flow content lives in `Block::columns`; out-of-flow
//! content lives in `Block::regions` and is referenced from the flow by a
//! zero-size [`Run::Region`] marker holding a [`RegionRef`] into the same
//! block's region list.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{ComponentId, LayoutUnit, OverflowAction, PositionMode, Rect, Size};

/// Whole paginated result.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    pub pages: Vec<Page>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LayoutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Diagnostics of the given kind, in recording order.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub index: usize,
    pub size: Size,
    /// The page's content block. Its bounds are relative to the page.
    pub content: Block,
}

/// A laid-out block-level box.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub source: ComponentId,
    /// Offset within the parent plus the block's own size.
    pub bounds: Rect,
    pub columns: Vec<Column>,
    /// Out-of-flow regions in encounter order.
    pub regions: Vec<PositionedRegion>,
    /// Overflow action resolved for this block's content.
    pub overflow: OverflowAction,
}

impl Block {
    pub fn offset_x(&self) -> LayoutUnit {
        self.bounds.x
    }

    pub fn offset_y(&self) -> LayoutUnit {
        self.bounds.y
    }

    pub fn width(&self) -> LayoutUnit {
        self.bounds.width
    }

    pub fn height(&self) -> LayoutUnit {
        self.bounds.height
    }

    /// Resolve a marker's reference to the region this block owns.
    pub fn region(&self, reference: RegionRef) -> Option<&PositionedRegion> {
        self.regions.get(reference.0)
    }

    /// Widest piece of in-flow content, used as the natural width of
    /// shrink-to-fit boxes.
    pub fn content_width(&self) -> LayoutUnit {
        self.columns
            .iter()
            .flat_map(|column| column.contents.iter())
            .map(|content| match content {
                Content::Line(line) => line.width,
                Content::Block(block) => block.offset_x() + block.width(),
            })
            .max()
            .unwrap_or_default()
    }

    /// All lines placed directly in this block's columns, in column order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.columns
            .iter()
            .flat_map(|column| column.contents.iter())
            .filter_map(|content| match content {
                Content::Line(line) => Some(line),
                Content::Block(_) => None,
            })
    }

    /// Nested in-flow blocks placed directly in this block's columns.
    pub fn child_blocks(&self) -> impl Iterator<Item = &Self> {
        self.columns
            .iter()
            .flat_map(|column| column.contents.iter())
            .filter_map(|content| match content {
                Content::Block(block) => Some(block),
                Content::Line(_) => None,
            })
    }
}

/// One flow column inside a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Position within the owning block's content box.
    pub bounds: Rect,
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Line(Line),
    Block(Block),
}

impl Content {
    pub fn height(&self) -> LayoutUnit {
        match self {
            Self::Line(line) => line.height,
            Self::Block(block) => block.height(),
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Self::Line(line) => Some(line),
            Self::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Self::Block(block) => Some(block),
            Self::Line(_) => None,
        }
    }
}

/// One line of inline content.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Offset of the line's top within its column.
    pub offset_y: LayoutUnit,
    pub width: LayoutUnit,
    pub height: LayoutUnit,
    pub runs: SmallVec<Run, 4>,
}

impl Line {
    /// Region markers on this line, in order.
    pub fn region_refs(&self) -> impl Iterator<Item = RegionRef> + '_ {
        self.runs.iter().filter_map(|run| match run {
            Run::Region(reference) => Some(*reference),
            Run::Text(_) | Run::Marker(_) => None,
        })
    }

    /// Concatenated characters of all text runs on the line.
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .filter_map(|run| match run {
                Run::Text(text) => Some(text.characters.as_str()),
                Run::Marker(_) | Run::Region(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    Text(TextRun),
    Marker(MarkerRun),
    /// Zero-size placeholder for out-of-flow content.
    Region(RegionRef),
}

impl Run {
    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Self::Text(text) => Some(text),
            Self::Marker(_) | Self::Region(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub characters: String,
    pub width: LayoutUnit,
}

/// Brackets the runs of one text component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRun {
    Begin,
    End,
}

/// Index of a region within its owning block's `regions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionRef(pub usize);

/// Which box a positioned region's offsets were measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceBox {
    /// The block that owns the region.
    Parent,
    /// A positioned ancestor further up the tree.
    PositionedAncestor(ComponentId),
    /// The page content block.
    Page,
}

/// Out-of-flow placed content.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRegion {
    pub source: ComponentId,
    pub mode: PositionMode,
    pub reference: ReferenceBox,
    /// Placement within the owning block plus the region's size. The zero
    /// rectangle when suppressed.
    pub bounds: Rect,
    /// The laid-out box, offset (0,0) within the region. `None` when suppressed.
    pub contents: Option<Block>,
}

impl PositionedRegion {
    pub fn is_suppressed(&self) -> bool {
        self.contents.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An explicit size or offset was negative, too large or not finite and
    /// was clamped.
    Geometry,
    /// Content was truncated, suppressed or collapsed to zero height.
    Overflow,
    /// Page and column breaks.
    Pagination,
}

/// One recorded layout event, attributed to the box that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub kind: DiagnosticKind,
    /// Slash separated labels from the root to the box.
    pub path: String,
    pub message: String,
}
