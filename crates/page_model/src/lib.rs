//! Data model for paginated layout: the styled component tree that goes in and
//! the page geometry tree that comes out.

pub mod component;
pub mod document;
pub mod geometry;
pub mod layout_unit;
pub mod style;

pub use component::{Component, ComponentId, ComponentKind, Segment, TextContent};
pub use document::{
    Block, Column, Content, Diagnostic, DiagnosticKind, DiagnosticLevel, LayoutDocument, Line,
    MarkerRun, Page, PositionedRegion, ReferenceBox, RegionRef, Run, TextRun,
};
pub use geometry::{Edges, Point, Rect, Size};
pub use layout_unit::LayoutUnit;
pub use style::{FontMetrics, OverflowAction, PositionMode, StyleSnapshot};
