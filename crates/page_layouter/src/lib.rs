//! Paginated flow and positioned layout.
//!
//! [`LayoutDriver::run`] turns a styled [`Component`] tree into a
//! [`LayoutDocument`]: pages of columns holding lines and nested blocks, plus
//! out-of-flow [`page_model::PositionedRegion`]s for relatively and absolutely
//! positioned boxes. Each region is referenced from the normal flow by a
//! zero-size marker run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use page_model::{DiagnosticLevel, Edges, LayoutUnit, Rect, Size};
use serde::{Deserialize, Serialize};

mod block_flow;
mod context;
pub mod diagnostics;
mod driver;
mod error;
mod lines;
pub mod printing;
mod regions;
mod resolve;
pub mod text;
pub mod verify;

pub use driver::LayoutDriver;
pub use error::LayoutError;
pub use page_model::{Component, LayoutDocument};

/// Layout constants for one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Keep diagnostics in `LayoutDocument::diagnostics`. When off they are
    /// only logged.
    pub collect_diagnostics: bool,
    /// Lowest diagnostic level kept in `LayoutDocument::diagnostics`.
    pub record_level: DiagnosticLevel,
    /// Check marker and region correlation after layout.
    pub verify_regions: bool,
    /// Upper bound on pages per document.
    pub max_pages: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            collect_diagnostics: true,
            record_level: DiagnosticLevel::Info,
            verify_regions: true,
            max_pages: 10_000,
        }
    }
}

/// Page geometry shared by every page of a document, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageDefaults {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for PageDefaults {
    /// A4 portrait with no margins.
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 0.0,
        }
    }
}

impl PageDefaults {
    pub fn size(&self) -> Size {
        Size::from_pt(self.width, self.height).clamped()
    }

    pub fn margins(&self) -> Edges {
        Edges::uniform(LayoutUnit::from_pt(self.margin).clamp_non_negative())
    }

    /// Content area within the page.
    pub fn content_rect(&self) -> Rect {
        let size = self.size();
        let margins = self.margins();
        Rect::new(
            margins.left,
            margins.top,
            size.width.saturating_sub(margins.horizontal()).clamp_non_negative(),
            size.height.saturating_sub(margins.vertical()).clamp_non_negative(),
        )
    }
}

/// Cooperative cancellation shared between a caller and a running pass.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
