use core::fmt;
use std::error::Error;

use page_model::LayoutDocument;

/// Errors that abort a layout pass.
///
/// Geometry and overflow problems never abort; they are recorded as
/// diagnostics and layout continues.
#[derive(Debug, Clone)]
pub enum LayoutError {
    /// The root component is a text leaf rather than a section block.
    RootNotBlock,
    /// A region marker and the regions of its block disagree.
    Structural { path: String, detail: String },
    /// The cancellation token fired. Carries the pages completed so far.
    Cancelled { partial: Box<LayoutDocument> },
    /// More pages than `LayoutOptions::max_pages` would be produced.
    PageLimit { limit: usize },
    /// A page was produced without consuming any content.
    Stalled { page: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotBlock => write!(formatter, "Root component must be a block"),
            Self::Structural { path, detail } => {
                write!(formatter, "Structural error at {path}: {detail}")
            }
            Self::Cancelled { partial } => {
                write!(formatter, "Layout cancelled after {} page(s)", partial.pages.len())
            }
            Self::PageLimit { limit } => write!(formatter, "Page limit of {limit} exceeded"),
            Self::Stalled { page } => write!(formatter, "No content placed on page {page}"),
        }
    }
}

impl Error for LayoutError {}
