//! Top-level layout driver: pagination over the root section.

use log::{debug, info};
use page_model::{
    Component, ComponentKind, DiagnosticKind, DiagnosticLevel, LayoutDocument, Page,
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug_span, info_span};

use crate::block_flow::{self, Resume};
use crate::context::{AvailableHeight, ContainerFrame, LayoutContext};
use crate::error::LayoutError;
use crate::{CancellationToken, LayoutOptions, PageDefaults, verify};

/// Lays out component trees into paginated documents.
#[derive(Debug, Clone, Default)]
pub struct LayoutDriver {
    options: LayoutOptions,
    cancel: Option<CancellationToken>,
}

impl LayoutDriver {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            cancel: None,
        }
    }

    /// Check `token` between top-level children and stop early once it fires.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub const fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay out `root` into pages.
    ///
    /// The root is the page-level section: its children flow into each page's
    /// content block and its overflow action is the page policy.
    ///
    /// # Errors
    /// Returns [`LayoutError::Cancelled`] with the pages completed so far when
    /// the cancellation token fires, [`LayoutError::Structural`] when region
    /// verification fails, and [`LayoutError::PageLimit`] or
    /// [`LayoutError::Stalled`] when pagination cannot finish.
    pub fn run(&self, root: &Component, page: &PageDefaults) -> Result<LayoutDocument, LayoutError> {
        let _span = info_span!("layout.run").entered();
        if matches!(root.kind, ComponentKind::Text(_)) {
            return Err(LayoutError::RootNotBlock);
        }

        let size = page.size();
        let content = page.content_rect();
        let frame = ContainerFrame {
            source: root.id,
            origin: content.origin(),
            width: content.width,
            height: AvailableHeight::Definite(content.height),
            positioned: false,
            overflow: root.style.overflow.unwrap_or_default(),
        };
        let mut ctx = LayoutContext::new(&self.options, self.cancel.as_ref(), frame);
        ctx.enter(root.name.clone().unwrap_or_else(|| "root".to_owned()));

        let mut pages = Vec::new();
        let mut resume: Option<Resume> = None;
        loop {
            if pages.len() >= self.options.max_pages {
                return Err(LayoutError::PageLimit {
                    limit: self.options.max_pages,
                });
            }
            let index = pages.len();
            let outcome = {
                let _page_span = debug_span!("layout.page", index).entered();
                block_flow::layout_page(&mut ctx, root, content, resume.as_ref())
            };
            debug!(
                "page {index} laid out: height={} resume={:?}",
                outcome.block.height(),
                outcome.resume
            );
            pages.push(Page {
                index,
                size,
                content: outcome.block,
            });

            if ctx.is_cancelled() {
                let partial = LayoutDocument {
                    pages,
                    diagnostics: ctx.finish().into_entries(),
                };
                return Err(LayoutError::Cancelled {
                    partial: Box::new(partial),
                });
            }
            match outcome.resume {
                None => break,
                Some(next) => {
                    if !outcome.placed_any && resume.as_ref() == Some(&next) {
                        return Err(LayoutError::Stalled { page: index });
                    }
                    ctx.record(
                        DiagnosticLevel::Debug,
                        DiagnosticKind::Pagination,
                        format!("page break after page {index}"),
                    );
                    resume = Some(next);
                }
            }
        }

        let document = LayoutDocument {
            pages,
            diagnostics: ctx.finish().into_entries(),
        };
        if self.options.verify_regions {
            verify::verify_document(&document)?;
        }
        info!(
            "layout complete: {} page(s), {} diagnostic(s)",
            document.pages.len(),
            document.diagnostics.len()
        );
        Ok(document)
    }

    /// Lay out independent documents, on the rayon pool when the `parallel`
    /// feature is enabled.
    #[cfg(feature = "parallel")]
    pub fn run_all(
        &self,
        roots: &[Component],
        page: &PageDefaults,
    ) -> Vec<Result<LayoutDocument, LayoutError>> {
        roots.par_iter().map(|root| self.run(root, page)).collect()
    }

    /// Lay out independent documents one after another.
    #[cfg(not(feature = "parallel"))]
    pub fn run_all(
        &self,
        roots: &[Component],
        page: &PageDefaults,
    ) -> Vec<Result<LayoutDocument, LayoutError>> {
        roots.iter().map(|root| self.run(root, page)).collect()
    }
}
