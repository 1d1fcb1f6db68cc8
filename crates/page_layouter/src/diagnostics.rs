//! Collector for geometry, overflow and pagination events.
//!
//! Every event is forwarded to the `log` facade. When collection is switched
//! on, events at or above the configured level are also kept and end up in
//! `LayoutDocument::diagnostics`.

use log::{debug, error, info, warn};
use page_model::{Diagnostic, DiagnosticKind, DiagnosticLevel};

#[derive(Debug, Clone)]
pub struct Diagnostics {
    record_level: DiagnosticLevel,
    collecting: bool,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// With `collecting` off events only go to `log`.
    pub const fn new(record_level: DiagnosticLevel, collecting: bool) -> Self {
        Self {
            record_level,
            collecting,
            entries: Vec::new(),
        }
    }

    /// Position to return to with [`Self::rollback`].
    pub fn mark(&self) -> usize {
        self.entries.len()
    }

    /// Drop entries recorded since `mark`, for layout attempts that were
    /// thrown away.
    pub fn rollback(&mut self, mark: usize) {
        if self.entries.len() > mark {
            debug!("discarding {} diagnostic(s)", self.entries.len() - mark);
            self.entries.truncate(mark);
        }
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    pub fn record(
        &mut self,
        level: DiagnosticLevel,
        kind: DiagnosticKind,
        path: &str,
        message: impl Into<String>,
    ) {
        let message = message.into();
        match level {
            DiagnosticLevel::Debug => debug!("[{kind:?}] {path}: {message}"),
            DiagnosticLevel::Info => info!("[{kind:?}] {path}: {message}"),
            DiagnosticLevel::Warning => warn!("[{kind:?}] {path}: {message}"),
            DiagnosticLevel::Error => error!("[{kind:?}] {path}: {message}"),
        }
        if self.collecting && level >= self.record_level {
            self.entries.push(Diagnostic {
                level,
                kind,
                path: path.to_owned(),
                message,
            });
        }
    }
}
