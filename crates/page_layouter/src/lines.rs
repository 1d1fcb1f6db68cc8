//! Assembly of inline runs into lines.

use log::trace;
use page_model::{LayoutUnit, Line, MarkerRun, RegionRef, Run, TextRun};
use smallvec::SmallVec;

/// Position of a text segment within a block's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowPosition {
    pub child: usize,
    pub segment: usize,
}

/// The currently open line of a column.
#[derive(Debug, Default)]
pub struct LineBuilder {
    runs: SmallVec<Run, 4>,
    width: LayoutUnit,
    /// Trailing whitespace advance of the last text segment.
    trailing: LayoutUnit,
    height: LayoutUnit,
    /// First text segment on the line.
    start: Option<FlowPosition>,
    /// Child whose text run is still accepting segments.
    open_text: Option<usize>,
}

impl LineBuilder {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub const fn has_text(&self) -> bool {
        self.start.is_some()
    }

    /// Whether a segment fits beside what is already on the line. A line
    /// without text accepts anything.
    pub fn fits(&self, width: LayoutUnit, trailing: LayoutUnit, max_width: LayoutUnit) -> bool {
        !self.has_text() || self.width + width - trailing <= max_width
    }

    pub fn push_marker(&mut self, marker: MarkerRun) {
        self.open_text = None;
        self.runs.push(Run::Marker(marker));
    }

    pub fn push_region(&mut self, reference: RegionRef) {
        self.open_text = None;
        self.runs.push(Run::Region(reference));
    }

    pub fn push_segment(
        &mut self,
        position: FlowPosition,
        text: &str,
        width: LayoutUnit,
        trailing: LayoutUnit,
        line_height: LayoutUnit,
    ) {
        let merged = match (self.open_text, self.runs.last_mut()) {
            (Some(child), Some(Run::Text(run))) if child == position.child => {
                run.characters.push_str(text);
                run.width += width;
                true
            }
            _ => false,
        };
        if !merged {
            self.runs.push(Run::Text(TextRun {
                characters: text.to_owned(),
                width,
            }));
        }
        self.open_text = Some(position.child);
        self.width += width;
        self.trailing = trailing;
        self.height = self.height.max(line_height);
        self.start.get_or_insert(position);
    }

    /// Close the line at `offset_y`, trimming trailing whitespace from the
    /// last text run.
    pub fn finish(mut self, offset_y: LayoutUnit) -> (Line, Option<FlowPosition>) {
        if let Some(Run::Text(run)) = self
            .runs
            .iter_mut()
            .rev()
            .find(|run| matches!(run, Run::Text(_)))
        {
            let trimmed = run.characters.trim_end().len();
            run.characters.truncate(trimmed);
            run.width = run.width.saturating_sub(self.trailing).clamp_non_negative();
        }
        let width = self.width.saturating_sub(self.trailing).clamp_non_negative();
        trace!(
            "line closed y={offset_y} width={width} height={} runs={}",
            self.height,
            self.runs.len()
        );
        let line = Line {
            offset_y,
            width,
            height: self.height,
            runs: self.runs,
        };
        (line, self.start)
    }
}
