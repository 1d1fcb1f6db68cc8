//! Deterministic text dump of a laid-out document, for debugging and
//! snapshot-style assertions.

use core::fmt::{self, Write as _};

use page_model::{Block, Content, LayoutDocument, Line, MarkerRun, PositionedRegion, Rect, Run};

/// Render `document` as an indented outline.
pub fn dump_document(document: &LayoutDocument) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ignored = write_document(&mut out, document);
    out
}

/// Render a single block subtree.
pub fn dump_block(block: &Block) -> String {
    let mut out = String::new();
    let _ignored = write_block(&mut out, block, 0);
    out
}

fn write_indent(out: &mut String, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str("  ")?;
    }
    Ok(())
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

fn rect(bounds: &Rect) -> String {
    format!(
        "({}, {}) {}x{}",
        bounds.x, bounds.y, bounds.width, bounds.height
    )
}

fn write_document(out: &mut String, document: &LayoutDocument) -> fmt::Result {
    writeln!(out, "DOCUMENT pages={}", document.pages.len())?;
    for page in &document.pages {
        writeln!(
            out,
            "  PAGE {} {}x{}",
            page.index, page.size.width, page.size.height
        )?;
        write_block(out, &page.content, 2)?;
    }
    for diagnostic in &document.diagnostics {
        writeln!(
            out,
            "  {:?} {:?} {}: {}",
            diagnostic.level, diagnostic.kind, diagnostic.path, diagnostic.message
        )?;
    }
    Ok(())
}

fn write_block(out: &mut String, block: &Block, depth: usize) -> fmt::Result {
    write_indent(out, depth)?;
    writeln!(
        out,
        "BLOCK {} {} {:?}",
        block.source,
        rect(&block.bounds),
        block.overflow
    )?;
    for column in &block.columns {
        write_indent(out, depth + 1)?;
        writeln!(out, "COLUMN {}", rect(&column.bounds))?;
        for content in &column.contents {
            match content {
                Content::Line(line) => write_line(out, line, depth + 2)?,
                Content::Block(child) => write_block(out, child, depth + 2)?,
            }
        }
    }
    for (index, region) in block.regions.iter().enumerate() {
        write_region(out, index, region, depth + 1)?;
    }
    Ok(())
}

fn write_line(out: &mut String, line: &Line, depth: usize) -> fmt::Result {
    write_indent(out, depth)?;
    write!(
        out,
        "LINE y={} w={} h={}",
        line.offset_y, line.width, line.height
    )?;
    for run in &line.runs {
        match run {
            Run::Text(text) => write!(out, " \"{}\"", escape_text(&text.characters))?,
            Run::Marker(MarkerRun::Begin) => out.write_str(" <begin>")?,
            Run::Marker(MarkerRun::End) => out.write_str(" <end>")?,
            Run::Region(reference) => write!(out, " <region {}>", reference.0)?,
        }
    }
    out.write_char('\n')
}

fn write_region(
    out: &mut String,
    index: usize,
    region: &PositionedRegion,
    depth: usize,
) -> fmt::Result {
    write_indent(out, depth)?;
    write!(
        out,
        "REGION {index} {} {:?} ref={:?}",
        region.source, region.mode, region.reference
    )?;
    match &region.contents {
        None => writeln!(out, " suppressed"),
        Some(contents) => {
            writeln!(out, " {}", rect(&region.bounds))?;
            write_block(out, contents, depth + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use page_model::{Column, ComponentId, LayoutUnit, OverflowAction, TextRun};
    use smallvec::SmallVec;

    use super::*;

    /// Lines print their runs in order with quoted, escaped text.
    ///
    /// # Panics
    /// Panics if the dump format changes.
    #[test]
    fn dumps_lines_and_markers() {
        let mut runs = SmallVec::new();
        runs.push(Run::Marker(MarkerRun::Begin));
        runs.push(Run::Text(TextRun {
            characters: "say \"hi\"".to_owned(),
            width: LayoutUnit::from_pt(80.0),
        }));
        runs.push(Run::Marker(MarkerRun::End));
        let block = Block {
            source: ComponentId(4),
            bounds: Rect::from_pt(0.0, 0.0, 100.0, 25.0),
            columns: vec![Column {
                bounds: Rect::from_pt(0.0, 0.0, 100.0, 25.0),
                contents: vec![Content::Line(Line {
                    offset_y: LayoutUnit::zero(),
                    width: LayoutUnit::from_pt(80.0),
                    height: LayoutUnit::from_pt(25.0),
                    runs,
                })],
            }],
            regions: Vec::new(),
            overflow: OverflowAction::Flow,
        };
        let expected = "BLOCK #4 (0, 0) 100x25 Flow\n  COLUMN (0, 0) 100x25\n    LINE y=0 w=80 h=25 <begin> \"say \\\"hi\\\"\" <end>\n";
        assert_eq!(dump_block(&block), expected);
    }
}
