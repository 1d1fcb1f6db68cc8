//! Structural checks on a finished document.
//!
//! Every region marker must resolve to a region of the block whose columns
//! hold the line, every region must be referenced exactly once, and the block
//! inside a region must sit at offset (0,0).

use page_model::{Block, Content, LayoutDocument, LayoutUnit};

use crate::error::LayoutError;

/// # Errors
/// Returns [`LayoutError::Structural`] naming the first offending block.
pub fn verify_document(document: &LayoutDocument) -> Result<(), LayoutError> {
    for page in &document.pages {
        verify_block(&page.content, &format!("page[{}]/{}", page.index, page.content.source))?;
    }
    Ok(())
}

/// # Errors
/// Returns [`LayoutError::Structural`] when `block` or a descendant is
/// inconsistent.
pub fn verify_block(block: &Block, path: &str) -> Result<(), LayoutError> {
    let structural = |detail: String| LayoutError::Structural {
        path: path.to_owned(),
        detail,
    };

    let mut references = vec![0_usize; block.regions.len()];
    for content in block.columns.iter().flat_map(|column| column.contents.iter()) {
        match content {
            Content::Line(line) => {
                for reference in line.region_refs() {
                    let count = references.get_mut(reference.0).ok_or_else(|| {
                        structural(format!(
                            "marker references region {} of {}",
                            reference.0,
                            block.regions.len()
                        ))
                    })?;
                    *count += 1;
                }
            }
            Content::Block(child) => verify_block(child, &format!("{path}/{}", child.source))?,
        }
    }

    for (index, (region, count)) in block.regions.iter().zip(&references).enumerate() {
        if *count != 1 {
            return Err(structural(format!(
                "region {index} is referenced {count} times"
            )));
        }
        let Some(contents) = &region.contents else {
            continue;
        };
        if contents.offset_x() != LayoutUnit::zero() || contents.offset_y() != LayoutUnit::zero() {
            return Err(structural(format!(
                "region {index} contents offset ({}, {})",
                contents.offset_x(),
                contents.offset_y()
            )));
        }
        verify_block(contents, &format!("{path}/region[{index}]"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use page_model::{
        Column, ComponentId, Line, OverflowAction, PositionMode, PositionedRegion, Rect,
        ReferenceBox, RegionRef, Run,
    };
    use smallvec::SmallVec;

    use super::*;

    fn block(lines: Vec<Line>, regions: Vec<PositionedRegion>) -> Block {
        Block {
            source: ComponentId(1),
            bounds: Rect::zero(),
            columns: vec![Column {
                bounds: Rect::zero(),
                contents: lines.into_iter().map(Content::Line).collect(),
            }],
            regions,
            overflow: OverflowAction::Flow,
        }
    }

    fn marker_line(reference: usize) -> Line {
        let mut runs = SmallVec::new();
        runs.push(Run::Region(RegionRef(reference)));
        Line {
            offset_y: LayoutUnit::zero(),
            width: LayoutUnit::zero(),
            height: LayoutUnit::zero(),
            runs,
        }
    }

    fn region(contents: Option<Block>) -> PositionedRegion {
        PositionedRegion {
            source: ComponentId(2),
            mode: PositionMode::Absolute,
            reference: ReferenceBox::Page,
            bounds: Rect::zero(),
            contents,
        }
    }

    /// Dangling, missing and misplaced references are all rejected.
    ///
    /// # Panics
    /// Panics if an inconsistent block passes verification.
    #[test]
    fn rejects_inconsistent_blocks() {
        assert!(matches!(
            verify_block(&block(vec![marker_line(0)], vec![region(None)]), "root"),
            Ok(())
        ));
        assert!(matches!(
            verify_block(&block(vec![marker_line(1)], vec![region(None)]), "root"),
            Err(LayoutError::Structural { .. })
        ));
        assert!(matches!(
            verify_block(&block(Vec::new(), vec![region(None)]), "root"),
            Err(LayoutError::Structural { .. })
        ));

        let mut offset = block(Vec::new(), Vec::new());
        offset.bounds = Rect::from_pt(5.0, 0.0, 10.0, 10.0);
        let result = verify_block(&block(vec![marker_line(0)], vec![region(Some(offset))]), "root");
        assert!(matches!(
            &result,
            Err(LayoutError::Structural { path, detail })
                if path == "root" && detail.contains("offset")
        ));
    }
}
