#![allow(
    clippy::missing_panics_doc,
    reason = "Integration tests assert by panicking"
)]

use page_layouter::printing::dump_document;
use page_layouter::text::{FixedAdvanceMeasure, measured_text};
use page_layouter::{LayoutDriver, LayoutOptions, PageDefaults};
use page_model::{
    Block, Component, DiagnosticKind, DiagnosticLevel, LayoutDocument, LayoutUnit, MarkerRun,
    OverflowAction, PositionMode, Run, StyleSnapshot, TextRun,
};

fn font() -> StyleSnapshot {
    StyleSnapshot::default().with_font(20.0, 25.0)
}

fn text(content: &str) -> Component {
    measured_text(content, font(), &FixedAdvanceMeasure::default())
}

fn section(overflow: OverflowAction, children: Vec<Component>) -> Component {
    Component::block(font().with_overflow(overflow), children)
        .with_id(1)
        .named("section")
}

fn layout(root: &Component) -> anyhow::Result<LayoutDocument> {
    let _ = env_logger::builder().is_test(true).try_init();
    Ok(LayoutDriver::new(LayoutOptions::default()).run(root, &PageDefaults::default())?)
}

fn first_child(document: &LayoutDocument) -> anyhow::Result<&Block> {
    document
        .pages
        .first()
        .and_then(|page| page.content.child_blocks().next())
        .ok_or_else(|| anyhow::anyhow!("no child block on the first page"))
}

fn pt(value: f32) -> LayoutUnit {
    LayoutUnit::from_pt(value)
}

fn text_run(characters: &str, width: f32) -> Run {
    Run::Text(TextRun {
        characters: characters.to_owned(),
        width: pt(width),
    })
}

/// Text wraps at the column width with markers around the whole leaf and
/// trailing whitespace trimmed at each line end.
#[test]
fn wraps_text_into_lines() -> anyhow::Result<()> {
    let paragraph = Component::block(
        font().with_width(200.0),
        vec![text("Sits relative to the parent div")],
    )
    .with_id(2);
    let document = layout(&section(OverflowAction::Flow, vec![paragraph]))?;
    let block = first_child(&document)?;

    let lines: Vec<_> = block.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0].runs.as_slice(),
        [
            Run::Marker(MarkerRun::Begin),
            text_run("Sits relative to the", 200.0)
        ]
    );
    assert_eq!(
        lines[1].runs.as_slice(),
        [text_run("parent div", 100.0), Run::Marker(MarkerRun::End)]
    );
    assert_eq!(lines[0].offset_y, LayoutUnit::zero());
    assert_eq!(lines[1].offset_y, pt(25.0));
    assert_eq!(lines[1].width, pt(100.0));
    assert_eq!(block.width(), pt(200.0));
    assert_eq!(block.height(), pt(50.0));
    Ok(())
}

/// Adjacent text leaves share lines; each keeps its own markers.
#[test]
fn adjacent_text_shares_lines() -> anyhow::Result<()> {
    let document = layout(&section(
        OverflowAction::Flow,
        vec![Component::block(font(), vec![text("Hello "), text("world")]).with_id(2)],
    ))?;
    let block = first_child(&document)?;
    let lines: Vec<_> = block.lines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0].runs.as_slice(),
        [
            Run::Marker(MarkerRun::Begin),
            text_run("Hello ", 60.0),
            Run::Marker(MarkerRun::End),
            Run::Marker(MarkerRun::Begin),
            text_run("world", 50.0),
            Run::Marker(MarkerRun::End),
        ]
    );
    assert_eq!(lines[0].text(), "Hello world");
    assert_eq!(lines[0].width, pt(110.0));
    Ok(())
}

/// Nested blocks stack below preceding lines and extend their parent.
#[test]
fn nested_blocks_stack() -> anyhow::Result<()> {
    let inner = Component::block(font(), vec![text("Body")]).with_id(3);
    let outer = Component::block(font(), vec![text("Heading"), inner]).with_id(2);
    let document = layout(&section(OverflowAction::Flow, vec![outer]))?;
    let outer = first_child(&document)?;
    let inner = outer
        .child_blocks()
        .next()
        .ok_or_else(|| anyhow::anyhow!("nested block missing"))?;
    assert_eq!(inner.offset_y(), pt(25.0));
    assert_eq!(inner.offset_x(), LayoutUnit::zero());
    assert_eq!(outer.height(), pt(50.0));
    assert_eq!(outer.content_width(), pt(595.0));
    Ok(())
}

/// Content inside an explicit height is cut under `Flow` and kept under
/// `Clip`; the block keeps its explicit height either way.
#[test]
fn explicit_height_truncates_or_clips() -> anyhow::Result<()> {
    let build = |overflow| {
        let body = vec!["word"; 12].join(" ");
        section(
            overflow,
            vec![Component::block(font().sized(200.0, 30.0), vec![text(&body)]).with_id(2)],
        )
    };

    let flowed = layout(&build(OverflowAction::Flow))?;
    let block = first_child(&flowed)?;
    assert_eq!(block.height(), pt(30.0));
    assert_eq!(block.lines().count(), 1);
    assert!(
        flowed
            .diagnostics_of(DiagnosticKind::Overflow)
            .any(|entry| entry.path == "section/block[0]" && entry.message.contains("truncated"))
    );

    let clipped = layout(&build(OverflowAction::Clip))?;
    let block = first_child(&clipped)?;
    assert_eq!(block.height(), pt(30.0));
    assert_eq!(block.lines().count(), 3);
    assert_eq!(block.overflow, OverflowAction::Clip);
    Ok(())
}

/// Invalid explicit sizes are clamped and reported against the box path.
#[test]
fn invalid_geometry_is_clamped() -> anyhow::Result<()> {
    let bad = Component::block(font().with_width(-50.0), Vec::new())
        .with_id(2)
        .named("bad");
    let document = layout(&section(OverflowAction::Flow, vec![bad]))?;
    let block = first_child(&document)?;
    assert_eq!(block.width(), LayoutUnit::zero());
    let entry = document
        .diagnostics_of(DiagnosticKind::Geometry)
        .next()
        .ok_or_else(|| anyhow::anyhow!("geometry diagnostic missing"))?;
    assert_eq!(entry.path, "section/bad");
    assert_eq!(entry.level, DiagnosticLevel::Warning);
    Ok(())
}

/// With collection switched off nothing is kept in the document.
#[test]
fn diagnostics_can_be_switched_off() -> anyhow::Result<()> {
    let root = section(
        OverflowAction::Flow,
        vec![Component::block(font().with_width(-50.0), Vec::new()).with_id(2)],
    );
    let options = LayoutOptions {
        collect_diagnostics: false,
        ..LayoutOptions::default()
    };
    let quiet = LayoutDriver::new(options).run(&root, &PageDefaults::default())?;
    assert!(quiet.diagnostics.is_empty());
    assert_eq!(first_child(&quiet)?.width(), LayoutUnit::zero());

    let noted = layout(&root)?;
    assert_eq!(noted.diagnostics_of(DiagnosticKind::Geometry).count(), 1);
    Ok(())
}

/// The dump lists pages, blocks, lines and regions in order.
#[test]
fn dump_is_deterministic() -> anyhow::Result<()> {
    let relative = Component::block(
        font()
            .positioned(PositionMode::Relative)
            .at(0.0, 10.0)
            .sized(100.0, 25.0),
        vec![text("Note")],
    )
    .with_id(3);
    let root = section(
        OverflowAction::Flow,
        vec![Component::block(font(), vec![text("Hi"), relative]).with_id(2)],
    );
    let document = layout(&root)?;
    let expected = "\
DOCUMENT pages=1
  PAGE 0 595x842
    BLOCK #1 (0, 0) 595x35 Flow
      COLUMN (0, 0) 595x35
        BLOCK #2 (0, 0) 595x35 Flow
          COLUMN (0, 0) 595x35
            LINE y=0 w=20 h=25 <begin> \"Hi\" <end> <region 0>
          REGION 0 #3 Relative ref=Parent (0, 10) 100x25
            BLOCK #3 (0, 0) 100x25 Flow
              COLUMN (0, 0) 100x25
                LINE y=0 w=40 h=25 <begin> \"Note\" <end>
";
    assert_eq!(dump_document(&document), expected);
    assert_eq!(dump_document(&document), dump_document(&layout(&root)?));
    Ok(())
}
