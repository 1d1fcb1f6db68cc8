//! Throughput of full pagination passes over synthetic documents.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use page_layouter::text::{FixedAdvanceMeasure, measured_text};
use page_layouter::{LayoutDriver, LayoutOptions, PageDefaults};
use page_model::{Component, OverflowAction, PositionMode, StyleSnapshot};

const PARAGRAPH: &str = "Layout flows text down columns and across pages while positioned \
                         boxes sit in regions beside the flow and never move it.";

fn font() -> StyleSnapshot {
    StyleSnapshot::default().with_font(12.0, 15.0)
}

/// A section of paragraphs, every fifth one carrying a relative note and an
/// absolute badge.
fn build_document(paragraphs: u32, columns: u16) -> Component {
    let measure = FixedAdvanceMeasure::default();
    let children = (0..paragraphs)
        .map(|index| {
            let mut children = vec![measured_text(PARAGRAPH, font(), &measure)];
            if index % 5 == 0 {
                children.push(
                    Component::block(
                        font().positioned(PositionMode::Relative).at(20.0, 5.0),
                        vec![measured_text("note", font(), &measure)],
                    )
                    .with_id(10_000 + index),
                );
                children.push(
                    Component::block(
                        font()
                            .positioned(PositionMode::Absolute)
                            .at(500.0, 10.0)
                            .sized(40.0, 15.0),
                        Vec::new(),
                    )
                    .with_id(20_000 + index),
                );
            }
            Component::block(font(), children).with_id(index + 1)
        })
        .collect();
    Component::block(
        font()
            .with_columns(columns, 12.0)
            .with_overflow(OverflowAction::Flow),
        children,
    )
    .named("section")
}

fn bench_single_column(criterion: &mut Criterion) {
    let root = build_document(400, 1);
    let page = PageDefaults {
        margin: 36.0,
        ..PageDefaults::default()
    };
    let driver = LayoutDriver::new(LayoutOptions::default());
    criterion.bench_function("layout_400_paragraphs", |bencher| {
        bencher.iter(|| {
            let pages = driver
                .run(black_box(&root), &page)
                .map_or(0, |document| document.page_count());
            black_box(pages)
        });
    });
}

fn bench_columns(criterion: &mut Criterion) {
    let root = build_document(400, 3);
    let page = PageDefaults::default();
    let driver = LayoutDriver::new(LayoutOptions::default());
    criterion.bench_function("layout_400_paragraphs_3_columns", |bencher| {
        bencher.iter(|| {
            let pages = driver
                .run(black_box(&root), &page)
                .map_or(0, |document| document.page_count());
            black_box(pages)
        });
    });
}

fn bench_batch(criterion: &mut Criterion) {
    let roots: Vec<Component> = (0..8).map(|_| build_document(100, 1)).collect();
    let page = PageDefaults::default();
    let driver = LayoutDriver::default();
    criterion.bench_function("layout_batch_8x100", |bencher| {
        bencher.iter(|| black_box(driver.run_all(black_box(&roots), &page).len()));
    });
}

criterion_group!(layout_benches, bench_single_column, bench_columns, bench_batch);
criterion_main!(layout_benches);
