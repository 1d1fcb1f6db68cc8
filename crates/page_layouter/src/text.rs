//! Text measurement capability and word segmentation.
//!
//! Layout never measures glyphs itself. Text leaves arrive as pre-measured
//! segments; this module turns a plain string into those segments using any
//! [`TextMeasure`] implementation.

use page_model::{Component, FontMetrics, Segment, StyleSnapshot, TextContent};

/// Supplies advances for runs of text in a given font.
pub trait TextMeasure {
    fn advance(&self, text: &str, font: &FontMetrics) -> f32;
}

/// Every character advances by a fixed fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasure {
    pub em_fraction: f32,
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        Self { em_fraction: 0.5 }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn advance(&self, text: &str, font: &FontMetrics) -> f32 {
        text.chars().count() as f32 * self.em_fraction * font.size
    }
}

/// Split `text` into words, each carrying the whitespace that follows it.
pub fn segment_text(text: &str, font: &FontMetrics, measure: &impl TextMeasure) -> TextContent {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_space = false;
    for (index, ch) in text.char_indices() {
        if ch.is_whitespace() {
            in_space = true;
        } else if in_space {
            segments.push(measure_segment(&text[start..index], font, measure));
            start = index;
            in_space = false;
        }
    }
    if start < text.len() {
        segments.push(measure_segment(&text[start..], font, measure));
    }
    TextContent { segments }
}

fn measure_segment(piece: &str, font: &FontMetrics, measure: &impl TextMeasure) -> Segment {
    let word = piece.trim_end();
    Segment {
        text: piece.to_owned(),
        width: measure.advance(piece, font),
        trailing: measure.advance(&piece[word.len()..], font),
    }
}

/// Build a text leaf, measuring `text` in the style's font.
pub fn measured_text(text: &str, style: StyleSnapshot, measure: &impl TextMeasure) -> Component {
    let content = segment_text(text, &style.font, measure);
    Component::text(style, content)
}
