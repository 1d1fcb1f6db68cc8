//! The styled component tree handed to layout.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::StyleSnapshot;

/// Caller-assigned identity of a component, echoed on the blocks and regions
/// layout produces for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

impl ComponentId {
    pub const ANONYMOUS: Self = Self(0);
}

impl fmt::Display for ComponentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// One pre-measured piece of text: a word plus any whitespace that follows it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    /// Advance of the whole segment, trailing whitespace included.
    pub width: f32,
    /// Advance of the trailing whitespace alone. It is dropped at a line end.
    pub trailing: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub segments: Vec<Segment>,
}

impl TextContent {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Reassemble the original text.
    pub fn text(&self) -> String {
        self.segments.iter().map(|segment| segment.text.as_str()).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ComponentKind {
    Block { children: Vec<Component> },
    Text(TextContent),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    /// Optional name used in diagnostics paths.
    pub name: Option<String>,
    pub style: StyleSnapshot,
    pub kind: ComponentKind,
}

impl Component {
    pub fn block(style: StyleSnapshot, children: Vec<Self>) -> Self {
        Self {
            id: ComponentId::ANONYMOUS,
            name: None,
            style,
            kind: ComponentKind::Block { children },
        }
    }

    pub fn text(style: StyleSnapshot, content: TextContent) -> Self {
        Self {
            id: ComponentId::ANONYMOUS,
            name: None,
            style,
            kind: ComponentKind::Text(content),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = ComponentId(id);
        self
    }

    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// Children of a block component; text leaves have none.
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            ComponentKind::Block { children } => children,
            ComponentKind::Text(_) => &[],
        }
    }

    /// Label used for this component in a diagnostics path.
    pub fn label(&self, index: usize) -> String {
        match (&self.name, &self.kind) {
            (Some(name), _) => name.clone(),
            (None, ComponentKind::Block { .. }) => format!("block[{index}]"),
            (None, ComponentKind::Text(_)) => format!("text[{index}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Segment {
        Segment {
            text: text.to_owned(),
            width: 10.0,
            trailing: 0.0,
        }
    }

    /// # Panics
    /// Panics if labels or children are reported incorrectly.
    #[test]
    fn labels_and_children() {
        let text = Component::text(
            StyleSnapshot::default(),
            TextContent {
                segments: vec![segment("a "), segment("b")],
            },
        );
        let block = Component::block(StyleSnapshot::default(), vec![text.clone()]).with_id(7);
        assert_eq!(block.children().len(), 1);
        assert_eq!(block.label(2), "block[2]");
        assert_eq!(block.clone().named("inflow").label(2), "inflow");
        assert_eq!(text.label(0), "text[0]");
        assert!(text.children().is_empty());
        assert_eq!(block.id.to_string(), "#7");
        if let ComponentKind::Text(content) = &text.kind {
            assert_eq!(content.text(), "a b");
        }
    }
}
