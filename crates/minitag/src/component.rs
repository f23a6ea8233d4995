//! Content node model.
//!
//! A [`Component`] is one node of parsed rich text: a value (text, keybind,
//! or translatable leaf), the effective style at that node, and children.

use crate::style::Style;

/// The content carried by a node.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A literal text run. Group nodes use an empty string.
    Text(String),
    /// A keybind reference (e.g. `key.jump`).
    Keybind(String),
    /// A translation key with pre-parsed arguments.
    Translatable { key: String, args: Vec<Component> },
}

/// A node in the parsed content tree.
///
/// The `style` field holds the *effective* (merged) style context for the
/// node, not just the delta its own tag introduced; the serializer recovers
/// the delta by diffing against the parent.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    /// Node content.
    pub value: Value,
    /// Effective style at this node.
    pub style: Style,
    /// Child nodes.
    pub children: Vec<Component>,
}

impl Component {
    /// Create a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Component {
            value: Value::Text(text.into()),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    /// Create an empty group node.
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Create a keybind leaf.
    pub fn keybind(key: impl Into<String>) -> Self {
        Component {
            value: Value::Keybind(key.into()),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    /// Create a translatable leaf.
    pub fn translatable(key: impl Into<String>, args: Vec<Component>) -> Self {
        Component {
            value: Value::Translatable {
                key: key.into(),
                args,
            },
            style: Style::default(),
            children: Vec::new(),
        }
    }

    /// Replace the style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replace the children.
    pub fn with_children(mut self, children: Vec<Component>) -> Self {
        self.children = children;
        self
    }

    /// Append a child node.
    pub fn push(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns true if this is an empty text node with no children.
    pub fn is_blank(&self) -> bool {
        matches!(&self.value, Value::Text(t) if t.is_empty()) && self.children.is_empty()
    }

    /// Flatten the subtree to plain text.
    ///
    /// Keybind and translatable leaves contribute their key as a textual
    /// fallback.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.value {
            Value::Text(t) => out.push_str(t),
            Value::Keybind(k) => out.push_str(k),
            Value::Translatable { key, .. } => out.push_str(key),
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn text_leaf() {
        let c = Component::text("hello");
        assert_eq!(c.value, Value::Text("hello".into()));
        assert!(c.style.is_empty());
        assert!(c.children.is_empty());
    }

    #[test]
    fn plain_text_flattens() {
        let mut root = Component::empty();
        root.push(Component::text("a"));
        let mut mid = Component::text("b").with_style(Style::colored(Color::Rgb(1, 2, 3)));
        mid.push(Component::text("c"));
        root.push(mid);
        assert_eq!(root.plain_text(), "abc");
    }

    #[test]
    fn plain_text_fallbacks() {
        let mut root = Component::empty();
        root.push(Component::keybind("key.jump"));
        root.push(Component::translatable("block.stone", vec![]));
        assert_eq!(root.plain_text(), "key.jumpblock.stone");
    }

    #[test]
    fn blank_detection() {
        assert!(Component::empty().is_blank());
        assert!(!Component::text("x").is_blank());
        assert!(!Component::empty().with_children(vec![Component::text("x")]).is_blank());
    }
}
