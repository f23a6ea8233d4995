//! Style context for tag markup.
//!
//! A Style is the attribute bag carried down the node tree during parsing:
//! color, decorations, font, insertion text, and click/hover events.

use crate::color::Color;
use crate::component::Component;
use crate::error::TransformError;

bitflags::bitflags! {
    /// Text decoration set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Decorations: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINED = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const OBFUSCATED = 1 << 4;
    }
}

impl Decorations {
    /// Look up a single decoration by tag name or alias.
    pub fn by_name(name: &str) -> Option<Decorations> {
        match name {
            "bold" | "b" => Some(Decorations::BOLD),
            "italic" | "i" | "em" => Some(Decorations::ITALIC),
            "underlined" | "u" => Some(Decorations::UNDERLINED),
            "strikethrough" | "st" => Some(Decorations::STRIKETHROUGH),
            "obfuscated" | "obf" => Some(Decorations::OBFUSCATED),
            _ => None,
        }
    }

    /// Canonical tag names for the flags that are set, in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.contains(Decorations::BOLD) {
            out.push("bold");
        }
        if self.contains(Decorations::ITALIC) {
            out.push("italic");
        }
        if self.contains(Decorations::UNDERLINED) {
            out.push("underlined");
        }
        if self.contains(Decorations::STRIKETHROUGH) {
            out.push("strikethrough");
        }
        if self.contains(Decorations::OBFUSCATED) {
            out.push("obfuscated");
        }
        out
    }
}

/// Action attached to a click event.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickAction {
    OpenUrl,
    OpenFile,
    RunCommand,
    SuggestCommand,
    ChangePage,
    CopyToClipboard,
}

impl ClickAction {
    /// Parse a click action name.
    pub fn parse(name: &str) -> Result<Self, TransformError> {
        match name {
            "open_url" => Ok(ClickAction::OpenUrl),
            "open_file" => Ok(ClickAction::OpenFile),
            "run_command" => Ok(ClickAction::RunCommand),
            "suggest_command" => Ok(ClickAction::SuggestCommand),
            "change_page" => Ok(ClickAction::ChangePage),
            "copy_to_clipboard" => Ok(ClickAction::CopyToClipboard),
            other => Err(TransformError::UnknownClickAction(other.to_string())),
        }
    }

    /// The serialized action name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClickAction::OpenUrl => "open_url",
            ClickAction::OpenFile => "open_file",
            ClickAction::RunCommand => "run_command",
            ClickAction::SuggestCommand => "suggest_command",
            ClickAction::ChangePage => "change_page",
            ClickAction::CopyToClipboard => "copy_to_clipboard",
        }
    }
}

/// Click event metadata: an action plus its value.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickEvent {
    pub action: ClickAction,
    pub value: String,
}

/// Hover event metadata.
#[derive(Clone, Debug, PartialEq)]
pub enum HoverEvent {
    /// Show a content subtree on hover.
    ShowText(Box<Component>),
}

/// The merged attribute set inherited top-down during parsing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// Foreground color.
    pub color: Option<Color>,
    /// Text decorations.
    pub decorations: Decorations,
    /// Font key.
    pub font: Option<String>,
    /// Insertion text.
    pub insertion: Option<String>,
    /// Click event.
    pub click: Option<ClickEvent>,
    /// Hover event.
    pub hover: Option<HoverEvent>,
}

impl Style {
    /// Create a new empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// A style carrying only a color.
    pub fn colored(color: Color) -> Self {
        Style {
            color: Some(color),
            ..Default::default()
        }
    }

    /// A style carrying only decorations.
    pub fn decorated(decorations: Decorations) -> Self {
        Style {
            decorations,
            ..Default::default()
        }
    }

    /// Returns true if no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.decorations.is_empty()
            && self.font.is_none()
            && self.insertion.is_none()
            && self.click.is_none()
            && self.hover.is_none()
    }

    /// Apply another style on top of this one.
    ///
    /// Scalar attributes in `other` override values in `self`; decoration
    /// sets are unioned.
    pub fn apply(&self, other: &Style) -> Style {
        Style {
            color: other.color.clone().or_else(|| self.color.clone()),
            decorations: self.decorations | other.decorations,
            font: other.font.clone().or_else(|| self.font.clone()),
            insertion: other.insertion.clone().or_else(|| self.insertion.clone()),
            click: other.click.clone().or_else(|| self.click.clone()),
            hover: other.hover.clone().or_else(|| self.hover.clone()),
        }
    }

    /// Attributes present in `self` but not inherited from `parent`.
    ///
    /// This is what the serializer turns back into opening tags.
    pub fn delta(&self, parent: &Style) -> Style {
        Style {
            color: if self.color != parent.color {
                self.color.clone()
            } else {
                None
            },
            decorations: self.decorations.difference(parent.decorations),
            font: if self.font != parent.font {
                self.font.clone()
            } else {
                None
            },
            insertion: if self.insertion != parent.insertion {
                self.insertion.clone()
            } else {
                None
            },
            click: if self.click != parent.click {
                self.click.clone()
            } else {
                None
            },
            hover: if self.hover != parent.hover {
                self.hover.clone()
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoration_aliases() {
        assert_eq!(Decorations::by_name("bold"), Some(Decorations::BOLD));
        assert_eq!(Decorations::by_name("b"), Some(Decorations::BOLD));
        assert_eq!(Decorations::by_name("em"), Some(Decorations::ITALIC));
        assert_eq!(Decorations::by_name("obf"), Some(Decorations::OBFUSCATED));
        assert_eq!(Decorations::by_name("blink"), None);
    }

    #[test]
    fn style_apply_overrides_scalars() {
        let base = Style::colored(Color::Named("red".into()));
        let over = Style::colored(Color::Named("blue".into()));
        assert_eq!(
            base.apply(&over).color,
            Some(Color::Named("blue".into()))
        );
    }

    #[test]
    fn style_apply_unions_decorations() {
        let base = Style::decorated(Decorations::BOLD);
        let over = Style::decorated(Decorations::ITALIC);
        let merged = base.apply(&over);
        assert!(merged.decorations.contains(Decorations::BOLD | Decorations::ITALIC));
    }

    #[test]
    fn style_apply_keeps_inherited() {
        let base = Style::colored(Color::Named("red".into()));
        let over = Style::decorated(Decorations::BOLD);
        let merged = base.apply(&over);
        assert_eq!(merged.color, Some(Color::Named("red".into())));
        assert!(merged.decorations.contains(Decorations::BOLD));
    }

    #[test]
    fn style_delta() {
        let parent = Style::decorated(Decorations::BOLD);
        let child = parent.apply(&Style::colored(Color::Named("red".into())));
        let delta = child.delta(&parent);
        assert_eq!(delta.color, Some(Color::Named("red".into())));
        assert!(delta.decorations.is_empty());
    }

    #[test]
    fn style_is_empty() {
        assert!(Style::new().is_empty());
        assert!(!Style::decorated(Decorations::BOLD).is_empty());
        assert!(!Style::colored(Color::Rgb(1, 2, 3)).is_empty());
    }

    #[test]
    fn click_action_roundtrip() {
        for name in [
            "open_url",
            "open_file",
            "run_command",
            "suggest_command",
            "change_page",
            "copy_to_clipboard",
        ] {
            assert_eq!(ClickAction::parse(name).unwrap().as_str(), name);
        }
        assert!(ClickAction::parse("teleport").is_err());
    }
}
