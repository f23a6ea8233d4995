//! Tag-based rich text markup engine.
//!
//! This crate parses text like `<bold>Hello <red>world</red>!</bold>` into a
//! tree of styled content nodes, and serializes such a tree back into the
//! same markup syntax.
//!
//! # Overview
//!
//! The markup format uses angle-bracketed tags:
//!
//! - `<bold>text</bold>` - apply a decoration
//! - `<red>text</red>` / `<color:#ff5733>text</color>` - foreground color
//! - `<click:run_command:"/help">text</click>` - click event metadata
//! - `<hover:show_text:'<red>hi'>text</hover>` - hover content
//! - `<gradient:#5e4fa2:#f79459>text</gradient>` - per-character coloring
//! - `<pre><not parsed></pre>` - verbatim content
//! - `\<` - escaped bracket (literal `<`)
//!
//! Unknown tag names may be answered by caller-supplied templates or a
//! placeholder resolver callback; names nothing answers for are emitted
//! literally.
//!
//! # Usage
//!
//! ```
//! use minitag::MiniTag;
//!
//! let engine = MiniTag::new();
//! let tree = engine.parse("<bold>Hello <red>world</red>!</bold>").unwrap();
//! assert_eq!(tree.plain_text(), "Hello world!");
//!
//! let markup = engine.serialize(&tree);
//! assert_eq!(markup, "<bold>Hello <red>world</red>!</bold>");
//! ```
//!
//! Placeholders:
//!
//! ```
//! use minitag::MiniTag;
//!
//! let engine = MiniTag::new();
//! let tree = engine.parse_with("Hello <name>!", &["name", "World"]).unwrap();
//! assert_eq!(tree.plain_text(), "Hello World!");
//! ```

pub mod color;
pub mod component;
pub mod error;
pub mod markdown;
pub mod parser;
pub mod serializer;
pub mod style;
pub mod template;
pub mod transform;

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

// Re-export main types at crate root
pub use color::Color;
pub use component::{Component, Value};
pub use error::{ArgumentError, ColorParseError, Error, ParseError, TransformError};
pub use markdown::MarkdownFlavor;
pub use style::{ClickAction, ClickEvent, Decorations, HoverEvent, Style};
pub use template::{Arg, Template};
pub use transform::{
    PlaceholderResolver, Transformation, TransformationRegistry, TransformationType,
};

/// A configured markup engine.
///
/// Immutable after construction; safe to share across threads since every
/// parse call allocates its own token tree and style stack. Build one with
/// [`MiniTag::new`] for the defaults or [`MiniTag::builder`] to configure.
#[derive(Clone)]
pub struct MiniTag {
    markdown: bool,
    markdown_flavor: MarkdownFlavor,
    registry: TransformationRegistry,
    resolver: Option<PlaceholderResolver>,
}

impl Default for MiniTag {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniTag {
    /// An engine with the full built-in tag set, markdown off, and no
    /// placeholder resolver.
    pub fn new() -> Self {
        Self {
            markdown: false,
            markdown_flavor: MarkdownFlavor::default(),
            registry: TransformationRegistry::standard(),
            resolver: None,
        }
    }

    /// Start configuring an engine.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Parse markup with no placeholders.
    pub fn parse(&self, input: &str) -> Result<Component, Error> {
        self.parse_internal(input, HashMap::new())
    }

    /// Parse markup with alternating key/value plain-text placeholders.
    pub fn parse_with(&self, input: &str, placeholders: &[&str]) -> Result<Component, Error> {
        if placeholders.len() % 2 != 0 {
            return Err(ArgumentError::OddLength(placeholders.len()).into());
        }
        let templates = placeholders
            .chunks(2)
            .map(|pair| (pair[0].to_string(), Component::text(pair[1])))
            .collect();
        self.parse_internal(input, templates)
    }

    /// Parse markup with a name → text placeholder map.
    pub fn parse_with_map(
        &self,
        input: &str,
        placeholders: &HashMap<String, String>,
    ) -> Result<Component, Error> {
        let templates = placeholders
            .iter()
            .map(|(name, text)| (name.clone(), Component::text(text.clone())))
            .collect();
        self.parse_internal(input, templates)
    }

    /// Parse markup with a flat alternating key/value argument sequence.
    ///
    /// Values may be plain text or content nodes. The sequence is validated
    /// eagerly: an odd length or a non-text key fails with an
    /// [`ArgumentError`] before any tokenizing happens.
    pub fn parse_with_args(&self, input: &str, args: &[Arg]) -> Result<Component, Error> {
        let templates = Template::from_args(args)?;
        self.parse_internal(input, Template::to_map(&templates))
    }

    /// Parse markup with an explicit template list.
    pub fn parse_with_templates(
        &self,
        input: &str,
        templates: &[Template],
    ) -> Result<Component, Error> {
        self.parse_internal(input, Template::to_map(templates))
    }

    /// Serialize a content tree back into markup text.
    pub fn serialize(&self, component: &Component) -> String {
        serializer::serialize(component)
    }

    /// Escape any character sequence that would be interpreted as tag
    /// syntax, leaving plain text unchanged.
    pub fn escape_tokens(&self, input: &str) -> String {
        parser::escape_tokens(input)
    }

    /// Remove tag syntax (and markdown syntax, when enabled), keeping the
    /// literal content.
    pub fn strip_tokens(&self, input: &str) -> Result<String, Error> {
        let input = if self.markdown {
            Cow::Owned(markdown::strip(input, self.markdown_flavor))
        } else {
            Cow::Borrowed(input)
        };
        Ok(parser::strip_tokens(&input)?)
    }

    fn parse_internal(
        &self,
        input: &str,
        templates: HashMap<String, Component>,
    ) -> Result<Component, Error> {
        let input = if self.markdown {
            Cow::Owned(markdown::parse(input, self.markdown_flavor))
        } else {
            Cow::Borrowed(input)
        };
        log::debug!("parsing {} bytes of markup", input.len());

        let ctx = parser::Context {
            registry: &self.registry,
            templates: &templates,
            resolver: self.resolver.as_ref(),
        };
        Ok(parser::parse(&input, &ctx)?)
    }
}

/// Builder for a configured [`MiniTag`] engine.
///
/// Registry mutation happens only here, before the immutable engine value
/// is produced.
pub struct Builder {
    markdown: bool,
    markdown_flavor: MarkdownFlavor,
    registry: TransformationRegistry,
    resolver: Option<PlaceholderResolver>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Start from the defaults: markdown off, full built-in tag set.
    pub fn new() -> Self {
        Self {
            markdown: false,
            markdown_flavor: MarkdownFlavor::default(),
            registry: TransformationRegistry::standard(),
            resolver: None,
        }
    }

    /// Enable the markdown preprocessing pass.
    pub fn markdown(mut self) -> Self {
        self.markdown = true;
        self
    }

    /// Select the markdown dialect. Inert unless [`Builder::markdown`] is
    /// also called.
    pub fn markdown_flavor(mut self, flavor: MarkdownFlavor) -> Self {
        self.markdown_flavor = flavor;
        self
    }

    /// Remove all built-in transformation types.
    pub fn remove_default_transformations(mut self) -> Self {
        self.registry.clear();
        self
    }

    /// Register a transformation type.
    pub fn transformation(mut self, ty: TransformationType) -> Self {
        self.registry.register(ty);
        self
    }

    /// Register several transformation types in order.
    pub fn transformations(mut self, types: impl IntoIterator<Item = TransformationType>) -> Self {
        for ty in types {
            self.registry.register(ty);
        }
        self
    }

    /// Set the placeholder resolver consulted for names not covered by
    /// built-in types or templates.
    pub fn placeholder_resolver(
        mut self,
        resolver: impl Fn(&str) -> Option<Component> + Send + Sync + 'static,
    ) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Produce the immutable configured engine.
    pub fn build(self) -> MiniTag {
        MiniTag {
            markdown: self.markdown,
            // Flavor configuration is inert unless markdown mode is on.
            markdown_flavor: if self.markdown {
                self.markdown_flavor
            } else {
                MarkdownFlavor::default()
            },
            registry: self.registry,
            resolver: self.resolver,
        }
    }
}
