//! Transformation types and the registry that resolves tag names.

pub mod inbuilt;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::color::Color;
use crate::component::Component;
use crate::error::TransformError;
use crate::style::Style;

/// Caller-supplied callback resolving names not covered by built-in types
/// or templates. Must be side-effect-free; returning `None` defers to the
/// parser's unresolved-tag policy.
pub type PlaceholderResolver = Arc<dyn Fn(&str) -> Option<Component> + Send + Sync>;

type MatchFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;
type ParseFn = Arc<dyn Fn(&str, &[String]) -> Result<Transformation, TransformError> + Send + Sync>;

/// The resolved action for one tag occurrence.
///
/// A transformation never mutates sibling or ancestor context; it only
/// affects the subtree scoped by its own open/close pair.
#[derive(Clone, Debug)]
pub enum Transformation {
    /// Merge a style delta onto the inherited context.
    Style(Style),
    /// Attach hover content; the string is markup parsed by the orchestrator.
    Hover(String),
    /// Substitute a content node (templates, resolver results, keybinds).
    Insert(Component),
    /// Produce a translatable node; args are raw markup strings.
    Translate { key: String, args: Vec<String> },
    /// Recolor the subtree's text per character along the color stops.
    Gradient { colors: Vec<Color>, phase: f32 },
    /// Recolor the subtree's text per character along the hue wheel.
    Rainbow { phase: f32 },
    /// Clear all inherited attributes for the subtree.
    Reset,
    /// Enclosed text was consumed verbatim by the tokenizer.
    Verbatim,
}

/// A registrable descriptor: a name predicate plus a parser entry point
/// producing a [`Transformation`] for one tag occurrence.
///
/// Immutable once registered. All per-occurrence state is local to a single
/// `parse` call.
#[derive(Clone)]
pub struct TransformationType {
    id: &'static str,
    matches: MatchFn,
    parse: ParseFn,
}

impl TransformationType {
    /// Create a transformation type.
    ///
    /// `id` is a short label used in logs; `matches` is the tag-name
    /// predicate; `parse` validates the raw arguments and produces the
    /// transformation, failing the parse on malformed input.
    pub fn new(
        id: &'static str,
        matches: impl Fn(&str) -> bool + Send + Sync + 'static,
        parse: impl Fn(&str, &[String]) -> Result<Transformation, TransformError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            id,
            matches: Arc::new(matches),
            parse: Arc::new(parse),
        }
    }

    /// The label of this type.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Test the name predicate.
    pub fn matches(&self, name: &str) -> bool {
        (self.matches)(name)
    }

    /// Run the parser entry point.
    pub fn parse(&self, name: &str, args: &[String]) -> Result<Transformation, TransformError> {
        (self.parse)(name, args)
    }
}

impl fmt::Debug for TransformationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformationType")
            .field("id", &self.id)
            .finish()
    }
}

/// An ordered collection of transformation types.
///
/// Registration order determines precedence among types that could both
/// match a name. The registry is read-only during a parse; mutation is a
/// configuration-time operation.
#[derive(Clone, Debug)]
pub struct TransformationRegistry {
    types: Vec<TransformationType>,
}

impl Default for TransformationRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl TransformationRegistry {
    /// A registry holding the full built-in tag set.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(inbuilt::color());
        registry.register(inbuilt::decoration());
        registry.register(inbuilt::hover());
        registry.register(inbuilt::click());
        registry.register(inbuilt::keybind());
        registry.register(inbuilt::translatable());
        registry.register(inbuilt::insertion());
        registry.register(inbuilt::font());
        registry.register(inbuilt::gradient());
        registry.register(inbuilt::rainbow());
        registry.register(inbuilt::reset());
        registry.register(inbuilt::pre());
        registry
    }

    /// An empty registry.
    pub fn empty() -> Self {
        Self { types: Vec::new() }
    }

    /// Register a transformation type at the end of the precedence order.
    pub fn register(&mut self, ty: TransformationType) {
        self.types.push(ty);
    }

    /// Remove all entries from this registry.
    pub fn clear(&mut self) {
        self.types.clear();
    }

    /// Test if any registered type matches the provided name.
    ///
    /// Templates and the placeholder resolver are not consulted; those are
    /// only knowable at the point of an actual parse.
    pub fn exists(&self, name: &str) -> bool {
        self.types.iter().any(|ty| ty.matches(name))
    }

    /// Resolve a tag occurrence.
    ///
    /// Precedence is global and evaluated once per tag: first matching
    /// registered type, then templates, then the placeholder resolver.
    /// `Ok(None)` means the name is unresolved and the parser's policy
    /// applies.
    pub(crate) fn resolve(
        &self,
        name: &str,
        args: &[String],
        templates: &HashMap<String, Component>,
        resolver: Option<&PlaceholderResolver>,
    ) -> Result<Option<Transformation>, TransformError> {
        for ty in &self.types {
            if ty.matches(name) {
                log::trace!("tag <{}> matched type {}", name, ty.id);
                return ty.parse(name, args).map(Some);
            }
        }

        if let Some(value) = templates.get(name) {
            log::trace!("tag <{}> matched a template", name);
            return Ok(Some(Transformation::Insert(value.clone())));
        }

        if let Some(resolver) = resolver {
            if let Some(value) = resolver(name) {
                log::trace!("tag <{}> resolved via placeholder resolver", name);
                return Ok(Some(Transformation::Insert(value)));
            }
        }

        Ok(None)
    }
}
