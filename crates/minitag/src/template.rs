//! Templates: named placeholder substitutions.
//!
//! Three equivalent supply forms all normalize to name → content pairs
//! before resolution: an explicit [`Template`] list, a name → text map, and
//! a flat alternating key/value argument sequence. The last form is
//! validated eagerly, before any tokenizing.

use std::collections::HashMap;

use crate::component::Component;
use crate::error::ArgumentError;

/// A named, caller-supplied content substitution.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    /// Tag name this template answers for.
    pub name: String,
    /// Precomputed content value.
    pub value: Component,
}

impl Template {
    /// A template substituting plain text.
    pub fn of(name: impl Into<String>, text: impl Into<String>) -> Self {
        Template {
            name: name.into(),
            value: Component::text(text),
        }
    }

    /// A template substituting a fully-formed content node.
    pub fn component(name: impl Into<String>, value: Component) -> Self {
        Template {
            name: name.into(),
            value,
        }
    }

    /// Normalize a flat alternating key/value sequence into templates.
    ///
    /// Fails with a descriptive [`ArgumentError`] on an odd-length sequence
    /// or a non-text key.
    pub fn from_args(args: &[Arg]) -> Result<Vec<Template>, ArgumentError> {
        if args.len() % 2 != 0 {
            return Err(ArgumentError::OddLength(args.len()));
        }

        let mut templates = Vec::with_capacity(args.len() / 2);
        for (i, pair) in args.chunks(2).enumerate() {
            let key = match &pair[0] {
                Arg::Text(key) => key.clone(),
                Arg::Component(_) => return Err(ArgumentError::NonTextKey(i * 2)),
            };
            let value = match &pair[1] {
                Arg::Text(text) => Component::text(text.clone()),
                Arg::Component(c) => c.clone(),
            };
            templates.push(Template::component(key, value));
        }
        Ok(templates)
    }

    /// Collapse a template list into the lookup map used during resolution.
    ///
    /// Later entries win on duplicate names.
    pub(crate) fn to_map(templates: &[Template]) -> HashMap<String, Component> {
        templates
            .iter()
            .map(|t| (t.name.clone(), t.value.clone()))
            .collect()
    }
}

/// One entry of the flat key/value placeholder form.
///
/// Keys must be text; values may be text or content nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Text(String),
    Component(Component),
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<Component> for Arg {
    fn from(value: Component) -> Self {
        Arg::Component(value)
    }
}
