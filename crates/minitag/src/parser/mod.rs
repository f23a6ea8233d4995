//! Main parser for tag markup.
//!
//! Combines the tokenizer with registry resolution, style-context
//! propagation and template substitution to produce a content tree, and
//! hosts the escape/strip utilities that share the tokenizer's notion of a
//! tag.

pub mod lexer;

use std::collections::HashMap;

use crate::color::Color;
use crate::component::{Component, Value};
use crate::error::ParseError;
use crate::style::{HoverEvent, Style};
use crate::transform::{PlaceholderResolver, Transformation, TransformationRegistry};

use lexer::{tokenize, Token, MAX_DEPTH};

/// Read-only configuration shared by one parse call.
pub(crate) struct Context<'a> {
    pub registry: &'a TransformationRegistry,
    pub templates: &'a HashMap<String, Component>,
    pub resolver: Option<&'a PlaceholderResolver>,
}

/// Parse markup text into a content tree.
pub(crate) fn parse(input: &str, ctx: &Context<'_>) -> Result<Component, ParseError> {
    let tokens = tokenize(input)?;
    let children = build(&tokens, &Style::default(), ctx, 0)?;
    Ok(finish(children))
}

/// Collapse the top-level node list into a single root.
fn finish(mut children: Vec<Component>) -> Component {
    if children.len() == 1 {
        return children.remove(0);
    }
    Component::empty().with_children(children)
}

/// Depth-first walk of the token tree, carrying the merged style context.
fn build(
    tokens: &[Token],
    inherited: &Style,
    ctx: &Context<'_>,
    depth: usize,
) -> Result<Vec<Component>, ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::DepthLimit(MAX_DEPTH));
    }

    let mut out = Vec::new();
    for token in tokens {
        match token {
            Token::Text(text) => {
                out.push(Component::text(text.clone()).with_style(inherited.clone()));
            }
            Token::Open {
                name,
                args,
                children,
                closed,
                raw,
            } => {
                let resolved = ctx
                    .registry
                    .resolve(name, args, ctx.templates, ctx.resolver)
                    .map_err(|source| ParseError::Transform {
                        name: name.clone(),
                        source,
                    })?;

                match resolved {
                    Some(transformation) => {
                        out.push(apply(transformation, children, inherited, ctx, depth)?);
                    }
                    None => {
                        // Unresolved tag: emit the original bracketed text
                        // unchanged, then its content.
                        log::trace!("unresolved tag <{}>, emitting literally", name);
                        out.push(Component::text(raw.clone()).with_style(inherited.clone()));
                        out.extend(build(children, inherited, ctx, depth + 1)?);
                        if *closed {
                            out.push(
                                Component::text(format!("</{}>", name))
                                    .with_style(inherited.clone()),
                            );
                        }
                    }
                }
            }
        }
    }
    Ok(out)
}

/// Apply a resolved transformation to its subtree.
fn apply(
    transformation: Transformation,
    children: &[Token],
    inherited: &Style,
    ctx: &Context<'_>,
    depth: usize,
) -> Result<Component, ParseError> {
    match transformation {
        Transformation::Style(delta) => {
            let merged = inherited.apply(&delta);
            let kids = build(children, &merged, ctx, depth + 1)?;
            Ok(Component::empty().with_style(merged).with_children(kids))
        }
        Transformation::Hover(raw) => {
            let content = parse(&raw, ctx)?;
            let delta = Style {
                hover: Some(HoverEvent::ShowText(Box::new(content))),
                ..Default::default()
            };
            let merged = inherited.apply(&delta);
            let kids = build(children, &merged, ctx, depth + 1)?;
            Ok(Component::empty().with_style(merged).with_children(kids))
        }
        Transformation::Insert(node) => {
            let mut node = inherit(node, inherited);
            let kids = build(children, &node.style, ctx, depth + 1)?;
            node.children.extend(kids);
            Ok(node)
        }
        Transformation::Translate { key, args } => {
            let parsed_args = args
                .iter()
                .map(|arg| parse(arg, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            let kids = build(children, inherited, ctx, depth + 1)?;
            Ok(Component::translatable(key, parsed_args)
                .with_style(inherited.clone())
                .with_children(kids))
        }
        Transformation::Gradient { colors, phase } => {
            let kids = build(children, inherited, ctx, depth + 1)?;
            let total = char_count(&kids);
            let mut next = 0;
            let kids = colorize(kids, &mut next, total, &|index, total| {
                gradient_color(&colors, phase, index, total)
            });
            Ok(Component::empty()
                .with_style(inherited.clone())
                .with_children(kids))
        }
        Transformation::Rainbow { phase } => {
            let kids = build(children, inherited, ctx, depth + 1)?;
            let total = char_count(&kids);
            let mut next = 0;
            let kids = colorize(kids, &mut next, total, &|index, total| {
                rainbow_color(phase, index, total)
            });
            Ok(Component::empty()
                .with_style(inherited.clone())
                .with_children(kids))
        }
        Transformation::Reset => {
            let kids = build(children, &Style::default(), ctx, depth + 1)?;
            Ok(Component::empty().with_children(kids))
        }
        Transformation::Verbatim => {
            // The tokenizer already reduced the content to a literal run.
            let kids = build(children, inherited, ctx, depth + 1)?;
            Ok(Component::empty()
                .with_style(inherited.clone())
                .with_children(kids))
        }
    }
}

/// Merge the inherited context into every node of a substituted subtree.
///
/// Substituted content carries effective styles, so the context must reach
/// the descendants too, not just the top node.
fn inherit(node: Component, context: &Style) -> Component {
    let style = context.apply(&node.style);
    let children = node
        .children
        .into_iter()
        .map(|child| inherit(child, context))
        .collect();
    Component {
        value: node.value,
        style,
        children,
    }
}

/// Count the characters of text leaves in traversal order.
fn char_count(nodes: &[Component]) -> usize {
    nodes
        .iter()
        .map(|node| {
            let own = match &node.value {
                Value::Text(t) => t.chars().count(),
                _ => 0,
            };
            own + char_count(&node.children)
        })
        .sum()
}

/// Split text leaves into per-character runs colored by `paint`.
fn colorize(
    nodes: Vec<Component>,
    next: &mut usize,
    total: usize,
    paint: &dyn Fn(usize, usize) -> Color,
) -> Vec<Component> {
    nodes
        .into_iter()
        .map(|node| {
            let Component {
                value,
                style,
                children,
            } = node;

            let (value, mut runs) = match value {
                Value::Text(text) if !text.is_empty() => {
                    let runs = text
                        .chars()
                        .map(|c| {
                            let mut run_style = style.clone();
                            run_style.color = Some(paint(*next, total));
                            *next += 1;
                            Component::text(c.to_string()).with_style(run_style)
                        })
                        .collect();
                    (Value::Text(String::new()), runs)
                }
                value => (value, Vec::new()),
            };

            runs.extend(colorize(children, next, total, paint));
            Component {
                value,
                style,
                children: runs,
            }
        })
        .collect()
}

/// Interpolated color along the gradient stops for one character.
fn gradient_color(colors: &[Color], phase: f32, index: usize, total: usize) -> Color {
    let first = match colors.first() {
        Some(color) => color,
        None => return Color::Rgb(255, 255, 255),
    };
    if colors.len() == 1 || total <= 1 {
        return first.clone();
    }

    let position = index as f32 / (total - 1) as f32;
    let t = if phase == 0.0 {
        position
    } else {
        (position + phase).rem_euclid(1.0)
    };

    let scaled = t * (colors.len() - 1) as f32;
    let segment = scaled.floor() as usize;
    let fraction = scaled - segment as f32;

    match (colors.get(segment), colors.get(segment + 1)) {
        (Some(from), Some(to)) => Color::lerp(from, to, fraction),
        (Some(last), None) => last.clone(),
        _ => first.clone(),
    }
}

/// Hue-wheel color for one character of a rainbow run.
fn rainbow_color(phase: f32, index: usize, total: usize) -> Color {
    let length = total.max(1) as f32;
    let hue = (index as f32 / length + phase / 10.0).rem_euclid(1.0);
    Color::hsv(hue, 1.0, 1.0)
}

/// Escape any character sequence the tokenizer would interpret as tag
/// syntax, leaving plain text unchanged.
pub(crate) fn escape_tokens(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '<' | '>' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Remove tag syntax while keeping literal content.
///
/// Symmetric with [`escape_tokens`]: previously escaped literals survive
/// as plain text.
pub(crate) fn strip_tokens(input: &str) -> Result<String, ParseError> {
    let tokens = tokenize(input)?;
    let mut out = String::new();
    strip_into(&tokens, &mut out);
    Ok(out)
}

fn strip_into(tokens: &[Token], out: &mut String) {
    for token in tokens {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Open { children, .. } => strip_into(children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_parse(input: &str) -> Result<Component, ParseError> {
        let registry = TransformationRegistry::standard();
        let templates = HashMap::new();
        let ctx = Context {
            registry: &registry,
            templates: &templates,
            resolver: None,
        };
        parse(input, &ctx)
    }

    #[test]
    fn escape_tokens_plain() {
        assert_eq!(escape_tokens("hello"), "hello");
        assert_eq!(escape_tokens("<red>"), r"\<red\>");
        assert_eq!(escape_tokens(r"a\b"), r"a\\b");
    }

    #[test]
    fn strip_after_escape_is_identity() {
        for s in ["plain", "a <red>tag</red> like text", r"back\slash", "1 < 2 > 0"] {
            assert_eq!(strip_tokens(&escape_tokens(s)).unwrap(), s);
        }
    }

    #[test]
    fn strip_removes_tags() {
        assert_eq!(
            strip_tokens("<bold>Hello <red>world</red>!</bold>").unwrap(),
            "Hello world!"
        );
    }

    #[test]
    fn strip_keeps_verbatim() {
        assert_eq!(
            strip_tokens("<pre><not a tag></pre>").unwrap(),
            "<not a tag>"
        );
    }

    #[test]
    fn gradient_color_endpoints() {
        let colors = [Color::Rgb(0, 0, 0), Color::Rgb(255, 255, 255)];
        assert_eq!(gradient_color(&colors, 0.0, 0, 10), Color::Rgb(0, 0, 0));
        assert_eq!(
            gradient_color(&colors, 0.0, 9, 10),
            Color::Rgb(255, 255, 255)
        );
    }

    #[test]
    fn single_root_is_unwrapped() {
        let c = context_parse("<bold>x</bold>").unwrap();
        assert!(c.style.decorations.contains(crate::style::Decorations::BOLD));
    }
}
