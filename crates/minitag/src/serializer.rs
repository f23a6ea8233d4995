//! Serializer: walks a content tree and emits equivalent markup text.
//!
//! For a node whose style differs from its parent's, the attribute delta is
//! encoded as opening tags before the content and matching closing tags
//! after. Literal text is escaped so that re-parsing the output yields a
//! semantically equivalent tree.

use crate::component::{Component, Value};
use crate::style::{HoverEvent, Style};

/// Serialize a content tree into markup text.
pub fn serialize(component: &Component) -> String {
    let mut out = String::new();
    emit(component, &Style::default(), &mut out);
    out
}

fn emit(component: &Component, parent: &Style, out: &mut String) {
    // Opening tags can only add attributes. A node that drops part of its
    // inherited context needs an explicit reset scope first.
    if needs_reset(&component.style, parent) {
        out.push_str("<reset>");
        emit_delta(component, &Style::default(), out);
        out.push_str("</reset>");
    } else {
        emit_delta(component, parent, out);
    }
}

/// True when `style` cannot be reached from `parent` by opening tags alone.
fn needs_reset(style: &Style, parent: &Style) -> bool {
    !style.decorations.contains(parent.decorations)
        || (parent.color.is_some() && style.color.is_none())
        || (parent.font.is_some() && style.font.is_none())
        || (parent.insertion.is_some() && style.insertion.is_none())
        || (parent.click.is_some() && style.click.is_none())
        || (parent.hover.is_some() && style.hover.is_none())
}

fn emit_delta(component: &Component, parent: &Style, out: &mut String) {
    let delta = component.style.delta(parent);
    let tags = delta_tags(&delta);

    for (open, _) in &tags {
        out.push_str(open);
    }

    match &component.value {
        Value::Text(text) => out.push_str(&escape_text(text)),
        Value::Keybind(key) => {
            out.push_str("<key:");
            out.push_str(&quote_arg(key));
            out.push_str("></key>");
        }
        Value::Translatable { key, args } => {
            out.push_str("<lang:");
            out.push_str(&quote_arg(key));
            for arg in args {
                out.push_str(":\"");
                out.push_str(&escape_quoted(&serialize(arg)));
                out.push('"');
            }
            out.push_str("></lang>");
        }
    }

    for child in &component.children {
        emit(child, &component.style, out);
    }

    for (_, close) in tags.iter().rev() {
        out.push_str(close);
    }
}

/// Opening/closing tag pairs encoding a style delta.
///
/// Attribute order is fixed so output is deterministic.
fn delta_tags(delta: &Style) -> Vec<(String, String)> {
    let mut tags = Vec::new();

    if let Some(color) = &delta.color {
        match color {
            crate::color::Color::Named(name) => {
                tags.push((format!("<{}>", name), format!("</{}>", name)));
            }
            crate::color::Color::Rgb(r, g, b) => {
                tags.push((
                    format!("<color:#{:02x}{:02x}{:02x}>", r, g, b),
                    "</color>".to_string(),
                ));
            }
        }
    }

    for name in delta.decorations.names() {
        tags.push((format!("<{}>", name), format!("</{}>", name)));
    }

    if let Some(font) = &delta.font {
        tags.push((format!("<font:{}>", quote_arg(font)), "</font>".to_string()));
    }

    if let Some(insertion) = &delta.insertion {
        tags.push((
            format!("<insert:{}>", quote_arg(insertion)),
            "</insert>".to_string(),
        ));
    }

    if let Some(click) = &delta.click {
        tags.push((
            format!("<click:{}:{}>", click.action.as_str(), quote_arg(&click.value)),
            "</click>".to_string(),
        ));
    }

    if let Some(HoverEvent::ShowText(content)) = &delta.hover {
        tags.push((
            format!("<hover:show_text:\"{}\">", escape_quoted(&serialize(content))),
            "</hover>".to_string(),
        ));
    }

    tags
}

/// Escape literal text so it survives a re-parse unchanged.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '<' | '>' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Quote a tag argument when it contains structural characters.
fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(|c| matches!(c, ':' | '<' | '>' | '"' | '\'' | '\\')) {
        format!("\"{}\"", escape_quoted(arg))
    } else {
        arg.to_string()
    }
}

/// Escape a string for inclusion inside a double-quoted argument.
fn escape_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
