//! Markdown preprocessing pass.
//!
//! Rewrites a lightweight markdown dialect into tag syntax before the main
//! parse, and can strip markdown syntax without tag awareness. Both are
//! pure text-to-text functions.
//!
//! A marker only opens a span when the same marker appears again later in
//! the input; an unpaired marker is literal text (`2 * 3` stays `2 * 3`).

/// Dialect variant for the markdown pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkdownFlavor {
    /// `**` bold, `*` italic, `__` underlined, `_` italic, `~~` strikethrough.
    #[default]
    Legacy,
    /// `**` and `__` bold, `*` and `_` italic, `~~` strikethrough.
    Github,
}

/// Rewrite markdown syntax into tag syntax.
pub fn parse(input: &str, flavor: MarkdownFlavor) -> String {
    rewrite(input, flavor, true)
}

/// Remove markdown syntax, keeping the text.
pub fn strip(input: &str, flavor: MarkdownFlavor) -> String {
    rewrite(input, flavor, false)
}

/// The marker sequence starting the remaining input, if any.
fn marker_at(rest: &str) -> Option<&'static str> {
    if rest.starts_with("**") {
        Some("**")
    } else if rest.starts_with('*') {
        Some("*")
    } else if rest.starts_with("__") {
        Some("__")
    } else if rest.starts_with('_') {
        Some("_")
    } else if rest.starts_with("~~") {
        Some("~~")
    } else {
        None
    }
}

fn tag_for(marker: &str, flavor: MarkdownFlavor) -> &'static str {
    match marker {
        "**" => "bold",
        "__" => match flavor {
            MarkdownFlavor::Legacy => "underlined",
            MarkdownFlavor::Github => "bold",
        },
        "*" | "_" => "italic",
        _ => "strikethrough",
    }
}

fn rewrite(input: &str, flavor: MarkdownFlavor, emit_tags: bool) -> String {
    let mut out = String::with_capacity(input.len());
    let mut open: Vec<(&'static str, &'static str)> = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        match marker_at(rest) {
            Some(marker) => {
                rest = &rest[marker.len()..];
                if let Some(i) = open.iter().position(|(m, _)| *m == marker) {
                    let (_, tag) = open.remove(i);
                    if emit_tags {
                        out.push_str(&format!("</{}>", tag));
                    }
                } else if rest.contains(marker) {
                    let tag = tag_for(marker, flavor);
                    open.push((marker, tag));
                    if emit_tags {
                        out.push_str(&format!("<{}>", tag));
                    }
                } else {
                    // No closer ahead; the marker is literal text.
                    out.push_str(marker);
                }
            }
            None => {
                if let Some(c) = rest.chars().next() {
                    out.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
    }

    // An opener whose closer got consumed as part of a longer marker can be
    // left dangling; balance the output.
    while let Some((_, tag)) = open.pop() {
        if emit_tags {
            out.push_str(&format!("</{}>", tag));
        }
    }

    out
}
