//! Round-trip tests: parse, serialize, re-parse, and compare trees.

use minitag::{Color, Component, MiniTag, Style, Value};

/// Collect non-empty text leaves with their effective styles.
///
/// Serialization may regroup nodes, so equivalence is judged on the leaf
/// runs rather than on tree shape.
fn leaves(component: &Component) -> Vec<(String, Style)> {
    fn collect(component: &Component, out: &mut Vec<(String, Style)>) {
        if let Value::Text(text) = &component.value {
            if !text.is_empty() {
                out.push((text.clone(), component.style.clone()));
            }
        }
        for child in &component.children {
            collect(child, out);
        }
    }
    let mut out = Vec::new();
    collect(component, &mut out);
    out
}

fn assert_round_trip(input: &str) {
    let engine = MiniTag::new();
    let first = engine.parse(input).unwrap();
    let markup = engine.serialize(&first);
    let second = engine
        .parse(&markup)
        .unwrap_or_else(|e| panic!("re-parse of {:?} failed: {}", markup, e));
    assert_eq!(
        leaves(&first),
        leaves(&second),
        "round trip changed meaning: {:?} -> {:?}",
        input,
        markup
    );
}

#[test]
fn round_trip_plain_text() {
    assert_round_trip("just some text");
}

#[test]
fn round_trip_decorations() {
    assert_round_trip("<bold>a</bold>");
    assert_round_trip("<bold>a <italic>b</italic> c</bold>");
    assert_round_trip("<underlined><strikethrough>x</strikethrough></underlined>");
}

#[test]
fn round_trip_colors() {
    assert_round_trip("<red>x</red>");
    assert_round_trip("<color:#ff5733>x</color>");
    assert_round_trip("<dark_aqua>a<gold>b</gold></dark_aqua>");
}

#[test]
fn round_trip_nested_mix() {
    assert_round_trip("<bold>Hello <red>world</red>!</bold>");
    assert_round_trip("<red>a<bold>b</bold>c</red> plain <blue>d</blue>");
}

#[test]
fn round_trip_events() {
    assert_round_trip("<click:run_command:\"/help\">help</click>");
    assert_round_trip("<click:open_url:\"https://example.com\">link</click>");
    assert_round_trip("<hover:show_text:'<red>peek'>over</hover>");
}

#[test]
fn round_trip_attributes() {
    assert_round_trip("<insert:clipboard text>x</insert>");
    assert_round_trip("<font:uniform>x</font>");
}

#[test]
fn round_trip_escaped_literals() {
    assert_round_trip(r"1 \< 2 \> 0");
    assert_round_trip(r"a \\ b");
}

#[test]
fn round_trip_verbatim_becomes_escaped() {
    // Verbatim input serializes as escaped literal text; the meaning is
    // preserved even though the syntax differs.
    assert_round_trip("<pre><red>x</red></pre>");
}

#[test]
fn round_trip_gradient_expansion() {
    // Per-character color runs serialize as explicit color tags.
    assert_round_trip("<gradient:#000000:#ffffff>abc</gradient>");
    assert_round_trip("<rainbow>abc</rainbow>");
}

#[test]
fn round_trip_reset() {
    assert_round_trip("<bold><red>a<reset>b</reset>c</red></bold>");
}

#[test]
fn serialize_canonical_example() {
    let engine = MiniTag::new();
    let tree = engine.parse("<bold>Hello <red>world</red>!</bold>").unwrap();
    assert_eq!(
        engine.serialize(&tree),
        "<bold>Hello <red>world</red>!</bold>"
    );
}

#[test]
fn serialize_snapshots() {
    let engine = MiniTag::new();
    let reformat = |input: &str| engine.serialize(&engine.parse(input).unwrap());

    insta::assert_snapshot!(
        reformat("<bold>Hello <red>world</red>!</bold>"),
        @"<bold>Hello <red>world</red>!</bold>"
    );
    insta::assert_snapshot!(
        reformat("<color:#ff5733>x</color>"),
        @"<color:#ff5733>x</color>"
    );
    insta::assert_snapshot!(
        reformat("<pre><red>x</red></pre>"),
        @r"\<red\>x\</red\>"
    );
}

#[test]
fn serialize_named_vs_rgb_color() {
    let engine = MiniTag::new();

    let named = Component::text("x").with_style(Style::colored(Color::Named("green".into())));
    assert_eq!(engine.serialize(&named), "<green>x</green>");

    let rgb = Component::text("x").with_style(Style::colored(Color::Rgb(0, 0, 170)));
    assert_eq!(engine.serialize(&rgb), "<color:#0000aa>x</color>");
}

#[test]
fn serialize_keybind_round_trips() {
    let engine = MiniTag::new();
    let tree = engine.parse("<key:key.jump>").unwrap();
    let markup = engine.serialize(&tree);
    let again = engine.parse(&markup).unwrap();
    assert_eq!(tree.value, again.value);
}

#[test]
fn serialize_translatable_round_trips() {
    let engine = MiniTag::new();
    let tree = engine.parse("<lang:commands.kill:'<red>you'>").unwrap();
    let markup = engine.serialize(&tree);
    let again = engine.parse(&markup).unwrap();
    assert_eq!(tree.value, again.value);
}

#[test]
fn serialize_escapes_structural_text() {
    let engine = MiniTag::new();
    let tree = Component::text("a < b > c \\ d");
    let markup = engine.serialize(&tree);
    assert_eq!(markup, r"a \< b \> c \\ d");
    assert_eq!(engine.parse(&markup).unwrap().plain_text(), "a < b > c \\ d");
}
