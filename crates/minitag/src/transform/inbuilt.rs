//! Built-in transformation types.

use crate::color::Color;
use crate::component::Component;
use crate::error::TransformError;
use crate::style::{ClickAction, ClickEvent, Decorations, Style};

use super::{Transformation, TransformationType};

fn missing(tag: &str, expected: &'static str) -> TransformError {
    TransformError::MissingArgument {
        tag: tag.to_string(),
        expected,
    }
}

fn arity(tag: &str, expected: &'static str, got: usize) -> TransformError {
    TransformError::WrongArity {
        tag: tag.to_string(),
        expected,
        got,
    }
}

/// `<red>`, `<color:red>`, `<color:#ff5733>`; aliases `colour` and `c`.
pub fn color() -> TransformationType {
    TransformationType::new(
        "color",
        |name| matches!(name, "color" | "colour" | "c") || Color::is_named(name),
        |name, args| {
            let value = if matches!(name, "color" | "colour" | "c") {
                args.first()
                    .map(String::as_str)
                    .ok_or_else(|| missing(name, "a color value"))?
            } else {
                if !args.is_empty() {
                    return Err(arity(name, "no arguments", args.len()));
                }
                name
            };
            let color = Color::parse(value)?;
            Ok(Transformation::Style(Style::colored(color)))
        },
    )
}

/// `<bold>`, `<italic>`, `<underlined>`, `<strikethrough>`, `<obfuscated>`
/// and their short aliases.
pub fn decoration() -> TransformationType {
    TransformationType::new(
        "decoration",
        |name| Decorations::by_name(name).is_some(),
        |name, args| {
            if !args.is_empty() {
                return Err(arity(name, "no arguments", args.len()));
            }
            match Decorations::by_name(name) {
                Some(decoration) => Ok(Transformation::Style(Style::decorated(decoration))),
                // Unreachable with the predicate above, but never panic.
                None => Err(missing(name, "a decoration name")),
            }
        },
    )
}

/// `<hover:show_text:"content">`; the value is parsed as nested markup.
pub fn hover() -> TransformationType {
    TransformationType::new(
        "hover",
        |name| name == "hover",
        |name, args| {
            if args.len() != 2 {
                return Err(arity(name, "an action and a value", args.len()));
            }
            if args[0] != "show_text" {
                return Err(TransformError::UnsupportedHoverAction(args[0].clone()));
            }
            Ok(Transformation::Hover(args[1].clone()))
        },
    )
}

/// `<click:run_command:"/help">`.
pub fn click() -> TransformationType {
    TransformationType::new(
        "click",
        |name| name == "click",
        |name, args| {
            if args.len() != 2 {
                return Err(arity(name, "an action and a value", args.len()));
            }
            let action = ClickAction::parse(&args[0])?;
            Ok(Transformation::Style(Style {
                click: Some(ClickEvent {
                    action,
                    value: args[1].clone(),
                }),
                ..Default::default()
            }))
        },
    )
}

/// `<key:key.jump>` inserts a keybind leaf.
pub fn keybind() -> TransformationType {
    TransformationType::new(
        "keybind",
        |name| name == "key",
        |name, args| match args {
            [key] => Ok(Transformation::Insert(Component::keybind(key.clone()))),
            _ => Err(arity(name, "a key identifier", args.len())),
        },
    )
}

/// `<lang:block.stone>` / `<lang:commands.kill:"<red>you">`; aliases
/// `translate` and `tr`. Arguments after the key are parsed as markup.
pub fn translatable() -> TransformationType {
    TransformationType::new(
        "translatable",
        |name| matches!(name, "lang" | "translate" | "tr"),
        |name, args| {
            let (key, rest) = args
                .split_first()
                .ok_or_else(|| missing(name, "a translation key"))?;
            Ok(Transformation::Translate {
                key: key.clone(),
                args: rest.to_vec(),
            })
        },
    )
}

/// `<insert:text>` sets the insertion attribute.
pub fn insertion() -> TransformationType {
    TransformationType::new(
        "insertion",
        |name| name == "insert",
        |name, args| match args {
            [text] => Ok(Transformation::Style(Style {
                insertion: Some(text.clone()),
                ..Default::default()
            })),
            _ => Err(arity(name, "the insertion text", args.len())),
        },
    )
}

/// `<font:uniform>` sets the font key.
pub fn font() -> TransformationType {
    TransformationType::new(
        "font",
        |name| name == "font",
        |name, args| match args {
            [key] => Ok(Transformation::Style(Style {
                font: Some(key.clone()),
                ..Default::default()
            })),
            _ => Err(arity(name, "a font key", args.len())),
        },
    )
}

/// `<gradient:#5e4fa2:#f79459>`, optional trailing phase argument.
pub fn gradient() -> TransformationType {
    TransformationType::new(
        "gradient",
        |name| name == "gradient",
        |_, args| {
            let mut colors = Vec::new();
            let mut phase = 0.0f32;
            for (i, arg) in args.iter().enumerate() {
                match Color::parse(arg) {
                    Ok(color) => colors.push(color),
                    Err(color_err) => {
                        // A trailing numeric argument is the phase.
                        if i == args.len() - 1 {
                            phase = arg
                                .parse::<f32>()
                                .map_err(|_| TransformError::InvalidColor(color_err))?;
                        } else {
                            return Err(TransformError::InvalidColor(color_err));
                        }
                    }
                }
            }
            if colors.is_empty() {
                colors = vec![
                    Color::Named("white".to_string()),
                    Color::Named("black".to_string()),
                ];
            }
            Ok(Transformation::Gradient { colors, phase })
        },
    )
}

/// `<rainbow>` or `<rainbow:2>`.
pub fn rainbow() -> TransformationType {
    TransformationType::new(
        "rainbow",
        |name| name == "rainbow",
        |name, args| match args {
            [] => Ok(Transformation::Rainbow { phase: 0.0 }),
            [phase] => {
                let phase = phase
                    .parse::<f32>()
                    .map_err(|_| TransformError::InvalidPhase(phase.clone()))?;
                Ok(Transformation::Rainbow { phase })
            }
            _ => Err(arity(name, "an optional phase", args.len())),
        },
    )
}

/// `<reset>` (alias `r`) clears all inherited attributes for its subtree.
pub fn reset() -> TransformationType {
    TransformationType::new(
        "reset",
        |name| matches!(name, "reset" | "r"),
        |name, args| {
            if !args.is_empty() {
                return Err(arity(name, "no arguments", args.len()));
            }
            Ok(Transformation::Reset)
        },
    )
}

/// `<pre>` encloses verbatim content; the tokenizer has already consumed
/// the raw text.
pub fn pre() -> TransformationType {
    TransformationType::new(
        "pre",
        |name| name == "pre",
        |_, _| Ok(Transformation::Verbatim),
    )
}
