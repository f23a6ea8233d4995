//! Error types for tag markup parsing.

use thiserror::Error;

/// Top-level error returned by the engine facade.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A structural or tag-level parse failure.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Caller misuse of a convenience placeholder form.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// Errors that can occur while parsing markup text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Unterminated tag (missing `>`).
    #[error("unclosed tag starting at position {0}")]
    UnclosedTag(usize),

    /// Close tag with no matching open tag.
    #[error("unexpected close tag </{name}> at position {pos}")]
    UnexpectedCloseTag { name: String, pos: usize },

    /// Empty tag content (`<>` or `</>`).
    #[error("empty tag at position {0}")]
    EmptyTag(usize),

    /// Invalid escape sequence.
    #[error("invalid escape sequence at position {0}")]
    InvalidEscape(usize),

    /// Tag nesting exceeded the recursion guard.
    #[error("tag nesting deeper than {0} levels")]
    DepthLimit(usize),

    /// A matched tag type rejected its arguments.
    #[error("tag <{name}> failed to load: {source}")]
    Transform {
        name: String,
        #[source]
        source: TransformError,
    },
}

/// Errors produced by a transformation type while loading tag arguments.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    /// Invalid color value.
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),

    /// Unknown click action name.
    #[error("unknown click action: {0}")]
    UnknownClickAction(String),

    /// Hover action other than `show_text`.
    #[error("unsupported hover action: {0}")]
    UnsupportedHoverAction(String),

    /// Required argument missing.
    #[error("missing argument for <{tag}>: expected {expected}")]
    MissingArgument { tag: String, expected: &'static str },

    /// Wrong number of arguments.
    #[error("wrong arguments for <{tag}>: expected {expected}, got {got}")]
    WrongArity {
        tag: String,
        expected: &'static str,
        got: usize,
    },

    /// Non-numeric gradient/rainbow phase.
    #[error("invalid phase value: {0}")]
    InvalidPhase(String),
}

/// Errors that can occur when parsing a color value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorParseError {
    /// Unknown color name.
    #[error("unknown color name: {0}")]
    UnknownName(String),

    /// Invalid hex color format.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// Errors raised while validating convenience placeholder arguments.
///
/// These are detected eagerly, before any tokenizing happens.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArgumentError {
    /// Odd-length key/value sequence.
    #[error("each placeholder must have a key and a value ({0} arguments given)")]
    OddLength(usize),

    /// A key position held a non-text value.
    #[error("argument {0} in placeholders must be a string: is key")]
    NonTextKey(usize),
}
