//! Tokenizer for tag markup.
//!
//! Scans input text into a stream of events, then pairs open/close tags
//! into a token tree.

use crate::error::ParseError;

/// Recursion guard for tag nesting.
pub const MAX_DEPTH: usize = 128;

/// Tag names whose content is consumed verbatim, without nested tag parsing.
const VERBATIM_TAGS: &[&str] = &["pre"];

/// Check if a tag name encloses verbatim content.
pub fn is_verbatim(name: &str) -> bool {
    VERBATIM_TAGS.contains(&name)
}

/// A node of the token tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// Literal text run, escapes already resolved.
    Text(String),
    /// An open tag with its raw arguments and nested child tokens.
    Open {
        name: String,
        args: Vec<String>,
        children: Vec<Token>,
        /// Whether an explicit close tag was consumed for this tag.
        closed: bool,
        /// The exact source slice of the open tag, for literal fallback.
        raw: String,
    },
}

/// A flat event produced by the lexer.
#[derive(Clone, Debug, PartialEq)]
enum Event {
    Text(String),
    Open {
        name: String,
        args: Vec<String>,
        raw: String,
    },
    Close {
        name: String,
        pos: usize,
    },
}

/// Lexer over markup text.
///
/// Produces flat [`Event`]s; [`tokenize`] pairs them into a tree.
struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn next_event(&mut self) -> Option<Result<Event, ParseError>> {
        if self.pos >= self.input.len() {
            return None;
        }
        match self.peek() {
            Some('<') => Some(self.consume_tag()),
            _ => Some(self.consume_text()),
        }
    }

    /// Consume literal text up to the next tag, resolving escapes.
    fn consume_text(&mut self) -> Result<Event, ParseError> {
        let mut out = String::new();

        while let Some(c) = self.peek() {
            match c {
                '<' => break,
                '\\' => {
                    let escape_start = self.pos;
                    self.advance();
                    match self.peek() {
                        Some(escaped @ ('<' | '>' | '\\')) => {
                            out.push(escaped);
                            self.advance();
                        }
                        _ => return Err(ParseError::InvalidEscape(escape_start)),
                    }
                }
                _ => {
                    out.push(c);
                    self.advance();
                }
            }
        }

        Ok(Event::Text(out))
    }

    /// Consume a tag (including the angle brackets).
    fn consume_tag(&mut self) -> Result<Event, ParseError> {
        let tag_start = self.pos;
        self.advance(); // consume '<'

        if self.peek() == Some('/') {
            self.advance();
            let name_start = self.pos;
            loop {
                match self.peek() {
                    Some('>') => break,
                    Some(_) => {
                        self.advance();
                    }
                    None => return Err(ParseError::UnclosedTag(tag_start)),
                }
            }
            let name = &self.input[name_start..self.pos];
            self.advance(); // consume '>'
            if name.is_empty() {
                return Err(ParseError::EmptyTag(tag_start));
            }
            return Ok(Event::Close {
                name: name.to_string(),
                pos: tag_start,
            });
        }

        // Tag name runs until ':' (arguments) or '>'.
        let name_start = self.pos;
        loop {
            match self.peek() {
                Some(':' | '>') => break,
                Some(_) => {
                    self.advance();
                }
                None => return Err(ParseError::UnclosedTag(tag_start)),
            }
        }
        let name = self.input[name_start..self.pos].to_string();
        if name.is_empty() {
            return Err(ParseError::EmptyTag(tag_start));
        }

        let mut args = Vec::new();
        while self.peek() == Some(':') {
            self.advance();
            args.push(self.consume_arg(tag_start)?);
        }

        match self.peek() {
            Some('>') => {
                self.advance();
            }
            _ => return Err(ParseError::UnclosedTag(tag_start)),
        }

        Ok(Event::Open {
            name,
            args,
            raw: self.input[tag_start..self.pos].to_string(),
        })
    }

    /// Consume one tag argument.
    ///
    /// Quoted arguments (`"..."` or `'...'`) may contain `:`, `<` and `>`;
    /// inside quotes a backslash escapes the following character.
    fn consume_arg(&mut self, tag_start: usize) -> Result<String, ParseError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let mut out = String::new();
                loop {
                    match self.peek() {
                        None => return Err(ParseError::UnclosedTag(tag_start)),
                        Some(c) if c == quote => {
                            self.advance();
                            return Ok(out);
                        }
                        Some('\\') => {
                            self.advance();
                            match self.advance() {
                                Some(escaped) => out.push(escaped),
                                None => return Err(ParseError::UnclosedTag(tag_start)),
                            }
                        }
                        Some(c) => {
                            out.push(c);
                            self.advance();
                        }
                    }
                }
            }
            _ => {
                let start = self.pos;
                loop {
                    match self.peek() {
                        Some(':' | '>') => break,
                        Some(_) => {
                            self.advance();
                        }
                        None => return Err(ParseError::UnclosedTag(tag_start)),
                    }
                }
                Ok(self.input[start..self.pos].to_string())
            }
        }
    }

    /// Consume raw text up to the close tag of a verbatim tag.
    ///
    /// Returns the text and whether the close tag was found and consumed.
    fn take_verbatim(&mut self, name: &str) -> (String, bool) {
        let close = format!("</{}>", name);
        match self.remaining().find(&close) {
            Some(offset) => {
                let text = self.input[self.pos..self.pos + offset].to_string();
                self.pos += offset + close.len();
                (text, true)
            }
            None => {
                let text = self.remaining().to_string();
                self.pos = self.input.len();
                (text, false)
            }
        }
    }
}

/// An open tag still waiting for its close tag.
struct Frame {
    name: String,
    args: Vec<String>,
    raw: String,
    children: Vec<Token>,
}

impl Frame {
    fn into_token(self, closed: bool) -> Token {
        Token::Open {
            name: self.name,
            args: self.args,
            children: self.children,
            closed,
            raw: self.raw,
        }
    }
}

/// Tokenize markup text into a token tree.
///
/// Open tags left unclosed at end of input are implicitly closed. A close
/// tag that matches no open tag on the stack is a parse failure.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(input);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Vec<Token> = Vec::new();

    fn push(stack: &mut [Frame], root: &mut Vec<Token>, token: Token) {
        match stack.last_mut() {
            Some(frame) => frame.children.push(token),
            None => root.push(token),
        }
    }

    while let Some(event) = lexer.next_event() {
        match event? {
            Event::Text(text) => {
                if !text.is_empty() {
                    push(&mut stack, &mut root, Token::Text(text));
                }
            }
            Event::Open { name, args, raw } => {
                if is_verbatim(&name) {
                    let (text, closed) = lexer.take_verbatim(&name);
                    let children = if text.is_empty() {
                        Vec::new()
                    } else {
                        vec![Token::Text(text)]
                    };
                    push(
                        &mut stack,
                        &mut root,
                        Token::Open {
                            name,
                            args,
                            children,
                            closed,
                            raw,
                        },
                    );
                } else {
                    if stack.len() >= MAX_DEPTH {
                        return Err(ParseError::DepthLimit(MAX_DEPTH));
                    }
                    stack.push(Frame {
                        name,
                        args,
                        raw,
                        children: Vec::new(),
                    });
                }
            }
            Event::Close { name, pos } => {
                if !stack.iter().any(|frame| frame.name == name) {
                    return Err(ParseError::UnexpectedCloseTag { name, pos });
                }
                // Implicitly close any inner tags down to the match.
                while let Some(frame) = stack.pop() {
                    let matched = frame.name == name;
                    let token = frame.into_token(matched);
                    push(&mut stack, &mut root, token);
                    if matched {
                        break;
                    }
                }
            }
        }
    }

    while let Some(frame) = stack.pop() {
        let token = frame.into_token(false);
        push(&mut stack, &mut root, token);
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        tokenize(input).unwrap()
    }

    fn open(name: &str, args: &[&str], children: Vec<Token>, closed: bool, raw: &str) -> Token {
        Token::Open {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            children,
            closed,
            raw: raw.to_string(),
        }
    }

    #[test]
    fn lex_plain_text() {
        assert_eq!(lex("Hello World"), vec![Token::Text("Hello World".into())]);
    }

    #[test]
    fn lex_simple_tag() {
        assert_eq!(
            lex("<bold>Hello</bold>"),
            vec![open(
                "bold",
                &[],
                vec![Token::Text("Hello".into())],
                true,
                "<bold>"
            )]
        );
    }

    #[test]
    fn lex_tag_with_args() {
        assert_eq!(
            lex("<color:red>x</color>"),
            vec![open(
                "color",
                &["red"],
                vec![Token::Text("x".into())],
                true,
                "<color:red>"
            )]
        );
    }

    #[test]
    fn lex_quoted_arg() {
        assert_eq!(
            lex("<hover:show_text:'<red>hi:there'>x</hover>"),
            vec![open(
                "hover",
                &["show_text", "<red>hi:there"],
                vec![Token::Text("x".into())],
                true,
                "<hover:show_text:'<red>hi:there'>"
            )]
        );
    }

    #[test]
    fn lex_quoted_arg_escapes() {
        assert_eq!(
            lex(r#"<click:run_command:"say \"hi\"">x</click>"#),
            vec![open(
                "click",
                &["run_command", r#"say "hi""#],
                vec![Token::Text("x".into())],
                true,
                r#"<click:run_command:"say \"hi\"">"#
            )]
        );
    }

    #[test]
    fn lex_nested_tags() {
        assert_eq!(
            lex("<bold>a<red>b</red>c</bold>"),
            vec![open(
                "bold",
                &[],
                vec![
                    Token::Text("a".into()),
                    open("red", &[], vec![Token::Text("b".into())], true, "<red>"),
                    Token::Text("c".into()),
                ],
                true,
                "<bold>"
            )]
        );
    }

    #[test]
    fn lex_unclosed_implicitly_closes() {
        assert_eq!(
            lex("<bold>rest"),
            vec![open(
                "bold",
                &[],
                vec![Token::Text("rest".into())],
                false,
                "<bold>"
            )]
        );
    }

    #[test]
    fn lex_outer_close_implicitly_closes_inner() {
        assert_eq!(
            lex("<bold><red>x</bold>"),
            vec![open(
                "bold",
                &[],
                vec![open("red", &[], vec![Token::Text("x".into())], false, "<red>")],
                true,
                "<bold>"
            )]
        );
    }

    #[test]
    fn lex_escapes() {
        assert_eq!(
            lex(r"\<not a tag\> \\"),
            vec![Token::Text(r"<not a tag> \".into())]
        );
    }

    #[test]
    fn lex_invalid_escape() {
        assert!(matches!(
            tokenize(r"bad \escape"),
            Err(ParseError::InvalidEscape(4))
        ));
    }

    #[test]
    fn lex_unclosed_tag_errors() {
        assert!(matches!(tokenize("<bold"), Err(ParseError::UnclosedTag(0))));
        assert!(matches!(
            tokenize("text <color:red"),
            Err(ParseError::UnclosedTag(5))
        ));
    }

    #[test]
    fn lex_unexpected_close_tag() {
        assert!(matches!(
            tokenize("hello</bold>"),
            Err(ParseError::UnexpectedCloseTag { pos: 5, .. })
        ));
        assert!(matches!(
            tokenize("<red>x</bold>"),
            Err(ParseError::UnexpectedCloseTag { .. })
        ));
    }

    #[test]
    fn lex_empty_tag() {
        assert!(matches!(tokenize("<>"), Err(ParseError::EmptyTag(0))));
        assert!(matches!(tokenize("a</>"), Err(ParseError::EmptyTag(1))));
    }

    #[test]
    fn lex_verbatim() {
        assert_eq!(
            lex("<pre><not a tag></pre>"),
            vec![open(
                "pre",
                &[],
                vec![Token::Text("<not a tag>".into())],
                true,
                "<pre>"
            )]
        );
    }

    #[test]
    fn lex_verbatim_unclosed() {
        assert_eq!(
            lex("<pre><red>x"),
            vec![open(
                "pre",
                &[],
                vec![Token::Text("<red>x".into())],
                false,
                "<pre>"
            )]
        );
    }

    #[test]
    fn lex_depth_limit() {
        let mut input = String::new();
        for _ in 0..(MAX_DEPTH + 1) {
            input.push_str("<bold>");
        }
        assert!(matches!(
            tokenize(&input),
            Err(ParseError::DepthLimit(MAX_DEPTH))
        ));
    }

    #[test]
    fn lex_unicode() {
        assert_eq!(
            lex("<bold>日本語</bold>"),
            vec![open(
                "bold",
                &[],
                vec![Token::Text("日本語".into())],
                true,
                "<bold>"
            )]
        );
    }
}
