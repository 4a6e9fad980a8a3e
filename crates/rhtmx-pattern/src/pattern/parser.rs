/// Pattern tokenizer
///
/// Turns pattern text such as `/users/{id}/posts` into a [`Pattern`]:
/// `START -> Const("/users/") -> Parameter("{id}") -> Const("/posts") -> END`.
///
/// The scan walks code points but tracks byte offsets, so multi-byte
/// literals and names are sliced on character boundaries. Compiled tokens
/// borrow the pattern text; nothing is copied.

use std::borrow::Cow;

use super::Pattern;
use crate::{ParseError, Token};

/// Characters that open and close a placeholder
///
/// # Examples
///
/// ```
/// use rhtmx_pattern::{Delimiters, Parser};
///
/// let parser = Parser::new(Delimiters::new('<', '>')).unwrap();
/// let pattern = parser.parse("/users/<id>").unwrap();
/// assert_eq!(pattern.num_params(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    /// Opens a placeholder (default `{`)
    pub open: char,
    /// Closes a placeholder (default `}`)
    pub close: char,
}

impl Delimiters {
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new('{', '}')
    }
}

/// Compiles pattern text with a fixed pair of delimiters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    delimiters: Delimiters,
}

impl Parser {
    /// Creates a parser, rejecting identical open/close delimiters
    pub fn new(delimiters: Delimiters) -> Result<Self, ParseError> {
        if delimiters.open == delimiters.close {
            return Err(ParseError::SameDelimiters(delimiters.open));
        }
        Ok(Self { delimiters })
    }

    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Compiles an unnamed pattern
    pub fn parse<'a>(&self, text: &'a str) -> Result<Pattern<'a>, ParseError> {
        self.parse_named("", text)
    }

    /// Compiles a pattern whose `END` token carries `name`
    ///
    /// # Rules
    ///
    /// 1. Empty text is an error
    /// 2. An opening delimiter right after a closed placeholder is an error
    ///    (`{a}{b}`): a literal must separate parameters
    /// 3. An opening delimiter inside an open placeholder abandons the first
    ///    one, which becomes literal text (`{{bar}` is `{` + `{bar}`)
    /// 4. A closing delimiter outside a placeholder is literal text
    /// 5. A placeholder with an empty name is an error (`{}`)
    /// 6. A placeholder still open at the end is an error (`{bar`)
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_pattern::{parse_named, Token};
    ///
    /// let pattern = parse_named("user", "/users/{id}").unwrap();
    /// assert_eq!(
    ///     pattern.tokens(),
    ///     &[
    ///         Token::Start,
    ///         Token::constant("/users/"),
    ///         Token::parameter("id"),
    ///         Token::end("user"),
    ///     ]
    /// );
    /// ```
    pub fn parse_named<'a>(&self, name: &'a str, text: &'a str) -> Result<Pattern<'a>, ParseError> {
        if text.is_empty() {
            return Err(ParseError::Empty);
        }

        let Delimiters { open, close } = self.delimiters;
        let mut tokens = Vec::with_capacity(4);
        tokens.push(Token::Start);

        // Byte offset where the pending literal starts (just past the last
        // closed placeholder)
        let mut literal_start = 0;
        // Byte offset of the currently open placeholder
        let mut open_at: Option<usize> = None;
        let mut num_params = 0;

        for (i, ch) in text.char_indices() {
            if ch == open {
                if i > 0 && i == literal_start {
                    return Err(ParseError::AdjacentParameters { pos: i });
                }
                open_at = Some(i);
            } else if ch == close {
                let Some(start) = open_at else {
                    continue;
                };
                if i == start + open.len_utf8() {
                    return Err(ParseError::EmptyName { pos: i });
                }
                if start > literal_start {
                    tokens.push(Token::Const(Cow::Borrowed(&text[literal_start..start])));
                }
                let end = i + close.len_utf8();
                tokens.push(Token::Parameter(Cow::Borrowed(&text[start..end])));
                num_params += 1;
                literal_start = end;
                open_at = None;
            }
        }

        if let Some(start) = open_at {
            return Err(ParseError::Unclosed { pos: start });
        }
        if literal_start < text.len() {
            tokens.push(Token::Const(Cow::Borrowed(&text[literal_start..])));
        }
        tokens.push(Token::end(name));

        Ok(Pattern::from_parts(tokens, num_params))
    }
}

/// Compiles an unnamed pattern with the default `{` `}` delimiters
///
/// # Examples
///
/// ```
/// use rhtmx_pattern::parse;
///
/// let pattern = parse("foo{qwe}bar").unwrap();
/// let params = pattern.lookup("foo123bar").unwrap();
/// assert_eq!(params.get("qwe"), Some("123"));
///
/// assert!(parse("{foo}{bar}").is_err());
/// ```
pub fn parse(text: &str) -> Result<Pattern<'_>, ParseError> {
    Parser::default().parse(text)
}

/// Compiles a named pattern with the default `{` `}` delimiters
pub fn parse_named<'a>(name: &'a str, text: &'a str) -> Result<Pattern<'a>, ParseError> {
    Parser::default().parse_named(name, text)
}
