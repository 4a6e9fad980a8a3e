/// Compiled patterns and the standalone parameter extractor
///
/// A [`Pattern`] is the token sequence produced by the tokenizer (or
/// assembled by hand and validated with [`Pattern::from_tokens`]). It can be
/// matched on its own with [`Pattern::lookup`], or registered in a
/// [`Store`](crate::Store) together with many others.

pub mod parser;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

pub use parser::{parse, parse_named, Delimiters, Parser};

use crate::pool::Pools;
use crate::{schema_key, ParseError, Token};

/// Ordered token sequence framed by `START` and `END`
///
/// `num_params` counts the placeholders and is checked after every
/// extraction: a lookup that captured a different number of values fails.
/// The default (empty) pattern never matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern<'a> {
    tokens: Vec<Token<'a>>,
    num_params: usize,
}

/// Captured span, stored in pooled extraction buffers
#[derive(Debug, Clone, Copy)]
pub(crate) struct Span {
    token: usize,
    start: usize,
    end: usize,
}

impl<'a> Pattern<'a> {
    pub(crate) fn from_parts(tokens: Vec<Token<'a>>, num_params: usize) -> Self {
        Self { tokens, num_params }
    }

    /// Validates a hand-built token sequence
    ///
    /// The sequence must begin with `START`, finish with `END`, keep every
    /// literal non-empty and separate parameters with literals. Resolved
    /// parameters belong to match results and are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_pattern::{ParseError, Pattern, Token};
    ///
    /// let pattern = Pattern::from_tokens(vec![
    ///     Token::Start,
    ///     Token::separator("/"),
    ///     Token::parameter("id"),
    ///     Token::end("user"),
    /// ])
    /// .unwrap();
    /// assert_eq!(pattern.num_params(), 1);
    ///
    /// let err = Pattern::from_tokens(vec![Token::Start, Token::constant("x")]);
    /// assert_eq!(err, Err(ParseError::MissingEnd));
    /// ```
    pub fn from_tokens(tokens: Vec<Token<'a>>) -> Result<Self, ParseError> {
        if !matches!(tokens.first(), Some(Token::Start)) {
            return Err(ParseError::MissingStart);
        }
        let last = tokens.len() - 1;
        if last == 0 || !matches!(tokens[last], Token::End(_)) {
            return Err(ParseError::MissingEnd);
        }

        let mut num_params = 0;
        let mut after_param = false;
        for (index, token) in tokens.iter().enumerate() {
            match token {
                Token::Start if index != 0 => return Err(ParseError::MisplacedMarker { index }),
                Token::End(_) if index != last => return Err(ParseError::MisplacedMarker { index }),
                Token::Start | Token::End(_) => after_param = false,
                Token::Const(text) | Token::Separator(text) => {
                    if text.is_empty() {
                        return Err(ParseError::EmptyLiteral { index });
                    }
                    after_param = false;
                }
                Token::Parameter(_) => {
                    if after_param {
                        return Err(ParseError::AdjacentParameterTokens { index });
                    }
                    after_param = true;
                    num_params += 1;
                }
                Token::ParameterResolved(_) => return Err(ParseError::ResolvedToken { index }),
            }
        }

        Ok(Self { tokens, num_params })
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Number of placeholders (resolved or not)
    pub fn num_params(&self) -> usize {
        self.num_params
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Name carried by the closing `END` token
    pub fn name(&self) -> Option<&str> {
        if self.tokens.len() < 2 {
            return None;
        }
        self.tokens.last().and_then(Token::pattern_name)
    }

    /// Canonical key, identical for a registered pattern and its matches
    pub fn schema_key(&self) -> String {
        schema_key(&self.tokens)
    }

    /// Detaches the pattern from the text it was compiled from
    ///
    /// Resolved parameters turn back into their placeholders.
    pub fn into_owned(self) -> Pattern<'static> {
        Pattern {
            tokens: self.tokens.iter().map(Token::to_schema_owned).collect(),
            num_params: self.num_params,
        }
    }

    /// Splits every `Const` on `sep` into `Const` and `Separator` tokens
    ///
    /// Path routers use this so `/` does not count towards the specificity
    /// of a literal: `Const("/users/")` becomes
    /// `Separator("/") -> Const("users") -> Separator("/")`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_pattern::{parse, Token};
    ///
    /// let pattern = parse("/users/{id}").unwrap().split_separators("/");
    /// assert_eq!(
    ///     &pattern.tokens()[1..4],
    ///     &[Token::separator("/"), Token::constant("users"), Token::separator("/")]
    /// );
    /// ```
    pub fn split_separators(self, sep: &'a str) -> Pattern<'a> {
        if sep.is_empty() {
            return self;
        }

        let mut tokens = Vec::with_capacity(self.tokens.len() * 2);
        for token in self.tokens {
            match token {
                Token::Const(Cow::Borrowed(text)) => {
                    push_split(text, sep, &mut tokens, Cow::Borrowed)
                }
                Token::Const(Cow::Owned(text)) => {
                    push_split(&text, sep, &mut tokens, |piece| Cow::Owned(piece.to_owned()))
                }
                other => tokens.push(other),
            }
        }

        Pattern {
            tokens,
            num_params: self.num_params,
        }
    }

    /// Extracts placeholder values from `input`
    ///
    /// Matching is literal and left to right: a placeholder captures up to
    /// the first occurrence of the literal that follows it, or the rest of
    /// the input when it is last. Returns `None` when the input does not
    /// match.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_pattern::parse;
    ///
    /// let pattern = parse("foo=({p1}), baz=({p2}), golang").unwrap();
    /// let params = pattern.lookup("foo=(bar), baz=(qwe), golang").unwrap();
    /// assert_eq!(params.get("p1"), Some("bar"));
    /// assert_eq!(params.get("p2"), Some("qwe"));
    ///
    /// assert!(pattern.lookup("foo=(bar), baz=(qwe)").is_none());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics when two placeholders follow each other, which the tokenizer
    /// and [`Pattern::from_tokens`] never produce.
    pub fn lookup<'s>(&'s self, input: &'s str) -> Option<Params<'s>> {
        let mut spans = Vec::with_capacity(self.num_params);
        self.extract(input, &mut spans)
    }

    /// Same as [`lookup`](Self::lookup), with a working buffer from `pools`
    pub fn lookup_in<'s>(&'s self, pools: &Pools, input: &'s str) -> Option<Params<'s>> {
        let mut spans = pools.params.acquire();
        self.extract(input, &mut spans)
    }

    fn extract<'s>(&'s self, input: &'s str, spans: &mut Vec<Span>) -> Option<Params<'s>> {
        if self.tokens.is_empty() {
            return None;
        }

        let mut offset = 0;
        for (index, token) in self.tokens.iter().enumerate() {
            match token {
                Token::Start => {}
                Token::End(_) => break,
                Token::Const(literal) | Token::Separator(literal) => {
                    let literal: &str = literal;
                    if !input.get(offset..)?.starts_with(literal) {
                        return None;
                    }
                    offset += literal.len();
                }
                Token::ParameterResolved(capture) => {
                    let end = offset + capture.len();
                    input.get(offset..end)?;
                    spans.push(Span { token: index, start: offset, end });
                    offset = end;
                }
                Token::Parameter(_) => {
                    let rest = input.get(offset..)?;
                    let width = match self.tokens.get(index + 1) {
                        None | Some(Token::End(_)) => rest.len(),
                        Some(Token::Const(literal)) | Some(Token::Separator(literal)) => {
                            let literal: &str = literal;
                            rest.find(literal)?
                        }
                        Some(Token::Parameter(_)) | Some(Token::ParameterResolved(_)) => panic!(
                            "parameters at {} and {} are not separated by a literal",
                            index,
                            index + 1
                        ),
                        Some(Token::Start) => return None,
                    };
                    spans.push(Span { token: index, start: offset, end: offset + width });
                    offset += width;
                }
            }
        }

        if offset != input.len() || spans.len() != self.num_params {
            return None;
        }

        let params = spans
            .iter()
            .map(|span| Param {
                name: self.tokens[span.token].param_name().unwrap_or(""),
                value: &input[span.start..span.end],
            })
            .collect();
        Some(Params(params))
    }
}

fn push_split<'s, 'a>(
    text: &'s str,
    sep: &'a str,
    out: &mut Vec<Token<'a>>,
    wrap: impl Fn(&'s str) -> Cow<'a, str>,
) {
    for (i, piece) in text.split(sep).enumerate() {
        if i > 0 {
            out.push(Token::Separator(Cow::Borrowed(sep)));
        }
        if !piece.is_empty() {
            out.push(Token::Const(wrap(piece)));
        }
    }
}

impl fmt::Display for Pattern<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str("->")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Placeholder name bound to the text it captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Captured values in placeholder order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a>(Vec<Param<'a>>);

impl<'a> Params<'a> {
    /// Value of the first placeholder called `name`
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.0.iter().find(|param| param.name == name).map(|param| param.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param<'a>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Owned name → value map, as handed to request handlers
    pub fn to_map(&self) -> HashMap<String, String> {
        self.0
            .iter()
            .map(|param| (param.name.to_string(), param.value.to_string()))
            .collect()
    }
}

impl<'a> IntoIterator for Params<'a> {
    type Item = Param<'a>;
    type IntoIter = std::vec::IntoIter<Param<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'p, 'a> IntoIterator for &'p Params<'a> {
    type Item = &'p Param<'a>;
    type IntoIter = std::slice::Iter<'p, Param<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
