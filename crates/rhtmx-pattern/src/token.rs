/// Token model for compiled patterns
///
/// A compiled pattern is a flat sequence of [`Token`]s framed by `START` and
/// `END`. The trie stores one token per node, and a successful match yields
/// the same kind of sequence with every placeholder replaced by a
/// [`Token::ParameterResolved`] that remembers what it captured.
///
/// Token text is a `Cow<str>`:
/// - patterns compiled from `&str` borrow the pattern text
/// - tokens stored in the trie are owned (`Token<'static>`)
/// - tokens of a resolved match borrow from the trie and from the input

use std::borrow::Cow;
use std::fmt::{self, Write};

use crate::pattern::Delimiters;

/// One unit of a compiled pattern
///
/// Two tokens are equal when kind, byte length and raw text are equal. The
/// raw text of a parameter includes its name, so `{id}` and `{slug}` are
/// different tokens and never share a trie node. The raw text of `END` is the
/// pattern name.
///
/// # Examples
///
/// ```
/// use rhtmx_pattern::Token;
///
/// assert_eq!(Token::constant("/users/"), Token::constant("/users/"));
/// assert_ne!(Token::constant("/"), Token::separator("/"));
/// assert_ne!(Token::parameter("id"), Token::parameter("slug"));
/// assert_eq!(Token::parameter("id").param_name(), Some("id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Beginning of the input
    Start,
    /// End of the input, optionally carrying the pattern name
    End(Option<Cow<'a, str>>),
    /// Literal text
    Const(Cow<'a, str>),
    /// Literal text that separates segments (`/` for paths)
    ///
    /// Matches exactly like [`Token::Const`] but carries no weight when
    /// siblings are ordered by specificity.
    Separator(Cow<'a, str>),
    /// Unresolved placeholder, raw form including delimiters: `{name}`
    Parameter(Cow<'a, str>),
    /// Placeholder bound to a span of the matched input
    ParameterResolved(Capture<'a>),
}

/// Span captured by a placeholder during a trie match
///
/// `param` points back at the [`Token::Parameter`] the value was captured
/// for. It is a plain borrow: a capture never owns the placeholder and never
/// outlives the store it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture<'a> {
    value: &'a str,
    param: &'a Token<'a>,
}

impl<'a> Capture<'a> {
    /// Binds `value` to the placeholder token `param`
    pub(crate) fn new(value: &'a str, param: &'a Token<'a>) -> Self {
        debug_assert!(
            matches!(param, Token::Parameter(_)),
            "capture must refer to a parameter token"
        );
        Self { value, param }
    }

    /// Captured text
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// Captured length in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Whether the placeholder captured nothing
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The placeholder this value was captured for
    pub fn param(&self) -> &'a Token<'a> {
        self.param
    }
}

impl Token<'static> {
    /// Placeholder named `name`, written with the default `{` `}` delimiters
    pub fn parameter(name: &str) -> Self {
        Token::parameter_with(name, Delimiters::default())
    }

    /// Placeholder named `name`, written with the given delimiters
    pub fn parameter_with(name: &str, delimiters: Delimiters) -> Self {
        let mut raw = String::with_capacity(name.len() + 2);
        raw.push(delimiters.open);
        raw.push_str(name);
        raw.push(delimiters.close);
        Token::Parameter(Cow::Owned(raw))
    }
}

impl<'a> Token<'a> {
    /// `END` marker; an empty name means "unnamed"
    pub fn end(name: impl Into<Cow<'a, str>>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Token::End(None)
        } else {
            Token::End(Some(name))
        }
    }

    /// Literal token
    pub fn constant(text: impl Into<Cow<'a, str>>) -> Self {
        Token::Const(text.into())
    }

    /// Separator token
    pub fn separator(text: impl Into<Cow<'a, str>>) -> Self {
        Token::Separator(text.into())
    }

    /// Length in bytes this token occupies in a matched input
    ///
    /// Literals report their text, resolved parameters their capture.
    /// Markers and unresolved parameters report zero.
    pub fn len(&self) -> usize {
        match self {
            Token::Const(text) | Token::Separator(text) => text.len(),
            Token::ParameterResolved(capture) => capture.len(),
            Token::Start | Token::End(_) | Token::Parameter(_) => 0,
        }
    }

    /// Whether [`len`](Self::len) is zero
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw text: literal, placeholder source, captured value or pattern name
    pub fn raw(&self) -> &str {
        match self {
            Token::Start => "",
            Token::End(name) => name.as_deref().unwrap_or(""),
            Token::Const(text) | Token::Separator(text) | Token::Parameter(text) => text.as_ref(),
            Token::ParameterResolved(capture) => capture.value,
        }
    }

    /// Literal text of `Const` and `Separator` tokens
    pub fn literal(&self) -> Option<&str> {
        match self {
            Token::Const(text) | Token::Separator(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    /// True for `Const` and `Separator`
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Const(_) | Token::Separator(_))
    }

    /// True for resolved and unresolved placeholders
    pub fn is_parameter(&self) -> bool {
        matches!(self, Token::Parameter(_) | Token::ParameterResolved(_))
    }

    /// Placeholder name without delimiters
    ///
    /// Resolved parameters answer with the name of the placeholder they were
    /// captured for. Every other kind returns `None`.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Token::Parameter(raw) => Some(strip_delimiters(raw)),
            Token::ParameterResolved(capture) => capture.param.param_name(),
            _ => None,
        }
    }

    /// Pattern name carried by a named `END`
    pub fn pattern_name(&self) -> Option<&str> {
        match self {
            Token::End(name) => name.as_deref(),
            _ => None,
        }
    }

    /// Same token, borrowing its text from `self`
    pub fn reborrow(&self) -> Token<'_> {
        match self {
            Token::Start => Token::Start,
            Token::End(name) => Token::End(name.as_deref().map(Cow::Borrowed)),
            Token::Const(text) => Token::Const(Cow::Borrowed(text)),
            Token::Separator(text) => Token::Separator(Cow::Borrowed(text)),
            Token::Parameter(raw) => Token::Parameter(Cow::Borrowed(raw)),
            Token::ParameterResolved(capture) => Token::ParameterResolved(*capture),
        }
    }

    /// Owned copy of the token as it appears in a compiled pattern
    ///
    /// A resolved parameter turns back into the placeholder it was captured
    /// for, so a matched sequence converts into the pattern that produced it.
    pub fn to_schema_owned(&self) -> Token<'static> {
        match self {
            Token::Start => Token::Start,
            Token::End(name) => Token::End(name.as_deref().map(|n| Cow::Owned(n.to_owned()))),
            Token::Const(text) => Token::Const(Cow::Owned(text.clone().into_owned())),
            Token::Separator(text) => Token::Separator(Cow::Owned(text.clone().into_owned())),
            Token::Parameter(raw) => Token::Parameter(Cow::Owned(raw.clone().into_owned())),
            Token::ParameterResolved(capture) => capture.param.to_schema_owned(),
        }
    }

    /// Canonical rendering without captured values or byte lengths
    ///
    /// Resolved and unresolved forms of the same placeholder render the same,
    /// so a matched sequence and its registered pattern share one key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_pattern::Token;
    ///
    /// assert_eq!(Token::constant("/a").schema().to_string(), r#"Const("/a")"#);
    /// assert_eq!(Token::parameter("id").schema().to_string(), r#"Param("id")"#);
    /// assert_eq!(Token::end("users").schema().to_string(), r#"END("users")"#);
    /// ```
    pub fn schema(&self) -> Schema<'_, 'a> {
        Schema(self)
    }
}

/// Joins the canonical rendering of every token with `->`
///
/// Suitable as a hash key for a registered pattern (e.g. to find the handler
/// of a matched route).
pub fn schema_key(tokens: &[Token<'_>]) -> String {
    let mut key = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            key.push_str("->");
        }
        // Writing into a String cannot fail
        let _ = write!(key, "{}", token.schema());
    }
    key
}

/// Display adapter returned by [`Token::schema`]
pub struct Schema<'t, 'a>(&'t Token<'a>);

impl fmt::Display for Schema<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Token::Start => f.write_str("START"),
            Token::End(None) => f.write_str("END"),
            Token::End(Some(name)) => write!(f, "END({:?})", name),
            Token::Const(text) => write!(f, "Const({:?})", text),
            Token::Separator(text) => write!(f, "Separator({:?})", text),
            Token::Parameter(_) | Token::ParameterResolved(_) => {
                write!(f, "Param({:?})", self.0.param_name().unwrap_or(""))
            }
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Start => f.write_str("START"),
            Token::End(None) => f.write_str("END"),
            Token::End(Some(name)) => write!(f, "END({:?})", name),
            Token::Const(text) => write!(f, "Const({:?}, len={})", text, text.len()),
            Token::Separator(text) => write!(f, "Separator({:?}, len={})", text, text.len()),
            Token::Parameter(raw) => write!(f, "Parameter({:?})", raw),
            Token::ParameterResolved(capture) => write!(
                f,
                "Resolved({:?}={:?}, len={})",
                self.param_name().unwrap_or(""),
                capture.value,
                capture.len()
            ),
        }
    }
}

/// Drops the first and last character (the delimiters) of a raw placeholder
fn strip_delimiters(raw: &str) -> &str {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
