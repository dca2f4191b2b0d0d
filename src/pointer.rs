use crate::{
    diagnostic::{diagnostic_url, token_end, Diagnostic, Label},
    index::{Index, ParseIndexError},
    token::EncodingError,
    Token, Tokens,
};
use alloc::{
    borrow::ToOwned,
    string::{String, ToString},
};
use core::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

#[cfg(test)]
mod pointer_test;

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                   Pointer                                    ║
║                                  ¯¯¯¯¯¯¯¯¯                                   ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// A JSON Pointer is a string containing a sequence of zero or more reference
/// [`Token`]s, each prefixed by a `'/'` character.
///
/// `Pointer` is the borrowed, unsized form (like `str`); [`PointerBuf`] is its
/// owned counterpart. Either way the pointer is stored in its encoded form,
/// already validated, and tokens are decoded on demand.
///
/// See [RFC 6901 for more
/// information](https://datatracker.ietf.org/doc/html/rfc6901).
///
/// ## Example
/// ```rust
/// use jsonptr_stream::{Pointer, Resolve};
/// use serde_json::json;
///
/// let data = json!({ "foo": { "bar": "baz" } });
/// let ptr = Pointer::from_static("/foo/bar");
/// let bar = data.resolve(ptr).unwrap();
/// assert_eq!(bar, "baz");
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Pointer(str);

impl Pointer {
    /// Private constructor for strings that are known to be correctly encoded.
    ///
    /// This is a zero-copy constructor.
    unsafe fn new_unchecked<S: AsRef<str> + ?Sized>(s: &S) -> &Self {
        // SAFETY: `Pointer` is `repr(transparent)` over `str`
        &*(s.as_ref() as *const str as *const Self)
    }

    /// Constant reference to a root pointer.
    pub const fn root() -> &'static Self {
        // SAFETY: `Pointer` is `repr(transparent)` over `str`, and `""` is the
        // root pointer.
        unsafe { &*("" as *const str as *const Self) }
    }

    /// Attempts to parse a string into a `Pointer`.
    ///
    /// The string is validated but not copied: the returned `Pointer` borrows
    /// from `s`.
    ///
    /// ## Errors
    /// Returns a [`ParseError`] if the string is not a valid JSON Pointer.
    pub fn parse<S: AsRef<str> + ?Sized>(s: &S) -> Result<&Self, ParseError> {
        validate(s.as_ref()).map(|s| {
            // SAFETY: validated above
            unsafe { Self::new_unchecked(s) }
        })
    }

    /// Creates a static `Pointer` from a string.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid JSON Pointer, which makes it suited
    /// for literals only.
    ///
    /// ```
    /// use jsonptr_stream::Pointer;
    /// let ptr = Pointer::from_static("/path/to/value");
    /// assert_eq!(ptr.count(), 3);
    /// ```
    pub fn from_static(s: &'static str) -> &'static Self {
        match validate(s) {
            // SAFETY: validated
            Ok(s) => unsafe { Self::new_unchecked(s) },
            Err(err) => panic!("invalid json pointer {s:?}: {err}"),
        }
    }

    /// The encoded string representation of this `Pointer`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts into an owned [`PointerBuf`].
    pub fn to_buf(&self) -> PointerBuf {
        PointerBuf(self.0.to_string())
    }

    /// Returns an iterator of `Token`s in the `Pointer`.
    pub fn tokens(&self) -> Tokens<'_> {
        let mut s = self.0.split('/');
        // skipping the first '/'
        s.next();
        Tokens::new(s)
    }

    /// Returns the number of tokens in the `Pointer`.
    pub fn count(&self) -> usize {
        self.tokens().count()
    }

    /// Returns `true` if the JSON Pointer equals `""`.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the length of the encoded string representation, in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the `Pointer` is empty (i.e. root).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the last `Token` in the `Pointer`.
    pub fn last(&self) -> Option<Token<'_>> {
        self.0
            .rsplit_once('/')
            .map(|(_, last)| Token::from_encoded_unchecked(last))
    }

    /// Returns the first `Token` in the `Pointer`.
    pub fn first(&self) -> Option<Token<'_>> {
        self.split_front().map(|(first, _)| first)
    }

    /// Splits the `Pointer` into the first `Token` and a remainder `Pointer`.
    ///
    /// ```
    /// # use jsonptr_stream::{Pointer, Token};
    /// let ptr = Pointer::from_static("/foo/bar/baz");
    /// let (first, rest) = ptr.split_front().unwrap();
    /// assert_eq!(first.decoded(), "foo");
    /// assert_eq!(rest, "/bar/baz");
    /// assert_eq!(Pointer::root().split_front(), None);
    /// ```
    pub fn split_front(&self) -> Option<(Token<'_>, &Self)> {
        let rest = self.0.strip_prefix('/')?;
        Some(match rest.find('/') {
            Some(idx) => (
                Token::from_encoded_unchecked(&rest[..idx]),
                // SAFETY: the remainder starts at a token boundary
                unsafe { Self::new_unchecked(&rest[idx..]) },
            ),
            None => (Token::from_encoded_unchecked(rest), Self::root()),
        })
    }

    /// Splits the `Pointer` into the parent `Pointer` and the last `Token`.
    ///
    /// ```
    /// # use jsonptr_stream::{Pointer, Token};
    /// let ptr = Pointer::from_static("/foo/bar/baz");
    /// let (parent, last) = ptr.split_back().unwrap();
    /// assert_eq!(parent, "/foo/bar");
    /// assert_eq!(last.decoded(), "baz");
    /// ```
    pub fn split_back(&self) -> Option<(&Self, Token<'_>)> {
        self.0.rsplit_once('/').map(|(front, back)| {
            // SAFETY: `front` ends at a token boundary
            (
                unsafe { Self::new_unchecked(front) },
                Token::from_encoded_unchecked(back),
            )
        })
    }

    /// Returns the parent `Pointer`, or `None` for root.
    pub fn parent(&self) -> Option<&Self> {
        self.split_back().map(|(parent, _)| parent)
    }

    /// Interprets the last `Token` as an array index. `"-"` yields
    /// [`Index::Next`].
    ///
    /// Returns `None` if the pointer is root.
    ///
    /// ```
    /// # use jsonptr_stream::{Index, Pointer};
    /// assert_eq!(Pointer::from_static("/a/3").leaf_index(), Some(Ok(Index::Num(3))));
    /// assert_eq!(Pointer::from_static("/a/-").leaf_index(), Some(Ok(Index::Next)));
    /// assert!(Pointer::from_static("/a/b").leaf_index().unwrap().is_err());
    /// assert_eq!(Pointer::root().leaf_index(), None);
    /// ```
    pub fn leaf_index(&self) -> Option<Result<Index, ParseIndexError>> {
        self.last().map(|token| token.to_index())
    }

    /// Creates an owned [`PointerBuf`] like `self` but with `other` appended.
    pub fn concat(&self, other: &Pointer) -> PointerBuf {
        let mut buf = String::with_capacity(self.len() + other.len());
        buf.push_str(&self.0);
        buf.push_str(&other.0);
        PointerBuf(buf)
    }

    /// Attempts to resolve a [`R::Value`](crate::Resolve::Value) based on the
    /// path in this [`Pointer`].
    ///
    /// ## Errors
    /// Returns [`R::Error`](crate::Resolve::Error) if an error occurs while
    /// resolving.
    #[cfg(feature = "resolve")]
    pub fn resolve<'v, R: crate::Resolve>(&self, value: &'v R) -> Result<&'v R::Value, R::Error> {
        value.resolve(self)
    }

    /// Attempts to resolve a mutable [`R::Value`](crate::ResolveMut::Value)
    /// based on the path in this `Pointer`.
    ///
    /// ## Errors
    /// Returns [`R::Error`](crate::ResolveMut::Error) if an error occurs while
    /// resolving.
    #[cfg(feature = "resolve")]
    pub fn resolve_mut<'v, R: crate::ResolveMut>(
        &self,
        value: &'v mut R,
    ) -> Result<&'v mut R::Value, R::Error> {
        value.resolve_mut(self)
    }

    /// Resolves this `Pointer` against encoded JSON text, decoding only the
    /// target value.
    ///
    /// ```
    /// # use jsonptr_stream::Pointer;
    /// let ptr = Pointer::from_static("/a/1");
    /// assert_eq!(ptr.resolve_encoded(r#"{"a":[1,2]}"#).unwrap(), 2);
    /// ```
    ///
    /// ## Errors
    /// Returns [`ResolveError`](crate::ResolveError) if the path cannot be
    /// resolved or the text fails to decode.
    #[cfg(all(feature = "json", feature = "resolve"))]
    pub fn resolve_encoded<D: crate::ResolveEncoded + ?Sized>(
        &self,
        doc: &D,
    ) -> Result<serde_json::Value, crate::ResolveError> {
        doc.resolve_encoded(self)
    }

    /// Assigns `src` to `dest` at the location of this `Pointer`.
    ///
    /// See [`Assign`](crate::Assign) for the semantics.
    ///
    /// ## Errors
    /// Returns [`D::Error`](crate::Assign::Error) if the assignment fails.
    #[cfg(feature = "assign")]
    pub fn assign<'v, D, V>(
        &self,
        dest: &'v mut D,
        src: V,
    ) -> Result<crate::Assignment<'v, D::Value>, D::Error>
    where
        D: crate::Assign,
        V: Into<D::Value>,
    {
        dest.assign(self, src)
    }
}

impl<'p> IntoIterator for &'p Pointer {
    type Item = Token<'p>;
    type IntoIter = Tokens<'p>;
    fn into_iter(self) -> Self::IntoIter {
        self.tokens()
    }
}

impl AsRef<str> for Pointer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Pointer> for Pointer {
    fn as_ref(&self) -> &Pointer {
        self
    }
}

impl Borrow<str> for Pointer {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl ToOwned for Pointer {
    type Owned = PointerBuf;

    fn to_owned(&self) -> Self::Owned {
        self.to_buf()
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'a> TryFrom<&'a str> for &'a Pointer {
    type Error = ParseError;
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Pointer::parse(value)
    }
}

impl PartialEq<&str> for Pointer {
    fn eq(&self, other: &&str) -> bool {
        &&self.0 == other
    }
}

impl PartialEq<str> for Pointer {
    fn eq(&self, other: &str) -> bool {
        &self.0 == other
    }
}

impl PartialEq<PointerBuf> for Pointer {
    fn eq(&self, other: &PointerBuf) -> bool {
        self.0 == other.0
    }
}

impl PartialEq<PointerBuf> for &Pointer {
    fn eq(&self, other: &PointerBuf) -> bool {
        self.0 == other.0
    }
}

impl PartialEq<Pointer> for str {
    fn eq(&self, other: &Pointer) -> bool {
        self == &other.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Pointer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de: 'p, 'p> serde::Deserialize<'de> for &'p Pointer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Error, Visitor};

        struct PointerVisitor;

        impl<'a> Visitor<'a> for PointerVisitor {
            type Value = &'a Pointer;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a borrowed json pointer")
            }

            fn visit_borrowed_str<E>(self, v: &'a str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Pointer::parse(v).map_err(|err| Error::custom(err.into_report(v)))
            }
        }

        deserializer.deserialize_str(PointerVisitor)
    }
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                  PointerBuf                                  ║
║                                 ¯¯¯¯¯¯¯¯¯¯¯¯                                 ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// An owned, mutable [`Pointer`] (akin to `String`).
///
/// This type provides methods like [`PointerBuf::push_back`] and
/// [`PointerBuf::ascend`] that navigate the pointer in place. Clones are
/// fully independent of each other.
///
/// ```
/// # use jsonptr_stream::PointerBuf;
/// let mut ptr = PointerBuf::new();
/// ptr.push_back("foo");
/// ptr.push_index(3);
/// ptr.push_back("a/b");
/// assert_eq!(ptr, "/foo/3/a~1b");
///
/// ptr.ascend().unwrap();
/// ptr.push_back("c~d");
/// assert_eq!(ptr, "/foo/3/c~0d");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerBuf(String);

impl PointerBuf {
    /// Creates a new `PointerBuf` pointing to a document root.
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Creates a new root `PointerBuf` with at least `capacity` bytes
    /// pre-allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(String::with_capacity(capacity))
    }

    /// Attempts to parse a string into a `PointerBuf`.
    ///
    /// ## Errors
    /// Returns a [`ParseError`] if the string is not a valid JSON Pointer.
    pub fn parse(s: impl Into<String>) -> Result<Self, ParseError> {
        let s = s.into();
        validate(&s)?;
        Ok(Self(s))
    }

    /// Creates a new `PointerBuf` from a slice of non-encoded strings.
    pub fn from_tokens<'t>(tokens: impl IntoIterator<Item: Into<Token<'t>>>) -> Self {
        let mut inner = String::new();
        for t in tokens.into_iter().map(Into::into) {
            inner.push('/');
            inner.push_str(t.encoded());
        }
        PointerBuf(inner)
    }

    /// Coerces to a Pointer slice.
    pub fn as_ptr(&self) -> &Pointer {
        self
    }

    /// Descends into a property: pushes a `Token` onto the back of this
    /// `Pointer`. Plain strings are escaped.
    pub fn push_back<'t>(&mut self, token: impl Into<Token<'t>>) {
        self.0.push('/');
        self.0.push_str(token.into().encoded());
    }

    /// Descends into an array index. Negative signed integers and
    /// [`Index::Next`] are written as `"-"`.
    pub fn push_index(&mut self, index: impl Into<Index>) {
        let index: Index = index.into();
        self.push_back(index);
    }

    /// Removes and returns the last `Token` in the `Pointer` if it exists.
    pub fn pop_back(&mut self) -> Option<Token<'static>> {
        let idx = self.0.rfind('/')?;
        let back = Token::from_encoded_unchecked(self.0.split_off(idx + 1));
        // drops the separator
        self.0.truncate(idx);
        Some(back)
    }

    /// Removes the last `Token`.
    ///
    /// ## Errors
    /// Returns [`RootError`] if the pointer is already root. The pointer is
    /// left unchanged.
    pub fn ascend(&mut self) -> Result<(), RootError> {
        self.pop_back().map(drop).ok_or(RootError)
    }

    /// Clears the `Pointer`, setting it to root (`""`).
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Deref for PointerBuf {
    type Target = Pointer;
    fn deref(&self) -> &Self::Target {
        // SAFETY: a `PointerBuf` is only ever built from validated or encoded
        // text
        unsafe { Pointer::new_unchecked(&self.0) }
    }
}

impl Borrow<Pointer> for PointerBuf {
    fn borrow(&self) -> &Pointer {
        self
    }
}

impl AsRef<Pointer> for PointerBuf {
    fn as_ref(&self) -> &Pointer {
        self
    }
}

impl AsRef<str> for PointerBuf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&Pointer> for PointerBuf {
    fn from(value: &Pointer) -> Self {
        value.to_buf()
    }
}

impl<'t> From<Token<'t>> for PointerBuf {
    fn from(t: Token<'t>) -> Self {
        PointerBuf::from_tokens([t])
    }
}

impl From<usize> for PointerBuf {
    fn from(value: usize) -> Self {
        PointerBuf::from_tokens([value])
    }
}

impl<'t> FromIterator<Token<'t>> for PointerBuf {
    fn from_iter<T: IntoIterator<Item = Token<'t>>>(iter: T) -> Self {
        Self::from_tokens(iter)
    }
}

impl TryFrom<String> for PointerBuf {
    type Error = ParseError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for PointerBuf {
    type Error = ParseError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Pointer::parse(value).map(Pointer::to_buf)
    }
}

impl FromStr for PointerBuf {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for PointerBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq<&str> for PointerBuf {
    fn eq(&self, other: &&str) -> bool {
        &self.0 == other
    }
}

impl PartialEq<str> for PointerBuf {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<Pointer> for PointerBuf {
    fn eq(&self, other: &Pointer) -> bool {
        self.0 == other.0
    }
}

impl PartialEq<&Pointer> for PointerBuf {
    fn eq(&self, other: &&Pointer) -> bool {
        self.0 == other.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PointerBuf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PointerBuf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let s = String::deserialize(deserializer)?;
        match validate(&s) {
            Ok(_) => Ok(PointerBuf(s)),
            Err(err) => Err(D::Error::custom(err.into_report(s))),
        }
    }
}

fn validate(value: &str) -> Result<&str, ParseError> {
    if value.is_empty() {
        return Ok(value);
    }
    let Some(rest) = value.strip_prefix('/') else {
        return Err(ParseError::NoLeadingSlash);
    };
    let mut offset = 0;
    for token in rest.split('/') {
        crate::token::validate(token)
            .map_err(|source| ParseError::InvalidEncoding { offset, source })?;
        offset += 1 + token.len();
    }
    Ok(value)
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                  ParseError                                  ║
║                                 ¯¯¯¯¯¯¯¯¯¯¯¯                                 ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// Indicates that a `Pointer` was malformed and unable to be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// `Pointer` did not start with a slash (`'/'`).
    NoLeadingSlash,

    /// `Pointer` contained invalid encoding (e.g. `~` not followed by `0` or
    /// `1`).
    InvalidEncoding {
        /// Offset of the partial pointer starting with the token that contained
        /// the invalid encoding
        offset: usize,
        /// The source `EncodingError`
        source: EncodingError,
    },
}

impl ParseError {
    /// Returns `true` if this error is `NoLeadingSlash`.
    pub fn is_no_leading_slash(&self) -> bool {
        matches!(self, Self::NoLeadingSlash)
    }

    /// Returns `true` if this error is `InvalidEncoding`.
    pub fn is_invalid_encoding(&self) -> bool {
        matches!(self, Self::InvalidEncoding { .. })
    }

    /// Offset of the partial pointer starting with the token which caused the
    /// error.
    /// ```text
    /// "/foo/invalid~tilde/invalid"
    ///      ↑
    ///      4
    /// ```
    /// ```
    /// # use jsonptr_stream::PointerBuf;
    /// let err = PointerBuf::parse("/foo/invalid~tilde/invalid").unwrap_err();
    /// assert_eq!(err.pointer_offset(), 4)
    /// ```
    pub fn pointer_offset(&self) -> usize {
        match *self {
            Self::NoLeadingSlash => 0,
            Self::InvalidEncoding { offset, .. } => offset,
        }
    }

    /// Offset of the character index from within the first token of
    /// [`Self::pointer_offset`].
    /// ```text
    /// "invalid~tilde"
    ///         ↑
    ///         7
    /// ```
    /// ```
    /// # use jsonptr_stream::PointerBuf;
    /// let err = PointerBuf::parse("/foo/invalid~tilde/invalid").unwrap_err();
    /// assert_eq!(err.source_offset(), 7)
    /// ```
    pub fn source_offset(&self) -> usize {
        match self {
            Self::NoLeadingSlash => 0,
            Self::InvalidEncoding { source, .. } => source.offset(),
        }
    }

    /// Offset of the first invalid encoding from within the pointer.
    /// ```text
    /// "/foo/invalid~tilde/invalid"
    ///              ↑
    ///             12
    /// ```
    /// ```
    /// # use jsonptr_stream::PointerBuf;
    /// let err = PointerBuf::parse("/foo/invalid~tilde/invalid").unwrap_err();
    /// assert_eq!(err.complete_offset(), 12)
    /// ```
    pub fn complete_offset(&self) -> usize {
        match self {
            Self::NoLeadingSlash => 0,
            // the token's leading '/' is not part of the token itself
            Self::InvalidEncoding { offset, source } => offset + 1 + source.offset(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLeadingSlash => write!(
                f,
                "json pointer is malformed as it does not start with a slash ('/')"
            ),
            Self::InvalidEncoding { source, .. } => write!(f, "{source}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEncoding { source, .. } => Some(source),
            Self::NoLeadingSlash => None,
        }
    }
}

impl Diagnostic for ParseError {
    fn url() -> &'static str {
        diagnostic_url!(enum ParseError)
    }

    fn prefix_len(&self, subject: &str) -> usize {
        match *self {
            Self::NoLeadingSlash => subject.len(),
            Self::InvalidEncoding { offset, .. } => token_end(subject, offset),
        }
    }

    fn label(&self, subject: &str) -> Option<Label> {
        let (text, offset, len) = match self {
            Self::NoLeadingSlash => ("must start with a slash ('/')", 0, 0),
            Self::InvalidEncoding { source, .. } if source.is_unescaped_slash() => {
                ("'/' is a delimiter, not part of a token", self.complete_offset(), 1)
            }
            Self::InvalidEncoding { .. } => {
                let offset = self.complete_offset();
                // the escape is either "~" at the end or "~" + one more char
                let len = subject
                    .get(offset..)
                    .map_or(0, |rest| rest.chars().take(2).map(char::len_utf8).sum());
                ("'~' must be followed by '0' or '1'", offset, len)
            }
        };
        Some(Label::new(text.to_string(), offset, len))
    }
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                  RootError                                   ║
║                                 ¯¯¯¯¯¯¯¯¯¯¯                                  ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// Returned from [`PointerBuf::ascend`] when the pointer is already root.
///
/// This signals a bug in the caller's navigation sequence rather than bad
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootError;

impl fmt::Display for RootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot ascend above the root of a json pointer")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RootError {}
