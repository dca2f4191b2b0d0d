//! Reference tokens and the RFC 6901 escaping rules.
//!
//! ```
//! use jsonptr_stream::token::{escape, unescape};
//! assert_eq!(escape("a/b~c"), "a~1b~0c");
//! assert_eq!(unescape("a~1b~0c").unwrap(), "a/b~c");
//! assert!(unescape("~2").is_err());
//! ```

use core::str::Split;

use crate::index::{Index, ParseIndexError};
use alloc::{
    borrow::Cow,
    fmt,
    string::{String, ToString},
};

const ENCODED_TILDE: &str = "~0";
const ENCODED_SLASH: &str = "~1";

const ENC_PREFIX: u8 = b'~';
const TILDE_ENC: u8 = b'0';
const SLASH_ENC: u8 = b'1';

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                    Codec                                     ║
║                                   ¯¯¯¯¯¯¯                                    ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// Escapes a raw segment per RFC 6901: `'~'` becomes `"~0"` and `'/'` becomes
/// `"~1"`.
///
/// Borrows the input when there is nothing to escape.
///
/// # Examples
///
/// ```
/// # use jsonptr_stream::escape;
/// assert_eq!(escape("a~b c/d"), "a~0b c~1d");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(segment: &str) -> Cow<'_, str> {
    let specials = segment
        .bytes()
        .filter(|&b| b == b'~' || b == b'/')
        .count();
    if specials == 0 {
        return Cow::Borrowed(segment);
    }
    let mut buf = String::with_capacity(segment.len() + specials);
    escape_into(&mut buf, segment);
    Cow::Owned(buf)
}

/// Appends the escaped form of `segment` to `buf`.
///
/// Whatever `buf` already holds is left untouched; the buffer grows as needed.
///
/// ```
/// # use jsonptr_stream::escape_into;
/// let mut buf = String::from("/foo/");
/// escape_into(&mut buf, "a/b");
/// assert_eq!(buf, "/foo/a~1b");
/// ```
pub fn escape_into(buf: &mut String, segment: &str) {
    let mut last = 0;
    for (i, b) in segment.bytes().enumerate() {
        let encoded = match b {
            b'~' => ENCODED_TILDE,
            b'/' => ENCODED_SLASH,
            _ => continue,
        };
        // '~' and '/' are ascii, so `i` is a char boundary
        buf.push_str(&segment[last..i]);
        buf.push_str(encoded);
        last = i + 1;
    }
    buf.push_str(&segment[last..]);
}

/// Unescapes a single encoded segment: `"~1"` becomes `'/'` and `"~0"` becomes
/// `'~'`.
///
/// The input is never modified; a new string is allocated only when it
/// contains escapes.
///
/// # Examples
///
/// ```
/// # use jsonptr_stream::unescape;
/// assert_eq!(unescape("a~0b c~1d").unwrap(), "a~b c/d");
/// assert!(unescape("a~x").unwrap_err().is_invalid_escape());
/// assert!(unescape("a/b").unwrap_err().is_unescaped_slash());
/// ```
///
/// # Errors
/// - [`EncodingError::InvalidEscape`] if a `'~'` is not followed by `'0'` or
///   `'1'`.
/// - [`EncodingError::UnescapedSlash`] if the input contains a `'/'`, meaning a
///   whole pointer was given where a single token was expected.
pub fn unescape(encoded: &str) -> Result<Cow<'_, str>, EncodingError> {
    validate(encoded)?;
    Ok(decode_validated(encoded))
}

pub(crate) fn validate(encoded: &str) -> Result<(), EncodingError> {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' => return Err(EncodingError::UnescapedSlash { offset: i }),
            ENC_PREFIX => match bytes.get(i + 1).copied() {
                Some(TILDE_ENC | SLASH_ENC) => i += 2,
                _ => return Err(EncodingError::InvalidEscape { offset: i }),
            },
            _ => i += 1,
        }
    }
    Ok(())
}

/// Decodes text which has already passed [`validate`].
fn decode_validated(encoded: &str) -> Cow<'_, str> {
    let Some(first) = encoded.bytes().position(|b| b == ENC_PREFIX) else {
        return Cow::Borrowed(encoded);
    };
    let bytes = encoded.as_bytes();
    let mut decoded = String::with_capacity(encoded.len());
    let mut last = 0;
    let mut i = first;
    while i < bytes.len() {
        if bytes[i] != ENC_PREFIX {
            i += 1;
            continue;
        }
        decoded.push_str(&encoded[last..i]);
        if bytes.get(i + 1) == Some(&SLASH_ENC) {
            decoded.push('/');
        } else {
            decoded.push('~');
        }
        i = (i + 2).min(bytes.len());
        last = i;
    }
    decoded.push_str(&encoded[last..]);
    Cow::Owned(decoded)
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                    Token                                     ║
║                                   ¯¯¯¯¯¯¯                                    ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// A `Token` is a segment of a JSON [`Pointer`](crate::Pointer), preceded by
/// `'/'` (`%x2F`).
///
/// `Token`s can represent a key in a JSON object or an index in an array.
///
/// - Indexes should not contain leading zeros.
/// - When dealing with arrays or path expansion for assignment, `"-"` represent
///   the next, non-existent index in a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token<'a> {
    inner: Cow<'a, str>,
}

impl<'a> Token<'a> {
    /// Constructs a `Token` from an RFC 6901 encoded string.
    ///
    /// This is like [`Self::from_encoded`], except that no validation is
    /// performed on the input string.
    pub(crate) fn from_encoded_unchecked(inner: impl Into<Cow<'a, str>>) -> Self {
        Self {
            inner: inner.into(),
        }
    }

    /// Constructs a `Token` from an RFC 6901 encoded string.
    ///
    /// To be valid, the string must not contain any `/` characters, and any `~`
    /// characters must be followed by either `0` or `1`.
    ///
    /// This function does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// # use jsonptr_stream::Token;
    /// assert_eq!(Token::from_encoded("~1foo~1~0bar").unwrap().decoded(), "/foo/~bar");
    /// let err = Token::from_encoded("foo/oops~bar").unwrap_err();
    /// assert_eq!(err.offset(), 3);
    /// ```
    ///
    /// ## Errors
    /// Returns [`EncodingError`] if the input string is not a valid RFC 6901
    /// token.
    pub fn from_encoded(s: &'a str) -> Result<Self, EncodingError> {
        validate(s)?;
        Ok(Self { inner: s.into() })
    }

    /// Constructs a `Token` from an arbitrary, unescaped string.
    ///
    /// If the string is already encoded per RFC 6901, use
    /// [`Self::from_encoded`] instead, otherwise it will end up double-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// # use jsonptr_stream::Token;
    /// assert_eq!(Token::new("/foo/~bar").encoded(), "~1foo~1~0bar");
    /// ```
    pub fn new(s: impl Into<Cow<'a, str>>) -> Self {
        let s = s.into();
        let escaped = match escape(&s) {
            Cow::Borrowed(_) => None,
            Cow::Owned(escaped) => Some(escaped),
        };
        Self {
            inner: escaped.map_or(s, Cow::Owned),
        }
    }

    /// Converts into an owned copy of this token.
    pub fn into_owned(self) -> Token<'static> {
        Token {
            inner: Cow::Owned(self.inner.into_owned()),
        }
    }

    /// Returns the encoded string representation of the `Token`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use jsonptr_stream::Token;
    /// assert_eq!(Token::new("~bar").encoded(), "~0bar");
    /// ```
    pub fn encoded(&self) -> &str {
        &self.inner
    }

    /// Returns the decoded string representation of the `Token`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use jsonptr_stream::Token;
    /// assert_eq!(Token::new("~bar").decoded(), "~bar");
    /// ```
    pub fn decoded(&self) -> Cow<'_, str> {
        decode_validated(&self.inner)
    }

    /// Attempts to parse the given `Token` as an array index.
    ///
    /// Per [RFC 6901](https://datatracker.ietf.org/doc/html/rfc6901#section-4),
    /// the acceptable values are non-negative integers without leading zeros
    /// and the `-` character, which stands for the next, non-existent member
    /// after the last array element.
    ///
    /// ## Examples
    ///
    /// ```
    /// # use jsonptr_stream::{Index, Token};
    /// assert_eq!(Token::new("-").to_index(), Ok(Index::Next));
    /// assert_eq!(Token::new("0").to_index(), Ok(Index::Num(0)));
    /// assert_eq!(Token::new("2").to_index(), Ok(Index::Num(2)));
    /// assert!(Token::new("a").to_index().is_err());
    /// assert!(Token::new("-1").to_index().is_err());
    /// assert!(Token::new("01").to_index().is_err());
    /// ```
    /// ## Errors
    /// Returns [`ParseIndexError`] if the token is not a valid array index.
    pub fn to_index(&self) -> Result<Index, ParseIndexError> {
        self.try_into()
    }
}

macro_rules! impl_from_num {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Token<'static> {
                fn from(v: $ty) -> Self {
                    Token::from_encoded_unchecked(v.to_string())
                }
            }
        )*
    };
}
impl_from_num!(u8, u16, u32, u64, usize);

impl From<Index> for Token<'static> {
    fn from(index: Index) -> Self {
        Token::from_encoded_unchecked(index.to_string())
    }
}

impl<'a> From<&'a str> for Token<'a> {
    fn from(value: &'a str) -> Self {
        Token::new(value)
    }
}

impl<'a> From<&'a String> for Token<'a> {
    fn from(value: &'a String) -> Self {
        Token::new(value.as_str())
    }
}

impl From<String> for Token<'static> {
    fn from(value: String) -> Self {
        Token::new(value)
    }
}

impl<'a> From<&Token<'a>> for Token<'a> {
    fn from(value: &Token<'a>) -> Self {
        value.clone()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decoded())
    }
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                    Tokens                                    ║
║                                   ¯¯¯¯¯¯¯¯                                   ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// An iterator over the [`Token`]s of a [`Pointer`](crate::Pointer).
#[derive(Debug)]
pub struct Tokens<'a> {
    inner: Split<'a, char>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Token::from_encoded_unchecked)
    }
}

impl<'t> Tokens<'t> {
    pub(crate) fn new(inner: Split<'t, char>) -> Self {
        Self { inner }
    }
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                EncodingError                                 ║
║                               ¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯                                ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// A token within a json pointer contained invalid encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// A `'~'` was not followed by `'0'` or `'1'`.
    InvalidEscape {
        /// Offset of the erroneous `'~'` from within the token.
        offset: usize,
    },
    /// The token contained a `'/'`, which is only valid as a delimiter
    /// between tokens.
    UnescapedSlash {
        /// Offset of the `'/'` from within the token.
        offset: usize,
    },
}

impl EncodingError {
    /// The byte offset of the offending character within the token.
    pub fn offset(&self) -> usize {
        match *self {
            Self::InvalidEscape { offset } | Self::UnescapedSlash { offset } => offset,
        }
    }

    /// Returns `true` if this error is `InvalidEscape`.
    pub fn is_invalid_escape(&self) -> bool {
        matches!(self, Self::InvalidEscape { .. })
    }

    /// Returns `true` if this error is `UnescapedSlash`.
    pub fn is_unescaped_slash(&self) -> bool {
        matches!(self, Self::UnescapedSlash { .. })
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEscape { .. } => write!(
                f,
                "json pointer is malformed due to invalid encoding ('~' not followed by '0' or '1')"
            ),
            Self::UnescapedSlash { .. } => write!(
                f,
                "token contains an unescaped '/'; a single token was expected, not a pointer"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodingError {}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                    Tests                                     ║
║                                   ¯¯¯¯¯¯¯                                    ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

#[cfg(test)]
mod tests {
    use crate::Pointer;

    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use quickcheck_macros::quickcheck;

    #[test]
    fn escape_table() {
        let cases = [
            ("", ""),
            ("a", "a"),
            ("a~", "a~0"),
            ("~a", "~0a"),
            ("a~b", "a~0b"),
            ("a/", "a~1"),
            ("/a", "~1a"),
            ("a/b", "a~1b"),
            ("a/~b", "a~1~0b"),
            ("a~/b", "a~0~1b"),
            ("a~~~b", "a~0~0~0b"),
            ("a///b", "a~1~1~1b"),
            ("a/b/c/d", "a~1b~1c~1d"),
            ("é~é", "é~0é"),
            ("é~", "é~0"),
            ("~é", "~0é"),
        ];
        for (input, expected) in cases {
            assert_eq!(escape(input), expected, "escape({input:?})");
            assert_eq!(unescape(expected).unwrap(), input, "unescape({expected:?})");
        }
    }

    #[test]
    fn escape_borrows_when_clean() {
        assert!(matches!(escape("plain"), Cow::Borrowed("plain")));
        assert!(matches!(unescape("plain"), Ok(Cow::Borrowed("plain"))));
    }

    #[test]
    fn escape_into_preserves_prefix() {
        for capacity in 0..12 {
            let mut buf = String::with_capacity(capacity);
            buf.push_str("x/");
            escape_into(&mut buf, "a~/b");
            escape_into(&mut buf, "é");
            assert_eq!(buf, "x/a~0~1bé");
        }
    }

    #[test]
    fn unescape_errors() {
        assert_eq!(
            unescape("~"),
            Err(EncodingError::InvalidEscape { offset: 0 })
        );
        assert_eq!(
            unescape("~2"),
            Err(EncodingError::InvalidEscape { offset: 0 })
        );
        assert_eq!(
            unescape("ab~"),
            Err(EncodingError::InvalidEscape { offset: 2 })
        );
        assert_eq!(
            unescape("~~0"),
            Err(EncodingError::InvalidEscape { offset: 0 })
        );
        assert_eq!(
            unescape("a/b"),
            Err(EncodingError::UnescapedSlash { offset: 1 })
        );
    }

    #[quickcheck]
    fn escape_is_identity_without_specials(s: String) -> bool {
        let s: String = s.chars().filter(|&c| c != '~' && c != '/').collect();
        escape(&s) == s.as_str()
    }

    #[quickcheck]
    fn unescape_reverses_escape(s: String) -> bool {
        unescape(&escape(&s)).unwrap() == s.as_str()
    }

    #[test]
    fn from() {
        assert_eq!(Token::from("/").encoded(), "~1");
        assert_eq!(Token::from("~/").encoded(), "~0~1");
        assert_eq!(Token::from(34u32).encoded(), "34");
        assert_eq!(Token::from(34u64).encoded(), "34");
        assert_eq!(Token::from(Index::Next).encoded(), "-");
        assert_eq!(Token::from(String::from("foo")).encoded(), "foo");
        assert_eq!(Token::from(&Token::new("foo")).encoded(), "foo");
    }

    #[test]
    fn to_index() {
        assert_eq!(Token::new("-").to_index(), Ok(Index::Next));
        assert_eq!(Token::new("0").to_index(), Ok(Index::Num(0)));
        assert_eq!(Token::new("2").to_index(), Ok(Index::Num(2)));
        assert!(Token::new("a").to_index().is_err());
        assert!(Token::new("-1").to_index().is_err());
        assert!(Token::new("+1").to_index().is_err());
    }

    #[test]
    fn new() {
        assert_eq!(Token::new("~1").encoded(), "~01");
        assert_eq!(Token::new("a/b").encoded(), "a~1b");
    }

    #[test]
    fn from_encoded() {
        assert_eq!(Token::from_encoded("~1").unwrap().encoded(), "~1");
        assert_eq!(Token::from_encoded("~0~1").unwrap().encoded(), "~0~1");
        let t = Token::from_encoded("a~1b").unwrap();
        assert_eq!(t.decoded(), "a/b");
        assert!(Token::from_encoded("a/b").unwrap_err().is_unescaped_slash());
        assert!(Token::from_encoded("a~a").unwrap_err().is_invalid_escape());
    }

    #[test]
    fn into_owned() {
        let token = Token::from_encoded("foo~0").unwrap().into_owned();
        assert_eq!(token.encoded(), "foo~0");
        assert_eq!(token.to_string(), "foo~");
    }

    #[quickcheck]
    fn encode_decode(s: String) -> bool {
        let token = Token::new(s);
        let decoded = Token::from_encoded(token.encoded()).unwrap();
        token == decoded
    }

    #[test]
    fn encoding_error_display() {
        assert_eq!(
            Token::from_encoded("~").unwrap_err().to_string(),
            "json pointer is malformed due to invalid encoding ('~' not followed by '0' or '1')"
        );
    }

    #[test]
    fn tokens() {
        let pointer = Pointer::from_static("/a/b~1c/");
        let tokens: Vec<Token> = pointer.tokens().collect();
        assert_eq!(
            tokens,
            vec![
                Token::from_encoded_unchecked("a"),
                Token::from_encoded_unchecked("b~1c"),
                Token::from_encoded_unchecked("")
            ]
        );
    }
}
