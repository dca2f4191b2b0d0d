//! JSON Pointers ([RFC 6901](https://datatracker.ietf.org/doc/html/rfc6901))
//! for `serde_json`: parse, build and navigate pointers, resolve them against
//! decoded values, encoded text or streams of JSON, and assign through them.
//!
//! ## Pointers
//!
//! [`PointerBuf`] (owned) and [`Pointer`] (borrowed) hold a validated pointer
//! in its encoded form. Tokens are escaped going in and decoded on demand.
//!
//! ```
//! use jsonptr_stream::{Pointer, PointerBuf};
//!
//! let mut ptr = PointerBuf::parse("/foo").unwrap();
//! ptr.push_back("a/b");
//! ptr.push_index(0);
//! assert_eq!(ptr, "/foo/a~1b/0");
//! assert_eq!(ptr.parent().unwrap(), Pointer::from_static("/foo/a~1b"));
//! assert!(PointerBuf::parse("foo").is_err());
//! ```
//!
//! ## Resolving and assigning
//!
//! [`Resolve`], [`ResolveMut`] and [`Assign`] are implemented for
//! [`serde_json::Value`]. [`ResolveEncoded`] resolves against JSON text,
//! decoding only the value pointed at, and [`Stream`] does so for each value
//! read from an [`std::io::Read`].
//!
//! ```
//! use jsonptr_stream::{Assign, Pointer, Resolve, ResolveEncoded};
//! use serde_json::json;
//!
//! let mut data = json!({"foo": ["bar"]});
//! let ptr = Pointer::from_static("/foo/0");
//! assert_eq!(data.resolve(ptr).unwrap(), "bar");
//!
//! data.assign(Pointer::from_static("/foo/-"), "baz").unwrap();
//! assert_eq!(data, json!({"foo": ["bar", "baz"]}));
//!
//! let text = data.to_string();
//! assert_eq!(text.resolve_encoded(Pointer::from_static("/foo/1")).unwrap(), "baz");
//! ```
//!
//! ## Working with pointer text
//!
//! [`get`], [`get_mut`], [`get_encoded`] and [`set`] take the pointer as a
//! string. Failures come back as a [`Report`] which knows the prefix of the
//! pointer at which resolution failed:
//!
//! ```
//! use serde_json::json;
//!
//! let data = json!({"a": {"b": 1}});
//! assert_eq!(jsonptr_stream::get(&data, "/a/b").unwrap(), 1);
//!
//! let err = jsonptr_stream::get(&data, "/a/c/d").unwrap_err();
//! assert_eq!(err.prefix(), "/a/c");
//! assert!(err.is_resolve());
//! ```
//!
//! ## Feature Flags
//!
//! | Flag      | Description                                                      | Default |
//! | :-------: | ---------------------------------------------------------------- | :-----: |
//! | `"std"`   | Implements `std::error::Error` for errors, enables [`Stream`]    |    ✓    |
//! | `"serde"` | Implements `serde::{Serialize, Deserialize}` for pointers         |    ✓    |
//! | `"json"`  | `serde_json` implementations of the traits below                 |    ✓    |
//! | `"resolve"` | Enables the [`Resolve`] and [`ResolveMut`] traits              |    ✓    |
//! | `"assign"` | Enables the [`Assign`] trait                                    |    ✓    |
//! | `"miette"` | Implements `miette::Diagnostic` for [`Report`]                  |         |
#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

use core::fmt;

pub mod diagnostic;
pub use diagnostic::{Diagnose, Diagnostic, Label, Report};

#[cfg(feature = "assign")]
pub mod assign;
#[cfg(feature = "assign")]
pub use assign::{Assign, AssignError, Assignment};

#[cfg(feature = "resolve")]
pub mod resolve;
#[cfg(feature = "resolve")]
pub use resolve::{Resolve, ResolveError, ResolveMut};

#[cfg(all(feature = "json", feature = "resolve"))]
pub mod stream;
#[cfg(all(feature = "json", feature = "resolve"))]
pub use stream::ResolveEncoded;
#[cfg(all(feature = "json", feature = "resolve", feature = "std"))]
pub use stream::Stream;

pub mod prelude;

mod pointer;
pub use pointer::{ParseError, Pointer, PointerBuf, RootError};

pub mod token;
pub use token::{escape, escape_into, unescape, EncodingError, Token, Tokens};

pub mod index;
pub use index::{Index, OutOfBoundsError, ParseIndexError};

#[cfg(test)]
mod arbitrary;

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                    Error                                     ║
║                                   ¯¯¯¯¯¯¯                                    ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// Any failure of the text entry points ([`get`], [`get_mut`],
/// [`get_encoded`], [`set`]).
#[derive(Debug)]
pub enum Error {
    /// The pointer text is malformed.
    Parse(ParseError),
    /// The pointer could not be resolved.
    #[cfg(feature = "resolve")]
    Resolve(ResolveError),
    /// The value could not be assigned.
    #[cfg(feature = "assign")]
    Assign(AssignError),
}

impl Error {
    /// Returns `true` if this error is `Parse`.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns `true` if this error is `Resolve`.
    pub fn is_resolve(&self) -> bool {
        #[cfg(feature = "resolve")]
        {
            matches!(self, Self::Resolve(_))
        }
        #[cfg(not(feature = "resolve"))]
        {
            false
        }
    }

    /// Returns `true` if this error is `Assign`.
    pub fn is_assign(&self) -> bool {
        #[cfg(feature = "assign")]
        {
            matches!(self, Self::Assign(_))
        }
        #[cfg(not(feature = "assign"))]
        {
            false
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

#[cfg(feature = "resolve")]
impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}

#[cfg(feature = "assign")]
impl From<AssignError> for Error {
    fn from(err: AssignError) -> Self {
        Self::Assign(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => err.fmt(f),
            #[cfg(feature = "resolve")]
            Self::Resolve(err) => err.fmt(f),
            #[cfg(feature = "assign")]
            Self::Assign(err) => err.fmt(f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            #[cfg(feature = "resolve")]
            Self::Resolve(err) => Some(err),
            #[cfg(feature = "assign")]
            Self::Assign(err) => Some(err),
        }
    }
}

impl Diagnostic for Error {
    fn url() -> &'static str {
        diagnostic::diagnostic_url!(enum Error)
    }

    fn prefix_len(&self, subject: &str) -> usize {
        match self {
            Self::Parse(err) => err.prefix_len(subject),
            #[cfg(feature = "resolve")]
            Self::Resolve(err) => err.prefix_len(subject),
            #[cfg(feature = "assign")]
            Self::Assign(err) => err.prefix_len(subject),
        }
    }

    fn label(&self, subject: &str) -> Option<Label> {
        match self {
            Self::Parse(err) => err.label(subject),
            #[cfg(feature = "resolve")]
            Self::Resolve(err) => err.label(subject),
            #[cfg(feature = "assign")]
            Self::Assign(err) => err.label(subject),
        }
    }
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                 Pointer text                                 ║
║                                ¯¯¯¯¯¯¯¯¯¯¯¯¯¯                                ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// Resolves the pointer text `pointer` against `doc`.
///
/// The whole pointer is validated before resolution starts, so a malformed
/// token is reported even if an earlier token would fail to resolve.
///
/// ## Errors
/// Returns a [`Report`] of [`Error::Parse`] or [`Error::Resolve`].
#[cfg(all(feature = "json", feature = "resolve"))]
pub fn get<'v>(
    doc: &'v serde_json::Value,
    pointer: &str,
) -> Result<&'v serde_json::Value, Report<Error>> {
    let ptr = Pointer::parse(pointer).map_err(Error::from).diagnose(pointer)?;
    doc.resolve(ptr).map_err(Error::from).diagnose(pointer)
}

/// Resolves the pointer text `pointer` against `doc`, mutably.
///
/// ## Errors
/// Returns a [`Report`] of [`Error::Parse`] or [`Error::Resolve`].
#[cfg(all(feature = "json", feature = "resolve"))]
pub fn get_mut<'v>(
    doc: &'v mut serde_json::Value,
    pointer: &str,
) -> Result<&'v mut serde_json::Value, Report<Error>> {
    let ptr = Pointer::parse(pointer).map_err(Error::from).diagnose(pointer)?;
    doc.resolve_mut(ptr).map_err(Error::from).diagnose(pointer)
}

/// Resolves the pointer text `pointer` against the encoded document `doc`,
/// decoding only the value found there.
///
/// ```
/// let doc = br#"{"big": [1, 2, 3], "small": {"x": true}}"#;
/// let x = jsonptr_stream::get_encoded(&doc[..], "/small/x").unwrap();
/// assert_eq!(x, true);
/// ```
///
/// ## Errors
/// Returns a [`Report`] of [`Error::Parse`] or [`Error::Resolve`].
#[cfg(all(feature = "json", feature = "resolve"))]
pub fn get_encoded<D>(doc: &D, pointer: &str) -> Result<serde_json::Value, Report<Error>>
where
    D: ResolveEncoded + ?Sized,
{
    let ptr = Pointer::parse(pointer).map_err(Error::from).diagnose(pointer)?;
    doc.resolve_encoded(ptr).map_err(Error::from).diagnose(pointer)
}

/// Assigns `value` at the pointer text `pointer` within `doc`, returning the
/// value it replaced, if any.
///
/// See [`Assign`] for the semantics.
///
/// ## Errors
/// Returns a [`Report`] of [`Error::Parse`] or [`Error::Assign`]. `doc` is
/// left untouched on failure.
#[cfg(all(feature = "json", feature = "assign"))]
pub fn set(
    doc: &mut serde_json::Value,
    pointer: &str,
    value: impl Into<serde_json::Value>,
) -> Result<Option<serde_json::Value>, Report<Error>> {
    let ptr = Pointer::parse(pointer).map_err(Error::from).diagnose(pointer)?;
    doc.assign(ptr, value)
        .map(|assignment| assignment.replaced)
        .map_err(Error::from)
        .diagnose(pointer)
}

#[cfg(all(test, feature = "json", feature = "assign"))]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use quickcheck_macros::quickcheck;
    use serde_json::{json, Value};

    #[test]
    fn get_root_is_document() {
        let doc = json!({"a": [1, {"b": null}]});
        assert_eq!(get(&doc, "").unwrap(), &doc);
        assert_eq!(get_encoded(doc.to_string().as_str(), "").unwrap(), doc);
    }

    #[test]
    fn get_errors() {
        let doc = json!({"a": 1, "list": [1, 2]});

        let err = get(&doc, "/b").unwrap_err();
        assert!(matches!(err.original(), Error::Resolve(e) if e.is_not_found()));
        assert_eq!(err.prefix(), "/b");

        let err = get(&doc, "/list/5").unwrap_err();
        assert!(matches!(err.original(), Error::Resolve(e) if e.is_out_of_bounds()));
        assert_eq!(err.prefix(), "/list/5");

        let err = get(&doc, "/a/x/y").unwrap_err();
        assert!(matches!(err.original(), Error::Resolve(e) if e.is_unreachable()));
        assert_eq!(err.prefix(), "/a");
        assert_eq!(
            err.to_string(),
            "\"/a\": pointer starting at offset 2 is unreachable"
        );

        let err = get(&doc, "abc").unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.prefix(), "abc");
    }

    #[test]
    fn syntax_errors_win() {
        let doc = json!({});
        let err = get(&doc, "/missing/~x").unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.prefix(), "/missing/~x");
    }

    #[test]
    fn get_encoded_errors() {
        let err = get_encoded(r#"{"a": [1, 2]}"#, "/a/-").unwrap_err();
        assert!(matches!(err.original(), Error::Resolve(e) if e.is_out_of_bounds()));
        assert_eq!(err.prefix(), "/a/-");

        let err = get_encoded(r#"{"a": [1, 2"#, "/a/0").unwrap_err();
        assert!(matches!(err.original(), Error::Resolve(e) if e.is_decode()));
    }

    #[test]
    fn get_mut_then_write() {
        let mut doc = json!({"a": {"b": 1}});
        *get_mut(&mut doc, "/a/b").unwrap() = json!(2);
        assert_eq!(doc, json!({"a": {"b": 2}}));
    }

    #[test]
    fn set_then_get() {
        let mut doc = json!({"list": ["a", "b"]});
        assert_eq!(set(&mut doc, "/list/-", "c").unwrap(), None);
        assert_eq!(set(&mut doc, "/list/0", "z").unwrap(), Some(json!("a")));
        assert_eq!(set(&mut doc, "/list/5", "f").unwrap(), None);
        assert_eq!(
            get(&doc, "/list").unwrap(),
            &json!(["z", "b", "c", null, null, "f"])
        );

        let err = set(&mut doc, "/list/x", 1).unwrap_err();
        assert!(err.is_assign());
        assert_eq!(err.prefix(), "/list/x");

        let err = set(&mut doc, "/list/0/x", 1).unwrap_err();
        assert!(err.is_assign());
        assert_eq!(err.prefix(), "/list/0");

        let err = set(&mut doc, "/list/9223372036854775807", 1).unwrap_err();
        assert!(err.is_assign());
        assert_eq!(err.prefix(), "/list/9223372036854775807");
    }

    #[quickcheck]
    fn set_get_roundtrip(keys: Vec<String>, value: i64) -> bool {
        let mut doc = json!({});
        let mut ptr = PointerBuf::new();
        for key in keys.iter().take(4) {
            ptr.push_back(key);
            if get(&doc, ptr.as_str()).is_err() {
                set(&mut doc, ptr.as_str(), json!({})).unwrap();
            }
        }
        set(&mut doc, ptr.as_str(), value).unwrap();
        get(&doc, ptr.as_str()).unwrap() == &Value::from(value)
    }
}
