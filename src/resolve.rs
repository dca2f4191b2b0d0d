//! # Resolve values based on JSON [`Pointer`]s
//!
//! This module provides the [`Resolve`] and [`ResolveMut`] traits which are
//! implemented by types that can internally resolve a value based on a JSON
//! Pointer.
//!
//! | Feature name | Type                | Resolve | ResolveMut |
//! | ------------ | ------------------- | :-----: | :--------: |
//! | `"json"`     | [`serde_json::Value`] |   ✓     |     ✓      |
//!
//! Encoded JSON text and readers are handled by the
//! [`stream`](crate::stream) module, which reports failures with the same
//! [`ResolveError`].
//!
//! ```
//! use jsonptr_stream::{Pointer, Resolve};
//! use serde_json::json;
//!
//! let data = json!({ "foo": { "bar": [0, 1] } });
//! let ptr = Pointer::from_static("/foo/bar/1");
//! assert_eq!(data.resolve(ptr).unwrap(), 1);
//!
//! let err = data.resolve(Pointer::from_static("/foo/bar/2")).unwrap_err();
//! assert!(err.is_out_of_bounds());
//! assert_eq!(err.offset(), 8);
//! ```

use crate::{
    diagnostic::{diagnostic_url, token_end, Diagnostic, Label},
    index::{OutOfBoundsError, ParseIndexError},
    Pointer,
};
use alloc::string::ToString;
use core::fmt;

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                   Resolve                                    ║
║                                  ¯¯¯¯¯¯¯¯¯                                   ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// A trait implemented by types which can resolve a reference to a value type
/// from a path represented by a JSON [`Pointer`].
pub trait Resolve {
    /// The type of value that this implementation can operate on.
    type Value;

    /// Error associated with `Resolve`
    type Error;

    /// Resolve a reference to `Self::Value` based on the path in a
    /// [`Pointer`].
    ///
    /// ## Errors
    /// Returns a [`Self::Error`](Resolve::Error) if the [`Pointer`] can not
    /// be resolved.
    fn resolve(&self, ptr: &Pointer) -> Result<&Self::Value, Self::Error>;
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                  ResolveMut                                  ║
║                                 ¯¯¯¯¯¯¯¯¯¯¯¯                                 ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// A trait implemented by types which can resolve a mutable reference to a
/// value type from a path represented by a JSON [`Pointer`].
pub trait ResolveMut {
    /// The type of value that is being resolved.
    type Value;

    /// Error associated with `ResolveMut`
    type Error;

    /// Resolve a mutable reference to a `serde_json::Value` based on the path
    /// in a JSON Pointer.
    ///
    /// ## Errors
    /// Returns a [`Self::Error`](ResolveMut::Error) if the [`Pointer`] can not
    /// be resolved.
    fn resolve_mut(&mut self, ptr: &Pointer) -> Result<&mut Self::Value, Self::Error>;
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                 ResolveError                                 ║
║                                ¯¯¯¯¯¯¯¯¯¯¯¯¯¯                                ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// Indicates that the `Pointer` could not be resolved.
///
/// Each variant carries the byte offset, within the pointer, of the `'/'`
/// which starts the token being resolved when the failure occurred.
#[derive(Debug)]
pub enum ResolveError {
    /// `Pointer` could not be resolved because a `Token` for an array index is
    /// not a valid integer or dash (`"-"`).
    ///
    /// ## Example
    /// ```rust
    /// # use serde_json::json;
    /// # use jsonptr_stream::Pointer;
    /// let data = json!({ "foo": ["bar"] });
    /// let ptr = Pointer::from_static("/foo/invalid");
    /// assert!(ptr.resolve(&data).unwrap_err().is_failed_to_parse_index());
    /// ```
    FailedToParseIndex {
        /// Offset of the partial pointer starting with the invalid index.
        offset: usize,
        /// The source `ParseIndexError`
        source: ParseIndexError,
    },

    /// `Pointer` could not be resolved due to an index being out of bounds
    /// within an array. `"-"` is always out of bounds when resolving.
    ///
    /// ## Example
    /// ```rust
    /// # use serde_json::json;
    /// # use jsonptr_stream::Pointer;
    /// let data = json!({ "foo": ["bar"] });
    /// let ptr = Pointer::from_static("/foo/1");
    /// assert!(ptr.resolve(&data).unwrap_err().is_out_of_bounds());
    /// ```
    OutOfBounds {
        /// Offset of the partial pointer starting with the invalid index.
        offset: usize,
        /// The source `OutOfBoundsError`
        source: OutOfBoundsError,
    },

    /// `Pointer` could not be resolved as a segment of the path was not found.
    ///
    /// ## Example
    /// ```rust
    /// # use serde_json::json;
    /// # use jsonptr_stream::Pointer;
    /// let data = json!({ "foo": "bar" });
    /// let ptr = Pointer::from_static("/bar");
    /// assert!(ptr.resolve(&data).unwrap_err().is_not_found());
    /// ```
    NotFound {
        /// Offset of the pointer starting with the `Token` which was not found.
        offset: usize,
    },

    /// `Pointer` could not be resolved as the path contains a scalar value
    /// (or null) before fully exhausting the path.
    ///
    /// ## Example
    /// ```rust
    /// # use serde_json::json;
    /// # use jsonptr_stream::Pointer;
    /// let data = json!({ "foo": "bar" });
    /// let ptr = Pointer::from_static("/foo/unreachable");
    /// let err = ptr.resolve(&data).unwrap_err();
    /// assert!(err.is_unreachable());
    /// ```
    Unreachable {
        /// Offset of the pointer starting with the `Token` which could not be
        /// reached.
        offset: usize,
    },

    /// The encoded document could not be decoded.
    #[cfg(feature = "json")]
    Decode {
        /// Offset of the pointer starting with the `Token` which was being
        /// resolved when decoding failed.
        offset: usize,
        /// The source `serde_json::Error`
        source: serde_json::Error,
    },
}

impl ResolveError {
    /// Offset of the partial pointer starting with the token which caused the
    /// error.
    pub fn offset(&self) -> usize {
        match self {
            Self::FailedToParseIndex { offset, .. }
            | Self::OutOfBounds { offset, .. }
            | Self::NotFound { offset }
            | Self::Unreachable { offset } => *offset,
            #[cfg(feature = "json")]
            Self::Decode { offset, .. } => *offset,
        }
    }

    /// Returns `true` if this error is either `FailedToParseIndex` or
    /// `OutOfBounds`.
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            Self::FailedToParseIndex { .. } | Self::OutOfBounds { .. }
        )
    }

    /// Returns `true` if this error is `FailedToParseIndex`.
    pub fn is_failed_to_parse_index(&self) -> bool {
        matches!(self, Self::FailedToParseIndex { .. })
    }

    /// Returns `true` if this error is `OutOfBounds`.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if this error is `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this error is `Unreachable`.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Returns `true` if this error is `Decode`.
    pub fn is_decode(&self) -> bool {
        #[cfg(feature = "json")]
        {
            matches!(self, Self::Decode { .. })
        }
        #[cfg(not(feature = "json"))]
        {
            false
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailedToParseIndex { offset, .. } => {
                write!(f, "failed to parse index at offset {offset}")
            }
            Self::OutOfBounds { offset, .. } => {
                write!(f, "index at offset {offset} out of bounds")
            }
            Self::NotFound { offset } => {
                write!(f, "pointer starting at offset {offset} not found")
            }
            Self::Unreachable { offset } => {
                write!(f, "pointer starting at offset {offset} is unreachable")
            }
            #[cfg(feature = "json")]
            Self::Decode { offset, source } => {
                write!(f, "failed to decode json at pointer offset {offset}: {source}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FailedToParseIndex { source, .. } => Some(source),
            Self::OutOfBounds { source, .. } => Some(source),
            #[cfg(feature = "json")]
            Self::Decode { source, .. } => Some(source),
            Self::NotFound { .. } | Self::Unreachable { .. } => None,
        }
    }
}

impl Diagnostic for ResolveError {
    fn url() -> &'static str {
        diagnostic_url!(enum ResolveError)
    }

    fn prefix_len(&self, subject: &str) -> usize {
        match self {
            Self::FailedToParseIndex { offset, .. }
            | Self::OutOfBounds { offset, .. }
            | Self::NotFound { offset } => token_end(subject, *offset),
            Self::Unreachable { offset } => *offset,
            #[cfg(feature = "json")]
            Self::Decode { offset, .. } => *offset,
        }
    }

    fn label(&self, subject: &str) -> Option<Label> {
        let text = match self {
            Self::FailedToParseIndex { source, .. } => source.to_string(),
            Self::OutOfBounds { source, .. } => source.to_string(),
            Self::NotFound { .. } => "not found in value".to_string(),
            Self::Unreachable { .. } => "parent is not an object or array".to_string(),
            #[cfg(feature = "json")]
            Self::Decode { .. } => "decoding failed here".to_string(),
        };
        Some(Label::token(text, subject, self.offset()))
    }
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                  json impl                                   ║
║                                 ¯¯¯¯¯¯¯¯¯¯¯                                  ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

#[cfg(feature = "json")]
mod json {
    use super::{ResolveError, ResolveMut};
    use crate::{Pointer, Token};
    use serde_json::Value;

    /// Narrows `value` by one token. `offset` is where the token starts.
    fn step<'v>(value: &'v Value, token: &Token, offset: usize) -> Result<&'v Value, ResolveError> {
        match value {
            Value::Array(array) => {
                let idx = token
                    .to_index()
                    .map_err(|source| ResolveError::FailedToParseIndex { offset, source })?
                    .for_len(array.len())
                    .map_err(|source| ResolveError::OutOfBounds { offset, source })?;
                Ok(&array[idx])
            }
            Value::Object(map) => map
                .get(token.decoded().as_ref())
                .ok_or(ResolveError::NotFound { offset }),
            // found a leaf node but the pointer hasn't been exhausted
            _ => Err(ResolveError::Unreachable { offset }),
        }
    }

    impl super::Resolve for Value {
        type Value = Value;
        type Error = ResolveError;

        fn resolve(&self, mut ptr: &Pointer) -> Result<&Value, Self::Error> {
            let mut offset = 0;
            let mut value = self;
            while let Some((token, rem)) = ptr.split_front() {
                value = step(value, &token, offset)?;
                offset += 1 + token.encoded().len();
                ptr = rem;
            }
            Ok(value)
        }
    }

    impl ResolveMut for Value {
        type Value = Value;
        type Error = ResolveError;

        fn resolve_mut(&mut self, mut ptr: &Pointer) -> Result<&mut Value, ResolveError> {
            let mut offset = 0;
            let mut value = self;
            while let Some((token, rem)) = ptr.split_front() {
                let tok_len = token.encoded().len();
                value = match value {
                    Value::Array(array) => {
                        let idx = token
                            .to_index()
                            .map_err(|source| ResolveError::FailedToParseIndex { offset, source })?
                            .for_len(array.len())
                            .map_err(|source| ResolveError::OutOfBounds { offset, source })?;
                        Ok(&mut array[idx])
                    }
                    Value::Object(map) => map
                        .get_mut(token.decoded().as_ref())
                        .ok_or(ResolveError::NotFound { offset }),
                    // found a leaf node but the pointer hasn't been exhausted
                    _ => Err(ResolveError::Unreachable { offset }),
                }?;
                offset += 1 + tok_len;
                ptr = rem;
            }
            Ok(value)
        }
    }

}
