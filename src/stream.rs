//! # Resolve JSON [`Pointer`]s against encoded documents
//!
//! [`ResolveEncoded`] resolves a pointer directly against JSON text without
//! first decoding the whole document into a [`serde_json::Value`]. The text is
//! walked with serde's pull model: members and elements which are not on the
//! pointer's path are skipped with [`IgnoredAny`], and only the target value is
//! decoded.
//!
//! [`Stream`] does the same over an [`std::io::Read`], resolving one value at
//! a time from a sequence of whitespace separated JSON values.
//!
//! ```
//! use jsonptr_stream::{Pointer, ResolveEncoded};
//!
//! let doc = r#"{"skipped": {"deep": [1, 2, 3]}, "a": [1, 2]}"#;
//! let ptr = Pointer::from_static("/a/1");
//! assert_eq!(doc.resolve_encoded(ptr).unwrap(), 2);
//! ```
//!
//! Errors are the same [`ResolveError`]s as tree resolution, plus
//! [`ResolveError::Decode`] for malformed text. Its offset is the part of the
//! pointer which had been resolved when decoding failed.

use crate::{
    index::{Index, OutOfBoundsError},
    Pointer, ResolveError, Token,
};
use core::fmt;
use log::trace;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{value::RawValue, Value};

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                ResolveEncoded                                ║
║                               ¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯                               ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// A trait implemented by encoded JSON documents which can resolve a value
/// from a path represented by a JSON [`Pointer`].
///
/// The document must hold exactly one JSON value; trailing non-whitespace is
/// a [`ResolveError::Decode`].
pub trait ResolveEncoded {
    /// Decodes the value at `ptr`.
    ///
    /// A root pointer decodes the whole document. Any other pointer decodes
    /// only the target value.
    ///
    /// ## Errors
    /// Returns [`ResolveError`] if the pointer cannot be resolved or the text
    /// is not valid JSON.
    fn resolve_encoded(&self, ptr: &Pointer) -> Result<Value, ResolveError>;
}

impl ResolveEncoded for str {
    fn resolve_encoded(&self, ptr: &Pointer) -> Result<Value, ResolveError> {
        resolve_complete(serde_json::Deserializer::from_str(self), ptr)
    }
}

impl ResolveEncoded for [u8] {
    fn resolve_encoded(&self, ptr: &Pointer) -> Result<Value, ResolveError> {
        resolve_complete(serde_json::Deserializer::from_slice(self), ptr)
    }
}

impl ResolveEncoded for RawValue {
    fn resolve_encoded(&self, ptr: &Pointer) -> Result<Value, ResolveError> {
        self.get().resolve_encoded(ptr)
    }
}

fn resolve_complete<'de, R>(
    mut de: serde_json::Deserializer<R>,
    ptr: &Pointer,
) -> Result<Value, ResolveError>
where
    R: serde_json::de::Read<'de>,
{
    let value = seek(&mut de, ptr)?;
    de.end().map_err(|source| ResolveError::Decode {
        offset: ptr.len(),
        source,
    })?;
    Ok(value)
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                    Stream                                    ║
║                                   ¯¯¯¯¯¯¯¯                                   ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// Resolves pointers against consecutive JSON values read from `R`.
///
/// Each call to [`Stream::resolve_next`] consumes exactly one value from the
/// reader and leaves it positioned right after that value.
///
/// ```
/// use jsonptr_stream::{stream::Stream, Pointer};
///
/// let input = br#"{"id": 1, "tags": ["a", "b"]} {"id": 2, "tags": []}"#;
/// let mut stream = Stream::new(&input[..]);
/// let ptr = Pointer::from_static("/id");
/// assert_eq!(stream.resolve_next(ptr).unwrap(), 1);
/// assert_eq!(stream.resolve_next(ptr).unwrap(), 2);
/// stream.end().unwrap();
/// ```
#[cfg(feature = "std")]
pub struct Stream<R: std::io::Read> {
    de: serde_json::Deserializer<serde_json::de::IoRead<R>>,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Stream<R> {
    /// Creates a `Stream` reading from `reader`.
    ///
    /// Wrap unbuffered readers (files, sockets) in a
    /// [`BufReader`](std::io::BufReader).
    pub fn new(reader: R) -> Self {
        Self {
            de: serde_json::Deserializer::from_reader(reader),
        }
    }

    /// Reads the next value from the stream and returns the part of it at
    /// `ptr`.
    ///
    /// ## Errors
    /// Returns [`ResolveError`] if the pointer cannot be resolved within the
    /// value, or if decoding fails. Running out of input is reported as a
    /// [`ResolveError::Decode`] whose source satisfies
    /// [`serde_json::Error::is_eof`]. A value the pointer does not resolve
    /// against is still consumed whole; after a decode error the stream
    /// position is unspecified.
    pub fn resolve_next(&mut self, ptr: &Pointer) -> Result<Value, ResolveError> {
        seek(&mut self.de, ptr)
    }

    /// Checks that nothing but whitespace remains in the stream.
    ///
    /// ## Errors
    /// Returns [`serde_json::Error`] if trailing data is found.
    pub fn end(mut self) -> Result<(), serde_json::Error> {
        self.de.end()
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> fmt::Debug for Stream<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                     Seek                                     ║
║                                    ¯¯¯¯¯¯                                    ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// Outcome of walking one value: typed failures are carried as data so the
/// walk can consume the rest of the value and keep going.
type Outcome = Result<Value, ResolveError>;

/// Shared state of a single resolution.
#[derive(Default)]
struct Cursor {
    /// Length of the pointer prefix resolved so far.
    reached: usize,
}

fn seek<'de, R>(de: &mut serde_json::Deserializer<R>, ptr: &Pointer) -> Result<Value, ResolveError>
where
    R: serde_json::de::Read<'de>,
{
    let mut cursor = Cursor::default();
    let result = Seek {
        ptr,
        offset: 0,
        cursor: &mut cursor,
    }
    .deserialize(de);
    match result {
        Ok(outcome) => outcome,
        Err(source) => Err(ResolveError::Decode {
            offset: cursor.reached,
            source,
        }),
    }
}

/// Seeks the value at `ptr` within whatever the deserializer yields next.
///
/// The whole value is always consumed, whether or not `ptr` resolves.
struct Seek<'p, 'c> {
    ptr: &'p Pointer,
    /// Offset of `ptr` within the pointer being resolved.
    offset: usize,
    cursor: &'c mut Cursor,
}

impl<'de> DeserializeSeed<'de> for Seek<'_, '_> {
    type Value = Outcome;

    fn deserialize<D>(self, de: D) -> Result<Outcome, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.cursor.reached = self.offset;
        match self.ptr.split_front() {
            None => Value::deserialize(de).map(Ok),
            Some((token, rest)) => de.deserialize_any(Step {
                next: self.offset + 1 + token.encoded().len(),
                token,
                rest,
                offset: self.offset,
                cursor: self.cursor,
            }),
        }
    }
}

/// Visits the value the current `token` is resolved against.
struct Step<'p, 'c> {
    token: Token<'p>,
    rest: &'p Pointer,
    /// Offset of `token`'s leading `'/'`.
    offset: usize,
    /// Offset of `rest`.
    next: usize,
    cursor: &'c mut Cursor,
}

impl Step<'_, '_> {
    fn unreachable<E>(self) -> Result<Outcome, E> {
        Ok(Err(ResolveError::Unreachable {
            offset: self.offset,
        }))
    }

    fn seek_rest(&mut self) -> Seek<'_, '_> {
        Seek {
            ptr: self.rest,
            offset: self.next,
            cursor: &mut *self.cursor,
        }
    }
}

macro_rules! visit_scalars {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<E: de::Error>(self, _: $ty) -> Result<Outcome, E> {
                self.unreachable()
            }
        )*
    };
}

/// Consumes the remaining elements of `seq`, returning how many there were.
fn drain_seq<'de, A: SeqAccess<'de>>(seq: &mut A) -> Result<usize, A::Error> {
    let mut count = 0;
    while seq.next_element::<IgnoredAny>()?.is_some() {
        count += 1;
    }
    Ok(count)
}

impl<'de> Visitor<'de> for Step<'_, '_> {
    type Value = Outcome;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a json value")
    }

    visit_scalars!(visit_bool(bool), visit_i64(i64), visit_u64(u64), visit_f64(f64), visit_str(&str));

    fn visit_unit<E: de::Error>(self) -> Result<Outcome, E> {
        self.unreachable()
    }

    fn visit_map<A>(mut self, mut map: A) -> Result<Outcome, A::Error>
    where
        A: MapAccess<'de>,
    {
        let key = self.token.decoded().into_owned();
        let mut found = None;
        while let Some(matched) = map.next_key_seed(KeyEq(&key))? {
            if matched {
                // a later duplicate replaces an earlier match, failed or not
                found = Some(map.next_value_seed(self.seek_rest())?);
            } else {
                trace!("skipping member not named {key:?} at pointer offset {}", self.offset);
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(found.unwrap_or(Err(ResolveError::NotFound {
            offset: self.offset,
        })))
    }

    fn visit_seq<A>(mut self, mut seq: A) -> Result<Outcome, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let offset = self.offset;
        let index = match self.token.to_index() {
            Ok(Index::Num(index)) => index,
            Ok(Index::Next) => {
                let length = drain_seq(&mut seq)?;
                let source = OutOfBoundsError {
                    length,
                    index: length,
                };
                return Ok(Err(ResolveError::OutOfBounds { offset, source }));
            }
            Err(source) => {
                drain_seq(&mut seq)?;
                return Ok(Err(ResolveError::FailedToParseIndex { offset, source }));
            }
        };

        for length in 0..index {
            if seq.next_element::<IgnoredAny>()?.is_none() {
                let source = OutOfBoundsError { length, index };
                return Ok(Err(ResolveError::OutOfBounds { offset, source }));
            }
        }
        if index > 0 {
            trace!("skipped {index} elements at pointer offset {offset}");
        }

        let Some(outcome) = seq.next_element_seed(self.seek_rest())? else {
            let source = OutOfBoundsError {
                length: index,
                index,
            };
            return Ok(Err(ResolveError::OutOfBounds { offset, source }));
        };

        let trailing = drain_seq(&mut seq)?;
        if trailing > 0 {
            trace!("skipped {trailing} trailing elements at pointer offset {offset}");
        }
        Ok(outcome)
    }
}

/// Deserializes an object key, yielding whether it equals the wrapped key.
struct KeyEq<'k>(&'k str);

impl<'de> DeserializeSeed<'de> for KeyEq<'_> {
    type Value = bool;

    fn deserialize<D>(self, de: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        de.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for KeyEq<'_> {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        Ok(v == self.0)
    }
}
