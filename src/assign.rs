//! # Assign values based on JSON [`Pointer`]s
//!
//! This module provides the [`Assign`] trait which allows for the assignment of
//! values based on a JSON Pointer.
//!
//! Every token but the last must already resolve; the last token names the
//! slot being written:
//!
//! - an object member is inserted or overwritten
//! - an array element is replaced when in range, appended for `"-"` or an
//!   index equal to the length, and padded with `null`s up to the index when
//!   past the end
//! - a root pointer replaces the whole document
//!
//! ```rust
//! use jsonptr_stream::{Assign, Pointer};
//! use serde_json::json;
//!
//! let mut data = json!({"list": ["a", "b"]});
//! data.assign(Pointer::from_static("/list/-"), "c").unwrap();
//! data.assign(Pointer::from_static("/list/5"), "f").unwrap();
//! assert_eq!(data, json!({"list": ["a", "b", "c", null, null, "f"]}));
//! ```

use crate::{
    diagnostic::{diagnostic_url, token_end, Diagnostic, Label},
    index::ParseIndexError,
    Pointer, PointerBuf, ResolveError,
};
use alloc::{collections::TryReserveError, string::ToString};
use core::fmt;

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                    Assign                                    ║
║                                   ¯¯¯¯¯¯¯¯                                   ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// Implemented by types which can internally assign a value by a JSON Pointer.
pub trait Assign {
    /// The type of value that is being assigned.
    ///
    /// Provided implementations include:
    ///
    /// | Lang  |     value type      | feature flag |
    /// | ----- | ------------------- |: ---------- :|
    /// | JSON  | `serde_json::Value` |   `"json"`   |
    type Value;

    /// Error associated with `Assign`
    type Error;

    /// Assign a value based on the path provided by a JSON Pointer.
    ///
    /// ## Errors
    /// Returns [`Self::Error`](Assign::Error) if the parent of the target
    /// cannot be resolved, or cannot hold the value.
    fn assign<'v, V>(
        &'v mut self,
        ptr: &Pointer,
        value: V,
    ) -> Result<Assignment<'v, Self::Value>, Self::Error>
    where
        V: Into<Self::Value>;
}

/// The data structure returned from a successful call to `assign`.
#[derive(Debug)]
pub struct Assignment<'v, V> {
    /// The value that was assigned, in its new location.
    pub assigned: &'v mut V,

    /// The path which was assigned to.
    ///
    /// `"-"` is replaced by the concrete index the value ended up at.
    ///
    /// ## Example
    /// ```rust
    /// # use serde_json::json;
    /// # use jsonptr_stream::{Pointer, Assign};
    /// let mut data = json!({ "foo": ["zero"] });
    /// let ptr = Pointer::from_static("/foo/-");
    /// let assignment = data.assign(ptr, "one").unwrap();
    /// assert_eq!(assignment.assigned_to, Pointer::from_static("/foo/1"));
    /// ```
    pub assigned_to: PointerBuf,

    /// The value that was replaced, if any.
    pub replaced: Option<V>,
}

/*
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║                                 AssignError                                  ║
║                                ¯¯¯¯¯¯¯¯¯¯¯¯¯                                 ║
╚══════════════════════════════════════════════════════════════════════════════╝
░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
*/

/// Indicates error occurred during an assignment
#[derive(Debug)]
pub enum AssignError {
    /// The last `Token` of the `Pointer` targets an array but is not a valid
    /// index.
    FailedToParseIndex {
        /// Offset of the partial pointer starting with the invalid index.
        offset: usize,
        /// The source [`ParseIndexError`]
        source: ParseIndexError,
    },

    /// The parent of the target is a scalar (or null) and cannot hold a value.
    Unreachable {
        /// Offset of the last `Token`, i.e. the length of the parent pointer.
        offset: usize,
    },

    /// Padding the parent array up to the index would exceed the memory
    /// available to it.
    CapacityExceeded {
        /// Offset of the partial pointer starting with the index.
        offset: usize,
        /// The source [`TryReserveError`]
        source: TryReserveError,
    },

    /// The parent of the target could not be resolved.
    Resolve {
        /// The source [`ResolveError`]
        source: ResolveError,
    },
}

impl AssignError {
    /// Offset of the partial pointer starting with the token which caused the
    /// error.
    pub fn offset(&self) -> usize {
        match self {
            Self::FailedToParseIndex { offset, .. }
            | Self::Unreachable { offset }
            | Self::CapacityExceeded { offset, .. } => *offset,
            Self::Resolve { source } => source.offset(),
        }
    }

    /// Returns `true` if this error is `FailedToParseIndex`.
    pub fn is_failed_to_parse_index(&self) -> bool {
        matches!(self, Self::FailedToParseIndex { .. })
    }

    /// Returns `true` if this error is `Unreachable`.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Returns `true` if this error is `CapacityExceeded`.
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }

    /// Returns `true` if this error is `Resolve`.
    pub fn is_resolve(&self) -> bool {
        matches!(self, Self::Resolve { .. })
    }
}

impl From<ResolveError> for AssignError {
    fn from(source: ResolveError) -> Self {
        Self::Resolve { source }
    }
}

impl fmt::Display for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailedToParseIndex { offset, .. } => {
                write!(f, "failed to parse index at offset {offset}")
            }
            Self::Unreachable { offset } => {
                write!(f, "value before offset {offset} cannot hold a member or element")
            }
            Self::CapacityExceeded { offset, .. } => {
                write!(f, "array cannot grow to the index at offset {offset}")
            }
            Self::Resolve { source } => write!(f, "{source}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AssignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FailedToParseIndex { source, .. } => Some(source),
            Self::CapacityExceeded { source, .. } => Some(source),
            Self::Resolve { source } => Some(source),
            Self::Unreachable { .. } => None,
        }
    }
}

impl Diagnostic for AssignError {
    fn url() -> &'static str {
        diagnostic_url!(enum AssignError)
    }

    fn prefix_len(&self, subject: &str) -> usize {
        match self {
            Self::FailedToParseIndex { offset, .. } | Self::CapacityExceeded { offset, .. } => {
                token_end(subject, *offset)
            }
            Self::Unreachable { offset } => *offset,
            Self::Resolve { source } => source.prefix_len(subject),
        }
    }

    fn label(&self, subject: &str) -> Option<Label> {
        match self {
            Self::FailedToParseIndex { offset, source } => {
                Some(Label::token(source.to_string(), subject, *offset))
            }
            Self::Unreachable { offset } => Some(Label::token(
                "parent is not an object or array",
                subject,
                *offset,
            )),
            Self::CapacityExceeded { offset, .. } => {
                Some(Label::token("index is too large to pad to", subject, *offset))
            }
            Self::Resolve { source } => source.label(subject),
        }
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
    use super::{Assign, AssignError, Assignment};
    use crate::{Pointer, PointerBuf, ResolveMut};
    use core::mem;
    use log::trace;
    use serde_json::{map::Entry, Value};

    impl Assign for Value {
        type Value = Value;
        type Error = AssignError;

        fn assign<'v, V>(
            &'v mut self,
            ptr: &Pointer,
            value: V,
        ) -> Result<Assignment<'v, Self::Value>, Self::Error>
        where
            V: Into<Value>,
        {
            assign_value(ptr, self, value.into())
        }
    }

    pub(crate) fn assign_value<'v>(
        ptr: &Pointer,
        dest: &'v mut Value,
        src: Value,
    ) -> Result<Assignment<'v, Value>, AssignError> {
        let Some((parent_ptr, token)) = ptr.split_back() else {
            // root replaces the whole document
            let replaced = mem::replace(dest, src);
            return Ok(Assignment {
                assigned: dest,
                assigned_to: PointerBuf::new(),
                replaced: Some(replaced),
            });
        };
        let offset = parent_ptr.len();
        let parent = dest.resolve_mut(parent_ptr)?;
        let mut assigned_to = parent_ptr.to_buf();

        match parent {
            Value::Object(map) => {
                let key = token.decoded().into_owned();
                assigned_to.push_back(token);
                match map.entry(key) {
                    Entry::Occupied(entry) => {
                        let assigned = entry.into_mut();
                        let replaced = mem::replace(assigned, src);
                        Ok(Assignment {
                            assigned,
                            assigned_to,
                            replaced: Some(replaced),
                        })
                    }
                    Entry::Vacant(entry) => Ok(Assignment {
                        assigned: entry.insert(src),
                        assigned_to,
                        replaced: None,
                    }),
                }
            }
            Value::Array(array) => {
                let idx = token
                    .to_index()
                    .map_err(|source| AssignError::FailedToParseIndex { offset, source })?
                    .for_len_unchecked(array.len());
                assigned_to.push_index(idx);

                if idx < array.len() {
                    let replaced = mem::replace(&mut array[idx], src);
                    return Ok(Assignment {
                        assigned: &mut array[idx],
                        assigned_to,
                        replaced: Some(replaced),
                    });
                }
                if idx > array.len() {
                    array
                        .try_reserve(idx - array.len() + 1)
                        .map_err(|source| AssignError::CapacityExceeded { offset, source })?;
                    trace!(
                        "padding array at {parent_ptr:?} with {} nulls",
                        idx - array.len()
                    );
                    array.resize(idx, Value::Null);
                }
                array.push(src);
                Ok(Assignment {
                    assigned: &mut array[idx],
                    assigned_to,
                    replaced: None,
                })
            }
            _ => Err(AssignError::Unreachable { offset }),
        }
    }

    #[cfg(test)]
    mod tests {
        use crate::{diagnostic::Diagnostic, Assign, Pointer, Resolve};
        use quickcheck_macros::quickcheck;
        use serde_json::{json, Value};

        fn ptr(s: &'static str) -> &'static Pointer {
            Pointer::from_static(s)
        }

        #[test]
        fn assign_object_member() {
            let mut data = json!({"foo": "bar"});

            let assignment = data.assign(ptr("/foo"), "baz").unwrap();
            assert_eq!(assignment.assigned, &json!("baz"));
            assert_eq!(assignment.assigned_to, "/foo");
            assert_eq!(assignment.replaced, Some(json!("bar")));

            let assignment = data.assign(ptr("/a~1b"), 1).unwrap();
            assert_eq!(assignment.replaced, None);
            assert_eq!(assignment.assigned_to, "/a~1b");
            assert_eq!(data, json!({"foo": "baz", "a/b": 1}));
        }

        #[test]
        fn assign_root() {
            let mut data = json!({"foo": "bar"});
            let assignment = data.assign(Pointer::root(), json!([1])).unwrap();
            assert_eq!(assignment.replaced, Some(json!({"foo": "bar"})));
            assert!(assignment.assigned_to.is_root());
            assert_eq!(data, json!([1]));
        }

        #[test]
        fn append() {
            let mut data = json!(["a", "b"]);
            let assignment = data.assign(ptr("/-"), "v").unwrap();
            assert_eq!(assignment.assigned_to, "/2");
            assert_eq!(assignment.replaced, None);
            assert_eq!(data, json!(["a", "b", "v"]));

            data.assign(ptr("/3"), "w").unwrap();
            assert_eq!(data, json!(["a", "b", "v", "w"]));
        }

        #[test]
        fn gap_fill() {
            let mut data = json!(["a", "b"]);
            let assignment = data.assign(ptr("/5"), "v").unwrap();
            assert_eq!(assignment.assigned_to, "/5");
            assert_eq!(data, json!(["a", "b", null, null, null, "v"]));
        }

        #[test]
        fn replace_element() {
            let mut data = json!(["a", "b"]);
            let assignment = data.assign(ptr("/0"), "z").unwrap();
            assert_eq!(assignment.replaced, Some(json!("a")));
            assert_eq!(data, json!(["z", "b"]));
        }

        #[test]
        fn nested_growth_is_visible_from_root() {
            let mut data = json!({"outer": {"list": [[0]]}});
            data.assign(ptr("/outer/list/0/-"), 1).unwrap();
            data.assign(ptr("/outer/list/0/4"), 4).unwrap();
            assert_eq!(
                data,
                json!({"outer": {"list": [[0, 1, null, null, 4]]}})
            );
        }

        #[test]
        fn build_document_step_by_step() {
            let mut doc = Value::Null;
            let steps = [
                ("", json!({})),
                ("/arr", json!([])),
                ("/arr/-", json!(3)),
                ("/arr/-", json!(2)),
                ("/arr/-", json!(1)),
                ("/obj", json!({})),
                ("/obj/str", json!("hello")),
                ("/obj/bool", json!(true)),
                ("/arr/-", json!(0)),
                ("/obj/", Value::Null),
            ];
            for (p, v) in steps {
                doc.assign(Pointer::parse(p).unwrap(), v).unwrap();
            }
            assert_eq!(
                doc.to_string(),
                r#"{"arr":[3,2,1,0],"obj":{"":null,"bool":true,"str":"hello"}}"#
            );
        }

        #[test]
        fn errors() {
            let mut data = json!({"list": [1], "scalar": 3, "nothing": null});

            let err = data.assign(ptr("/missing/x"), 1).unwrap_err();
            assert!(err.is_resolve());
            assert_eq!(err.offset(), 0);

            let err = data.assign(ptr("/list/x"), 1).unwrap_err();
            assert!(err.is_failed_to_parse_index());
            assert_eq!(err.offset(), 5);
            assert_eq!(err.prefix_len("/list/x"), 7);

            let err = data.assign(ptr("/scalar/x"), 1).unwrap_err();
            assert!(err.is_unreachable());
            assert_eq!(err.offset(), 7);
            assert_eq!(err.prefix_len("/scalar/x"), 7);

            let err = data.assign(ptr("/nothing/x"), 1).unwrap_err();
            assert!(err.is_unreachable());

            let err = data.assign(ptr("/list/5/x"), 1).unwrap_err();
            assert!(err.is_resolve());

            // nothing was modified
            assert_eq!(data, json!({"list": [1], "scalar": 3, "nothing": null}));
        }

        #[test]
        fn gap_fill_beyond_capacity() {
            let mut data = json!({"list": []});
            let subject = "/list/9223372036854775807";
            let err = data.assign(ptr(subject), 1).unwrap_err();
            assert!(err.is_capacity_exceeded());
            assert_eq!(err.offset(), 5);
            assert_eq!(err.prefix_len(subject), subject.len());
            assert_eq!(data, json!({"list": []}));
        }

        #[test]
        fn pointer_assign() {
            let mut data = json!({});
            let assignment = ptr("/k").assign(&mut data, "v").unwrap();
            *assignment.assigned = json!("w");
            assert_eq!(data, json!({"k": "w"}));
        }

        #[quickcheck]
        fn assigned_value_resolves(key: String, value: String) -> bool {
            let mut data = json!({"obj": {}, "arr": []});
            let mut obj_ptr = crate::PointerBuf::from_tokens(["obj"]);
            obj_ptr.push_back(&key);
            data.assign(&obj_ptr, value.clone()).unwrap();
            let arr_ptr = Pointer::from_static("/arr/-");
            let at = data.assign(arr_ptr, value.clone()).unwrap().assigned_to;
            data.resolve(&obj_ptr).unwrap() == &json!(value)
                && data.resolve(&at).unwrap() == &json!(value)
        }
    }
}
