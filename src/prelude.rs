//! Exposes the traits `Assign`, `Resolve`, `ResolveMut`, `ResolveEncoded` and
//! `Diagnose` if enabled.
#[cfg(feature = "assign")]
pub use crate::assign::Assign;
pub use crate::diagnostic::{Diagnose, Diagnostic};
#[cfg(feature = "resolve")]
pub use crate::resolve::{Resolve, ResolveMut};
#[cfg(all(feature = "json", feature = "resolve"))]
pub use crate::stream::ResolveEncoded;
pub use crate::{Pointer, PointerBuf, Token};
