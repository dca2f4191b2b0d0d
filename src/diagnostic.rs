//! Error reporting data structures and miette integration.
//!
//! Every error in this crate records a byte offset into the pointer which
//! caused it. A [`Report`] pairs the error with that pointer text so the
//! failing prefix can be shown:
//!
//! ```
//! # use jsonptr_stream::{diagnostic::Diagnose, Pointer};
//! let subject = "/abc/~/b";
//! let report = Pointer::parse(subject).diagnose(subject).unwrap_err();
//! assert_eq!(report.prefix(), "/abc/~");
//! ```

use alloc::string::String;
use core::{fmt, ops::Deref};

/// Implemented by errors which can be converted into a [`Report`].
pub trait Diagnostic: Sized {
    /// Combine the error with its subject to generate a [`Report`].
    fn into_report(self, subject: impl Into<String>) -> Report<Self> {
        Report {
            source: self,
            subject: subject.into(),
        }
    }

    /// The docs.rs URL for this error
    fn url() -> &'static str;

    /// Length, in bytes, of the leading part of `subject` which the error
    /// concerns.
    ///
    /// Errors about a token include that token; errors about reaching past a
    /// value stop just before the token which could not be reached.
    fn prefix_len(&self, subject: &str) -> usize;

    /// Returns the label for the given subject if applicable.
    fn label(&self, subject: &str) -> Option<Label>;
}

/// Byte offset of the end of the token whose leading `'/'` is at `offset`.
pub(crate) fn token_end(subject: &str, offset: usize) -> usize {
    subject
        .get(offset + 1..)
        .and_then(|rest| rest.find('/'))
        .map_or(subject.len(), |idx| offset + 1 + idx)
}

/// A label for a span within a json pointer or malformed string.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Label {
    text: String,
    offset: usize,
    len: usize,
}

impl Label {
    /// Creates a new instance of a [`Label`] from its parts
    pub fn new(text: String, offset: usize, len: usize) -> Self {
        Self { text, offset, len }
    }

    /// Label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the labeled span.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte length of the labeled span.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Label for the token starting at `offset`, up to the next separator.
    #[cfg(feature = "resolve")]
    pub(crate) fn token(text: impl Into<String>, subject: &str, offset: usize) -> Self {
        let end = token_end(subject, offset);
        Self::new(text.into(), offset, end.saturating_sub(offset))
    }
}

#[cfg(feature = "miette")]
impl From<Label> for miette::LabeledSpan {
    fn from(value: Label) -> Self {
        miette::LabeledSpan::new(Some(value.text), value.offset, value.len)
    }
}

/// An error wrapper which includes the pointer text which caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<D> {
    source: D,
    subject: String,
}

impl<D: Diagnostic> Report<D> {
    /// The pointer text which caused the error.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The error which occurred.
    pub fn original(&self) -> &D {
        &self.source
    }

    /// The part of the subject up to the failure.
    pub fn prefix(&self) -> &str {
        let end = self.source.prefix_len(&self.subject);
        self.subject.get(..end).unwrap_or(&self.subject)
    }

    /// The original parts of the [`Report`].
    pub fn decompose(self) -> (D, String) {
        (self.source, self.subject)
    }
}

impl<D> Deref for Report<D> {
    type Target = D;

    fn deref(&self) -> &Self::Target {
        &self.source
    }
}

impl<D: Diagnostic + fmt::Display> fmt::Display for Report<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.prefix(), self.source)
    }
}

#[cfg(feature = "std")]
impl<D> std::error::Error for Report<D>
where
    D: Diagnostic + fmt::Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(feature = "miette")]
impl<D> miette::Diagnostic for Report<D>
where
    D: Diagnostic + fmt::Debug + std::error::Error + 'static,
{
    fn url<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(D::url()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.subject)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let label = self.source.label(&self.subject)?;
        Some(Box::new(core::iter::once(label.into())))
    }
}

macro_rules! diagnostic_url {
    (enum $type:ident) => {
        $crate::diagnostic::diagnostic_url!("enum", $type)
    };
    (struct $type:ident) => {
        $crate::diagnostic::diagnostic_url!("struct", $type)
    };
    ($kind:literal, $type:ident) => {
        concat!(
            "https://docs.rs/jsonptr-stream/",
            env!("CARGO_PKG_VERSION"),
            "/jsonptr_stream/",
            $kind,
            ".",
            stringify!($type),
            ".html",
        )
    };
}
pub(crate) use diagnostic_url;

/// Attaches the subject to the error of a `Result`.
pub trait Diagnose<T> {
    /// The error type being reported.
    type Error: Diagnostic;

    /// Converts the error, if any, into a [`Report`] against `subject`.
    #[allow(clippy::missing_errors_doc)]
    fn diagnose(self, subject: impl Into<String>) -> Result<T, Report<Self::Error>>;

    /// Like [`Self::diagnose`], only computing the subject on failure.
    #[allow(clippy::missing_errors_doc)]
    fn diagnose_with<F, S>(self, f: F) -> Result<T, Report<Self::Error>>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> Diagnose<T> for Result<T, E>
where
    E: Diagnostic,
{
    type Error = E;

    fn diagnose(self, subject: impl Into<String>) -> Result<T, Report<Self::Error>> {
        self.map_err(|error| error.into_report(subject))
    }

    fn diagnose_with<F, S>(self, f: F) -> Result<T, Report<Self::Error>>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|error| error.into_report(f()))
    }
}
