//! Errors produced while decoding a manifest.

use std::path::PathBuf;

/// The category of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The payload is not valid JSON.
    Syntax,
    /// A known field holds a value of the wrong structural type.
    Shape,
    /// The payload could not be read.
    Io,
}

/// Error type for manifest decoding failures.
///
/// Every error is terminal for a single decode call: no partially decoded
/// manifest is ever returned alongside it.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DecodeError {
    /// The payload is not valid JSON.
    #[error("manifest is not valid JSON")]
    #[diagnostic(
        code(manifest::syntax),
        help("check for trailing commas, unquoted keys or a truncated file")
    )]
    Syntax {
        /// The underlying parser error, carrying line and column.
        #[source]
        source: serde_json::Error,
    },

    /// A known field holds a value of the wrong structural type.
    #[error("unexpected shape for `{}`", .field.as_deref().unwrap_or("<root>"))]
    #[diagnostic(code(manifest::shape))]
    Shape {
        /// Dotted path of the offending field, or `None` when the payload
        /// root itself is not an object.
        field: Option<String>,
        /// The underlying mismatch reported by the decoder.
        #[source]
        source: serde_json::Error,
    },

    /// The manifest file could not be read.
    #[error("failed to read manifest at {}", .path.display())]
    #[diagnostic(code(manifest::io))]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl DecodeError {
    pub(crate) fn shape(field: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Shape {
            field: Some(field.into()),
            source,
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::Shape { .. } => ErrorKind::Shape,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Returns the offending field for [`ErrorKind::Shape`] errors.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Shape { field, .. } => field.as_deref(),
            Self::Syntax { .. } | Self::Io { .. } => None,
        }
    }
}
