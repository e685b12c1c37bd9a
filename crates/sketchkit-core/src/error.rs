//! Error handling for SketchKit
//!
//! Provides the error types shared by every layer of the sketch pipeline:
//! - Parse errors (malformed document text)
//! - Render errors (surface allocation, image encoding)
//! - Storage errors (named local documents)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Document parse error
///
/// Raised by the codec while decoding document text. The codec recovers from
/// these locally and hands back whatever it decoded before the failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The outer container is not a valid JSON sequence
    #[error("Invalid document container: {reason}")]
    InvalidContainer {
        /// Parser message for the container failure.
        reason: String,
    },

    /// A record is not an object or lacks a `type` tag
    #[error("Record {index} is malformed: {reason}")]
    InvalidRecord {
        /// Zero-based index of the record in the document.
        index: usize,
        /// Why the record was rejected.
        reason: String,
    },

    /// A required field is absent
    #[error("Record {index} ({shape}) is missing field '{field}'")]
    MissingField {
        /// Zero-based index of the record in the document.
        index: usize,
        /// Wire name of the shape type.
        shape: String,
        /// The missing field name.
        field: &'static str,
    },

    /// A coordinate token could not be read
    #[error("Invalid coordinate '{token}': {reason}")]
    InvalidCoordinate {
        /// The offending vertex token.
        token: String,
        /// Why the token was rejected.
        reason: String,
    },

    /// The shape does not carry the number of points its type requires
    #[error("Shape '{shape}' needs {expected} point(s), found {found}")]
    PointCount {
        /// Wire name of the shape type.
        shape: String,
        /// Required number of points.
        expected: usize,
        /// Number of points actually present.
        found: usize,
    },

    /// A path command string could not be read
    #[error("Invalid path data at '{fragment}': {reason}")]
    InvalidPathData {
        /// The remaining, unparsed fragment of the command string.
        fragment: String,
        /// Why the command was rejected.
        reason: String,
    },
}

/// Rendering error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The target surface could not be allocated
    #[error("Cannot allocate a {width}x{height} surface")]
    SurfaceAllocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The rendered image could not be encoded
    #[error("Image encoding failed: {0}")]
    Encoding(String),
}

/// Local document store error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// No document is stored under the requested name
    #[error("No local document named '{0}'")]
    NotFound(String),

    /// Document names must not be empty
    #[error("Document name must not be empty")]
    EmptyName,

    /// The backing store could not be read
    #[error("Local store is corrupted: {0}")]
    Corrupted(String),
}

/// Main error type for SketchKit
///
/// Unified error type that can represent any error in the system.
#[derive(Error, Debug)]
pub enum Error {
    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error came from decoding document text
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

/// Result type for SketchKit operations
pub type Result<T> = std::result::Result<T, Error>;
