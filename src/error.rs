//! Error types for the rasterizing redaction pipeline.
//!
//! Failures are grouped by pipeline stage. Export errors carry the page
//! they occurred on so the caller can report it; the export itself is
//! always abandoned as a whole, never partially emitted.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for redaction operations.
pub type TarjaResult<T> = Result<T, TarjaError>;

/// Error type covering document load, scanning, and export.
#[derive(Debug)]
pub enum TarjaError {
    /// Error occurred while reading or writing files
    Io { path: PathBuf, source: io::Error },

    /// Input document could not be opened or parsed
    Load {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Page rendering failed during export (1-based page number)
    Render {
        page: usize,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Output document assembly or image encoding failed
    Assemble {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Export was requested with an empty selection set
    NothingSelected,

    /// Invalid configuration or parameters
    InvalidInput { parameter: String, reason: String },

    /// Backend-specific error (MuPDF, lopdf, etc.)
    Backend {
        backend: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl fmt::Display for TarjaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "IO error for path '{}': {}", path.display(), source)
            }
            Self::Load { message, .. } => {
                write!(f, "Failed to load document: {}", message)
            }
            Self::Render { page, message, .. } => {
                write!(f, "Rendering failed on page {}: {}", page, message)
            }
            Self::Assemble { message, .. } => {
                write!(f, "Output assembly failed: {}", message)
            }
            Self::NothingSelected => {
                write!(f, "Nothing selected for redaction")
            }
            Self::InvalidInput { parameter, reason } => {
                write!(f, "Invalid input for '{}': {}", parameter, reason)
            }
            Self::Backend {
                backend, message, ..
            } => {
                write!(f, "{} backend error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for TarjaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Load { source, .. }
            | Self::Render { source, .. }
            | Self::Assemble { source, .. }
            | Self::Backend { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

// Conversion implementations for common error types
impl From<io::Error> for TarjaError {
    fn from(err: io::Error) -> Self {
        Self::Backend {
            backend: "std::io".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<lopdf::Error> for TarjaError {
    fn from(err: lopdf::Error) -> Self {
        Self::Assemble {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
