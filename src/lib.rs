//! Rasterizing PDF redaction library.
//!
//! This library blacks out sensitive text in PDF documents the blunt way:
//! every page of the output is a flattened raster image with opaque boxes
//! burned into the pixels. Nothing selectable or extractable survives
//! underneath a redaction, which is the point.
//!
//! # Features
//!
//! - **Hit-testable text layer**: positioned tokens become expanded,
//!   click-friendly fragments with deterministic ids
//! - **Automatic detection**: CPF/CNPJ document numbers, email addresses
//!   and Brazilian phone numbers, including entities split across tokens
//! - **Manual selection**: idempotent toggling by page coordinate
//! - **Irreversible export**: fresh high-resolution render per page,
//!   painted and flattened to an image-only output document
//!
//! # Architecture
//!
//! - [`layout`]: token-to-fragment geometry and per-page stores
//! - [`detect`]: entity detectors and the provenance-tracking scanner
//! - [`selection`]: the redaction set and its accounting
//! - [`export`]: sequential, all-or-nothing page flattening
//! - [`backend`]: MuPDF source/renderer and lopdf output assembly
//! - [`error`]: pipeline error types
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use tarja::{DocumentNumberDetector, MupdfBackend, PdfAssembler, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut backend = MupdfBackend::open(Path::new("input.pdf"))?;
//! let mut session = Session::load(&backend, 1.5)?;
//!
//! let found = session.run_detector(&DocumentNumberDetector::new());
//! println!("{} document numbers found", found);
//!
//! let mut assembler = PdfAssembler::new();
//! let bytes = session.export(&mut backend, &mut assembler, 2.0, |_, _| {})?;
//! std::fs::write("redacted.pdf", bytes)?;
//! # Ok(())
//! # }
//! ```

// Public API
pub mod backend;
pub mod detect;
pub mod error;
pub mod export;
pub mod layout;
pub mod selection;
pub mod session;

// Re-exports for convenient access
pub use backend::{
    DocumentAssembler, DocumentSource, MupdfBackend, PageRenderer, PdfAssembler, TextToken,
    Viewport,
};
pub use detect::{Category, Detector, DocumentNumberDetector, EmailDetector, PhoneDetector};
pub use error::{TarjaError, TarjaResult};
pub use export::{ExportOptions, PageRaster, RedactionRasterizer};
pub use layout::{Fragment, FragmentId, FragmentStore, GeometryExpander};
pub use selection::{DetectionStats, Selection, SelectionModel};
pub use session::Session;
