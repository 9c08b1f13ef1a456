//! Collaborator seams between the engine and the document format.
//!
//! Parsing a PDF into positioned tokens, rasterizing a page to pixels and
//! assembling flattened images into an output document are delegated to
//! these traits. The engine never touches the format directly, which
//! keeps selection, scanning and export logic testable against synthetic
//! implementations.

pub mod mupdf;
pub mod pdf_writer;

pub use self::mupdf::MupdfBackend;
pub use pdf_writer::PdfAssembler;

use crate::error::TarjaResult;
use crate::export::raster::PageRaster;

/// One positioned text run as produced by the document backend.
///
/// `transform` is the display-space affine matrix `[a b c d e f]`, already
/// composed with the requested scale; `(e, f)` is the baseline origin and
/// the norm of `(a, b)` is the font height. `width` is the measured run
/// width in page units, unscaled.
#[derive(Debug, Clone, PartialEq)]
pub struct TextToken {
    pub text: String,
    pub transform: [f32; 6],
    pub width: f32,
}

/// Display-space page dimensions at a given scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

/// Read side: page count, per-page viewport and token stream.
pub trait DocumentSource {
    fn page_count(&self) -> TarjaResult<usize>;

    fn viewport(&self, page: usize, scale: f32) -> TarjaResult<Viewport>;

    /// Tokens in layout order. Consumed once per page during load.
    fn tokens(&self, page: usize, scale: f32) -> TarjaResult<Vec<TextToken>>;
}

/// Renders one page to RGB pixels at an arbitrary scale.
pub trait PageRenderer {
    fn render_page(&mut self, page: usize, scale: f32) -> TarjaResult<PageRaster>;
}

/// Write side: receives flattened pages strictly in order.
pub trait DocumentAssembler {
    /// Appends one painted page. `output_scale` relates raster pixels to
    /// the final page dimensions: a page is `pixels / output_scale` units.
    fn append_page(&mut self, raster: &PageRaster, output_scale: f32) -> TarjaResult<()>;

    /// Finalizes and returns the assembled document bytes.
    fn finish(&mut self) -> TarjaResult<Vec<u8>>;
}
