//! MuPDF-backed document source and page renderer.
//!
//! Tokens are derived from MuPDF's structured text, one token per line:
//! the line's text, a transform synthesized from the first character's
//! baseline origin and size, and the line width in page units. MuPDF
//! reports coordinates top-left origin, y down, which is the display
//! space the rest of the engine works in.

use std::path::Path;

use mupdf::{Colorspace, Document, Matrix, TextPageOptions};

use super::{DocumentSource, PageRenderer, TextToken, Viewport};
use crate::error::{TarjaError, TarjaResult};
use crate::export::raster::PageRaster;

/// Document access through MuPDF.
pub struct MupdfBackend {
    doc: Document,
}

impl MupdfBackend {
    /// Opens a document from disk.
    pub fn open(path: &Path) -> TarjaResult<Self> {
        // Surface missing or unreadable files as a plain IO error before
        // MuPDF gets involved
        std::fs::metadata(path).map_err(|source| TarjaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let path_str = path.to_str().ok_or_else(|| TarjaError::InvalidInput {
            parameter: "path".to_string(),
            reason: "Path contains invalid UTF-8".to_string(),
        })?;

        let doc = Document::open(path_str).map_err(|e| TarjaError::Load {
            message: format!("could not open '{}'", path.display()),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { doc })
    }

    fn load_page(&self, page: usize) -> TarjaResult<mupdf::Page> {
        self.doc
            .load_page(page as i32)
            .map_err(|e| TarjaError::Backend {
                backend: "MuPDF".to_string(),
                message: format!("failed to load page {}", page + 1),
                source: Some(Box::new(e)),
            })
    }
}

impl DocumentSource for MupdfBackend {
    fn page_count(&self) -> TarjaResult<usize> {
        let count = self.doc.page_count().map_err(|e| TarjaError::Load {
            message: "failed to read page count".to_string(),
            source: Some(Box::new(e)),
        })?;
        Ok(count as usize)
    }

    fn viewport(&self, page: usize, scale: f32) -> TarjaResult<Viewport> {
        let bounds = self
            .load_page(page)?
            .bounds()
            .map_err(|e| TarjaError::Backend {
                backend: "MuPDF".to_string(),
                message: format!("failed to read bounds of page {}", page + 1),
                source: Some(Box::new(e)),
            })?;

        Ok(Viewport {
            width: (bounds.x1 - bounds.x0) * scale,
            height: (bounds.y1 - bounds.y0) * scale,
            scale,
        })
    }

    fn tokens(&self, page: usize, scale: f32) -> TarjaResult<Vec<TextToken>> {
        let text_page = self
            .load_page(page)?
            .to_text_page(TextPageOptions::empty())
            .map_err(|e| TarjaError::Backend {
                backend: "MuPDF".to_string(),
                message: format!("failed to extract text from page {}", page + 1),
                source: Some(Box::new(e)),
            })?;

        let mut tokens = Vec::new();

        for block in text_page.blocks() {
            for line in block.lines() {
                let mut text = String::new();
                let mut origin = None;
                let mut size = 0.0f32;

                for ch in line.chars() {
                    if let Some(c) = ch.char() {
                        if origin.is_none() {
                            origin = Some(ch.origin());
                            size = ch.size();
                        }
                        text.push(c);
                    }
                }

                let origin = match origin {
                    Some(o) => o,
                    None => continue,
                };

                let bounds = line.bounds();
                tokens.push(TextToken {
                    text,
                    transform: [
                        size * scale,
                        0.0,
                        0.0,
                        size * scale,
                        origin.x * scale,
                        origin.y * scale,
                    ],
                    width: bounds.x1 - bounds.x0,
                });
            }
        }

        Ok(tokens)
    }
}

impl PageRenderer for MupdfBackend {
    fn render_page(&mut self, page: usize, scale: f32) -> TarjaResult<PageRaster> {
        let mupdf_page = self.load_page(page)?;
        let matrix = Matrix::new_scale(scale, scale);

        let pixmap = mupdf_page
            .to_pixmap(&matrix, &Colorspace::device_rgb(), false, false)
            .map_err(|e| TarjaError::Render {
                page: page + 1,
                message: "pixmap rendering failed".to_string(),
                source: Some(Box::new(e)),
            })?;

        let width = pixmap.width() as usize;
        let height = pixmap.height() as usize;
        let components = pixmap.n() as usize;
        let samples = pixmap.samples();

        let pixels = match components {
            3 => samples.to_vec(),
            4 => {
                // RGBA: drop the alpha channel
                let mut rgb = Vec::with_capacity(width * height * 3);
                for px in samples.chunks_exact(4) {
                    rgb.extend_from_slice(&px[..3]);
                }
                rgb
            }
            n => {
                return Err(TarjaError::Render {
                    page: page + 1,
                    message: format!("unexpected pixmap format with {} components", n),
                    source: None,
                })
            }
        };

        PageRaster::from_rgb(width, height, pixels)
    }
}
