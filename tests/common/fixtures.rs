//! Synthetic backends and builders for engine tests.

use tarja::{
    DocumentAssembler, DocumentSource, PageRaster, PageRenderer, TarjaError, TarjaResult,
    TextToken, Viewport,
};

/// Builds a positioned token with an axis-aligned 12pt transform.
pub fn token(text: &str, x: f32, y: f32, width: f32) -> TextToken {
    sized_token(text, 12.0, x, y, width)
}

pub fn sized_token(text: &str, size: f32, x: f32, y: f32, width: f32) -> TextToken {
    TextToken {
        text: text.to_string(),
        transform: [size, 0.0, 0.0, size, x, y],
        width,
    }
}

/// In-memory document source with hand-built token pages.
///
/// # Example
///
/// ```ignore
/// let source = FakeSource::new()
///     .with_page(vec![token("CPF: 123.456.789-09", 10.0, 50.0, 190.0)])
///     .with_page(vec![token("page two", 10.0, 50.0, 80.0)]);
/// let session = Session::load(&source, 1.0)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct FakeSource {
    pages: Vec<Vec<TextToken>>,
    page_width: f32,
    page_height: f32,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            page_width: 600.0,
            page_height: 800.0,
        }
    }

    pub fn with_page(mut self, tokens: Vec<TextToken>) -> Self {
        self.pages.push(tokens);
        self
    }

    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }
}

impl DocumentSource for FakeSource {
    fn page_count(&self) -> TarjaResult<usize> {
        Ok(self.pages.len())
    }

    fn viewport(&self, _page: usize, scale: f32) -> TarjaResult<Viewport> {
        Ok(Viewport {
            width: self.page_width * scale,
            height: self.page_height * scale,
            scale,
        })
    }

    fn tokens(&self, page: usize, _scale: f32) -> TarjaResult<Vec<TextToken>> {
        Ok(self.pages[page].clone())
    }
}

/// Renderer producing white pages of `base_size * scale` pixels.
#[derive(Debug, Clone)]
pub struct SolidRenderer {
    pub base_width: f32,
    pub base_height: f32,
}

impl SolidRenderer {
    pub fn new(base_width: f32, base_height: f32) -> Self {
        Self {
            base_width,
            base_height,
        }
    }
}

impl PageRenderer for SolidRenderer {
    fn render_page(&mut self, _page: usize, scale: f32) -> TarjaResult<PageRaster> {
        Ok(PageRaster::new(
            (self.base_width * scale) as usize,
            (self.base_height * scale) as usize,
        ))
    }
}

/// Renderer that fails on one page, for atomicity tests.
pub struct FailingRenderer {
    inner: SolidRenderer,
    /// 0-based page index that fails
    fail_on: usize,
    pub pages_rendered: usize,
}

impl FailingRenderer {
    pub fn new(fail_on: usize) -> Self {
        Self {
            inner: SolidRenderer::new(100.0, 100.0),
            fail_on,
            pages_rendered: 0,
        }
    }
}

impl PageRenderer for FailingRenderer {
    fn render_page(&mut self, page: usize, scale: f32) -> TarjaResult<PageRaster> {
        if page == self.fail_on {
            return Err(TarjaError::Render {
                page: page + 1,
                message: "synthetic rendering failure".to_string(),
                source: None,
            });
        }
        self.pages_rendered += 1;
        self.inner.render_page(page, scale)
    }
}

/// Assembler that keeps every appended raster for inspection.
#[derive(Debug, Default)]
pub struct CaptureAssembler {
    pub pages: Vec<PageRaster>,
    pub finished: bool,
}

impl CaptureAssembler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentAssembler for CaptureAssembler {
    fn append_page(&mut self, raster: &PageRaster, _output_scale: f32) -> TarjaResult<()> {
        self.pages.push(raster.clone());
        Ok(())
    }

    fn finish(&mut self) -> TarjaResult<Vec<u8>> {
        self.finished = true;
        Ok(format!("{} pages", self.pages.len()).into_bytes())
    }
}

/// Bounding box of non-white pixels as `(x0, y0, x1, y1)`, exclusive ends.
pub fn painted_bounds(raster: &PageRaster) -> Option<(usize, usize, usize, usize)> {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            if raster.pixel(x, y) != [0xff, 0xff, 0xff] {
                bounds = Some(match bounds {
                    None => (x, y, x + 1, y + 1),
                    Some((x0, y0, x1, y1)) => {
                        (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1))
                    }
                });
            }
        }
    }
    bounds
}
