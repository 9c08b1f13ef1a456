//! Export: burn selections into flattened page rasters.
//!
//! This is the one-way step. Each page is re-rendered from the source at
//! the output scale, selection rectangles are painted over the pixels,
//! and only the flattened image reaches the output document — no vector
//! or text layer survives underneath a redaction.

pub mod raster;

pub use raster::{PageRaster, REDACTION_FILL};

use crate::backend::{DocumentAssembler, PageRenderer};
use crate::error::{TarjaError, TarjaResult};
use crate::selection::SelectionModel;

/// Scales for interactive display and print-quality output.
///
/// Selections are recorded in display-scale coordinates; export paints
/// them multiplied by `output_scale / display_scale` onto the fresh
/// high-resolution render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub display_scale: f32,
    pub output_scale: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            display_scale: 1.5,
            output_scale: 2.0,
        }
    }
}

impl ExportOptions {
    fn validate(&self) -> TarjaResult<()> {
        if !(self.display_scale > 0.0) {
            return Err(TarjaError::InvalidInput {
                parameter: "display_scale".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if !(self.output_scale > 0.0) {
            return Err(TarjaError::InvalidInput {
                parameter: "output_scale".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Sequential, all-or-nothing page flattening.
pub struct RedactionRasterizer;

impl RedactionRasterizer {
    /// Exports every page with its selections burned in.
    ///
    /// Pages are processed strictly in order with a single raster buffer
    /// alive at a time. `progress` is called with `(page, total)` before
    /// each page renders. Any failure aborts the whole export; no partial
    /// document is ever produced. An empty selection set is rejected
    /// before rendering starts.
    pub fn export<R, A, F>(
        selections: &SelectionModel,
        page_count: usize,
        options: &ExportOptions,
        renderer: &mut R,
        assembler: &mut A,
        mut progress: F,
    ) -> TarjaResult<Vec<u8>>
    where
        R: PageRenderer + ?Sized,
        A: DocumentAssembler + ?Sized,
        F: FnMut(usize, usize),
    {
        if selections.is_empty() {
            return Err(TarjaError::NothingSelected);
        }
        options.validate()?;

        let ratio = options.output_scale / options.display_scale;

        for page in 0..page_count {
            progress(page + 1, page_count);

            let mut raster = renderer.render_page(page, options.output_scale)?;

            for selection in selections.on_page(page) {
                raster.fill_rect(
                    selection.x * ratio,
                    selection.y * ratio,
                    selection.w * ratio,
                    selection.h * ratio,
                    REDACTION_FILL,
                );
            }

            assembler.append_page(&raster, options.output_scale)?;
        }

        assembler.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Fragment, FragmentId};

    struct WhiteRenderer;

    impl PageRenderer for WhiteRenderer {
        fn render_page(&mut self, _page: usize, _scale: f32) -> TarjaResult<PageRaster> {
            Ok(PageRaster::new(20, 20))
        }
    }

    struct CountingAssembler {
        pages: usize,
    }

    impl DocumentAssembler for CountingAssembler {
        fn append_page(&mut self, _raster: &PageRaster, _scale: f32) -> TarjaResult<()> {
            self.pages += 1;
            Ok(())
        }

        fn finish(&mut self) -> TarjaResult<Vec<u8>> {
            Ok(vec![self.pages as u8])
        }
    }

    fn one_selection() -> SelectionModel {
        let mut model = SelectionModel::new();
        model.toggle(
            &Fragment {
                id: FragmentId::new(0, 2.0, 2.0),
                page: 0,
                text: "x".to_string(),
                x: 2.0,
                y: 2.0,
                w: 4.0,
                h: 4.0,
            },
            false,
        );
        model
    }

    #[test]
    fn test_empty_selection_rejected_before_rendering() {
        struct PanicRenderer;
        impl PageRenderer for PanicRenderer {
            fn render_page(&mut self, _: usize, _: f32) -> TarjaResult<PageRaster> {
                panic!("renderer must not be called");
            }
        }

        let result = RedactionRasterizer::export(
            &SelectionModel::new(),
            3,
            &ExportOptions::default(),
            &mut PanicRenderer,
            &mut CountingAssembler { pages: 0 },
            |_, _| {},
        );
        assert!(matches!(result, Err(TarjaError::NothingSelected)));
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let options = ExportOptions {
            display_scale: 0.0,
            output_scale: 2.0,
        };
        let result = RedactionRasterizer::export(
            &one_selection(),
            1,
            &options,
            &mut WhiteRenderer,
            &mut CountingAssembler { pages: 0 },
            |_, _| {},
        );
        assert!(matches!(result, Err(TarjaError::InvalidInput { .. })));
    }

    #[test]
    fn test_progress_reports_every_page_in_order() {
        let mut seen = Vec::new();
        RedactionRasterizer::export(
            &one_selection(),
            3,
            &ExportOptions {
                display_scale: 1.0,
                output_scale: 1.0,
            },
            &mut WhiteRenderer,
            &mut CountingAssembler { pages: 0 },
            |page, total| seen.push((page, total)),
        )
        .unwrap();
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }
}
