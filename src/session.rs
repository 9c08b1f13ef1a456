//! A loaded document and its redaction state.
//!
//! The session owns the per-page fragment stores and the selection model
//! for the lifetime of the loaded document. Tokens from the source are
//! consumed during load and not retained.

use crate::backend::{DocumentAssembler, DocumentSource, PageRenderer, Viewport};
use crate::detect::{Detector, PatternScanner};
use crate::error::{TarjaError, TarjaResult};
use crate::export::{ExportOptions, RedactionRasterizer};
use crate::layout::{Fragment, FragmentStore, GeometryExpander};
use crate::selection::SelectionModel;

/// In-memory state of one loaded document.
pub struct Session {
    pages: Vec<FragmentStore>,
    viewports: Vec<Viewport>,
    selections: SelectionModel,
    display_scale: f32,
}

impl Session {
    /// Loads a document, deriving hit-testable fragments for every page.
    ///
    /// A load failure discards everything; there is no partially loaded
    /// session.
    pub fn load<S: DocumentSource + ?Sized>(source: &S, display_scale: f32) -> TarjaResult<Self> {
        if !(display_scale > 0.0) {
            return Err(TarjaError::InvalidInput {
                parameter: "display_scale".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let expander = GeometryExpander::new();
        let page_count = source.page_count()?;
        let mut pages = Vec::with_capacity(page_count);
        let mut viewports = Vec::with_capacity(page_count);

        for page in 0..page_count {
            viewports.push(source.viewport(page, display_scale)?);

            let mut store = FragmentStore::new(page);
            for token in source.tokens(page, display_scale)? {
                for fragment in expander.expand(&token, page, display_scale) {
                    store.push(fragment);
                }
            }
            pages.push(store);
        }

        Ok(Self {
            pages,
            viewports,
            selections: SelectionModel::new(),
            display_scale,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn display_scale(&self) -> f32 {
        self.display_scale
    }

    pub fn fragments(&self, page: usize) -> Option<&FragmentStore> {
        self.pages.get(page)
    }

    pub fn viewport(&self, page: usize) -> Option<&Viewport> {
        self.viewports.get(page)
    }

    pub fn selections(&self) -> &SelectionModel {
        &self.selections
    }

    /// Headline selection count (scan tallies plus manual selections).
    pub fn selection_count(&self) -> usize {
        self.selections.count()
    }

    /// Manually toggles the fragment under a display-space point.
    ///
    /// Returns the fragment's selection state after the toggle, or `None`
    /// when the point hits no fragment.
    pub fn toggle_at(&mut self, page: usize, x: f32, y: f32) -> Option<bool> {
        let viewport = self.viewports.get(page)?;
        if x < 0.0 || y < 0.0 || x > viewport.width || y > viewport.height {
            return None;
        }

        let fragment = self.pages.get(page)?.fragment_at(x, y)?.clone();
        Some(self.selections.toggle(&fragment, false))
    }

    /// Toggles a specific fragment manually.
    pub fn toggle_fragment(&mut self, fragment: &Fragment) -> bool {
        self.selections.toggle(fragment, false)
    }

    /// Runs one detector category over every page.
    ///
    /// The category's tally is zeroed first, then each pattern scans each
    /// page in order; the summed match count becomes the new tally and is
    /// returned. Fragments a previous scan already selected stay selected.
    pub fn run_detector(&mut self, detector: &dyn Detector) -> usize {
        let category = detector.category();
        self.selections.stats_mut().reset(category);

        let mut found = 0;
        for pattern in detector.patterns() {
            for store in &self.pages {
                found += PatternScanner::scan_page(store, &mut self.selections, pattern);
            }
        }

        self.selections.stats_mut().record(category, found);
        found
    }

    /// Drops every selection and unsets all detection tallies.
    pub fn clear_selections(&mut self) {
        self.selections.clear_all();
    }

    /// Exports the document with all selections burned in.
    ///
    /// See [`RedactionRasterizer::export`] for the sequencing and
    /// atomicity guarantees.
    pub fn export<R, A, F>(
        &self,
        renderer: &mut R,
        assembler: &mut A,
        output_scale: f32,
        progress: F,
    ) -> TarjaResult<Vec<u8>>
    where
        R: PageRenderer + ?Sized,
        A: DocumentAssembler + ?Sized,
        F: FnMut(usize, usize),
    {
        let options = ExportOptions {
            display_scale: self.display_scale,
            output_scale,
        };
        RedactionRasterizer::export(
            &self.selections,
            self.pages.len(),
            &options,
            renderer,
            assembler,
            progress,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TextToken;
    use crate::detect::DocumentNumberDetector;

    struct StaticSource {
        pages: Vec<Vec<TextToken>>,
    }

    impl DocumentSource for StaticSource {
        fn page_count(&self) -> TarjaResult<usize> {
            Ok(self.pages.len())
        }

        fn viewport(&self, _page: usize, scale: f32) -> TarjaResult<Viewport> {
            Ok(Viewport {
                width: 600.0 * scale,
                height: 800.0 * scale,
                scale,
            })
        }

        fn tokens(&self, page: usize, _scale: f32) -> TarjaResult<Vec<TextToken>> {
            Ok(self.pages[page].clone())
        }
    }

    fn token(text: &str, x: f32, y: f32, width: f32) -> TextToken {
        TextToken {
            text: text.to_string(),
            transform: [12.0, 0.0, 0.0, 12.0, x, y],
            width,
        }
    }

    fn source() -> StaticSource {
        StaticSource {
            pages: vec![
                vec![
                    token("Cliente: Maria", 10.0, 50.0, 140.0),
                    token("CPF: 123.456.789-09", 10.0, 80.0, 190.0),
                ],
                vec![token("page two", 10.0, 50.0, 80.0)],
            ],
        }
    }

    #[test]
    fn test_load_builds_fragments_per_page() {
        let session = Session::load(&source(), 1.0).unwrap();
        assert_eq!(session.page_count(), 2);
        assert_eq!(session.fragments(0).unwrap().len(), 4);
        assert_eq!(session.fragments(1).unwrap().len(), 2);
    }

    #[test]
    fn test_load_rejects_bad_scale() {
        assert!(Session::load(&source(), 0.0).is_err());
        assert!(Session::load(&source(), -1.5).is_err());
    }

    #[test]
    fn test_toggle_at_hits_fragment() {
        let mut session = Session::load(&source(), 1.0).unwrap();
        let frag = session.fragments(0).unwrap().fragments()[0].clone();
        let (cx, cy) = (frag.x + frag.w / 2.0, frag.y + frag.h / 2.0);

        assert_eq!(session.toggle_at(0, cx, cy), Some(true));
        assert_eq!(session.toggle_at(0, cx, cy), Some(false));
        assert_eq!(session.toggle_at(0, 5000.0, 5000.0), None);
    }

    #[test]
    fn test_run_detector_updates_tally() {
        let mut session = Session::load(&source(), 1.0).unwrap();
        let found = session.run_detector(&DocumentNumberDetector::new());
        assert_eq!(found, 1);
        assert_eq!(session.selection_count(), 1);

        // Re-running replaces the tally instead of accumulating
        let again = session.run_detector(&DocumentNumberDetector::new());
        assert_eq!(again, 1);
        assert_eq!(session.selection_count(), 1);
    }

    #[test]
    fn test_clear_selections() {
        let mut session = Session::load(&source(), 1.0).unwrap();
        session.run_detector(&DocumentNumberDetector::new());
        session.clear_selections();
        assert_eq!(session.selection_count(), 0);
        assert!(session.selections().is_empty());
    }
}
