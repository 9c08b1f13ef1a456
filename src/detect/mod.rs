//! Entity detectors and the page scanner that drives them.
//!
//! Detectors are plain regex bundles grouped into categories. The scanner
//! rebuilds a page's contiguous text from its fragments, keeps a
//! per-character back-reference to the owning fragment, and selects every
//! fragment a match touches — so an entity split across adjacent tokens
//! is still caught as one match.

pub mod documents;
pub mod email;
pub mod phone;

pub use documents::DocumentNumberDetector;
pub use email::EmailDetector;
pub use phone::PhoneDetector;

use crate::layout::FragmentStore;
use crate::selection::SelectionModel;
use regex::Regex;

/// Detector categories, each with an independent found-count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Brazilian document numbers (CPF, CNPJ)
    Documents,
    Email,
    Phone,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Documents, Category::Email, Category::Phone];

    pub fn label(self) -> &'static str {
        match self {
            Category::Documents => "documents",
            Category::Email => "email",
            Category::Phone => "phone",
        }
    }
}

/// A named set of patterns scanned as one category.
///
/// Patterns with a capture group are narrowed to group 1 during
/// resolution; boundary context the pattern had to consume (a label, a
/// digit guard) is then excluded from the selected span.
pub trait Detector: Send + Sync {
    fn category(&self) -> Category;

    /// Patterns run sequentially; their match counts sum into the category.
    fn patterns(&self) -> Vec<&'static Regex>;
}

/// Scans reconstructed page text and resolves matches back to fragments.
pub struct PatternScanner;

impl PatternScanner {
    /// Runs one pattern over one page, selecting matched fragments.
    ///
    /// Returns the number of matches found, not the number of fragments
    /// touched. Fragments already selected are left alone, which makes
    /// re-scanning idempotent: a second identical scan reports the same
    /// count and changes nothing.
    ///
    /// The search resumes at the end of each resolved entity, not at the
    /// end of the full match. Guard patterns consume a boundary character
    /// after the entity; that character must stay available as the next
    /// match's leading boundary, or back-to-back entities separated by a
    /// single character would be skipped.
    pub fn scan_page(
        store: &FragmentStore,
        selections: &mut SelectionModel,
        pattern: &Regex,
    ) -> usize {
        if store.is_empty() {
            return 0;
        }

        let (full_text, owners) = Self::project(store);
        let fragments = store.fragments();
        let mut found = 0;
        let mut pos = 0;

        while pos <= full_text.len() {
            let caps = match pattern.captures_at(&full_text, pos) {
                Some(caps) => caps,
                None => break,
            };
            let whole = match caps.get(0) {
                Some(whole) => whole,
                None => break,
            };
            found += 1;

            // Narrow to the capture group when the pattern has one
            let span = caps.get(1).unwrap_or(whole);

            // Invariant: the provenance map covers every byte of the text
            debug_assert!(span.end() <= owners.len());

            let mut last_owner = None;
            for byte in span.start()..span.end() {
                let owner = owners[byte];
                if last_owner == Some(owner) {
                    continue;
                }
                last_owner = Some(owner);

                let fragment = &fragments[owner];
                if !selections.is_selected(&fragment.id) {
                    selections.toggle(fragment, true);
                }
            }

            pos = span.end().max(whole.start() + 1);
        }

        found
    }

    /// Flattens a page into one string plus a byte-to-fragment map.
    ///
    /// Fragment text is whitespace-free by construction, so concatenation
    /// joins words that were only visually separated. Each character
    /// contributes `len_utf8` map entries, aligning the map with the byte
    /// offsets the regex engine reports.
    fn project(store: &FragmentStore) -> (String, Vec<usize>) {
        let mut full_text = String::new();
        let mut owners = Vec::new();

        for (index, fragment) in store.iter().enumerate() {
            for ch in fragment.text.chars() {
                owners.resize(owners.len() + ch.len_utf8(), index);
                full_text.push(ch);
            }
        }

        debug_assert_eq!(full_text.len(), owners.len());
        (full_text, owners)
    }
}
