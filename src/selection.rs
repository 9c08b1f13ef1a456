//! Selection state: which fragments are slated for redaction.
//!
//! Selections are keyed by deterministic fragment id, so toggling is
//! idempotent across re-renders of the same page at the same scale. Each
//! selection remembers whether a detector or the operator put it there.

use crate::detect::Category;
use crate::layout::{Fragment, FragmentId};
use std::collections::HashMap;

/// A fragment marked for redaction, with geometry snapshotted at insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub id: FragmentId,
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// True when a detector created this selection rather than a click
    pub automatic: bool,
}

/// Per-category entity counts from the most recent scans.
///
/// Re-scanning a category replaces its count; different categories
/// accumulate independently into the total.
#[derive(Debug, Clone, Default)]
pub struct DetectionStats {
    found: HashMap<Category, usize>,
}

impl DetectionStats {
    /// Zeroes a category before its scan starts.
    pub fn reset(&mut self, category: Category) {
        self.found.insert(category, 0);
    }

    /// Adds to a category's running count.
    pub fn record(&mut self, category: Category, count: usize) {
        *self.found.entry(category).or_insert(0) += count;
    }

    /// Last scan result for a category, zero if never scanned.
    pub fn get(&self, category: Category) -> usize {
        self.found.get(&category).copied().unwrap_or(0)
    }

    /// Sum of the last scan result of every category.
    pub fn total(&self) -> usize {
        self.found.values().sum()
    }

    pub fn clear(&mut self) {
        self.found.clear();
    }
}

/// The set of selections plus the detection tallies feeding the count.
#[derive(Debug, Default)]
pub struct SelectionModel {
    selected: HashMap<FragmentId, Selection>,
    stats: DetectionStats,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles a fragment's membership in the redaction set.
    ///
    /// An existing selection is removed outright, no tombstone. Otherwise
    /// a new selection snapshots the fragment's current geometry and is
    /// tagged with the call's origin. Returns whether the fragment is
    /// selected after the call.
    pub fn toggle(&mut self, fragment: &Fragment, automatic: bool) -> bool {
        if self.selected.remove(&fragment.id).is_some() {
            return false;
        }
        self.selected.insert(
            fragment.id,
            Selection {
                id: fragment.id,
                page: fragment.page,
                x: fragment.x,
                y: fragment.y,
                w: fragment.w,
                h: fragment.h,
                automatic,
            },
        );
        true
    }

    pub fn is_selected(&self, id: &FragmentId) -> bool {
        self.selected.contains_key(id)
    }

    pub fn get(&self, id: &FragmentId) -> Option<&Selection> {
        self.selected.get(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.selected.values()
    }

    /// Selections on one page, for export-time painting.
    pub fn on_page(&self, page: usize) -> impl Iterator<Item = &Selection> {
        self.selected.values().filter(move |s| s.page == page)
    }

    /// The headline count shown to the operator.
    ///
    /// Sum of each category's last scan result plus the manual selections.
    /// A manual click on a fragment a scan already tallied is under-counted
    /// by one; the original UI behaves this way and callers rely on the
    /// scan tallies staying authoritative for their categories.
    pub fn count(&self) -> usize {
        let manual = self.selected.values().filter(|s| !s.automatic).count();
        self.stats.total() + manual
    }

    /// Empties the selection set and unsets every detection tally.
    pub fn clear_all(&mut self) {
        self.selected.clear();
        self.stats.clear();
    }

    pub fn stats(&self) -> &DetectionStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut DetectionStats {
        &mut self.stats
    }
}
