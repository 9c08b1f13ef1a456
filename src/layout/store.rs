//! Per-page fragment collection.

use super::{Fragment, FragmentId};
use std::collections::HashMap;

/// Ordered, append-only collection of the fragments on one page.
///
/// Iteration follows insertion order, which is token order as produced by
/// the document backend; that approximates reading order and is what the
/// scanner concatenates. Lookup by id is O(1).
#[derive(Debug, Default)]
pub struct FragmentStore {
    page: usize,
    fragments: Vec<Fragment>,
    by_id: HashMap<FragmentId, usize>,
}

impl FragmentStore {
    pub fn new(page: usize) -> Self {
        Self {
            page,
            fragments: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Appends a fragment, keeping the first entry on id collision.
    ///
    /// Two tokens landing on the same quantized position produce the same
    /// id; the earlier fragment wins the index so lookups stay stable.
    pub fn push(&mut self, fragment: Fragment) {
        let index = self.fragments.len();
        self.by_id.entry(fragment.id).or_insert(index);
        self.fragments.push(fragment);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get(&self, id: &FragmentId) -> Option<&Fragment> {
        self.by_id.get(id).map(|&i| &self.fragments[i])
    }

    /// Fragments in layout order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    /// First fragment containing the display-space point, in layout order.
    pub fn fragment_at(&self, x: f32, y: f32) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.contains(x, y))
    }
}
