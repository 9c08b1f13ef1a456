//! Token-to-fragment geometry expansion.
//!
//! Raw tokens sit exactly on the glyph box, which makes poor click
//! targets and leaves ascenders, descenders and accents uncovered by a
//! painted rectangle. The expander grows each box vertically and
//! horizontally and splits tokens on whitespace so a selection never
//! spans a gap between words.

use super::{Fragment, FragmentId};
use crate::backend::TextToken;

/// Converts one positioned text token into zero or more hit-box fragments.
///
/// Per-character width is approximated as `token.width / char_count`,
/// uniform across the token. Fragments are hit-test targets only, so the
/// approximation is acceptable; the painted redaction box inherits the
/// same expanded geometry and errs on the side of covering too much.
#[derive(Debug, Clone)]
pub struct GeometryExpander {
    /// Multiplier on the font height, covers accents and descenders
    expansion_factor: f32,
    /// Extra width in display pixels, split evenly between both edges
    width_buffer: f32,
    /// Fraction of the visual height the box is raised above the baseline
    vertical_offset: f32,
}

impl GeometryExpander {
    pub fn new() -> Self {
        Self {
            expansion_factor: 1.6,
            width_buffer: 9.0,
            vertical_offset: 0.90,
        }
    }

    /// Expands a token into fragments at the given page and display scale.
    ///
    /// Whitespace runs advance the horizontal cursor but never become
    /// fragments. Empty or whitespace-only tokens yield nothing; this is
    /// not an error.
    pub fn expand(&self, token: &TextToken, page: usize, scale: f32) -> Vec<Fragment> {
        let char_count = token.text.chars().count();
        if char_count == 0 || token.text.trim().is_empty() {
            return Vec::new();
        }

        let t = &token.transform;
        // Font height from the scale components of the transform
        let font_height = (t[0] * t[0] + t[1] * t[1]).sqrt();
        let total_width = token.width * scale;
        let char_spacing = total_width / char_count as f32;
        let visual_height = font_height * self.expansion_factor;

        let baseline_x = t[4];
        let baseline_y = t[5];

        let mut fragments = Vec::new();
        let mut cursor = 0.0f32;

        for (run, is_whitespace) in split_runs(&token.text) {
            let raw_width = run.chars().count() as f32 * char_spacing;
            if is_whitespace {
                cursor += raw_width;
                continue;
            }

            // Center the width buffer around the run
            let x = baseline_x + cursor - self.width_buffer / 2.0;
            let y = baseline_y - visual_height * self.vertical_offset;
            fragments.push(Fragment {
                id: FragmentId::new(page, x, y),
                page,
                text: run.to_string(),
                x,
                y,
                w: raw_width + self.width_buffer,
                h: visual_height,
            });
            cursor += raw_width;
        }

        fragments
    }
}

impl Default for GeometryExpander {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits text into alternating runs, tagging each as whitespace or not.
fn split_runs(text: &str) -> Vec<(&str, bool)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        match current {
            Some(kind) if kind == is_ws => {}
            Some(kind) => {
                runs.push((&text[start..idx], kind));
                start = idx;
                current = Some(is_ws);
            }
            None => current = Some(is_ws),
        }
    }
    if let Some(kind) = current {
        runs.push((&text[start..], kind));
    }
    runs
}
