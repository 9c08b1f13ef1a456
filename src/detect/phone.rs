//! Brazilian phone number detection, strict mode.
//!
//! Accepts `(XX) XXXX-XXXX`, `(XX) XXXXX-XXXX`, `XX XXXXX-XXXX` and bare
//! `XXXX-XXXX` / `XXXXX-XXXX`. A match needs parentheses around the area
//! code or a dash in the subscriber number; pure digit runs never match,
//! keeping access keys and invoice numbers out of the phone tally.

use super::{Category, Detector};
use once_cell::sync::Lazy;
use regex::Regex;

/// Detector for formatted Brazilian phone numbers.
#[derive(Debug, Clone)]
pub struct PhoneDetector;

impl PhoneDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"(?:\(\d{2}\)\s?\d{4,5}[-\s]?\d{4})|(?:\d{2}\s\d{4,5}[-\s]\d{4})|(?:\b\d{4,5}-\d{4}\b)",
            )
            .expect("Valid phone regex")
        });
        &PATTERN
    }
}

impl Default for PhoneDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for PhoneDetector {
    fn category(&self) -> Category {
        Category::Phone
    }

    fn patterns(&self) -> Vec<&'static Regex> {
        vec![Self::regex()]
    }
}
