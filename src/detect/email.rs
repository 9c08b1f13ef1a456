//! Email address detection.

use super::{Category, Detector};
use once_cell::sync::Lazy;
use regex::Regex;

/// Detector for email addresses.
///
/// No capture group: the whole match is the entity.
#[derive(Debug, Clone)]
pub struct EmailDetector;

impl EmailDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w{2,}").expect("Valid email regex"));
        &PATTERN
    }
}

impl Default for EmailDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for EmailDetector {
    fn category(&self) -> Category {
        Category::Email
    }

    fn patterns(&self) -> Vec<&'static Regex> {
        vec![Self::regex()]
    }
}
