//! Brazilian document number detection (CPF and CNPJ).
//!
//! Both patterns require the canonical punctuation and guard against
//! matching the middle of a longer digit run, so access keys and invoice
//! numbers are left alone.

use super::{Category, Detector};
use once_cell::sync::Lazy;
use regex::Regex;

/// Detector for formatted CPF and CNPJ numbers.
///
/// Matches `000.000.000-00` (CPF) and `00.000.000/0000-00` (CNPJ). The
/// digit guards around the entity are consumed by the pattern but sit
/// outside the capture group, so a glued label like `CPF:123.456.789-09`
/// still resolves to just the number.
#[derive(Debug, Clone)]
pub struct DocumentNumberDetector;

impl DocumentNumberDetector {
    pub fn new() -> Self {
        Self
    }

    /// CPF: 3.3.3-2 digit groups with mandatory punctuation.
    pub fn cpf() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            // This regex flavor has no lookahead; the trailing guard
            // consumes the boundary byte. Group 1 excludes it, and the
            // scanner resumes at the group end, so the same byte can
            // still open the next match's leading guard.
            Regex::new(r"(?:^|[^0-9])(\d{3}\.\d{3}\.\d{3}-\d{2})(?:[^0-9]|$)")
                .expect("Valid CPF regex")
        });
        &PATTERN
    }

    /// CNPJ: 2.3.3/4-2 digit groups with mandatory punctuation.
    pub fn cnpj() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?:^|[^0-9])(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})(?:[^0-9]|$)")
                .expect("Valid CNPJ regex")
        });
        &PATTERN
    }
}

impl Default for DocumentNumberDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for DocumentNumberDetector {
    fn category(&self) -> Category {
        Category::Documents
    }

    fn patterns(&self) -> Vec<&'static Regex> {
        vec![Self::cpf(), Self::cnpj()]
    }
}
