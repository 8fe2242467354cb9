//! Overlay document loading.
//!
//! An overlay is an INI-style document of `key=value` overrides. Loading
//! never fails for content reasons: malformed lines and duplicate keys are
//! collected as warnings and the run continues with the last valid
//! interpretation.

use std::collections::BTreeMap;
use std::fmt;

/// Key to override value, one entry per distinct trimmed key.
///
/// A `BTreeMap` so unused-key reporting comes out sorted without an extra
/// pass.
pub type OverlayMap = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarningKind {
    /// Line has no `=` separator and is not blank or a comment.
    InvalidLine { raw: String },
    /// Key already seen earlier in the overlay; the later value wins.
    DuplicateKey { key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    /// 1-based line number in the overlay document.
    pub line: usize,
    pub kind: LoadWarningKind,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LoadWarningKind::InvalidLine { raw } => {
                write!(f, "line {}: no '=' separator: \"{}\"", self.line, raw)
            }
            LoadWarningKind::DuplicateKey { key } => {
                write!(f, "line {}: duplicate key '{}' (last value wins)", self.line, key)
            }
        }
    }
}

/// Parse an overlay document into a key/value map.
///
/// Blank lines and lines whose trimmed form starts with `#` or `;` are
/// skipped. Everything up to the first `=` is the key (trimmed); everything
/// after it is the value, kept verbatim including surrounding whitespace and
/// embedded `=` characters. Warnings are ordered by line number.
pub fn load_overlay(text: &str) -> (OverlayMap, Vec<LoadWarning>) {
    let mut map = OverlayMap::new();
    let mut warnings = vec![];

    for (idx, raw) in crate::split_lines(text).iter().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        match raw.split_once('=') {
            Some((key, value)) => {
                let key = key.trim().to_string();
                if map.insert(key.clone(), value.to_string()).is_some() {
                    warnings.push(LoadWarning {
                        line,
                        kind: LoadWarningKind::DuplicateKey { key },
                    });
                }
            }
            None => warnings.push(LoadWarning {
                line,
                kind: LoadWarningKind::InvalidLine {
                    raw: (*raw).to_string(),
                },
            }),
        }
    }

    (map, warnings)
}
