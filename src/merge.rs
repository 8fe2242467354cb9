//! Line-by-line merge of a base document against an overlay map.
//!
//! The merger streams the base document once. Lines with a key present in
//! the overlay are rewritten with the override value; every other line is
//! copied through verbatim, so comments, blank lines and section headers
//! survive byte-for-byte in their original order.

use regex::Regex;
use std::collections::BTreeSet;

use crate::overlay::OverlayMap;

/// Classification of one base-document line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    /// Whitespace-only line.
    Blank,
    /// Trimmed line starts with `#` or `;`.
    Comment,
    /// Line contains `=`; key is everything before the first one, trimmed.
    KeyValue { indent: &'a str, key: &'a str },
    /// Anything else, e.g. a `[Section]` header.
    Other,
}

/// Splits `key=value` lines on the first `=` while capturing the leading
/// whitespace, so indentation survives even though the key match trims it.
pub struct LineClassifier {
    key_value: Regex,
}

impl LineClassifier {
    pub fn new() -> Self {
        // Anchored on the first '=' so values may themselves contain '='.
        // A key accidentally containing '=' mis-parses; inherited as-is.
        Self {
            key_value: Regex::new(r"^(\s*)([^=]*)=").unwrap(),
        }
    }

    /// Classify a single line. Comment detection runs before key/value
    /// detection, so `# key=value` is a comment and never a key.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineKind::Blank;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            return LineKind::Comment;
        }
        if let Some(caps) = self.key_value.captures(line) {
            let indent = caps.get(1).map_or("", |m| m.as_str());
            let key = caps.get(2).map_or("", |m| m.as_str()).trim();
            return LineKind::KeyValue { indent, key };
        }
        LineKind::Other
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-category counters for one merge pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MergeStats {
    pub total_lines: usize,
    pub replaced: usize,
    pub unchanged: usize,
    pub comments: usize,
    pub blank: usize,
    /// Overlay keys matched against at least one base line.
    pub used_keys: BTreeSet<String>,
}

impl MergeStats {
    /// Lines that fell into no counted category (section headers etc.).
    pub fn other_lines(&self) -> usize {
        self.total_lines - self.replaced - self.unchanged - self.comments - self.blank
    }

    /// Overlay keys never matched by the base document, sorted. These are
    /// overrides targeting nonexistent or renamed entries; a warning, never
    /// a failure.
    pub fn unused_keys(&self, overlay: &OverlayMap) -> Vec<String> {
        overlay
            .keys()
            .filter(|key| !self.used_keys.contains(*key))
            .cloned()
            .collect()
    }
}

/// Ordered output lines; always as many as the base document had.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedDocument {
    pub lines: Vec<String>,
}

impl MergedDocument {
    /// Render with the given newline style, appending a final newline when
    /// the base document ended with one.
    pub fn render(&self, newline: &str, final_newline: bool) -> String {
        let mut out = self.lines.join(newline);
        if final_newline && !self.lines.is_empty() {
            out.push_str(newline);
        }
        out
    }
}

/// Merge the base document against the overlay.
///
/// Pure over its inputs; running it twice yields identical output.
pub fn merge_document(base_lines: &[&str], overlay: &OverlayMap) -> (MergedDocument, MergeStats) {
    let classifier = LineClassifier::new();
    let mut stats = MergeStats::default();
    let mut lines = Vec::with_capacity(base_lines.len());

    for line in base_lines {
        stats.total_lines += 1;
        match classifier.classify(line) {
            LineKind::Blank => {
                stats.blank += 1;
                lines.push((*line).to_string());
            }
            LineKind::Comment => {
                stats.comments += 1;
                lines.push((*line).to_string());
            }
            LineKind::KeyValue { indent, key } => {
                if let Some(value) = overlay.get(key) {
                    stats.replaced += 1;
                    stats.used_keys.insert(key.to_string());
                    lines.push(format!("{indent}{key}={value}"));
                } else {
                    stats.unchanged += 1;
                    lines.push((*line).to_string());
                }
            }
            LineKind::Other => {
                lines.push((*line).to_string());
            }
        }
    }

    (MergedDocument { lines }, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::load_overlay;

    fn overlay_of(text: &str) -> OverlayMap {
        let (map, warnings) = load_overlay(text);
        assert!(warnings.is_empty());
        map
    }

    #[test]
    fn test_classify_blank() {
        let c = LineClassifier::new();
        assert_eq!(c.classify(""), LineKind::Blank);
        assert_eq!(c.classify("   \t "), LineKind::Blank);
    }

    #[test]
    fn test_classify_comment_before_key_value() {
        let c = LineClassifier::new();
        assert_eq!(c.classify("# key=value"), LineKind::Comment);
        assert_eq!(c.classify("  ; key=value"), LineKind::Comment);
    }

    #[test]
    fn test_classify_key_value_captures_indent() {
        let c = LineClassifier::new();
        assert_eq!(
            c.classify("  k = v"),
            LineKind::KeyValue {
                indent: "  ",
                key: "k"
            }
        );
    }

    #[test]
    fn test_classify_section_header_is_other() {
        let c = LineClassifier::new();
        assert_eq!(c.classify("[Section]"), LineKind::Other);
    }

    #[test]
    fn test_merge_scenario_basic() {
        let base = ["# header", "x=1", "", "y=2"];
        let overlay = overlay_of("x=9\n");

        let (doc, stats) = merge_document(&base, &overlay);

        assert_eq!(doc.lines, vec!["# header", "x=9", "", "y=2"]);
        assert_eq!(stats.total_lines, 4);
        assert_eq!(stats.replaced, 1);
        assert_eq!(stats.unchanged, 1);
        assert_eq!(stats.comments, 1);
        assert_eq!(stats.blank, 1);
        assert!(stats.unused_keys(&overlay).is_empty());
    }

    #[test]
    fn test_unmatched_overlay_key_reported_unused() {
        let base = ["x=1"];
        let overlay = overlay_of("z=5\n");

        let (doc, stats) = merge_document(&base, &overlay);

        assert_eq!(doc.lines, vec!["x=1"]);
        assert_eq!(stats.unused_keys(&overlay), vec!["z".to_string()]);
    }

    #[test]
    fn test_unused_keys_come_out_sorted() {
        let base: [&str; 0] = [];
        let overlay = overlay_of("zeta=1\nalpha=2\nmid=3\n");

        let (_, stats) = merge_document(&base, &overlay);

        assert_eq!(stats.unused_keys(&overlay), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_leading_whitespace_preserved_on_replace() {
        let base = ["  k=old value"];
        let overlay = overlay_of("k=new\n");

        let (doc, _) = merge_document(&base, &overlay);

        assert_eq!(doc.lines, vec!["  k=new"]);
    }

    #[test]
    fn test_original_value_with_equals_fully_replaced() {
        let base = ["k=old=value=stuff"];
        let overlay = overlay_of("k=new\n");

        let (doc, _) = merge_document(&base, &overlay);

        assert_eq!(doc.lines, vec!["k=new"]);
    }

    #[test]
    fn test_repeated_base_key_replaced_every_time() {
        let base = ["k=1", "k=2"];
        let overlay = overlay_of("k=9\n");

        let (doc, stats) = merge_document(&base, &overlay);

        assert_eq!(doc.lines, vec!["k=9", "k=9"]);
        assert_eq!(stats.replaced, 2);
    }

    #[test]
    fn test_empty_override_value_renders_bare_key() {
        let base = ["k=something"];
        let overlay = overlay_of("k=\n");

        let (doc, _) = merge_document(&base, &overlay);

        assert_eq!(doc.lines, vec!["k="]);
    }

    #[test]
    fn test_empty_base_document() {
        let overlay = overlay_of("k=1\n");
        let (doc, stats) = merge_document(&[], &overlay);

        assert!(doc.lines.is_empty());
        assert_eq!(stats.total_lines, 0);
        assert_eq!(stats.replaced + stats.unchanged + stats.comments + stats.blank, 0);
    }

    #[test]
    fn test_line_count_invariant() {
        let base = ["[Section]", "# c", "", "a=1", "b=2", "junk line"];
        let overlay = overlay_of("a=9\nmissing=1\n");

        let (doc, stats) = merge_document(&base, &overlay);

        assert_eq!(doc.lines.len(), base.len());
        assert_eq!(stats.total_lines, base.len());
    }

    #[test]
    fn test_counter_sum_invariant() {
        let base = ["[Section]", "# c", "", "a=1", "b=2", "junk line"];
        let overlay = overlay_of("a=9\n");

        let (_, stats) = merge_document(&base, &overlay);

        assert_eq!(
            stats.replaced + stats.unchanged + stats.comments + stats.blank + stats.other_lines(),
            stats.total_lines
        );
        assert_eq!(stats.other_lines(), 2);
    }

    #[test]
    fn test_merge_is_idempotent_over_inputs() {
        let base = ["# h", "a=1", "b=2"];
        let overlay = overlay_of("a=x\n");

        let (first, _) = merge_document(&base, &overlay);
        let (second, _) = merge_document(&base, &overlay);

        assert_eq!(first, second);
    }

    #[test]
    fn test_render_preserves_final_newline_choice() {
        let doc = MergedDocument {
            lines: vec!["a=1".to_string(), "b=2".to_string()],
        };
        assert_eq!(doc.render("\n", true), "a=1\nb=2\n");
        assert_eq!(doc.render("\n", false), "a=1\nb=2");
        assert_eq!(doc.render("\r\n", true), "a=1\r\nb=2\r\n");
    }

    #[test]
    fn test_render_empty_document() {
        let doc = MergedDocument { lines: vec![] };
        assert_eq!(doc.render("\n", true), "");
    }
}
