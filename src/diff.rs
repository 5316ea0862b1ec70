//! Before/after presentation of a pending polish.
//!
//! A word-level diff is enough to make a rewrite readable; nothing here is
//! used to apply the change.

use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Equal,
    Removed,
    Added,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Word-level comparison of the original and polished text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDiff {
    original: String,
    polished: String,
    segments: Vec<DiffSegment>,
}

impl ReviewDiff {
    pub fn new(original: &str, polished: &str) -> Self {
        let diff = TextDiff::from_words(original, polished);

        let mut segments: Vec<DiffSegment> = Vec::new();
        for change in diff.iter_all_changes() {
            let kind = match change.tag() {
                ChangeTag::Equal => SegmentKind::Equal,
                ChangeTag::Delete => SegmentKind::Removed,
                ChangeTag::Insert => SegmentKind::Added,
            };
            // Coalesce runs of the same kind
            match segments.last_mut() {
                Some(last) if last.kind == kind => last.text.push_str(change.value()),
                _ => segments.push(DiffSegment {
                    kind,
                    text: change.value().to_string(),
                }),
            }
        }

        Self {
            original: original.to_string(),
            polished: polished.to_string(),
            segments,
        }
    }

    pub fn segments(&self) -> &[DiffSegment] {
        &self.segments
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn polished(&self) -> &str {
        &self.polished
    }

    pub fn is_unchanged(&self) -> bool {
        self.segments.iter().all(|s| s.kind == SegmentKind::Equal)
    }

    /// Number of removed and added segments
    pub fn change_count(&self) -> (usize, usize) {
        self.segments
            .iter()
            .fold((0, 0), |(removed, added), s| match s.kind {
                SegmentKind::Equal => (removed, added),
                SegmentKind::Removed => (removed + 1, added),
                SegmentKind::Added => (removed, added + 1),
            })
    }

    /// Single-line markup: `[-removed-]{+added+}`
    pub fn render_inline(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment.kind {
                SegmentKind::Equal => out.push_str(&segment.text),
                SegmentKind::Removed => {
                    out.push_str("[-");
                    out.push_str(&segment.text);
                    out.push_str("-]");
                }
                SegmentKind::Added => {
                    out.push_str("{+");
                    out.push_str(&segment.text);
                    out.push_str("+}");
                }
            }
        }
        out
    }

    /// Two blocks, original then polished, each line prefixed
    pub fn render_side_by_side(&self) -> String {
        let mut out = String::from("Before:\n");
        for line in self.original.lines() {
            out.push_str("  - ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("After:\n");
        for line in self.polished.lines() {
            out.push_str("  + ");
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
