//! Selection ranges and the capture step that pins a range to a polish request.

use super::DocumentHost;

/// A span of document positions, `from <= to`.
///
/// Units depend on the document: character offsets for plain text,
/// content positions for rich documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    pub from: usize,
    pub to: usize,
}

impl SelectionRange {
    /// Build a range from an anchor and head in either order
    pub fn new(anchor: usize, head: usize) -> Self {
        if anchor <= head {
            Self {
                from: anchor,
                to: head,
            }
        } else {
            Self {
                from: head,
                to: anchor,
            }
        }
    }

    /// Create a collapsed range (cursor with no selection)
    pub fn collapsed(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    /// Range covering a whole document of `len` positions
    pub fn full(len: usize) -> Self {
        Self { from: 0, to: len }
    }

    /// A hand-built range with `from > to` covers nothing
    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    /// True when the range addresses positions inside a document of `len`
    pub fn fits_within(&self, len: usize) -> bool {
        self.from <= self.to && self.to <= len
    }

    /// Clamp both ends to `len`
    pub fn clamp_to(&self, len: usize) -> Self {
        Self::new(self.from.min(len), self.to.min(len))
    }
}

/// What a polish request targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolishScope {
    /// The user's current selection; refused when empty
    #[default]
    Selection,
    /// The entire draft, no selection required
    FullDraft,
}

/// A range pinned at request time together with the text it covered.
///
/// Never re-derived later: accept applies exactly this range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedSelection {
    pub range: SelectionRange,
    pub text: String,
}

/// Read the range a polish request should target.
///
/// Returns `None` when there is nothing worth sending: an empty selection in
/// [`PolishScope::Selection`], or blank text in either scope.
pub fn capture<D: DocumentHost + ?Sized>(
    document: &D,
    scope: PolishScope,
) -> Option<CapturedSelection> {
    let (range, text) = match scope {
        PolishScope::Selection => {
            let range = document.selection();
            if range.is_empty() {
                return None;
            }
            (range, document.text_in_range(range))
        }
        PolishScope::FullDraft => (SelectionRange::full(document.len()), document.full_text()),
    };

    if text.trim().is_empty() {
        return None;
    }

    Some(CapturedSelection { range, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PlainTextDocument;

    #[test]
    fn test_new_normalizes_reversed_range() {
        let range = SelectionRange::new(9, 3);
        assert_eq!(range, SelectionRange { from: 3, to: 9 });
        assert_eq!(range.len(), 6);
    }

    #[test]
    fn test_reversed_fields_have_zero_length() {
        let range = SelectionRange { from: 5, to: 2 };
        assert_eq!(range.len(), 0);
        assert!(range.is_empty());
        assert!(!range.fits_within(10));
    }

    #[test]
    fn test_fits_within() {
        assert!(SelectionRange::new(0, 5).fits_within(5));
        assert!(!SelectionRange::new(2, 6).fits_within(5));
        assert!(SelectionRange::collapsed(0).fits_within(0));
    }

    #[test]
    fn test_clamp_to() {
        assert_eq!(
            SelectionRange::new(4, 20).clamp_to(10),
            SelectionRange::new(4, 10)
        );
        assert_eq!(
            SelectionRange::new(12, 20).clamp_to(10),
            SelectionRange::collapsed(10)
        );
    }

    #[test]
    fn test_capture_selection_refuses_empty_range() {
        let mut doc = PlainTextDocument::from_text("Thanks, Ray");
        doc.set_selection(SelectionRange::collapsed(3));
        assert_eq!(capture(&doc, PolishScope::Selection), None);
    }

    #[test]
    fn test_capture_selection_reads_selected_text() {
        let mut doc = PlainTextDocument::from_text("Thanks, Ray");
        doc.set_selection(SelectionRange::new(0, 6));
        let captured = capture(&doc, PolishScope::Selection).unwrap();
        assert_eq!(captured.range, SelectionRange::new(0, 6));
        assert_eq!(captured.text, "Thanks");
    }

    #[test]
    fn test_capture_selection_refuses_whitespace() {
        let mut doc = PlainTextDocument::from_text("a   b");
        doc.set_selection(SelectionRange::new(1, 4));
        assert_eq!(capture(&doc, PolishScope::Selection), None);
    }

    #[test]
    fn test_capture_full_draft_ignores_selection() {
        let mut doc = PlainTextDocument::from_text("Hi there");
        doc.set_selection(SelectionRange::collapsed(2));
        let captured = capture(&doc, PolishScope::FullDraft).unwrap();
        assert_eq!(captured.range, SelectionRange::new(0, 8));
        assert_eq!(captured.text, "Hi there");
    }

    #[test]
    fn test_capture_full_draft_refuses_blank_document() {
        let doc = PlainTextDocument::from_text("  \n ");
        assert_eq!(capture(&doc, PolishScope::FullDraft), None);
    }
}
