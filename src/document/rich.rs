//! Rich document: paragraphs of text and hard breaks with content positions.
//!
//! Positions follow the usual structured-editor scheme. Every paragraph
//! occupies `content_size + 2` positions: one for its opening boundary, one
//! per character or hard break, one for its closing boundary.
//!
//! ```text
//! <p>ab</p><p>c</p>
//! 0  1 2  3 4  5  6        len() == 7
//! ```

use super::html::{self, HtmlSnapshot};
use super::{DocumentHost, SelectionRange};

/// Separator placed between paragraphs in extracted text
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Inline content of a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    HardBreak,
}

/// Single addressable unit inside a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Atom {
    Char(char),
    Break,
}

/// A block of inline content.
///
/// Kept normalized: no empty text runs, no two adjacent text runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_inlines(inlines: impl IntoIterator<Item = Inline>) -> Self {
        let mut paragraph = Self::new();
        for inline in inlines {
            match inline {
                Inline::Text(text) => paragraph.push_text(&text),
                Inline::HardBreak => paragraph.push_break(),
            }
        }
        paragraph
    }

    pub fn inlines(&self) -> &[Inline] {
        &self.inlines
    }

    /// Append text, merging with a trailing text run.
    ///
    /// Line breaks inside a run become spaces (use [`Paragraph::push_break`]
    /// for hard breaks) and other control characters are dropped.
    pub fn push_text(&mut self, text: &str) {
        let text: String = text
            .chars()
            .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
            .filter(|&ch| is_storable(ch))
            .collect();
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text(last)) = self.inlines.last_mut() {
            last.push_str(&text);
        } else {
            self.inlines.push(Inline::Text(text));
        }
    }

    pub fn push_break(&mut self) {
        self.inlines.push(Inline::HardBreak);
    }

    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }

    /// Positions occupied by the paragraph's content
    pub fn content_size(&self) -> usize {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text(text) => text.chars().count(),
                Inline::HardBreak => 1,
            })
            .sum()
    }

    /// Paragraph text with hard breaks rendered as newlines
    pub fn text(&self) -> String {
        atoms_to_text(&self.atoms())
    }

    fn atoms(&self) -> Vec<Atom> {
        let mut atoms = Vec::with_capacity(self.content_size());
        for inline in &self.inlines {
            match inline {
                Inline::Text(text) => atoms.extend(text.chars().map(Atom::Char)),
                Inline::HardBreak => atoms.push(Atom::Break),
            }
        }
        atoms
    }

    fn from_atoms(atoms: &[Atom]) -> Self {
        let mut paragraph = Self::new();
        let mut run = String::new();
        for atom in atoms {
            match atom {
                Atom::Char(ch) => run.push(*ch),
                Atom::Break => {
                    paragraph.push_text(&run);
                    run.clear();
                    paragraph.push_break();
                }
            }
        }
        paragraph.push_text(&run);
        paragraph
    }
}

/// Characters a text run can hold. An HTML snapshot cannot carry NUL or a
/// lone carriage return, so control characters other than tab never enter
/// the document.
fn is_storable(ch: char) -> bool {
    ch == '\t' || !ch.is_control()
}

fn atoms_to_text(atoms: &[Atom]) -> String {
    atoms
        .iter()
        .map(|atom| match atom {
            Atom::Char(ch) => *ch,
            Atom::Break => '\n',
        })
        .collect()
}

/// Split plain text into paragraph contents: blank lines separate
/// paragraphs, single newlines become hard breaks. Always yields at least
/// one (possibly empty) paragraph.
fn plain_text_atoms(text: &str) -> Vec<Vec<Atom>> {
    let text: String = text
        .replace("\r\n", "\n")
        .chars()
        .map(|ch| if ch == '\r' { '\n' } else { ch })
        .filter(|&ch| ch == '\n' || is_storable(ch))
        .collect();
    text.split(PARAGRAPH_SEPARATOR)
        .map(|chunk| {
            chunk
                .chars()
                .map(|ch| if ch == '\n' { Atom::Break } else { Atom::Char(ch) })
                .collect()
        })
        .collect()
}

/// Build paragraphs from plain text using the same rules as insertion
pub(super) fn plain_text_paragraphs(text: &str) -> Vec<Paragraph> {
    plain_text_atoms(text)
        .iter()
        .map(|atoms| Paragraph::from_atoms(atoms))
        .collect()
}

/// Structured draft with HTML snapshots. Never has zero paragraphs.
#[derive(Debug, Clone)]
pub struct RichDocument {
    paragraphs: Vec<Paragraph>,
    selection: SelectionRange,
}

impl Default for RichDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RichDocument {
    /// A document holding one empty paragraph
    pub fn new() -> Self {
        Self {
            paragraphs: vec![Paragraph::new()],
            selection: SelectionRange::default(),
        }
    }

    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        let mut doc = Self {
            paragraphs,
            selection: SelectionRange::default(),
        };
        doc.ensure_paragraph();
        doc
    }

    pub fn from_html(markup: &str) -> Self {
        Self::from_paragraphs(html::parse_paragraphs(markup))
    }

    pub fn to_html(&self) -> String {
        html::serialize_paragraphs(&self.paragraphs)
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Position of the opening boundary of paragraph `index`
    pub fn paragraph_start(&self, index: usize) -> usize {
        self.paragraphs
            .iter()
            .take(index)
            .map(|p| p.content_size() + 2)
            .sum()
    }

    fn ensure_paragraph(&mut self) {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::new());
        }
    }

    /// Resolve a range start to (paragraph, content offset).
    /// A position on a boundary belongs to the following paragraph.
    fn resolve_start(&self, pos: usize) -> (usize, usize) {
        let mut start = 0;
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            if pos <= start {
                return (index, 0);
            }
            let content_end = start + 1 + paragraph.content_size();
            if pos <= content_end {
                return (index, pos - start - 1);
            }
            start = content_end + 1;
        }
        self.end_of_last()
    }

    /// Resolve a range end to (paragraph, content offset).
    /// A position on a boundary belongs to the preceding paragraph.
    fn resolve_end(&self, pos: usize) -> (usize, usize) {
        let mut start = 0;
        let mut previous_size = 0;
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            if pos <= start {
                return if index == 0 {
                    (0, 0)
                } else {
                    (index - 1, previous_size)
                };
            }
            let size = paragraph.content_size();
            let content_end = start + 1 + size;
            if pos <= content_end {
                return (index, pos - start - 1);
            }
            start = content_end + 1;
            previous_size = size;
        }
        self.end_of_last()
    }

    fn end_of_last(&self) -> (usize, usize) {
        let last = self.paragraphs.len().saturating_sub(1);
        let size = self.paragraphs.get(last).map_or(0, Paragraph::content_size);
        (last, size)
    }

    /// Resolved (start, end) pairs for a range; end never precedes start
    fn resolve(&self, range: SelectionRange) -> ((usize, usize), (usize, usize)) {
        let range = range.clamp_to(self.len());
        let start = self.resolve_start(range.from);
        let end = self.resolve_end(range.to);
        (start, end.max(start))
    }
}

impl DocumentHost for RichDocument {
    type Snapshot = HtmlSnapshot;

    fn len(&self) -> usize {
        self.paragraphs.iter().map(|p| p.content_size() + 2).sum()
    }

    fn full_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }

    fn text_in_range(&self, range: SelectionRange) -> String {
        if range.clamp_to(self.len()).is_empty() {
            return String::new();
        }
        let ((first, first_offset), (last, last_offset)) = self.resolve(range);

        let mut parts = Vec::with_capacity(last - first + 1);
        for index in first..=last {
            let atoms = self.paragraphs[index].atoms();
            let from = if index == first { first_offset } else { 0 };
            let to = if index == last { last_offset } else { atoms.len() };
            parts.push(atoms_to_text(&atoms[from..to]));
        }
        parts.join(PARAGRAPH_SEPARATOR)
    }

    fn selection(&self) -> SelectionRange {
        self.selection
    }

    fn set_selection(&mut self, range: SelectionRange) {
        self.selection = range.clamp_to(self.len());
    }

    fn replace_range(&mut self, range: SelectionRange, text: &str) {
        let ((first, first_offset), (last, last_offset)) = self.resolve(range);

        let head = self.paragraphs[first].atoms()[..first_offset].to_vec();
        let tail = self.paragraphs[last].atoms()[last_offset..].to_vec();

        let mut inserted = plain_text_atoms(text);
        let count = inserted.len();
        let mut first_atoms = head;
        first_atoms.append(&mut inserted[0]);
        inserted[0] = first_atoms;
        let cursor_offset = inserted[count - 1].len();
        inserted[count - 1].extend(tail);

        self.paragraphs.splice(
            first..=last,
            inserted.iter().map(|atoms| Paragraph::from_atoms(atoms)),
        );

        let cursor = self.paragraph_start(first + count - 1) + 1 + cursor_offset;
        self.selection = SelectionRange::collapsed(cursor);
    }

    fn replace_all(&mut self, snapshot: HtmlSnapshot) {
        self.paragraphs = html::parse_paragraphs(snapshot.as_str());
        self.ensure_paragraph();
        self.selection = self.selection.clamp_to(self.len());
    }

    fn snapshot(&self) -> HtmlSnapshot {
        HtmlSnapshot::new(self.to_html())
    }

    fn load(&mut self, content: &str) {
        self.paragraphs = html::parse_paragraphs(content);
        self.ensure_paragraph();
        self.selection = SelectionRange::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_paragraphs() -> RichDocument {
        RichDocument::from_html("<p>ab</p><p>cd</p>")
    }

    #[test]
    fn test_empty_document_has_one_paragraph() {
        let doc = RichDocument::new();
        assert_eq!(doc.paragraphs().len(), 1);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.full_text(), "");
    }

    #[test]
    fn test_len_counts_boundaries() {
        let doc = two_paragraphs();
        assert_eq!(doc.len(), 8);
        assert_eq!(doc.paragraph_start(1), 4);
    }

    #[test]
    fn test_hard_break_takes_one_position() {
        let doc = RichDocument::from_html("<p>Thanks,<br>Ray</p>");
        assert_eq!(doc.len(), 7 + 1 + 3 + 2);
        assert_eq!(doc.full_text(), "Thanks,\nRay");
    }

    #[test]
    fn test_full_text_separates_paragraphs() {
        assert_eq!(two_paragraphs().full_text(), "ab\n\ncd");
    }

    #[test]
    fn test_text_in_range_within_paragraph() {
        let doc = two_paragraphs();
        assert_eq!(doc.text_in_range(SelectionRange::new(1, 3)), "ab");
        assert_eq!(doc.text_in_range(SelectionRange::new(2, 3)), "b");
    }

    #[test]
    fn test_text_in_range_across_paragraphs() {
        let doc = two_paragraphs();
        assert_eq!(doc.text_in_range(SelectionRange::new(2, 6)), "b\n\nc");
        assert_eq!(doc.text_in_range(SelectionRange::full(8)), "ab\n\ncd");
    }

    #[test]
    fn test_text_in_range_across_boundary_only() {
        let doc = two_paragraphs();
        assert_eq!(doc.text_in_range(SelectionRange::new(3, 5)), "\n\n");
        assert_eq!(doc.text_in_range(SelectionRange::new(4, 4)), "");
    }

    #[test]
    fn test_replace_range_inside_paragraph() {
        let mut doc = two_paragraphs();
        doc.replace_range(SelectionRange::new(2, 3), "XYZ");
        assert_eq!(doc.to_html(), "<p>aXYZ</p><p>cd</p>");
        assert_eq!(doc.selection(), SelectionRange::collapsed(5));
    }

    #[test]
    fn test_replace_range_across_paragraphs_merges() {
        let mut doc = two_paragraphs();
        doc.replace_range(SelectionRange::new(2, 6), "-");
        assert_eq!(doc.to_html(), "<p>a-d</p>");
    }

    #[test]
    fn test_replace_whole_document_with_paragraphs() {
        let mut doc = RichDocument::from_html("<p>Hi Alex,</p><p>Thanks,<br>Ray</p>");
        let len = doc.len();
        doc.replace_range(SelectionRange::full(len), "Hello Alex,\n\nBest,\nRay");
        assert_eq!(doc.to_html(), "<p>Hello Alex,</p><p>Best,<br>Ray</p>");
        assert_eq!(doc.full_text(), "Hello Alex,\n\nBest,\nRay");
        assert_eq!(doc.selection(), SelectionRange::collapsed(doc.len() - 1));
    }

    #[test]
    fn test_replace_inserts_text_not_markup() {
        let mut doc = RichDocument::new();
        doc.replace_range(SelectionRange::full(2), "<b>bold</b>");
        assert_eq!(doc.full_text(), "<b>bold</b>");
        assert_eq!(doc.to_html(), "<p>&lt;b&gt;bold&lt;/b&gt;</p>");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut doc = RichDocument::from_html("<p>One</p><p>Two<br>lines</p><p></p>");
        let snap = doc.snapshot();
        doc.replace_range(SelectionRange::full(doc.len()), "gone");
        assert_eq!(doc.full_text(), "gone");
        doc.replace_all(snap.clone());
        assert_eq!(doc.snapshot(), snap);
        assert_eq!(doc.paragraphs().len(), 3);
    }

    #[test]
    fn test_paragraph_normalizes_text_runs() {
        let p = Paragraph::from_inlines([
            Inline::Text("a".into()),
            Inline::Text(String::new()),
            Inline::Text("b".into()),
            Inline::HardBreak,
        ]);
        assert_eq!(
            p.inlines(),
            &[Inline::Text("ab".into()), Inline::HardBreak][..]
        );
    }

    #[test]
    fn test_plain_text_paragraphs() {
        let paragraphs = plain_text_paragraphs("a\nb\n\nc");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text(), "a\nb");
        assert_eq!(paragraphs[1].text(), "c");
    }

    #[test]
    fn test_lone_carriage_return_becomes_hard_break() {
        let mut doc = RichDocument::from_html("<p>one</p>");
        doc.replace_range(SelectionRange::full(doc.len()), "a\rb\r\rc");
        assert_eq!(doc.to_html(), "<p>a<br>b</p><p>c</p>");
        assert_eq!(doc.full_text(), "a\nb\n\nc");
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let mut doc = RichDocument::new();
        doc.replace_range(SelectionRange::full(2), "a\u{0}b\u{7}\tc");
        assert_eq!(doc.full_text(), "ab\tc");

        let snap = doc.snapshot();
        doc.replace_all(snap.clone());
        assert_eq!(doc.full_text(), "ab\tc");
        assert_eq!(doc.snapshot(), snap);
    }

    #[test]
    fn test_text_runs_hold_no_line_breaks() {
        let p = Paragraph::from_inlines([Inline::Text("a\nb\rc\u{0}".into())]);
        assert_eq!(p.inlines(), &[Inline::Text("a b c".into())][..]);
    }
}
