//! Plain-text document backed by `ropey::Rope`.

use ropey::Rope;

use super::{DocumentHost, SelectionRange};

/// Plain-text draft addressed by character offsets.
#[derive(Debug, Clone, Default)]
pub struct PlainTextDocument {
    rope: Rope,
    selection: SelectionRange,
}

impl PlainTextDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from a string slice, cursor at the start
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            selection: SelectionRange::default(),
        }
    }

    /// Access the underlying Rope
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    fn clamp(&self, range: SelectionRange) -> SelectionRange {
        range.clamp_to(self.rope.len_chars())
    }
}

impl DocumentHost for PlainTextDocument {
    type Snapshot = String;

    fn len(&self) -> usize {
        self.rope.len_chars()
    }

    fn full_text(&self) -> String {
        self.rope.to_string()
    }

    fn text_in_range(&self, range: SelectionRange) -> String {
        let range = self.clamp(range);
        if range.is_empty() {
            return String::new();
        }
        self.rope.slice(range.from..range.to).to_string()
    }

    fn selection(&self) -> SelectionRange {
        self.selection
    }

    fn set_selection(&mut self, range: SelectionRange) {
        self.selection = self.clamp(range);
    }

    fn replace_range(&mut self, range: SelectionRange, text: &str) {
        let range = self.clamp(range);
        if !range.is_empty() {
            self.rope.remove(range.from..range.to);
        }
        self.rope.insert(range.from, text);
        self.selection = SelectionRange::collapsed(range.from + text.chars().count());
    }

    fn replace_all(&mut self, snapshot: String) {
        self.rope = Rope::from_str(&snapshot);
        self.selection = self.clamp(self.selection);
    }

    fn snapshot(&self) -> String {
        self.rope.to_string()
    }

    fn load(&mut self, content: &str) {
        self.rope = Rope::from_str(content);
        self.selection = SelectionRange::default();
    }
}
