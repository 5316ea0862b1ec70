//! Document hosts for the composer.
//!
//! The composer never touches document internals directly. Everything goes
//! through [`DocumentHost`], which has two realizations:
//!
//! - [`PlainTextDocument`]: a `ropey::Rope` addressed by character offsets
//! - [`RichDocument`]: paragraphs with text and hard breaks, addressed by
//!   content positions, snapshotted as HTML
//!
//! # Example
//!
//! ```
//! use draft_polish::document::{DocumentHost, PlainTextDocument, SelectionRange};
//!
//! let mut doc = PlainTextDocument::from_text("Hi teaam");
//! let before = doc.snapshot();
//!
//! doc.replace_range(SelectionRange::new(3, 8), "team");
//! assert_eq!(doc.full_text(), "Hi team");
//!
//! doc.replace_all(before);
//! assert_eq!(doc.full_text(), "Hi teaam");
//! ```

mod history;
mod html;
mod plain;
mod rich;
mod selection;

pub use history::UndoHistory;
pub use html::HtmlSnapshot;
pub use plain::PlainTextDocument;
pub use rich::{Inline, Paragraph, RichDocument};
pub use selection::{capture, CapturedSelection, PolishScope, SelectionRange};

use std::fmt;

/// Read/write contract shared by every document representation.
pub trait DocumentHost {
    /// Serializable form used for undo; restoring it must be lossless
    type Snapshot: Clone + fmt::Debug;

    /// Length in this document's position units
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full text as sent to the polish service
    fn full_text(&self) -> String;

    /// Text covered by `range` (positions past the end are clamped)
    fn text_in_range(&self, range: SelectionRange) -> String;

    /// Current user selection
    fn selection(&self) -> SelectionRange;

    /// Move the user selection; out-of-bounds ends are clamped
    fn set_selection(&mut self, range: SelectionRange);

    /// Replace `range` with plain `text`, leaving everything else untouched.
    /// The selection collapses to the end of the inserted text.
    fn replace_range(&mut self, range: SelectionRange, text: &str);

    /// Replace all content with a previously taken snapshot
    fn replace_all(&mut self, snapshot: Self::Snapshot);

    /// Deep copy of the current content
    fn snapshot(&self) -> Self::Snapshot;

    /// Reset to a fresh base document built from sample content
    fn load(&mut self, content: &str);
}

/// Which document representation a session runs on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    #[default]
    Plain,
    Rich,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Plain => write!(f, "plain"),
            DocumentKind::Rich => write!(f, "rich"),
        }
    }
}
