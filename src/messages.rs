//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::document::PolishScope;
use crate::model::RequestId;
use crate::polish::{PolishError, PolishMode};

/// Document and envelope edits coming from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentMsg {
    /// User moved the selection (anchor and head in document positions)
    SetSelection { anchor: usize, head: usize },
    /// Select the entire draft
    SelectAll,
    /// User typed or deleted: replace `from..to` with `text`
    Edit { from: usize, to: usize, text: String },
    SetSubject(String),
    SetRecipient(String),
    /// Reset the session to a sample email (by index)
    LoadSample(usize),
}

/// Polish workflow messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolishMsg {
    /// User picked a mode from the polish menu
    Request { mode: PolishMode, scope: PolishScope },
    /// The service call for `request` finished
    Completed {
        request: RequestId,
        result: Result<String, PolishError>,
    },
    /// Apply the pending review
    Accept,
    /// Dismiss the pending review
    Cancel,
    /// Revert the most recent accepted polish
    Undo,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Document(DocumentMsg),
    Polish(PolishMsg),
}
