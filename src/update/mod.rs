//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod document;
mod polish;

use crate::commands::Cmd;
use crate::document::DocumentHost;
use crate::messages::Msg;
use crate::model::Composer;

#[cfg(debug_assertions)]
use crate::tracing::StateSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use document::update_document;
pub use polish::update_polish;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update<D: DocumentHost>(model: &mut Composer<D>, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner<D: DocumentHost>(model: &mut Composer<D>, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Document(m) => document::update_document(model, m),
        Msg::Polish(m) => polish::update_polish(model, m),
    }
}

/// Traced update wrapper (debug builds only)
#[cfg(debug_assertions)]
fn update_traced<D: DocumentHost>(model: &mut Composer<D>, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = StateSnapshot::from_composer(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = StateSnapshot::from_composer(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "review", %diff, "state changed");
    }
    after.assert_invariants(&msg_name);

    result
}

/// Get a short name for a message (for tracing)
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{DocumentMsg, PolishMsg};

    match msg {
        Msg::Document(m) => match m {
            DocumentMsg::SetSelection { .. } => "Document::SetSelection".to_string(),
            DocumentMsg::SelectAll => "Document::SelectAll".to_string(),
            DocumentMsg::Edit { .. } => "Document::Edit".to_string(),
            DocumentMsg::SetSubject(_) => "Document::SetSubject".to_string(),
            DocumentMsg::SetRecipient(_) => "Document::SetRecipient".to_string(),
            DocumentMsg::LoadSample(i) => format!("Document::LoadSample({})", i),
        },
        Msg::Polish(m) => match m {
            PolishMsg::Request { mode, .. } => format!("Polish::Request({})", mode),
            PolishMsg::Completed { request, result } => format!(
                "Polish::Completed(#{}, {})",
                request.0,
                if result.is_ok() { "ok" } else { "err" }
            ),
            PolishMsg::Accept => "Polish::Accept".to_string(),
            PolishMsg::Cancel => "Polish::Cancel".to_string(),
            PolishMsg::Undo => "Polish::Undo".to_string(),
        },
    }
}
