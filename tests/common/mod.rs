//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use draft_polish::commands::Cmd;
use draft_polish::document::{
    DocumentHost, PlainTextDocument, PolishScope, RichDocument, SelectionRange,
};
use draft_polish::messages::{Msg, PolishMsg};
use draft_polish::model::{Composer, RequestId};
use draft_polish::polish::{PolishError, PolishMode};
use draft_polish::update::update;

/// Create a plain-text composer with the given selection
pub fn test_composer(text: &str, from: usize, to: usize) -> Composer<PlainTextDocument> {
    let mut document = PlainTextDocument::from_text(text);
    document.set_selection(SelectionRange::new(from, to));
    Composer::new(document)
}

/// Create a rich-text composer from markup, nothing selected
pub fn rich_composer(markup: &str) -> Composer<RichDocument> {
    Composer::new(RichDocument::from_html(markup))
}

/// Helper to get the document content as plain text
pub fn text_of<D: DocumentHost>(model: &Composer<D>) -> String {
    model.document.full_text()
}

/// Send a polish request; returns the request id and the text sent to the
/// service, or None if no request was started
pub fn request<D: DocumentHost>(
    model: &mut Composer<D>,
    mode: PolishMode,
    scope: PolishScope,
) -> Option<(RequestId, String)> {
    match update(model, Msg::Polish(PolishMsg::Request { mode, scope })) {
        Some(Cmd::RunPolish { request, text, .. }) => Some((request, text)),
        _ => None,
    }
}

/// Deliver a service result for `request`
pub fn complete<D: DocumentHost>(
    model: &mut Composer<D>,
    request: RequestId,
    result: Result<String, PolishError>,
) {
    update(model, Msg::Polish(PolishMsg::Completed { request, result }));
}

/// Request a polish of the current selection and answer it with `polished`
pub fn polish_selection<D: DocumentHost>(model: &mut Composer<D>, mode: PolishMode, polished: &str) {
    let (id, _) = request(model, mode, PolishScope::Selection).expect("request should start");
    complete(model, id, Ok(polished.to_string()));
}

pub fn accept<D: DocumentHost>(model: &mut Composer<D>) {
    update(model, Msg::Polish(PolishMsg::Accept));
}

pub fn cancel<D: DocumentHost>(model: &mut Composer<D>) {
    update(model, Msg::Polish(PolishMsg::Cancel));
}

pub fn undo<D: DocumentHost>(model: &mut Composer<D>) {
    update(model, Msg::Polish(PolishMsg::Undo));
}

pub fn select<D: DocumentHost>(model: &mut Composer<D>, from: usize, to: usize) {
    update(
        model,
        Msg::Document(draft_polish::messages::DocumentMsg::SetSelection {
            anchor: from,
            head: to,
        }),
    );
}
