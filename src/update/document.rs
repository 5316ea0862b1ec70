//! Document update functions: selection, user edits, envelope, sample loading

use crate::commands::Cmd;
use crate::document::{DocumentHost, SelectionRange};
use crate::messages::DocumentMsg;
use crate::model::Composer;

/// Handle document messages
pub fn update_document<D: DocumentHost>(model: &mut Composer<D>, msg: DocumentMsg) -> Option<Cmd> {
    match msg {
        DocumentMsg::SetSelection { anchor, head } => {
            model
                .document
                .set_selection(SelectionRange::new(anchor, head));
            Some(Cmd::Redraw)
        }

        DocumentMsg::SelectAll => {
            let len = model.document.len();
            model.document.set_selection(SelectionRange::full(len));
            Some(Cmd::Redraw)
        }

        DocumentMsg::Edit { from, to, text } => {
            // The review modal blocks typing until accept or cancel
            if model.review.is_reviewing() {
                tracing::debug!("edit refused while reviewing");
                return None;
            }
            model
                .document
                .replace_range(SelectionRange::new(from, to), &text);
            Some(Cmd::Redraw)
        }

        DocumentMsg::SetSubject(subject) => {
            model.envelope.subject = subject;
            Some(Cmd::Redraw)
        }

        DocumentMsg::SetRecipient(recipient) => {
            model.envelope.recipient = recipient;
            Some(Cmd::Redraw)
        }

        DocumentMsg::LoadSample(index) => {
            let Some(sample) = model.samples.get(index).cloned() else {
                tracing::debug!(index, "no such sample");
                return None;
            };
            model.envelope.subject = sample.subject;
            model.envelope.recipient = sample.agent_email;
            model.load_base(&sample.content);
            model.selected_sample = Some(index);
            tracing::info!(index, "loaded sample email");
            Some(Cmd::Redraw)
        }
    }
}
