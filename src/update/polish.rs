//! Polish workflow: request, review, accept/cancel, undo

use crate::commands::Cmd;
use crate::document::{self, DocumentHost, PolishScope, SelectionRange};
use crate::messages::PolishMsg;
use crate::model::{
    Composer, InFlightRequest, PendingReview, RequestId, ReviewState, STALE_SELECTION_MESSAGE,
};
use crate::polish::{PolishError, PolishMode};

/// Handle polish workflow messages
pub fn update_polish<D: DocumentHost>(model: &mut Composer<D>, msg: PolishMsg) -> Option<Cmd> {
    match msg {
        PolishMsg::Request { mode, scope } => request(model, mode, scope),
        PolishMsg::Completed { request, result } => complete(model, request, result),
        PolishMsg::Accept => accept(model),
        PolishMsg::Cancel => cancel(model),
        PolishMsg::Undo => undo(model),
    }
}

fn request<D: DocumentHost>(
    model: &mut Composer<D>,
    mode: PolishMode,
    scope: PolishScope,
) -> Option<Cmd> {
    if !model.review.accepts_new_request() {
        tracing::debug!(state = model.review.name(), "polish request ignored");
        return None;
    }

    let Some(captured) = document::capture(&model.document, scope) else {
        tracing::debug!(?scope, "nothing to polish");
        return None;
    };

    let id = model.allocate_request_id();
    tracing::debug!(
        request = id.0,
        %mode,
        from = captured.range.from,
        to = captured.range.to,
        "polish requested"
    );

    // Any previous error is cleared by moving on to Requesting
    model.review = ReviewState::Requesting(InFlightRequest {
        id,
        mode,
        range: captured.range,
        original: captured.text.clone(),
    });

    Some(Cmd::RunPolish {
        request: id,
        text: captured.text,
        mode,
    })
}

fn complete<D: DocumentHost>(
    model: &mut Composer<D>,
    request: RequestId,
    result: Result<String, PolishError>,
) -> Option<Cmd> {
    let in_flight = match std::mem::take(&mut model.review) {
        ReviewState::Requesting(in_flight) if in_flight.id == request => in_flight,
        other => {
            tracing::debug!(request = request.0, "dropping result of orphaned request");
            model.review = other;
            return None;
        }
    };

    model.review = match result {
        Ok(polished) => ReviewState::Reviewing {
            review: PendingReview {
                mode: in_flight.mode,
                original: in_flight.original,
                polished,
            },
            range: in_flight.range,
        },
        Err(e) => {
            tracing::warn!(request = request.0, "polish failed: {}", e);
            ReviewState::Error(e.to_string())
        }
    };
    Some(Cmd::Redraw)
}

fn accept<D: DocumentHost>(model: &mut Composer<D>) -> Option<Cmd> {
    let (review, range) = match std::mem::take(&mut model.review) {
        ReviewState::Reviewing { review, range } => (review, range),
        other => {
            tracing::debug!(state = other.name(), "accept with no pending review");
            model.review = other;
            return None;
        }
    };

    if !range_still_matches(&model.document, range, &review.original) {
        tracing::warn!(
            from = range.from,
            to = range.to,
            len = model.document.len(),
            "rejecting stale review"
        );
        model.review = ReviewState::Error(STALE_SELECTION_MESSAGE.to_string());
        return Some(Cmd::Redraw);
    }

    // Snapshot must come from the pre-edit document
    model.history.push(model.document.snapshot());
    model.document.replace_range(range, &review.polished);

    tracing::info!(
        mode = %review.mode,
        from = range.from,
        to = range.to,
        history = model.history.len(),
        "accepted polish"
    );
    Some(Cmd::Redraw)
}

/// The captured range must still be in bounds and still cover the text
/// that was sent for polishing
fn range_still_matches<D: DocumentHost>(
    document: &D,
    range: SelectionRange,
    original: &str,
) -> bool {
    range.fits_within(document.len()) && document.text_in_range(range) == original
}

fn cancel<D: DocumentHost>(model: &mut Composer<D>) -> Option<Cmd> {
    if !model.review.is_reviewing() {
        return None;
    }
    tracing::debug!("review cancelled");
    model.review = ReviewState::Idle;
    Some(Cmd::Redraw)
}

fn undo<D: DocumentHost>(model: &mut Composer<D>) -> Option<Cmd> {
    if !model.can_undo() {
        return None;
    }
    let snapshot = model.history.pop()?;
    model.document.replace_all(snapshot);
    tracing::info!(history = model.history.len(), "reverted polish");
    Some(Cmd::Redraw)
}
