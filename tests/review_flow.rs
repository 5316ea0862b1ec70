//! Review workflow tests - request, review, accept/cancel, undo

mod common;

use common::{
    accept, cancel, complete, polish_selection, request, select, test_composer, text_of, undo,
};
use draft_polish::document::{DocumentHost, PolishScope, SelectionRange};
use draft_polish::messages::{DocumentMsg, Msg};
use draft_polish::model::{ReviewState, REQUESTING_HINT, SELECTION_HINT, STALE_SELECTION_MESSAGE};
use draft_polish::polish::{PolishError, PolishMode};
use draft_polish::update::update;

// ========================================================================
// Accept and undo
// ========================================================================

#[test]
fn test_accept_replaces_exactly_the_captured_range() {
    let mut model = test_composer("Hi Alex, see u tmrw. Thanks", 9, 20);
    polish_selection(&mut model, PolishMode::Professional, "See you tomorrow.");
    accept(&mut model);

    assert_eq!(text_of(&model), "Hi Alex, See you tomorrow. Thanks");
    assert_eq!(model.history.len(), 1);
    assert_eq!(model.review, ReviewState::Idle);

    undo(&mut model);
    assert_eq!(text_of(&model), "Hi Alex, see u tmrw. Thanks");
    assert!(model.history.is_empty());
}

#[test]
fn test_fix_clean_full_selection() {
    let original = "Hi teaam, pls send the invioce asap.";
    let polished = "Hi team, please send the invoice as soon as possible.";
    let mut model = test_composer(original, 0, original.chars().count());

    let (id, sent) = request(&mut model, PolishMode::FixClean, PolishScope::Selection).unwrap();
    assert_eq!(sent, original);
    complete(&mut model, id, Ok(polished.to_string()));
    assert_eq!(model.pending_review().unwrap().polished, polished);

    accept(&mut model);
    assert_eq!(text_of(&model), polished);

    undo(&mut model);
    assert_eq!(text_of(&model), original);
}

#[test]
fn test_two_accepts_then_two_undos() {
    let mut model = test_composer("one two three", 0, 3);
    polish_selection(&mut model, PolishMode::Concise, "ONE");
    accept(&mut model);

    select(&mut model, 8, 13);
    polish_selection(&mut model, PolishMode::Concise, "THREE");
    accept(&mut model);

    assert_eq!(text_of(&model), "ONE two THREE");
    assert_eq!(model.history.len(), 2);

    undo(&mut model);
    assert_eq!(text_of(&model), "ONE two three");
    undo(&mut model);
    assert_eq!(text_of(&model), "one two three");
    assert!(!model.can_undo());
}

#[test]
fn test_undo_on_empty_history_is_noop() {
    let mut model = test_composer("untouched", 0, 0);
    undo(&mut model);
    assert_eq!(text_of(&model), "untouched");
    assert!(model.history.is_empty());
}

#[test]
fn test_undo_does_not_resurrect_review() {
    let mut model = test_composer("abc", 0, 3);
    polish_selection(&mut model, PolishMode::Friendly, "xyz");
    accept(&mut model);
    undo(&mut model);
    assert_eq!(model.review, ReviewState::Idle);
    assert!(model.pending_review().is_none());
}

#[test]
fn test_user_edits_survive_until_undo() {
    let mut model = test_composer("draft", 0, 5);
    polish_selection(&mut model, PolishMode::Professional, "Draft.");
    accept(&mut model);

    update(
        &mut model,
        Msg::Document(DocumentMsg::Edit {
            from: 6,
            to: 6,
            text: " Typed.".into(),
        }),
    );
    assert_eq!(text_of(&model), "Draft. Typed.");

    // The snapshot predates the typing, so undo drops it too
    undo(&mut model);
    assert_eq!(text_of(&model), "draft");
}

// ========================================================================
// Cancel and errors
// ========================================================================

#[test]
fn test_cancel_leaves_document_and_history_unchanged() {
    let mut model = test_composer("Thanks, Ray", 0, 6);
    polish_selection(&mut model, PolishMode::Friendly, "Thanks so much");
    cancel(&mut model);

    assert_eq!(text_of(&model), "Thanks, Ray");
    assert!(model.history.is_empty());
    assert!(model.review.accepts_new_request());
}

#[test]
fn test_service_failure_shows_error() {
    let mut model = test_composer("Thanks, Ray", 0, 6);
    let (id, _) = request(&mut model, PolishMode::Friendly, PolishScope::Selection).unwrap();
    complete(
        &mut model,
        id,
        Err(PolishError::Transport("network error".into())),
    );

    assert_eq!(text_of(&model), "Thanks, Ray");
    assert_eq!(model.history.len(), 0);
    assert_eq!(model.review.error(), Some("network error"));
    assert_eq!(model.helper_text(), "network error");
}

#[test]
fn test_retry_after_error() {
    let mut model = test_composer("Thanks, Ray", 0, 6);
    let (id, _) = request(&mut model, PolishMode::Friendly, PolishScope::Selection).unwrap();
    complete(&mut model, id, Err(PolishError::EmptyResponse));
    assert!(model.review.error().is_some());

    polish_selection(&mut model, PolishMode::Friendly, "Thank you");
    accept(&mut model);
    assert_eq!(text_of(&model), "Thank you, Ray");
    assert_eq!(model.helper_text(), SELECTION_HINT);
}

#[test]
fn test_empty_selection_never_calls_service() {
    let mut model = test_composer("Thanks, Ray", 4, 4);
    assert!(request(&mut model, PolishMode::Concise, PolishScope::Selection).is_none());
    assert_eq!(model.review, ReviewState::Idle);
}

#[test]
fn test_blank_draft_never_calls_service() {
    let mut model = test_composer("   \n ", 0, 0);
    assert!(request(&mut model, PolishMode::Concise, PolishScope::FullDraft).is_none());
    assert!(!model.can_polish());
}

// ========================================================================
// One review at a time
// ========================================================================

#[test]
fn test_second_request_refused_while_requesting() {
    let mut model = test_composer("hello world", 0, 5);
    let (first, _) = request(&mut model, PolishMode::Concise, PolishScope::Selection).unwrap();
    assert_eq!(model.helper_text(), REQUESTING_HINT);
    assert!(request(&mut model, PolishMode::Friendly, PolishScope::Selection).is_none());

    complete(&mut model, first, Ok("hi".into()));
    assert_eq!(model.pending_review().unwrap().mode, PolishMode::Concise);
}

#[test]
fn test_second_request_refused_while_reviewing() {
    let mut model = test_composer("hello world", 0, 5);
    polish_selection(&mut model, PolishMode::Concise, "hi");
    assert!(request(&mut model, PolishMode::Friendly, PolishScope::Selection).is_none());
    assert_eq!(model.pending_review().unwrap().polished, "hi");
}

#[test]
fn test_undo_refused_while_reviewing() {
    let mut model = test_composer("a b", 0, 1);
    polish_selection(&mut model, PolishMode::Concise, "A");
    accept(&mut model);

    select(&mut model, 2, 3);
    polish_selection(&mut model, PolishMode::Concise, "B");
    undo(&mut model);

    assert_eq!(text_of(&model), "A b");
    assert_eq!(model.history.len(), 1);
    assert!(model.review.is_reviewing());
}

#[test]
fn test_accept_without_review_is_noop() {
    let mut model = test_composer("abc", 0, 3);
    accept(&mut model);
    assert_eq!(text_of(&model), "abc");
    assert!(model.history.is_empty());
}

#[test]
fn test_late_result_for_unknown_request_is_ignored() {
    let mut model = test_composer("abc", 0, 3);
    let (id, _) = request(&mut model, PolishMode::Concise, PolishScope::Selection).unwrap();
    complete(
        &mut model,
        draft_polish::model::RequestId(id.0 + 100),
        Ok("zzz".into()),
    );
    assert!(model.review.is_requesting());
}

// ========================================================================
// Stale ranges and base-document loads
// ========================================================================

#[test]
fn test_stale_range_is_rejected() {
    let mut model = test_composer("hello world", 6, 11);
    let (id, _) = request(&mut model, PolishMode::Concise, PolishScope::Selection).unwrap();

    // Typing lands while the request is in flight
    update(
        &mut model,
        Msg::Document(DocumentMsg::Edit {
            from: 0,
            to: 0,
            text: ">> ".into(),
        }),
    );
    complete(&mut model, id, Ok("WORLD".into()));
    accept(&mut model);

    assert_eq!(text_of(&model), ">> hello world");
    assert!(model.history.is_empty());
    assert_eq!(model.review.error(), Some(STALE_SELECTION_MESSAGE));
}

#[test]
fn test_out_of_bounds_range_is_rejected() {
    let mut model = test_composer("hello world", 6, 11);
    let (id, _) = request(&mut model, PolishMode::Concise, PolishScope::Selection).unwrap();
    update(
        &mut model,
        Msg::Document(DocumentMsg::Edit {
            from: 0,
            to: 11,
            text: "hi".into(),
        }),
    );
    complete(&mut model, id, Ok("WORLD".into()));
    accept(&mut model);

    assert_eq!(text_of(&model), "hi");
    assert_eq!(model.review.error(), Some(STALE_SELECTION_MESSAGE));
}

#[test]
fn test_load_base_clears_history() {
    let mut model = test_composer("abc", 0, 3);
    polish_selection(&mut model, PolishMode::Concise, "x");
    accept(&mut model);
    assert_eq!(model.history.len(), 1);

    model.load_base("fresh start");
    assert!(model.history.is_empty());
    assert_eq!(text_of(&model), "fresh start");
    assert_eq!(model.document.selection(), SelectionRange::default());
}

#[test]
fn test_load_during_review_drops_review() {
    let mut model = test_composer("abc", 0, 3);
    polish_selection(&mut model, PolishMode::Concise, "x");
    model.load_base("new base");

    assert_eq!(model.review, ReviewState::Idle);
    accept(&mut model);
    assert_eq!(text_of(&model), "new base");
}

#[test]
fn test_load_during_request_orphans_result() {
    let mut model = test_composer("abc", 0, 3);
    let (id, _) = request(&mut model, PolishMode::Concise, PolishScope::Selection).unwrap();
    model.load_base("new base");

    complete(&mut model, id, Ok("late".into()));
    assert_eq!(model.review, ReviewState::Idle);
    assert_eq!(text_of(&model), "new base");
}
