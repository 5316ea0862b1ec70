//! Composer session state
//!
//! Everything a composer instance owns lives in [`Composer`]: the document,
//! its AI undo history, the review state machine and the envelope fields.
//! Update functions take it by `&mut`; there is no global state.

pub mod review;

pub use review::{InFlightRequest, PendingReview, RequestId, ReviewState};

use crate::diff::ReviewDiff;
use crate::document::{DocumentHost, PolishScope, UndoHistory};
use crate::samples::SampleEmail;

/// Hint shown under a selection-driven composer
pub const SELECTION_HINT: &str =
    "AI suggestions are reviewed before applying. Undo is always available.";
/// Hint shown under a full-draft composer
pub const FULL_DRAFT_HINT: &str =
    "Click to polish entire draft. You'll review changes before applying.";
/// Hint shown while a request is in flight
pub const REQUESTING_HINT: &str = "Refining with AI…";
/// Error shown when an accepted review no longer matches the document
pub const STALE_SELECTION_MESSAGE: &str =
    "The draft changed while the suggestion was pending. Select the text and polish again.";

/// Recipient and subject fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub recipient: String,
    pub subject: String,
}

/// One composer session over a document representation
#[derive(Debug, Clone)]
pub struct Composer<D: DocumentHost> {
    pub document: D,
    pub history: UndoHistory<D::Snapshot>,
    pub review: ReviewState,
    pub envelope: Envelope,
    pub samples: Vec<SampleEmail>,
    pub selected_sample: Option<usize>,
    /// Primary polish action offered by this session's UI
    pub scope: PolishScope,
    next_request_id: u64,
}

impl<D: DocumentHost> Composer<D> {
    pub fn new(document: D) -> Self {
        Self {
            document,
            history: UndoHistory::new(),
            review: ReviewState::Idle,
            envelope: Envelope::default(),
            samples: Vec::new(),
            selected_sample: None,
            scope: PolishScope::Selection,
            next_request_id: 1,
        }
    }

    pub fn with_samples(mut self, samples: Vec<SampleEmail>) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_scope(mut self, scope: PolishScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_envelope(mut self, recipient: &str, subject: &str) -> Self {
        self.envelope = Envelope {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
        };
        self
    }

    /// Replace the document with a new base document.
    ///
    /// A full reset, not an undoable edit: AI history is cleared and any
    /// pending review or in-flight request is dropped.
    pub fn load_base(&mut self, content: &str) {
        match &self.review {
            ReviewState::Requesting(request) => {
                tracing::debug!(request = request.id.0, "orphaning in-flight request on load")
            }
            ReviewState::Reviewing { .. } => {
                tracing::debug!("discarding pending review on load")
            }
            _ => {}
        }
        self.review = ReviewState::Idle;
        self.document.load(content);
        self.history.clear();
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        let id = RequestId(self.next_request_id);
        self.next_request_id += 1;
        id
    }

    /// Polish actions are enabled
    pub fn can_polish(&self) -> bool {
        self.review.accepts_new_request() && !self.document.full_text().trim().is_empty()
    }

    /// The "Undo AI" action is enabled
    pub fn can_undo(&self) -> bool {
        self.history.can_undo() && !self.review.is_requesting() && !self.review.is_reviewing()
    }

    pub fn pending_review(&self) -> Option<&PendingReview> {
        self.review.pending_review()
    }

    /// Diff for the pending review, if the modal is open
    pub fn review_diff(&self) -> Option<ReviewDiff> {
        self.pending_review()
            .map(|review| ReviewDiff::new(&review.original, &review.polished))
    }

    /// Status line under the editor
    pub fn helper_text(&self) -> &str {
        match &self.review {
            ReviewState::Requesting(_) => REQUESTING_HINT,
            ReviewState::Error(message) => message,
            _ => match self.scope {
                PolishScope::Selection => SELECTION_HINT,
                PolishScope::FullDraft => FULL_DRAFT_HINT,
            },
        }
    }
}
