//! Review state machine types

use crate::document::SelectionRange;
use crate::polish::PolishMode;

/// Identifies one polish request so late results can be matched or dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// A request that has been sent and not yet answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlightRequest {
    pub id: RequestId,
    pub mode: PolishMode,
    /// Range captured when the request was issued
    pub range: SelectionRange,
    /// Text that was sent
    pub original: String,
}

/// A polish result waiting for the user to accept or cancel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReview {
    pub mode: PolishMode,
    pub original: String,
    pub polished: String,
}

impl PendingReview {
    /// Modal title, e.g. "Review polish: Fix & Clean"
    pub fn title(&self) -> String {
        format!("Review polish: {}", self.mode.label())
    }
}

/// Idle → Requesting → Reviewing → Idle, with Error on service failure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReviewState {
    #[default]
    Idle,
    Requesting(InFlightRequest),
    Reviewing {
        review: PendingReview,
        range: SelectionRange,
    },
    /// Last request failed; the message replaces the helper text
    Error(String),
}

impl ReviewState {
    /// Only one request may be in flight or pending review at a time
    pub fn accepts_new_request(&self) -> bool {
        matches!(self, ReviewState::Idle | ReviewState::Error(_))
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self, ReviewState::Requesting(_))
    }

    /// The review modal is open and blocks document edits
    pub fn is_reviewing(&self) -> bool {
        matches!(self, ReviewState::Reviewing { .. })
    }

    pub fn pending_review(&self) -> Option<&PendingReview> {
        match self {
            ReviewState::Reviewing { review, .. } => Some(review),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ReviewState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Range the current request or review will be applied to
    pub fn captured_range(&self) -> Option<SelectionRange> {
        match self {
            ReviewState::Requesting(request) => Some(request.range),
            ReviewState::Reviewing { range, .. } => Some(*range),
            _ => None,
        }
    }

    /// Short state name for logs
    pub fn name(&self) -> &'static str {
        match self {
            ReviewState::Idle => "idle",
            ReviewState::Requesting(_) => "requesting",
            ReviewState::Reviewing { .. } => "reviewing",
            ReviewState::Error(_) => "error",
        }
    }
}
