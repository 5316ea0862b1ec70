//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! An update with nothing to do returns `None` instead of a command.

use crate::model::RequestId;
use crate::polish::PolishMode;

/// Commands returned by update functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Request a redraw of the composer
    Redraw,
    /// Call the polish service off the update loop.
    /// Sends `Msg::Polish(PolishMsg::Completed)` when done.
    RunPolish {
        request: RequestId,
        text: String,
        mode: PolishMode,
    },
}
