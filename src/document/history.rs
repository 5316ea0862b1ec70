//! Snapshot history for reverting accepted AI edits.

/// Stack of full document snapshots, most recent last.
///
/// One entry is pushed right before each accepted AI edit. Entries are never
/// modified once pushed; undo restores a snapshot wholesale.
#[derive(Debug, Clone)]
pub struct UndoHistory<S> {
    snapshots: Vec<S>,
}

impl<S> Default for UndoHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> UndoHistory<S> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Record the state a subsequent edit can be reverted to
    pub fn push(&mut self, snapshot: S) {
        self.snapshots.push(snapshot);
    }

    /// Take the most recent snapshot, if any
    pub fn pop(&mut self) -> Option<S> {
        self.snapshots.pop()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    /// Drop all history (new base document loaded)
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Peek at the snapshot the next undo would restore
    pub fn latest(&self) -> Option<&S> {
        self.snapshots.last()
    }
}
