//! Undo grouping for tree mutations.
//!
//! Moving a component is a removal followed by an insertion. The removal is
//! flagged `temporary`, which holds it back until the next insertion arrives;
//! both changes then land in the same [`UndoGroup`] so a single undo puts the
//! component back where it was.

use crate::tree::{ComponentId, MoveAction};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeChange {
    Added {
        id: ComponentId,
        parent: ComponentId,
        index: usize,
    },
    Removed {
        id: ComponentId,
        parent: ComponentId,
        index: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndoGroup {
    pub changes: Vec<TreeChange>,
    pub action: Option<MoveAction>,
}

#[derive(Debug, Default)]
pub struct History {
    groups: Vec<UndoGroup>,
    pending: Vec<TreeChange>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_remove(&mut self, change: TreeChange, temporary: bool) {
        if temporary {
            self.pending.push(change);
            return;
        }
        self.flush_pending();
        self.groups.push(UndoGroup {
            changes: vec![change],
            action: None,
        });
    }

    pub fn record_add(&mut self, change: TreeChange, action: Option<MoveAction>) {
        let mut changes = std::mem::take(&mut self.pending);
        changes.push(change);
        self.groups.push(UndoGroup { changes, action });
    }

    /// Commits temporary removals that were never followed by an insertion.
    pub fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let changes = std::mem::take(&mut self.pending);
        self.groups.push(UndoGroup {
            changes,
            action: None,
        });
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn groups(&self) -> &[UndoGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn pop(&mut self) -> Option<UndoGroup> {
        self.flush_pending();
        self.groups.pop()
    }
}
