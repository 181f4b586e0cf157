//! Linear undo/redo history over element-list snapshots.

use crate::elements::ElementList;
use log::trace;
use serde::{Deserialize, Serialize};

/// How a commit lands in the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitMode {
    /// Drop any redo entries and append a new snapshot.
    #[default]
    Discrete,
    /// Replace the current snapshot in place.
    Overwrite,
}

/// Snapshot history with a cursor.
///
/// `snapshots[index]` is always the list on screen. The history starts with
/// one empty snapshot and never becomes empty.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<ElementList>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            snapshots: vec![ElementList::new()],
            index: 0,
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> &ElementList {
        &self.snapshots[self.index]
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Record `elements` as the new current state.
    pub fn commit(&mut self, elements: ElementList, mode: CommitMode) {
        match mode {
            CommitMode::Overwrite => {
                trace!("history: overwrite snapshot {}", self.index);
                self.snapshots[self.index] = elements;
            }
            CommitMode::Discrete => {
                self.snapshots.truncate(self.index + 1);
                self.snapshots.push(elements);
                self.index += 1;
                trace!("history: snapshot {} of {}", self.index, self.snapshots.len());
            }
        }
    }

    /// Commit the list produced from the current snapshot.
    pub fn commit_with<F>(&mut self, producer: F, mode: CommitMode)
    where
        F: FnOnce(&ElementList) -> ElementList,
    {
        let next = producer(self.current());
        self.commit(next, mode);
    }

    /// Step back one snapshot. Returns `false` at the first snapshot.
    pub fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one snapshot. Returns `false` at the last snapshot.
    pub fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }
}
