//! Per-table change notifications.
//!
//! The backend's realtime channel reports row changes per table. The client
//! never diffs payloads: a change on a table a screen cares about triggers a
//! full re-fetch of that screen's list. [`ChangeFeed`] is the in-process hub
//! those notifications fan out through; a realtime socket drives it in
//! production, and the in-memory store drives it directly in tests.

use tokio::sync::broadcast;

/// Kind of row change reported for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A change notification for one table. No row payload is carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableChange {
    pub table: String,
    pub kind: ChangeKind,
}

/// Broadcast hub for table change notifications.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<TableChange>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.tx.subscribe()
    }

    /// Publish a change. Lagging or absent subscribers are not an error.
    pub fn publish(&self, table: impl Into<String>, kind: ChangeKind) {
        let _ = self.tx.send(TableChange {
            table: table.into(),
            kind,
        });
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(64)
    }
}
