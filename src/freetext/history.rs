/// Number of snapshots kept unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Linear undo/redo history of free-text snapshots.
///
/// The cursor always points at a valid snapshot: the one currently live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    snapshots: Vec<String>,
    cursor: usize,
    limit: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Create a history keeping at most `limit` snapshots (0 = unbounded)
    pub fn with_limit(initial: impl Into<String>, limit: usize) -> Self {
        History {
            snapshots: vec![initial.into()],
            cursor: 0,
            limit,
        }
    }

    /// Record a new version of the content.
    /// This discards any redo entries and makes `content` the live snapshot.
    /// Content equal to the live snapshot is ignored; returns whether a
    /// snapshot was added.
    pub fn record(&mut self, content: &str) -> bool {
        if content == self.current() {
            return false;
        }

        // If we're in the middle of history, drop everything after the cursor
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(content.to_string());

        // Limit history size
        if self.limit > 0 && self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }

        self.cursor = self.snapshots.len() - 1;
        log::debug!(
            "Recorded snapshot {} of {}",
            self.cursor + 1,
            self.snapshots.len()
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Step back one snapshot.
    /// Returns the snapshot that is now live, or None if there is nothing to undo
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one snapshot.
    /// Returns the snapshot that is now live, or None if there is nothing to redo
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// The live snapshot
    pub fn current(&self) -> &str {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn snapshots(&self) -> &[String] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
