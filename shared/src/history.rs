use std::num::NonZeroUsize;

use log::debug;

use crate::error::WhiteboardError;
use crate::surface::Surface;

/// A PNG-encoded copy of the whole surface.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Vec<u8>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("bytes", &self.png.len())
            .finish()
    }
}

impl Snapshot {
    pub fn capture(surface: &Surface) -> Result<Self, WhiteboardError> {
        Ok(Self {
            png: surface.encode_png()?,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.png
    }

    #[cfg(test)]
    pub(crate) fn from_png(png: Vec<u8>) -> Self {
        Self { png }
    }
}

/// Undo and redo stacks of full-surface snapshots.
///
/// The undo stack is seeded with one snapshot and never drops below it, so
/// its top is always the snapshot matching the surface. Pushing a new
/// snapshot discards every redo entry.
#[derive(Debug)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    max_depth: Option<NonZeroUsize>,
}

impl History {
    pub fn new(initial: Snapshot, max_depth: Option<NonZeroUsize>) -> Self {
        Self {
            undo: vec![initial],
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Appends a snapshot and clears the redo stack. Returns how many of the
    /// oldest snapshots were evicted to respect the depth limit.
    pub fn push(&mut self, snapshot: Snapshot) -> usize {
        self.undo.push(snapshot);
        self.redo.clear();
        let Some(max_depth) = self.max_depth else {
            return 0;
        };
        let overflow = self.undo.len().saturating_sub(max_depth.get());
        if overflow > 0 {
            self.undo.drain(0..overflow);
            debug!("history evicted {overflow} oldest snapshot(s)");
        }
        overflow
    }

    /// Snapshot an undo would show, without moving anything.
    pub fn undo_target(&self) -> Option<&Snapshot> {
        let len = self.undo.len();
        if len < 2 {
            return None;
        }
        self.undo.get(len - 2)
    }

    pub fn redo_target(&self) -> Option<&Snapshot> {
        self.redo.last()
    }

    /// Moves the current snapshot onto the redo stack and returns the one
    /// that should now be shown. `None` at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.undo.len() < 2 {
            return None;
        }
        let current = self.undo.pop()?;
        self.redo.push(current);
        self.undo.last()
    }

    pub fn redo(&mut self) -> Option<&Snapshot> {
        let snapshot = self.redo.pop()?;
        self.undo.push(snapshot);
        self.undo.last()
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.undo.last()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
