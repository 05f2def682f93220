//! Per-caller counters of remote edit outcomes.

use serde::{Deserialize, Serialize};

use crate::error::Primitive;

/// Caller-owned tally of remote edit outcomes.
///
/// The applier only ever increments these counters: one success counter per
/// accepted primitive, `error_count` once per failed one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditStats {
    pub delete_count: u64,
    pub insert_count: u64,
    pub overwrite_count: u64,
    pub undo_count: u64,
    pub redo_count: u64,
    pub clear_count: u64,
    pub error_count: u64,
}

impl EditStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Successful primitives of every kind.
    pub fn total(&self) -> u64 {
        self.delete_count
            + self.insert_count
            + self.overwrite_count
            + self.undo_count
            + self.redo_count
            + self.clear_count
    }

    pub(crate) fn record_success(&mut self, primitive: Primitive) {
        let counter = match primitive {
            Primitive::Insert => &mut self.insert_count,
            Primitive::Delete => &mut self.delete_count,
            Primitive::Overwrite => &mut self.overwrite_count,
            Primitive::Undo => &mut self.undo_count,
            Primitive::Redo => &mut self.redo_count,
            Primitive::Clear => &mut self.clear_count,
        };
        *counter += 1;
    }

    pub(crate) fn record_error(&mut self) {
        self.error_count += 1;
    }
}
