//! Typed edit operations over a byte document.
//!
//! Operations carry absolute document offsets. A planned sequence is sorted
//! by `start`, non-overlapping, and expressed in the coordinates the document
//! had before the first operation of the batch was applied.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bytes::concat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditOperationKind {
    Insert,
    Delete,
    Overwrite,
}

impl fmt::Display for EditOperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Overwrite => "overwrite",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EditOperation {
    Insert { start: usize, data: Vec<u8> },
    Delete { start: usize, length: usize },
    Overwrite { start: usize, data: Vec<u8> },
}

impl EditOperation {
    pub fn kind(&self) -> EditOperationKind {
        match self {
            Self::Insert { .. } => EditOperationKind::Insert,
            Self::Delete { .. } => EditOperationKind::Delete,
            Self::Overwrite { .. } => EditOperationKind::Overwrite,
        }
    }

    pub fn start(&self) -> usize {
        match self {
            Self::Insert { start, .. }
            | Self::Delete { start, .. }
            | Self::Overwrite { start, .. } => *start,
        }
    }

    /// Bytes covered by the operation: the deleted length for deletes, the
    /// payload length otherwise.
    pub fn span_len(&self) -> usize {
        match self {
            Self::Delete { length, .. } => *length,
            Self::Insert { data, .. } | Self::Overwrite { data, .. } => data.len(),
        }
    }

    /// Exclusive end offset, `start + span_len`.
    pub fn end(&self) -> usize {
        self.start() + self.span_len()
    }

    /// Whether `next` has the same kind and starts exactly where `self` ends.
    pub fn touches(&self, next: &EditOperation) -> bool {
        self.kind() == next.kind() && self.end() == next.start()
    }

    /// Merge `next` into `self` when the two touch. Returns `false` and leaves
    /// `self` unchanged otherwise.
    pub fn absorb(&mut self, next: &EditOperation) -> bool {
        if !self.touches(next) {
            return false;
        }
        let merged = match (&*self, next) {
            (Self::Delete { start, length }, Self::Delete { length: more, .. }) => Self::Delete {
                start: *start,
                length: length + more,
            },
            (Self::Insert { start, data }, Self::Insert { data: more, .. }) => Self::Insert {
                start: *start,
                data: concat(data, more),
            },
            (Self::Overwrite { start, data }, Self::Overwrite { data: more, .. }) => {
                Self::Overwrite {
                    start: *start,
                    data: concat(data, more),
                }
            }
            _ => return false,
        };
        *self = merged;
        true
    }
}

/// Coalesce adjacent operations of the same kind whose spans touch. The
/// result is a fixed point: running it again changes nothing.
pub fn coalesce(ops: Vec<EditOperation>) -> Vec<EditOperation> {
    let mut result: Vec<EditOperation> = Vec::with_capacity(ops.len());
    for op in ops {
        if let Some(last) = result.last_mut() {
            if last.absorb(&op) {
                continue;
            }
        }
        result.push(op);
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("{kind} at offset {start} (span {span}) is outside buffer [{base}, {end})")]
    OutOfBounds {
        kind: EditOperationKind,
        start: usize,
        span: usize,
        base: usize,
        end: usize,
    },
}

/// End of `len` bytes from `pos`, if they fit in a buffer of `limit` bytes.
fn span_end(pos: usize, len: usize, limit: usize) -> Option<usize> {
    pos.checked_add(len).filter(|&stop| stop <= limit)
}

/// Apply `ops` in order to a local buffer whose index 0 sits at document
/// offset `base`.
pub fn apply_operations(
    buffer: &mut Vec<u8>,
    base: usize,
    ops: &[EditOperation],
) -> Result<(), ApplyError> {
    for op in ops {
        let end = base.saturating_add(buffer.len());
        let out_of_bounds = || ApplyError::OutOfBounds {
            kind: op.kind(),
            start: op.start(),
            span: op.span_len(),
            base,
            end,
        };
        let pos = op.start().checked_sub(base).ok_or_else(out_of_bounds)?;
        match op {
            EditOperation::Insert { data, .. } => {
                if pos > buffer.len() {
                    return Err(out_of_bounds());
                }
                buffer.splice(pos..pos, data.iter().copied());
            }
            EditOperation::Delete { length, .. } => {
                let stop = span_end(pos, *length, buffer.len()).ok_or_else(out_of_bounds)?;
                buffer.drain(pos..stop);
            }
            EditOperation::Overwrite { data, .. } => {
                let stop = span_end(pos, data.len(), buffer.len()).ok_or_else(out_of_bounds)?;
                buffer[pos..stop].copy_from_slice(data);
            }
        }
    }
    Ok(())
}
