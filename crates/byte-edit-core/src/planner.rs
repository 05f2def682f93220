//! Multi-operation edit planning.
//!
//! Unlike [`crate::optimizer::optimize`], the planner keeps scattered edits
//! apart: each run of differing bytes becomes its own overwrite, and a length
//! change becomes one trailing insert or delete. Finer operations keep undo
//! entries and viewport diffs small.
//!
//! Output shape: zero or more overwrites followed by at most one insert or
//! delete. Overwrites preserve length, so every `start` stays valid while the
//! batch is applied front to back.

use crate::bytes::strip_common_suffix;
use crate::operation::{coalesce, EditOperation};

/// Plan the operations turning `original` into `edited`, both located at
/// document `offset`.
pub fn plan(original: &[u8], edited: &[u8], offset: usize) -> Vec<EditOperation> {
    if original.is_empty() {
        if edited.is_empty() {
            return Vec::new();
        }
        return vec![EditOperation::Insert {
            start: offset,
            data: edited.to_vec(),
        }];
    }
    if edited.is_empty() {
        return vec![EditOperation::Delete {
            start: offset,
            length: original.len(),
        }];
    }

    let (original, edited) = strip_common_suffix(original, edited);
    let len1 = original.len();
    let len2 = edited.len();
    let mut ops: Vec<EditOperation> = Vec::new();

    for i in 0..len1.max(len2) {
        let at = offset + i;
        if i < len1 && i < len2 {
            if original[i] == edited[i] {
                continue;
            }
            if let Some(EditOperation::Overwrite { start, data }) = ops.last_mut() {
                if *start + data.len() == at {
                    data.push(edited[i]);
                    continue;
                }
            }
            ops.push(EditOperation::Overwrite {
                start: at,
                data: vec![edited[i]],
            });
        } else if i < len1 {
            let remaining = len1 - i;
            match ops.last_mut() {
                Some(EditOperation::Delete { start, length }) if *start + *length == at => {
                    *length += remaining;
                }
                _ => ops.push(EditOperation::Delete {
                    start: at,
                    length: remaining,
                }),
            }
            break;
        } else {
            ops.push(EditOperation::Insert {
                start: at,
                data: edited[i..].to_vec(),
            });
            break;
        }
    }

    coalesce(ops)
}
