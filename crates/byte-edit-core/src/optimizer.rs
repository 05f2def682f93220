//! Single-span edit optimization.
//!
//! Reduces an (original, edited) segment pair to one contiguous replacement
//! by trimming the common prefix and suffix. This never yields more than one
//! span, even when several small edits would touch fewer bytes.

use serde::{Deserialize, Serialize};

use crate::bytes::{common_prefix_len, common_suffix_len};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedReplacement {
    /// Absolute document offset where the replacement starts.
    pub offset: usize,
    /// Number of original bytes removed at `offset`.
    pub remove_bytes_count: usize,
    /// Bytes inserted in place of the removed run.
    pub replacement: Vec<u8>,
}

impl OptimizedReplacement {
    pub fn is_insert(&self) -> bool {
        self.remove_bytes_count == 0
    }

    pub fn is_delete(&self) -> bool {
        self.replacement.is_empty()
    }

    pub fn is_overwrite(&self) -> bool {
        self.remove_bytes_count == self.replacement.len()
    }
}

/// Compute the minimal contiguous replacement turning `original` into
/// `edited`, both located at document `offset`. Returns `None` when the
/// segments are identical.
pub fn optimize(original: &[u8], edited: &[u8], offset: usize) -> Option<OptimizedReplacement> {
    let first_difference = common_prefix_len(original, edited);
    if first_difference == original.len() && first_difference == edited.len() {
        return None;
    }
    let last_difference = common_suffix_len(original, edited, first_difference);
    Some(OptimizedReplacement {
        offset: offset + first_difference,
        remove_bytes_count: original.len() - first_difference - last_difference,
        replacement: edited[first_difference..edited.len() - last_difference].to_vec(),
    })
}
