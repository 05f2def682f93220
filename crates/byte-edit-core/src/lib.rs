//! Byte segment diffing for remote document editing.
//!
//! Two strategies turn an original segment into an edited one:
//! - [`optimizer::optimize`] trims the common prefix and suffix and yields a
//!   single replacement span,
//! - [`planner::plan`] yields typed insert/delete/overwrite operations that
//!   keep scattered edits apart.
//!
//! Nothing here performs I/O; see the `byte-edit` crate for applying edits to
//! a remote session.

pub mod bytes;
pub mod operation;
pub mod optimizer;
pub mod planner;

pub use operation::{apply_operations, coalesce, ApplyError, EditOperation, EditOperationKind};
pub use optimizer::{optimize, OptimizedReplacement};
pub use planner::plan;
