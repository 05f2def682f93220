//! Minimal-call, transactional editing of remote byte documents.
//!
//! Given a segment previously read from a remote session and the bytes the
//! caller wants there instead, this crate computes the edit with
//! `byte-edit-core` and drives it through a [`RemoteSessionPort`]:
//! - [`apply_replace`] picks the cheapest primitive for one replacement span,
//! - [`apply_plan`] applies planned operations as a single transaction with
//!   viewport events paused and one consolidated change notification,
//! - [`edit_simple`] is the single-span path for callers managing events
//!   themselves.
//!
//! Outcomes can be tallied into a caller-owned [`EditStats`].

pub mod applier;
pub mod config;
pub mod error;
pub mod port;
pub mod stats;

pub use applier::{
    apply_operations, apply_plan, apply_replace, clear, delete, edit_simple, insert, overwrite,
    redo, undo,
};
pub use byte_edit_core::{optimize, plan, EditOperation, EditOperationKind, OptimizedReplacement};
pub use config::{EditStrategy, EditorConfig, SessionEditor};
pub use error::{EditError, EditResult, Primitive, SessionCall};
pub use port::{PortError, PortResult, RemoteSessionPort, Serial};
pub use stats::EditStats;
