//! Failures of remote edits and the session calls around them.

use std::fmt;

use byte_edit_core::EditOperationKind;
use thiserror::Error;

use crate::port::PortError;

/// Remote calls that change session content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Insert,
    Delete,
    Overwrite,
    Undo,
    Redo,
    Clear,
}

impl From<EditOperationKind> for Primitive {
    fn from(kind: EditOperationKind) -> Self {
        match kind {
            EditOperationKind::Insert => Self::Insert,
            EditOperationKind::Delete => Self::Delete,
            EditOperationKind::Overwrite => Self::Overwrite,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Overwrite => "overwrite",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Clear => "clear",
        })
    }
}

/// Remote calls that bracket a batch without changing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionCall {
    BeginTransaction,
    EndTransaction,
    PauseViewportEvents,
    ResumeViewportEvents,
    NotifyChangedViewports,
}

impl fmt::Display for SessionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BeginTransaction => "begin transaction",
            Self::EndTransaction => "end transaction",
            Self::PauseViewportEvents => "pause viewport events",
            Self::ResumeViewportEvents => "resume viewport events",
            Self::NotifyChangedViewports => "notify changed viewports",
        })
    }
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("{primitive} failed: {source}")]
    Rejected {
        primitive: Primitive,
        #[source]
        source: PortError,
    },
    #[error("{primitive} failed: remote returned change serial 0")]
    NoChange { primitive: Primitive },
    #[error("{call} failed: {source}")]
    Session {
        call: SessionCall,
        #[source]
        source: PortError,
    },
    /// Operation `index` of a `total`-operation batch failed; operations
    /// before it were already applied and are not rolled back.
    #[error("edit operation {index} of {total} ({kind}) failed: {source}")]
    Operation {
        index: usize,
        total: usize,
        kind: EditOperationKind,
        #[source]
        source: Box<EditError>,
    },
}

impl EditError {
    /// The content primitive that failed, looking through batch context.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Self::Rejected { primitive, .. } | Self::NoChange { primitive } => Some(*primitive),
            Self::Session { .. } => None,
            Self::Operation { source, .. } => source.primitive(),
        }
    }

    /// Number of operations of the failed batch that reached the remote
    /// before the failure.
    pub fn applied_before_failure(&self) -> usize {
        match self {
            Self::Operation { index, .. } => *index,
            _ => 0,
        }
    }
}

pub type EditResult<T> = Result<T, EditError>;
