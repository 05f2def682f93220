//! Applying planned edits to a remote session.
//!
//! Remote calls are issued strictly one after another. Multi-step batches
//! are wrapped in a remote transaction; planned batches additionally pause
//! viewport events so subscribers only ever see the final state, announced
//! by a single change notification.
//!
//! A failing primitive aborts the batch. Nothing already applied is rolled
//! back and the transaction (and event pause) is left open for the caller to
//! resolve, e.g. by ending it and undoing.

use byte_edit_core::{optimize, plan, EditOperation};

use crate::error::{EditError, EditResult, Primitive, SessionCall};
use crate::port::{PortError, PortResult, RemoteSessionPort, Serial};
use crate::stats::EditStats;

fn checked_serial(
    primitive: Primitive,
    session: &str,
    result: PortResult<Serial>,
    stats: Option<&mut EditStats>,
) -> EditResult<Serial> {
    let outcome = match result {
        Ok(0) => Err(EditError::NoChange { primitive }),
        Ok(serial) => Ok(serial),
        Err(source) => Err(EditError::Rejected { primitive, source }),
    };
    match &outcome {
        Ok(serial) => {
            tracing::debug!(session, %primitive, serial, "edit.primitive.ok");
        }
        Err(err) => {
            tracing::error!(session, %primitive, error = %err, "edit.primitive.failed");
        }
    }
    if let Some(stats) = stats {
        match outcome {
            Ok(_) => stats.record_success(primitive),
            Err(_) => stats.record_error(),
        }
    }
    outcome
}

fn session_call<T>(call: SessionCall, session: &str, result: PortResult<T>) -> EditResult<T> {
    result
        .map(|value| {
            tracing::debug!(session, %call, "edit.session.ok");
            value
        })
        .map_err(|source: PortError| {
            tracing::error!(session, %call, error = %source, "edit.session.failed");
            EditError::Session { call, source }
        })
}

/// Insert `data` at `offset`.
pub async fn insert<P>(
    port: &P,
    session: &str,
    offset: usize,
    data: &[u8],
    stats: Option<&mut EditStats>,
) -> EditResult<Serial>
where
    P: RemoteSessionPort + ?Sized,
{
    tracing::debug!(session, offset, len = data.len(), "edit.insert");
    let result = port.insert(session, offset, data).await;
    checked_serial(Primitive::Insert, session, result, stats)
}

/// Delete `length` bytes at `offset`.
pub async fn delete<P>(
    port: &P,
    session: &str,
    offset: usize,
    length: usize,
    stats: Option<&mut EditStats>,
) -> EditResult<Serial>
where
    P: RemoteSessionPort + ?Sized,
{
    tracing::debug!(session, offset, len = length, "edit.delete");
    let result = port.delete(session, offset, length).await;
    checked_serial(Primitive::Delete, session, result, stats)
}

/// Overwrite `data.len()` bytes at `offset` with `data`.
pub async fn overwrite<P>(
    port: &P,
    session: &str,
    offset: usize,
    data: &[u8],
    stats: Option<&mut EditStats>,
) -> EditResult<Serial>
where
    P: RemoteSessionPort + ?Sized,
{
    tracing::debug!(session, offset, len = data.len(), "edit.overwrite");
    let result = port.overwrite(session, offset, data).await;
    checked_serial(Primitive::Overwrite, session, result, stats)
}

/// Undo the last change. Returns the negated serial of the undone change.
pub async fn undo<P>(port: &P, session: &str, stats: Option<&mut EditStats>) -> EditResult<Serial>
where
    P: RemoteSessionPort + ?Sized,
{
    tracing::debug!(session, "edit.undo");
    let result = port.undo(session).await;
    checked_serial(Primitive::Undo, session, result, stats)
}

/// Redo the last undone change. Returns the serial of the redone change.
pub async fn redo<P>(port: &P, session: &str, stats: Option<&mut EditStats>) -> EditResult<Serial>
where
    P: RemoteSessionPort + ?Sized,
{
    tracing::debug!(session, "edit.redo");
    let result = port.redo(session).await;
    checked_serial(Primitive::Redo, session, result, stats)
}

/// Drop every change in the session. Returns the cleared session id.
pub async fn clear<P>(port: &P, session: &str, stats: Option<&mut EditStats>) -> EditResult<String>
where
    P: RemoteSessionPort + ?Sized,
{
    tracing::debug!(session, "edit.clear");
    match port.clear(session).await {
        Ok(id) => {
            tracing::debug!(session, "edit.clear.ok");
            if let Some(stats) = stats {
                stats.record_success(Primitive::Clear);
            }
            Ok(id)
        }
        Err(source) => {
            tracing::error!(session, error = %source, "edit.clear.failed");
            if let Some(stats) = stats {
                stats.record_error();
            }
            Err(EditError::Rejected {
                primitive: Primitive::Clear,
                source,
            })
        }
    }
}

async fn submit<P>(
    port: &P,
    session: &str,
    op: &EditOperation,
    stats: Option<&mut EditStats>,
) -> EditResult<Serial>
where
    P: RemoteSessionPort + ?Sized,
{
    match op {
        EditOperation::Insert { start, data } => {
            insert(port, session, *start, data, stats).await
        }
        EditOperation::Delete { start, length } => {
            delete(port, session, *start, *length, stats).await
        }
        EditOperation::Overwrite { start, data } => {
            overwrite(port, session, *start, data, stats).await
        }
    }
}

/// Replace `remove_bytes_count` bytes at `offset` with `replacement` using
/// the cheapest primitive. Returns the serial of the last primitive issued.
///
/// Only the general case (different non-zero lengths) needs two calls; they
/// are wrapped in a transaction so they undo as one change.
pub async fn apply_replace<P>(
    port: &P,
    session: &str,
    offset: usize,
    remove_bytes_count: usize,
    replacement: &[u8],
    mut stats: Option<&mut EditStats>,
) -> EditResult<Serial>
where
    P: RemoteSessionPort + ?Sized,
{
    if remove_bytes_count == 0 {
        return insert(port, session, offset, replacement, stats).await;
    }
    if replacement.is_empty() {
        return delete(port, session, offset, remove_bytes_count, stats).await;
    }
    if replacement.len() == remove_bytes_count {
        return overwrite(port, session, offset, replacement, stats).await;
    }

    let ops = [
        EditOperation::Delete {
            start: offset,
            length: remove_bytes_count,
        },
        EditOperation::Insert {
            start: offset,
            data: replacement.to_vec(),
        },
    ];
    session_call(
        SessionCall::BeginTransaction,
        session,
        port.begin_transaction(session).await,
    )?;
    let mut serial = 0;
    for (index, op) in ops.iter().enumerate() {
        serial = submit(port, session, op, stats.as_deref_mut())
            .await
            .map_err(|err| batch_failure(session, index, ops.len(), op, true, err))?;
    }
    session_call(
        SessionCall::EndTransaction,
        session,
        port.end_transaction(session).await,
    )?;
    Ok(serial)
}

fn batch_failure(
    session: &str,
    index: usize,
    total: usize,
    op: &EditOperation,
    transaction_open: bool,
    err: EditError,
) -> EditError {
    if transaction_open {
        tracing::warn!(
            session,
            index,
            total,
            kind = %op.kind(),
            "edit.batch.aborted; remote transaction left open"
        );
    }
    EditError::Operation {
        index,
        total,
        kind: op.kind(),
        source: Box::new(err),
    }
}

/// Issue `ops` in order. Batches of more than one operation run inside a
/// remote transaction with viewport events paused, followed by exactly one
/// changed-viewports notification.
///
/// Returns the serial of the last operation, or `None` for an empty batch.
pub async fn apply_operations<P>(
    port: &P,
    session: &str,
    ops: &[EditOperation],
    mut stats: Option<&mut EditStats>,
) -> EditResult<Option<Serial>>
where
    P: RemoteSessionPort + ?Sized,
{
    let total = ops.len();
    let bracketed = total > 1;
    if bracketed {
        session_call(
            SessionCall::BeginTransaction,
            session,
            port.begin_transaction(session).await,
        )?;
        session_call(
            SessionCall::PauseViewportEvents,
            session,
            port.pause_viewport_events(session).await,
        )?;
    }

    let mut last = None;
    for (index, op) in ops.iter().enumerate() {
        let serial = submit(port, session, op, stats.as_deref_mut())
            .await
            .map_err(|err| batch_failure(session, index, total, op, bracketed, err))?;
        last = Some(serial);
    }

    if bracketed {
        session_call(
            SessionCall::ResumeViewportEvents,
            session,
            port.resume_viewport_events(session).await,
        )?;
        session_call(
            SessionCall::EndTransaction,
            session,
            port.end_transaction(session).await,
        )?;
        let notified = session_call(
            SessionCall::NotifyChangedViewports,
            session,
            port.notify_changed_viewports(session).await,
        )?;
        tracing::debug!(session, total, notified, "edit.batch.committed");
    }
    Ok(last)
}

/// Plan the edit from `original` to `edited` at `offset` and apply it with
/// [`apply_operations`].
pub async fn apply_plan<P>(
    port: &P,
    session: &str,
    offset: usize,
    original: &[u8],
    edited: &[u8],
    stats: Option<&mut EditStats>,
) -> EditResult<Option<Serial>>
where
    P: RemoteSessionPort + ?Sized,
{
    let ops = plan(original, edited, offset);
    tracing::debug!(session, offset, operations = ops.len(), "edit.plan");
    apply_operations(port, session, &ops, stats).await
}

/// Collapse the edit to a single replacement span and apply it with
/// [`apply_replace`]. Viewport events are left alone, so callers doing bulk
/// edits can pause them once around many calls.
///
/// Returns `None` when the segments are identical.
pub async fn edit_simple<P>(
    port: &P,
    session: &str,
    offset: usize,
    original: &[u8],
    edited: &[u8],
    stats: Option<&mut EditStats>,
) -> EditResult<Option<Serial>>
where
    P: RemoteSessionPort + ?Sized,
{
    let Some(r) = optimize(original, edited, offset) else {
        return Ok(None);
    };
    apply_replace(port, session, r.offset, r.remove_bytes_count, &r.replacement, stats)
        .await
        .map(Some)
}
