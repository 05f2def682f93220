#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use byte_edit::{PortError, PortResult, RemoteSessionPort, Serial, SessionCall};

pub const SESSION: &str = "session-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Insert(usize, Vec<u8>),
    Delete(usize, usize),
    Overwrite(usize, Vec<u8>),
    Undo,
    Redo,
    Clear,
    BeginTransaction,
    EndTransaction,
    PauseViewportEvents,
    ResumeViewportEvents,
    NotifyChangedViewports,
}

impl Call {
    pub fn is_bracketing(&self) -> bool {
        matches!(
            self,
            Call::BeginTransaction
                | Call::EndTransaction
                | Call::PauseViewportEvents
                | Call::ResumeViewportEvents
                | Call::NotifyChangedViewports
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The request errors out.
    Reject,
    /// The request "succeeds" with change serial 0.
    ZeroSerial,
}

struct Change {
    serial: Serial,
    before: Vec<u8>,
    after: Vec<u8>,
}

#[derive(Default)]
struct State {
    initial: Vec<u8>,
    content: Vec<u8>,
    calls: Vec<Call>,
    next_serial: Serial,
    primitives_seen: usize,
    fail_primitive: Option<(usize, Failure)>,
    fail_session_call: Option<SessionCall>,
    transaction_depth: usize,
    transaction_open_change: bool,
    events_paused: bool,
    changes: Vec<Change>,
    undone: Vec<Change>,
}

/// In-memory stand-in for a remote editing session. Records every call and
/// applies content changes to a local buffer.
pub struct FakeSession {
    state: Mutex<State>,
}

impl FakeSession {
    pub fn new(content: &[u8]) -> Self {
        Self {
            state: Mutex::new(State {
                initial: content.to_vec(),
                content: content.to_vec(),
                next_serial: 1,
                ..State::default()
            }),
        }
    }

    /// Make the `nth` (0-based) content primitive fail.
    pub fn failing_primitive(self, nth: usize, failure: Failure) -> Self {
        self.lock().fail_primitive = Some((nth, failure));
        self
    }

    pub fn failing_session_call(self, call: SessionCall) -> Self {
        self.lock().fail_session_call = Some(call);
        self
    }

    pub fn content(&self) -> Vec<u8> {
        self.lock().content.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn bracketing_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_bracketing).collect()
    }

    pub fn transaction_depth(&self) -> usize {
        self.lock().transaction_depth
    }

    pub fn events_paused(&self) -> bool {
        self.lock().events_paused
    }

    /// Number of undoable changes, counting a transaction as one.
    pub fn change_count(&self) -> usize {
        self.lock().changes.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("fake session lock poisoned")
    }

    fn mutate<F>(&self, call: Call, f: F) -> PortResult<Serial>
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), String>,
    {
        let mut guard = self.lock();
        let state = &mut *guard;
        state.calls.push(call);
        let nth = state.primitives_seen;
        state.primitives_seen += 1;
        match state.fail_primitive {
            Some((n, Failure::Reject)) if n == nth => {
                return Err(PortError::new("rejected by fake session"))
            }
            Some((n, Failure::ZeroSerial)) if n == nth => return Ok(0),
            _ => {}
        }

        let before = state.content.clone();
        f(&mut state.content).map_err(PortError::new)?;
        let after = state.content.clone();
        let serial = state.next_serial;
        state.next_serial += 1;
        state.undone.clear();

        let extend_open = state.transaction_depth > 0 && state.transaction_open_change;
        match state.changes.last_mut() {
            Some(last) if extend_open => {
                last.serial = serial;
                last.after = after;
            }
            _ => {
                state.changes.push(Change { serial, before, after });
                state.transaction_open_change = state.transaction_depth > 0;
            }
        }
        Ok(serial)
    }

    fn control(&self, call: Call, kind: SessionCall) -> PortResult<()> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.fail_session_call == Some(kind) {
            return Err(PortError::new(format!("{kind} refused by fake session")));
        }
        match kind {
            SessionCall::BeginTransaction => {
                state.transaction_depth += 1;
                state.transaction_open_change = false;
            }
            SessionCall::EndTransaction => {
                state.transaction_depth = state.transaction_depth.saturating_sub(1);
                state.transaction_open_change = false;
            }
            SessionCall::PauseViewportEvents => state.events_paused = true,
            SessionCall::ResumeViewportEvents => state.events_paused = false,
            SessionCall::NotifyChangedViewports => {}
        }
        Ok(())
    }
}

fn check_range(content: &[u8], offset: usize, len: usize) -> Result<(), String> {
    if offset + len > content.len() {
        return Err(format!("range {offset}+{len} exceeds content length {}", content.len()));
    }
    Ok(())
}

#[async_trait]
impl RemoteSessionPort for FakeSession {
    async fn insert(&self, _session: &str, offset: usize, data: &[u8]) -> PortResult<Serial> {
        self.mutate(Call::Insert(offset, data.to_vec()), |content| {
            check_range(content, offset, 0)?;
            content.splice(offset..offset, data.iter().copied());
            Ok(())
        })
    }

    async fn delete(&self, _session: &str, offset: usize, length: usize) -> PortResult<Serial> {
        self.mutate(Call::Delete(offset, length), |content| {
            check_range(content, offset, length)?;
            content.drain(offset..offset + length);
            Ok(())
        })
    }

    async fn overwrite(&self, _session: &str, offset: usize, data: &[u8]) -> PortResult<Serial> {
        self.mutate(Call::Overwrite(offset, data.to_vec()), |content| {
            check_range(content, offset, data.len())?;
            content[offset..offset + data.len()].copy_from_slice(data);
            Ok(())
        })
    }

    async fn undo(&self, _session: &str) -> PortResult<Serial> {
        let mut state = self.lock();
        state.calls.push(Call::Undo);
        let nth = state.primitives_seen;
        state.primitives_seen += 1;
        if let Some((n, failure)) = state.fail_primitive {
            if n == nth {
                return match failure {
                    Failure::Reject => Err(PortError::new("undo rejected by fake session")),
                    Failure::ZeroSerial => Ok(0),
                };
            }
        }
        let Some(change) = state.changes.pop() else {
            return Ok(0);
        };
        state.content = change.before.clone();
        let serial = -change.serial;
        state.undone.push(change);
        Ok(serial)
    }

    async fn redo(&self, _session: &str) -> PortResult<Serial> {
        let mut state = self.lock();
        state.calls.push(Call::Redo);
        let nth = state.primitives_seen;
        state.primitives_seen += 1;
        if let Some((n, failure)) = state.fail_primitive {
            if n == nth {
                return match failure {
                    Failure::Reject => Err(PortError::new("redo rejected by fake session")),
                    Failure::ZeroSerial => Ok(0),
                };
            }
        }
        let Some(change) = state.undone.pop() else {
            return Ok(0);
        };
        state.content = change.after.clone();
        let serial = change.serial;
        state.changes.push(change);
        Ok(serial)
    }

    async fn clear(&self, session: &str) -> PortResult<String> {
        let mut guard = self.lock();
        let state = &mut *guard;
        state.calls.push(Call::Clear);
        state.content = state.initial.clone();
        state.changes.clear();
        state.undone.clear();
        Ok(session.to_string())
    }

    async fn begin_transaction(&self, session: &str) -> PortResult<String> {
        self.control(Call::BeginTransaction, SessionCall::BeginTransaction)?;
        Ok(session.to_string())
    }

    async fn end_transaction(&self, session: &str) -> PortResult<String> {
        self.control(Call::EndTransaction, SessionCall::EndTransaction)?;
        Ok(session.to_string())
    }

    async fn pause_viewport_events(&self, session: &str) -> PortResult<String> {
        self.control(Call::PauseViewportEvents, SessionCall::PauseViewportEvents)?;
        Ok(session.to_string())
    }

    async fn resume_viewport_events(&self, session: &str) -> PortResult<String> {
        self.control(Call::ResumeViewportEvents, SessionCall::ResumeViewportEvents)?;
        Ok(session.to_string())
    }

    async fn notify_changed_viewports(&self, _session: &str) -> PortResult<usize> {
        self.control(Call::NotifyChangedViewports, SessionCall::NotifyChangedViewports)?;
        Ok(1)
    }
}
