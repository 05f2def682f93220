//! The remote session operations the applier depends on.

use async_trait::async_trait;
use thiserror::Error;

/// Change serial number assigned by the remote session. Accepted mutations
/// get a positive serial, undo reports the negated serial of the change it
/// reverted, and zero means the remote refused the request.
pub type Serial = i64;

/// Failure reported by a [`RemoteSessionPort`] implementation, typically a
/// transport error or an explicit rejection.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PortError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PortError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type PortResult<T> = Result<T, PortError>;

/// Primitive mutation and control calls of a remote editing session.
///
/// Every call is an independent request/response exchange; implementations
/// own timeouts and retries. Offsets are absolute byte positions in the
/// session's current content.
#[async_trait]
pub trait RemoteSessionPort: Send + Sync {
    async fn insert(&self, session: &str, offset: usize, data: &[u8]) -> PortResult<Serial>;

    async fn delete(&self, session: &str, offset: usize, length: usize) -> PortResult<Serial>;

    async fn overwrite(&self, session: &str, offset: usize, data: &[u8]) -> PortResult<Serial>;

    async fn undo(&self, session: &str) -> PortResult<Serial>;

    async fn redo(&self, session: &str) -> PortResult<Serial>;

    /// Drop every change in the session. Returns the session id.
    async fn clear(&self, session: &str) -> PortResult<String>;

    /// Returns the session id.
    async fn begin_transaction(&self, session: &str) -> PortResult<String>;

    /// Returns the session id.
    async fn end_transaction(&self, session: &str) -> PortResult<String>;

    /// Returns the session id.
    async fn pause_viewport_events(&self, session: &str) -> PortResult<String>;

    /// Returns the session id.
    async fn resume_viewport_events(&self, session: &str) -> PortResult<String>;

    /// Notify subscribers of every viewport with pending changes. Returns the
    /// number of viewports notified.
    async fn notify_changed_viewports(&self, session: &str) -> PortResult<usize>;
}
