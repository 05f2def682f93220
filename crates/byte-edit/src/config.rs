//! Editor configuration and the session-bound editing facade.

use serde::{Deserialize, Serialize};

use crate::applier;
use crate::error::EditResult;
use crate::port::{RemoteSessionPort, Serial};
use crate::stats::EditStats;

/// How a segment edit is turned into remote calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditStrategy {
    /// Fine-grained insert/delete/overwrite operations, applied as one
    /// transaction with viewport events paused.
    #[default]
    Operations,
    /// One replacement span with the common prefix and suffix trimmed.
    /// Viewport events are not paused.
    Replace,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EditorConfig {
    pub strategy: EditStrategy,
}

/// A port bound to one remote session.
pub struct SessionEditor<P> {
    port: P,
    session: String,
    config: EditorConfig,
}

impl<P: RemoteSessionPort> SessionEditor<P> {
    pub fn new(port: P, session: impl Into<String>) -> Self {
        Self::with_config(port, session, EditorConfig::default())
    }

    pub fn with_config(port: P, session: impl Into<String>, config: EditorConfig) -> Self {
        Self {
            port,
            session: session.into(),
            config,
        }
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Turn `original` at `offset` into `edited` using the configured
    /// strategy. Returns the serial of the last change, or `None` when there
    /// was nothing to change.
    pub async fn edit(
        &self,
        offset: usize,
        original: &[u8],
        edited: &[u8],
        stats: Option<&mut EditStats>,
    ) -> EditResult<Option<Serial>> {
        match self.config.strategy {
            EditStrategy::Operations => {
                applier::apply_plan(&self.port, &self.session, offset, original, edited, stats)
                    .await
            }
            EditStrategy::Replace => {
                applier::edit_simple(&self.port, &self.session, offset, original, edited, stats)
                    .await
            }
        }
    }

    pub async fn replace(
        &self,
        offset: usize,
        remove_bytes_count: usize,
        replacement: &[u8],
        stats: Option<&mut EditStats>,
    ) -> EditResult<Serial> {
        applier::apply_replace(
            &self.port,
            &self.session,
            offset,
            remove_bytes_count,
            replacement,
            stats,
        )
        .await
    }

    pub async fn undo(&self, stats: Option<&mut EditStats>) -> EditResult<Serial> {
        applier::undo(&self.port, &self.session, stats).await
    }

    pub async fn redo(&self, stats: Option<&mut EditStats>) -> EditResult<Serial> {
        applier::redo(&self.port, &self.session, stats).await
    }

    pub async fn clear(&self, stats: Option<&mut EditStats>) -> EditResult<String> {
        applier::clear(&self.port, &self.session, stats).await
    }
}
