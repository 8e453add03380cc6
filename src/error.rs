//! Error types for the editor, its bindings, the selection broker and session replay.

use thiserror::Error;

use crate::editor::SelectionToken;
use crate::types::FieldId;

/// Rejected index-binding transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
  #[error("index binding for {field}: cannot {event} while {state}")]
  InvalidTransition {
    field: FieldId,
    state: &'static str,
    event: &'static str,
  },
}

/// Failures of the column selection request/response channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
  #[error("no pending selection request for token {0}")]
  UnknownToken(SelectionToken),
  #[error("no field is waiting for a column selection")]
  NoPendingRequest,
  #[error("{0} fields are waiting for a column selection; resolve one by token")]
  Ambiguous(usize),
}

/// Errors returned by editor operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
  #[error("unknown operator token: {0:?}")]
  UnknownOperator(String),
  #[error("field {0} does not carry an operator")]
  NoOperator(FieldId),
  #[error("index binding is disabled for this node")]
  IndicesDisabled,
  #[error(transparent)]
  Binding(#[from] BindingError),
  #[error(transparent)]
  Selection(#[from] SelectionError),
}

/// A drag payload that could not be used. Editors log and drop these.
#[derive(Debug, Error)]
pub enum DragPayloadError {
  #[error("drag payload is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),
  #[error("drag payload has no column index")]
  MissingColumnIndex,
}

/// Errors while loading, replaying or saving an editing session.
#[derive(Debug, Error)]
pub enum SessionError {
  #[error("session io: {0}")]
  Io(#[from] std::io::Error),
  #[error("session json: {0}")]
  Json(#[from] serde_json::Error),
  #[error("event {position} failed: {source}")]
  Event {
    position: usize,
    #[source]
    source: EditorError,
  },
  #[error("event {position} follows close")]
  EventAfterClose { position: usize },
}
