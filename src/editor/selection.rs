//! Column selection as an explicit request/response channel.
//!
//! A field that wants a column registers a request and gets a token back. The
//! table UI resolves requests by token (or, when exactly one field is waiting,
//! with [ColumnSelectionBroker::resolve_sole]). A resolution is consumed at most
//! once, by the field holding the token.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::SelectionError;
use crate::types::{ColumnRef, FieldId};

/// Identifies one pending column-selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionToken(Uuid);

impl SelectionToken {
  fn fresh() -> Self {
    Self(Uuid::new_v4())
  }
}

impl fmt::Display for SelectionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A request still waiting for the user to pick a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSelection {
  pub token: SelectionToken,
  pub field: FieldId,
}

#[derive(Debug, Clone)]
enum RequestState {
  Pending,
  Resolved(ColumnRef),
}

#[derive(Debug, Clone)]
struct Request {
  token: SelectionToken,
  field: FieldId,
  state: RequestState,
}

/// Shared between every editor in a workspace and the table UI.
#[derive(Debug, Default)]
pub struct ColumnSelectionBroker {
  /// In registration order.
  requests: Vec<Request>,
}

impl ColumnSelectionBroker {
  pub fn new() -> Self {
    Self::default()
  }

  #[instrument(level = "trace", skip(self))]
  pub fn request(&mut self, field: FieldId) -> SelectionToken {
    let token = SelectionToken::fresh();
    self.requests.push(Request {
      token,
      field,
      state: RequestState::Pending,
    });
    token
  }

  /// Requests that have not been resolved yet, oldest first.
  pub fn pending(&self) -> Vec<PendingSelection> {
    self
      .requests
      .iter()
      .filter(|r| matches!(r.state, RequestState::Pending))
      .map(|r| PendingSelection {
        token: r.token,
        field: r.field,
      })
      .collect()
  }

  pub fn is_pending(&self, token: SelectionToken) -> bool {
    self
      .requests
      .iter()
      .any(|r| r.token == token && matches!(r.state, RequestState::Pending))
  }

  #[instrument(level = "trace", skip(self))]
  pub fn resolve(&mut self, token: SelectionToken, column: ColumnRef) -> Result<(), SelectionError> {
    let req = self
      .requests
      .iter_mut()
      .find(|r| r.token == token && matches!(r.state, RequestState::Pending))
      .ok_or(SelectionError::UnknownToken(token))?;
    req.state = RequestState::Resolved(column);
    Ok(())
  }

  /// Resolves the only pending request. Refuses to guess when several fields wait.
  #[instrument(level = "trace", skip(self))]
  pub fn resolve_sole(&mut self, column: ColumnRef) -> Result<SelectionToken, SelectionError> {
    let pending = self.pending();
    match pending.as_slice() {
      [] => Err(SelectionError::NoPendingRequest),
      [only] => {
        self.resolve(only.token, column)?;
        Ok(only.token)
      }
      many => {
        debug!(waiting = many.len(), "ambiguous column selection ignored");
        Err(SelectionError::Ambiguous(many.len()))
      }
    }
  }

  /// Removes a request whether or not it was resolved. Unknown tokens are ignored.
  #[instrument(level = "trace", skip(self))]
  pub fn cancel(&mut self, token: SelectionToken) {
    self.requests.retain(|r| r.token != token);
  }

  /// Consumes the resolution for `token`, if one has arrived.
  pub fn take(&mut self, token: SelectionToken) -> Option<ColumnRef> {
    let pos = self
      .requests
      .iter()
      .position(|r| r.token == token && matches!(r.state, RequestState::Resolved(_)))?;
    match self.requests.remove(pos).state {
      RequestState::Resolved(column) => Some(column),
      RequestState::Pending => None,
    }
  }

  pub fn len(&self) -> usize {
    self.requests.len()
  }

  pub fn is_empty(&self) -> bool {
    self.requests.is_empty()
  }
}
