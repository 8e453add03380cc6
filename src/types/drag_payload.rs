//! Drag transfer payload produced when a table column is dragged onto an input.

use serde::Deserialize;

use super::ColumnRef;
use crate::error::DragPayloadError;

/// Column content and/or column index carried by a drag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
  #[serde(default)]
  pub column_content: Option<String>,
  #[serde(default)]
  column_index: Option<ColumnRef>,
}

impl DragPayload {
  pub fn new(column_index: ColumnRef, column_content: Option<String>) -> Self {
    Self {
      column_content,
      column_index: Some(column_index),
    }
  }

  /// Parses the JSON transfer payload; a missing or empty `columnIndex` is an error.
  pub fn parse(raw: &str) -> Result<Self, DragPayloadError> {
    let payload: DragPayload = serde_json::from_str(raw)?;
    if payload.column_index.as_ref().is_some_and(|c| !c.is_empty()) {
      Ok(payload)
    } else {
      Err(DragPayloadError::MissingColumnIndex)
    }
  }

  pub fn column_index(&self) -> Option<&ColumnRef> {
    self.column_index.as_ref()
  }
}
