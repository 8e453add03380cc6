//! Routes dropped table columns into slot buffers and index bindings.

use tracing::{debug, instrument};

use crate::error::EditorError;
use crate::types::index_spec::append_segment;
use crate::types::{DragPayload, FieldId, IndexPolicy, NodeUpdateSink};

use super::{AttributeEditor, BindingEvent, ColumnSelectionBroker};

/// Parses a drop payload, logging and discarding anything unusable.
fn accept_payload(field: FieldId, raw: &str) -> Option<DragPayload> {
  match DragPayload::parse(raw) {
    Ok(payload) => Some(payload),
    Err(e) => {
      debug!(field = %field, error = %e, "ignoring drag payload");
      None
    }
  }
}

impl<S: NodeUpdateSink> AttributeEditor<S> {
  /// Binds the dropped column to `field`'s index. A column request the slot was
  /// waiting on is withdrawn from `broker`.
  ///
  /// Returns `Ok(false)` when the payload was ignored.
  #[instrument(level = "trace", skip(self, raw, broker))]
  pub fn drop_on_index(
    &mut self,
    field: FieldId,
    raw: &str,
    broker: &mut ColumnSelectionBroker,
  ) -> Result<bool, EditorError> {
    if !self.node.with_indices {
      return Err(EditorError::IndicesDisabled);
    }
    let Some(column) = accept_payload(field, raw).and_then(|p| p.column_index().cloned()) else {
      return Ok(false);
    };
    self.drive_binding_with(field, BindingEvent::DropColumn(column), broker)?;
    Ok(true)
  }

  /// Takes both the dropped column's content (into the value buffer) and its index.
  ///
  /// Quantitative slots append both; simple slots replace both. Only the index part
  /// is committed right away.
  #[instrument(level = "trace", skip(self, raw, broker))]
  pub fn drop_on_value(
    &mut self,
    field: FieldId,
    raw: &str,
    broker: &mut ColumnSelectionBroker,
  ) -> Result<bool, EditorError> {
    let Some(payload) = accept_payload(field, raw) else {
      return Ok(false);
    };
    if let Some(content) = payload.column_content.as_deref() {
      let slot = self.slot_mut(field);
      slot.buffer.value = match field.index_policy() {
        IndexPolicy::Replace => content.to_string(),
        IndexPolicy::Append => append_segment(&slot.buffer.value, content),
      };
    }
    if self.node.with_indices {
      if let Some(column) = payload.column_index().cloned() {
        self.drive_binding_with(field, BindingEvent::DropColumn(column), broker)?;
      }
    }
    Ok(true)
  }
}
