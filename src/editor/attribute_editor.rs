//! Buffered attribute editing for one node.
//!
//! Typing only touches the per-slot buffers. A full node is assembled and sent
//! to the sink on Enter and at teardown; index changes are pushed eagerly as
//! single-slot patches.

use tracing::{debug, instrument, trace};

use crate::error::EditorError;
use crate::types::{AttributeState, FieldId, IndexSpec, Node, NodeUpdateSink, Operator};

use super::{
  BindingEvent, ColumnSelectionBroker, IndexAffordance, IndexBinding, SelectionToken,
};

/// Host-level editor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
  /// Commit buffered edits when the editor is dropped.
  pub flush_on_drop: bool,
}

impl Default for EditorOptions {
  fn default() -> Self {
    Self {
      flush_on_drop: true,
    }
  }
}

/// A partial update of one slot. Unset components leave the buffer as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldChange {
  pub value: Option<String>,
  /// `Some(None)` clears the operator.
  pub operator: Option<Option<Operator>>,
  pub index: Option<IndexSpec>,
}

impl FieldChange {
  pub fn value(value: impl Into<String>) -> Self {
    Self {
      value: Some(value.into()),
      ..Self::default()
    }
  }

  pub fn operator(operator: Option<Operator>) -> Self {
    Self {
      operator: Some(operator),
      ..Self::default()
    }
  }

  pub fn index(index: IndexSpec) -> Self {
    Self {
      index: Some(index),
      ..Self::default()
    }
  }

  pub fn with_value(mut self, value: impl Into<String>) -> Self {
    self.value = Some(value.into());
    self
  }

  pub fn with_operator(mut self, operator: Option<Operator>) -> Self {
    self.operator = Some(operator);
    self
  }

  pub fn with_index(mut self, index: IndexSpec) -> Self {
    self.index = Some(index);
    self
  }
}

#[derive(Debug, Clone)]
pub(super) struct FieldSlot {
  pub(super) buffer: AttributeState,
  pub(super) binding: IndexBinding,
}

impl FieldSlot {
  fn new(field: FieldId, buffer: AttributeState) -> Self {
    let binding = IndexBinding::new(field, &buffer.index);
    Self { buffer, binding }
  }
}

/// Editing state for the nine attribute slots of one node.
///
/// Dropping the editor flushes its buffers but cannot reach the column broker;
/// hosts tear down with [AttributeEditor::close] or call
/// [AttributeEditor::release] first so no request outlives its slot.
pub struct AttributeEditor<S: NodeUpdateSink> {
  /// Last node known to the graph model.
  pub(super) node: Node,
  pub(super) slots: [FieldSlot; FieldId::COUNT],
  options: EditorOptions,
  sink: S,
}

impl<S: NodeUpdateSink> AttributeEditor<S> {
  pub fn new(node: Node, sink: S) -> Self {
    Self::with_options(node, sink, EditorOptions::default())
  }

  pub fn with_options(node: Node, sink: S, options: EditorOptions) -> Self {
    let slots = FieldId::ALL.map(|field| FieldSlot::new(field, node.state(field)));
    Self {
      node,
      slots,
      options,
      sink,
    }
  }

  pub fn node(&self) -> &Node {
    &self.node
  }

  pub fn sink(&self) -> &S {
    &self.sink
  }

  pub fn buffer(&self, field: FieldId) -> &AttributeState {
    &self.slots[field.position()].buffer
  }

  pub fn binding(&self, field: FieldId) -> &IndexBinding {
    &self.slots[field.position()].binding
  }

  pub fn missing_index(&self, field: FieldId) -> bool {
    self.buffer(field).missing_index(field.shape())
  }

  pub fn affordance(&self, field: FieldId) -> IndexAffordance {
    let slot = &self.slots[field.position()];
    slot.binding.affordance(&slot.buffer, self.node.with_indices)
  }

  pub(super) fn slot_mut(&mut self, field: FieldId) -> &mut FieldSlot {
    &mut self.slots[field.position()]
  }

  /// Updates one slot's buffer. A new index is also pushed to the sink at once.
  #[instrument(level = "trace", skip(self))]
  pub fn on_field_change(&mut self, field: FieldId, change: FieldChange) -> Result<(), EditorError> {
    if change.operator.is_some() && !field.has_operator() {
      return Err(EditorError::NoOperator(field));
    }
    if change.index.is_some() {
      self.ensure_indices()?;
    }
    let slot = self.slot_mut(field);
    if let Some(value) = change.value {
      slot.buffer.value = value;
    }
    if let Some(operator) = change.operator {
      slot.buffer.operator = operator;
    }
    if let Some(index) = change.index {
      self.commit_index(field, index);
    }
    Ok(())
  }

  /// Sends the last-known node with every buffer overlaid, marked as end of editing.
  #[instrument(level = "trace", skip(self))]
  pub fn commit(&mut self) {
    let mut node = self.node.clone();
    for field in FieldId::ALL {
      node.overlay(field, &self.slots[field.position()].buffer);
    }
    self.node = node.clone();
    self.sink.handle_node_update(node, true);
  }

  pub fn press_enter(&mut self) {
    self.commit();
  }

  /// Sends a copy of the last-known node with only `field`'s index replaced.
  /// Other buffered edits are left out.
  fn commit_index(&mut self, field: FieldId, index: IndexSpec) {
    let slot = self.slot_mut(field);
    slot.buffer.index = index.clone();
    slot.binding.sync_from(&index);
    let mut patched = self.node.clone();
    patched.set_index(field, index);
    self.node = patched.clone();
    trace!(field = %field, index = %self.node.index(field), "eager index commit");
    self.sink.handle_node_update(patched, false);
  }

  /// Adopts a node from the graph model.
  ///
  /// Empty incoming values never overwrite a buffer, so a reset from outside cannot
  /// wipe text being typed. Incoming indices always apply.
  #[instrument(level = "trace", skip(self, node))]
  pub fn receive_node(&mut self, node: Node) {
    for field in FieldId::ALL {
      let incoming = node.state(field);
      let slot = self.slot_mut(field);
      if !incoming.value.is_empty() {
        slot.buffer.value = incoming.value;
      } else if !slot.buffer.value.is_empty() {
        debug!(field = %field, "keeping local value over empty incoming value");
      }
      if incoming.operator.is_some() {
        slot.buffer.operator = incoming.operator;
      }
      slot.buffer.index = incoming.index;
      slot.binding.sync_from(&slot.buffer.index);
    }
    self.node = node;
  }

  /// Withdraws every open menu and pending column request. Each slot rests on
  /// its buffered index afterwards.
  ///
  /// Returns how many column requests were cancelled.
  #[instrument(level = "trace", skip(self, broker))]
  pub fn release(&mut self, broker: &mut ColumnSelectionBroker) -> usize {
    let mut released = 0;
    for slot in &mut self.slots {
      if let Some(token) = slot.binding.reset(&slot.buffer.index) {
        broker.cancel(token);
        released += 1;
      }
    }
    released
  }

  /// Releases pending column requests, flushes buffered edits and tears the
  /// editor down.
  pub fn close(mut self, broker: &mut ColumnSelectionBroker) {
    self.release(broker);
    self.commit();
    self.options.flush_on_drop = false;
  }

  fn ensure_indices(&self) -> Result<(), EditorError> {
    if self.node.with_indices {
      Ok(())
    } else {
      Err(EditorError::IndicesDisabled)
    }
  }

  /// Feeds `event` to the slot's binding and commits the resulting index, if any.
  ///
  /// Returns the selection request the slot stopped waiting on.
  fn drive_binding(
    &mut self,
    field: FieldId,
    event: BindingEvent,
  ) -> Result<Option<SelectionToken>, EditorError> {
    self.ensure_indices()?;
    let slot = self.slot_mut(field);
    let prior = slot.binding.awaiting_token();
    let index = slot.binding.apply(event, &slot.buffer)?;
    let released = prior.filter(|t| slot.binding.awaiting_token() != Some(*t));
    if let Some(index) = index {
      self.commit_index(field, index);
    }
    Ok(released)
  }

  /// Drives the binding and cancels any request the slot no longer waits on.
  pub(super) fn drive_binding_with(
    &mut self,
    field: FieldId,
    event: BindingEvent,
    broker: &mut ColumnSelectionBroker,
  ) -> Result<(), EditorError> {
    if let Some(token) = self.drive_binding(field, event)? {
      trace!(field = %field, token = %token, "withdrawing column request");
      broker.cancel(token);
    }
    Ok(())
  }

  pub fn open_index_menu(&mut self, field: FieldId) -> Result<(), EditorError> {
    self.drive_binding(field, BindingEvent::OpenMenu).map(|_| ())
  }

  pub fn choose_inferred(&mut self, field: FieldId) -> Result<(), EditorError> {
    self.drive_binding(field, BindingEvent::ChooseInferred).map(|_| ())
  }

  /// Registers a column request for `field` and waits for it via [Self::poll_selection].
  #[instrument(level = "trace", skip(self, broker))]
  pub fn choose_select_column(
    &mut self,
    field: FieldId,
    broker: &mut ColumnSelectionBroker,
  ) -> Result<SelectionToken, EditorError> {
    self.ensure_indices()?;
    let token = broker.request(field);
    if let Err(e) = self.drive_binding(field, BindingEvent::ChooseSelectColumn(token)) {
      broker.cancel(token);
      return Err(e);
    }
    Ok(token)
  }

  pub fn begin_direct_entry(&mut self, field: FieldId) -> Result<(), EditorError> {
    self.drive_binding(field, BindingEvent::BeginDirectEntry).map(|_| ())
  }

  pub fn enter_index(&mut self, field: FieldId, text: &str) -> Result<(), EditorError> {
    self
      .drive_binding(field, BindingEvent::EnterText(text.to_string()))
      .map(|_| ())
  }

  pub fn cancel_index_menu(
    &mut self,
    field: FieldId,
    broker: &mut ColumnSelectionBroker,
  ) -> Result<(), EditorError> {
    self.drive_binding_with(field, BindingEvent::Cancel, broker)
  }

  pub fn clear_index(&mut self, field: FieldId) -> Result<(), EditorError> {
    self.drive_binding(field, BindingEvent::Clear).map(|_| ())
  }

  /// Consumes any column selections resolved for this editor's waiting slots.
  ///
  /// Returns how many slots were bound. When the node no longer shows indices,
  /// waiting slots are released instead and nothing is bound.
  #[instrument(level = "trace", skip(self, broker))]
  pub fn poll_selection(&mut self, broker: &mut ColumnSelectionBroker) -> Result<usize, EditorError> {
    if !self.node.with_indices {
      let released = self.release(broker);
      if released > 0 {
        debug!(released, "indices disabled, withdrew pending column requests");
      }
      return Ok(0);
    }
    let mut bound = 0;
    for field in FieldId::ALL {
      let Some(token) = self.binding(field).awaiting_token() else {
        continue;
      };
      if let Some(column) = broker.take(token) {
        self.drive_binding(field, BindingEvent::SelectionArrived(column))?;
        bound += 1;
      }
    }
    Ok(bound)
  }
}

impl<S: NodeUpdateSink> Drop for AttributeEditor<S> {
  fn drop(&mut self) {
    for slot in &self.slots {
      if let Some(token) = slot.binding.awaiting_token() {
        debug!(field = %slot.binding.field(), token = %token, "dropped while awaiting a column");
      }
    }
    if self.options.flush_on_drop {
      trace!("flushing buffered edits on teardown");
      self.commit();
    }
  }
}
