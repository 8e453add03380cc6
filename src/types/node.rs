//! A workflow graph node as seen by the attribute editor.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AttributeState, FieldId, IndexSpec, SimpleAttribute, ValOpAttribute};

/// Category tag of a workflow node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
  #[default]
  Matter,
  Parameter,
  Property,
  Manufacturing,
  Measurement,
  Metadata,
}

impl fmt::Display for NodeType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      NodeType::Matter => "matter",
      NodeType::Parameter => "parameter",
      NodeType::Property => "property",
      NodeType::Manufacturing => "manufacturing",
      NodeType::Measurement => "measurement",
      NodeType::Metadata => "metadata",
    };
    f.write_str(s)
  }
}

/// Borrowed view of one slot.
pub enum SlotRef<'a> {
  Simple(&'a SimpleAttribute),
  ValOp(&'a ValOpAttribute),
}

/// Mutable view of one slot.
pub enum SlotMut<'a> {
  Simple(&'a mut SimpleAttribute),
  ValOp(&'a mut ValOpAttribute),
}

/// A graph node with its nine attribute slots.
///
/// Keys the editor does not know about (ids, positions, relationships) are kept in
/// `extra` so a committed node round-trips everything the graph model sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
  pub name: SimpleAttribute,
  pub value: ValOpAttribute,
  pub batch_num: SimpleAttribute,
  pub ratio: ValOpAttribute,
  pub concentration: ValOpAttribute,
  pub unit: SimpleAttribute,
  pub std: ValOpAttribute,
  pub error: ValOpAttribute,
  pub identifier: SimpleAttribute,
  #[serde(rename = "type")]
  pub node_type: NodeType,
  pub with_indices: bool,
  /// Stacking order of overlapping inputs; presentational only.
  pub layer: i64,
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Node {
  pub fn new(node_type: NodeType) -> Self {
    Self {
      node_type,
      with_indices: true,
      ..Self::default()
    }
  }

  pub fn slot(&self, field: FieldId) -> SlotRef<'_> {
    match field {
      FieldId::Name => SlotRef::Simple(&self.name),
      FieldId::Value => SlotRef::ValOp(&self.value),
      FieldId::BatchNum => SlotRef::Simple(&self.batch_num),
      FieldId::Ratio => SlotRef::ValOp(&self.ratio),
      FieldId::Concentration => SlotRef::ValOp(&self.concentration),
      FieldId::Unit => SlotRef::Simple(&self.unit),
      FieldId::Std => SlotRef::ValOp(&self.std),
      FieldId::Error => SlotRef::ValOp(&self.error),
      FieldId::Identifier => SlotRef::Simple(&self.identifier),
    }
  }

  pub fn slot_mut(&mut self, field: FieldId) -> SlotMut<'_> {
    match field {
      FieldId::Name => SlotMut::Simple(&mut self.name),
      FieldId::Value => SlotMut::ValOp(&mut self.value),
      FieldId::BatchNum => SlotMut::Simple(&mut self.batch_num),
      FieldId::Ratio => SlotMut::ValOp(&mut self.ratio),
      FieldId::Concentration => SlotMut::ValOp(&mut self.concentration),
      FieldId::Unit => SlotMut::Simple(&mut self.unit),
      FieldId::Std => SlotMut::ValOp(&mut self.std),
      FieldId::Error => SlotMut::ValOp(&mut self.error),
      FieldId::Identifier => SlotMut::Simple(&mut self.identifier),
    }
  }

  /// Snapshot of one slot's contents.
  pub fn state(&self, field: FieldId) -> AttributeState {
    match self.slot(field) {
      SlotRef::Simple(a) => a.into(),
      SlotRef::ValOp(a) => a.into(),
    }
  }

  pub fn index(&self, field: FieldId) -> &IndexSpec {
    match self.slot(field) {
      SlotRef::Simple(a) => &a.index,
      SlotRef::ValOp(a) => &a.index,
    }
  }

  pub fn set_index(&mut self, field: FieldId, index: IndexSpec) {
    match self.slot_mut(field) {
      SlotMut::Simple(a) => a.index = index,
      SlotMut::ValOp(a) => a.index = index,
    }
  }

  /// Writes `state` into the slot. The operator is ignored for simple slots.
  pub fn overlay(&mut self, field: FieldId, state: &AttributeState) {
    match self.slot_mut(field) {
      SlotMut::Simple(a) => {
        a.value = state.value.clone();
        a.index = state.index.clone();
      }
      SlotMut::ValOp(a) => {
        a.val_op.value = state.value.clone();
        a.val_op.operator = state.operator;
        a.index = state.index.clone();
      }
    }
  }
}
