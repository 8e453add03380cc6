//! Attribute records in their two wire shapes, plus a shape-erased view.

use serde::{Deserialize, Serialize};

use super::index_spec::segment_count;
use super::{AttributeShape, IndexSpec, Operator};

/// Free-text attribute (name, unit, batch number, identifier).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleAttribute {
  pub value: String,
  pub index: IndexSpec,
}

/// Value with an optional comparison operator; the operator is `""` on the wire when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValOp {
  pub value: String,
  #[serde(with = "super::operator::optional_token")]
  pub operator: Option<Operator>,
}

/// Quantitative attribute (value, ratio, concentration, std, error).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValOpAttribute {
  #[serde(rename = "valOp")]
  pub val_op: ValOp,
  pub index: IndexSpec,
}

/// The contents of one slot regardless of its shape.
///
/// Simple slots always carry `operator: None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeState {
  pub value: String,
  pub operator: Option<Operator>,
  pub index: IndexSpec,
}

impl AttributeState {
  pub fn value_segments(&self) -> usize {
    segment_count(&self.value)
  }

  /// True when a quantitative slot has more values than bound columns.
  ///
  /// `inferred` satisfies any number of values; simple slots are never missing.
  pub fn missing_index(&self, shape: AttributeShape) -> bool {
    shape == AttributeShape::ValueOperator
      && !self.index.is_inferred()
      && self.value_segments() > self.index.segment_count()
  }
}

impl From<&SimpleAttribute> for AttributeState {
  fn from(a: &SimpleAttribute) -> Self {
    Self {
      value: a.value.clone(),
      operator: None,
      index: a.index.clone(),
    }
  }
}

impl From<&ValOpAttribute> for AttributeState {
  fn from(a: &ValOpAttribute) -> Self {
    Self {
      value: a.val_op.value.clone(),
      operator: a.val_op.operator,
      index: a.index.clone(),
    }
  }
}
