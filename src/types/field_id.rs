//! Identity of the nine attribute slots on a node.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a slot holds plain text or a value with a comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeShape {
  Simple,
  ValueOperator,
}

/// How a new column binding combines with an existing index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexPolicy {
  /// The new column replaces whatever was bound.
  Replace,
  /// The new column is appended as another `;` segment.
  Append,
}

/// One of the nine editable attribute slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
  Name,
  Value,
  BatchNum,
  Ratio,
  Concentration,
  Unit,
  Std,
  Error,
  Identifier,
}

impl FieldId {
  pub const COUNT: usize = 9;

  pub const ALL: [FieldId; FieldId::COUNT] = [
    FieldId::Name,
    FieldId::Value,
    FieldId::BatchNum,
    FieldId::Ratio,
    FieldId::Concentration,
    FieldId::Unit,
    FieldId::Std,
    FieldId::Error,
    FieldId::Identifier,
  ];

  /// Position in [FieldId::ALL].
  pub fn position(self) -> usize {
    self as usize
  }

  /// Key used for this slot in serialized nodes.
  pub fn as_str(self) -> &'static str {
    match self {
      FieldId::Name => "name",
      FieldId::Value => "value",
      FieldId::BatchNum => "batch_num",
      FieldId::Ratio => "ratio",
      FieldId::Concentration => "concentration",
      FieldId::Unit => "unit",
      FieldId::Std => "std",
      FieldId::Error => "error",
      FieldId::Identifier => "identifier",
    }
  }

  pub fn shape(self) -> AttributeShape {
    match self {
      FieldId::Value | FieldId::Ratio | FieldId::Concentration | FieldId::Std | FieldId::Error => {
        AttributeShape::ValueOperator
      }
      FieldId::Name | FieldId::BatchNum | FieldId::Unit | FieldId::Identifier => {
        AttributeShape::Simple
      }
    }
  }

  pub fn has_operator(self) -> bool {
    self.shape() == AttributeShape::ValueOperator
  }

  /// Quantitative slots may hold several `;`-joined values, so their indices accumulate.
  pub fn index_policy(self) -> IndexPolicy {
    match self.shape() {
      AttributeShape::ValueOperator => IndexPolicy::Append,
      AttributeShape::Simple => IndexPolicy::Replace,
    }
  }
}

impl fmt::Display for FieldId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
