//! Column index bindings carried by every attribute.
//!
//! An index is opaque text: empty (unset), the `inferred` marker, one column
//! reference, or several references joined with `;`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between multiple values or column references in one field.
pub const SEGMENT_SEPARATOR: char = ';';

/// Marker meaning "derive the index automatically downstream".
pub const INFERRED_MARKER: &str = "inferred";

/// Wire form of an index: producers send strings, numbers or nothing at all.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndex {
  Text(String),
  Number(serde_json::Number),
  Missing(()),
}

impl From<RawIndex> for String {
  fn from(raw: RawIndex) -> Self {
    match raw {
      RawIndex::Text(s) => s,
      RawIndex::Number(n) => n.to_string(),
      RawIndex::Missing(()) => String::new(),
    }
  }
}

/// Counts `;`-separated segments; the empty string has none.
pub fn segment_count(text: &str) -> usize {
  if text.is_empty() {
    0
  } else {
    text.split(SEGMENT_SEPARATOR).count()
  }
}

/// Accumulates `segment` onto `current` (`a` then `b` gives `a;b`).
pub fn append_segment(current: &str, segment: &str) -> String {
  if current.is_empty() {
    segment.to_string()
  } else {
    format!("{current}{SEGMENT_SEPARATOR}{segment}")
  }
}

/// A reference to one source-data column, as published by the table UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawIndex")]
pub struct ColumnRef(String);

impl ColumnRef {
  pub fn new(column: impl Into<String>) -> Self {
    Self(column.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl From<RawIndex> for ColumnRef {
  fn from(raw: RawIndex) -> Self {
    Self(raw.into())
  }
}

impl From<&str> for ColumnRef {
  fn from(s: &str) -> Self {
    Self(s.to_string())
  }
}

impl From<usize> for ColumnRef {
  fn from(n: usize) -> Self {
    Self(n.to_string())
  }
}

impl fmt::Display for ColumnRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// The index component of an attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawIndex")]
pub struct IndexSpec(String);

impl IndexSpec {
  pub fn new(text: impl Into<String>) -> Self {
    Self(text.into())
  }

  pub fn unset() -> Self {
    Self(String::new())
  }

  pub fn inferred() -> Self {
    Self(INFERRED_MARKER.to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_unset(&self) -> bool {
    self.0.is_empty()
  }

  pub fn is_inferred(&self) -> bool {
    self.0 == INFERRED_MARKER
  }

  pub fn segment_count(&self) -> usize {
    segment_count(&self.0)
  }

  /// Column references in order; empty for an unset index.
  pub fn segments(&self) -> Vec<&str> {
    if self.0.is_empty() {
      Vec::new()
    } else {
      self.0.split(SEGMENT_SEPARATOR).collect()
    }
  }

  /// Returns a new index with `column` appended as the last segment.
  pub fn appended(&self, column: &ColumnRef) -> Self {
    Self(append_segment(&self.0, column.as_str()))
  }
}

impl From<RawIndex> for IndexSpec {
  fn from(raw: RawIndex) -> Self {
    Self(raw.into())
  }
}

impl From<&ColumnRef> for IndexSpec {
  fn from(column: &ColumnRef) -> Self {
    Self(column.as_str().to_string())
  }
}

impl From<&str> for IndexSpec {
  fn from(s: &str) -> Self {
    Self(s.to_string())
  }
}

impl fmt::Display for IndexSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
