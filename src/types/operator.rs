//! Comparison operators for value+operator attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// One of the six comparison operators a quantitative attribute may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
  #[serde(rename = "<")]
  Lt,
  #[serde(rename = "<=")]
  Le,
  #[serde(rename = "=")]
  Eq,
  #[serde(rename = "!=")]
  Ne,
  #[serde(rename = ">=")]
  Ge,
  #[serde(rename = ">")]
  Gt,
}

impl Operator {
  pub const ALL: [Operator; 6] = [
    Operator::Lt,
    Operator::Le,
    Operator::Eq,
    Operator::Ne,
    Operator::Ge,
    Operator::Gt,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Operator::Lt => "<",
      Operator::Le => "<=",
      Operator::Eq => "=",
      Operator::Ne => "!=",
      Operator::Ge => ">=",
      Operator::Gt => ">",
    }
  }
}

impl fmt::Display for Operator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Operator {
  type Err = EditorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Operator::ALL
      .into_iter()
      .find(|op| op.as_str() == s)
      .ok_or_else(|| EditorError::UnknownOperator(s.to_string()))
  }
}

/// Serde adapter for `Option<Operator>` where the empty string (or null) means none.
pub(crate) mod optional_token {
  use serde::{Deserialize, Deserializer, Serializer, de::Error};

  use super::Operator;

  pub fn serialize<S: Serializer>(op: &Option<Operator>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(op.map(|o| o.as_str()).unwrap_or(""))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Operator>, D::Error> {
    let token: Option<String> = Option::deserialize(d)?;
    match token.as_deref() {
      None | Some("") => Ok(None),
      Some(t) => t.parse().map(Some).map_err(D::Error::custom),
    }
  }
}
