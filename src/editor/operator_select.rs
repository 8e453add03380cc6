//! Operator selection for quantitative slots.
//!
//! A pick is a discrete choice, so it lands in the buffer immediately instead of
//! waiting for Enter like typed text.

use crate::error::EditorError;
use crate::types::{FieldId, NodeUpdateSink, Operator};

use super::{AttributeEditor, FieldChange};

/// Maps a selector value to an operator; `None` and `""` mean "no operator".
pub fn parse_operator_choice(token: Option<&str>) -> Result<Option<Operator>, EditorError> {
  match token.map(str::trim) {
    None | Some("") => Ok(None),
    Some(t) => t.parse().map(Some),
  }
}

impl<S: NodeUpdateSink> AttributeEditor<S> {
  pub fn select_operator(&mut self, field: FieldId, token: Option<&str>) -> Result<(), EditorError> {
    let operator = parse_operator_choice(token)?;
    self.on_field_change(field, FieldChange::operator(operator))
  }
}
