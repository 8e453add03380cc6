//! Scripted editing sessions.
//!
//! A session is a starting node plus the input events a UI would deliver. Replaying
//! it runs a fresh editor and broker and records every update sent to the graph
//! model, including the teardown flush.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::editor::{AttributeEditor, ColumnSelectionBroker, FieldChange, parse_operator_choice};
use crate::error::{EditorError, SessionError};
use crate::types::{ColumnRef, FieldId, IndexSpec, Node, NodeUpdate, NodeUpdateSink};

/// One UI input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
  Change {
    field: FieldId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    /// Operator token; `""` clears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<IndexSpec>,
  },
  Enter,
  SelectOperator {
    field: FieldId,
    #[serde(default)]
    operator: Option<String>,
  },
  OpenMenu {
    field: FieldId,
  },
  ChooseInferred {
    field: FieldId,
  },
  ChooseSelectColumn {
    field: FieldId,
  },
  BeginDirectEntry {
    field: FieldId,
  },
  EnterIndex {
    field: FieldId,
    text: String,
  },
  /// The user clicked a column header while exactly one field waits.
  SelectColumn {
    column: ColumnRef,
  },
  Cancel {
    field: FieldId,
  },
  ClearIndex {
    field: FieldId,
  },
  /// `payload` is the drag transfer data: a JSON object, or a raw string passed through as is.
  DropOnIndex {
    field: FieldId,
    payload: serde_json::Value,
  },
  DropOnValue {
    field: FieldId,
    payload: serde_json::Value,
  },
  ReceiveNode {
    node: Node,
  },
  Close,
}

/// A starting node and the events to replay against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
  pub node: Node,
  #[serde(default)]
  pub events: Vec<SessionEvent>,
}

fn raw_payload(payload: &serde_json::Value) -> String {
  match payload {
    serde_json::Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Applies one event. `Close` does nothing here; [replay] closes the editor after the last event.
fn apply_event<S: NodeUpdateSink>(
  editor: &mut AttributeEditor<S>,
  broker: &mut ColumnSelectionBroker,
  event: &SessionEvent,
) -> Result<(), EditorError> {
  match event {
    SessionEvent::Change {
      field,
      value,
      operator,
      index,
    } => {
      let change = FieldChange {
        value: value.clone(),
        operator: match operator {
          Some(token) => Some(parse_operator_choice(Some(token))?),
          None => None,
        },
        index: index.clone(),
      };
      editor.on_field_change(*field, change)
    }
    SessionEvent::Enter => {
      editor.press_enter();
      Ok(())
    }
    SessionEvent::SelectOperator { field, operator } => {
      editor.select_operator(*field, operator.as_deref())
    }
    SessionEvent::OpenMenu { field } => editor.open_index_menu(*field),
    SessionEvent::ChooseInferred { field } => editor.choose_inferred(*field),
    SessionEvent::ChooseSelectColumn { field } => {
      editor.choose_select_column(*field, broker).map(|_| ())
    }
    SessionEvent::BeginDirectEntry { field } => editor.begin_direct_entry(*field),
    SessionEvent::EnterIndex { field, text } => editor.enter_index(*field, text),
    SessionEvent::SelectColumn { column } => {
      broker.resolve_sole(column.clone())?;
      editor.poll_selection(broker).map(|_| ())
    }
    SessionEvent::Cancel { field } => editor.cancel_index_menu(*field, broker),
    SessionEvent::ClearIndex { field } => editor.clear_index(*field),
    SessionEvent::DropOnIndex { field, payload } => {
      editor
        .drop_on_index(*field, &raw_payload(payload), broker)
        .map(|_| ())
    }
    SessionEvent::DropOnValue { field, payload } => {
      editor
        .drop_on_value(*field, &raw_payload(payload), broker)
        .map(|_| ())
    }
    SessionEvent::ReceiveNode { node } => {
      editor.receive_node(node.clone());
      Ok(())
    }
    SessionEvent::Close => Ok(()),
  }
}

/// Replays `script` and returns every node update in the order it was sent.
#[instrument(level = "trace", skip(script))]
pub fn replay(script: &SessionScript) -> Result<Vec<NodeUpdate>, SessionError> {
  let last = script.events.len().saturating_sub(1);
  if let Some(position) = script
    .events
    .iter()
    .position(|e| matches!(e, SessionEvent::Close))
    .filter(|p| *p != last)
  {
    return Err(SessionError::EventAfterClose {
      position: position + 1,
    });
  }

  let mut updates = Vec::new();
  let mut broker = ColumnSelectionBroker::new();
  {
    let mut editor = AttributeEditor::new(script.node.clone(), &mut updates);
    for (position, event) in script.events.iter().enumerate() {
      apply_event(&mut editor, &mut broker, event)
        .map_err(|source| SessionError::Event { position, source })?;
    }
    editor.close(&mut broker);
  }
  info!(
    events = script.events.len(),
    updates = updates.len(),
    "session replayed"
  );
  Ok(updates)
}
