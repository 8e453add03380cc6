//! Tests for `AttributeEditor` buffering, commits and selection polling.

use proptest::prelude::*;

use super::{
  AttributeEditor, BindingState, ColumnSelectionBroker, EditorOptions, FieldChange,
  IndexAffordance,
};
use crate::error::{BindingError, EditorError};
use crate::types::{ColumnRef, FieldId, FnSink, IndexSpec, Node, NodeType, NodeUpdate, Operator};

fn node() -> Node {
  let mut n = Node::new(NodeType::Matter);
  n.name.value = "Fe".to_string();
  n.ratio.val_op.value = "1;2".to_string();
  n.ratio.index = IndexSpec::new("3");
  n.unit.value = "g".to_string();
  n
}

#[test]
fn drop_flushes_latest_buffer_once() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  {
    let mut ed = AttributeEditor::new(Node::new(NodeType::Matter), &mut updates);
    ed.on_field_change(FieldId::Name, FieldChange::value("Fe"))
      .unwrap();
  }
  assert_eq!(updates.len(), 1);
  assert!(updates[0].end_editing);
  assert_eq!(updates[0].node.name.value, "Fe");
}

#[test]
fn typing_does_not_reach_sink_until_enter() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.on_field_change(FieldId::Unit, FieldChange::value("kg"))
    .unwrap();
  assert!(ed.sink().is_empty());
  ed.press_enter();
  assert_eq!(ed.sink().len(), 1);
  assert_eq!(ed.sink()[0].node.unit.value, "kg");
  assert!(ed.sink()[0].end_editing);
  assert_eq!(ed.node().unit.value, "kg");
}

#[test]
fn commit_overlays_only_touched_fields() {
  let original = node();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(original.clone(), &mut updates);
  ed.on_field_change(
    FieldId::Std,
    FieldChange::value("0.1").with_operator(Some(Operator::Lt)),
  )
  .unwrap();
  ed.commit();
  let committed = &ed.sink()[0].node;
  assert_eq!(committed.std.val_op.value, "0.1");
  assert_eq!(committed.std.val_op.operator, Some(Operator::Lt));
  for f in FieldId::ALL.into_iter().filter(|f| *f != FieldId::Std) {
    assert_eq!(committed.state(f), original.state(f), "field {f} changed");
  }
  assert_eq!(committed.node_type, original.node_type);
}

#[test]
fn value_change_preserves_operator_and_index() {
  let mut n = node();
  n.ratio.val_op.operator = Some(Operator::Ge);
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(n, &mut updates);
  ed.on_field_change(FieldId::Ratio, FieldChange::value("1;2;4"))
    .unwrap();
  let b = ed.buffer(FieldId::Ratio);
  assert_eq!(b.operator, Some(Operator::Ge));
  assert_eq!(b.index.as_str(), "3");
}

#[test]
fn operator_on_simple_slot_is_rejected() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  let err = ed
    .on_field_change(FieldId::Name, FieldChange::operator(Some(Operator::Eq)))
    .unwrap_err();
  assert_eq!(err, EditorError::NoOperator(FieldId::Name));
}

#[test]
fn index_change_commits_eagerly_without_other_edits() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.on_field_change(FieldId::Name, FieldChange::value("Cu"))
    .unwrap();
  ed.on_field_change(FieldId::Unit, FieldChange::index(IndexSpec::new("6")))
    .unwrap();
  assert_eq!(ed.sink().len(), 1);
  let patch = &ed.sink()[0];
  assert!(!patch.end_editing);
  assert_eq!(patch.node.unit.index.as_str(), "6");
  assert_eq!(patch.node.name.value, "Fe");
  assert_eq!(ed.binding(FieldId::Unit).state(), BindingState::Bound);
}

#[test]
fn clear_is_eager_and_ignores_pending_edits() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.on_field_change(FieldId::Unit, FieldChange::value("mg"))
    .unwrap();
  ed.clear_index(FieldId::Ratio).unwrap();
  let patch = &ed.sink()[0];
  assert!(!patch.end_editing);
  assert_eq!(patch.node.ratio.index.as_str(), "");
  assert_eq!(patch.node.unit.value, "g");
  assert_eq!(ed.binding(FieldId::Ratio).state(), BindingState::Unset);
}

#[test]
fn eager_patches_accumulate() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.enter_index(FieldId::Name, "1").unwrap();
  ed.enter_index(FieldId::Unit, "2").unwrap();
  let last = &ed.sink()[1].node;
  assert_eq!(last.name.index.as_str(), "1");
  assert_eq!(last.unit.index.as_str(), "2");
}

#[test]
fn incoming_empty_value_keeps_local_typing() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.on_field_change(FieldId::Name, FieldChange::value("Cu"))
    .unwrap();
  let mut incoming = node();
  incoming.name.value = String::new();
  incoming.name.index = IndexSpec::new("4");
  ed.receive_node(incoming);
  assert_eq!(ed.buffer(FieldId::Name).value, "Cu");
  assert_eq!(ed.buffer(FieldId::Name).index.as_str(), "4");
  assert_eq!(ed.binding(FieldId::Name).state(), BindingState::Bound);
}

#[test]
fn incoming_non_empty_value_replaces_buffer() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.on_field_change(FieldId::Name, FieldChange::value("Cu"))
    .unwrap();
  let mut incoming = node();
  incoming.name.value = "Zn".to_string();
  incoming.ratio.index = IndexSpec::unset();
  ed.receive_node(incoming);
  assert_eq!(ed.buffer(FieldId::Name).value, "Zn");
  assert!(ed.buffer(FieldId::Ratio).index.is_unset());
  assert_eq!(ed.binding(FieldId::Ratio).state(), BindingState::Unset);
}

#[test]
fn close_flushes_exactly_once() {
  let mut broker = ColumnSelectionBroker::new();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.on_field_change(FieldId::Unit, FieldChange::value("mol"))
    .unwrap();
  ed.close(&mut broker);
  assert_eq!(updates.len(), 1);
  assert_eq!(updates[0].node.unit.value, "mol");
}

#[test]
fn enter_then_drop_commits_twice() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  {
    let mut ed = AttributeEditor::new(node(), &mut updates);
    ed.press_enter();
  }
  assert_eq!(updates.len(), 2);
  assert!(updates.iter().all(|u| u.end_editing));
}

#[test]
fn flush_on_drop_can_be_disabled() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  {
    let options = EditorOptions {
      flush_on_drop: false,
    };
    let mut ed = AttributeEditor::with_options(node(), &mut updates, options);
    ed.on_field_change(FieldId::Name, FieldChange::value("Ni"))
      .unwrap();
  }
  assert!(updates.is_empty());
}

#[test]
fn closure_sink_receives_updates() {
  let mut seen = Vec::new();
  {
    let sink = FnSink(|n: Node, end: bool| seen.push((n.name.value, end)));
    let mut ed = AttributeEditor::new(node(), sink);
    ed.on_field_change(FieldId::Name, FieldChange::value("Co"))
      .unwrap();
  }
  assert_eq!(seen, vec![("Co".to_string(), true)]);
}

#[test]
fn selection_flow_appends_for_ratio() {
  let mut broker = ColumnSelectionBroker::new();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  assert_eq!(ed.affordance(FieldId::Ratio), IndexAffordance::MissingIndex);
  ed.open_index_menu(FieldId::Ratio).unwrap();
  let token = ed.choose_select_column(FieldId::Ratio, &mut broker).unwrap();
  assert_eq!(ed.affordance(FieldId::Ratio), IndexAffordance::AwaitingSelection);
  assert_eq!(ed.poll_selection(&mut broker).unwrap(), 0);
  broker.resolve(token, ColumnRef::from(5)).unwrap();
  assert_eq!(ed.poll_selection(&mut broker).unwrap(), 1);
  assert_eq!(ed.buffer(FieldId::Ratio).index.as_str(), "3;5");
  assert_eq!(ed.affordance(FieldId::Ratio), IndexAffordance::Clear);
  assert_eq!(ed.sink().len(), 1);
  assert!(broker.is_empty());
}

#[test]
fn selection_for_simple_slot_replaces() {
  let mut broker = ColumnSelectionBroker::new();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  for column in [3usize, 5] {
    if ed.binding(FieldId::Name).state() == BindingState::Bound {
      ed.clear_index(FieldId::Name).unwrap();
    }
    ed.open_index_menu(FieldId::Name).unwrap();
    ed.choose_select_column(FieldId::Name, &mut broker).unwrap();
    broker.resolve_sole(ColumnRef::from(column)).unwrap();
    ed.poll_selection(&mut broker).unwrap();
  }
  assert_eq!(ed.buffer(FieldId::Name).index.as_str(), "5");
}

#[test]
fn two_awaiting_fields_each_get_their_own_column() {
  let mut broker = ColumnSelectionBroker::new();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.open_index_menu(FieldId::Name).unwrap();
  let a = ed.choose_select_column(FieldId::Name, &mut broker).unwrap();
  ed.open_index_menu(FieldId::Unit).unwrap();
  let b = ed.choose_select_column(FieldId::Unit, &mut broker).unwrap();
  assert!(broker.resolve_sole(ColumnRef::from(1)).is_err());
  broker.resolve(b, ColumnRef::from(2)).unwrap();
  broker.resolve(a, ColumnRef::from(1)).unwrap();
  assert_eq!(ed.poll_selection(&mut broker).unwrap(), 2);
  assert_eq!(ed.buffer(FieldId::Name).index.as_str(), "1");
  assert_eq!(ed.buffer(FieldId::Unit).index.as_str(), "2");
}

#[test]
fn cancel_withdraws_request() {
  let mut broker = ColumnSelectionBroker::new();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.open_index_menu(FieldId::Unit).unwrap();
  let token = ed.choose_select_column(FieldId::Unit, &mut broker).unwrap();
  ed.cancel_index_menu(FieldId::Unit, &mut broker).unwrap();
  assert!(!broker.is_pending(token));
  assert_eq!(ed.binding(FieldId::Unit).state(), BindingState::Unset);
  assert!(ed.sink().is_empty());
}

#[test]
fn choose_select_column_outside_menu_leaves_no_request() {
  let mut broker = ColumnSelectionBroker::new();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  let err = ed
    .choose_select_column(FieldId::Unit, &mut broker)
    .unwrap_err();
  assert!(matches!(
    err,
    EditorError::Binding(BindingError::InvalidTransition { .. })
  ));
  assert!(broker.is_empty());
}

#[test]
fn drop_while_awaiting_withdraws_request() {
  let mut broker = ColumnSelectionBroker::new();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.open_index_menu(FieldId::Unit).unwrap();
  let token = ed.choose_select_column(FieldId::Unit, &mut broker).unwrap();
  assert!(
    ed.drop_on_index(FieldId::Unit, r#"{"columnIndex":7}"#, &mut broker)
      .unwrap()
  );
  assert!(!broker.is_pending(token));
  assert!(broker.is_empty());
  assert_eq!(ed.buffer(FieldId::Unit).index.as_str(), "7");
  assert_eq!(ed.binding(FieldId::Unit).state(), BindingState::Bound);
}

#[test]
fn sole_selection_after_drop_reaches_next_waiting_field() {
  let mut broker = ColumnSelectionBroker::new();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.open_index_menu(FieldId::Unit).unwrap();
  ed.choose_select_column(FieldId::Unit, &mut broker).unwrap();
  ed.drop_on_value(FieldId::Unit, r#"{"columnContent":"mol","columnIndex":7}"#, &mut broker)
    .unwrap();
  ed.open_index_menu(FieldId::Name).unwrap();
  let token = ed.choose_select_column(FieldId::Name, &mut broker).unwrap();
  assert_eq!(broker.resolve_sole(ColumnRef::from(2)), Ok(token));
  assert_eq!(ed.poll_selection(&mut broker).unwrap(), 1);
  assert_eq!(ed.buffer(FieldId::Name).index.as_str(), "2");
  assert_eq!(ed.buffer(FieldId::Unit).index.as_str(), "7");
  assert!(broker.is_empty());
}

#[test]
fn close_withdraws_waiting_requests() {
  let mut broker = ColumnSelectionBroker::new();
  let mut first_updates: Vec<NodeUpdate> = Vec::new();
  let mut second_updates: Vec<NodeUpdate> = Vec::new();
  let mut first = AttributeEditor::new(node(), &mut first_updates);
  first.open_index_menu(FieldId::Name).unwrap();
  first.choose_select_column(FieldId::Name, &mut broker).unwrap();
  first.close(&mut broker);
  assert!(broker.is_empty());
  assert_eq!(first_updates.len(), 1);
  assert!(first_updates[0].node.name.index.is_unset());

  let mut second = AttributeEditor::new(node(), &mut second_updates);
  second.open_index_menu(FieldId::Unit).unwrap();
  let token = second.choose_select_column(FieldId::Unit, &mut broker).unwrap();
  assert_eq!(broker.resolve_sole(ColumnRef::from(4)), Ok(token));
  assert_eq!(second.poll_selection(&mut broker).unwrap(), 1);
  assert_eq!(second.buffer(FieldId::Unit).index.as_str(), "4");
}

#[test]
fn release_rests_every_slot() {
  let mut broker = ColumnSelectionBroker::new();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.open_index_menu(FieldId::Name).unwrap();
  ed.choose_select_column(FieldId::Name, &mut broker).unwrap();
  ed.open_index_menu(FieldId::Ratio).unwrap();
  ed.begin_direct_entry(FieldId::Unit).unwrap();
  assert_eq!(ed.release(&mut broker), 1);
  assert!(broker.is_empty());
  assert_eq!(ed.binding(FieldId::Name).state(), BindingState::Unset);
  assert_eq!(ed.binding(FieldId::Ratio).state(), BindingState::Bound);
  assert_eq!(ed.binding(FieldId::Unit).state(), BindingState::Unset);
  assert!(ed.sink().is_empty());
}

#[test]
fn poll_after_indices_disabled_releases_waiting_slot() {
  let mut broker = ColumnSelectionBroker::new();
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.open_index_menu(FieldId::Name).unwrap();
  let token = ed.choose_select_column(FieldId::Name, &mut broker).unwrap();
  let mut hidden = node();
  hidden.with_indices = false;
  ed.receive_node(hidden);
  broker.resolve(token, ColumnRef::from(3)).unwrap();
  assert_eq!(ed.poll_selection(&mut broker).unwrap(), 0);
  assert!(broker.is_empty());
  assert_eq!(ed.binding(FieldId::Name).state(), BindingState::Unset);
  assert!(ed.buffer(FieldId::Name).index.is_unset());
  assert_eq!(ed.affordance(FieldId::Name), IndexAffordance::Hidden);
}

#[test]
fn binding_requires_indices() {
  let mut n = node();
  n.with_indices = false;
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(n, &mut updates);
  assert_eq!(ed.affordance(FieldId::Name), IndexAffordance::Hidden);
  assert_eq!(
    ed.open_index_menu(FieldId::Name),
    Err(EditorError::IndicesDisabled)
  );
  assert_eq!(
    ed.on_field_change(FieldId::Name, FieldChange::index(IndexSpec::new("1"))),
    Err(EditorError::IndicesDisabled)
  );
}

#[test]
fn inferred_choice_is_committed() {
  let mut updates: Vec<NodeUpdate> = Vec::new();
  let mut ed = AttributeEditor::new(node(), &mut updates);
  ed.open_index_menu(FieldId::Concentration).unwrap();
  ed.choose_inferred(FieldId::Concentration).unwrap();
  assert_eq!(ed.sink()[0].node.concentration.index.as_str(), "inferred");
  assert!(!ed.missing_index(FieldId::Concentration));
}

proptest! {
  #[test]
  fn commit_equals_node_with_buffers_overlaid(
    edits in proptest::collection::vec((0usize..FieldId::COUNT, "[a-zA-Z0-9;.]{0,8}"), 0..12)
  ) {
    let original = node();
    let mut expected = original.clone();
    let mut updates: Vec<NodeUpdate> = Vec::new();
    {
      let mut ed = AttributeEditor::new(original, &mut updates);
      for (pos, text) in &edits {
        let field = FieldId::ALL[*pos];
        ed.on_field_change(field, FieldChange::value(text.clone())).unwrap();
        let mut state = expected.state(field);
        state.value = text.clone();
        expected.overlay(field, &state);
      }
      ed.commit();
    }
    prop_assert_eq!(updates.len(), 2);
    prop_assert_eq!(&updates[0].node, &expected);
    prop_assert_eq!(&updates[1].node, &expected);
  }
}
