//! Outbound node updates and the sinks that receive them.

use serde::{Deserialize, Serialize};

use super::Node;

/// One call into the graph model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdate {
  pub node: Node,
  /// True for full commits (Enter, teardown); false for eager index patches.
  pub end_editing: bool,
}

/// Receiver of node updates from an editor (the graph-model sync point).
pub trait NodeUpdateSink {
  fn handle_node_update(&mut self, node: Node, end_editing: bool);
}

impl NodeUpdateSink for Vec<NodeUpdate> {
  fn handle_node_update(&mut self, node: Node, end_editing: bool) {
    self.push(NodeUpdate { node, end_editing });
  }
}

impl<S: NodeUpdateSink + ?Sized> NodeUpdateSink for &mut S {
  fn handle_node_update(&mut self, node: Node, end_editing: bool) {
    (**self).handle_node_update(node, end_editing);
  }
}

impl<S: NodeUpdateSink + ?Sized> NodeUpdateSink for Box<S> {
  fn handle_node_update(&mut self, node: Node, end_editing: bool) {
    (**self).handle_node_update(node, end_editing);
  }
}

/// Adapts a closure into a [NodeUpdateSink].
pub struct FnSink<F>(pub F);

impl<F: FnMut(Node, bool)> NodeUpdateSink for FnSink<F> {
  fn handle_node_update(&mut self, node: Node, end_editing: bool) {
    (self.0)(node, end_editing);
  }
}
