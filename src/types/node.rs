//! A parameter node on the canvas.

use serde::{Deserialize, Serialize};

use super::{NodeKind, NodeValue, Point};

/// Opaque node identifier, unique within a store.
pub type NodeId = String;

/// A parameter node on the canvas.
///
/// `id` and `kind` are fixed at creation and only readable. Group nodes carry a snapshot of
/// the nodes they absorbed in `children` (serialized as `nodes`); it is empty on every
/// other kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
  id: NodeId,
  #[serde(rename = "type")]
  kind: NodeKind,
  pub name: String,
  pub position: Point,
  pub value: NodeValue,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub width: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub height: Option<f64>,
  #[serde(default, rename = "nodes", skip_serializing_if = "Vec::is_empty")]
  children: Vec<Node>,
}

impl Node {
  /// Builds a flat node with the kind's default width.
  pub fn new(
    id: impl Into<NodeId>,
    kind: NodeKind,
    name: impl Into<String>,
    position: Point,
    value: NodeValue,
  ) -> Self {
    Self {
      id: id.into(),
      kind,
      name: name.into(),
      position,
      value,
      width: Some(kind.default_width()),
      height: None,
      children: Vec::new(),
    }
  }

  /// Builds a group node holding `children` as a frozen snapshot.
  pub(crate) fn group(
    id: impl Into<NodeId>,
    name: impl Into<String>,
    position: Point,
    children: Vec<Node>,
  ) -> Self {
    Self {
      children,
      ..Self::new(id, NodeKind::MetaNode, name, position, NodeValue::Empty)
    }
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn kind(&self) -> NodeKind {
    self.kind
  }

  /// Snapshot of grouped nodes; empty unless this is a group.
  pub fn children(&self) -> &[Node] {
    &self.children
  }

  /// Coerces the value of this node and of every grouped node to its kind.
  pub(crate) fn clamp_values(&mut self) {
    self.value = self.kind.clamp_value(std::mem::replace(&mut self.value, NodeValue::Empty));
    for child in &mut self.children {
      child.clamp_values();
    }
  }

  pub fn is_group(&self) -> bool {
    self.kind == NodeKind::MetaNode
  }
}
