//! Canvas controller: the explicit application state behind the node canvas.
//!
//! Owns the node store, the selection, the drag controller and the mounted canvas geometry,
//! and keeps the cross-component contracts: a deleted node leaves the selection in the same
//! call, grouping selects the new group, and unknown ids never enter the selection.

use crate::config::SculptorConfig;
use crate::drag::DragController;
use crate::influence::influence;
use crate::selection::Selection;
use crate::store::NodeStore;
use crate::types::{Node, NodeId, NodeKind, NodeValue, Point};
use tracing::{debug, instrument};

/// Geometry of the mounted rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
  /// Top-left corner of the canvas in pointer (client) coordinates.
  pub origin: Point,
  pub height: f64,
}

/// Graph state plus the interactions that mutate it.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
  store: NodeStore,
  selection: Selection,
  drag: DragController,
  geometry: Option<CanvasGeometry>,
}

impl Canvas {
  pub fn new(store: NodeStore) -> Self {
    Self {
      store,
      ..Self::default()
    }
  }

  /// Canvas holding the starter nodes.
  pub fn with_starter_nodes(config: &SculptorConfig) -> Self {
    Self::new(NodeStore::with_starter_nodes(config))
  }

  pub fn store(&self) -> &NodeStore {
    &self.store
  }

  pub fn nodes(&self) -> &[Node] {
    self.store.nodes()
  }

  pub fn selection(&self) -> &Selection {
    &self.selection
  }

  pub fn drag(&self) -> &DragController {
    &self.drag
  }

  pub fn geometry(&self) -> Option<CanvasGeometry> {
    self.geometry
  }

  /// Records the surface geometry (on mount and on every resize).
  pub fn mount(&mut self, geometry: CanvasGeometry) {
    self.geometry = Some(geometry);
  }

  pub fn unmount(&mut self) {
    self.geometry = None;
  }

  pub fn add_node(&mut self, kind: NodeKind, base_name: &str) -> NodeId {
    self.store.add_node(kind, base_name).id().to_string()
  }

  /// Deletes `id` from the graph and the selection together.
  #[instrument(level = "trace", skip(self))]
  pub fn delete_node(&mut self, id: &str) -> Option<Node> {
    let removed = self.store.delete_node(id);
    self.selection.remove(id);
    removed
  }

  pub fn update_value(&mut self, id: &str, value: NodeValue) -> bool {
    self.store.update_value(id, value)
  }

  pub fn apply_suggestion(&mut self, node_name: &str, value: NodeValue) -> bool {
    self.store.apply_suggestion(node_name, value)
  }

  /// Click on node `id` (shift-click when `additive`). Unknown ids are ignored.
  pub fn select_node(&mut self, id: &str, additive: bool) {
    if !self.store.contains(id) {
      debug!(id, "select ignored: unknown node");
      return;
    }
    self.selection.select_node(id, additive);
  }

  /// Click on empty canvas space.
  pub fn clear_selection(&mut self) {
    self.selection.clear();
  }

  /// Groups the selected nodes; on success the new group becomes the sole selection.
  #[instrument(level = "trace", skip(self))]
  pub fn group_selected(&mut self) -> Option<NodeId> {
    let group_id = self.store.group_nodes(self.selection.ids())?;
    self.selection.select_only(&group_id);
    Some(group_id)
  }

  /// Pointer-down on a node's handle. Skipped for unknown nodes and while unmounted, since
  /// the grab offset needs the canvas origin.
  pub fn begin_drag(&mut self, id: &str, pointer: Point) {
    let (Some(node), Some(geometry)) = (self.store.get(id), self.geometry) else {
      debug!(id, "drag ignored: unknown node or unmounted canvas");
      return;
    };
    self.drag.begin_drag(id, pointer, geometry.origin + node.position);
  }

  /// Pointer movement anywhere over the page.
  pub fn pointer_move(&mut self, pointer: Point) -> bool {
    let origin = self.geometry.map(|g| g.origin);
    self.drag.on_pointer_move(pointer, origin, &mut self.store)
  }

  /// Global pointer release.
  pub fn end_drag(&mut self) {
    self.drag.end_drag();
  }

  /// Influence of node `id` on the mounted canvas; 0 while unmounted, `None` if unknown.
  pub fn influence_of(&self, id: &str) -> Option<f64> {
    let node = self.store.get(id)?;
    let height = self.geometry.map(|g| g.height).unwrap_or(0.0);
    Some(influence(node.position.y, height))
  }

  /// Clone of the current graph, as handed to the generation backend.
  pub fn snapshot(&self) -> Vec<Node> {
    self.store.nodes().to_vec()
  }
}
