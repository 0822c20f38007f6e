//! Drag controller: at most one active pointer drag, turned into absolute node positions.

use crate::store::NodeStore;
use crate::types::{NodeId, Point};
use tracing::{instrument, trace};

/// The drag in progress: which node, and where the pointer grabbed it relative to the
/// node's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
  pub node_id: NodeId,
  pub offset: Point,
}

/// Tracks the single active drag.
#[derive(Debug, Clone, Default)]
pub struct DragController {
  active: Option<ActiveDrag>,
}

impl DragController {
  pub fn active(&self) -> Option<&ActiveDrag> {
    self.active.as_ref()
  }

  pub fn is_dragging(&self) -> bool {
    self.active.is_some()
  }

  /// Starts dragging `node_id`. Any drag already active is replaced.
  #[instrument(level = "trace", skip(self))]
  pub fn begin_drag(&mut self, node_id: &str, pointer: Point, node_origin: Point) {
    self.active = Some(ActiveDrag {
      node_id: node_id.to_string(),
      offset: pointer - node_origin,
    });
  }

  /// Moves the dragged node so the grab point stays under the pointer.
  ///
  /// The position is written absolutely (`pointer - canvas_origin - offset`) on every call.
  /// Skipped, returning `false`, when no drag is active, the canvas geometry is unavailable,
  /// or the node no longer exists.
  pub fn on_pointer_move(
    &self,
    pointer: Point,
    canvas_origin: Option<Point>,
    store: &mut NodeStore,
  ) -> bool {
    let (Some(drag), Some(origin)) = (&self.active, canvas_origin) else {
      return false;
    };
    let position = pointer - origin - drag.offset;
    trace!(node_id = %drag.node_id, x = position.x, y = position.y, "drag move");
    store.set_position(&drag.node_id, position)
  }

  /// Ends the drag. Called on any pointer release, inside the canvas or not.
  pub fn end_drag(&mut self) {
    self.active = None;
  }
}
